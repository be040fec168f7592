use std::env;
use std::path::PathBuf;

use anyhow::Context as AnyhowContext;
use clap::Args;

use apkfp::config::Settings;
use apkfp::load::load_detail;
use apkfp::ServerSideAppData;

use crate::output::write_record;

/// Env var consulted for the device id after the CLI flag and settings
pub const DEVICE_ID_ENV: &str = "APKFP_DEVICE_ID";

/// Pick the device id: flag, then settings, then env, then empty
pub fn resolve_device_id(flag: Option<&str>, settings: &Settings, env: Option<String>) -> String {
    flag.map(String::from)
        .or_else(|| settings.device_id.clone())
        .or(env)
        .unwrap_or_default()
}

pub fn device_id_from_env() -> Option<String> {
    env::var(DEVICE_ID_ENV).ok().filter(|it| !it.is_empty())
}

#[derive(Args)]
pub struct Fingerprint {
    /// Analysis result as JSON
    input: PathBuf,

    /// ID of the device the analysis ran on
    #[arg(short = 'd', long)]
    device_id: Option<String>,

    /// Write the record here instead of stdout
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Pretty print the JSON, also enabled by `output.pretty` in the settings
    #[arg(short, long, default_value_t = false, action = clap::ArgAction::SetTrue)]
    pretty: bool,
}

impl Fingerprint {
    pub fn run(&self, settings: &Settings) -> anyhow::Result<()> {
        let detail = load_detail(&self.input)
            .with_context(|| format!("loading {}", self.input.display()))?;

        let device_id = resolve_device_id(self.device_id.as_deref(), settings, device_id_from_env());
        if device_id.is_empty() {
            log::warn!("no device id given, exporting with an empty one");
        }

        let record = ServerSideAppData::new(&detail, device_id);
        write_record(&record, self.out.as_deref(), self.pretty || settings.pretty)
    }
}
