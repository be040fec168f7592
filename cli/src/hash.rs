use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context as AnyhowContext;
use clap::Args;

use apkfp::config::Settings;
use apkfp::load::load_input;
use apkfp::ServerSideAppData;

#[derive(Args)]
pub struct Hash {
    /// Analysis results or export records
    #[arg(required = true, num_args = 1..)]
    inputs: Vec<PathBuf>,
}

pub fn hash_line(record: &ServerSideAppData) -> String {
    format!("{}\t{}", record.fingerprint(), record.package_name())
}

impl Hash {
    /// Write one line per input, stopping at the first one that can't be
    /// loaded
    pub fn write_lines<W: Write>(&self, w: &mut W) -> anyhow::Result<()> {
        for path in &self.inputs {
            let record = load_input(path)
                .with_context(|| format!("loading {}", path.display()))?
                .into_record("");
            writeln!(w, "{}", hash_line(&record))?;
        }
        Ok(())
    }

    pub fn run(&self, _settings: &Settings) -> anyhow::Result<()> {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        self.write_lines(&mut lock)
    }
}
