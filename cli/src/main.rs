use std::borrow::Cow;
use std::path::PathBuf;

use anyhow::Context as AnyhowContext;
use clap::{Parser, Subcommand};
use flexi_logger::{FileSpec, LevelFilter, LogSpecification, Logger, LoggerHandle, WriteMode};

use apkfp::config::Settings;

mod output;

mod fingerprint;
use fingerprint::Fingerprint;

mod compare;
use compare::Compare;

mod hash;
use hash::Hash;

#[cfg(test)]
mod testing;

const SIMPLE_VERSION_STRING: &'static str =
    include!(concat!(env!("OUT_DIR"), "/simple_version_string"));
const VERSION_STRING: &'static str = include!(concat!(env!("OUT_DIR"), "/version_string"));

#[derive(Parser)]
#[command(name = "apkfp")]
#[command(version(SIMPLE_VERSION_STRING))]
#[command(long_version(VERSION_STRING))]
struct Cli {
    /// `-e`, `--log-stderr`: Log to `stderr` even if a log file is configured
    #[arg(short = 'e', long, help = "Log to stderr instead of a file", action = clap::ArgAction::SetTrue, default_value_t = false)]
    log_stderr: bool,

    /// `-f`, `--log-file`: Path to a log file, overrides `log.file` from the
    /// settings. Logs go to `stderr` when neither is set
    #[arg(short = 'f', long, help = "Send log output to the given file")]
    log_file: Option<PathBuf>,

    /// `-s`, `--log-spec`: Log spec for [flexi_logger](https://docs.rs/flexi_logger/latest/flexi_logger/struct.LogSpecification.html)
    #[arg(short = 's', long, help = "Log spec for flexi_logger")]
    log_spec: Option<String>,

    /// `-l`, `--log-level`: Set the desired log verbosity. Defaults to 0, all values are listed
    /// below:
    ///
    /// | Value | Log Level |
    /// | ----- | --------- |
    /// | **0** | **Warn** |
    /// | 1 | Info |
    /// | 2 | Debug |
    /// | 3 | Trace |
    #[arg(
        short = 'l',
        long,
        help = "Set the log level, 0 = warn, 1 = info, etc",
        long_help = None,
    )]
    log_level: Option<u8>,

    /// `-c`, `--config`: Settings file, defaults to `$APKFP_CONFIG` if set
    #[arg(short = 'c', long, help = "Path to the settings file")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display the full version string and exit
    #[command()]
    Version,

    /// Build the export record for an analysis result
    ///
    /// The record is written as JSON, ready to be uploaded.
    #[command()]
    Fingerprint(Fingerprint),

    /// Compare two analysis results or export records
    ///
    /// Shows whether both are the same build and which fingerprint inputs
    /// differ if not.
    #[command()]
    Compare(Compare),

    /// Print the fingerprint of every given input
    #[command()]
    Hash(Hash),
}

fn level_filter(level: u8) -> LevelFilter {
    match level {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

impl Cli {
    fn configure_loggers(&self, settings: &Settings) -> anyhow::Result<LoggerHandle> {
        let spec = self.log_spec.as_ref().or(settings.log.spec.as_ref());
        let level = self.log_level.or(settings.log.level);

        let log_spec = match spec {
            Some(s) => {
                LogSpecification::parse(s).with_context(|| format!("parsing log spec {}", s))?
            }
            None => match level {
                Some(lvl) if lvl > 0 => LogSpecification::builder()
                    .module("apkfp", level_filter(lvl))
                    .build(),
                _ => LogSpecification::env().with_context(|| "getting log spec from env")?,
            },
        };

        let mut logger = Logger::with(log_spec);

        if !self.log_stderr {
            let path = match self.log_file.as_ref().or(settings.log.file.as_ref()) {
                Some(v) if v.is_absolute() => Some(Cow::Borrowed(v)),
                Some(v) => Some(Cow::Owned(std::env::current_dir()?.join(v))),
                None => None,
            };

            if let Some(p) = &path {
                logger = logger
                    .log_to_file(
                        FileSpec::try_from(p.as_ref()).with_context(|| "creating filespec")?,
                    )
                    .append()
                    .write_mode(WriteMode::BufferAndFlush);
            }
        }

        Ok(logger.start().with_context(|| "starting logger")?)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Version = &cli.command {
        println!("{}\nlibrary {}", VERSION_STRING, apkfp::VERSION);
        return Ok(());
    }

    let settings = Settings::discover(cli.config.as_deref()).with_context(|| "loading settings")?;

    let log_handle = cli.configure_loggers(&settings)?;
    log::debug!("apkfp {}", apkfp::VERSION);

    let res = match &cli.command {
        Commands::Fingerprint(c) => c.run(&settings),
        Commands::Compare(c) => c.run(&settings),
        Commands::Hash(c) => c.run(&settings),

        Commands::Version => unreachable!(),
    };

    log_handle.flush();
    res
}
