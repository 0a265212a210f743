//! Splitz CLI: drive the local runtime from the command line.
//!
//! Every invocation loads the persisted state, runs one command as one
//! atomic runtime call, saves the state back if it could have changed, and
//! prints the result as JSON on stdout.

mod commands;
mod config;
mod state;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use splitz_runtime::Runtime;
use splitz_types::AccountId;
use splitz_utils::LogFormat;

use crate::commands::Command;
use crate::config::CliConfig;

#[derive(Parser)]
#[command(name = "splitz", about = "Proportional payment splitter harness")]
struct Cli {
    /// Path to a TOML configuration file. File settings are the base;
    /// flags and env vars override them.
    #[arg(long, env = "SPLITZ_CONFIG")]
    config: Option<PathBuf>,

    /// State snapshot to load and save.
    #[arg(long, env = "SPLITZ_STATE_FILE")]
    state_file: Option<PathBuf>,

    /// Deployer account used to derive new contract addresses.
    #[arg(long, env = "SPLITZ_DEPLOYER")]
    deployer: Option<String>,

    /// Log output format: "human" or "json".
    #[arg(long, env = "SPLITZ_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "SPLITZ_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    /// Layer flags and environment over the file config.
    fn resolve(&self) -> anyhow::Result<CliConfig> {
        let base = match &self.config {
            Some(path) => CliConfig::from_toml_file(path)?,
            None => CliConfig::default(),
        };
        Ok(CliConfig {
            state_file: self.state_file.clone().unwrap_or(base.state_file),
            deployer: self.deployer.clone().unwrap_or(base.deployer),
            log_format: self.log_format.unwrap_or(base.log_format),
            log_level: self.log_level.clone().unwrap_or(base.log_level),
        })
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve()?;
    splitz_utils::init_logging(config.log_format, &config.log_level);

    let deployer: AccountId = config
        .deployer
        .parse()
        .context("invalid deployer account")?;
    let saved = state::load(&config.state_file, &deployer)?;
    let mut runtime = Runtime::from_state(saved);

    let mutates = cli.command.mutates();
    let output = commands::run(&mut runtime, cli.command)?;

    if mutates {
        state::save(&config.state_file, runtime.state())?;
        tracing::debug!(path = %config.state_file.display(), "state saved");
    }
    println!("{output}");
    Ok(())
}
