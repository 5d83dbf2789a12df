use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser};
use commands::Commands;
use semdiff::config::{read_config, Config};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(version, about = "structural diffs of source files")]
struct Cli {
    /// log more (-v for debug, -vv for trace).  `RUST_LOG`
    /// takes precedence when set.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// read this configuration file after the default ones
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

fn init_logging(verbose: u8, cfg: &Config) {
    let directive = match verbose {
        0 => cfg
            .log
            .filter
            .clone()
            .unwrap_or_else(|| "semdiff=warn".to_string()),
        1 => "semdiff=debug".to_string(),
        _ => "semdiff=trace".to_string(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let (cfg, read) = read_config(cli.config.as_deref())?;

    init_logging(cli.verbose, &cfg);

    for path in &read {
        debug!(path = %path.display(), "read configuration");
    }

    cli.command.execute(&cfg)
}
