//! frontgen CLI
//!
//! Usage: frontgen <COMMAND>
//!
//! Commands:
//!   run     Run the task pipeline for a project
//!   pack    Pack a directory into a bundle archive
//!   unpack  Restore a bundle archive into a directory
//!   diff    Compare two JSON arrays as sets
//!   files   Run the pipeline and list tracked files

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn default_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// `--log-level` wins, then `RUST_LOG`, then the `-v` count
fn init_logging(cli: &Cli) {
    let filter = match &cli.log_level {
        Some(level) => EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn")),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_level(cli.verbose))),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    match &cli.command {
        Commands::Run { project } => commands::run::cmd_run(project, cli.json),
        Commands::Pack { source, archive } => commands::bundle::cmd_pack(source, archive, cli.json),
        Commands::Unpack {
            archive,
            destination,
        } => commands::bundle::cmd_unpack(archive, destination, cli.json),
        Commands::Diff { left, right } => commands::diff::cmd_diff(left, right, cli.json),
        Commands::Files { project, under } => {
            commands::run::cmd_files(project, under.as_deref(), cli.json)
        }
    }
}
