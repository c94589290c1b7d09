use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// frontgen - frontend asset generation pipeline
#[derive(Parser, Debug)]
#[command(name = "frontgen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Emit NDJSON events on stdout
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log filter (overrides -v and RUST_LOG), e.g. "frontgen=debug"
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the project lives and which config file to use
#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    /// Project root directory
    #[arg(short, long, default_value = ".")]
    pub project: PathBuf,

    /// Configuration file (defaults to <project>/frontgen.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Force production mode
    #[arg(long)]
    pub production: bool,

    /// Build a new production bundle instead of reusing prod.bundle
    #[arg(long, requires = "production")]
    pub bundle_build: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the task pipeline for a project
    Run {
        #[command(flatten)]
        project: ProjectArgs,
    },

    /// Pack a directory into a bundle archive
    Pack {
        /// Directory to pack
        source: PathBuf,

        /// Archive to write
        archive: PathBuf,
    },

    /// Restore a bundle archive into a directory (replacing its content)
    Unpack {
        /// Archive to read
        archive: PathBuf,

        /// Directory to restore into
        destination: PathBuf,
    },

    /// Compare two JSON arrays as sets, in both directions
    Diff {
        /// JSON file holding the first array
        left: PathBuf,

        /// JSON file holding the second array
        right: PathBuf,
    },

    /// Run the pipeline and list every file it generated or verified
    Files {
        #[command(flatten)]
        project: ProjectArgs,

        /// Only list files below this directory
        #[arg(long)]
        under: Option<PathBuf>,
    },
}
