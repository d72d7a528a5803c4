//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Brewery data lake pipeline CLI
#[derive(Parser, Debug)]
#[command(name = "brewlake")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Execute the full pipeline and print the run report
    Run {
        /// Write artifacts under a local directory instead of the
        /// configured bucket (credentials are not required)
        #[arg(long)]
        local: Option<PathBuf>,
    },

    /// Validate configuration and probe the API and the bucket
    Check,
}
