//! CLI module
//!
//! Command-line interface for the pipeline.
//!
//! # Commands
//!
//! - `run` - Execute the full bronze/silver/gold pipeline
//! - `check` - Validate configuration and probe the API and bucket

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
