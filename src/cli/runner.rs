//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::config::{ApiConfig, PipelineConfig};
use crate::error::Result;
use crate::pipeline::Pipeline;
use crate::source::SourceClient;
use crate::storage::LakeStore;
use std::path::Path;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Run { local } => self.run_pipeline(local.as_deref()).await,
            Commands::Check => self.check().await,
        }
    }

    /// Execute the full pipeline and print a run report
    async fn run_pipeline(&self, local: Option<&Path>) -> Result<()> {
        let pipeline = match local {
            // Local runs only need the API settings, not bucket credentials
            Some(root) => {
                let api = ApiConfig::from_env()?;
                let source = SourceClient::new(&api)?;
                Pipeline::new(source, LakeStore::local(root)?)
            }
            None => {
                let config = PipelineConfig::from_env()?;
                Pipeline::from_config(&config)?
            }
        };

        let report = pipeline.run().await?;

        println!("Pipeline run for {} finished.", pipeline.run_date());
        println!("  records fetched: {}", report.records_fetched);
        println!("  bronze:          {}", report.bronze_key);
        println!(
            "  silver:          {} rows across {} states",
            report.rows_cleaned, report.state_count
        );
        println!(
            "  gold:            {} ({} summary rows)",
            report.gold_key, report.summary_rows
        );
        Ok(())
    }

    /// Validate configuration, then probe the API and the bucket
    async fn check(&self) -> Result<()> {
        let config = PipelineConfig::from_env()?;
        println!("Configuration loaded.");

        let source = SourceClient::new(&config.api)?;
        source.probe().await?;
        println!("API reachable at {}.", config.api.base_url);

        let store = LakeStore::from_config(&config.store)?;
        let logs = store.list("logs").await?;
        println!(
            "Bucket {} reachable ({} run log entries).",
            config.store.bucket,
            logs.len()
        );
        Ok(())
    }
}
