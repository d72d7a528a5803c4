//! Pipeline driver
//!
//! Sequences bronze → silver → gold over one injected store, threading
//! each stage's output into the next as a plain return value. Every
//! stage runs inside a failure-logging wrapper: on error the driver
//! writes the diagnostic entry to the object store and propagates the
//! error unchanged.

use std::future::Future;

use chrono::{NaiveDate, Utc};
use tracing::{info, warn};

use crate::config::PipelineConfig;
use crate::error::{Error, Result};
use crate::layers::{
    summarize, BronzeWriter, GoldAggregator, SilverTransformer, BRONZE_TASK, GOLD_TASK,
    SILVER_TASK,
};
use crate::runlog::{Layer, RunLogger};
use crate::source::SourceClient;
use crate::storage::LakeStore;
use crate::table::CleanedTable;

/// Outcome of one successful pipeline run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub records_fetched: usize,
    pub bronze_key: String,
    pub rows_cleaned: usize,
    pub state_count: usize,
    pub summary_rows: usize,
    pub gold_key: String,
}

/// The three-stage medallion pipeline.
pub struct Pipeline {
    source: SourceClient,
    runlog: RunLogger,
    bronze: BronzeWriter,
    silver: SilverTransformer,
    gold: GoldAggregator,
    run_date: NaiveDate,
}

impl Pipeline {
    /// Builds a pipeline against the configured bucket and API.
    pub fn from_config(config: &PipelineConfig) -> Result<Self> {
        let source = SourceClient::new(&config.api)?;
        let store = LakeStore::from_config(&config.store)?;
        Ok(Self::new(source, store))
    }

    /// Builds a pipeline over an explicit source and store.
    ///
    /// The run date is captured here, once, so every artifact of the
    /// run shares it even across a midnight boundary.
    pub fn new(source: SourceClient, store: LakeStore) -> Self {
        let run_date = Utc::now().date_naive();
        let runlog = RunLogger::new(store.clone());

        Self {
            source,
            bronze: BronzeWriter::new(store.clone(), runlog.clone(), run_date),
            silver: SilverTransformer::new(store.clone(), runlog.clone()),
            gold: GoldAggregator::new(store, runlog.clone(), run_date),
            runlog,
            run_date,
        }
    }

    pub fn run_date(&self) -> NaiveDate {
        self.run_date
    }

    /// Runs the full pipeline: fetch and land raw records, clean and
    /// partition them, then aggregate the summary.
    pub async fn run(&self) -> Result<RunReport> {
        info!(run_date = %self.run_date, "pipeline run starting");

        let (records_fetched, bronze_key) = self
            .logged(Layer::Bronze, BRONZE_TASK, async {
                let records = self.source.fetch_all().await?;
                let key = self.bronze.write(&records).await?;
                Ok((records.len(), key))
            })
            .await?;

        let table = self
            .logged(Layer::Silver, SILVER_TASK, async {
                let table = self.silver.transform(&bronze_key).await?;
                validate_cleaned(&table)?;
                Ok(table)
            })
            .await?;

        let summary_rows = summarize(&table).len();
        let gold_key = self
            .logged(Layer::Gold, GOLD_TASK, self.gold.aggregate(&table))
            .await?;

        let report = RunReport {
            records_fetched,
            bronze_key,
            rows_cleaned: table.len(),
            state_count: table.states().len(),
            summary_rows,
            gold_key,
        };
        info!(
            records = report.records_fetched,
            rows = report.rows_cleaned,
            states = report.state_count,
            summary_rows = report.summary_rows,
            "pipeline run finished"
        );
        Ok(report)
    }

    /// Wraps one stage: on error, writes the diagnostic entry for the
    /// layer and returns the error unchanged. A failing diagnostic
    /// write never masks the stage error.
    async fn logged<T, F>(&self, layer: Layer, task: &str, stage: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        match stage.await {
            Ok(value) => Ok(value),
            Err(error) => {
                if let Err(log_error) = self.runlog.failure(layer, task, &error).await {
                    warn!(%log_error, %layer, task, "failed to write failure log entry");
                }
                Err(error)
            }
        }
    }
}

/// Caller-side checks on the silver output, before gold runs.
fn validate_cleaned(table: &CleanedTable) -> Result<()> {
    if table.is_empty() {
        return Err(Error::validation("cleaned silver table is empty"));
    }
    if table.states().is_empty() {
        return Err(Error::validation(
            "state column is missing or entirely null",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_rejects_an_empty_table() {
        let err = validate_cleaned(&CleanedTable::default()).unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_validate_accepts_a_populated_table() {
        let table = CleanedTable::new(vec![json!({"state": "ohio"})]);
        assert!(validate_cleaned(&table).is_ok());
    }
}
