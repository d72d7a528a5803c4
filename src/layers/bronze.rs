//! Bronze layer: raw landing of the fetched records

use bytes::Bytes;
use chrono::NaiveDate;
use serde_json::Value;
use tracing::info;

use super::BRONZE_TASK;
use crate::error::Result;
use crate::runlog::{Layer, RunLogger};
use crate::storage::{bronze_key, LakeStore};

/// Lands the raw fetched collection as one JSON object per run date.
pub struct BronzeWriter {
    store: LakeStore,
    runlog: RunLogger,
    run_date: NaiveDate,
}

impl BronzeWriter {
    pub fn new(store: LakeStore, runlog: RunLogger, run_date: NaiveDate) -> Self {
        Self {
            store,
            runlog,
            run_date,
        }
    }

    /// Serializes `records` to JSON and writes the bronze object,
    /// returning its key. Re-running on the same date overwrites it.
    pub async fn write(&self, records: &[Value]) -> Result<String> {
        let key = bronze_key(self.run_date);
        let body = serde_json::to_vec(records)?;

        let uri = self.store.put(&key, Bytes::from(body)).await?;
        info!(%uri, records = records.len(), "bronze layer saved");

        self.runlog
            .success(
                Layer::Bronze,
                BRONZE_TASK,
                &format!("Bronze layer saved with {} records.", records.len()),
            )
            .await?;

        Ok(key)
    }
}
