//! Silver layer: cleaning and state-partitioned Parquet files

use serde_json::Value;
use tracing::info;

use super::SILVER_TASK;
use crate::error::Result;
use crate::output::{batch_to_parquet_bytes, infer_schema, json_to_arrow};
use crate::runlog::{Layer, RunLogger};
use crate::storage::{silver_partition_key, LakeStore};
use crate::table::CleanedTable;

/// Columns removed from every record when present. A record that never
/// had them is fine.
pub const DROPPED_COLUMNS: [&str; 3] = ["website_url", "updated_at", "created_at"];

/// Column the silver layer filters, normalizes, and partitions on.
pub const PARTITION_FIELD: &str = "state";

/// Cleans the bronze batch and writes one Parquet file per state.
pub struct SilverTransformer {
    store: LakeStore,
    runlog: RunLogger,
}

impl SilverTransformer {
    pub fn new(store: LakeStore, runlog: RunLogger) -> Self {
        Self { store, runlog }
    }

    /// Reads and parses the JSON batch at `bronze_key`, applies the
    /// cleaning rules, and writes each state partition. Returns the full
    /// cleaned table for downstream aggregation.
    ///
    /// A failure mid-loop leaves the partitions already written in
    /// place; there is no rollback.
    pub async fn transform(&self, bronze_key: &str) -> Result<CleanedTable> {
        let raw = self.store.get(bronze_key).await?;
        let records: Vec<Value> = serde_json::from_slice(&raw)?;

        let table = clean(records);

        // One schema over the whole table so every partition shares a
        // column layout even when a field is absent from its rows.
        let schema = infer_schema(table.rows())?;
        let partitions = table.partition_by_state();

        for (state, rows) in &partitions {
            let batch = json_to_arrow(rows, Some(&schema))?;
            let data = batch_to_parquet_bytes(&batch)?;
            let uri = self.store.put(&silver_partition_key(state), data).await?;
            info!(%uri, state = state.as_str(), rows = rows.len(), "silver partition saved");
        }

        self.runlog
            .success(
                Layer::Silver,
                SILVER_TASK,
                &format!(
                    "Silver layer written with {} records and {} states.",
                    table.len(),
                    partitions.len()
                ),
            )
            .await?;

        Ok(table)
    }
}

/// Applies the cleaning rules: drop the non-essential columns, exclude
/// rows without a usable state, store the state normalized.
pub(super) fn clean(records: Vec<Value>) -> CleanedTable {
    let rows = records
        .into_iter()
        .filter_map(|mut record| {
            let obj = record.as_object_mut()?;
            for column in DROPPED_COLUMNS {
                obj.remove(column);
            }
            let state = normalize_state(obj.get(PARTITION_FIELD)?)?;
            obj.insert(PARTITION_FIELD.to_string(), Value::String(state));
            Some(record)
        })
        .collect();

    CleanedTable::new(rows)
}

/// Trims and lower-cases a state value. `None` when the value is not a
/// string or is blank after trimming. Idempotent.
pub(super) fn normalize_state(value: &Value) -> Option<String> {
    let state = value.as_str()?.trim().to_lowercase();
    if state.is_empty() {
        None
    } else {
        Some(state)
    }
}
