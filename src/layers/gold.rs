//! Gold layer: brewery counts per state and type

use std::collections::BTreeMap;

use arrow::datatypes::{DataType, Field, Schema};
use chrono::NaiveDate;
use serde_json::Value;
use tracing::info;

use super::{GOLD_TASK, PARTITION_FIELD};
use crate::error::{Error, Result};
use crate::output::{batch_to_parquet_bytes, json_to_arrow};
use crate::runlog::{Layer, RunLogger};
use crate::storage::{gold_key, LakeStore};
use crate::table::{CleanedTable, SummaryRow};

/// Column the summary groups by next to the state.
pub const TYPE_FIELD: &str = "brewery_type";

/// Count column of the summary file.
pub const COUNT_FIELD: &str = "brewery_count";

/// Reduces the cleaned table to one summary Parquet file.
pub struct GoldAggregator {
    store: LakeStore,
    runlog: RunLogger,
    run_date: NaiveDate,
}

impl GoldAggregator {
    pub fn new(store: LakeStore, runlog: RunLogger, run_date: NaiveDate) -> Self {
        Self {
            store,
            runlog,
            run_date,
        }
    }

    /// Counts breweries per (state, type) and writes the summary file,
    /// returning its key. An empty table is rejected before any write.
    pub async fn aggregate(&self, table: &CleanedTable) -> Result<String> {
        if table.is_empty() {
            return Err(Error::validation("input table for gold is empty"));
        }

        let summary = summarize(table);
        let rows: Vec<Value> = summary
            .iter()
            .map(serde_json::to_value)
            .collect::<serde_json::Result<_>>()?;

        // Fixed schema rather than inference: keeps the column order of
        // the summary and a Utf8 type column even when every type is null.
        let schema = Schema::new(vec![
            Field::new(PARTITION_FIELD, DataType::Utf8, false),
            Field::new(TYPE_FIELD, DataType::Utf8, true),
            Field::new(COUNT_FIELD, DataType::Int64, false),
        ]);
        let batch = json_to_arrow(&rows, Some(&schema))?;
        let data = batch_to_parquet_bytes(&batch)?;

        let key = gold_key(self.run_date);
        let uri = self.store.put(&key, data).await?;
        info!(%uri, rows = summary.len(), "gold layer saved");

        self.runlog
            .success(
                Layer::Gold,
                GOLD_TASK,
                &format!("Gold layer created with {} rows.", summary.len()),
            )
            .await?;

        Ok(key)
    }
}

/// Counts rows per (state, brewery_type) in a deterministic order.
///
/// A null or absent type forms its own group, so the group counts always
/// sum to the table's row count.
pub fn summarize(table: &CleanedTable) -> Vec<SummaryRow> {
    let mut counts: BTreeMap<(String, Option<String>), u64> = BTreeMap::new();

    for row in table.rows() {
        let state = row
            .get(PARTITION_FIELD)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let brewery_type = row
            .get(TYPE_FIELD)
            .and_then(Value::as_str)
            .map(str::to_string);
        *counts.entry((state, brewery_type)).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|((state, brewery_type), brewery_count)| SummaryRow {
            state,
            brewery_type,
            brewery_count,
        })
        .collect()
}
