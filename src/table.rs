//! In-memory table passed between pipeline layers
//!
//! The silver layer produces a [`CleanedTable`] of flat JSON records and
//! the gold layer reduces it to [`SummaryRow`]s. Both stay in plain JSON
//! form until they are encoded to Arrow at write time.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// Cleaned brewery records. Every row is a JSON object with a non-empty,
/// normalized `state` field.
#[derive(Debug, Clone, Default)]
pub struct CleanedTable {
    rows: Vec<Value>,
}

impl CleanedTable {
    pub fn new(rows: Vec<Value>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Value] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct states present in the table, sorted.
    pub fn states(&self) -> Vec<String> {
        self.partition_by_state().into_keys().collect()
    }

    /// Groups rows by their `state` field. `BTreeMap` keeps partition
    /// order stable across runs.
    pub fn partition_by_state(&self) -> BTreeMap<String, Vec<Value>> {
        let mut partitions: BTreeMap<String, Vec<Value>> = BTreeMap::new();
        for row in &self.rows {
            if let Some(state) = row.get("state").and_then(Value::as_str) {
                partitions
                    .entry(state.to_string())
                    .or_default()
                    .push(row.clone());
            }
        }
        partitions
    }
}

/// One row of the gold summary: breweries counted per state and type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    pub state: String,
    /// `None` when the source records carry a null `brewery_type`.
    pub brewery_type: Option<String>,
    pub brewery_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> CleanedTable {
        CleanedTable::new(vec![
            json!({"id": "a", "state": "texas"}),
            json!({"id": "b", "state": "ohio"}),
            json!({"id": "c", "state": "texas"}),
            json!({"id": "d", "state": "new york"}),
        ])
    }

    #[test]
    fn test_partitions_rows_by_state() {
        let partitions = sample().partition_by_state();

        assert_eq!(partitions.len(), 3);
        assert_eq!(partitions["texas"].len(), 2);
        assert_eq!(partitions["ohio"].len(), 1);
        assert_eq!(partitions["new york"].len(), 1);
    }

    #[test]
    fn test_states_are_sorted_and_distinct() {
        assert_eq!(sample().states(), vec!["new york", "ohio", "texas"]);
    }

    #[test]
    fn test_empty_table_reports_empty() {
        let table = CleanedTable::default();

        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
        assert!(table.states().is_empty());
    }

    #[test]
    fn test_summary_row_serializes_null_type() {
        let row = SummaryRow {
            state: "texas".to_string(),
            brewery_type: None,
            brewery_count: 3,
        };

        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(
            value,
            json!({"state": "texas", "brewery_type": null, "brewery_count": 3})
        );
    }
}
