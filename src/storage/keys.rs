//! Object key layout for the medallion layers

use chrono::NaiveDate;

/// Entity name embedded in every layer key.
pub const ENTITY: &str = "breweries";

/// Raw landing key: `bronze/breweries_raw_<YYYY-MM-DD>.json`.
pub fn bronze_key(run_date: NaiveDate) -> String {
    format!("bronze/{ENTITY}_raw_{}.json", run_date.format("%Y-%m-%d"))
}

/// Partition key for one state: `silver/state=<state>/breweries.parquet`.
/// Spaces in the state become underscores so the key stays path-safe.
pub fn silver_partition_key(state: &str) -> String {
    format!("silver/state={}/{ENTITY}.parquet", state.replace(' ', "_"))
}

/// Summary key: `gold/breweries_summary_<YYYY-MM-DD>.parquet`.
pub fn gold_key(run_date: NaiveDate) -> String {
    format!(
        "gold/{ENTITY}_summary_{}.parquet",
        run_date.format("%Y-%m-%d")
    )
}
