//! Medallion layers
//!
//! One submodule per layer:
//! - bronze lands the raw fetch as JSON
//! - silver cleans it and writes state-partitioned Parquet
//! - gold reduces the cleaned table to a (state, type) count summary

mod bronze;
mod gold;
mod silver;

pub use bronze::BronzeWriter;
pub use gold::{summarize, GoldAggregator, COUNT_FIELD, TYPE_FIELD};
pub use silver::{SilverTransformer, DROPPED_COLUMNS, PARTITION_FIELD};

/// Task names recorded in the run log, one per layer stage.
pub const BRONZE_TASK: &str = "bronze_step";
pub const SILVER_TASK: &str = "silver_step";
pub const GOLD_TASK: &str = "gold_step";
