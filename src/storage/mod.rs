//! Data lake storage module
//!
//! All pipeline artifacts and run logs live in one bucket. This module
//! provides:
//! - [`LakeStore`], a thin gateway over `object_store` put/get/list
//! - key builders for the bronze/silver/gold layer layout

mod keys;
mod store;

pub use keys::{bronze_key, gold_key, silver_partition_key, ENTITY};
pub use store::LakeStore;
