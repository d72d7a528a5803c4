//! # Brewlake
//!
//! A bronze/silver/gold batch pipeline for the Open Brewery DB API.
//! Raw pages land as JSON, cleaned records are partitioned by US state
//! into Snappy Parquet, and a per-type count summary tops the lake off.
//!
//! ## Features
//!
//! - **Paginated extraction**: walks `GET /breweries` page by page until
//!   the API returns an empty page
//! - **Bronze layer**: raw records landed as one JSON file per run date
//! - **Silver layer**: trimmed columns, normalized states, one Parquet
//!   partition per state
//! - **Gold layer**: brewery counts per state and type
//! - **Run logs**: success and failure entries written next to the data
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use brewlake::{Pipeline, PipelineConfig, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = PipelineConfig::from_env()?;
//!     let pipeline = Pipeline::from_config(&config)?;
//!
//!     let report = pipeline.run().await?;
//!     println!("{} records landed at {}", report.records_fetched, report.bronze_key);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                          Pipeline                           │
//! │            run() → RunReport, one layer at a time           │
//! └─────────────────────────────────────────────────────────────┘
//!                │                │                │
//! ┌──────────────┴──┬─────────────┴────┬───────────┴────────────┐
//! │     Bronze      │      Silver      │         Gold           │
//! ├─────────────────┼──────────────────┼────────────────────────┤
//! │ raw JSON        │ drop columns     │ group by state + type  │
//! │ one file per    │ normalize states │ count rows             │
//! │ run date        │ Parquet per state│ Parquet summary        │
//! └─────────────────┴──────────────────┴────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)] // TODO: Add docs before 1.0 release

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the pipeline
pub mod error;

/// Configuration from environment variables
pub mod config;

/// Open Brewery DB API client
pub mod source;

/// Object store wrapper and lake key layout
pub mod storage;

/// Cleaned table and summary row types
pub mod table;

/// Arrow/Parquet output
pub mod output;

/// Bronze, silver, and gold stages
pub mod layers;

/// Run log entries written to the lake
pub mod runlog;

/// Pipeline driver
pub mod pipeline;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};

// Re-export commonly used types
pub use config::{ApiConfig, PipelineConfig, StoreConfig};
pub use pipeline::{Pipeline, RunReport};
pub use table::{CleanedTable, SummaryRow};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
