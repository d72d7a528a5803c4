//! Output encoding module
//!
//! Converts cleaned JSON records into Arrow RecordBatches and encodes
//! them as Snappy-compressed Parquet for the silver and gold layers.

mod schema;
mod writer;

pub use schema::{infer_schema, json_to_arrow};
pub use writer::batch_to_parquet_bytes;
