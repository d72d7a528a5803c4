//! In-memory Parquet encoding
//!
//! Layer files are small enough to encode fully in memory before the
//! object-store write, so there is no streaming writer here.

use arrow::record_batch::RecordBatch;
use bytes::Bytes;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::error::Result;

/// Encodes a RecordBatch as one Snappy-compressed Parquet file.
pub fn batch_to_parquet_bytes(batch: &RecordBatch) -> Result<Bytes> {
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();

    let mut buffer = Vec::new();
    let mut writer = ArrowWriter::try_new(&mut buffer, batch.schema(), Some(props))?;
    writer.write(batch)?;
    writer.close()?;

    Ok(Bytes::from(buffer))
}
