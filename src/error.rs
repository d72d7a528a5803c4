//! Error types for the brewlake pipeline
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for the pipeline
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Extraction Errors
    // ============================================================================
    #[error("Fetch failed on page {page}: HTTP {status}")]
    Fetch { page: u32, status: u16 },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    // ============================================================================
    // Data Quality Errors
    // ============================================================================
    #[error("Validation failed: {message}")]
    Validation { message: String },

    // ============================================================================
    // Encoding Errors
    // ============================================================================
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    // ============================================================================
    // Storage Errors
    // ============================================================================
    #[error("Object store error: {0}")]
    Storage(#[from] object_store::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a config error naming every missing environment variable at once
    pub fn missing_env(names: &[&str]) -> Self {
        Self::Config {
            message: format!(
                "missing required environment variables: {}",
                names.join(", ")
            ),
        }
    }

    /// Create a fetch error for a failed page request
    pub fn fetch(page: u32, status: u16) -> Self {
        Self::Fetch { page, status }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

/// Result type alias for the brewlake pipeline
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::fetch(3, 503);
        assert_eq!(err.to_string(), "Fetch failed on page 3: HTTP 503");

        let err = Error::validation("silver table is empty");
        assert_eq!(err.to_string(), "Validation failed: silver table is empty");
    }

    #[test]
    fn test_missing_env_lists_all_names() {
        let err = Error::missing_env(&["AWS_ACCESS_KEY_ID", "S3_BUCKET_NAME"]);
        let msg = err.to_string();
        assert!(msg.contains("AWS_ACCESS_KEY_ID"));
        assert!(msg.contains("S3_BUCKET_NAME"));
        assert!(msg.contains("missing required environment variables"));
    }

    #[test]
    fn test_json_parse_conversion() {
        let parse_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: Error = parse_err.into();
        assert!(matches!(err, Error::JsonParse(_)));
    }
}
