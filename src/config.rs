//! Pipeline configuration
//!
//! Configuration comes from the process environment. Required credentials
//! are validated up front and every missing variable is reported in a
//! single error rather than one at a time.

use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};

/// Public brewery directory API.
const DEFAULT_API_URL: &str = "https://api.openbrewerydb.org";
const DEFAULT_PAGE_SIZE: u32 = 100;
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_REGION: &str = "us-east-1";

/// Source API settings.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the directory API. The fetch appends `/breweries`.
    pub base_url: String,
    /// Records requested per page.
    pub page_size: u32,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ApiConfig {
    /// Reads only the API settings from the environment, for runs that
    /// never touch the bucket.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the API settings through an injected variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let base_url =
            optional(&lookup, "BREWERY_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Url::parse(&base_url)?;

        Ok(Self {
            base_url,
            ..Self::default()
        })
    }
}

/// Object store settings for the data lake bucket.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub bucket: String,
    pub region: String,
    /// Custom endpoint for S3-compatible stores (MinIO, LocalStack).
    pub endpoint: Option<String>,
    pub access_key_id: String,
    pub secret_access_key: String,
}

/// Complete configuration for a pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub api: ApiConfig,
    pub store: StoreConfig,
}

impl PipelineConfig {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through an injected variable lookup.
    ///
    /// Missing or empty required variables are collected and reported
    /// together in one [`Error::Config`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut missing = Vec::new();
        let access_key_id = require(&lookup, "AWS_ACCESS_KEY_ID", &mut missing);
        let secret_access_key = require(&lookup, "AWS_SECRET_ACCESS_KEY", &mut missing);
        let bucket = require(&lookup, "S3_BUCKET_NAME", &mut missing);
        if !missing.is_empty() {
            return Err(Error::missing_env(&missing));
        }

        Ok(Self {
            api: ApiConfig::from_lookup(&lookup)?,
            store: StoreConfig {
                bucket,
                region: optional(&lookup, "AWS_DEFAULT_REGION")
                    .unwrap_or_else(|| DEFAULT_REGION.to_string()),
                endpoint: optional(&lookup, "AWS_ENDPOINT"),
                access_key_id,
                secret_access_key,
            },
        })
    }
}

/// Fetches a required variable, recording its name when absent or empty.
fn require(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    missing: &mut Vec<&'static str>,
) -> String {
    match lookup(name) {
        Some(value) if !value.is_empty() => value,
        _ => {
            missing.push(name);
            String::new()
        }
    }
}

/// Fetches an optional variable, treating the empty string as unset.
fn optional(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn full_env() -> HashMap<String, String> {
        env(&[
            ("AWS_ACCESS_KEY_ID", "test-key"),
            ("AWS_SECRET_ACCESS_KEY", "test-secret"),
            ("S3_BUCKET_NAME", "brewery-lake"),
        ])
    }

    #[test]
    fn test_loads_with_defaults() {
        let vars = full_env();
        let config = PipelineConfig::from_lookup(|name| vars.get(name).cloned()).unwrap();

        assert_eq!(config.store.bucket, "brewery-lake");
        assert_eq!(config.store.region, "us-east-1");
        assert_eq!(config.store.endpoint, None);
        assert_eq!(config.api.base_url, "https://api.openbrewerydb.org");
        assert_eq!(config.api.page_size, 100);
        assert_eq!(config.api.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_reports_all_missing_variables_together() {
        let vars = env(&[("AWS_ACCESS_KEY_ID", "test-key")]);
        let err = PipelineConfig::from_lookup(|name| vars.get(name).cloned()).unwrap_err();

        let message = err.to_string();
        assert!(message.contains("AWS_SECRET_ACCESS_KEY"));
        assert!(message.contains("S3_BUCKET_NAME"));
        assert!(!message.contains("AWS_ACCESS_KEY_ID"));
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        let mut vars = full_env();
        vars.insert("S3_BUCKET_NAME".to_string(), String::new());
        let err = PipelineConfig::from_lookup(|name| vars.get(name).cloned()).unwrap_err();

        assert!(err.to_string().contains("S3_BUCKET_NAME"));
    }

    #[test]
    fn test_overrides_region_and_endpoint() {
        let mut vars = full_env();
        vars.insert("AWS_DEFAULT_REGION".to_string(), "eu-west-2".to_string());
        vars.insert("AWS_ENDPOINT".to_string(), "http://localhost:9000".to_string());
        let config = PipelineConfig::from_lookup(|name| vars.get(name).cloned()).unwrap();

        assert_eq!(config.store.region, "eu-west-2");
        assert_eq!(
            config.store.endpoint.as_deref(),
            Some("http://localhost:9000")
        );
    }

    #[test]
    fn test_rejects_invalid_api_url() {
        let mut vars = full_env();
        vars.insert("BREWERY_API_URL".to_string(), "not a url".to_string());
        let err = PipelineConfig::from_lookup(|name| vars.get(name).cloned()).unwrap_err();

        assert!(matches!(err, Error::InvalidUrl(_)));
    }
}
