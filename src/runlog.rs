//! Run-scoped audit logging to the object store
//!
//! Every run leaves a trail under `logs/<layer>/<date>/`: one entry per
//! completed stage and one per failed stage. Entries are plain text.
//! Keys carry a second-resolution timestamp, so two writes for the same
//! task within one second share a key and the later one wins.

use std::fmt;

use bytes::Bytes;
use chrono::{DateTime, Utc};

use crate::error::{Error, Result};
use crate::storage::LakeStore;

/// Pipeline layer a log entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Bronze,
    Silver,
    Gold,
}

impl Layer {
    pub fn as_str(self) -> &'static str {
        match self {
            Layer::Bronze => "bronze",
            Layer::Silver => "silver",
            Layer::Gold => "gold",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Writer for the `logs/` prefix of the lake bucket.
#[derive(Debug, Clone)]
pub struct RunLogger {
    store: LakeStore,
}

impl RunLogger {
    pub fn new(store: LakeStore) -> Self {
        Self { store }
    }

    /// Records a success entry for `task`, returning the log key.
    ///
    /// Key: `logs/<layer>/<date>/<task>_SUCCESS_<timestamp>.txt`
    pub async fn success(&self, layer: Layer, task: &str, message: &str) -> Result<String> {
        let timestamp = Self::timestamp(Utc::now());
        let key = format!(
            "logs/{layer}/{date}/{task}_SUCCESS_{timestamp}.txt",
            date = &timestamp[..10],
        );
        self.store
            .put(&key, Bytes::from(message.to_string()))
            .await?;
        Ok(key)
    }

    /// Records a failure entry for `task` carrying the error and its
    /// cause chain, returning the log key.
    ///
    /// Key: `logs/<layer>/<date>/<task>_<timestamp>.txt`
    pub async fn failure(&self, layer: Layer, task: &str, error: &Error) -> Result<String> {
        let timestamp = Self::timestamp(Utc::now());
        let key = format!(
            "logs/{layer}/{date}/{task}_{timestamp}.txt",
            date = &timestamp[..10],
        );
        let body = failure_body(&timestamp, task, error);
        self.store.put(&key, Bytes::from(body)).await?;
        Ok(key)
    }

    fn timestamp(now: DateTime<Utc>) -> String {
        now.format("%Y-%m-%dT%H:%M:%S").to_string()
    }
}

/// Renders the diagnostic text for a failure entry.
fn failure_body(timestamp: &str, task: &str, error: &Error) -> String {
    use std::fmt::Write;

    let mut body = format!("[{timestamp}] Task: {task}\nError: {error}\n");
    let mut source = std::error::Error::source(error);
    if source.is_some() {
        body.push_str("\nCaused by:\n");
    }
    while let Some(cause) = source {
        let _ = writeln!(body, "  {cause}");
        source = cause.source();
    }
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn logger() -> (RunLogger, LakeStore) {
        let store = LakeStore::in_memory();
        (RunLogger::new(store.clone()), store)
    }

    #[test]
    fn test_layer_names() {
        assert_eq!(Layer::Bronze.to_string(), "bronze");
        assert_eq!(Layer::Silver.to_string(), "silver");
        assert_eq!(Layer::Gold.to_string(), "gold");
    }

    #[tokio::test]
    async fn test_success_entry_lands_under_the_layer_prefix() {
        let (logger, store) = logger();

        let key = logger
            .success(Layer::Bronze, "bronze_step", "Bronze layer saved with 3 records.")
            .await
            .unwrap();

        let pattern = Regex::new(
            r"^logs/bronze/\d{4}-\d{2}-\d{2}/bronze_step_SUCCESS_\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.txt$",
        )
        .unwrap();
        assert!(pattern.is_match(&key), "unexpected key: {key}");

        let body = store.get(&key).await.unwrap();
        assert_eq!(&body[..], b"Bronze layer saved with 3 records.");
    }

    #[tokio::test]
    async fn test_failure_entry_carries_task_and_message() {
        let (logger, store) = logger();
        let error = Error::validation("cleaned table is empty");

        let key = logger
            .failure(Layer::Silver, "silver_step", &error)
            .await
            .unwrap();

        let pattern = Regex::new(
            r"^logs/silver/\d{4}-\d{2}-\d{2}/silver_step_\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.txt$",
        )
        .unwrap();
        assert!(pattern.is_match(&key), "unexpected key: {key}");

        let body = String::from_utf8(store.get(&key).await.unwrap().to_vec()).unwrap();
        assert!(body.contains("Task: silver_step"));
        assert!(body.contains("Error: Validation failed: cleaned table is empty"));
        assert!(!body.contains("Caused by:"));
    }

    #[tokio::test]
    async fn test_failure_entry_includes_the_cause_chain() {
        let (logger, store) = logger();
        let parse_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let error = Error::from(parse_err);

        let key = logger
            .failure(Layer::Bronze, "bronze_step", &error)
            .await
            .unwrap();

        let body = String::from_utf8(store.get(&key).await.unwrap().to_vec()).unwrap();
        assert!(body.starts_with('['));
        assert!(body.contains("Caused by:"));
    }
}
