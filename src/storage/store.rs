//! Object store gateway for the data lake bucket

use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use futures::TryStreamExt;
use object_store::aws::AmazonS3Builder;
use object_store::local::LocalFileSystem;
use object_store::memory::InMemory;
use object_store::path::Path as ObjectPath;
use object_store::ObjectStore;

use crate::config::StoreConfig;
use crate::error::{Error, Result};

/// Handle to the bucket holding every layer and the run logs.
///
/// Cloning is cheap; all clones share the same underlying client, so the
/// pipeline driver can hand one to each stage.
#[derive(Debug, Clone)]
pub struct LakeStore {
    store: Arc<dyn ObjectStore>,
    /// URI root used when reporting written locations.
    base: String,
}

impl LakeStore {
    /// Connects to the configured S3 bucket.
    pub fn from_config(config: &StoreConfig) -> Result<Self> {
        let mut builder = AmazonS3Builder::new()
            .with_bucket_name(&config.bucket)
            .with_region(&config.region)
            .with_access_key_id(&config.access_key_id)
            .with_secret_access_key(&config.secret_access_key);

        if let Some(endpoint) = &config.endpoint {
            // Local S3-compatible stores usually speak plain HTTP.
            builder = builder
                .with_endpoint(endpoint)
                .with_allow_http(endpoint.starts_with("http://"));
        }

        let store = builder
            .build()
            .map_err(|e| Error::config(format!("failed to create S3 client: {e}")))?;

        Ok(Self {
            store: Arc::new(store),
            base: format!("s3://{}", config.bucket),
        })
    }

    /// In-memory store, used as the injected fake in tests.
    pub fn in_memory() -> Self {
        Self {
            store: Arc::new(InMemory::new()),
            base: "memory://lake".to_string(),
        }
    }

    /// Local filesystem store rooted at `root`, for development runs.
    pub fn local(root: &Path) -> Result<Self> {
        std::fs::create_dir_all(root)?;
        let store = LocalFileSystem::new_with_prefix(root)?;

        Ok(Self {
            store: Arc::new(store),
            base: format!("file://{}", root.display()),
        })
    }

    /// Writes `data` under `key`, returning the full URI of the object.
    pub async fn put(&self, key: &str, data: Bytes) -> Result<String> {
        let path = ObjectPath::from(key);
        self.store.put(&path, data.into()).await?;
        Ok(self.uri(key))
    }

    /// Reads the object at `key`.
    pub async fn get(&self, key: &str) -> Result<Bytes> {
        let path = ObjectPath::from(key);
        let result = self.store.get(&path).await?;
        Ok(result.bytes().await?)
    }

    /// Lists object keys under `prefix`, sorted.
    pub async fn list(&self, prefix: &str) -> Result<Vec<String>> {
        let path = ObjectPath::from(prefix);
        let mut keys: Vec<String> = self
            .store
            .list(Some(&path))
            .map_ok(|meta| meta.location.to_string())
            .try_collect()
            .await?;
        keys.sort();
        Ok(keys)
    }

    /// Full URI for `key`, for log and report output.
    pub fn uri(&self, key: &str) -> String {
        format!("{}/{key}", self.base)
    }
}
