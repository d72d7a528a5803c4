//! HTTP client for the brewery directory API

use reqwest::Client;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::config::ApiConfig;
use crate::error::{Error, Result};

/// Paginated reader for the `/breweries` listing.
///
/// The API serves fixed-size pages addressed by number; an empty page
/// marks the end of the collection. There is no retry or rate limiting
/// here, retries belong to the scheduler running the pipeline.
#[derive(Debug, Clone)]
pub struct SourceClient {
    client: Client,
    base_url: Url,
    page_size: u32,
}

impl SourceClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(Self {
            client,
            base_url: Url::parse(&config.base_url)?,
            page_size: config.page_size,
        })
    }

    /// Fetches every page, in order, until the API returns an empty one.
    ///
    /// Any non-success status aborts the whole fetch with
    /// [`Error::Fetch`]; no partial result is returned.
    pub async fn fetch_all(&self) -> Result<Vec<Value>> {
        let mut all_records = Vec::new();
        let mut page: u32 = 1;

        loop {
            let records = self.fetch_page(page, self.page_size).await?;
            if records.is_empty() {
                break;
            }
            debug!(page, records = records.len(), "fetched page");
            all_records.extend(records);
            page += 1;
        }

        Ok(all_records)
    }

    /// Requests a single record from page 1 and returns how many came
    /// back. Used by the connectivity check.
    pub async fn probe(&self) -> Result<usize> {
        let records = self.fetch_page(1, 1).await?;
        Ok(records.len())
    }

    async fn fetch_page(&self, page: u32, per_page: u32) -> Result<Vec<Value>> {
        let mut url = self.base_url.join("breweries")?;
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("per_page", &per_page.to_string());

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::fetch(page, status.as_u16()));
        }

        Ok(response.json().await?)
    }
}
