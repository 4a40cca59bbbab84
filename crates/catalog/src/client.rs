//! Client for the Common Crawl collection index.

use serde::Deserialize;
use thiserror::Error;

/// Endpoint listing all published crawl collections.
pub const SHARD_CATALOG_URL: &str = "https://index.commoncrawl.org/collinfo.json";

/// One shard (crawl collection) known to the catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct ShardInfo {
    /// Shard identifier, e.g. `CC-MAIN-2023-06`.
    pub id: String,
    /// Human-readable name.
    pub name: String,
}

/// Errors from catalog lookups.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog endpoint could not be reached or returned an error status.
    #[error("Catalog request failed: {message}")]
    Request { message: String },

    /// The response body was not the expected JSON shape.
    #[error("Catalog response could not be decoded: {message}")]
    Decode { message: String },
}

/// HTTP client for the shard catalog.
///
/// Shards are fetched fresh per invocation; there is no local persistence.
pub struct CatalogClient {
    http: reqwest::Client,
    url: String,
}

impl CatalogClient {
    /// Create a client against the public catalog endpoint.
    pub fn new() -> Self {
        Self::with_url(SHARD_CATALOG_URL)
    }

    /// Create a client against a custom endpoint.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
        }
    }

    /// Fetch all shards known to the catalog.
    pub async fn list_shards(&self) -> Result<Vec<ShardInfo>, CatalogError> {
        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| CatalogError::Request {
                message: e.to_string(),
            })?;

        response
            .json::<Vec<ShardInfo>>()
            .await
            .map_err(|e| CatalogError::Decode {
                message: e.to_string(),
            })
    }
}

impl Default for CatalogClient {
    fn default() -> Self {
        Self::new()
    }
}
