//! HTTP catalog backed by the mhw-db REST API.

use std::time::Duration;

use async_trait::async_trait;
use farmhand_core::{CatalogKind, CatalogRecord, FarmhandError, ItemId, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::payload::{parse_record, parse_records};
use crate::store::Catalog;

/// Configuration for the HTTP catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Base URL of the API, without a trailing slash.
    pub base_url: String,

    /// Per-request timeout in milliseconds.
    pub request_timeout_ms: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: "https://mhw-db.com".to_string(),
            request_timeout_ms: 10_000,
        }
    }
}

/// Client for the mhw-db item catalog.
#[derive(Clone)]
pub struct MhwDbCatalog {
    /// Base URL of the API.
    base_url: String,

    /// HTTP client.
    http_client: reqwest::Client,
}

impl MhwDbCatalog {
    /// Create a client from configuration.
    pub fn new(config: &CatalogConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| FarmhandError::Internal(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    /// Collection URL for a kind, e.g. `https://mhw-db.com/weapons`.
    pub fn collection_url(&self, kind: CatalogKind) -> String {
        let path = match kind {
            CatalogKind::Weapon => "weapons",
            CatalogKind::Armor => "armor",
            CatalogKind::Charm => "charms",
        };
        format!("{}/{}", self.base_url, path)
    }

    async fn get_json(&self, kind: CatalogKind, request: reqwest::RequestBuilder) -> Result<(u16, Value)> {
        let lookup_failed = |e: reqwest::Error| FarmhandError::LookupFailed {
            kind,
            message: e.to_string(),
        };

        let response = request.send().await.map_err(lookup_failed)?;
        let status = response.status().as_u16();

        if status == 404 {
            return Ok((status, Value::Null));
        }

        let response = response.error_for_status().map_err(lookup_failed)?;
        let body = response.json::<Value>().await.map_err(lookup_failed)?;

        Ok((status, body))
    }
}

/// Search filter matching names that start with the prefix.
pub fn name_prefix_query(name_prefix: &str) -> String {
    serde_json::json!({ "name": { "$like": format!("{}%", name_prefix) } }).to_string()
}

#[async_trait]
impl Catalog for MhwDbCatalog {
    async fn fetch_item(&self, kind: CatalogKind, id: ItemId) -> Result<CatalogRecord> {
        let url = format!("{}/{}", self.collection_url(kind), id);
        debug!("Fetching {} {} from {}", kind, id, url);

        let (status, body) = self.get_json(kind, self.http_client.get(&url)).await?;
        if status == 404 {
            return Err(FarmhandError::NotFound { kind, id });
        }

        parse_record(kind, body)
    }

    fn source(&self) -> String {
        self.base_url.clone()
    }

    async fn search_items(&self, kind: CatalogKind, name_prefix: &str) -> Result<Vec<CatalogRecord>> {
        let url = self.collection_url(kind);
        debug!("Searching {} for '{}'", kind, name_prefix);

        let request = self
            .http_client
            .get(&url)
            .query(&[("q", name_prefix_query(name_prefix))]);

        let (status, body) = self.get_json(kind, request).await?;
        if status == 404 {
            return Ok(Vec::new());
        }

        parse_records(kind, body)
    }
}
