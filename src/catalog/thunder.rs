//! OverDrive Thunder catalog client.
//!
//! One HTTP GET per library against the Thunder media search endpoint,
//! parameterized by library id and a URL-encoded full-text query.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::catalog::{Catalog, CatalogError};
use crate::directory::Library;
use crate::models::{BookQuery, CatalogRecord};

const THUNDER_API_BASE: &str = "https://thunder.api.overdrive.com/v2";

/// Candidate records requested per library.
const RESULT_LIMIT: usize = 10;

/// Catalog client for the OverDrive Thunder API.
#[derive(Debug, Clone)]
pub struct ThunderCatalog {
    client: Arc<Client>,
    base_url: String,
}

impl ThunderCatalog {
    /// Create a client against the production endpoint.
    pub fn new() -> Self {
        Self::with_base_url(THUNDER_API_BASE)
    }

    /// Create a client against a custom endpoint (tests, proxies).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client: Arc::new(client),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn search_url(&self, library: &Library, query: &BookQuery) -> String {
        format!(
            "{}/libraries/{}/media?query={}&limit={}",
            self.base_url,
            urlencoding::encode(&library.id),
            urlencoding::encode(&query.search_text()),
            RESULT_LIMIT
        )
    }
}

impl Default for ThunderCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Catalog for ThunderCatalog {
    async fn search(
        &self,
        query: &BookQuery,
        library: &Library,
    ) -> Result<Vec<CatalogRecord>, CatalogError> {
        let url = self.search_url(library, query);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json, text/plain, */*")
            .send()
            .await
            .map_err(|e| {
                CatalogError::Network(format!("request to library '{}' failed: {}", library.id, e))
            })?;

        // A non-success answer means the catalog had nothing for us, which is
        // not the same as being unreachable.
        if !response.status().is_success() {
            debug!(
                library = %library.id,
                status = %response.status(),
                "catalog returned non-success, treating as no results"
            );
            return Ok(Vec::new());
        }

        let data: MediaResponse = response
            .json()
            .await
            .map_err(|e| CatalogError::Parse(format!("Failed to parse JSON: {}", e)))?;

        let records: Vec<CatalogRecord> = data
            .items
            .into_iter()
            .filter(CatalogRecord::has_core_fields)
            .collect();

        debug!(
            library = %library.id,
            candidates = records.len(),
            "catalog search complete"
        );

        Ok(records)
    }
}

// ===== Thunder API types =====

#[derive(Debug, Deserialize)]
struct MediaResponse {
    #[serde(default)]
    items: Vec<CatalogRecord>,
}
