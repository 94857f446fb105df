//! Catalog clients behind a trait-based seam.
//!
//! The [`Catalog`] trait is the boundary between the resolution engine and
//! the external lending catalog. The production implementation is
//! [`ThunderCatalog`]; tests swap in [`MockCatalog`].

mod thunder;

pub mod mock;

pub use mock::MockCatalog;
pub use thunder::ThunderCatalog;

use async_trait::async_trait;

use crate::directory::Library;
use crate::models::{BookQuery, CatalogRecord};

/// Interface to one lending-catalog search backend.
#[async_trait]
pub trait Catalog: Send + Sync + std::fmt::Debug {
    /// Search one library's catalog for records matching the query.
    ///
    /// Returns the candidate records the catalog offered, possibly empty.
    /// A reachable catalog that has nothing is an empty `Ok`; only transport
    /// or decode failures produce an `Err`. The caller converts errors into a
    /// per-library error result, so "could not reach the library" and
    /// "library has no copy" stay distinguishable in the UI.
    async fn search(
        &self,
        query: &BookQuery,
        library: &Library,
    ) -> Result<Vec<CatalogRecord>, CatalogError>;
}

/// Errors that can occur when talking to a catalog backend.
///
/// All variants are recoverable at the per-library boundary; none abort the
/// overall resolution.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Transport failure: timeout, DNS failure, connection refused
    #[error("Network error: {0}")]
    Network(String),

    /// The catalog answered with a body that could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            CatalogError::Parse(err.to_string())
        } else {
            CatalogError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Parse(format!("JSON: {}", err))
    }
}
