//! Availability resolution: concurrent per-library lookups, scoring,
//! classification and aggregation.

pub mod aggregate;
pub mod classify;
pub mod present;
pub mod relevance;

use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use thiserror::Error;
use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::directory::{Library, LibraryDirectory};
use crate::models::{BookQuery, LibraryResult, LibraryStatus, MediaTypeFilter, ResultSet};

pub use aggregate::{aggregate, Aggregated};
pub use classify::{classify, Classification};
pub use present::sort_for_display;

/// Default delay between successive library lookups within one resolution.
pub const DEFAULT_STAGGER: Duration = Duration::from_millis(100);

/// Errors that reject a resolution before any lookup is attempted.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("book title is empty")]
    EmptyQuery,

    #[error("library directory is empty")]
    DirectoryUnavailable,
}

/// Resolves the availability of one book across a set of libraries.
///
/// One resolution fans out one catalog lookup per requested library,
/// staggered by a fixed delay per position to avoid bursting the catalog.
/// Per-library failures become error results; they never fail the
/// resolution as a whole.
#[derive(Debug, Clone)]
pub struct AvailabilityEngine {
    catalog: Arc<dyn Catalog>,
    directory: Arc<LibraryDirectory>,
    stagger: Duration,
}

impl AvailabilityEngine {
    pub fn new(catalog: Arc<dyn Catalog>, directory: Arc<LibraryDirectory>) -> Self {
        Self {
            catalog,
            directory,
            stagger: DEFAULT_STAGGER,
        }
    }

    /// Override the per-position lookup delay.
    pub fn with_stagger(mut self, stagger: Duration) -> Self {
        self.stagger = stagger;
        self
    }

    /// Resolve availability of `query` at each of `library_ids`.
    ///
    /// Returns one result per requested id, in request order. An empty id
    /// list resolves to an empty result set without touching the catalog.
    pub async fn resolve(
        &self,
        query: &BookQuery,
        library_ids: &[String],
        filter: MediaTypeFilter,
    ) -> Result<ResultSet, ResolveError> {
        if query.is_empty() {
            return Err(ResolveError::EmptyQuery);
        }
        if library_ids.is_empty() {
            return Ok(Vec::new());
        }
        if self.directory.is_empty() {
            return Err(ResolveError::DirectoryUnavailable);
        }

        debug!(
            title = %query.search_title(),
            libraries = library_ids.len(),
            "resolving availability"
        );

        let lookups = library_ids.iter().enumerate().map(|(position, id)| {
            let delay = self.stagger * position as u32;
            async move {
                tokio::time::sleep(delay).await;
                self.check_library(query, id, filter).await
            }
        });

        // join_all preserves input order, so results line up with the
        // requested ids regardless of completion order.
        Ok(join_all(lookups).await)
    }

    async fn check_library(
        &self,
        query: &BookQuery,
        library_id: &str,
        filter: MediaTypeFilter,
    ) -> LibraryResult {
        let Some(library) = self.directory.get(library_id) else {
            return LibraryResult::error(library_id, library_id, "Library not found");
        };

        match self.catalog.search(query, library).await {
            Ok(records) if records.is_empty() => not_found(library),
            Ok(records) => {
                let scored = relevance::rank(records, query);
                let agg = aggregate::aggregate(&scored, filter, library);
                LibraryResult {
                    library_id: library.id.clone(),
                    library_name: library.name.clone(),
                    status: agg.overall_status.into(),
                    status_text: agg.overall_text,
                    media_types: agg.media_types,
                    error_message: None,
                }
            }
            Err(e) => {
                warn!(library = %library.id, error = %e, "catalog lookup failed");
                LibraryResult::error(&library.id, &library.name, e.to_string())
            }
        }
    }
}

/// The catalog answered but had no candidates at all.
fn not_found(library: &Library) -> LibraryResult {
    LibraryResult {
        library_id: library.id.clone(),
        library_name: library.name.clone(),
        status: LibraryStatus::Unavailable,
        status_text: "Not found".to_string(),
        media_types: Vec::new(),
        error_message: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::mock::MockCatalog;
    use crate::models::{MediaType, RecordBuilder};

    fn directory() -> Arc<LibraryDirectory> {
        Arc::new(LibraryDirectory::new(vec![
            Library::new("bpl", "Brooklyn Public Library"),
            Library::new("lapl", "Los Angeles Public Library"),
        ]))
    }

    fn engine(catalog: MockCatalog) -> AvailabilityEngine {
        AvailabilityEngine::new(Arc::new(catalog), directory())
            .with_stagger(Duration::ZERO)
    }

    #[tokio::test]
    async fn test_empty_query_is_rejected() {
        let engine = engine(MockCatalog::new());
        let err = engine
            .resolve(
                &BookQuery::new("", "Frank Herbert"),
                &["bpl".to_string()],
                MediaTypeFilter::default(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::EmptyQuery));
    }

    #[tokio::test]
    async fn test_empty_library_list_is_empty_result_set() {
        let engine = engine(MockCatalog::new());
        let results = engine
            .resolve(
                &BookQuery::new("Dune", "Frank Herbert"),
                &[],
                MediaTypeFilter::default(),
            )
            .await
            .unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_empty_directory_is_rejected() {
        let engine = AvailabilityEngine::new(
            Arc::new(MockCatalog::new()),
            Arc::new(LibraryDirectory::default()),
        );
        let err = engine
            .resolve(
                &BookQuery::new("Dune", "Frank Herbert"),
                &["bpl".to_string()],
                MediaTypeFilter::default(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::DirectoryUnavailable));
    }

    #[tokio::test]
    async fn test_no_candidates_is_not_found() {
        let catalog = MockCatalog::new();
        catalog.set_records("bpl", Vec::new());
        let engine = engine(catalog);

        let results = engine
            .resolve(
                &BookQuery::new("Dune", "Frank Herbert"),
                &["bpl".to_string()],
                MediaTypeFilter::default(),
            )
            .await
            .unwrap();

        assert_eq!(results[0].status, LibraryStatus::Unavailable);
        assert_eq!(results[0].status_text, "Not found");
        assert_eq!(results[0].error_message, None);
    }

    #[tokio::test]
    async fn test_unknown_library_id_is_error_result() {
        let engine = engine(MockCatalog::new());
        let results = engine
            .resolve(
                &BookQuery::new("Dune", "Frank Herbert"),
                &["xyz".to_string()],
                MediaTypeFilter::default(),
            )
            .await
            .unwrap();

        assert_eq!(results[0].status, LibraryStatus::Error);
        assert_eq!(results[0].error_message.as_deref(), Some("Library not found"));
    }

    #[tokio::test]
    async fn test_successful_lookup_carries_library_name() {
        let catalog = MockCatalog::new();
        catalog.set_records(
            "bpl",
            vec![RecordBuilder::new("Dune", "Frank Herbert")
                .media_type(MediaType::Ebook)
                .is_available(true)
                .build()],
        );
        let engine = engine(catalog);

        let results = engine
            .resolve(
                &BookQuery::new("Dune", "Frank Herbert"),
                &["bpl".to_string()],
                MediaTypeFilter::default(),
            )
            .await
            .unwrap();

        assert_eq!(results[0].library_name, "Brooklyn Public Library");
        assert_eq!(results[0].status, LibraryStatus::Available);
        assert_eq!(results[0].status_text, "eBook available now");
    }
}
