//! Mock catalog for testing purposes.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::catalog::{Catalog, CatalogError};
use crate::directory::Library;
use crate::models::{BookQuery, CatalogRecord};

/// A mock catalog that returns predefined per-library responses.
///
/// Libraries without a configured response return an empty record set, the
/// same as a reachable catalog with no matches.
#[derive(Debug, Default)]
pub struct MockCatalog {
    responses: Mutex<HashMap<String, Result<Vec<CatalogRecord>, String>>>,
}

impl MockCatalog {
    /// Create a new mock catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the records returned for one library.
    pub fn set_records(&self, library_id: &str, records: Vec<CatalogRecord>) {
        let mut guard = self.responses.lock().unwrap();
        guard.insert(library_id.to_string(), Ok(records));
    }

    /// Make lookups against one library fail with a network error.
    pub fn set_network_error(&self, library_id: &str, message: &str) {
        let mut guard = self.responses.lock().unwrap();
        guard.insert(library_id.to_string(), Err(message.to_string()));
    }

    /// Clear all configured responses.
    pub fn clear(&self) {
        let mut guard = self.responses.lock().unwrap();
        guard.clear();
    }
}

#[async_trait]
impl Catalog for MockCatalog {
    async fn search(
        &self,
        _query: &BookQuery,
        library: &Library,
    ) -> Result<Vec<CatalogRecord>, CatalogError> {
        let guard = self.responses.lock().unwrap();
        match guard.get(&library.id) {
            Some(Ok(records)) => Ok(records.clone()),
            Some(Err(message)) => Err(CatalogError::Network(message.clone())),
            None => Ok(Vec::new()),
        }
    }
}
