//! Static library directory.
//!
//! The directory maps library identifiers to display names. It is loaded once
//! by the hosting process and passed into the engine by reference; the engine
//! never mutates it.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// One catalog endpoint the user can select.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Library {
    /// Catalog identifier, as used in the search endpoint path
    pub id: String,
    /// Human-readable library name
    pub name: String,
}

impl Library {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Ordered, read-only set of known libraries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibraryDirectory {
    libraries: Vec<Library>,
}

impl LibraryDirectory {
    /// Create a directory from an ordered list of libraries.
    pub fn new(libraries: Vec<Library>) -> Self {
        Self { libraries }
    }

    /// Parse a directory from its JSON representation: an array of
    /// `{"id": ..., "name": ...}` records.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    /// Load a directory from a JSON file on disk.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&json)?)
    }

    /// The directory bundled with the binary, used when no file is supplied.
    pub fn bundled() -> Self {
        Self::from_json(include_str!("../data/libraries.json"))
            .expect("bundled libraries.json is valid")
    }

    /// Look up a library by id.
    pub fn get(&self, id: &str) -> Option<&Library> {
        self.libraries.iter().find(|library| library.id == id)
    }

    /// Check if a library id exists.
    pub fn has(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// All libraries, in directory order.
    pub fn iter(&self) -> impl Iterator<Item = &Library> {
        self.libraries.iter()
    }

    /// All library ids, in directory order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.libraries.iter().map(|library| library.id.as_str())
    }

    /// Number of known libraries.
    pub fn len(&self) -> usize {
        self.libraries.len()
    }

    /// Check if the directory holds no libraries.
    pub fn is_empty(&self) -> bool {
        self.libraries.is_empty()
    }
}
