//! # Shelfcheck
//!
//! Checks whether a book is available to borrow through the digital-lending
//! catalogs of a user-selected set of public libraries, and produces one
//! normalized availability verdict per library (and per media type).
//!
//! ## Architecture
//!
//! - [`models`]: Core data structures (BookQuery, CatalogRecord, LibraryResult, etc.)
//! - [`catalog`]: Catalog clients behind the [`Catalog`] trait (Thunder/OverDrive, mock)
//! - [`directory`]: The static library directory (id/name records)
//! - [`engine`]: The availability resolution engine: relevance scoring,
//!   availability classification, media-type aggregation, fan-out, display sorting
//! - [`config`]: Configuration management for the CLI host

pub mod catalog;
pub mod config;
pub mod directory;
pub mod engine;
pub mod models;

// Re-export commonly used types
pub use catalog::{Catalog, CatalogError};
pub use directory::{Library, LibraryDirectory};
pub use engine::{AvailabilityEngine, ResolveError};
pub use models::{BookQuery, CatalogRecord, LibraryResult, MediaType, MediaTypeFilter};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
