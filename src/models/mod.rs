//! Core data structures shared across the engine and its collaborators.

mod query;
mod record;
mod result;

pub use query::BookQuery;
pub use record::{CatalogRecord, MediaType, RecordBuilder, ScoredRecord};
pub use result::{
    Availability, LibraryResult, LibraryStatus, MediaTypeFilter, MediaTypeResult, ResultSet,
};
