//! Catalog record model: the raw shape returned by the lending catalog.

use serde::{Deserialize, Serialize};

/// The format dimension of a catalog record.
///
/// A library may hold one format of a title but not another, so formats are
/// tracked independently through the whole pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Ebook,
    Audiobook,
    #[serde(untagged)]
    Other(String),
}

impl MediaType {
    /// Media types shown to users, in display order.
    pub const DISPLAYED: [MediaType; 2] = [MediaType::Ebook, MediaType::Audiobook];

    /// Returns the display name of the media type
    pub fn display_name(&self) -> &str {
        match self {
            MediaType::Ebook => "eBook",
            MediaType::Audiobook => "Audiobook",
            MediaType::Other(s) => s,
        }
    }

    /// Returns the catalog identifier (as it appears on the wire)
    pub fn id(&self) -> &str {
        match self {
            MediaType::Ebook => "ebook",
            MediaType::Audiobook => "audiobook",
            MediaType::Other(s) => s,
        }
    }

    /// Icon shown next to the media type
    pub fn icon(&self) -> &str {
        match self {
            MediaType::Ebook => "\u{1F4D6}",     // 📖
            MediaType::Audiobook => "\u{1F3A7}", // 🎧
            MediaType::Other(_) => "\u{1F4C4}",  // 📄
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One item returned by the catalog search API, representing one
/// edition/format of a book.
///
/// The catalog populates fields inconsistently, so every field is optional:
/// an absent count is not the same thing as zero and the classifier must be
/// able to tell them apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogRecord {
    /// Catalog-assigned identifier for this edition
    #[serde(default)]
    pub record_id: Option<String>,

    /// Title as the catalog knows it
    #[serde(default)]
    pub title: Option<String>,

    /// Primary creator (author or narrator) name
    #[serde(default)]
    pub creator_name: Option<String>,

    /// Format of this record
    #[serde(default)]
    pub media_type_id: Option<MediaType>,

    /// Catalog's own "borrowable right now" flag
    #[serde(default)]
    pub is_available: Option<bool>,

    /// Copies currently free to borrow
    #[serde(default)]
    pub available_copies: Option<u32>,

    /// Copies the library owns in total
    #[serde(default)]
    pub owned_copies: Option<u32>,

    /// Patrons in the hold queue
    #[serde(default)]
    pub holds_count: Option<u32>,

    /// Catalog's own wait estimate, in days
    #[serde(default)]
    pub estimated_wait_days: Option<u32>,
}

impl CatalogRecord {
    /// Create an empty record with only a title and creator.
    pub fn new(title: impl Into<String>, creator: impl Into<String>) -> Self {
        Self {
            record_id: None,
            title: Some(title.into()),
            creator_name: Some(creator.into()),
            media_type_id: None,
            is_available: None,
            available_copies: None,
            owned_copies: None,
            holds_count: None,
            estimated_wait_days: None,
        }
    }

    /// Whether the record carries the fields needed to be matched against a
    /// query. The catalog occasionally returns incomplete stubs without them.
    pub fn has_core_fields(&self) -> bool {
        self.title.as_deref().is_some_and(|t| !t.is_empty())
            && self.creator_name.as_deref().is_some_and(|c| !c.is_empty())
    }

    /// Title, or the empty string when absent.
    pub fn title_str(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    /// Creator name, or the empty string when absent.
    pub fn creator_str(&self) -> &str {
        self.creator_name.as_deref().unwrap_or("")
    }
}

/// Builder for constructing [`CatalogRecord`] values, mainly in tests and
/// fixtures.
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    record: CatalogRecord,
}

impl RecordBuilder {
    /// Create a new builder with the matchable fields set
    pub fn new(title: impl Into<String>, creator: impl Into<String>) -> Self {
        Self {
            record: CatalogRecord::new(title, creator),
        }
    }

    /// Set the record id
    pub fn record_id(mut self, id: impl Into<String>) -> Self {
        self.record.record_id = Some(id.into());
        self
    }

    /// Set the media type
    pub fn media_type(mut self, media_type: MediaType) -> Self {
        self.record.media_type_id = Some(media_type);
        self
    }

    /// Set the catalog availability flag
    pub fn is_available(mut self, available: bool) -> Self {
        self.record.is_available = Some(available);
        self
    }

    /// Set the free-copy count
    pub fn available_copies(mut self, copies: u32) -> Self {
        self.record.available_copies = Some(copies);
        self
    }

    /// Set the owned-copy count
    pub fn owned_copies(mut self, copies: u32) -> Self {
        self.record.owned_copies = Some(copies);
        self
    }

    /// Set the hold-queue length
    pub fn holds_count(mut self, holds: u32) -> Self {
        self.record.holds_count = Some(holds);
        self
    }

    /// Set the catalog's wait estimate in days
    pub fn estimated_wait_days(mut self, days: u32) -> Self {
        self.record.estimated_wait_days = Some(days);
        self
    }

    /// Build the record
    pub fn build(self) -> CatalogRecord {
        self.record
    }
}

/// A catalog record plus its match confidence against the requested book.
///
/// Derived and ephemeral: recomputed on every resolution against live catalog
/// data, never persisted.
#[derive(Debug, Clone)]
pub struct ScoredRecord {
    pub record: CatalogRecord,
    /// Match confidence in [0, 100], higher is better
    pub relevance: f32,
}
