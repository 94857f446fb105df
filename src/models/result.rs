//! Normalized availability results delivered to the UI.

use serde::{Deserialize, Serialize};

use super::{CatalogRecord, MediaType};

/// Availability of a single media type at a single library.
///
/// Exactly four values. A failed lookup is a library-level state
/// ([`LibraryStatus::Error`]), never a media-type state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    Available,
    Wait,
    Unknown,
    Unavailable,
}

impl Availability {
    /// Overall-status precedence, best first.
    pub const PRECEDENCE: [Availability; 4] = [
        Availability::Available,
        Availability::Wait,
        Availability::Unknown,
        Availability::Unavailable,
    ];
}

/// Overall verdict for one library, including the error state for lookups
/// that could not complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LibraryStatus {
    Available,
    Wait,
    Unknown,
    Unavailable,
    Error,
}

impl LibraryStatus {
    /// Sort rank for display: available first, errors last.
    pub fn precedence(&self) -> u8 {
        match self {
            LibraryStatus::Available => 1,
            LibraryStatus::Wait => 2,
            LibraryStatus::Unknown => 3,
            LibraryStatus::Unavailable => 4,
            LibraryStatus::Error => 5,
        }
    }
}

impl From<Availability> for LibraryStatus {
    fn from(availability: Availability) -> Self {
        match availability {
            Availability::Available => LibraryStatus::Available,
            Availability::Wait => LibraryStatus::Wait,
            Availability::Unknown => LibraryStatus::Unknown,
            Availability::Unavailable => LibraryStatus::Unavailable,
        }
    }
}

bitflags::bitflags! {
    /// Which media types the user wants results for.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MediaTypeFilter: u32 {
        const EBOOKS = 1 << 0;
        const AUDIOBOOKS = 1 << 1;
    }
}

impl MediaTypeFilter {
    /// Whether results for `media_type` should be shown.
    ///
    /// Media types outside the known preference set are never shown.
    pub fn allows(&self, media_type: &MediaType) -> bool {
        match media_type {
            MediaType::Ebook => self.contains(MediaTypeFilter::EBOOKS),
            MediaType::Audiobook => self.contains(MediaTypeFilter::AUDIOBOOKS),
            MediaType::Other(_) => false,
        }
    }
}

impl Default for MediaTypeFilter {
    /// Both media types enabled, matching the unset-preference default.
    fn default() -> Self {
        MediaTypeFilter::all()
    }
}

/// Availability of one media type at one library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaTypeResult {
    pub media_type: MediaType,
    pub display_name: String,
    pub icon: String,
    pub status: Availability,
    pub status_text: String,
    /// Hold-queue explanation ("2 copies, 5 holds"), wait status only
    pub wait_detail: Option<String>,
    /// Deep link into the catalog for this edition
    pub url: Option<String>,
    /// The catalog record this result was derived from
    pub record: CatalogRecord,
}

/// The unit returned to the UI: one entry per requested library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryResult {
    pub library_id: String,
    pub library_name: String,
    pub status: LibraryStatus,
    pub status_text: String,
    pub media_types: Vec<MediaTypeResult>,
    pub error_message: Option<String>,
}

impl LibraryResult {
    /// A failed lookup for one library. Carries no media-type rows.
    pub fn error(
        library_id: impl Into<String>,
        library_name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let message = message.into();
        Self {
            library_id: library_id.into(),
            library_name: library_name.into(),
            status: LibraryStatus::Error,
            status_text: message.clone(),
            media_types: Vec::new(),
            error_message: Some(message),
        }
    }
}

/// Ordered per-library results, one entry per requested library, in request
/// order unless explicitly re-sorted for display.
pub type ResultSet = Vec<LibraryResult>;
