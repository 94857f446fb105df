//! Book identification supplied by the caller.

use serde::{Deserialize, Serialize};

/// The book being looked up.
///
/// `title` is the display title as extracted by the caller. A caller may also
/// supply a cleaned variant with series/edition annotations stripped; when
/// present the cleaned title is preferred for catalog search while the
/// original is kept for display and debugging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookQuery {
    /// Original display title
    pub title: String,

    /// Cleaned title variant, preferred for search when present
    pub clean_title: Option<String>,

    /// Author name
    pub author: String,
}

impl BookQuery {
    /// Create a new query from a display title and author.
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            clean_title: None,
            author: author.into(),
        }
    }

    /// Set the cleaned title variant.
    pub fn clean_title(mut self, clean: impl Into<String>) -> Self {
        self.clean_title = Some(clean.into());
        self
    }

    /// The title to use for catalog search.
    pub fn search_title(&self) -> &str {
        self.clean_title.as_deref().unwrap_or(&self.title)
    }

    /// Full-text query string sent to the catalog ("<title> <author>").
    pub fn search_text(&self) -> String {
        format!("{} {}", self.search_title(), self.author)
            .trim()
            .to_string()
    }

    /// Whether the query carries no usable title.
    pub fn is_empty(&self) -> bool {
        self.search_title().trim().is_empty()
    }
}
