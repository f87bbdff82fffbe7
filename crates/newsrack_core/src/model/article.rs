//! Article record model.
//!
//! # Responsibility
//! - Define the persisted article record and the insert/display shapes
//!   derived from it.
//!
//! # Invariants
//! - `id` uniquely identifies a record and is monotonically assigned by
//!   the store; ids are never reused after deletion.
//! - All metadata fields are optional. Remote articles routinely omit
//!   headline, abstract, byline or media, and the record must still be
//!   storable.

use serde::{Deserialize, Serialize};

/// Store-assigned surrogate key for a persisted article.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type ArticleId = i64;

/// One persisted article entry, the unit held by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    /// Surrogate key assigned on insert, unique for the store's lifetime.
    pub id: ArticleId,
    /// Main headline text.
    pub headline: Option<String>,
    /// Abstract/summary text.
    pub summary: Option<String>,
    /// Original byline, e.g. "By Jane Doe".
    pub byline: Option<String>,
    /// Absolute URL of the lead media image.
    pub image_url: Option<String>,
}

impl ArticleRecord {
    /// Projects this record into its display shape (identity mapping of
    /// the present fields, `id` dropped).
    pub fn to_display(&self) -> DisplayArticle {
        DisplayArticle {
            headline: self.headline.clone(),
            summary: self.summary.clone(),
            byline: self.byline.clone(),
            image_url: self.image_url.clone(),
        }
    }
}

/// Insert shape for a record that has not been assigned an id yet.
///
/// Only the sync path constructs these; the store assigns the id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewArticle {
    pub headline: Option<String>,
    pub summary: Option<String>,
    pub byline: Option<String>,
    pub image_url: Option<String>,
}

/// Display-ready projection consumed by UI layers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayArticle {
    pub headline: Option<String>,
    pub summary: Option<String>,
    pub byline: Option<String>,
    pub image_url: Option<String>,
}
