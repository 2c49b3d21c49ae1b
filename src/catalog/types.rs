//! Core catalog data types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of a catalog entry
///
/// Identities are assigned from a monotonic counter and are never reused,
/// so a handed-out id keeps pointing at the same entry (or at nothing, once
/// that entry is deleted) no matter how the catalog is mutated afterwards.
/// They carry no relation to an entry's position in any listing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct EntryId(pub u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A film in the catalog
///
/// Names are not required to be unique; all name-based operations on the
/// catalog tolerate duplicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Store-assigned identity
    pub id: EntryId,
    /// Film title (non-empty)
    pub name: String,
    /// Free-text description
    pub description: String,
    /// Rating on a 0-10 scale, if one has been given
    #[serde(default)]
    pub rating: Option<f64>,
    /// Genre label
    pub genre: String,
    /// Credited actors, in billing order (may be empty)
    #[serde(default)]
    pub actors: Vec<String>,
    /// Link to the film poster
    pub poster: String,
}

/// A film without an identity, as accumulated by the create dialogue or
/// read from a seed file. `Catalog::add` turns a draft into an [`Entry`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntryDraft {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub rating: Option<f64>,
    pub genre: String,
    #[serde(default)]
    pub actors: Vec<String>,
    pub poster: String,
}

/// Field a catalog filter runs against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    /// Match against the film title
    Title,
    /// Match against the genre label
    Genre,
    /// Match against any credited actor
    Actors,
}

impl FilterField {
    /// Parse a filter field from its wire name
    ///
    /// Recognizes the names the filter menu emits (`title`, `genre`,
    /// `actors`) plus `name` as an alias for `title`. Anything else is
    /// `None`; callers treat that as "no matches", not an error.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "title" | "name" => Some(Self::Title),
            "genre" => Some(Self::Genre),
            "actors" => Some(Self::Actors),
            _ => None,
        }
    }

    /// Wire name of this field, as embedded in selection tokens
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Genre => "genre",
            Self::Actors => "actors",
        }
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
