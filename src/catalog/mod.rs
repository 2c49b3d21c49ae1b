//! Shared film catalog store
//!
//! The catalog owns the collection of entries every dialogue reads and
//! mutates. It hands out stable, never-reused identities and guards all
//! access with a read/write lock: mutations exclude each other and all
//! readers, readers run concurrently, and no caller ever observes a
//! partially applied mutation.
//!
//! All query results are snapshots. A snapshot going stale (say, another
//! user deletes an entry after it was listed) is an expected condition the
//! dialogue layer reports as "not found", never a store error.

use crate::error::{FilmdeskError, Result};
use anyhow::Context;
use std::path::Path;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

pub mod types;
pub use types::{Entry, EntryDraft, EntryId, FilterField};

struct CatalogInner {
    entries: Vec<Entry>,
    next_id: u64,
}

/// In-memory catalog of films shared by all user sessions
pub struct Catalog {
    inner: RwLock<CatalogInner>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(CatalogInner {
                entries: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Create a catalog pre-populated with the given drafts, in order
    pub fn with_entries(drafts: Vec<EntryDraft>) -> Self {
        let catalog = Self::new();
        for draft in drafts {
            catalog.add(draft);
        }
        catalog
    }

    /// Load a catalog from a YAML seed file (a sequence of drafts)
    pub fn from_seed_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read seed file {}", path.display()))?;
        let drafts: Vec<EntryDraft> = serde_yaml::from_str(&contents)
            .map_err(|e| FilmdeskError::Catalog(format!("Failed to parse seed file: {}", e)))?;
        tracing::info!("Loaded {} seed entries from {}", drafts.len(), path.display());
        Ok(Self::with_entries(drafts))
    }

    // Mutations keep the inner state consistent at every panic point, so a
    // poisoned lock is still usable.
    fn read(&self) -> RwLockReadGuard<'_, CatalogInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CatalogInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of every entry, in insertion order
    pub fn list_all(&self) -> Vec<Entry> {
        self.read().entries.clone()
    }

    /// Snapshot of the entries matching `query` on `field`
    ///
    /// Matching is a case-insensitive substring test against the title, the
    /// genre, or any credited actor, depending on `field`. An unsupported
    /// field name yields no matches rather than an error.
    pub fn list_filtered(&self, field: &str, query: &str) -> Vec<Entry> {
        let Some(field) = FilterField::parse(field) else {
            tracing::debug!("Unsupported filter field: {}", field);
            return Vec::new();
        };
        let needle = query.to_lowercase();
        self.read()
            .entries
            .iter()
            .filter(|entry| match field {
                FilterField::Title => entry.name.to_lowercase().contains(&needle),
                FilterField::Genre => entry.genre.to_lowercase().contains(&needle),
                FilterField::Actors => entry
                    .actors
                    .iter()
                    .any(|actor| actor.to_lowercase().contains(&needle)),
            })
            .cloned()
            .collect()
    }

    /// Look an entry up by its stable identity
    pub fn get(&self, id: EntryId) -> Option<Entry> {
        self.read().entries.iter().find(|e| e.id == id).cloned()
    }

    /// Add a new entry, returning its assigned identity
    ///
    /// Identities come from a monotonic counter and are never reissued,
    /// so deleting or reordering entries cannot redirect a previously
    /// handed-out id to a different film.
    pub fn add(&self, draft: EntryDraft) -> EntryId {
        let mut inner = self.write();
        let id = EntryId(inner.next_id);
        inner.next_id += 1;
        inner.entries.push(Entry {
            id,
            name: draft.name,
            description: draft.description,
            rating: draft.rating,
            genre: draft.genre,
            actors: draft.actors,
            poster: draft.poster,
        });
        tracing::debug!("Added catalog entry {}", id);
        id
    }

    /// Delete every entry whose name matches exactly (case-sensitive)
    ///
    /// Returns the number of entries removed; 0 means the name was not
    /// found and the catalog is unchanged. Duplicate names are all removed.
    pub fn delete_by_name(&self, name: &str) -> usize {
        let mut inner = self.write();
        let before = inner.entries.len();
        inner.entries.retain(|e| e.name != name);
        let deleted = before - inner.entries.len();
        if deleted > 0 {
            tracing::debug!("Deleted {} catalog entries named {:?}", deleted, name);
        }
        deleted
    }

    /// Replace the description of the first entry matching `name`
    /// (case-insensitive). Returns whether a match was found.
    pub fn update_description(&self, name: &str, text: &str) -> bool {
        let needle = name.to_lowercase();
        let mut inner = self.write();
        match inner
            .entries
            .iter_mut()
            .find(|e| e.name.to_lowercase() == needle)
        {
            Some(entry) => {
                entry.description = text.to_string();
                true
            }
            None => false,
        }
    }

    /// Set the rating of the first entry matching `name` (case-insensitive)
    ///
    /// The store only enforces the outer `0.0..=10.0` bound; the dialogue
    /// layer applies its own stricter validation before calling in. Returns
    /// `Ok(false)` when no entry matches.
    pub fn update_rating(&self, name: &str, value: f64) -> Result<bool> {
        if !(0.0..=10.0).contains(&value) {
            return Err(FilmdeskError::InvalidRating { value }.into());
        }
        let needle = name.to_lowercase();
        let mut inner = self.write();
        match inner
            .entries
            .iter_mut()
            .find(|e| e.name.to_lowercase() == needle)
        {
            Some(entry) => {
                entry.rating = Some(value);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// The highest-rated entry among those that have a rating
    pub fn recommend(&self) -> Option<Entry> {
        self.read()
            .entries
            .iter()
            .filter(|e| e.rating.is_some())
            .max_by(|a, b| {
                a.rating
                    .partial_cmp(&b.rating)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .cloned()
    }

    /// Number of entries currently in the catalog
    pub fn len(&self) -> usize {
        self.read().entries.len()
    }

    /// Whether the catalog holds no entries
    pub fn is_empty(&self) -> bool {
        self.read().entries.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}
