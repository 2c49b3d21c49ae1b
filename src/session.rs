//! Per-user dialogue sessions
//!
//! Each user (owner) has at most one session: the dialogue state they are
//! currently in plus the fields they have entered so far. Sessions are
//! created lazily, mutated one dialogue step at a time, and dropped whole
//! on completion, abort, or cancellation. An absent session is equivalent
//! to an idle one with no pending fields.
//!
//! The store is keyed by owner and guarded by a single mutex; an owner's
//! session is only ever touched by that owner's own event stream (the
//! dialogue engine serializes events per owner), so owners cannot observe
//! each other's pending fields.

use crate::dialogue::states::DialogueState;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Opaque key identifying one user's conversation
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OwnerId(String);

impl OwnerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OwnerId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Fields accumulated by an in-flight dialogue
///
/// One optional slot per field a dialogue can collect. Merging a patch is
/// last-write-wins per field: slots present in the patch replace the stored
/// value, absent slots are left alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PendingFields {
    pub name: Option<String>,
    pub description: Option<String>,
    pub rating: Option<f64>,
    pub genre: Option<String>,
    pub actors: Option<Vec<String>>,
    pub poster: Option<String>,
    /// Canonical entry name captured by the edit/rate lookup step
    pub target_name: Option<String>,
    /// Field choice stored by the filter dialogue
    pub filter_field: Option<String>,
}

impl PendingFields {
    /// Merge `patch` into `self`, field by field, last write wins
    pub fn merge(&mut self, patch: PendingFields) {
        if let Some(v) = patch.name {
            self.name = Some(v);
        }
        if let Some(v) = patch.description {
            self.description = Some(v);
        }
        if let Some(v) = patch.rating {
            self.rating = Some(v);
        }
        if let Some(v) = patch.genre {
            self.genre = Some(v);
        }
        if let Some(v) = patch.actors {
            self.actors = Some(v);
        }
        if let Some(v) = patch.poster {
            self.poster = Some(v);
        }
        if let Some(v) = patch.target_name {
            self.target_name = Some(v);
        }
        if let Some(v) = patch.filter_field {
            self.filter_field = Some(v);
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// One user's conversation state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    /// Current dialogue step; `None` means idle
    pub state: Option<DialogueState>,
    /// Partially entered data for the active dialogue
    pub fields: PendingFields,
}

/// Store mapping owners to their sessions
#[derive(Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<OwnerId, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<OwnerId, Session>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the owner's session (idle and empty when absent)
    pub fn get(&self, owner: &OwnerId) -> Session {
        self.lock().get(owner).cloned().unwrap_or_default()
    }

    /// Set the owner's current dialogue state, creating the session if needed
    pub fn set_state(&self, owner: &OwnerId, state: Option<DialogueState>) {
        self.lock().entry(owner.clone()).or_default().state = state;
    }

    /// Merge a patch into the owner's pending fields
    pub fn update_fields(&self, owner: &OwnerId, patch: PendingFields) {
        self.lock()
            .entry(owner.clone())
            .or_default()
            .fields
            .merge(patch);
    }

    /// Snapshot of the owner's pending fields
    pub fn fields(&self, owner: &OwnerId) -> PendingFields {
        self.lock()
            .get(owner)
            .map(|s| s.fields.clone())
            .unwrap_or_default()
    }

    /// Drop the owner's session entirely: state back to idle, fields gone
    pub fn clear(&self, owner: &OwnerId) {
        self.lock().remove(owner);
    }
}
