//! Selection tokens for catalog entries
//!
//! A selection token is the opaque text a UI button carries so that a later
//! button press can be traced back to one specific catalog entry. Tokens
//! are bound to an entry's stable identity at listing time, never to its
//! position in the list, so mutations elsewhere in the catalog cannot
//! redirect a token to the wrong film. Resolving a token for an entry that
//! has since been deleted is an expected miss, surfaced to the user as
//! "no longer available".

use crate::catalog::{Catalog, Entry, EntryId};
use std::sync::Arc;

/// Token namespace prefix
const PREFIX: &str = "film";
/// Separator between prefix and identity
const SEP: char = ';';

/// Build the selection token for an entry identity: `film;<id>`
pub fn issue(id: EntryId) -> String {
    format!("{}{}{}", PREFIX, SEP, id)
}

/// Parse a selection token back into an entry identity
///
/// Returns `None` for anything that is not a well-formed `film;<id>` token.
pub fn parse(token: &str) -> Option<EntryId> {
    let rest = token.strip_prefix(PREFIX)?;
    let rest = rest.strip_prefix(SEP)?;
    rest.parse::<u64>().ok().map(EntryId)
}

/// Resolves selection tokens against the shared catalog
pub struct SelectionResolver {
    catalog: Arc<Catalog>,
}

impl SelectionResolver {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// Token for an entry, for embedding in a menu choice
    pub fn token_for(&self, entry: &Entry) -> String {
        issue(entry.id)
    }

    /// Resolve a token to the entry it references, if it still exists
    pub fn resolve(&self, token: &str) -> Option<Entry> {
        let id = parse(token)?;
        self.catalog.get(id)
    }
}
