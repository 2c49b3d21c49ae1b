//! Catalog listing handler

use crate::catalog::Catalog;
use crate::error::Result;
use std::sync::Arc;

/// Print the catalog to stdout, optionally as JSON
pub fn run_list(catalog: Arc<Catalog>, json: bool) -> Result<()> {
    let entries = catalog.list_all();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("Catalog is empty.");
        return Ok(());
    }

    for entry in entries {
        let rating = entry
            .rating
            .map(|r| r.to_string())
            .unwrap_or_else(|| "unrated".to_string());
        println!(
            "{:>4}  {}  [{}]  rating: {}  actors: {}",
            entry.id,
            entry.name,
            entry.genre,
            rating,
            entry.actors.join(", ")
        );
    }
    Ok(())
}
