//! Card catalog loader.

use std::collections::HashSet;
use std::path::Path;

use lesson_core::CardData;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron};

/// Card catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardCatalog {
    pub cards: Vec<CardData>,
}

/// Loader for card catalogs from RON files.
pub struct CardLoader;

impl CardLoader {
    /// Load a card catalog from a RON file.
    ///
    /// Duplicate ids are rejected: random card generation walks the catalog in
    /// id order, so every id must name exactly one definition.
    pub fn load(path: &Path) -> LoadResult<Vec<CardData>> {
        let catalog: CardCatalog = parse_ron(path, "card catalog")?;

        let mut seen = HashSet::new();
        for card in &catalog.cards {
            if !seen.insert(card.id.clone()) {
                anyhow::bail!("Duplicate card id '{}' in {}", card.id, path.display());
            }
        }

        tracing::debug!(count = catalog.cards.len(), path = %path.display(), "cards loaded");
        Ok(catalog.cards)
    }
}
