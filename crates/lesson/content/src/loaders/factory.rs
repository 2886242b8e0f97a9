//! Content factory for building oracles from data files.

use std::path::{Path, PathBuf};

use anyhow::Context;
use lesson_core::{
    CardData, DataSnapshot, DrinkData, IdolData, LessonConfig, LessonParams, ProducerItemData,
};

use crate::loaders::{
    CardLoader, ConfigLoader, DrinkLoader, IdolLoader, LessonLoader, LoadResult,
    ProducerItemLoader,
};

/// Content factory that loads all lesson content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── cards.ron
/// ├── producer_items.ron
/// ├── drinks.ron
/// ├── idols.ron
/// └── lessons/
///     └── vocal_lesson.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load lesson configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<LessonConfig> {
        let path = self.data_dir.join("config.toml");
        ConfigLoader::load(&path)
    }

    /// Load card catalog from `cards.ron`.
    pub fn load_cards(&self) -> LoadResult<Vec<CardData>> {
        let path = self.data_dir.join("cards.ron");
        CardLoader::load(&path)
    }

    /// Load producer item catalog from `producer_items.ron`.
    pub fn load_producer_items(&self) -> LoadResult<Vec<ProducerItemData>> {
        let path = self.data_dir.join("producer_items.ron");
        ProducerItemLoader::load(&path)
    }

    /// Load drink catalog from `drinks.ron`.
    pub fn load_drinks(&self) -> LoadResult<Vec<DrinkData>> {
        let path = self.data_dir.join("drinks.ron");
        DrinkLoader::load(&path)
    }

    /// Load idol catalog from `idols.ron`.
    pub fn load_idols(&self) -> LoadResult<Vec<IdolData>> {
        let path = self.data_dir.join("idols.ron");
        IdolLoader::load(&path)
    }

    /// Load every catalog into one snapshot serving all four oracles.
    pub fn load_snapshot(&self) -> LoadResult<DataSnapshot> {
        let snapshot = DataSnapshot::new(
            self.load_cards().context("loading cards")?,
            self.load_producer_items().context("loading producer items")?,
            self.load_drinks().context("loading drinks")?,
            self.load_idols().context("loading idols")?,
        );
        tracing::info!(
            cards = snapshot.cards.len(),
            producer_items = snapshot.producer_items.len(),
            drinks = snapshot.drinks.len(),
            idols = snapshot.idols.len(),
            data_dir = %self.data_dir.display(),
            "content loaded"
        );
        Ok(snapshot)
    }

    /// Load the snapshot and config together, checking that the configured
    /// trouble card exists.
    pub fn load_all(&self) -> LoadResult<(DataSnapshot, LessonConfig)> {
        let snapshot = self.load_snapshot()?;
        let config = self.load_config().context("loading config")?;
        if !snapshot.cards.contains_key(&config.trouble_card_id) {
            anyhow::bail!(
                "Configured trouble card '{}' is not in the card catalog",
                config.trouble_card_id
            );
        }
        Ok((snapshot, config))
    }

    /// Load a lesson setup from `lessons/{lesson_name}.ron`.
    pub fn load_lesson(&self, lesson_name: &str) -> LoadResult<LessonParams> {
        let path = self
            .data_dir
            .join("lessons")
            .join(format!("{}.ron", lesson_name));
        LessonLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }
}
