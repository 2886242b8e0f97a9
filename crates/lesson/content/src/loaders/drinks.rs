//! Drink catalog loader.

use std::path::Path;

use lesson_core::DrinkData;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron};

/// Drink catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrinkCatalog {
    pub drinks: Vec<DrinkData>,
}

/// Loader for drink catalogs from RON files.
pub struct DrinkLoader;

impl DrinkLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<DrinkData>> {
        let catalog: DrinkCatalog = parse_ron(path, "drink catalog")?;
        Ok(catalog.drinks)
    }
}
