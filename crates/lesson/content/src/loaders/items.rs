//! Producer item catalog loader.

use std::path::Path;

use lesson_core::ProducerItemData;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron};

/// Producer item catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProducerItemCatalog {
    pub producer_items: Vec<ProducerItemData>,
}

/// Loader for producer item catalogs from RON files.
pub struct ProducerItemLoader;

impl ProducerItemLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<ProducerItemData>> {
        let catalog: ProducerItemCatalog = parse_ron(path, "producer item catalog")?;
        Ok(catalog.producer_items)
    }
}
