//! Idol catalog loader.

use std::path::Path;

use lesson_core::IdolData;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron};

/// Idol catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdolCatalog {
    pub idols: Vec<IdolData>,
}

/// Loader for idol catalogs from RON files.
pub struct IdolLoader;

impl IdolLoader {
    /// Load an idol catalog from a RON file.
    ///
    /// An idol with zero max life could never pay a cost, so it is rejected.
    pub fn load(path: &Path) -> LoadResult<Vec<IdolData>> {
        let catalog: IdolCatalog = parse_ron(path, "idol catalog")?;
        if let Some(idol) = catalog.idols.iter().find(|idol| idol.max_life == 0) {
            anyhow::bail!("Idol '{}' has zero max life", idol.id);
        }
        Ok(catalog.idols)
    }
}
