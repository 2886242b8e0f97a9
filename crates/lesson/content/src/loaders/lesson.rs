//! Lesson setup loader.

use std::path::Path;

use lesson_core::LessonParams;

use crate::loaders::{LoadResult, parse_ron};

/// Loader for lesson setups (idol, deck, items, schedule) from RON files.
pub struct LessonLoader;

impl LessonLoader {
    pub fn load(path: &Path) -> LoadResult<LessonParams> {
        let params: LessonParams = parse_ron(path, "lesson")?;
        if params.turns.is_empty() {
            anyhow::bail!("Lesson at {} schedules no turns", path.display());
        }
        Ok(params)
    }
}
