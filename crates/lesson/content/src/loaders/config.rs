//! Lesson configuration loader.

use std::path::Path;

use lesson_core::LessonConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for lesson configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to [`LessonConfig::default`]. A config granting
    /// no action points per turn is rejected.
    pub fn load(path: &Path) -> LoadResult<LessonConfig> {
        let content = read_file(path)?;
        let config: LessonConfig = toml::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse config TOML at {}: {}", path.display(), e)
        })?;

        if config.action_points_per_turn == 0 {
            anyhow::bail!("{}: action_points_per_turn must be positive", path.display());
        }

        tracing::debug!(
            cards_per_turn_draw = config.cards_per_turn_draw,
            trouble_card = %config.trouble_card_id,
            "lesson config loaded"
        );
        Ok(config)
    }
}
