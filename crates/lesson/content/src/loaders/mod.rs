//! Content loaders for reading lesson data from files.
//!
//! Each loader turns one RON/TOML file into lesson-core definitions;
//! [`ContentFactory`] combines them into a [`lesson_core::DataSnapshot`].

pub mod cards;
pub mod config;
pub mod drinks;
pub mod factory;
pub mod idols;
pub mod items;
pub mod lesson;

pub use cards::CardLoader;
pub use config::ConfigLoader;
pub use drinks::DrinkLoader;
pub use factory::ContentFactory;
pub use idols::IdolLoader;
pub use items::ProducerItemLoader;
pub use lesson::LessonLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Parses RON text, naming `what` and the file in the error.
pub(crate) fn parse_ron<T>(path: &Path, what: &str) -> LoadResult<T>
where
    T: serde::de::DeserializeOwned,
{
    let content = read_file(path)?;
    ron::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Failed to parse {} RON at {}: {}", what, path.display(), e))
}
