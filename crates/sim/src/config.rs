//! Simulator configuration structures and loaders.
use std::env;
use std::path::PathBuf;

/// Configuration for one simulator invocation.
#[derive(Clone, Debug)]
pub struct SimConfig {
    pub data_dir: PathBuf,
    pub lesson: String,
    pub seed: u64,
    pub runs: u32,
    pub log_dir: Option<PathBuf>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(Self::DEFAULT_DATA_DIR),
            lesson: Self::DEFAULT_LESSON.to_string(),
            seed: 0,
            runs: 1,
            log_dir: None,
        }
    }
}

impl SimConfig {
    pub const DEFAULT_DATA_DIR: &'static str = "crates/lesson/content/data";
    pub const DEFAULT_LESSON: &'static str = "vocal_lesson";

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `LESSON_DATA_DIR` - Content directory (default: `crates/lesson/content/data`)
    /// - `LESSON_NAME` - Lesson file under `lessons/` (default: `vocal_lesson`)
    /// - `LESSON_SEED` - Seed of the first run (default: 0)
    /// - `LESSON_RUNS` - Number of runs with consecutive seeds (default: 1)
    /// - `LESSON_LOG_DIR` - Directory for the log file (default: platform cache dir)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("LESSON_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Ok(lesson) = env::var("LESSON_NAME") {
            config.lesson = lesson;
        }
        if let Some(seed) = read_env::<u64>("LESSON_SEED") {
            config.seed = seed;
        }
        if let Some(runs) = read_env::<u32>("LESSON_RUNS") {
            config.runs = runs.max(1);
        }
        config.log_dir = env::var("LESSON_LOG_DIR").ok().map(PathBuf::from);

        config
    }

    /// Seeds of every run, in order.
    pub fn seeds(&self) -> impl Iterator<Item = u64> + '_ {
        (0..u64::from(self.runs)).map(|offset| self.seed.wrapping_add(offset))
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_are_consecutive() {
        let config = SimConfig {
            seed: 10,
            runs: 3,
            ..SimConfig::default()
        };
        assert_eq!(config.seeds().collect::<Vec<_>>(), vec![10, 11, 12]);
    }
}
