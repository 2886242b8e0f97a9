//! Update-log commitment.
//!
//! A host that persists `{initial snapshot, updates}` can store this digest next
//! to the log and later check that the log it replays is the one it recorded.

#[cfg(feature = "serde")]
use crate::state::LessonUpdate;

/// Computes a SHA-256 commitment to an update log.
///
/// # Design
///
/// - bincode serialization is deterministic for a given update
/// - Updates are hashed in log order, so reordering changes the digest
/// - A prefix of a log has a different digest than the whole log
/// - An update that fails to encode fails the whole commitment
///
/// ```ignore
/// use lesson_core::compute_updates_root;
///
/// let root = compute_updates_root(game_play.updates())?;
/// assert_eq!(root, compute_updates_root(restored.updates())?);
/// ```
///
/// Requires the `serde` feature.
#[cfg(feature = "serde")]
pub fn compute_updates_root(updates: &[LessonUpdate]) -> Result<[u8; 32], bincode::Error> {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();

    for update in updates {
        hasher.update(bincode::serialize(update)?);
    }

    Ok(hasher.finalize().into())
}
