//! Authoritative lesson state representation.
//!
//! This module owns the lesson aggregate and the update log. Runtime layers
//! fold or query this state but extend the log exclusively through the engine.
pub mod delta;
pub mod types;

pub use delta::{
    CardPlacement, LessonUpdate, ReasonKind, UpdateKind, UpdateReason, UpdateRecorder,
    apply_update, next_result_index, patch,
};
pub use types::{
    AttributeKind, Card, CardDataId, CardEnhancements, CardId, CardSummaryKind, Drink,
    DrinkDataId, DrinkId, Encouragement, Hand, Idol, IdolDataId, Lesson, MemoryEffect, Modifier,
    ModifierId, ModifierKind, ModifierTag, ProducerItem, ProducerItemDataId, ProducerItemId,
    Rarity, ScoreBonus,
};

/// Immutable initial snapshot plus the append-only update log.
///
/// The pair fully determines every historical and current state of a lesson,
/// which is what a host persists.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GamePlay {
    initial_lesson: Lesson,
    updates: Vec<LessonUpdate>,
}

impl GamePlay {
    pub fn new(initial_lesson: Lesson) -> Self {
        Self {
            initial_lesson,
            updates: Vec::new(),
        }
    }

    /// Restores a persisted play-through.
    ///
    /// Returns `None` if the result indices are not contiguous from zero.
    pub fn from_parts(initial_lesson: Lesson, updates: Vec<LessonUpdate>) -> Option<Self> {
        let contiguous = updates
            .iter()
            .enumerate()
            .all(|(index, update)| update.reason.result_index as usize == index);
        contiguous.then_some(Self {
            initial_lesson,
            updates,
        })
    }

    pub fn initial_lesson(&self) -> &Lesson {
        &self.initial_lesson
    }

    pub fn updates(&self) -> &[LessonUpdate] {
        &self.updates
    }

    /// Current lesson: the whole log folded over the initial snapshot.
    pub fn lesson(&self) -> Lesson {
        patch(&self.initial_lesson, &self.updates)
    }

    /// Lesson as observed after the first `len` updates.
    pub fn lesson_at(&self, len: usize) -> Lesson {
        patch(&self.initial_lesson, &self.updates[..len.min(self.updates.len())])
    }

    pub fn next_result_index(&self) -> u32 {
        next_result_index(&self.updates)
    }

    /// Appends updates recorded by the engine.
    pub(crate) fn append(&mut self, updates: Vec<LessonUpdate>) {
        debug_assert!(
            updates
                .iter()
                .zip(self.next_result_index()..)
                .all(|(update, expected)| update.reason.result_index == expected),
            "result indices must continue the log"
        );
        self.updates.extend(updates);
    }
}
