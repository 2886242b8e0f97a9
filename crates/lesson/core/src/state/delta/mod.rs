//! Append-only update log.
//!
//! A [`LessonUpdate`] is one atomic, replayable state delta with provenance.
//! Resource deltas carry both the effective change (`actual`) and the requested
//! change (`max`), so clamping is visible on the log instead of being an error.
//!
//! The current lesson is always `patch(initial, updates)`: updates are applied in
//! list order and never reordered, edited or removed.
mod patch;
mod recorder;

pub use patch::{apply_update, next_result_index, patch};
pub use recorder::UpdateRecorder;

use crate::state::types::{
    Card, CardEnhancements, CardId, DrinkId, Modifier, ModifierId, ProducerItemId,
};

/// One entry of the update log.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LessonUpdate {
    pub kind: UpdateKind,
    pub reason: UpdateReason,
}

/// Provenance of an update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UpdateReason {
    /// Turn number of the lesson when the update was recorded.
    pub turn_number: u32,
    /// Position of the update in the log. Contiguous from zero.
    pub result_index: u32,
    /// What caused the update.
    pub kind: ReasonKind,
}

/// Trigger that produced an update.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ReasonKind {
    LessonStart,
    TurnStart,
    TurnEnd,
    CardUsage(CardId),
    DrinkUsage(DrinkId),
    SkipTurn,
    ProducerItem(ProducerItemId),
    Modifier(ModifierId),
    Encouragement,
    MemoryEffect,
}

/// Atomic state delta.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum UpdateKind {
    Life { actual: i32, max: i32 },
    Vitality { actual: i32, max: i32 },
    Score { actual: i32, max: i32 },
    ActionPoints { amount: i32 },

    ModifierAddition { modifier: Modifier },
    /// Adds `delta` to the strength field of an existing modifier.
    ModifierUpdate { id: ModifierId, delta: i32 },
    ModifierRemoval { id: ModifierId },
    ModifierIdsAtTurnStart { ids: Vec<ModifierId> },

    CardPlacement(CardPlacement),
    CardAddition { card: Card },
    CardEnhancement {
        card_id: CardId,
        enhancements: CardEnhancements,
    },

    TurnNumberIncrease,
    RemainingTurnsChange { amount: i32 },
    TurnEnded { value: bool },
    CardUsageCount { amount: u32 },
    ProducerItemActivation { item_id: ProducerItemId },
    DrinkRemoval { drink_id: DrinkId },
}

/// Zone lists replaced by a card placement update. `None` leaves a zone as is.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardPlacement {
    pub deck: Option<Vec<CardId>>,
    pub hand: Option<Vec<CardId>>,
    pub discard_pile: Option<Vec<CardId>>,
    pub removed_pile: Option<Vec<CardId>>,
    pub hand_when_empty_deck: Option<Vec<CardId>>,
}

impl CardPlacement {
    pub fn is_empty(&self) -> bool {
        self.deck.is_none()
            && self.hand.is_none()
            && self.discard_pile.is_none()
            && self.removed_pile.is_none()
            && self.hand_when_empty_deck.is_none()
    }
}

impl UpdateKind {
    /// Shorthand for a score delta that was not clamped.
    pub fn score(amount: i32) -> Self {
        Self::Score {
            actual: amount,
            max: amount,
        }
    }

    pub fn life(amount: i32) -> Self {
        Self::Life {
            actual: amount,
            max: amount,
        }
    }

    pub fn vitality(amount: i32) -> Self {
        Self::Vitality {
            actual: amount,
            max: amount,
        }
    }
}
