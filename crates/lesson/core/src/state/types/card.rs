use bitflags::bitflags;

use super::common::{CardDataId, CardId};

bitflags! {
    /// Enhancement markers carried by a card instance.
    ///
    /// The markers are tracked independently because some effects only enhance
    /// cards that lack a particular marker. A card with any marker plays its
    /// definition's enhanced content when one exists.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct CardEnhancements: u8 {
        /// Enhanced when the deck was built.
        const ORIGINAL = 1 << 0;
        /// Enhanced by a support card.
        const SUPPORT  = 1 << 1;
        /// Enhanced by an in-lesson effect.
        const EFFECT   = 1 << 2;
    }
}

/// One card instance in the lesson's card pool.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Card {
    pub id: CardId,
    pub data_id: CardDataId,
    pub enhancements: CardEnhancements,
}

impl Card {
    pub fn new(id: CardId, data_id: CardDataId) -> Self {
        Self {
            id,
            data_id,
            enhancements: CardEnhancements::empty(),
        }
    }

    pub fn with_enhancements(mut self, enhancements: CardEnhancements) -> Self {
        self.enhancements = enhancements;
        self
    }

    #[inline]
    pub fn is_enhanced(&self) -> bool {
        !self.enhancements.is_empty()
    }
}
