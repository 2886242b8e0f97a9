use crate::effect::{Condition, Cost, Effect};
use crate::state::{CardDataId, CardSummaryKind, Rarity};

pub trait CardOracle: Send + Sync {
    fn card(&self, id: &CardDataId) -> Option<&CardData>;

    /// Returns every card definition in a stable order.
    /// Random card generation indexes into this list, so the order is part of
    /// the determinism contract.
    fn all_cards(&self) -> Vec<&CardData>;
}

/// Static card definition.
///
/// # Design: Base + Enhanced Pattern
///
/// - `base` is played by cards without enhancement markers
/// - `enhanced` is played by cards with any marker, when the definition has one
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardData {
    pub id: CardDataId,
    pub name: String,
    pub rarity: Rarity,
    pub kind: CardSummaryKind,
    pub base: CardContent,
    #[cfg_attr(feature = "serde", serde(default))]
    pub enhanced: Option<CardContent>,
}

impl CardData {
    /// Content played by a card with or without enhancement markers.
    pub fn content(&self, enhanced: bool) -> &CardContent {
        match (&self.enhanced, enhanced) {
            (Some(content), true) => content,
            _ => &self.base,
        }
    }

    pub fn can_be_enhanced(&self) -> bool {
        self.enhanced.is_some()
    }
}

/// Playable part of a card definition.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CardContent {
    pub cost: Cost,
    /// Playability condition checked by `can_use_card`.
    pub condition: Option<Condition>,
    pub effects: Vec<Effect>,
    /// Removed from the lesson after use instead of being discarded.
    pub usable_once: bool,
    /// Guaranteed to be in the opening hand.
    pub innate: bool,
}
