use arrayvec::ArrayVec;

use super::card::Card;
use super::common::{AttributeKind, CardId, DrinkId, ProducerItemId};
use super::idol::Idol;
use super::item::{Drink, ProducerItem};
use crate::config::LessonConfig;
use crate::effect::Effect;

/// Cards held in hand. The capacity is the hand-size cap.
pub type Hand = ArrayVec<CardId, { LessonConfig::MAX_HAND_SIZE }>;

/// Score bonus per turn attribute, in percent (100 = no bonus).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreBonus {
    pub vocal: u32,
    pub dance: u32,
    pub visual: u32,
}

impl ScoreBonus {
    pub fn new(vocal: u32, dance: u32, visual: u32) -> Self {
        Self {
            vocal,
            dance,
            visual,
        }
    }

    pub fn for_attribute(&self, attribute: AttributeKind) -> u32 {
        match attribute {
            AttributeKind::Vocal => self.vocal,
            AttributeKind::Dance => self.dance,
            AttributeKind::Visual => self.visual,
        }
    }
}

/// One-shot effect scheduled for the start of a specific turn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Encouragement {
    pub turn: u32,
    pub effect: Effect,
}

/// Effect applied on the first turn with the given probability (percent).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemoryEffect {
    pub effect: Effect,
    pub probability: u32,
}

/// Aggregate root of one lesson play-through.
///
/// The initial snapshot is built once by `create_lesson` and never mutated;
/// every later state is obtained by folding the update log over it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lesson {
    /// Current turn, starting at 1. Zero before the first `start_turn`.
    pub turn_number: u32,
    /// Attribute of each scheduled turn.
    pub turns: Vec<AttributeKind>,
    /// Turns added (or removed) by effects on top of `turns`.
    pub remaining_turns_change: i32,
    pub turn_ended: bool,
    pub score: u32,
    pub clear_score_threshold: Option<u32>,
    pub perfect_score_threshold: Option<u32>,
    /// Upper bound for the score, if configured.
    pub score_ceiling: Option<u32>,
    pub score_bonus: Option<ScoreBonus>,
    pub encouragements: Vec<Encouragement>,
    pub memory_effects: Vec<MemoryEffect>,

    /// Every card instance that exists in this lesson.
    pub cards: Vec<Card>,
    /// Draw pile; index 0 is the top.
    pub deck: Vec<CardId>,
    pub hand: Hand,
    pub discard_pile: Vec<CardId>,
    pub removed_pile: Vec<CardId>,
    /// Hand captured at the moment the deck ran out.
    ///
    /// Those cards sit out the next reshuffle and stay in the discard pile, which
    /// reproduces a reshuffle that happened the instant the deck emptied.
    pub hand_when_empty_deck: Vec<CardId>,

    pub producer_items: Vec<ProducerItem>,
    pub drinks: Vec<Drink>,
    pub idol: Idol,
}

impl Lesson {
    pub fn new(idol: Idol, turns: Vec<AttributeKind>) -> Self {
        Self {
            turn_number: 0,
            turns,
            remaining_turns_change: 0,
            turn_ended: false,
            score: 0,
            clear_score_threshold: None,
            perfect_score_threshold: None,
            score_ceiling: None,
            score_bonus: None,
            encouragements: Vec::new(),
            memory_effects: Vec::new(),
            cards: Vec::new(),
            deck: Vec::new(),
            hand: Hand::new(),
            discard_pile: Vec::new(),
            removed_pile: Vec::new(),
            hand_when_empty_deck: Vec::new(),
            producer_items: Vec::new(),
            drinks: Vec::new(),
            idol,
        }
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|card| card.id == id)
    }

    pub fn card_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.cards.iter_mut().find(|card| card.id == id)
    }

    pub fn producer_item(&self, id: ProducerItemId) -> Option<&ProducerItem> {
        self.producer_items.iter().find(|item| item.id == id)
    }

    pub fn drink(&self, id: DrinkId) -> Option<&Drink> {
        self.drinks.iter().find(|drink| drink.id == id)
    }

    /// Scheduled turns plus turns added by effects.
    pub fn total_turns(&self) -> u32 {
        let total = self.turns.len() as i64 + i64::from(self.remaining_turns_change);
        total.max(0) as u32
    }

    /// Turns left including the current one.
    pub fn remaining_turns(&self) -> u32 {
        self.total_turns()
            .saturating_sub(self.turn_number.saturating_sub(1))
    }

    pub fn is_final_turn(&self) -> bool {
        self.turn_number > 0 && self.turn_number >= self.total_turns()
    }

    /// Attribute of the current turn. Extra turns reuse the last scheduled attribute.
    pub fn current_attribute(&self) -> Option<AttributeKind> {
        let index = self.turn_number.saturating_sub(1) as usize;
        self.turns.get(index).or_else(|| self.turns.last()).copied()
    }

    /// Score multiplier of the current turn in percent, if bonuses are configured.
    pub fn score_bonus_percentage(&self) -> Option<u32> {
        let bonus = self.score_bonus?;
        Some(bonus.for_attribute(self.current_attribute()?))
    }

    pub fn is_clear(&self) -> bool {
        self.clear_score_threshold
            .is_some_and(|threshold| self.score >= threshold)
    }

    pub fn is_perfect(&self) -> bool {
        self.perfect_score_threshold
            .is_some_and(|threshold| self.score >= threshold)
    }

    /// Card ids across every zone, in zone order.
    pub fn zoned_card_ids(&self) -> impl Iterator<Item = CardId> + '_ {
        self.deck
            .iter()
            .chain(self.hand.iter())
            .chain(self.discard_pile.iter())
            .chain(self.removed_pile.iter())
            .copied()
    }
}
