//! Lesson creation.

use tracing::debug;

use crate::env::{IdGenerator, LessonEnv, OracleError, RngOracle};
use crate::state::{
    AttributeKind, Card, CardDataId, CardEnhancements, CardId, Drink, DrinkDataId, DrinkId,
    Encouragement, GamePlay, Idol, IdolDataId, Lesson, MemoryEffect, ProducerItem,
    ProducerItemDataId, ProducerItemId, ScoreBonus,
};
use crate::zones::shuffle;

/// Deck entry of [`LessonParams`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardEntry {
    pub card: CardDataId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub enhanced: bool,
}

impl CardEntry {
    pub fn new(card: CardDataId) -> Self {
        Self {
            card,
            enhanced: false,
        }
    }

    pub fn enhanced(card: CardDataId) -> Self {
        Self {
            card,
            enhanced: true,
        }
    }
}

/// Producer item entry of [`LessonParams`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemEntry {
    pub item: ProducerItemDataId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub enhanced: bool,
}

/// Everything needed to freeze an initial lesson snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LessonParams {
    pub idol: IdolDataId,
    /// Starting life. Defaults to the idol's max life.
    #[cfg_attr(feature = "serde", serde(default))]
    pub life: Option<u32>,
    pub turns: Vec<AttributeKind>,
    pub deck: Vec<CardEntry>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub producer_items: Vec<ItemEntry>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub drinks: Vec<DrinkDataId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub clear_score_threshold: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub perfect_score_threshold: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub score_ceiling: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub score_bonus: Option<ScoreBonus>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub encouragements: Vec<Encouragement>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub memory_effects: Vec<MemoryEffect>,
}

impl LessonParams {
    pub fn new(idol: IdolDataId, turns: Vec<AttributeKind>, deck: Vec<CardEntry>) -> Self {
        Self {
            idol,
            life: None,
            turns,
            deck,
            producer_items: Vec::new(),
            drinks: Vec::new(),
            clear_score_threshold: None,
            perfect_score_threshold: None,
            score_ceiling: None,
            score_bonus: None,
            encouragements: Vec::new(),
            memory_effects: Vec::new(),
        }
    }
}

/// Resolves `params` against the oracles and freezes the initial snapshot.
///
/// Instance ids are minted from `ids` in a fixed order (cards, producer items,
/// drinks) and the deck is shuffled with `rng`.
pub fn create_lesson(
    params: &LessonParams,
    env: LessonEnv<'_>,
    rng: &mut dyn RngOracle,
    ids: &mut dyn IdGenerator,
) -> Result<GamePlay, OracleError> {
    let idol_data = env.idol(&params.idol)?;
    let life = params.life.unwrap_or(idol_data.max_life).min(idol_data.max_life);
    let mut lesson = Lesson::new(
        Idol::new(params.idol.clone(), life, idol_data.max_life),
        params.turns.clone(),
    );

    for entry in &params.deck {
        let data = env.card(&entry.card)?;
        let mut card = Card::new(CardId(ids.next_id()), entry.card.clone());
        if entry.enhanced && data.can_be_enhanced() {
            card = card.with_enhancements(CardEnhancements::ORIGINAL);
        }
        lesson.deck.push(card.id);
        lesson.cards.push(card);
    }
    shuffle(&mut lesson.deck, rng);

    for entry in &params.producer_items {
        env.producer_item(&entry.item)?;
        lesson.producer_items.push(ProducerItem::new(
            ProducerItemId(ids.next_id()),
            entry.item.clone(),
            entry.enhanced,
        ));
    }
    for drink in &params.drinks {
        env.drink(drink)?;
        lesson
            .drinks
            .push(Drink::new(DrinkId(ids.next_id()), drink.clone()));
    }

    lesson.clear_score_threshold = params.clear_score_threshold;
    lesson.perfect_score_threshold = params.perfect_score_threshold;
    lesson.score_ceiling = params.score_ceiling;
    lesson.score_bonus = params.score_bonus;
    lesson.encouragements = params.encouragements.clone();
    lesson.memory_effects = params.memory_effects.clone();

    debug!(
        idol = %params.idol,
        cards = lesson.cards.len(),
        producer_items = lesson.producer_items.len(),
        drinks = lesson.drinks.len(),
        turns = lesson.total_turns(),
        "lesson created"
    );
    Ok(GamePlay::new(lesson))
}
