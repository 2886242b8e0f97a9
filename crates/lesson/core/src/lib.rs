//! Deterministic rules engine for card-battle lessons.
//!
//! `lesson-core` defines the canonical lesson rules (state, effects, modifiers,
//! card zones, triggers and the turn lifecycle) as pure APIs. A lesson is an
//! immutable initial snapshot plus an append-only update log; every state is
//! obtained by folding that log, and all writes flow through
//! [`engine::LessonEngine`]. Randomness and id generation are injected by the
//! host, so the same inputs always reproduce the same log.
pub mod config;
pub mod display;
pub mod effect;
pub mod engine;
pub mod env;
pub mod error;
pub mod root;
pub mod state;
pub mod trigger;
pub mod zones;

pub use config::LessonConfig;
pub use display::{DrinkDisplay, HandCardDisplay, LessonDisplay, ModifierDisplay, project};
pub use effect::{
    Condition, Cost, CostKind, Criterion, Effect, EffectContext, EffectKind, MeasureTarget,
    ScoreGain, ValueRange, VitalityGain,
};
pub use engine::{
    CardEntry, EngineError, ItemEntry, LessonEngine, LessonParams, LessonPhase, TransitionError,
    TransitionKind, TransitionOutcome, TransitionPhase, can_use_card, create_lesson,
    is_lesson_ended, lesson_phase, preview_card_usage,
};
pub use env::{
    CardContent, CardData, CardOracle, DataSnapshot, DrinkData, DrinkOracle, IdGenerator,
    IdolData, IdolOracle, ItemTrigger, LessonEnv, OracleError, PcgRng, ProducerItemContent,
    ProducerItemData, ProducerItemOracle, RngOracle, SequentialIds,
};
pub use error::{ErrorContext, ErrorSeverity, LessonError};
#[cfg(feature = "serde")]
pub use root::compute_updates_root;
pub use state::{
    AttributeKind, Card, CardDataId, CardEnhancements, CardId, CardPlacement, CardSummaryKind,
    Drink, DrinkDataId, DrinkId, Encouragement, GamePlay, Hand, Idol, IdolDataId, Lesson,
    LessonUpdate, MemoryEffect, Modifier, ModifierId, ModifierKind, ModifierTag, ProducerItem,
    ProducerItemDataId, ProducerItemId, Rarity, ReasonKind, ScoreBonus, UpdateKind, UpdateReason,
};
pub use trigger::TriggerWindow;
