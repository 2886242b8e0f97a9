//! Lesson state value types.
mod card;
mod common;
mod idol;
mod item;
mod lesson;
mod modifier;

pub use card::{Card, CardEnhancements};
pub use common::{
    AttributeKind, CardDataId, CardId, CardSummaryKind, DrinkDataId, DrinkId, IdolDataId,
    ModifierId, ProducerItemDataId, ProducerItemId, Rarity,
};
pub use idol::Idol;
pub use item::{Drink, ProducerItem};
pub use lesson::{Encouragement, Hand, Lesson, MemoryEffect, ScoreBonus};
pub use modifier::{Modifier, ModifierKind, ModifierTag};
