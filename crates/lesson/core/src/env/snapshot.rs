//! In-memory data oracle.
//!
//! [`DataSnapshot`] stores every static definition in ordered maps and
//! implements all four oracle traits. Content loaders build one from data
//! files; tests build one from literals.

use std::collections::BTreeMap;

use super::{
    CardData, CardOracle, DrinkData, DrinkOracle, IdolData, IdolOracle, LessonEnv,
    ProducerItemData, ProducerItemOracle,
};
use crate::state::{CardDataId, DrinkDataId, IdolDataId, ProducerItemDataId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataSnapshot {
    pub cards: BTreeMap<CardDataId, CardData>,
    pub producer_items: BTreeMap<ProducerItemDataId, ProducerItemData>,
    pub drinks: BTreeMap<DrinkDataId, DrinkData>,
    pub idols: BTreeMap<IdolDataId, IdolData>,
}

impl DataSnapshot {
    pub fn new(
        cards: Vec<CardData>,
        producer_items: Vec<ProducerItemData>,
        drinks: Vec<DrinkData>,
        idols: Vec<IdolData>,
    ) -> Self {
        Self {
            cards: cards.into_iter().map(|card| (card.id.clone(), card)).collect(),
            producer_items: producer_items
                .into_iter()
                .map(|item| (item.id.clone(), item))
                .collect(),
            drinks: drinks
                .into_iter()
                .map(|drink| (drink.id.clone(), drink))
                .collect(),
            idols: idols.into_iter().map(|idol| (idol.id.clone(), idol)).collect(),
        }
    }

    /// Bundles this snapshot as every oracle of a [`LessonEnv`].
    pub fn env(&self) -> LessonEnv<'_> {
        LessonEnv::with_all(self, self, self, self)
    }
}

impl CardOracle for DataSnapshot {
    fn card(&self, id: &CardDataId) -> Option<&CardData> {
        self.cards.get(id)
    }

    fn all_cards(&self) -> Vec<&CardData> {
        self.cards.values().collect()
    }
}

impl ProducerItemOracle for DataSnapshot {
    fn producer_item(&self, id: &ProducerItemDataId) -> Option<&ProducerItemData> {
        self.producer_items.get(id)
    }
}

impl DrinkOracle for DataSnapshot {
    fn drink(&self, id: &DrinkDataId) -> Option<&DrinkData> {
        self.drinks.get(id)
    }
}

impl IdolOracle for DataSnapshot {
    fn idol(&self, id: &IdolDataId) -> Option<&IdolData> {
        self.idols.get(id)
    }
}
