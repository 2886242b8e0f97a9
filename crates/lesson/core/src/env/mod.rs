//! Traits describing read-only lesson data.
//!
//! Oracles expose static card, producer item, drink and idol definitions. The
//! [`LessonEnv`] aggregate bundles them so the engine can look definitions up
//! by id without hard coupling to concrete implementations. Randomness and id
//! generation are injected separately because they are stateful.
mod cards;
mod drinks;
mod error;
mod idols;
mod items;
mod rng;
mod snapshot;

pub use cards::{CardContent, CardData, CardOracle};
pub use drinks::{DrinkData, DrinkOracle};
pub use error::OracleError;
pub use idols::{IdolData, IdolOracle};
pub use items::{ItemTrigger, ProducerItemContent, ProducerItemData, ProducerItemOracle};
pub use rng::{IdGenerator, PcgRng, RngOracle, SequentialIds};
pub use snapshot::DataSnapshot;

use crate::state::{CardDataId, DrinkDataId, IdolDataId, ProducerItemDataId};

/// Aggregates read-only oracles required by the engine.
#[derive(Clone, Copy)]
pub struct LessonEnv<'a> {
    cards: Option<&'a dyn CardOracle>,
    producer_items: Option<&'a dyn ProducerItemOracle>,
    drinks: Option<&'a dyn DrinkOracle>,
    idols: Option<&'a dyn IdolOracle>,
}

impl<'a> LessonEnv<'a> {
    pub fn new(
        cards: Option<&'a dyn CardOracle>,
        producer_items: Option<&'a dyn ProducerItemOracle>,
        drinks: Option<&'a dyn DrinkOracle>,
        idols: Option<&'a dyn IdolOracle>,
    ) -> Self {
        Self {
            cards,
            producer_items,
            drinks,
            idols,
        }
    }

    pub fn with_all(
        cards: &'a dyn CardOracle,
        producer_items: &'a dyn ProducerItemOracle,
        drinks: &'a dyn DrinkOracle,
        idols: &'a dyn IdolOracle,
    ) -> Self {
        Self::new(Some(cards), Some(producer_items), Some(drinks), Some(idols))
    }

    pub fn empty() -> Self {
        Self::new(None, None, None, None)
    }

    /// Returns the CardOracle, or an error if not available.
    pub fn cards(&self) -> Result<&'a dyn CardOracle, OracleError> {
        self.cards.ok_or(OracleError::CardsNotAvailable)
    }

    /// Returns the ProducerItemOracle, or an error if not available.
    pub fn producer_items(&self) -> Result<&'a dyn ProducerItemOracle, OracleError> {
        self.producer_items
            .ok_or(OracleError::ProducerItemsNotAvailable)
    }

    /// Returns the DrinkOracle, or an error if not available.
    pub fn drinks(&self) -> Result<&'a dyn DrinkOracle, OracleError> {
        self.drinks.ok_or(OracleError::DrinksNotAvailable)
    }

    /// Returns the IdolOracle, or an error if not available.
    pub fn idols(&self) -> Result<&'a dyn IdolOracle, OracleError> {
        self.idols.ok_or(OracleError::IdolsNotAvailable)
    }

    /// Looks up a card definition.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::CardNotFound` if the id has no definition.
    pub fn card(&self, id: &CardDataId) -> Result<&'a CardData, OracleError> {
        self.cards()?
            .card(id)
            .ok_or_else(|| OracleError::CardNotFound(id.clone()))
    }

    pub fn producer_item(
        &self,
        id: &ProducerItemDataId,
    ) -> Result<&'a ProducerItemData, OracleError> {
        self.producer_items()?
            .producer_item(id)
            .ok_or_else(|| OracleError::ProducerItemNotFound(id.clone()))
    }

    pub fn drink(&self, id: &DrinkDataId) -> Result<&'a DrinkData, OracleError> {
        self.drinks()?
            .drink(id)
            .ok_or_else(|| OracleError::DrinkNotFound(id.clone()))
    }

    pub fn idol(&self, id: &IdolDataId) -> Result<&'a IdolData, OracleError> {
        self.idols()?
            .idol(id)
            .ok_or_else(|| OracleError::IdolNotFound(id.clone()))
    }
}

impl std::fmt::Debug for LessonEnv<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LessonEnv")
            .field("cards", &self.cards.is_some())
            .field("producer_items", &self.producer_items.is_some())
            .field("drinks", &self.drinks.is_some())
            .field("idols", &self.idols.is_some())
            .finish()
    }
}
