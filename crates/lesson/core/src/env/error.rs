//! Oracle access errors.
//!
//! Errors related to static data availability and lookups.

use crate::error::{ErrorSeverity, LessonError};
use crate::state::{CardDataId, DrinkDataId, IdolDataId, ProducerItemDataId};

/// Errors that occur when accessing static definitions.
///
/// A missing oracle or definition is a data/configuration defect: the engine
/// cannot proceed, and retrying will not help.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("CardOracle not available")]
    CardsNotAvailable,

    #[error("ProducerItemOracle not available")]
    ProducerItemsNotAvailable,

    #[error("DrinkOracle not available")]
    DrinksNotAvailable,

    #[error("IdolOracle not available")]
    IdolsNotAvailable,

    #[error("card definition '{0}' not found")]
    CardNotFound(CardDataId),

    #[error("producer item definition '{0}' not found")]
    ProducerItemNotFound(ProducerItemDataId),

    #[error("drink definition '{0}' not found")]
    DrinkNotFound(DrinkDataId),

    #[error("idol definition '{0}' not found")]
    IdolNotFound(IdolDataId),

    /// The card oracle has no definition eligible for card generation.
    #[error("no card definition is eligible for generation")]
    NoGeneratableCard,
}

impl LessonError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            CardsNotAvailable => "ORACLE_CARDS_NOT_AVAILABLE",
            ProducerItemsNotAvailable => "ORACLE_PRODUCER_ITEMS_NOT_AVAILABLE",
            DrinksNotAvailable => "ORACLE_DRINKS_NOT_AVAILABLE",
            IdolsNotAvailable => "ORACLE_IDOLS_NOT_AVAILABLE",
            CardNotFound(_) => "ORACLE_CARD_NOT_FOUND",
            ProducerItemNotFound(_) => "ORACLE_PRODUCER_ITEM_NOT_FOUND",
            DrinkNotFound(_) => "ORACLE_DRINK_NOT_FOUND",
            IdolNotFound(_) => "ORACLE_IDOL_NOT_FOUND",
            NoGeneratableCard => "ORACLE_NO_GENERATABLE_CARD",
        }
    }
}
