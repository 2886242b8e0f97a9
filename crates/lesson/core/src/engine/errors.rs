//! Error types for the turn lifecycle.

use crate::env::OracleError;
use crate::error::{ErrorContext, ErrorSeverity, LessonError};
use crate::state::{CardId, DrinkId};

/// Public transition of the lesson state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TransitionKind {
    StartTurn,
    PlayCard,
    UseDrink,
    SkipTurn,
    EndTurn,
}

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Errors surfaced by the lesson engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EngineError {
    #[error("lesson has ended")]
    LessonEnded,

    #[error("lesson has not started")]
    LessonNotStarted,

    #[error("turn is already in progress")]
    TurnAlreadyInProgress,

    #[error("no turn is in progress")]
    TurnNotInProgress,

    #[error("no action points left")]
    NoActionPoints,

    #[error("{0} action points left")]
    ActionPointsRemaining(u32),

    #[error("{0} is not in hand")]
    CardNotInHand(CardId),

    #[error("{0} cannot be played")]
    CardNotPlayable(CardId),

    #[error("{0} is not carried")]
    DrinkNotCarried(DrinkId),

    /// A zone references a card that is not in the card pool.
    #[error("{0} is missing from the card pool")]
    CardMissingFromPool(CardId),

    /// The zones no longer partition the card pool.
    #[error("card zones are out of sync with the card pool")]
    ZonesOutOfSync,

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl LessonError for EngineError {
    fn severity(&self) -> ErrorSeverity {
        use EngineError::*;
        match self {
            LessonEnded | LessonNotStarted | TurnAlreadyInProgress | TurnNotInProgress => {
                ErrorSeverity::Validation
            }
            NoActionPoints | ActionPointsRemaining(_) => ErrorSeverity::Validation,
            CardNotInHand(_) | CardNotPlayable(_) | DrinkNotCarried(_) => ErrorSeverity::Validation,
            CardMissingFromPool(_) | ZonesOutOfSync => ErrorSeverity::Internal,
            Oracle(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        use EngineError::*;
        match self {
            LessonEnded => "ENGINE_LESSON_ENDED",
            LessonNotStarted => "ENGINE_LESSON_NOT_STARTED",
            TurnAlreadyInProgress => "ENGINE_TURN_ALREADY_IN_PROGRESS",
            TurnNotInProgress => "ENGINE_TURN_NOT_IN_PROGRESS",
            NoActionPoints => "ENGINE_NO_ACTION_POINTS",
            ActionPointsRemaining(_) => "ENGINE_ACTION_POINTS_REMAINING",
            CardNotInHand(_) => "ENGINE_CARD_NOT_IN_HAND",
            CardNotPlayable(_) => "ENGINE_CARD_NOT_PLAYABLE",
            DrinkNotCarried(_) => "ENGINE_DRINK_NOT_CARRIED",
            CardMissingFromPool(_) => "ENGINE_CARD_MISSING_FROM_POOL",
            ZonesOutOfSync => "ENGINE_ZONES_OUT_OF_SYNC",
            Oracle(error) => error.error_code(),
        }
    }
}

/// Associates a transition and its failing phase with the underlying error.
///
/// A failed transition appends nothing to the update log.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("{transition} {} failed: {error}", .phase.as_str())]
pub struct TransitionError {
    pub transition: TransitionKind,
    pub phase: TransitionPhase,
    #[source]
    pub error: EngineError,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub context: ErrorContext,
}

impl TransitionError {
    pub fn new(
        transition: TransitionKind,
        phase: TransitionPhase,
        error: EngineError,
        context: ErrorContext,
    ) -> Self {
        Self {
            transition,
            phase,
            error,
            context,
        }
    }
}

impl LessonError for TransitionError {
    fn severity(&self) -> ErrorSeverity {
        self.error.severity()
    }

    fn context(&self) -> Option<&ErrorContext> {
        Some(&self.context)
    }

    fn error_code(&self) -> &'static str {
        self.error.error_code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn misuse_is_validation_and_data_defects_are_fatal() {
        assert_eq!(EngineError::NoActionPoints.severity(), ErrorSeverity::Validation);
        assert_eq!(EngineError::ZonesOutOfSync.severity(), ErrorSeverity::Internal);
        assert_eq!(
            EngineError::from(OracleError::CardsNotAvailable).severity(),
            ErrorSeverity::Fatal
        );
    }

    #[test]
    fn transition_error_reports_phase_and_context() {
        let error = TransitionError::new(
            TransitionKind::PlayCard,
            TransitionPhase::PreValidate,
            EngineError::CardNotInHand(CardId(3)),
            ErrorContext::new(2, 17),
        );

        assert_eq!(
            error.to_string(),
            "play_card pre_validate failed: card#3 is not in hand"
        );
        assert_eq!(error.context().map(|context| context.result_index), Some(17));
        assert_eq!(error.error_code(), "ENGINE_CARD_NOT_IN_HAND");
    }
}
