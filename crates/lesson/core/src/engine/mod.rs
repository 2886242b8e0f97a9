//! Turn lifecycle and transition execution pipeline.
//!
//! The [`LessonEngine`] is the only writer of a [`GamePlay`] update log. Every
//! public transition runs the same three phases:
//! pre_validate → apply → post_validate
//!
//! Apply runs the transition's fixed step list through an [`UpdateRecorder`]
//! on a folded copy of the lesson. Updates reach the log only after every
//! phase succeeded, so a failed transition leaves the log untouched.

mod errors;
mod setup;
mod transition;

pub use errors::{EngineError, TransitionError, TransitionKind, TransitionPhase};
pub use setup::{CardEntry, ItemEntry, LessonParams, create_lesson};
pub use transition::{
    CARD_EFFECT_STEPS, CardEffectStep, END_TURN_STEPS, EndTurnStep, PLAY_CARD_STEPS, PlayCardStep,
    SKIP_TURN_STEPS, START_TURN_STEPS, SkipTurnStep, StartTurnStep, USE_DRINK_STEPS, UseDrinkStep,
};

use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::effect::{EffectContext, can_activate, can_pay_cost};
use crate::env::{LessonEnv, OracleError};
use crate::error::ErrorContext;
use crate::state::{CardId, DrinkId, GamePlay, Lesson, LessonUpdate, UpdateRecorder};
use crate::zones;

use transition::{
    PlayedCard, end_turn_step, play_card_step, run_steps, skip_turn_step, start_turn_step,
    use_drink_step,
};

/// Lifecycle state derived from a lesson.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum LessonPhase {
    NotStarted,
    TurnInProgress,
    TurnEnded,
    LessonEnded,
}

/// Perfect score reached, or the final turn is over.
pub fn is_lesson_ended(lesson: &Lesson) -> bool {
    lesson.is_perfect()
        || (lesson.is_final_turn() && lesson.idol.action_points == 0 && lesson.turn_ended)
}

pub fn lesson_phase(lesson: &Lesson) -> LessonPhase {
    if is_lesson_ended(lesson) {
        LessonPhase::LessonEnded
    } else if lesson.turn_number == 0 {
        LessonPhase::NotStarted
    } else if lesson.turn_ended {
        LessonPhase::TurnEnded
    } else {
        LessonPhase::TurnInProgress
    }
}

/// Whether `card_id` may be played now: its condition holds and its cost is affordable.
///
/// Does not check that the card is in hand or that action points are left.
pub fn can_use_card(lesson: &Lesson, env: LessonEnv<'_>, card_id: CardId) -> Result<bool, OracleError> {
    let Some((content, _)) = zones::card_content(lesson, env, card_id)? else {
        return Ok(false);
    };
    let condition_met = content
        .condition
        .as_ref()
        .is_none_or(|condition| can_activate(lesson, condition));
    Ok(condition_met && can_pay_cost(&lesson.idol, &content.cost))
}

/// Updates a card play would record, computed on a throwaway copy.
///
/// Affordability is not checked, so the preview of an unaffordable card shows
/// the cost clamped to what is left. Randomness comes from `ctx`; hosts pass a
/// disposable generator to keep the real sequence untouched.
pub fn preview_card_usage(
    game_play: &GamePlay,
    ctx: &mut EffectContext<'_>,
    card_id: CardId,
) -> Result<Vec<LessonUpdate>, EngineError> {
    let lesson = game_play.lesson();
    require_turn_in_progress(&lesson)?;
    if !lesson.hand.contains(&card_id) {
        return Err(EngineError::CardNotInHand(card_id));
    }
    let card = played_card(&lesson, ctx.env, card_id)?;

    let mut recorder = UpdateRecorder::new(lesson, game_play.next_result_index());
    run_steps(&PLAY_CARD_STEPS, &mut recorder, ctx, |step, recorder, ctx| {
        play_card_step(step, card, recorder, ctx)
    })?;
    Ok(recorder.into_updates())
}

/// Updates appended by one successful transition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionOutcome {
    pub updates: Vec<LessonUpdate>,
    /// Whether the lesson ended with this transition.
    pub lesson_ended: bool,
}

/// Drives a [`GamePlay`] through the turn lifecycle.
pub struct LessonEngine<'a> {
    game_play: &'a mut GamePlay,
}

impl<'a> LessonEngine<'a> {
    pub fn new(game_play: &'a mut GamePlay) -> Self {
        Self { game_play }
    }

    pub fn game_play(&self) -> &GamePlay {
        self.game_play
    }

    pub fn start_turn(
        &mut self,
        ctx: &mut EffectContext<'_>,
    ) -> Result<TransitionOutcome, TransitionError> {
        self.execute(
            TransitionKind::StartTurn,
            ctx,
            |lesson, _| {
                require_not_ended(lesson)?;
                if lesson.turn_number > 0 && !lesson.turn_ended {
                    return Err(EngineError::TurnAlreadyInProgress);
                }
                Ok(())
            },
            |(), recorder, ctx| run_steps(&START_TURN_STEPS, recorder, ctx, start_turn_step),
        )
    }

    pub fn play_card(
        &mut self,
        ctx: &mut EffectContext<'_>,
        card_id: CardId,
    ) -> Result<TransitionOutcome, TransitionError> {
        self.execute(
            TransitionKind::PlayCard,
            ctx,
            |lesson, env| {
                require_turn_in_progress(lesson)?;
                if lesson.idol.action_points == 0 {
                    return Err(EngineError::NoActionPoints);
                }
                if !lesson.hand.contains(&card_id) {
                    return Err(EngineError::CardNotInHand(card_id));
                }
                if !can_use_card(lesson, env, card_id)? {
                    return Err(EngineError::CardNotPlayable(card_id));
                }
                played_card(lesson, env, card_id)
            },
            |card, recorder, ctx| {
                run_steps(&PLAY_CARD_STEPS, recorder, ctx, |step, recorder, ctx| {
                    play_card_step(step, card, recorder, ctx)
                })
            },
        )
    }

    pub fn use_drink(
        &mut self,
        ctx: &mut EffectContext<'_>,
        drink_id: DrinkId,
    ) -> Result<TransitionOutcome, TransitionError> {
        self.execute(
            TransitionKind::UseDrink,
            ctx,
            |lesson, env| {
                require_turn_in_progress(lesson)?;
                let drink = lesson
                    .drink(drink_id)
                    .ok_or(EngineError::DrinkNotCarried(drink_id))?;
                Ok(&env.drink(&drink.data_id)?.effects)
            },
            |effects, recorder, ctx| {
                run_steps(&USE_DRINK_STEPS, recorder, ctx, |step, recorder, ctx| {
                    use_drink_step(step, drink_id, effects, recorder, ctx)
                })
            },
        )
    }

    pub fn skip_turn(
        &mut self,
        ctx: &mut EffectContext<'_>,
    ) -> Result<TransitionOutcome, TransitionError> {
        self.execute(
            TransitionKind::SkipTurn,
            ctx,
            |lesson, _| {
                require_turn_in_progress(lesson)?;
                if lesson.idol.action_points == 0 {
                    return Err(EngineError::NoActionPoints);
                }
                Ok(())
            },
            |(), recorder, ctx| run_steps(&SKIP_TURN_STEPS, recorder, ctx, skip_turn_step),
        )
    }

    pub fn end_turn(
        &mut self,
        ctx: &mut EffectContext<'_>,
    ) -> Result<TransitionOutcome, TransitionError> {
        self.execute(
            TransitionKind::EndTurn,
            ctx,
            |lesson, _| {
                require_turn_in_progress(lesson)?;
                let action_points = lesson.idol.action_points;
                if action_points > 0 && !lesson.is_perfect() {
                    return Err(EngineError::ActionPointsRemaining(action_points));
                }
                Ok(())
            },
            |(), recorder, ctx| run_steps(&END_TURN_STEPS, recorder, ctx, end_turn_step),
        )
    }

    fn execute<'c, T, P, A>(
        &mut self,
        transition: TransitionKind,
        ctx: &mut EffectContext<'c>,
        pre_validate: P,
        apply: A,
    ) -> Result<TransitionOutcome, TransitionError>
    where
        P: FnOnce(&Lesson, LessonEnv<'c>) -> Result<T, EngineError>,
        A: FnOnce(T, &mut UpdateRecorder, &mut EffectContext<'c>) -> Result<(), EngineError>,
    {
        let lesson = self.game_play.lesson();
        let next_result_index = self.game_play.next_result_index();
        let fail = |phase, error: EngineError, turn_number| {
            TransitionError::new(
                transition,
                phase,
                error,
                ErrorContext::new(turn_number, next_result_index),
            )
        };

        let input = pre_validate(&lesson, ctx.env).map_err(|error| {
            warn!(%transition, turn = lesson.turn_number, %error, "transition rejected");
            fail(TransitionPhase::PreValidate, error, lesson.turn_number)
        })?;

        let turn_number = lesson.turn_number;
        let mut recorder = UpdateRecorder::new(lesson, next_result_index);
        apply(input, &mut recorder, ctx)
            .map_err(|error| fail(TransitionPhase::Apply, error, recorder.lesson().turn_number))?;

        post_validate(recorder.lesson())
            .map_err(|error| fail(TransitionPhase::PostValidate, error, turn_number))?;

        let lesson_ended = is_lesson_ended(recorder.lesson());
        let updates = recorder.into_updates();
        debug!(
            %transition,
            turn = turn_number,
            appended = updates.len(),
            lesson_ended,
            "transition applied"
        );
        self.game_play.append(updates.clone());
        Ok(TransitionOutcome {
            updates,
            lesson_ended,
        })
    }
}

fn require_not_ended(lesson: &Lesson) -> Result<(), EngineError> {
    if is_lesson_ended(lesson) {
        return Err(EngineError::LessonEnded);
    }
    Ok(())
}

fn require_turn_in_progress(lesson: &Lesson) -> Result<(), EngineError> {
    require_not_ended(lesson)?;
    if lesson.turn_number == 0 {
        return Err(EngineError::LessonNotStarted);
    }
    if lesson.turn_ended {
        return Err(EngineError::TurnNotInProgress);
    }
    Ok(())
}

fn played_card<'d>(
    lesson: &Lesson,
    env: LessonEnv<'d>,
    card_id: CardId,
) -> Result<PlayedCard<'d>, EngineError> {
    let (content, kind) = zones::card_content(lesson, env, card_id)?
        .ok_or(EngineError::CardMissingFromPool(card_id))?;
    Ok(PlayedCard {
        id: card_id,
        content,
        kind,
    })
}

/// Every pooled card sits in exactly one zone.
fn post_validate(lesson: &Lesson) -> Result<(), EngineError> {
    let pool: BTreeSet<CardId> = lesson.cards.iter().map(|card| card.id).collect();
    let mut seen = BTreeSet::new();
    for card_id in lesson.zoned_card_ids() {
        if !pool.contains(&card_id) {
            return Err(EngineError::CardMissingFromPool(card_id));
        }
        if !seen.insert(card_id) {
            return Err(EngineError::ZonesOutOfSync);
        }
    }
    if seen.len() != pool.len() {
        return Err(EngineError::ZonesOutOfSync);
    }
    Ok(())
}
