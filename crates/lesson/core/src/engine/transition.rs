//! Ordered step lists of every transition.
//!
//! A transition is a fixed array of steps applied in order. Each step records
//! its updates through the [`UpdateRecorder`], which folds them immediately, so
//! a step always observes the lesson left behind by the previous one.

use std::fmt;

use tracing::trace;

use crate::config::LessonConfig;
use crate::effect::calc::to_delta;
use crate::effect::{
    Effect, EffectContext, activate_effects, consume_modifier, cost_updates, decay_over_time,
    positive_impression_score,
};
use crate::env::CardContent;
use crate::state::{
    CardId, CardPlacement, CardSummaryKind, DrinkId, ModifierTag, ReasonKind, UpdateKind,
    UpdateRecorder,
};
use crate::trigger::{
    TriggerEvent, fire_encouragements, fire_memory_effects, fire_modifiers, fire_producer_items,
    increased_modifier_tags,
};
use crate::zones;

use super::errors::EngineError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum StartTurnStep {
    LessonStartTriggers,
    ClearTurnEnded,
    DecayModifiers,
    ResetActionPoints,
    IncreaseTurnNumber,
    Encouragements,
    TurnStartItemTriggers,
    DrawCards,
    TurnStartModifierTriggers,
    MemoryEffects,
    SnapshotModifierIds,
}

pub const START_TURN_STEPS: [StartTurnStep; 11] = [
    StartTurnStep::LessonStartTriggers,
    StartTurnStep::ClearTurnEnded,
    StartTurnStep::DecayModifiers,
    StartTurnStep::ResetActionPoints,
    StartTurnStep::IncreaseTurnNumber,
    StartTurnStep::Encouragements,
    StartTurnStep::TurnStartItemTriggers,
    StartTurnStep::DrawCards,
    StartTurnStep::TurnStartModifierTriggers,
    StartTurnStep::MemoryEffects,
    StartTurnStep::SnapshotModifierIds,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum PlayCardStep {
    ConsumeHandSlot,
    ConsumeCost,
    CountCardUsage,
    EffectPipeline,
    ConsumeActionPoint,
}

pub const PLAY_CARD_STEPS: [PlayCardStep; 5] = [
    PlayCardStep::ConsumeHandSlot,
    PlayCardStep::ConsumeCost,
    PlayCardStep::CountCardUsage,
    PlayCardStep::EffectPipeline,
    PlayCardStep::ConsumeActionPoint,
];

/// One pass of a played card's effect pipeline. Double effect runs it twice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum CardEffectStep {
    BeforeCardTriggers,
    MainEffects,
    AfterCardTriggers,
    ModifierIncreaseTriggers,
}

pub const CARD_EFFECT_STEPS: [CardEffectStep; 4] = [
    CardEffectStep::BeforeCardTriggers,
    CardEffectStep::MainEffects,
    CardEffectStep::AfterCardTriggers,
    CardEffectStep::ModifierIncreaseTriggers,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum UseDrinkStep {
    RemoveDrink,
    DrinkEffects,
}

pub const USE_DRINK_STEPS: [UseDrinkStep; 2] = [UseDrinkStep::RemoveDrink, UseDrinkStep::DrinkEffects];

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum SkipTurnStep {
    ZeroActionPoints,
    RecoverLife,
}

pub const SKIP_TURN_STEPS: [SkipTurnStep; 2] = [SkipTurnStep::ZeroActionPoints, SkipTurnStep::RecoverLife];

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum EndTurnStep {
    TurnEndTriggers,
    DiscardHand,
    PositiveImpressionScore,
    SetTurnEnded,
}

pub const END_TURN_STEPS: [EndTurnStep; 4] = [
    EndTurnStep::TurnEndTriggers,
    EndTurnStep::DiscardHand,
    EndTurnStep::PositiveImpressionScore,
    EndTurnStep::SetTurnEnded,
];

/// Card being played, resolved before the pipeline starts.
#[derive(Clone, Copy, Debug)]
pub(super) struct PlayedCard<'d> {
    pub id: CardId,
    pub content: &'d CardContent,
    pub kind: CardSummaryKind,
}

/// Applies `steps` in order.
pub(super) fn run_steps<'c, S, F>(
    steps: &[S],
    recorder: &mut UpdateRecorder,
    ctx: &mut EffectContext<'c>,
    mut apply: F,
) -> Result<(), EngineError>
where
    S: Copy + fmt::Display,
    F: FnMut(S, &mut UpdateRecorder, &mut EffectContext<'c>) -> Result<(), EngineError>,
{
    for &step in steps {
        let mark = recorder.len();
        apply(step, recorder, ctx)?;
        trace!(%step, recorded = recorder.len() - mark, "step applied");
    }
    Ok(())
}

pub(super) fn start_turn_step(
    step: StartTurnStep,
    recorder: &mut UpdateRecorder,
    ctx: &mut EffectContext<'_>,
) -> Result<(), EngineError> {
    let reason = ReasonKind::TurnStart;
    let lesson = recorder.lesson();
    match step {
        StartTurnStep::LessonStartTriggers => {
            if lesson.turn_number == 0 {
                fire_producer_items(recorder, ctx, &TriggerEvent::LessonStart)?;
            }
        }
        StartTurnStep::ClearTurnEnded => {
            if lesson.turn_ended {
                recorder.record(reason, UpdateKind::TurnEnded { value: false });
            }
        }
        StartTurnStep::DecayModifiers => {
            let updates = decay_over_time(&lesson.idol);
            recorder.record_all(reason, updates);
        }
        StartTurnStep::ResetActionPoints => {
            let delta = i64::from(ctx.config.action_points_per_turn)
                - i64::from(lesson.idol.action_points);
            if delta != 0 {
                recorder.record(
                    reason,
                    UpdateKind::ActionPoints {
                        amount: delta as i32,
                    },
                );
            }
        }
        StartTurnStep::IncreaseTurnNumber => {
            recorder.record(reason, UpdateKind::TurnNumberIncrease);
        }
        StartTurnStep::Encouragements => fire_encouragements(recorder, ctx)?,
        StartTurnStep::TurnStartItemTriggers => {
            fire_producer_items(recorder, ctx, &TriggerEvent::TurnStart)?;
        }
        StartTurnStep::DrawCards => {
            if lesson.is_perfect() {
                return Ok(());
            }
            let mut count = ctx.config.cards_per_turn_draw as usize;
            if lesson.turn_number == 1 {
                let (deck, innate) = zones::innate_first(lesson, ctx.env)?;
                count = count.max(innate.min(LessonConfig::MAX_HAND_SIZE));
                if deck != lesson.deck {
                    recorder.record(
                        reason,
                        UpdateKind::CardPlacement(CardPlacement {
                            deck: Some(deck),
                            ..CardPlacement::default()
                        }),
                    );
                }
            }
            if let Some(update) = zones::draw_updates(recorder.lesson(), count, &mut *ctx.rng) {
                recorder.record(reason, update);
            }
        }
        StartTurnStep::TurnStartModifierTriggers => {
            fire_modifiers(recorder, ctx, &TriggerEvent::TurnStart)?;
        }
        StartTurnStep::MemoryEffects => {
            if lesson.turn_number == 1 {
                fire_memory_effects(recorder, ctx)?;
            }
        }
        StartTurnStep::SnapshotModifierIds => {
            let ids = lesson.idol.modifiers.iter().map(|modifier| modifier.id).collect();
            recorder.record(reason, UpdateKind::ModifierIdsAtTurnStart { ids });
        }
    }
    Ok(())
}

pub(super) fn play_card_step(
    step: PlayCardStep,
    card: PlayedCard<'_>,
    recorder: &mut UpdateRecorder,
    ctx: &mut EffectContext<'_>,
) -> Result<(), EngineError> {
    let reason = ReasonKind::CardUsage(card.id);
    let lesson = recorder.lesson();
    match step {
        PlayCardStep::ConsumeHandSlot => {
            let update = zones::consume_hand_slot(lesson, card.id, card.content.usable_once);
            recorder.record(reason, update);
        }
        PlayCardStep::ConsumeCost => {
            let updates = cost_updates(&lesson.idol, &card.content.cost);
            recorder.record_all(reason, updates);
        }
        PlayCardStep::CountCardUsage => {
            recorder.record(reason, UpdateKind::CardUsageCount { amount: 1 });
        }
        PlayCardStep::EffectPipeline => {
            let double_effects: Vec<_> = lesson
                .idol
                .modifiers
                .iter()
                .filter(|modifier| modifier.tag() == ModifierTag::DoubleEffect)
                .map(|modifier| modifier.id)
                .collect();
            let passes = if double_effects.is_empty() { 1 } else { 2 };
            for id in double_effects {
                recorder.record(reason, UpdateKind::ModifierRemoval { id });
            }
            for _ in 0..passes {
                let mut increased = Vec::new();
                run_steps(&CARD_EFFECT_STEPS, recorder, ctx, |step, recorder, ctx| {
                    let before = (step == CardEffectStep::MainEffects)
                        .then(|| (recorder.lesson().clone(), recorder.len()));
                    card_effect_step(step, card, &increased, recorder, ctx)?;
                    if let Some((lesson, start)) = before {
                        increased = increased_modifier_tags(&lesson, recorder.since(start));
                    }
                    Ok(())
                })?;
            }
        }
        PlayCardStep::ConsumeActionPoint => {
            recorder.record(reason, UpdateKind::ActionPoints { amount: -1 });
            let refund = consume_modifier(
                &recorder.lesson().idol,
                ModifierTag::AdditionalCardUsageCount,
                1,
            );
            if !refund.is_empty() {
                recorder.record_all(reason, refund);
                recorder.record(reason, UpdateKind::ActionPoints { amount: 1 });
            }
        }
    }
    Ok(())
}

fn card_effect_step(
    step: CardEffectStep,
    card: PlayedCard<'_>,
    increased: &[ModifierTag],
    recorder: &mut UpdateRecorder,
    ctx: &mut EffectContext<'_>,
) -> Result<(), EngineError> {
    match step {
        CardEffectStep::BeforeCardTriggers => {
            let event = TriggerEvent::BeforeCardEffect {
                card_kind: card.kind,
            };
            fire_producer_items(recorder, ctx, &event)?;
            fire_modifiers(recorder, ctx, &event)?;
        }
        CardEffectStep::MainEffects => {
            activate_effects(
                recorder,
                ctx,
                &card.content.effects,
                ReasonKind::CardUsage(card.id),
            )?;
        }
        CardEffectStep::AfterCardTriggers => {
            let event = TriggerEvent::AfterCardEffect {
                card_kind: card.kind,
            };
            fire_producer_items(recorder, ctx, &event)?;
        }
        CardEffectStep::ModifierIncreaseTriggers => {
            if !increased.is_empty() {
                let event = TriggerEvent::ModifierIncrease {
                    increased: increased.to_vec(),
                };
                fire_producer_items(recorder, ctx, &event)?;
            }
        }
    }
    Ok(())
}

pub(super) fn use_drink_step(
    step: UseDrinkStep,
    drink_id: DrinkId,
    effects: &[Effect],
    recorder: &mut UpdateRecorder,
    ctx: &mut EffectContext<'_>,
) -> Result<(), EngineError> {
    let reason = ReasonKind::DrinkUsage(drink_id);
    match step {
        UseDrinkStep::RemoveDrink => {
            recorder.record(reason, UpdateKind::DrinkRemoval { drink_id });
        }
        UseDrinkStep::DrinkEffects => activate_effects(recorder, ctx, effects, reason)?,
    }
    Ok(())
}

pub(super) fn skip_turn_step(
    step: SkipTurnStep,
    recorder: &mut UpdateRecorder,
    ctx: &mut EffectContext<'_>,
) -> Result<(), EngineError> {
    let reason = ReasonKind::SkipTurn;
    let idol = &recorder.lesson().idol;
    match step {
        SkipTurnStep::ZeroActionPoints => {
            let action_points = idol.action_points;
            if action_points > 0 {
                recorder.record(
                    reason,
                    UpdateKind::ActionPoints {
                        amount: -to_delta(action_points),
                    },
                );
            }
        }
        SkipTurnStep::RecoverLife => {
            let recovery = ctx.config.skip_turn_life_recovery;
            let room = idol.max_life.saturating_sub(idol.life);
            recorder.record(
                reason,
                UpdateKind::Life {
                    actual: to_delta(recovery.min(room)),
                    max: to_delta(recovery),
                },
            );
        }
    }
    Ok(())
}

pub(super) fn end_turn_step(
    step: EndTurnStep,
    recorder: &mut UpdateRecorder,
    ctx: &mut EffectContext<'_>,
) -> Result<(), EngineError> {
    let reason = ReasonKind::TurnEnd;
    let lesson = recorder.lesson();
    match step {
        EndTurnStep::TurnEndTriggers => {
            fire_producer_items(recorder, ctx, &TriggerEvent::TurnEnd)?;
            fire_modifiers(recorder, ctx, &TriggerEvent::TurnEnd)?;
        }
        EndTurnStep::DiscardHand => {
            if !lesson.is_perfect()
                && let Some(update) = zones::discard_hand(lesson)
            {
                recorder.record(reason, update);
            }
        }
        EndTurnStep::PositiveImpressionScore => {
            if !lesson.is_perfect()
                && let Some(update) = positive_impression_score(lesson)
            {
                recorder.record(reason, update);
            }
        }
        EndTurnStep::SetTurnEnded => {
            recorder.record(reason, UpdateKind::TurnEnded { value: true });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_turn_order_is_fixed() {
        let names: Vec<String> = START_TURN_STEPS.iter().map(ToString::to_string).collect();

        assert_eq!(names.first().map(String::as_str), Some("lesson_start_triggers"));
        assert_eq!(names.last().map(String::as_str), Some("snapshot_modifier_ids"));

        let position = |step| START_TURN_STEPS.iter().position(|s| *s == step);
        assert!(position(StartTurnStep::DecayModifiers) < position(StartTurnStep::IncreaseTurnNumber));
        assert!(position(StartTurnStep::DrawCards) < position(StartTurnStep::TurnStartModifierTriggers));
    }

    #[test]
    fn card_pipeline_runs_main_effects_between_triggers() {
        assert_eq!(
            CARD_EFFECT_STEPS,
            [
                CardEffectStep::BeforeCardTriggers,
                CardEffectStep::MainEffects,
                CardEffectStep::AfterCardTriggers,
                CardEffectStep::ModifierIncreaseTriggers,
            ]
        );
        assert_eq!(PLAY_CARD_STEPS.last(), Some(&PlayCardStep::ConsumeActionPoint));
    }
}
