//! Passive effect dispatch.
//!
//! Producer items, effect-carrying modifiers, encouragements and memory effects
//! fire in named windows of the turn lifecycle. Within a window every candidate
//! is evaluated in list order against the live lesson, so later candidates see
//! what earlier ones recorded.

use std::slice;

use tracing::trace;

use crate::effect::{EffectContext, activate_effects, can_activate};
use crate::env::{OracleError, ProducerItemContent};
use crate::state::{
    CardSummaryKind, Lesson, LessonUpdate, ModifierKind, ModifierTag, ProducerItem, ReasonKind,
    UpdateKind, UpdateRecorder, apply_update,
};

/// Lifecycle window a producer item listens to.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum TriggerWindow {
    LessonStart,
    TurnStart,
    /// Turn start of every even turn.
    TurnStartEveryTwoTurns,
    BeforeCardEffect,
    AfterCardEffect,
    ModifierIncrease,
    TurnEnd,
}

/// A lifecycle moment at which passive effects are evaluated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TriggerEvent {
    LessonStart,
    TurnStart,
    BeforeCardEffect { card_kind: CardSummaryKind },
    AfterCardEffect { card_kind: CardSummaryKind },
    /// Modifier kinds whose strength grew during a card's main effects.
    ModifierIncrease { increased: Vec<ModifierTag> },
    TurnEnd,
}

impl TriggerEvent {
    /// Returns true if an item listening to `window` reacts to this event.
    pub fn opens(&self, window: TriggerWindow, lesson: &Lesson) -> bool {
        match (self, window) {
            (Self::LessonStart, TriggerWindow::LessonStart)
            | (Self::TurnStart, TriggerWindow::TurnStart)
            | (Self::BeforeCardEffect { .. }, TriggerWindow::BeforeCardEffect)
            | (Self::AfterCardEffect { .. }, TriggerWindow::AfterCardEffect)
            | (Self::ModifierIncrease { .. }, TriggerWindow::ModifierIncrease)
            | (Self::TurnEnd, TriggerWindow::TurnEnd) => true,
            (Self::TurnStart, TriggerWindow::TurnStartEveryTwoTurns) => {
                lesson.turn_number % 2 == 0
            }
            _ => false,
        }
    }

    fn card_kind(&self) -> Option<CardSummaryKind> {
        match self {
            Self::BeforeCardEffect { card_kind } | Self::AfterCardEffect { card_kind } => {
                Some(*card_kind)
            }
            _ => None,
        }
    }
}

/// Returns true if `item` should fire for `event` on the current lesson.
pub fn item_is_eligible(
    lesson: &Lesson,
    item: &ProducerItem,
    content: &ProducerItemContent,
    event: &TriggerEvent,
) -> bool {
    let trigger = &content.trigger;
    if !event.opens(trigger.window, lesson) {
        return false;
    }
    if let Some(attribute) = trigger.attribute
        && !lesson.is_clear()
        && lesson.current_attribute() != Some(attribute)
    {
        return false;
    }
    if let (Some(expected), Some(actual)) = (trigger.card_kind, event.card_kind())
        && expected != actual
    {
        return false;
    }
    if let TriggerEvent::ModifierIncrease { increased } = event {
        let matched = match trigger.modifier_kind {
            Some(tag) => increased.contains(&tag),
            None => !increased.is_empty(),
        };
        if !matched {
            return false;
        }
    }
    if let Some(times) = content.times
        && item.activation_count >= times
    {
        return false;
    }
    content
        .condition
        .as_ref()
        .is_none_or(|condition| can_activate(lesson, condition))
}

/// Fires every eligible producer item for `event`, in equip order.
pub fn fire_producer_items(
    recorder: &mut UpdateRecorder,
    ctx: &mut EffectContext<'_>,
    event: &TriggerEvent,
) -> Result<(), OracleError> {
    let item_ids: Vec<_> = recorder
        .lesson()
        .producer_items
        .iter()
        .map(|item| item.id)
        .collect();

    for item_id in item_ids {
        let Some(item) = recorder.lesson().producer_item(item_id).cloned() else {
            continue;
        };
        let content = ctx.env.producer_item(&item.data_id)?.content(item.enhanced);
        if !item_is_eligible(recorder.lesson(), &item, content, event) {
            continue;
        }

        trace!(item = %item_id, data = %item.data_id, ?event, "producer item fired");
        let reason = ReasonKind::ProducerItem(item_id);
        recorder.record(reason, UpdateKind::ProducerItemActivation { item_id });
        activate_effects(recorder, ctx, &content.effects, reason)?;
    }
    Ok(())
}

/// Fires effect-carrying modifiers for `event`.
///
/// At turn start a delayed effect whose delay reached zero is removed and its
/// effect fires; turn-start activations fire every turn. Turn-end and
/// before-card activations fire in their windows.
pub fn fire_modifiers(
    recorder: &mut UpdateRecorder,
    ctx: &mut EffectContext<'_>,
    event: &TriggerEvent,
) -> Result<(), OracleError> {
    let modifiers = recorder.lesson().idol.modifiers.clone();

    for modifier in modifiers {
        let reason = ReasonKind::Modifier(modifier.id);
        let effect = match (&modifier.kind, event) {
            (ModifierKind::DelayedEffect { delay: 0, effect }, TriggerEvent::TurnStart) => {
                recorder.record(reason, UpdateKind::ModifierRemoval { id: modifier.id });
                effect
            }
            (ModifierKind::EffectActivationOnTurnStart { effect }, TriggerEvent::TurnStart)
            | (ModifierKind::EffectActivationOnTurnEnd { effect }, TriggerEvent::TurnEnd) => {
                effect
            }
            (
                ModifierKind::EffectActivationBeforeCardEffect { card_kind, effect },
                TriggerEvent::BeforeCardEffect { card_kind: played },
            ) if card_kind.is_none_or(|kind| kind == *played) => effect,
            _ => continue,
        };

        trace!(modifier = %modifier.id, tag = %modifier.tag(), ?event, "modifier fired");
        activate_effects(recorder, ctx, slice::from_ref(effect.as_ref()), reason)?;
    }
    Ok(())
}

/// Fires the encouragements scheduled for the current turn.
pub fn fire_encouragements(
    recorder: &mut UpdateRecorder,
    ctx: &mut EffectContext<'_>,
) -> Result<(), OracleError> {
    let turn_number = recorder.lesson().turn_number;
    let effects: Vec<_> = recorder
        .lesson()
        .encouragements
        .iter()
        .filter(|encouragement| encouragement.turn == turn_number)
        .map(|encouragement| encouragement.effect.clone())
        .collect();

    for effect in effects {
        trace!(turn = turn_number, "encouragement fired");
        activate_effects(
            recorder,
            ctx,
            slice::from_ref(&effect),
            ReasonKind::Encouragement,
        )?;
    }
    Ok(())
}

/// Rolls every memory effect once. Only meaningful on the first turn.
pub fn fire_memory_effects(
    recorder: &mut UpdateRecorder,
    ctx: &mut EffectContext<'_>,
) -> Result<(), OracleError> {
    let memories = recorder.lesson().memory_effects.clone();

    for memory in memories {
        if !ctx.rng.chance(memory.probability) {
            continue;
        }
        trace!(probability = memory.probability, "memory effect fired");
        activate_effects(
            recorder,
            ctx,
            slice::from_ref(&memory.effect),
            ReasonKind::MemoryEffect,
        )?;
    }
    Ok(())
}

/// Modifier kinds gained or strengthened by `updates`.
///
/// `before` is the lesson the updates were recorded on. The updates are folded
/// one by one so a modifier strengthened and then consumed still counts.
pub fn increased_modifier_tags(before: &Lesson, updates: &[LessonUpdate]) -> Vec<ModifierTag> {
    let mut lesson = before.clone();
    let mut tags = Vec::new();
    for update in updates {
        let tag = match &update.kind {
            UpdateKind::ModifierAddition { modifier } => Some(modifier.tag()),
            UpdateKind::ModifierUpdate { id, delta } if *delta > 0 => {
                lesson.idol.modifier(*id).map(|modifier| modifier.tag())
            }
            _ => None,
        };
        if let Some(tag) = tag
            && !tags.contains(&tag)
        {
            tags.push(tag);
        }
        apply_update(&mut lesson, &update.kind);
    }
    tags
}
