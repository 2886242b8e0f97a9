//! Timed and counted status effects attached to the idol.
//!
//! A [`Modifier`] pairs a unique instance id with a [`ModifierKind`]. Every kind
//! carries at most one strength field (`amount`, `duration`, `times` or
//! `delay`); the effect-activation kinds carry none and are present or absent.

use super::common::{CardSummaryKind, ModifierId};
use crate::effect::Effect;

/// An active modifier instance.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Modifier {
    pub id: ModifierId,
    pub kind: ModifierKind,
}

impl Modifier {
    pub fn new(id: ModifierId, kind: ModifierKind) -> Self {
        Self { id, kind }
    }

    #[inline]
    pub fn tag(&self) -> ModifierTag {
        self.kind.tag()
    }
}

/// Modifier payload.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ModifierKind {
    // ========================================================================
    // Score multipliers
    // ========================================================================
    /// Score ×1.5 while active.
    GoodCondition { duration: u32 },

    /// Raises the good-condition multiplier while both are active.
    ExcellentCondition { duration: u32 },

    /// Flat score bonus applied before multipliers.
    Focus { amount: u32 },

    /// Score ×(1 + percentage/100) while active. Instances merge per percentage.
    MightyPerformance { duration: u32, percentage: u32 },

    // ========================================================================
    // Resource modifiers
    // ========================================================================
    /// Flat vitality bonus.
    Motivation { amount: u32 },

    /// Converted into score at every turn end.
    PositiveImpression { amount: u32 },

    /// Halves life-paying costs.
    HalfLifeConsumption { duration: u32 },

    /// Doubles life-paying costs.
    DoubleLifeConsumption { duration: u32 },

    /// Flat reduction of life-paying costs.
    LifeConsumptionReduction { amount: u32 },

    /// Zeroes positive vitality gains.
    NoVitalityIncrease { duration: u32 },

    // ========================================================================
    // Counters
    // ========================================================================
    /// Each charge blocks one incoming debuff.
    DebuffProtection { times: u32 },

    /// The next played card runs its effect pipeline twice.
    DoubleEffect { times: u32 },

    /// Each charge refunds the action point of one card play.
    AdditionalCardUsageCount { amount: u32 },

    // ========================================================================
    // Effect carriers
    // ========================================================================
    /// Fires `effect` at the turn start on which `delay` reaches zero.
    DelayedEffect { delay: u32, effect: Box<Effect> },

    /// Fires `effect` at every turn start.
    EffectActivationOnTurnStart { effect: Box<Effect> },

    /// Fires `effect` at every turn end.
    EffectActivationOnTurnEnd { effect: Box<Effect> },

    /// Fires `effect` before each played card's effects (optionally only for one card kind).
    EffectActivationBeforeCardEffect {
        card_kind: Option<CardSummaryKind>,
        effect: Box<Effect>,
    },
}

/// Payload-free discriminant of [`ModifierKind`].
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ModifierTag {
    GoodCondition,
    ExcellentCondition,
    Focus,
    MightyPerformance,
    Motivation,
    PositiveImpression,
    HalfLifeConsumption,
    DoubleLifeConsumption,
    LifeConsumptionReduction,
    NoVitalityIncrease,
    DebuffProtection,
    DoubleEffect,
    AdditionalCardUsageCount,
    DelayedEffect,
    EffectActivationOnTurnStart,
    EffectActivationOnTurnEnd,
    EffectActivationBeforeCardEffect,
}

impl ModifierTag {
    /// Gains of an additive kind merge into an existing matching instance.
    pub const fn is_additive(self) -> bool {
        !matches!(
            self,
            Self::DelayedEffect
                | Self::EffectActivationOnTurnStart
                | Self::EffectActivationOnTurnEnd
                | Self::EffectActivationBeforeCardEffect
        )
    }

    /// Kinds that carry no strength field.
    pub const fn is_binary(self) -> bool {
        matches!(
            self,
            Self::EffectActivationOnTurnStart
                | Self::EffectActivationOnTurnEnd
                | Self::EffectActivationBeforeCardEffect
        )
    }

    /// Kinds whose strength drops by one at every turn start.
    pub const fn decays_over_time(self) -> bool {
        matches!(
            self,
            Self::GoodCondition
                | Self::ExcellentCondition
                | Self::MightyPerformance
                | Self::PositiveImpression
                | Self::HalfLifeConsumption
                | Self::DoubleLifeConsumption
                | Self::NoVitalityIncrease
                | Self::DelayedEffect
        )
    }

    /// Kinds removed as soon as their strength reaches zero.
    ///
    /// A delayed effect at zero stays until the turn-start trigger fires it.
    pub const fn zero_is_terminal(self) -> bool {
        !matches!(self, Self::DelayedEffect) && !self.is_binary()
    }

    /// Kinds blocked by debuff protection.
    pub const fn is_debuff(self) -> bool {
        matches!(self, Self::DoubleLifeConsumption | Self::NoVitalityIncrease)
    }
}

impl ModifierKind {
    pub fn tag(&self) -> ModifierTag {
        match self {
            Self::GoodCondition { .. } => ModifierTag::GoodCondition,
            Self::ExcellentCondition { .. } => ModifierTag::ExcellentCondition,
            Self::Focus { .. } => ModifierTag::Focus,
            Self::MightyPerformance { .. } => ModifierTag::MightyPerformance,
            Self::Motivation { .. } => ModifierTag::Motivation,
            Self::PositiveImpression { .. } => ModifierTag::PositiveImpression,
            Self::HalfLifeConsumption { .. } => ModifierTag::HalfLifeConsumption,
            Self::DoubleLifeConsumption { .. } => ModifierTag::DoubleLifeConsumption,
            Self::LifeConsumptionReduction { .. } => ModifierTag::LifeConsumptionReduction,
            Self::NoVitalityIncrease { .. } => ModifierTag::NoVitalityIncrease,
            Self::DebuffProtection { .. } => ModifierTag::DebuffProtection,
            Self::DoubleEffect { .. } => ModifierTag::DoubleEffect,
            Self::AdditionalCardUsageCount { .. } => ModifierTag::AdditionalCardUsageCount,
            Self::DelayedEffect { .. } => ModifierTag::DelayedEffect,
            Self::EffectActivationOnTurnStart { .. } => ModifierTag::EffectActivationOnTurnStart,
            Self::EffectActivationOnTurnEnd { .. } => ModifierTag::EffectActivationOnTurnEnd,
            Self::EffectActivationBeforeCardEffect { .. } => {
                ModifierTag::EffectActivationBeforeCardEffect
            }
        }
    }

    /// Returns the strength field, or `None` for binary-presence kinds.
    pub fn strength(&self) -> Option<u32> {
        match self {
            Self::GoodCondition { duration }
            | Self::ExcellentCondition { duration }
            | Self::MightyPerformance { duration, .. }
            | Self::HalfLifeConsumption { duration }
            | Self::DoubleLifeConsumption { duration }
            | Self::NoVitalityIncrease { duration } => Some(*duration),
            Self::Focus { amount }
            | Self::Motivation { amount }
            | Self::PositiveImpression { amount }
            | Self::LifeConsumptionReduction { amount }
            | Self::AdditionalCardUsageCount { amount } => Some(*amount),
            Self::DebuffProtection { times } | Self::DoubleEffect { times } => Some(*times),
            Self::DelayedEffect { delay, .. } => Some(*delay),
            Self::EffectActivationOnTurnStart { .. }
            | Self::EffectActivationOnTurnEnd { .. }
            | Self::EffectActivationBeforeCardEffect { .. } => None,
        }
    }

    /// Returns a mutable reference to the strength field.
    pub fn strength_mut(&mut self) -> Option<&mut u32> {
        match self {
            Self::GoodCondition { duration }
            | Self::ExcellentCondition { duration }
            | Self::MightyPerformance { duration, .. }
            | Self::HalfLifeConsumption { duration }
            | Self::DoubleLifeConsumption { duration }
            | Self::NoVitalityIncrease { duration } => Some(duration),
            Self::Focus { amount }
            | Self::Motivation { amount }
            | Self::PositiveImpression { amount }
            | Self::LifeConsumptionReduction { amount }
            | Self::AdditionalCardUsageCount { amount } => Some(amount),
            Self::DebuffProtection { times } | Self::DoubleEffect { times } => Some(times),
            Self::DelayedEffect { delay, .. } => Some(delay),
            Self::EffectActivationOnTurnStart { .. }
            | Self::EffectActivationOnTurnEnd { .. }
            | Self::EffectActivationBeforeCardEffect { .. } => None,
        }
    }

    /// Returns true if a gain of `self` merges into the existing instance `other`.
    ///
    /// Kinds with a sub-key (the percentage of mighty performance) only merge
    /// when the sub-key matches.
    pub fn merges_into(&self, other: &ModifierKind) -> bool {
        if self.tag() != other.tag() || !self.tag().is_additive() {
            return false;
        }
        match (self, other) {
            (
                Self::MightyPerformance { percentage, .. },
                Self::MightyPerformance {
                    percentage: existing,
                    ..
                },
            ) => percentage == existing,
            _ => true,
        }
    }
}
