//! Effect evaluation.
//!
//! An [`Effect`] is the smallest unit of lesson behavior: cards, drinks,
//! producer items, encouragements, memories and effect-carrying modifiers all
//! resolve to effect lists. Evaluation is split by concern:
//!
//! - [`condition`]: gates evaluated against the lesson before a list starts
//! - [`cost`]: card costs and the life-consumption modifiers that scale them
//! - [`calc`]: score and vitality arithmetic
//! - [`modifier`]: merge, consume and decay rules for modifiers
//! - [`activate`]: dispatch from effect kind to recorded updates
pub mod activate;
pub mod calc;
pub mod condition;
pub mod context;
pub mod cost;
pub mod modifier;

pub use activate::{activate_effect, activate_effects};
pub use calc::{positive_impression_score, score_updates, score_value, vitality_update};
pub use condition::{Condition, Criterion, MeasureTarget, ValueRange, can_activate};
pub use context::EffectContext;
pub use cost::{Cost, CostKind, adjusted_cost_value, can_pay_cost, cost_updates, drain_updates};
pub use modifier::{apply_modifier_gain, consume_modifier, decay_over_time, multiply_modifier};

use crate::state::{ModifierKind, ModifierTag};

/// A conditional unit of lesson behavior.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Effect {
    pub kind: EffectKind,
    /// Skips the effect when false against the lesson before the list started.
    #[cfg_attr(feature = "serde", serde(default))]
    pub condition: Option<Condition>,
}

impl Effect {
    pub fn new(kind: EffectKind) -> Self {
        Self {
            kind,
            condition: None,
        }
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn score(value: u32) -> Self {
        Self::new(EffectKind::Perform {
            score: Some(ScoreGain::new(value)),
            vitality: None,
        })
    }

    pub fn vitality(value: u32) -> Self {
        Self::new(EffectKind::Perform {
            score: None,
            vitality: Some(VitalityGain::new(value)),
        })
    }

    pub fn modifier(modifier: ModifierKind) -> Self {
        Self::new(EffectKind::GetModifier { modifier })
    }
}

impl From<EffectKind> for Effect {
    fn from(kind: EffectKind) -> Self {
        Self::new(kind)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EffectKind {
    /// Score and/or vitality gain. Score is recorded before vitality.
    Perform {
        #[cfg_attr(feature = "serde", serde(default))]
        score: Option<ScoreGain>,
        #[cfg_attr(feature = "serde", serde(default))]
        vitality: Option<VitalityGain>,
    },

    /// Score worth `percentage` of current vitality, then vitality loses
    /// `reduction_percentage` of itself.
    PerformLeveragingVitality {
        percentage: u32,
        #[cfg_attr(feature = "serde", serde(default))]
        reduction_percentage: u32,
    },

    /// Score worth `percentage` of a modifier's strength, optionally consuming it.
    PerformLeveragingModifier {
        modifier: ModifierTag,
        percentage: u32,
        #[cfg_attr(feature = "serde", serde(default))]
        consume: bool,
    },

    /// Pays from vitality first and the rest from life.
    DrainLife { value: u32 },

    RecoverLife { value: u32 },

    GetModifier { modifier: ModifierKind },

    /// Scales a modifier's strength, rounding up.
    MultiplyModifier {
        modifier: ModifierTag,
        multiplier_percentage: u32,
    },

    /// Adds an enhanced SSR card to the hand.
    GenerateCard,

    /// Shuffles the configured trouble card into the deck.
    GenerateTroubleCard,

    /// Discards the hand and draws as many cards.
    ExchangeHand,

    /// Enhances every unenhanced card in hand.
    EnhanceHand,

    DrawCards { amount: u32 },

    IncreaseRemainingTurns { amount: u32 },
}

/// Score part of a perform effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreGain {
    pub value: u32,
    /// The formula is evaluated independently this many times.
    #[cfg_attr(feature = "serde", serde(default = "ScoreGain::default_times"))]
    pub times: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub boost_per_card_used: u32,
}

impl ScoreGain {
    pub fn new(value: u32) -> Self {
        Self {
            value,
            times: Self::default_times(),
            boost_per_card_used: 0,
        }
    }

    pub fn times(mut self, times: u32) -> Self {
        self.times = times;
        self
    }

    fn default_times() -> u32 {
        1
    }
}

/// Vitality part of a perform effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VitalityGain {
    pub value: u32,
    /// Ignores motivation and usage boosts.
    #[cfg_attr(feature = "serde", serde(default))]
    pub fixed_value: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub boost_per_card_used: u32,
}

impl VitalityGain {
    pub fn new(value: u32) -> Self {
        Self {
            value,
            fixed_value: false,
            boost_per_card_used: 0,
        }
    }

    pub fn fixed(mut self) -> Self {
        self.fixed_value = true;
        self
    }
}
