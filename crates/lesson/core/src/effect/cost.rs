//! Card costs.
//!
//! `normal` costs drain vitality before life, `life` costs drain life only and
//! modifier costs spend the strength of one modifier kind. Life-consumption
//! modifiers scale the first two kinds before payment.

use super::calc::{ceil_percent, to_delta};
use super::modifier::consume_modifier;
use crate::state::{Idol, ModifierTag, UpdateKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Cost {
    pub kind: CostKind,
    pub value: u32,
}

impl Cost {
    pub fn normal(value: u32) -> Self {
        Self {
            kind: CostKind::Normal,
            value,
        }
    }

    pub fn life(value: u32) -> Self {
        Self {
            kind: CostKind::Life,
            value,
        }
    }

    pub fn modifier(tag: ModifierTag, value: u32) -> Self {
        Self {
            kind: CostKind::Modifier(tag),
            value,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CostKind {
    /// Vitality first, remainder from life.
    #[default]
    Normal,
    Life,
    /// Strength of the named modifier kind.
    Modifier(ModifierTag),
}

/// Cost value after life-consumption modifiers.
///
/// Half and double cancel out when both are active; the flat reduction applies
/// last. Modifier costs are never adjusted.
pub fn adjusted_cost_value(idol: &Idol, cost: &Cost) -> u32 {
    if let CostKind::Modifier(_) = cost.kind {
        return cost.value;
    }
    let half = idol.has_modifier(ModifierTag::HalfLifeConsumption);
    let double = idol.has_modifier(ModifierTag::DoubleLifeConsumption);
    let scaled = match (half, double) {
        (true, false) => ceil_percent(u64::from(cost.value), 50),
        (false, true) => u64::from(cost.value) * 2,
        _ => u64::from(cost.value),
    };
    let reduction = u64::from(idol.modifier_strength(ModifierTag::LifeConsumptionReduction));
    scaled.saturating_sub(reduction).min(u64::from(u32::MAX)) as u32
}

/// Returns true if the idol can pay the cost in full.
pub fn can_pay_cost(idol: &Idol, cost: &Cost) -> bool {
    let value = adjusted_cost_value(idol, cost);
    match cost.kind {
        CostKind::Normal => u64::from(idol.vitality) + u64::from(idol.life) >= u64::from(value),
        CostKind::Life => idol.life >= value,
        CostKind::Modifier(tag) => idol.modifier_strength(tag) >= value,
    }
}

/// Updates paying `cost`. Payment stops at zero, so a preview may under-pay.
pub fn cost_updates(idol: &Idol, cost: &Cost) -> Vec<UpdateKind> {
    let value = adjusted_cost_value(idol, cost);
    match cost.kind {
        CostKind::Normal => drain_updates(idol, value),
        CostKind::Life => {
            if value == 0 {
                return Vec::new();
            }
            vec![UpdateKind::Life {
                actual: -to_delta(idol.life.min(value)),
                max: -to_delta(value),
            }]
        }
        CostKind::Modifier(tag) => consume_modifier(idol, tag, value),
    }
}

/// Drains `value` from vitality first, then the remainder from life.
///
/// Each part reports what was taken (`actual`) against what was asked (`max`).
pub fn drain_updates(idol: &Idol, value: u32) -> Vec<UpdateKind> {
    let mut updates = Vec::new();
    if idol.vitality > 0 && value > 0 {
        updates.push(UpdateKind::Vitality {
            actual: -to_delta(idol.vitality.min(value)),
            max: -to_delta(value),
        });
    }
    let remainder = value.saturating_sub(idol.vitality);
    if remainder > 0 {
        updates.push(UpdateKind::Life {
            actual: -to_delta(idol.life.min(remainder)),
            max: -to_delta(remainder),
        });
    }
    updates
}
