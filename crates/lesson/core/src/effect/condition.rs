//! Conditions for conditional effects.

use crate::state::{Lesson, ModifierTag};

/// Condition gating an effect, a card, or a producer item.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Condition {
    /// Summed strength of a modifier kind lies in range.
    CountModifier {
        modifier: ModifierTag,
        range: ValueRange,
    },

    /// Turns left (current included) are at most `max`.
    RemainingTurns { max: u32 },

    /// Vitality lies in range.
    MeasureVitality { range: ValueRange },

    /// Life is at least half of max life (or below half when false).
    LifeRatio { at_least_half: bool },

    /// Life against max life, or score against the clear threshold, as a percentage.
    MeasureValue {
        target: MeasureTarget,
        criterion: Criterion,
        percentage: u32,
    },
}

/// Inclusive range; missing bounds are open.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ValueRange {
    pub min: Option<u32>,
    pub max: Option<u32>,
}

impl ValueRange {
    pub fn at_least(min: u32) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    pub fn at_most(max: u32) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    pub fn contains(&self, value: u32) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MeasureTarget {
    Life,
    Score,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Criterion {
    GreaterEqual,
    LessEqual,
}

/// Evaluates a condition against a lesson.
///
/// Callers pass the lesson as it was before the enclosing effect list started,
/// not the incrementally updated one.
pub fn can_activate(lesson: &Lesson, condition: &Condition) -> bool {
    let idol = &lesson.idol;
    match condition {
        Condition::CountModifier { modifier, range } => {
            range.contains(idol.modifier_strength(*modifier))
        }
        Condition::RemainingTurns { max } => lesson.remaining_turns() <= *max,
        Condition::MeasureVitality { range } => range.contains(idol.vitality),
        Condition::LifeRatio { at_least_half } => {
            let half_or_more = u64::from(idol.life) * 2 >= u64::from(idol.max_life);
            half_or_more == *at_least_half
        }
        Condition::MeasureValue {
            target,
            criterion,
            percentage,
        } => {
            let (value, reference) = match target {
                MeasureTarget::Life => (idol.life, idol.max_life),
                MeasureTarget::Score => match lesson.clear_score_threshold {
                    Some(threshold) => (lesson.score, threshold),
                    None => return false,
                },
            };
            let scaled_value = u64::from(value) * 100;
            let scaled_reference = u64::from(reference) * u64::from(*percentage);
            match criterion {
                Criterion::GreaterEqual => scaled_value >= scaled_reference,
                Criterion::LessEqual => scaled_value <= scaled_reference,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Idol, IdolDataId, Modifier, ModifierId, ModifierKind};

    fn lesson(life: u32, max_life: u32) -> Lesson {
        Lesson::new(Idol::new(IdolDataId::new("idol"), life, max_life), Vec::new())
    }

    #[test]
    fn count_modifier_sums_strength() {
        let mut lesson = lesson(10, 10);
        lesson.idol.modifiers.push(Modifier::new(
            ModifierId(1),
            ModifierKind::Focus { amount: 4 },
        ));
        let condition = Condition::CountModifier {
            modifier: ModifierTag::Focus,
            range: ValueRange::at_least(3),
        };

        assert!(can_activate(&lesson, &condition));

        lesson.idol.modifiers.clear();
        assert!(!can_activate(&lesson, &condition));
    }

    #[test]
    fn life_ratio_splits_at_half() {
        let above = Condition::LifeRatio {
            at_least_half: true,
        };
        let below = Condition::LifeRatio {
            at_least_half: false,
        };

        assert!(can_activate(&lesson(5, 10), &above));
        assert!(can_activate(&lesson(4, 10), &below));
        assert!(!can_activate(&lesson(4, 10), &above));
    }

    #[test]
    fn score_measure_requires_clear_threshold() {
        let condition = Condition::MeasureValue {
            target: MeasureTarget::Score,
            criterion: Criterion::GreaterEqual,
            percentage: 50,
        };
        let mut lesson = lesson(10, 10);
        lesson.score = 30;

        assert!(!can_activate(&lesson, &condition));

        lesson.clear_score_threshold = Some(60);
        assert!(can_activate(&lesson, &condition));

        lesson.score = 29;
        assert!(!can_activate(&lesson, &condition));
    }

    #[test]
    fn remaining_turns_counts_current_turn() {
        let mut lesson = lesson(10, 10);
        lesson.turns = vec![crate::state::AttributeKind::Vocal; 6];
        lesson.turn_number = 5;

        assert_eq!(lesson.remaining_turns(), 2);
        assert!(can_activate(&lesson, &Condition::RemainingTurns { max: 2 }));
        assert!(!can_activate(&lesson, &Condition::RemainingTurns { max: 1 }));
    }
}
