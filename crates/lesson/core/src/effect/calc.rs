//! Score and vitality arithmetic.
//!
//! Every multiplicative step rounds up. Score formula:
//!
//! ```text
//! value = base + boost_per_card_used * total_card_usage_count + focus
//! value = ceil(value * (100 + good + excellent_step * excellent) / 100)   if good condition
//! value = ceil(value * (100 + mighty) / 100)                              if mighty performance
//! value = ceil(value * bonus / 100)                                       if score bonus
//! ```

use crate::config::LessonConfig;
use crate::state::{Lesson, ModifierTag, UpdateKind};

use super::{ScoreGain, VitalityGain};

/// `ceil(value * percentage / 100)`.
#[inline]
pub fn ceil_percent(value: u64, percentage: u32) -> u64 {
    (value * u64::from(percentage)).div_ceil(100)
}

/// Saturating conversion of a magnitude into an update delta.
#[inline]
pub(crate) fn to_delta(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Score produced by one evaluation of the formula for `base`.
pub fn score_value(lesson: &Lesson, config: &LessonConfig, base: u32) -> u32 {
    let idol = &lesson.idol;
    let mut value = u64::from(base) + u64::from(idol.modifier_strength(ModifierTag::Focus));

    if idol.has_modifier(ModifierTag::GoodCondition) {
        let excellent = idol.modifier_strength(ModifierTag::ExcellentCondition);
        let percentage = config
            .good_condition_percentage
            .saturating_add(config.excellent_condition_step_percentage.saturating_mul(excellent));
        value = ceil_percent(value, percentage.saturating_add(100));
    }

    let mighty = idol.mighty_performance_percentage();
    if mighty > 0 {
        value = ceil_percent(value, mighty.saturating_add(100));
    }

    if let Some(bonus) = lesson.score_bonus_percentage() {
        value = ceil_percent(value, bonus);
    }

    value.min(u64::from(u32::MAX)) as u32
}

/// Score updates for a score gain, one per repetition.
///
/// The ceiling bounds the running total across repetitions, so later
/// repetitions may be recorded with `actual = 0`.
pub fn score_updates(lesson: &Lesson, config: &LessonConfig, gain: &ScoreGain) -> Vec<UpdateKind> {
    let base = gain.value.saturating_add(
        gain.boost_per_card_used
            .saturating_mul(lesson.idol.total_card_usage_count),
    );
    let mut running = lesson.score;
    (0..gain.times)
        .map(|_| {
            let value = score_value(lesson, config, base);
            capped_score(&mut running, lesson.score_ceiling, value)
        })
        .collect()
}

/// Score update for `value`, capped so the running total stays under `ceiling`.
pub fn capped_score(running: &mut u32, ceiling: Option<u32>, value: u32) -> UpdateKind {
    let actual = match ceiling {
        Some(ceiling) => value.min(ceiling.saturating_sub(*running)),
        None => value,
    };
    *running = running.saturating_add(actual);
    UpdateKind::Score {
        actual: to_delta(actual),
        max: to_delta(value),
    }
}

/// Vitality update for a vitality gain.
///
/// Active "no vitality increase" records the requested gain with `actual = 0`.
pub fn vitality_update(lesson: &Lesson, gain: &VitalityGain) -> UpdateKind {
    let idol = &lesson.idol;
    let value = if gain.fixed_value {
        gain.value
    } else {
        gain.value
            .saturating_add(
                gain.boost_per_card_used
                    .saturating_mul(idol.total_card_usage_count),
            )
            .saturating_add(idol.modifier_strength(ModifierTag::Motivation))
    };
    let actual = if idol.has_modifier(ModifierTag::NoVitalityIncrease) {
        0
    } else {
        value
    };
    UpdateKind::Vitality {
        actual: to_delta(actual),
        max: to_delta(value),
    }
}

/// End-of-turn score converted from positive impression.
///
/// Only the score bonus applies; condition multipliers do not.
pub fn positive_impression_score(lesson: &Lesson) -> Option<UpdateKind> {
    let amount = lesson
        .idol
        .modifier_strength(ModifierTag::PositiveImpression);
    if amount == 0 {
        return None;
    }
    let value = match lesson.score_bonus_percentage() {
        Some(bonus) => ceil_percent(u64::from(amount), bonus),
        None => u64::from(amount),
    };
    let value = value.min(u64::from(u32::MAX)) as u32;
    let mut running = lesson.score;
    Some(capped_score(&mut running, lesson.score_ceiling, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{
        AttributeKind, Idol, IdolDataId, Modifier, ModifierId, ModifierKind, ScoreBonus,
    };

    fn lesson() -> Lesson {
        Lesson::new(
            Idol::new(IdolDataId::new("idol"), 10, 10),
            vec![AttributeKind::Vocal; 3],
        )
    }

    fn add(lesson: &mut Lesson, kind: ModifierKind) {
        let id = ModifierId(lesson.idol.modifiers.len() as u32 + 1);
        lesson.idol.modifiers.push(Modifier::new(id, kind));
    }

    #[test]
    fn good_condition_multiplies_and_rounds_up() {
        let mut lesson = lesson();
        add(&mut lesson, ModifierKind::GoodCondition { duration: 1 });

        let updates = score_updates(&lesson, &LessonConfig::default(), &ScoreGain::new(9));

        assert_eq!(updates, vec![UpdateKind::score(14)]);
    }

    #[test]
    fn focus_is_added_before_multipliers() {
        let mut lesson = lesson();
        add(&mut lesson, ModifierKind::Focus { amount: 3 });
        add(&mut lesson, ModifierKind::GoodCondition { duration: 2 });
        add(&mut lesson, ModifierKind::ExcellentCondition { duration: 1 });

        // (10 + 3) * 1.6 = 20.8
        assert_eq!(score_value(&lesson, &LessonConfig::default(), 10), 21);
    }

    #[test]
    fn excellent_condition_needs_good_condition() {
        let mut lesson = lesson();
        add(&mut lesson, ModifierKind::ExcellentCondition { duration: 3 });

        assert_eq!(score_value(&lesson, &LessonConfig::default(), 10), 10);
    }

    #[test]
    fn mighty_performance_and_bonus_stack() {
        let mut lesson = lesson();
        lesson.turn_number = 1;
        lesson.score_bonus = Some(ScoreBonus::new(150, 100, 100));
        add(
            &mut lesson,
            ModifierKind::MightyPerformance {
                duration: 1,
                percentage: 30,
            },
        );

        // ceil(ceil(7 * 1.3) * 1.5) = ceil(10 * 1.5)
        assert_eq!(score_value(&lesson, &LessonConfig::default(), 7), 15);
    }

    #[test]
    fn ceiling_caps_running_total_across_repetitions() {
        let mut lesson = lesson();
        lesson.score = 5;
        lesson.score_ceiling = Some(20);

        let updates = score_updates(
            &lesson,
            &LessonConfig::default(),
            &ScoreGain::new(10).times(3),
        );

        assert_eq!(
            updates,
            vec![
                UpdateKind::Score {
                    actual: 10,
                    max: 10
                },
                UpdateKind::Score {
                    actual: 5,
                    max: 10
                },
                UpdateKind::Score {
                    actual: 0,
                    max: 10
                },
            ]
        );
    }

    #[test]
    fn usage_boost_adds_to_base() {
        let mut lesson = lesson();
        lesson.idol.total_card_usage_count = 4;
        let gain = ScoreGain {
            boost_per_card_used: 2,
            ..ScoreGain::new(1)
        };

        assert_eq!(
            score_updates(&lesson, &LessonConfig::default(), &gain),
            vec![UpdateKind::score(9)]
        );
    }

    #[test]
    fn vitality_adds_motivation_unless_fixed() {
        let mut lesson = lesson();
        add(&mut lesson, ModifierKind::Motivation { amount: 3 });

        assert_eq!(
            vitality_update(&lesson, &VitalityGain::new(5)),
            UpdateKind::vitality(8)
        );
        assert_eq!(
            vitality_update(&lesson, &VitalityGain::new(5).fixed()),
            UpdateKind::vitality(5)
        );
    }

    #[test]
    fn no_vitality_increase_zeroes_gain() {
        let mut lesson = lesson();
        add(&mut lesson, ModifierKind::NoVitalityIncrease { duration: 2 });

        assert_eq!(
            vitality_update(&lesson, &VitalityGain::new(5)),
            UpdateKind::Vitality { actual: 0, max: 5 }
        );
    }

    #[test]
    fn positive_impression_uses_score_bonus() {
        let mut lesson = lesson();
        lesson.turn_number = 1;
        lesson.score_bonus = Some(ScoreBonus::new(250, 100, 100));

        assert_eq!(positive_impression_score(&lesson), None);

        add(&mut lesson, ModifierKind::PositiveImpression { amount: 3 });
        assert_eq!(
            positive_impression_score(&lesson),
            Some(UpdateKind::score(8))
        );
    }
}
