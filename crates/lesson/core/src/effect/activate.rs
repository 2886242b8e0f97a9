//! Effect dispatch.
//!
//! Each effect kind reads the live lesson from the recorder and records its
//! updates immediately, so the next effect of the same list computes its
//! magnitudes on top of them.

use crate::env::OracleError;
use crate::state::{ReasonKind, UpdateKind, UpdateRecorder};
use crate::zones;

use super::calc::{ceil_percent, score_updates, to_delta, vitality_update};
use super::condition::can_activate;
use super::context::EffectContext;
use super::cost::drain_updates;
use super::modifier::{apply_modifier_gain, consume_modifier, multiply_modifier};
use super::{Effect, EffectKind, ScoreGain};

/// Evaluates an effect list left to right.
///
/// Conditions are checked against the lesson as it was before the list
/// started; magnitudes use the live lesson.
pub fn activate_effects(
    recorder: &mut UpdateRecorder,
    ctx: &mut EffectContext<'_>,
    effects: &[Effect],
    reason: ReasonKind,
) -> Result<(), OracleError> {
    let before = recorder.lesson().clone();
    for effect in effects {
        if let Some(condition) = &effect.condition
            && !can_activate(&before, condition)
        {
            continue;
        }
        activate_effect(recorder, ctx, &effect.kind, reason)?;
    }
    Ok(())
}

/// Evaluates one effect kind unconditionally.
pub fn activate_effect(
    recorder: &mut UpdateRecorder,
    ctx: &mut EffectContext<'_>,
    kind: &EffectKind,
    reason: ReasonKind,
) -> Result<(), OracleError> {
    let lesson = recorder.lesson();
    let updates = match kind {
        EffectKind::Perform { score, vitality } => {
            let mut updates = Vec::new();
            if let Some(gain) = score {
                updates.extend(score_updates(lesson, ctx.config, gain));
            }
            if let Some(gain) = vitality {
                updates.push(vitality_update(lesson, gain));
            }
            updates
        }
        EffectKind::PerformLeveragingVitality {
            percentage,
            reduction_percentage,
        } => {
            let vitality = u64::from(lesson.idol.vitality);
            let base = ceil_percent(vitality, *percentage).min(u64::from(u32::MAX)) as u32;
            let mut updates = score_updates(lesson, ctx.config, &ScoreGain::new(base));
            let reduction = ceil_percent(vitality, *reduction_percentage).min(vitality) as u32;
            if reduction > 0 {
                updates.push(UpdateKind::vitality(-to_delta(reduction)));
            }
            updates
        }
        EffectKind::PerformLeveragingModifier {
            modifier,
            percentage,
            consume,
        } => {
            let strength = lesson.idol.modifier_strength(*modifier);
            let base = ceil_percent(u64::from(strength), *percentage).min(u64::from(u32::MAX));
            let mut updates = score_updates(lesson, ctx.config, &ScoreGain::new(base as u32));
            if *consume {
                updates.extend(consume_modifier(&lesson.idol, *modifier, strength));
            }
            updates
        }
        EffectKind::DrainLife { value } => drain_updates(&lesson.idol, *value),
        EffectKind::RecoverLife { value } => {
            let room = lesson.idol.max_life.saturating_sub(lesson.idol.life);
            vec![UpdateKind::Life {
                actual: to_delta((*value).min(room)),
                max: to_delta(*value),
            }]
        }
        EffectKind::GetModifier { modifier } => {
            apply_modifier_gain(&lesson.idol, modifier, &mut *ctx.ids)
        }
        EffectKind::MultiplyModifier {
            modifier,
            multiplier_percentage,
        } => multiply_modifier(&lesson.idol, *modifier, *multiplier_percentage),
        EffectKind::GenerateCard => zones::generate_card(lesson, ctx)?,
        EffectKind::GenerateTroubleCard => zones::generate_trouble_card(lesson, ctx)?,
        EffectKind::ExchangeHand => {
            let count = lesson.hand.len();
            if let Some(discard) = zones::discard_hand(lesson) {
                recorder.record(reason, discard);
            }
            zones::draw_updates(recorder.lesson(), count, &mut *ctx.rng)
                .into_iter()
                .collect()
        }
        EffectKind::EnhanceHand => zones::enhance_hand(lesson, ctx.env)?,
        EffectKind::DrawCards { amount } => {
            zones::draw_updates(lesson, *amount as usize, &mut *ctx.rng)
                .into_iter()
                .collect()
        }
        EffectKind::IncreaseRemainingTurns { amount } => {
            vec![UpdateKind::RemainingTurnsChange {
                amount: to_delta(*amount),
            }]
        }
    };
    recorder.record_all(reason, updates);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LessonConfig;
    use crate::effect::{Condition, ValueRange, VitalityGain};
    use crate::env::{DataSnapshot, PcgRng, SequentialIds};
    use crate::state::{
        AttributeKind, CardId, Idol, IdolDataId, Lesson, ModifierKind, ModifierTag,
    };

    fn lesson() -> Lesson {
        let mut lesson = Lesson::new(
            Idol::new(IdolDataId::new("idol"), 8, 20),
            vec![AttributeKind::Vocal; 4],
        );
        lesson.turn_number = 1;
        lesson
    }

    fn run(lesson: Lesson, effects: &[Effect]) -> UpdateRecorder {
        let data = DataSnapshot::default();
        let config = LessonConfig::default();
        let mut rng = PcgRng::seeded(11);
        let mut ids = SequentialIds::starting_at(1);
        let mut ctx = EffectContext::new(data.env(), &config, &mut rng, &mut ids);
        let mut recorder = UpdateRecorder::new(lesson, 0);
        activate_effects(&mut recorder, &mut ctx, effects, ReasonKind::CardUsage(CardId(1)))
            .expect("effects activate");
        recorder
    }

    #[test]
    fn perform_records_score_before_vitality() {
        let effect = Effect::new(EffectKind::Perform {
            score: Some(ScoreGain::new(4)),
            vitality: Some(VitalityGain::new(3)),
        });

        let recorder = run(lesson(), &[effect]);

        assert_eq!(
            recorder
                .updates()
                .iter()
                .map(|update| update.kind.clone())
                .collect::<Vec<_>>(),
            vec![UpdateKind::score(4), UpdateKind::vitality(3)]
        );
    }

    #[test]
    fn conditions_see_state_before_list_but_magnitudes_are_live() {
        let effects = [
            Effect::modifier(ModifierKind::GoodCondition { duration: 2 }),
            Effect::score(10).with_condition(Condition::CountModifier {
                modifier: ModifierTag::GoodCondition,
                range: ValueRange::at_least(1),
            }),
            Effect::score(10),
        ];

        let recorder = run(lesson(), &effects);

        // The gated score is skipped; the plain one is multiplied by the new buff.
        assert_eq!(recorder.lesson().score, 15);
    }

    #[test]
    fn leveraging_vitality_converts_and_reduces() {
        let mut lesson = lesson();
        lesson.idol.vitality = 10;
        let effect = Effect::new(EffectKind::PerformLeveragingVitality {
            percentage: 150,
            reduction_percentage: 50,
        });

        let recorder = run(lesson, &[effect]);

        assert_eq!(recorder.lesson().score, 15);
        assert_eq!(recorder.lesson().idol.vitality, 5);
    }

    #[test]
    fn leveraging_modifier_can_consume_it() {
        let mut lesson = lesson();
        lesson.idol.modifiers.push(crate::state::Modifier::new(
            crate::state::ModifierId(9),
            ModifierKind::PositiveImpression { amount: 6 },
        ));
        let effect = Effect::new(EffectKind::PerformLeveragingModifier {
            modifier: ModifierTag::PositiveImpression,
            percentage: 200,
            consume: true,
        });

        let recorder = run(lesson, &[effect]);

        assert_eq!(recorder.lesson().score, 12);
        assert!(recorder.lesson().idol.modifiers.is_empty());
    }

    #[test]
    fn recover_life_is_clamped_to_max() {
        let recorder = run(lesson(), &[Effect::new(EffectKind::RecoverLife { value: 30 })]);

        assert_eq!(recorder.lesson().idol.life, 20);
        assert_eq!(
            recorder.updates()[0].kind,
            UpdateKind::Life {
                actual: 12,
                max: 30
            }
        );
    }

    #[test]
    fn increase_remaining_turns_extends_lesson() {
        let recorder = run(
            lesson(),
            &[Effect::new(EffectKind::IncreaseRemainingTurns { amount: 2 })],
        );

        assert_eq!(recorder.lesson().total_turns(), 6);
    }

    #[test]
    fn exchange_hand_redraws_the_same_count() {
        let mut lesson = lesson();
        lesson.hand = [CardId(1), CardId(2)].into_iter().collect();
        lesson.deck = vec![CardId(3), CardId(4), CardId(5)];

        let recorder = run(lesson, &[Effect::new(EffectKind::ExchangeHand)]);

        assert_eq!(recorder.lesson().hand.as_slice(), &[CardId(3), CardId(4)]);
        assert_eq!(recorder.lesson().discard_pile, vec![CardId(1), CardId(2)]);
        assert_eq!(recorder.lesson().deck, vec![CardId(5)]);
    }
}
