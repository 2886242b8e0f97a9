use super::{LessonUpdate, UpdateKind};
use crate::config::LessonConfig;
use crate::state::types::Lesson;

/// Folds `updates` over `lesson` in list order.
pub fn patch(lesson: &Lesson, updates: &[LessonUpdate]) -> Lesson {
    let mut next = lesson.clone();
    for update in updates {
        apply_update(&mut next, &update.kind);
    }
    next
}

/// One past the highest result index in the log, or 0 for an empty log.
pub fn next_result_index(updates: &[LessonUpdate]) -> u32 {
    updates
        .iter()
        .map(|update| update.reason.result_index + 1)
        .max()
        .unwrap_or(0)
}

/// Applies one update in place.
///
/// Every rule is pure and total: an update that names a missing modifier, card
/// or item is a no-op.
pub fn apply_update(lesson: &mut Lesson, kind: &UpdateKind) {
    match kind {
        UpdateKind::Life { actual, .. } => {
            let idol = &mut lesson.idol;
            idol.life = add_clamped(idol.life, *actual, idol.max_life);
        }
        UpdateKind::Vitality { actual, .. } => {
            lesson.idol.vitality = add_clamped(lesson.idol.vitality, *actual, u32::MAX);
        }
        UpdateKind::Score { actual, .. } => {
            lesson.score = add_clamped(lesson.score, *actual, u32::MAX);
        }
        UpdateKind::ActionPoints { amount } => {
            lesson.idol.action_points = add_clamped(lesson.idol.action_points, *amount, u32::MAX);
        }
        UpdateKind::ModifierAddition { modifier } => {
            lesson.idol.modifiers.push(modifier.clone());
        }
        UpdateKind::ModifierUpdate { id, delta } => {
            if let Some(strength) = lesson
                .idol
                .modifier_mut(*id)
                .and_then(|modifier| modifier.kind.strength_mut())
            {
                *strength = add_clamped(*strength, *delta, u32::MAX);
            }
        }
        UpdateKind::ModifierRemoval { id } => {
            lesson.idol.modifiers.retain(|modifier| modifier.id != *id);
        }
        UpdateKind::ModifierIdsAtTurnStart { ids } => {
            lesson.idol.modifier_ids_at_turn_start = ids.clone();
        }
        UpdateKind::CardPlacement(placement) => {
            if let Some(deck) = &placement.deck {
                lesson.deck = deck.clone();
            }
            if let Some(hand) = &placement.hand {
                lesson.hand = hand.iter().copied().take(LessonConfig::MAX_HAND_SIZE).collect();
            }
            if let Some(discard_pile) = &placement.discard_pile {
                lesson.discard_pile = discard_pile.clone();
            }
            if let Some(removed_pile) = &placement.removed_pile {
                lesson.removed_pile = removed_pile.clone();
            }
            if let Some(hand_when_empty_deck) = &placement.hand_when_empty_deck {
                lesson.hand_when_empty_deck = hand_when_empty_deck.clone();
            }
        }
        UpdateKind::CardAddition { card } => {
            lesson.cards.push(card.clone());
        }
        UpdateKind::CardEnhancement {
            card_id,
            enhancements,
        } => {
            if let Some(card) = lesson.card_mut(*card_id) {
                card.enhancements |= *enhancements;
            }
        }
        UpdateKind::TurnNumberIncrease => {
            lesson.turn_number += 1;
        }
        UpdateKind::RemainingTurnsChange { amount } => {
            lesson.remaining_turns_change += amount;
        }
        UpdateKind::TurnEnded { value } => {
            lesson.turn_ended = *value;
        }
        UpdateKind::CardUsageCount { amount } => {
            lesson.idol.total_card_usage_count += amount;
        }
        UpdateKind::ProducerItemActivation { item_id } => {
            if let Some(item) = lesson
                .producer_items
                .iter_mut()
                .find(|item| item.id == *item_id)
            {
                item.activation_count += 1;
            }
        }
        UpdateKind::DrinkRemoval { drink_id } => {
            lesson.drinks.retain(|drink| drink.id != *drink_id);
        }
    }
}

fn add_clamped(value: u32, delta: i32, max: u32) -> u32 {
    (i64::from(value) + i64::from(delta)).clamp(0, i64::from(max)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::delta::{CardPlacement, ReasonKind, UpdateReason};
    use crate::state::types::{CardId, Idol, IdolDataId, Modifier, ModifierId, ModifierKind};

    fn lesson() -> Lesson {
        Lesson::new(Idol::new(IdolDataId::new("idol"), 10, 10), Vec::new())
    }

    fn update(result_index: u32, kind: UpdateKind) -> LessonUpdate {
        LessonUpdate {
            kind,
            reason: UpdateReason {
                turn_number: 1,
                result_index,
                kind: ReasonKind::TurnStart,
            },
        }
    }

    #[test]
    fn resource_updates_respect_floors_and_ceilings() {
        let updates = vec![
            update(0, UpdateKind::life(-15)),
            update(1, UpdateKind::vitality(-3)),
            update(2, UpdateKind::life(25)),
        ];

        let folded = patch(&lesson(), &updates);

        assert_eq!(folded.idol.life, 10);
        assert_eq!(folded.idol.vitality, 0);
    }

    #[test]
    fn modifier_updates_add_to_strength_field() {
        let modifier = Modifier::new(ModifierId(7), ModifierKind::Focus { amount: 2 });
        let updates = vec![
            update(0, UpdateKind::ModifierAddition { modifier }),
            update(
                1,
                UpdateKind::ModifierUpdate {
                    id: ModifierId(7),
                    delta: 3,
                },
            ),
        ];

        let folded = patch(&lesson(), &updates);

        assert_eq!(
            folded.idol.modifiers[0].kind,
            ModifierKind::Focus { amount: 5 }
        );
    }

    #[test]
    fn card_placement_replaces_only_named_zones() {
        let mut base = lesson();
        base.discard_pile = vec![CardId(9)];
        let placement = CardPlacement {
            deck: Some(vec![CardId(1), CardId(2)]),
            hand: Some(vec![CardId(3)]),
            ..CardPlacement::default()
        };

        let folded = patch(&base, &[update(0, UpdateKind::CardPlacement(placement))]);

        assert_eq!(folded.deck, vec![CardId(1), CardId(2)]);
        assert_eq!(folded.hand.as_slice(), &[CardId(3)]);
        assert_eq!(folded.discard_pile, vec![CardId(9)]);
    }

    #[test]
    fn hand_placement_is_capped_at_the_hand_size() {
        let placement = CardPlacement {
            hand: Some((1..=7).map(CardId).collect()),
            ..CardPlacement::default()
        };

        let folded = patch(&lesson(), &[update(0, UpdateKind::CardPlacement(placement))]);

        assert_eq!(folded.hand.len(), LessonConfig::MAX_HAND_SIZE);
        assert_eq!(folded.hand[4], CardId(5));
    }

    #[test]
    fn folding_is_repeatable() {
        let updates = vec![
            update(0, UpdateKind::score(12)),
            update(1, UpdateKind::TurnNumberIncrease),
        ];
        let base = lesson();

        assert_eq!(patch(&base, &updates), patch(&base, &updates));
        assert_eq!(next_result_index(&updates), 2);
        assert_eq!(next_result_index(&[]), 0);
    }
}
