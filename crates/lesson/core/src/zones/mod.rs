//! Card zones: deck, hand, discard pile and removed pile.
//!
//! Every function here reads the lesson and returns placement updates; the
//! hand-size cap is enforced by routing overflow into the discard pile.

use tracing::trace;

use crate::config::LessonConfig;
use crate::effect::EffectContext;
use crate::env::{CardContent, LessonEnv, OracleError, RngOracle};
use crate::state::{
    Card, CardEnhancements, CardId, CardPlacement, CardSummaryKind, Lesson, Rarity, UpdateKind,
};

/// Outcome of drawing from a deck backed by a discard pile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrawResult {
    pub drawn: Vec<CardId>,
    pub deck: Vec<CardId>,
    pub discard_pile: Vec<CardId>,
    /// The discard pile was shuffled into the deck during the draw.
    pub deck_rebuilt: bool,
}

/// Fisher-Yates shuffle driven by the injected RNG.
pub fn shuffle<T>(items: &mut [T], rng: &mut dyn RngOracle) {
    for index in (1..items.len()).rev() {
        let other = rng.below(index + 1);
        items.swap(index, other);
    }
}

/// Draws up to `count` cards from the top of `deck`.
///
/// When the deck runs out mid-draw the discard pile is shuffled into it and the
/// draw continues. Never draws more than both piles hold.
pub fn draw_cards(
    deck: &[CardId],
    discard_pile: &[CardId],
    count: usize,
    rng: &mut dyn RngOracle,
) -> DrawResult {
    let mut deck = deck.to_vec();
    let mut discard_pile = discard_pile.to_vec();
    let mut drawn = Vec::with_capacity(count);
    let mut deck_rebuilt = false;

    for _ in 0..count {
        if deck.is_empty() {
            if discard_pile.is_empty() {
                break;
            }
            deck = std::mem::take(&mut discard_pile);
            shuffle(&mut deck, rng);
            deck_rebuilt = true;
        }
        drawn.push(deck.remove(0));
    }

    DrawResult {
        drawn,
        deck,
        discard_pile,
        deck_rebuilt,
    }
}

/// Appends `incoming` to `hand` up to the cap. Returns the new hand and the overflow.
pub fn fill_hand(hand: &[CardId], incoming: &[CardId]) -> (Vec<CardId>, Vec<CardId>) {
    let room = LessonConfig::MAX_HAND_SIZE.saturating_sub(hand.len());
    let split = room.min(incoming.len());
    let mut next = hand.to_vec();
    next.extend_from_slice(&incoming[..split]);
    (next, incoming[split..].to_vec())
}

/// Placement drawing `count` cards into the hand.
///
/// Cards captured in `hand_when_empty_deck` sit out the first reshuffle and
/// stay in the discard pile; they only join a later one once the rest of the
/// discard pile is exhausted. The capture is cleared by a reshuffle and
/// retaken when the deck ends the draw empty.
pub fn draw_updates(lesson: &Lesson, count: usize, rng: &mut dyn RngOracle) -> Option<UpdateKind> {
    let (mut held, reshufflable): (Vec<CardId>, Vec<CardId>) = lesson
        .discard_pile
        .iter()
        .partition(|id| lesson.hand_when_empty_deck.contains(id));
    let mut result = draw_cards(&lesson.deck, &reshufflable, count, rng);
    if result.drawn.len() < count && !held.is_empty() {
        let rest = draw_cards(&result.deck, &held, count - result.drawn.len(), rng);
        result.drawn.extend(rest.drawn);
        result.deck = rest.deck;
        result.discard_pile = rest.discard_pile;
        result.deck_rebuilt = true;
        held = Vec::new();
    }
    if result.drawn.is_empty() {
        return None;
    }

    let mut discard_pile = if result.deck_rebuilt {
        let mut pile = held;
        pile.extend(result.discard_pile);
        pile
    } else {
        lesson.discard_pile.clone()
    };
    let (hand, overflow) = fill_hand(&lesson.hand, &result.drawn);
    discard_pile.extend(overflow);

    let hand_when_empty_deck = if result.deck.is_empty() {
        Some(hand.clone())
    } else if result.deck_rebuilt {
        Some(Vec::new())
    } else {
        None
    };

    trace!(
        drawn = result.drawn.len(),
        rebuilt = result.deck_rebuilt,
        "cards drawn"
    );

    Some(UpdateKind::CardPlacement(CardPlacement {
        deck: Some(result.deck),
        hand: Some(hand),
        discard_pile: Some(discard_pile),
        hand_when_empty_deck,
        ..CardPlacement::default()
    }))
}

/// Playable content of a card instance, or `None` if the card is not in the pool.
pub fn card_content<'a>(
    lesson: &Lesson,
    env: LessonEnv<'a>,
    card_id: CardId,
) -> Result<Option<(&'a CardContent, CardSummaryKind)>, OracleError> {
    let Some(card) = lesson.card(card_id) else {
        return Ok(None);
    };
    let data = env.card(&card.data_id)?;
    Ok(Some((data.content(card.is_enhanced()), data.kind)))
}

/// Moves innate cards to the top of the deck, keeping relative order.
///
/// Returns the reordered deck and the number of innate cards.
pub fn innate_first(lesson: &Lesson, env: LessonEnv<'_>) -> Result<(Vec<CardId>, usize), OracleError> {
    let mut innate = Vec::new();
    let mut rest = Vec::new();
    for &card_id in &lesson.deck {
        match card_content(lesson, env, card_id)? {
            Some((content, _)) if content.innate => innate.push(card_id),
            _ => rest.push(card_id),
        }
    }
    let count = innate.len();
    innate.extend(rest);
    Ok((innate, count))
}

/// Placement moving a played card out of the hand.
pub fn consume_hand_slot(lesson: &Lesson, card_id: CardId, usable_once: bool) -> UpdateKind {
    let hand: Vec<CardId> = lesson
        .hand
        .iter()
        .copied()
        .filter(|id| *id != card_id)
        .collect();
    if usable_once {
        let mut removed_pile = lesson.removed_pile.clone();
        removed_pile.push(card_id);
        UpdateKind::CardPlacement(CardPlacement {
            hand: Some(hand),
            removed_pile: Some(removed_pile),
            ..CardPlacement::default()
        })
    } else {
        let mut discard_pile = lesson.discard_pile.clone();
        discard_pile.push(card_id);
        UpdateKind::CardPlacement(CardPlacement {
            hand: Some(hand),
            discard_pile: Some(discard_pile),
            ..CardPlacement::default()
        })
    }
}

/// Placement moving the whole hand to the discard pile.
pub fn discard_hand(lesson: &Lesson) -> Option<UpdateKind> {
    if lesson.hand.is_empty() {
        return None;
    }
    let mut discard_pile = lesson.discard_pile.clone();
    discard_pile.extend(lesson.hand.iter().copied());
    Some(UpdateKind::CardPlacement(CardPlacement {
        hand: Some(Vec::new()),
        discard_pile: Some(discard_pile),
        ..CardPlacement::default()
    }))
}

/// Adds a random enhanced SSR card to the hand (or the discard pile if full).
pub fn generate_card(lesson: &Lesson, ctx: &mut EffectContext<'_>) -> Result<Vec<UpdateKind>, OracleError> {
    let candidates: Vec<_> = ctx
        .env
        .cards()?
        .all_cards()
        .into_iter()
        .filter(|data| {
            data.rarity == Rarity::Ssr
                && data.kind != CardSummaryKind::Trouble
                && data.id != ctx.config.trouble_card_id
        })
        .collect();
    if candidates.is_empty() {
        return Err(OracleError::NoGeneratableCard);
    }
    let data = candidates[ctx.rng.below(candidates.len())];
    let card = Card::new(CardId(ctx.ids.next_id()), data.id.clone())
        .with_enhancements(CardEnhancements::EFFECT);
    let card_id = card.id;

    let (hand, overflow) = fill_hand(&lesson.hand, &[card_id]);
    let mut placement = CardPlacement {
        hand: Some(hand),
        ..CardPlacement::default()
    };
    if !overflow.is_empty() {
        let mut discard_pile = lesson.discard_pile.clone();
        discard_pile.extend(overflow);
        placement.discard_pile = Some(discard_pile);
    }

    Ok(vec![
        UpdateKind::CardAddition { card },
        UpdateKind::CardPlacement(placement),
    ])
}

/// Inserts the configured trouble card into the deck at a random position.
pub fn generate_trouble_card(
    lesson: &Lesson,
    ctx: &mut EffectContext<'_>,
) -> Result<Vec<UpdateKind>, OracleError> {
    let data = ctx.env.card(&ctx.config.trouble_card_id)?;
    let card = Card::new(CardId(ctx.ids.next_id()), data.id.clone());
    let mut deck = lesson.deck.clone();
    let position = ctx.rng.below(deck.len() + 1);
    deck.insert(position, card.id);

    Ok(vec![
        UpdateKind::CardAddition { card },
        UpdateKind::CardPlacement(CardPlacement {
            deck: Some(deck),
            ..CardPlacement::default()
        }),
    ])
}

/// Marks every card in hand that has no enhancement yet and can be enhanced.
pub fn enhance_hand(lesson: &Lesson, env: LessonEnv<'_>) -> Result<Vec<UpdateKind>, OracleError> {
    let mut updates = Vec::new();
    for &card_id in &lesson.hand {
        let Some(card) = lesson.card(card_id) else {
            continue;
        };
        if card.is_enhanced() || !env.card(&card.data_id)?.can_be_enhanced() {
            continue;
        }
        updates.push(UpdateKind::CardEnhancement {
            card_id,
            enhancements: CardEnhancements::EFFECT,
        });
    }
    Ok(updates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{CardData, DataSnapshot, PcgRng, SequentialIds};
    use crate::state::{CardDataId, Idol, IdolDataId, apply_update};

    fn ids(values: &[u32]) -> Vec<CardId> {
        values.iter().copied().map(CardId).collect()
    }

    fn lesson() -> Lesson {
        Lesson::new(Idol::new(IdolDataId::new("idol"), 10, 10), Vec::new())
    }

    fn card_data(id: &str, rarity: Rarity, kind: CardSummaryKind, enhanceable: bool) -> CardData {
        CardData {
            id: CardDataId::new(id),
            name: id.to_string(),
            rarity,
            kind,
            base: CardContent::default(),
            enhanced: enhanceable.then(CardContent::default),
        }
    }

    #[test]
    fn draw_rebuilds_deck_from_discard() {
        let mut rng = PcgRng::seeded(7);

        let result = draw_cards(&ids(&[1]), &ids(&[2, 3, 4, 5]), 2, &mut rng);

        assert_eq!(result.drawn.len(), 2);
        assert_eq!(result.drawn[0], CardId(1));
        assert!(result.deck_rebuilt);
        assert!(result.discard_pile.is_empty());
        assert_eq!(result.deck.len(), 3);
    }

    #[test]
    fn draw_stops_when_both_piles_are_empty() {
        let mut rng = PcgRng::seeded(1);

        let result = draw_cards(&ids(&[1, 2]), &[], 5, &mut rng);

        assert_eq!(result.drawn, ids(&[1, 2]));
        assert!(!result.deck_rebuilt);
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = PcgRng::seeded(3);
        let mut cards = ids(&[1, 2, 3, 4, 5, 6, 7, 8]);

        shuffle(&mut cards, &mut rng);
        cards.sort();

        assert_eq!(cards, ids(&[1, 2, 3, 4, 5, 6, 7, 8]));
    }

    #[test]
    fn overflow_beyond_hand_cap_is_discarded() {
        let mut lesson = lesson();
        lesson.hand = ids(&[1, 2, 3, 4]).into_iter().collect();
        lesson.deck = ids(&[5, 6, 7]);
        let mut rng = PcgRng::seeded(0);

        let update = draw_updates(&lesson, 3, &mut rng).expect("cards are drawn");
        apply_update(&mut lesson, &update);

        assert_eq!(lesson.hand.as_slice(), ids(&[1, 2, 3, 4, 5]).as_slice());
        assert_eq!(lesson.discard_pile, ids(&[6, 7]));
        assert!(lesson.deck.is_empty());
    }

    #[test]
    fn captured_hand_sits_out_the_reshuffle() {
        let mut lesson = lesson();
        lesson.discard_pile = ids(&[1, 2, 3]);
        lesson.hand_when_empty_deck = ids(&[3]);
        let mut rng = PcgRng::seeded(9);

        let update = draw_updates(&lesson, 1, &mut rng).expect("cards are drawn");
        apply_update(&mut lesson, &update);

        assert_eq!(lesson.hand.len(), 1);
        assert_eq!(lesson.deck.len(), 1);
        assert_eq!(lesson.discard_pile, ids(&[3]));
        assert!(lesson.hand_when_empty_deck.is_empty());
    }

    #[test]
    fn captured_hand_rejoins_once_discard_is_exhausted() {
        let mut lesson = lesson();
        lesson.discard_pile = ids(&[1, 2, 3]);
        lesson.hand_when_empty_deck = ids(&[2, 3]);
        let mut rng = PcgRng::seeded(4);

        let update = draw_updates(&lesson, 3, &mut rng).expect("cards are drawn");
        apply_update(&mut lesson, &update);

        assert_eq!(lesson.hand[0], CardId(1));
        assert_eq!(lesson.hand.len(), 3);
        assert!(lesson.discard_pile.is_empty());
        assert!(lesson.deck.is_empty());
    }

    #[test]
    fn empty_deck_captures_the_hand() {
        let mut lesson = lesson();
        lesson.deck = ids(&[1, 2]);
        let mut rng = PcgRng::seeded(9);

        let update = draw_updates(&lesson, 3, &mut rng).expect("cards are drawn");
        apply_update(&mut lesson, &update);

        assert_eq!(lesson.hand_when_empty_deck, ids(&[1, 2]));
    }

    #[test]
    fn played_card_goes_to_discard_or_removed_pile() {
        let mut lesson = lesson();
        lesson.hand = ids(&[1, 2]).into_iter().collect();

        let discarded = consume_hand_slot(&lesson, CardId(1), false);
        apply_update(&mut lesson, &discarded);
        let removed = consume_hand_slot(&lesson, CardId(2), true);
        apply_update(&mut lesson, &removed);

        assert!(lesson.hand.is_empty());
        assert_eq!(lesson.discard_pile, ids(&[1]));
        assert_eq!(lesson.removed_pile, ids(&[2]));
    }

    #[test]
    fn generated_cards_are_ssr_and_enhanced() {
        let data = DataSnapshot::new(
            vec![
                card_data("common", Rarity::R, CardSummaryKind::Active, true),
                card_data("star", Rarity::Ssr, CardSummaryKind::Mental, true),
                card_data("drowsiness", Rarity::N, CardSummaryKind::Trouble, false),
            ],
            Vec::new(),
            Vec::new(),
            Vec::new(),
        );
        let config = LessonConfig::default();
        let mut rng = PcgRng::seeded(5);
        let mut next_ids = SequentialIds::starting_at(40);
        let mut ctx = EffectContext::new(data.env(), &config, &mut rng, &mut next_ids);
        let mut lesson = lesson();
        lesson.deck = ids(&[1, 2]);

        for update in generate_card(&lesson, &mut ctx).expect("ssr card exists") {
            apply_update(&mut lesson, &update);
        }
        for update in generate_trouble_card(&lesson, &mut ctx).expect("trouble card exists") {
            apply_update(&mut lesson, &update);
        }

        let generated = lesson.card(CardId(40)).expect("card added");
        assert_eq!(generated.data_id, CardDataId::new("star"));
        assert!(generated.enhancements.contains(CardEnhancements::EFFECT));
        assert_eq!(lesson.hand.as_slice(), &[CardId(40)]);

        assert_eq!(lesson.deck.len(), 3);
        assert!(lesson.deck.contains(&CardId(41)));
    }

    #[test]
    fn enhance_hand_skips_enhanced_and_plain_cards() {
        let data = DataSnapshot::new(
            vec![
                card_data("plain", Rarity::R, CardSummaryKind::Active, false),
                card_data("upgradable", Rarity::R, CardSummaryKind::Active, true),
            ],
            Vec::new(),
            Vec::new(),
            Vec::new(),
        );
        let mut lesson = lesson();
        lesson.cards = vec![
            Card::new(CardId(1), CardDataId::new("plain")),
            Card::new(CardId(2), CardDataId::new("upgradable")),
            Card::new(CardId(3), CardDataId::new("upgradable"))
                .with_enhancements(CardEnhancements::ORIGINAL),
        ];
        lesson.hand = ids(&[1, 2, 3]).into_iter().collect();

        let updates = enhance_hand(&lesson, data.env()).expect("definitions exist");

        assert_eq!(
            updates,
            vec![UpdateKind::CardEnhancement {
                card_id: CardId(2),
                enhancements: CardEnhancements::EFFECT
            }]
        );
    }
}
