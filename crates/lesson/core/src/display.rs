//! Read-only projection of a lesson for hosts and UIs.

use crate::engine::{LessonPhase, can_use_card, lesson_phase};
use crate::env::{LessonEnv, OracleError};
use crate::state::{CardDataId, CardId, DrinkDataId, DrinkId, Lesson, ModifierTag};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LessonDisplay {
    pub phase: LessonPhase,
    pub turn_number: u32,
    pub remaining_turns: u32,
    pub life: u32,
    pub max_life: u32,
    pub vitality: u32,
    pub score: u32,
    pub action_points: u32,
    pub clear_score_threshold: Option<u32>,
    pub perfect_score_threshold: Option<u32>,
    pub modifiers: Vec<ModifierDisplay>,
    pub hand: Vec<HandCardDisplay>,
    pub drinks: Vec<DrinkDisplay>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModifierDisplay {
    pub tag: ModifierTag,
    /// `None` for binary-presence modifiers.
    pub strength: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HandCardDisplay {
    pub id: CardId,
    pub data_id: CardDataId,
    pub name: String,
    pub enhanced: bool,
    pub playable: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DrinkDisplay {
    pub id: DrinkId,
    pub data_id: DrinkDataId,
    pub name: String,
}

/// Projects `lesson` into its display form.
///
/// `playable` combines the affordability check with the lifecycle: nothing is
/// playable outside a turn in progress or without action points.
pub fn project(lesson: &Lesson, env: LessonEnv<'_>) -> Result<LessonDisplay, OracleError> {
    let phase = lesson_phase(lesson);
    let can_act = phase == LessonPhase::TurnInProgress && lesson.idol.action_points > 0;

    let mut hand = Vec::with_capacity(lesson.hand.len());
    for &card_id in &lesson.hand {
        let Some(card) = lesson.card(card_id) else {
            continue;
        };
        hand.push(HandCardDisplay {
            id: card_id,
            data_id: card.data_id.clone(),
            name: env.card(&card.data_id)?.name.clone(),
            enhanced: card.is_enhanced(),
            playable: can_act && can_use_card(lesson, env, card_id)?,
        });
    }

    let drinks = lesson
        .drinks
        .iter()
        .map(|drink| {
            Ok(DrinkDisplay {
                id: drink.id,
                data_id: drink.data_id.clone(),
                name: env.drink(&drink.data_id)?.name.clone(),
            })
        })
        .collect::<Result<_, OracleError>>()?;

    let idol = &lesson.idol;
    Ok(LessonDisplay {
        phase,
        turn_number: lesson.turn_number,
        remaining_turns: lesson.remaining_turns(),
        life: idol.life,
        max_life: idol.max_life,
        vitality: idol.vitality,
        score: lesson.score,
        action_points: idol.action_points,
        clear_score_threshold: lesson.clear_score_threshold,
        perfect_score_threshold: lesson.perfect_score_threshold,
        modifiers: idol
            .modifiers
            .iter()
            .map(|modifier| ModifierDisplay {
                tag: modifier.tag(),
                strength: modifier.kind.strength(),
            })
            .collect(),
        hand,
        drinks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::Cost;
    use crate::env::{CardContent, CardData, DataSnapshot};
    use crate::state::{
        AttributeKind, Card, CardSummaryKind, Idol, IdolDataId, Modifier, ModifierId,
        ModifierKind, Rarity,
    };

    #[test]
    fn hand_shows_playability_only_during_turn() {
        let data = DataSnapshot::new(
            vec![CardData {
                id: CardDataId::new("appeal"),
                name: "Appeal".to_string(),
                rarity: Rarity::R,
                kind: CardSummaryKind::Active,
                base: CardContent {
                    cost: Cost::normal(3),
                    ..CardContent::default()
                },
                enhanced: None,
            }],
            Vec::new(),
            Vec::new(),
            Vec::new(),
        );
        let mut lesson = Lesson::new(
            Idol::new(IdolDataId::new("idol"), 10, 12),
            vec![AttributeKind::Visual; 2],
        );
        lesson.cards = vec![Card::new(CardId(1), CardDataId::new("appeal"))];
        lesson.hand = [CardId(1)].into_iter().collect();
        lesson
            .idol
            .modifiers
            .push(Modifier::new(ModifierId(4), ModifierKind::Focus { amount: 2 }));

        let before_start = project(&lesson, data.env()).expect("projection");
        assert_eq!(before_start.phase, LessonPhase::NotStarted);
        assert!(!before_start.hand[0].playable);

        lesson.turn_number = 1;
        lesson.idol.action_points = 1;
        let display = project(&lesson, data.env()).expect("projection");
        assert!(display.hand[0].playable);
        assert_eq!(display.hand[0].name, "Appeal");
        assert_eq!(display.remaining_turns, 2);
        assert_eq!(
            display.modifiers,
            vec![ModifierDisplay {
                tag: ModifierTag::Focus,
                strength: Some(2)
            }]
        );
    }
}
