use lesson_core::{
    AttributeKind, Card, CardContent, CardData, CardDataId, CardId, CardSummaryKind, Cost,
    DataSnapshot, Drink, DrinkData, DrinkDataId, DrinkId, Effect, EffectContext, EffectKind,
    EngineError,
    GamePlay, Idol, IdolDataId, ItemTrigger, Lesson, LessonConfig, LessonEngine, LessonPhase,
    Modifier, ModifierId, ModifierKind, ModifierTag, PcgRng, ProducerItem, ProducerItemContent,
    ProducerItemData, ProducerItemDataId, ProducerItemId, Rarity, ReasonKind, SequentialIds,
    TransitionError, TransitionOutcome, TriggerWindow, UpdateKind, lesson_phase,
};

fn card(id: &str, cost: Cost, effects: Vec<Effect>) -> CardData {
    CardData {
        id: CardDataId::new(id),
        name: id.to_string(),
        rarity: Rarity::R,
        kind: CardSummaryKind::Active,
        base: CardContent {
            cost,
            effects,
            ..CardContent::default()
        },
        enhanced: None,
    }
}

fn catalog() -> DataSnapshot {
    let mut opener = card("opener", Cost::normal(0), vec![Effect::score(1)]);
    opener.base.innate = true;
    let burst = card(
        "burst",
        Cost::normal(0),
        vec![
            Effect::modifier(ModifierKind::Focus { amount: 3 }),
            Effect::new(EffectKind::PerformLeveragingModifier {
                modifier: ModifierTag::Focus,
                percentage: 100,
                consume: true,
            }),
        ],
    );
    DataSnapshot::new(
        vec![
            card("appeal", Cost::normal(0), vec![Effect::score(9)]),
            card("steady", Cost::normal(0), vec![Effect::score(10)]),
            card("strain", Cost::normal(5), vec![Effect::score(1)]),
            opener,
            burst,
        ],
        vec![
            ProducerItemData {
                id: ProducerItemDataId::new("towel"),
                name: "Towel".to_string(),
                base: ProducerItemContent {
                    trigger: ItemTrigger::new(TriggerWindow::TurnStart),
                    condition: None,
                    effects: vec![Effect::vitality(2)],
                    times: Some(1),
                },
                enhanced: None,
            },
            ProducerItemData {
                id: ProducerItemDataId::new("pin"),
                name: "Pin".to_string(),
                base: ProducerItemContent {
                    trigger: ItemTrigger::new(TriggerWindow::ModifierIncrease)
                        .with_modifier_kind(ModifierTag::Focus),
                    condition: None,
                    effects: vec![Effect::vitality(1)],
                    times: None,
                },
                enhanced: None,
            },
        ],
        vec![DrinkData {
            id: DrinkDataId::new("tea"),
            name: "Tea".to_string(),
            effects: vec![Effect::modifier(ModifierKind::Focus { amount: 3 })],
        }],
        Vec::new(),
    )
}

/// Lesson over `turns` vocal turns whose pool is `cards` in deck order.
fn lesson(turns: usize, cards: &[&str]) -> Lesson {
    let mut lesson = Lesson::new(
        Idol::new(IdolDataId::new("idol"), 20, 20),
        vec![AttributeKind::Vocal; turns],
    );
    for (index, data_id) in cards.iter().enumerate() {
        let id = CardId(index as u32 + 1);
        lesson.cards.push(Card::new(id, CardDataId::new(*data_id)));
        lesson.deck.push(id);
    }
    lesson
}

struct Harness {
    data: DataSnapshot,
    config: LessonConfig,
    rng: PcgRng,
    ids: SequentialIds,
    game_play: GamePlay,
}

impl Harness {
    fn new(lesson: Lesson) -> Self {
        Self {
            data: catalog(),
            config: LessonConfig::default(),
            rng: PcgRng::seeded(42),
            ids: SequentialIds::starting_at(1000),
            game_play: GamePlay::new(lesson),
        }
    }

    fn run(
        &mut self,
        transition: impl FnOnce(
            &mut LessonEngine<'_>,
            &mut EffectContext<'_>,
        ) -> Result<TransitionOutcome, TransitionError>,
    ) -> Result<TransitionOutcome, TransitionError> {
        let mut ctx = EffectContext::new(
            self.data.env(),
            &self.config,
            &mut self.rng,
            &mut self.ids,
        );
        transition(&mut LessonEngine::new(&mut self.game_play), &mut ctx)
    }

    fn start_turn(&mut self) -> TransitionOutcome {
        self.run(|engine, ctx| engine.start_turn(ctx))
            .expect("start turn")
    }

    fn play(&mut self, card_id: CardId) -> TransitionOutcome {
        self.run(|engine, ctx| engine.play_card(ctx, card_id))
            .expect("play card")
    }

    fn end_turn(&mut self) -> TransitionOutcome {
        self.run(|engine, ctx| engine.end_turn(ctx))
            .expect("end turn")
    }

    fn lesson(&self) -> Lesson {
        self.game_play.lesson()
    }
}

#[test]
fn good_condition_scales_score_with_ceiling_rounding() {
    let mut lesson = lesson(3, &["appeal", "appeal", "appeal"]);
    lesson.idol.modifiers.push(Modifier::new(
        ModifierId(50),
        ModifierKind::GoodCondition { duration: 3 },
    ));
    let mut harness = Harness::new(lesson);

    harness.start_turn();
    harness.play(CardId(1));

    // ceil(9 * 1.5) = 14
    assert_eq!(harness.lesson().score, 14);
}

#[test]
fn normal_cost_drains_vitality_before_life() {
    let mut lesson = lesson(3, &["strain", "appeal", "appeal"]);
    lesson.idol.vitality = 3;
    lesson.idol.life = 10;
    let mut harness = Harness::new(lesson);

    harness.start_turn();
    let outcome = harness.play(CardId(1));

    let costs: Vec<_> = outcome
        .updates
        .iter()
        .filter(|update| {
            matches!(
                update.kind,
                UpdateKind::Vitality { .. } | UpdateKind::Life { .. }
            )
        })
        .map(|update| update.kind.clone())
        .collect();
    assert_eq!(
        costs,
        vec![
            UpdateKind::Vitality {
                actual: -3,
                max: -5
            },
            UpdateKind::Life {
                actual: -2,
                max: -2
            },
        ]
    );
    let idol = harness.lesson().idol;
    assert_eq!((idol.vitality, idol.life), (0, 8));
}

#[test]
fn lesson_ends_only_after_final_end_turn() {
    let mut lesson = lesson(3, &["steady", "steady", "steady"]);
    lesson.clear_score_threshold = Some(25);
    let mut harness = Harness::new(lesson);

    for turn in 1..=3 {
        harness.start_turn();
        let hand = harness.lesson().hand.clone();
        assert_eq!(hand.len(), 3, "turn {turn} draws a full hand");

        let played = harness.play(hand[0]);
        assert!(!played.lesson_ended);

        let ended = harness.end_turn();
        assert_eq!(ended.lesson_ended, turn == 3);
    }

    let lesson = harness.lesson();
    assert_eq!(lesson.score, 30);
    assert!(lesson.is_clear());
    assert_eq!(lesson_phase(&lesson), LessonPhase::LessonEnded);

    let error = harness
        .run(|engine, ctx| engine.start_turn(ctx))
        .expect_err("lesson over");
    assert_eq!(error.error, EngineError::LessonEnded);
}

#[test]
fn perfect_score_ends_lesson_mid_turn() {
    let mut lesson = lesson(3, &["steady", "steady", "steady"]);
    lesson.perfect_score_threshold = Some(10);
    let mut harness = Harness::new(lesson);

    harness.start_turn();
    let outcome = harness.play(CardId(1));

    assert!(outcome.lesson_ended);
    let error = harness
        .run(|engine, ctx| engine.end_turn(ctx))
        .expect_err("lesson over");
    assert_eq!(error.error, EngineError::LessonEnded);
}

#[test]
fn double_effect_repeats_the_card_once_and_is_removed() {
    let mut lesson = lesson(2, &["steady", "steady", "steady"]);
    lesson.idol.modifiers.push(Modifier::new(
        ModifierId(7),
        ModifierKind::DoubleEffect { times: 2 },
    ));
    let mut harness = Harness::new(lesson);

    harness.start_turn();
    harness.play(CardId(1));

    let lesson = harness.lesson();
    assert_eq!(lesson.score, 20);
    assert!(!lesson.idol.has_modifier(ModifierTag::DoubleEffect));
}

#[test]
fn additional_card_usage_refunds_the_action_point() {
    let mut lesson = lesson(2, &["steady", "steady", "steady"]);
    lesson.idol.modifiers.push(Modifier::new(
        ModifierId(8),
        ModifierKind::AdditionalCardUsageCount { amount: 1 },
    ));
    let mut harness = Harness::new(lesson);

    harness.start_turn();
    harness.play(CardId(1));
    assert_eq!(harness.lesson().idol.action_points, 1);

    harness.play(CardId(2));
    let lesson = harness.lesson();
    assert_eq!(lesson.idol.action_points, 0);
    assert_eq!(lesson.score, 20);
    assert!(!lesson.idol.has_modifier(ModifierTag::AdditionalCardUsageCount));
}

#[test]
fn producer_item_fires_within_its_budget() {
    let mut lesson = lesson(3, &["steady", "steady", "steady"]);
    lesson.producer_items.push(ProducerItem::new(
        ProducerItemId(1),
        ProducerItemDataId::new("towel"),
        false,
    ));
    let mut harness = Harness::new(lesson);

    let first = harness.start_turn();
    assert!(first.updates.iter().any(|update| update.reason.kind
        == ReasonKind::ProducerItem(ProducerItemId(1))));
    assert_eq!(harness.lesson().idol.vitality, 2);

    harness.run(|engine, ctx| engine.skip_turn(ctx)).expect("skip");
    harness.end_turn();
    let second = harness.start_turn();

    assert!(second.updates.iter().all(|update| update.reason.kind
        != ReasonKind::ProducerItem(ProducerItemId(1))));
    assert_eq!(harness.lesson().producer_items[0].activation_count, 1);
}

#[test]
fn drink_is_consumed_and_applies_its_effects() {
    let mut lesson = lesson(2, &["appeal", "appeal", "appeal"]);
    lesson
        .drinks
        .push(Drink::new(DrinkId(1), DrinkDataId::new("tea")));
    let mut harness = Harness::new(lesson);

    harness.start_turn();
    harness
        .run(|engine, ctx| engine.use_drink(ctx, DrinkId(1)))
        .expect("use drink");
    harness.play(CardId(1));

    let lesson = harness.lesson();
    assert!(lesson.drinks.is_empty());
    // focus is added before multipliers: 9 + 3
    assert_eq!(lesson.score, 12);

    let error = harness
        .run(|engine, ctx| engine.use_drink(ctx, DrinkId(1)))
        .expect_err("drink already used");
    assert_eq!(error.error, EngineError::DrinkNotCarried(DrinkId(1)));
}

#[test]
fn score_ceiling_clamps_the_actual_gain() {
    let mut lesson = lesson(2, &["steady", "steady", "steady"]);
    lesson.score = 15;
    lesson.score_ceiling = Some(20);
    let mut harness = Harness::new(lesson);

    harness.start_turn();
    let outcome = harness.play(CardId(1));

    assert!(outcome.updates.iter().any(|update| update.kind
        == UpdateKind::Score {
            actual: 5,
            max: 10
        }));
    assert_eq!(harness.lesson().score, 20);
}

#[test]
fn zones_always_partition_the_card_pool() {
    let mut harness = Harness::new(lesson(
        4,
        &["steady", "appeal", "steady", "appeal", "steady", "appeal", "steady"],
    ));

    for _ in 0..4 {
        harness.start_turn();
        let hand = harness.lesson().hand.clone();
        harness.play(hand[0]);
        harness.end_turn();

        let lesson = harness.lesson();
        let mut zoned: Vec<_> = lesson.zoned_card_ids().collect();
        zoned.sort();
        let pool: Vec<_> = lesson.cards.iter().map(|card| card.id).collect();
        assert_eq!(zoned, pool);
    }
}

#[test]
fn skip_turn_requires_an_action_point() {
    let mut lesson = lesson(3, &["steady", "steady", "steady"]);
    lesson.idol.life = 10;
    let mut harness = Harness::new(lesson);

    harness.start_turn();
    harness.play(CardId(1));
    let logged = harness.game_play.updates().len();

    let error = harness
        .run(|engine, ctx| engine.skip_turn(ctx))
        .expect_err("no action points left");

    assert_eq!(error.error, EngineError::NoActionPoints);
    assert_eq!(harness.game_play.updates().len(), logged);
    assert_eq!(harness.lesson().idol.life, 10);
}

#[test]
fn play_card_requires_an_action_point() {
    let mut harness = Harness::new(lesson(3, &["steady", "steady", "steady"]));

    harness.start_turn();
    harness.play(CardId(1));
    let logged = harness.game_play.updates().len();

    let error = harness
        .run(|engine, ctx| engine.play_card(ctx, CardId(2)))
        .expect_err("no action points left");

    assert_eq!(error.error, EngineError::NoActionPoints);
    assert_eq!(harness.game_play.updates().len(), logged);
    assert!(harness.lesson().hand.contains(&CardId(2)));
}

#[test]
fn innate_cards_beyond_the_hand_limit_stay_in_the_deck() {
    let mut cards = vec!["steady", "steady"];
    cards.extend(["opener"; 8]);
    let mut harness = Harness::new(lesson(3, &cards));

    harness.start_turn();

    let lesson = harness.lesson();
    assert_eq!(lesson.hand.len(), LessonConfig::MAX_HAND_SIZE);
    assert!(lesson.discard_pile.is_empty());
    assert_eq!(lesson.deck.len(), 5);
    assert!(lesson.hand.iter().all(|id| id.0 > 2), "hand holds only innate cards");
}

#[test]
fn strengthened_then_consumed_modifier_still_fires_increase_items() {
    let mut lesson = lesson(2, &["burst", "steady", "steady"]);
    lesson.idol.modifiers.push(Modifier::new(
        ModifierId(60),
        ModifierKind::Focus { amount: 2 },
    ));
    lesson.producer_items.push(ProducerItem::new(
        ProducerItemId(2),
        ProducerItemDataId::new("pin"),
        false,
    ));
    let mut harness = Harness::new(lesson);

    harness.start_turn();
    harness.play(CardId(1));

    let lesson = harness.lesson();
    assert!(!lesson.idol.has_modifier(ModifierTag::Focus));
    assert_eq!(lesson.producer_items[0].activation_count, 1);
}
