//! Greedy lesson driver.
//!
//! Each turn the simulator drinks while life is below half, then plays the
//! hand card whose preview yields the most score, and skips when nothing in
//! hand is playable. Previews run against a throwaway rng so the recorded log
//! only depends on the seed.

use anyhow::{Context, Result};
use lesson_content::ContentFactory;
use lesson_core::{
    CardId, DataSnapshot, EffectContext, GamePlay, LessonConfig, LessonDisplay, LessonEngine,
    LessonError, LessonParams, LessonPhase, PcgRng, SequentialIds, TransitionError, UpdateKind,
    can_use_card, compute_updates_root, create_lesson, is_lesson_ended, lesson_phase,
    preview_card_usage, project,
};
use serde::Serialize;
use tracing::{debug, error, info};

/// Ids minted during previews start here so they never look like real ones.
const PREVIEW_ID_BASE: u32 = 1 << 30;

/// Summary of one simulated lesson.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SimReport {
    pub seed: u64,
    pub score: u32,
    pub cleared: bool,
    pub perfect: bool,
    pub turns_played: u32,
    pub cards_played: u32,
    pub drinks_used: u32,
    pub updates: usize,
    /// Hex SHA-256 commitment to the update log.
    pub updates_root: String,
    pub final_state: LessonDisplay,
}

/// Loaded content plus the lesson setup to replay.
pub struct Simulation {
    data: DataSnapshot,
    config: LessonConfig,
    params: LessonParams,
}

#[derive(Default)]
struct Counters {
    cards_played: u32,
    drinks_used: u32,
}

impl Simulation {
    pub fn new(data: DataSnapshot, config: LessonConfig, params: LessonParams) -> Self {
        Self {
            data,
            config,
            params,
        }
    }

    /// Loads every catalog and the named lesson from `factory`.
    pub fn from_factory(factory: &ContentFactory, lesson: &str) -> Result<Self> {
        let (data, config) = factory.load_all()?;
        let params = factory
            .load_lesson(lesson)
            .with_context(|| format!("loading lesson '{lesson}'"))?;
        Ok(Self::new(data, config, params))
    }

    /// Plays one lesson to the end with `seed` driving every random draw.
    pub fn run(&self, seed: u64) -> Result<SimReport> {
        let mut rng = PcgRng::seeded(seed);
        let mut ids = SequentialIds::starting_at(1);
        let mut game_play = create_lesson(&self.params, self.data.env(), &mut rng, &mut ids)
            .context("creating lesson")?;

        let mut counters = Counters::default();
        {
            let mut ctx = EffectContext::new(self.data.env(), &self.config, &mut rng, &mut ids);
            let mut engine = LessonEngine::new(&mut game_play);
            while !is_lesson_ended(&engine.game_play().lesson()) {
                engine.start_turn(&mut ctx).map_err(failed)?;
                self.play_turn(&mut engine, &mut ctx, seed, &mut counters)?;
                if is_lesson_ended(&engine.game_play().lesson()) {
                    break;
                }
                engine.end_turn(&mut ctx).map_err(failed)?;
            }
        }

        let lesson = game_play.lesson();
        let report = SimReport {
            seed,
            score: lesson.score,
            cleared: lesson.is_clear(),
            perfect: lesson.is_perfect(),
            turns_played: lesson.turn_number,
            cards_played: counters.cards_played,
            drinks_used: counters.drinks_used,
            updates: game_play.updates().len(),
            updates_root: hex::encode(compute_updates_root(game_play.updates())?),
            final_state: project(&lesson, self.data.env())?,
        };
        info!(
            seed,
            score = report.score,
            cleared = report.cleared,
            perfect = report.perfect,
            updates = report.updates,
            "lesson simulated"
        );
        Ok(report)
    }

    fn play_turn(
        &self,
        engine: &mut LessonEngine<'_>,
        ctx: &mut EffectContext<'_>,
        seed: u64,
        counters: &mut Counters,
    ) -> Result<()> {
        loop {
            let lesson = engine.game_play().lesson();
            if lesson_phase(&lesson) != LessonPhase::TurnInProgress {
                return Ok(());
            }

            if lesson.idol.life * 2 < lesson.idol.max_life
                && let Some(drink) = lesson.drinks.first()
            {
                debug!(drink = %drink.id, life = lesson.idol.life, "using drink");
                engine.use_drink(ctx, drink.id).map_err(failed)?;
                counters.drinks_used += 1;
                continue;
            }

            if lesson.idol.action_points == 0 {
                return Ok(());
            }

            match self.best_card(engine.game_play(), seed)? {
                Some(card_id) => {
                    debug!(card = %card_id, turn = lesson.turn_number, "playing card");
                    engine.play_card(ctx, card_id).map_err(failed)?;
                    counters.cards_played += 1;
                }
                None => {
                    debug!(turn = lesson.turn_number, "skipping turn");
                    engine.skip_turn(ctx).map_err(failed)?;
                }
            }
        }
    }

    /// Playable hand card with the highest previewed score gain.
    fn best_card(&self, game_play: &GamePlay, seed: u64) -> Result<Option<CardId>> {
        let lesson = game_play.lesson();
        let mut best: Option<(CardId, i32)> = None;

        for &card_id in &lesson.hand {
            if !can_use_card(&lesson, self.data.env(), card_id)? {
                continue;
            }

            let mut preview_rng = PcgRng::seeded(seed);
            let mut preview_ids = SequentialIds::starting_at(PREVIEW_ID_BASE);
            let mut preview_ctx = EffectContext::new(
                self.data.env(),
                &self.config,
                &mut preview_rng,
                &mut preview_ids,
            );
            let gain: i32 = preview_card_usage(game_play, &mut preview_ctx, card_id)?
                .iter()
                .map(|update| match update.kind {
                    UpdateKind::Score { actual, .. } => actual,
                    _ => 0,
                })
                .sum();

            if best.is_none_or(|(_, best_gain)| gain > best_gain) {
                best = Some((card_id, gain));
            }
        }

        Ok(best.map(|(card_id, _)| card_id))
    }
}

/// Logs a failed transition with its classification and log position.
fn failed(err: TransitionError) -> anyhow::Error {
    let severity = err.severity();
    error!(
        severity = severity.as_str(),
        code = err.error_code(),
        internal = severity.is_internal(),
        turn = err.context.turn_number,
        result_index = err.context.result_index,
        "{err}"
    );
    err.into()
}
