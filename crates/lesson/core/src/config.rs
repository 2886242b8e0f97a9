use crate::state::CardDataId;

/// Lesson rule constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LessonConfig {
    /// Cards drawn at the start of every turn.
    pub cards_per_turn_draw: u32,
    /// Action points granted at the start of every turn.
    pub action_points_per_turn: u32,
    /// Life recovered when the turn is skipped.
    pub skip_turn_life_recovery: u32,
    /// Score bonus granted by good condition, in percent.
    pub good_condition_percentage: u32,
    /// Extra good-condition bonus per point of excellent condition, in percent.
    pub excellent_condition_step_percentage: u32,
    /// Static definition inserted by `generateTroubleCard`.
    pub trouble_card_id: CardDataId,
}

impl LessonConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of cards held in hand. Overflow goes to the discard pile.
    pub const MAX_HAND_SIZE: usize = 5;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_CARDS_PER_TURN_DRAW: u32 = 3;
    pub const DEFAULT_ACTION_POINTS_PER_TURN: u32 = 1;
    pub const DEFAULT_SKIP_TURN_LIFE_RECOVERY: u32 = 2;
    pub const DEFAULT_GOOD_CONDITION_PERCENTAGE: u32 = 50;
    pub const DEFAULT_EXCELLENT_CONDITION_STEP_PERCENTAGE: u32 = 10;
    pub const DEFAULT_TROUBLE_CARD_ID: &'static str = "drowsiness";

    pub fn new() -> Self {
        Self {
            cards_per_turn_draw: Self::DEFAULT_CARDS_PER_TURN_DRAW,
            action_points_per_turn: Self::DEFAULT_ACTION_POINTS_PER_TURN,
            skip_turn_life_recovery: Self::DEFAULT_SKIP_TURN_LIFE_RECOVERY,
            good_condition_percentage: Self::DEFAULT_GOOD_CONDITION_PERCENTAGE,
            excellent_condition_step_percentage: Self::DEFAULT_EXCELLENT_CONDITION_STEP_PERCENTAGE,
            trouble_card_id: CardDataId::new(Self::DEFAULT_TROUBLE_CARD_ID),
        }
    }

    pub fn with_trouble_card(mut self, trouble_card_id: CardDataId) -> Self {
        self.trouble_card_id = trouble_card_id;
        self
    }
}

impl Default for LessonConfig {
    fn default() -> Self {
        Self::new()
    }
}
