use super::common::{IdolDataId, ModifierId};
use super::modifier::{Modifier, ModifierKind, ModifierTag};

/// Resource-holding actor of a lesson.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Idol {
    pub data_id: IdolDataId,
    pub life: u32,
    pub max_life: u32,
    pub vitality: u32,
    /// Active modifiers in acquisition order.
    pub modifiers: Vec<Modifier>,
    pub action_points: u32,
    /// Number of cards played so far in the lesson.
    pub total_card_usage_count: u32,
    /// Ids of the modifiers that were active when the current turn started.
    ///
    /// Only these decay at the next turn start; modifiers gained mid-turn keep
    /// their full strength for one more turn.
    pub modifier_ids_at_turn_start: Vec<ModifierId>,
}

impl Idol {
    pub fn new(data_id: IdolDataId, life: u32, max_life: u32) -> Self {
        Self {
            data_id,
            life: life.min(max_life),
            max_life,
            vitality: 0,
            modifiers: Vec::new(),
            action_points: 0,
            total_card_usage_count: 0,
            modifier_ids_at_turn_start: Vec::new(),
        }
    }

    pub fn modifier(&self, id: ModifierId) -> Option<&Modifier> {
        self.modifiers.iter().find(|modifier| modifier.id == id)
    }

    pub fn modifier_mut(&mut self, id: ModifierId) -> Option<&mut Modifier> {
        self.modifiers.iter_mut().find(|modifier| modifier.id == id)
    }

    /// First active modifier of the given kind.
    pub fn find_modifier(&self, tag: ModifierTag) -> Option<&Modifier> {
        self.modifiers.iter().find(|modifier| modifier.tag() == tag)
    }

    pub fn has_modifier(&self, tag: ModifierTag) -> bool {
        self.find_modifier(tag).is_some()
    }

    /// Summed strength of every instance of a kind; binary kinds count instances.
    pub fn modifier_strength(&self, tag: ModifierTag) -> u32 {
        self.modifiers
            .iter()
            .filter(|modifier| modifier.tag() == tag)
            .map(|modifier| modifier.kind.strength().unwrap_or(1))
            .sum()
    }

    /// Summed percentage of every active mighty performance instance.
    pub fn mighty_performance_percentage(&self) -> u32 {
        self.modifiers
            .iter()
            .filter_map(|modifier| match modifier.kind {
                ModifierKind::MightyPerformance { percentage, .. } => Some(percentage),
                _ => None,
            })
            .sum()
    }
}
