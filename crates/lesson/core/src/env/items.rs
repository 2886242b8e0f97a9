use crate::effect::{Condition, Effect};
use crate::state::{AttributeKind, CardSummaryKind, ModifierTag, ProducerItemDataId};
use crate::trigger::TriggerWindow;

pub trait ProducerItemOracle: Send + Sync {
    fn producer_item(&self, id: &ProducerItemDataId) -> Option<&ProducerItemData>;
}

/// Static producer item definition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProducerItemData {
    pub id: ProducerItemDataId,
    pub name: String,
    pub base: ProducerItemContent,
    #[cfg_attr(feature = "serde", serde(default))]
    pub enhanced: Option<ProducerItemContent>,
}

impl ProducerItemData {
    pub fn content(&self, enhanced: bool) -> &ProducerItemContent {
        match (&self.enhanced, enhanced) {
            (Some(content), true) => content,
            _ => &self.base,
        }
    }
}

/// Trigger, gate and payload of a producer item.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProducerItemContent {
    pub trigger: ItemTrigger,
    #[cfg_attr(feature = "serde", serde(default))]
    pub condition: Option<Condition>,
    pub effects: Vec<Effect>,
    /// Activation budget for the whole lesson. `None` is unlimited.
    #[cfg_attr(feature = "serde", serde(default))]
    pub times: Option<u32>,
}

/// When a producer item is eligible to fire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemTrigger {
    pub window: TriggerWindow,
    /// Turn attribute the item is restricted to. Ignored once the lesson is cleared.
    #[cfg_attr(feature = "serde", serde(default))]
    pub attribute: Option<AttributeKind>,
    /// Card kind the item reacts to in the card-effect windows.
    #[cfg_attr(feature = "serde", serde(default))]
    pub card_kind: Option<CardSummaryKind>,
    /// Modifier whose increase fires the item in the modifier-increase window.
    #[cfg_attr(feature = "serde", serde(default))]
    pub modifier_kind: Option<ModifierTag>,
}

impl ItemTrigger {
    pub fn new(window: TriggerWindow) -> Self {
        Self {
            window,
            attribute: None,
            card_kind: None,
            modifier_kind: None,
        }
    }

    pub fn with_attribute(mut self, attribute: AttributeKind) -> Self {
        self.attribute = Some(attribute);
        self
    }

    pub fn with_card_kind(mut self, card_kind: CardSummaryKind) -> Self {
        self.card_kind = Some(card_kind);
        self
    }

    pub fn with_modifier_kind(mut self, modifier_kind: ModifierTag) -> Self {
        self.modifier_kind = Some(modifier_kind);
        self
    }
}
