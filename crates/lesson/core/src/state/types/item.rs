use super::common::{DrinkDataId, DrinkId, ProducerItemDataId, ProducerItemId};

/// Equipped producer item.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProducerItem {
    pub id: ProducerItemId,
    pub data_id: ProducerItemDataId,
    pub enhanced: bool,
    /// Number of times the item has fired in this lesson.
    pub activation_count: u32,
}

impl ProducerItem {
    pub fn new(id: ProducerItemId, data_id: ProducerItemDataId, enhanced: bool) -> Self {
        Self {
            id,
            data_id,
            enhanced,
            activation_count: 0,
        }
    }
}

/// Single-use consumable.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Drink {
    pub id: DrinkId,
    pub data_id: DrinkDataId,
}

impl Drink {
    pub fn new(id: DrinkId, data_id: DrinkDataId) -> Self {
        Self { id, data_id }
    }
}
