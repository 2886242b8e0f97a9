use crate::effect::Effect;
use crate::state::DrinkDataId;

pub trait DrinkOracle: Send + Sync {
    fn drink(&self, id: &DrinkDataId) -> Option<&DrinkData>;
}

/// Static drink definition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DrinkData {
    pub id: DrinkDataId,
    pub name: String,
    pub effects: Vec<Effect>,
}
