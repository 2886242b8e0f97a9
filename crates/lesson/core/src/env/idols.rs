use crate::state::IdolDataId;

pub trait IdolOracle: Send + Sync {
    fn idol(&self, id: &IdolDataId) -> Option<&IdolData>;
}

/// Static idol definition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IdolData {
    pub id: IdolDataId,
    pub name: String,
    pub max_life: u32,
}
