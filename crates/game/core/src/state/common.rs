use std::fmt;

/// Identity of a combatant, stable for the whole fight.
///
/// The external layer keys its "busy" locks and persistence writes by this id.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct FighterId(pub u64);

impl From<u64> for FighterId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for FighterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
