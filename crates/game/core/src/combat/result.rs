//! Secondary effect outcomes.

/// Outcome of the single crit/miss roll made for an attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum HitKind {
    Normal,
    Critical,
    Missed,
}

/// Damage after secondary effects, with the branch that produced it.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SecondaryEffect {
    pub kind: HitKind,
    pub damage: u32,
}
