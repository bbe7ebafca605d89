use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Animation played when an attack is used. The names match the sprite
/// sheet keys the frontend registers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AttackKey {
    Lafire,
    SlashPurple,
    DarkSpell,
    GreenSlash,
    FlameSlash,
}

/// Which side an attack lands on, relative to the side using it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
pub enum AttackTarget {
    /// The user's own side.
    User,
    /// The opposing side. Every attack in the shipped data targets this side.
    #[default]
    Opponent,
}

/// Immutable attack reference data. There is no per-battle state (no PP,
/// no cooldown).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackData {
    pub id: u32,
    pub name: String,
    pub animation: AttackKey,
    pub audio_key: String,
    #[serde(default)]
    pub target: AttackTarget,
}
