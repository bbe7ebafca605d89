use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemEffect {
    /// Restores a fixed amount of health, capped at the target's max HP.
    HealFlat(u32),
}

impl fmt::Display for ItemEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemEffect::HealFlat(amount) => write!(f, "Heals {} HP", amount),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ItemData {
    pub id: u32,
    pub name: String,
    pub effect: ItemEffect,
    #[serde(default)]
    pub description: String,
}
