use serde::{Deserialize, Serialize};

/// Template an ingredient is created from. Wild encounters and starter
/// ingredients are both stamped out of these records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientSpecies {
    pub id: u32,
    pub name: String,
    pub asset_key: String,
    #[serde(default)]
    pub asset_frame: u32,
    pub level: u8,
    pub max_hp: u32,
    pub base_attack: u32,
    pub attack_ids: Vec<u32>, // resolved against the attack table, unknown ids are skipped
    pub base_exp: u32,
}
