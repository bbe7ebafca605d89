use schema::IngredientSpecies;
use serde::{Deserialize, Serialize};

/// Highest level an ingredient can reach.
pub const MAX_LEVEL: u8 = 100;

/// A persisted roster record. This is what lives in the save store between
/// battles; a battle wraps it in a `Combatant` and writes it back afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientInst {
    pub id: u32,
    pub species_id: u32,
    pub name: String,
    pub asset_key: String,
    pub asset_frame: u32,
    pub level: u8,
    pub max_hp: u32,
    pub current_hp: u32,
    pub base_attack: u32,
    pub current_attack: u32,
    pub base_exp: u32,
    pub current_exp: u32,
    pub attack_ids: Vec<u32>,
}

impl IngredientInst {
    /// Stamp out a fresh ingredient from its species template, at full
    /// health and with exactly the experience its level requires.
    pub fn from_species(id: u32, species: &IngredientSpecies) -> Self {
        let level = species.level.clamp(1, MAX_LEVEL);
        Self {
            id,
            species_id: species.id,
            name: species.name.clone(),
            asset_key: species.asset_key.clone(),
            asset_frame: species.asset_frame,
            level,
            max_hp: species.max_hp,
            current_hp: species.max_hp,
            base_attack: species.base_attack,
            current_attack: species.base_attack,
            base_exp: species.base_exp,
            current_exp: crate::progression::total_points_needed_for_level(level),
            attack_ids: species.attack_ids.clone(),
        }
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    pub fn is_at_full_health(&self) -> bool {
        self.current_hp >= self.max_hp
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current_hp = self.current_hp.saturating_sub(amount);
    }

    /// Restore health, capped at `max_hp`. Returns the amount actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.current_hp;
        self.current_hp = self.current_hp.saturating_add(amount).min(self.max_hp);
        self.current_hp - before
    }
}

/// One stack of items in the player's bag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryEntry {
    pub item_id: u32,
    pub quantity: u32,
}
