//! Read-only reference data: ingredient species, attacks and items.

use crate::errors::{DataError, DataResult};
use schema::{AttackData, IngredientSpecies, ItemData};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Keyed lookups the battle engine uses to build combatants and apply items.
/// A missing entry is not an error at this level; callers decide what to skip.
pub trait DataLookup {
    fn attack(&self, id: u32) -> Option<&AttackData>;
    fn ingredient(&self, id: u32) -> Option<&IngredientSpecies>;
    fn item(&self, id: u32) -> Option<&ItemData>;
}

/// In-memory tables, usually loaded from the RON files in the data directory.
#[derive(Debug, Clone, Default)]
pub struct GameData {
    attacks: HashMap<u32, AttackData>,
    ingredients: HashMap<u32, IngredientSpecies>,
    items: HashMap<u32, ItemData>,
}

impl GameData {
    pub fn new(
        attacks: Vec<AttackData>,
        ingredients: Vec<IngredientSpecies>,
        items: Vec<ItemData>,
    ) -> Self {
        Self {
            attacks: attacks.into_iter().map(|a| (a.id, a)).collect(),
            ingredients: ingredients.into_iter().map(|i| (i.id, i)).collect(),
            items: items.into_iter().map(|i| (i.id, i)).collect(),
        }
    }

    /// Load `attacks.ron`, `ingredients.ron` and `items.ron` from `dir`.
    pub fn load(dir: &Path) -> DataResult<Self> {
        let attacks: Vec<AttackData> = read_ron(&dir.join("attacks.ron"))?;
        let ingredients: Vec<IngredientSpecies> = read_ron(&dir.join("ingredients.ron"))?;
        let items: Vec<ItemData> = read_ron(&dir.join("items.ron"))?;

        tracing::info!(
            "Loaded {} attacks, {} ingredients, {} items from {}",
            attacks.len(),
            ingredients.len(),
            items.len(),
            dir.display()
        );
        Ok(Self::new(attacks, ingredients, items))
    }

    /// Look up a species, failing when it does not exist.
    pub fn species(&self, id: u32) -> DataResult<&IngredientSpecies> {
        self.ingredient(id).ok_or(DataError::IngredientNotFound(id))
    }
}

impl DataLookup for GameData {
    fn attack(&self, id: u32) -> Option<&AttackData> {
        self.attacks.get(&id)
    }

    fn ingredient(&self, id: u32) -> Option<&IngredientSpecies> {
        self.ingredients.get(&id)
    }

    fn item(&self, id: u32) -> Option<&ItemData> {
        self.items.get(&id)
    }
}

fn read_ron<T: DeserializeOwned>(path: &Path) -> DataResult<T> {
    let content = fs::read_to_string(path).map_err(|err| DataError::Io {
        path: path.display().to_string(),
        details: err.to_string(),
    })?;
    ron::from_str(&content).map_err(|err| DataError::Malformed {
        path: path.display().to_string(),
        details: err.to_string(),
    })
}
