//! Persistence of the player's roster and inventory.
//!
//! The battle engine only ever talks to `SaveStore`; whether that is backed
//! by memory or a JSON file is decided by whoever builds the machine.

use crate::errors::StoreError;
use crate::ingredient::{IngredientInst, InventoryEntry};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Synchronous get/set access to the saved game. No transactionality: every
/// `set_*` call replaces the stored value wholesale.
pub trait SaveStore {
    fn roster(&self) -> Vec<IngredientInst>;
    fn set_roster(&mut self, roster: Vec<IngredientInst>);
    fn inventory(&self) -> Vec<InventoryEntry>;
    fn set_inventory(&mut self, inventory: Vec<InventoryEntry>);
}

/// Everything written to disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveData {
    #[serde(default)]
    pub roster: Vec<IngredientInst>,
    #[serde(default)]
    pub inventory: Vec<InventoryEntry>,
}

/// Keeps the save in memory and counts writes.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: SaveData,
    roster_writes: usize,
    inventory_writes: usize,
}

impl MemoryStore {
    pub fn new(roster: Vec<IngredientInst>, inventory: Vec<InventoryEntry>) -> Self {
        Self {
            data: SaveData { roster, inventory },
            roster_writes: 0,
            inventory_writes: 0,
        }
    }

    pub fn roster_writes(&self) -> usize {
        self.roster_writes
    }

    pub fn inventory_writes(&self) -> usize {
        self.inventory_writes
    }
}

impl SaveStore for MemoryStore {
    fn roster(&self) -> Vec<IngredientInst> {
        self.data.roster.clone()
    }

    fn set_roster(&mut self, roster: Vec<IngredientInst>) {
        self.roster_writes += 1;
        self.data.roster = roster;
    }

    fn inventory(&self) -> Vec<InventoryEntry> {
        self.data.inventory.clone()
    }

    fn set_inventory(&mut self, inventory: Vec<InventoryEntry>) {
        self.inventory_writes += 1;
        self.data.inventory = inventory;
    }
}

/// A save file on disk. Reads go to the cached copy; every write flushes the
/// whole file. I/O failures are logged and skipped, never surfaced to the battle.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    data: SaveData,
    writable: bool,
}

impl JsonFileStore {
    /// Open the save at `path`. A missing file starts an empty save. An
    /// unreadable one is moved aside to `<path>.corrupt` first and the store
    /// starts empty; if it cannot be moved, nothing is ever written over it.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (data, writable) = match Self::read(&path) {
            Ok(Some(data)) => (data, true),
            Ok(None) => {
                tracing::info!("No save file at {}, starting fresh", path.display());
                (SaveData::default(), true)
            }
            Err(err) => {
                tracing::warn!("Ignoring unreadable save file {}: {}", path.display(), err);
                (SaveData::default(), Self::back_up(&path))
            }
        };
        Self {
            path,
            data,
            writable,
        }
    }

    /// Where an unreadable save is kept.
    pub fn backup_path(path: &Path) -> PathBuf {
        let mut name = path.as_os_str().to_owned();
        name.push(".corrupt");
        PathBuf::from(name)
    }

    fn back_up(path: &Path) -> bool {
        let backup = Self::backup_path(path);
        match fs::rename(path, &backup) {
            Ok(()) => {
                tracing::warn!("Moved unreadable save to {}", backup.display());
                true
            }
            Err(err) => {
                tracing::warn!(
                    "Could not back up {} ({}), leaving it untouched",
                    path.display(),
                    err
                );
                false
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True when nothing has been saved yet.
    pub fn is_empty(&self) -> bool {
        self.data.roster.is_empty() && self.data.inventory.is_empty()
    }

    fn read(path: &Path) -> Result<Option<SaveData>, StoreError> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn write(&self) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(&self.data)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    fn flush(&self) {
        if !self.writable {
            tracing::warn!("Not overwriting {}, it could not be backed up", self.path.display());
            return;
        }
        if let Err(err) = self.write() {
            tracing::warn!("Could not write save file {}: {}", self.path.display(), err);
        }
    }
}

impl SaveStore for JsonFileStore {
    fn roster(&self) -> Vec<IngredientInst> {
        self.data.roster.clone()
    }

    fn set_roster(&mut self, roster: Vec<IngredientInst>) {
        self.data.roster = roster;
        self.flush();
    }

    fn inventory(&self) -> Vec<InventoryEntry> {
        self.data.inventory.clone()
    }

    fn set_inventory(&mut self, inventory: Vec<InventoryEntry>) {
        self.data.inventory = inventory;
        self.flush();
    }
}
