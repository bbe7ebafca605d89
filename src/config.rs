//! Tunable settings for the battle engine and the demo binary.
//!
//! Everything has a default, so a missing config file is not an error.

use crate::errors::{DataError, DataResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings consumed by the battle state machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Frontends skip tweens and play every animation instantly.
    pub skip_animations: bool,
    /// Upper bound of the flee roll, which is drawn from `1..=flee_roll_max`.
    pub flee_roll_max: u32,
    /// A flee roll strictly above this value escapes.
    pub flee_success_above: u32,
}

impl BattleConfig {
    pub const DEFAULT_FLEE_ROLL_MAX: u32 = 10;
    pub const DEFAULT_FLEE_SUCCESS_ABOVE: u32 = 5;

    /// The flee roll needs a non-empty range with at least one winning value.
    pub fn validate(&self) -> Result<(), String> {
        if self.flee_roll_max < 1 {
            return Err(format!(
                "flee_roll_max must be at least 1, got {}",
                self.flee_roll_max
            ));
        }
        if self.flee_success_above >= self.flee_roll_max {
            return Err(format!(
                "flee_success_above ({}) must be below flee_roll_max ({})",
                self.flee_success_above, self.flee_roll_max
            ));
        }
        Ok(())
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            skip_animations: false,
            flee_roll_max: Self::DEFAULT_FLEE_ROLL_MAX,
            flee_success_above: Self::DEFAULT_FLEE_SUCCESS_ABOVE,
        }
    }
}

/// Top-level configuration for the demo binary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Directory holding `ingredients.ron`, `attacks.ron` and `items.ron`.
    pub data_dir: PathBuf,
    /// Where the roster and inventory are saved between runs.
    pub save_path: PathBuf,
    pub battle: BattleConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            save_path: PathBuf::from("save.json"),
            battle: BattleConfig::default(),
        }
    }
}

impl GameConfig {
    /// Reads a RON config file. A file that does not exist yields the defaults.
    pub fn load(path: &Path) -> DataResult<Self> {
        if !path.exists() {
            tracing::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|err| DataError::Io {
            path: path.display().to_string(),
            details: err.to_string(),
        })?;
        Self::from_ron_str(&content).map_err(|err| match err {
            DataError::Malformed { details, .. } => DataError::Malformed {
                path: path.display().to_string(),
                details,
            },
            other => other,
        })
    }

    pub fn from_ron_str(content: &str) -> DataResult<Self> {
        let config: Self = ron::from_str(content).map_err(|err| DataError::Malformed {
            path: "<config>".to_string(),
            details: err.to_string(),
        })?;
        config.battle.validate().map_err(|details| DataError::Malformed {
            path: "<config>".to_string(),
            details,
        })?;
        Ok(config)
    }
}
