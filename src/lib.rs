//! Ingredient Battle Engine
//!
//! Turn-based battles between collected ingredients: a state machine that
//! drives each round, flat-damage attack resolution ordered by a coin flip,
//! and experience/level progression shared across the player's roster.

// --- MODULE DECLARATIONS ---
pub mod battle;
pub mod config;
pub mod data;
pub mod errors;
pub mod ingredient;
pub mod progression;
pub mod store;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
pub use schema::{AttackData, AttackKey, AttackTarget, IngredientSpecies, ItemData, ItemEffect};

// --- From this crate's modules (`src/`) ---

// The state machine and what it reports.
pub use battle::machine::{BattleMachine, SharedData};
pub use battle::state::{BattleEvent, BattleOutcome, BattleStateKind, EventBus, OutcomeKind};

// Runtime types for a battle.
pub use battle::action::{ItemRejection, ItemUse, MenuSelection, PlayerIntent};
pub use battle::combatant::{Combatant, Side};
pub use battle::console::ConsoleFrontend;
pub use battle::frontend::{BattleFrontend, MenuContext, Messaging, PlayerInput, Presentation};
pub use battle::rng::{RandomSource, ScriptedRandom, SeededRandom, ThreadRandom};
pub use ingredient::{IngredientInst, InventoryEntry, MAX_LEVEL};

// Collaborators and configuration.
pub use config::{BattleConfig, GameConfig};
pub use data::{DataLookup, GameData};
pub use store::{JsonFileStore, MemoryStore, SaveStore};

// Crate-specific error and result types.
pub use errors::{BattleError, BattleResult, DataError, DataResult, StoreError};
