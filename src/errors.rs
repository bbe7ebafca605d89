use thiserror::Error;

/// Main error type for the ingredient battle engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleError {
    /// Error related to reference data lookup or loading
    #[error("Data error: {0}")]
    Data(#[from] DataError),
    /// A combatant was asked to pick an attack but knows none
    #[error("{name} has no attacks to choose from")]
    EmptyMoveList { name: String },
    /// No roster member has health left to start or continue a battle
    #[error("No ingredient in the roster is able to battle")]
    NoEligibleIngredient,
    /// The battle settings cannot drive a battle
    #[error("Invalid battle config: {0}")]
    InvalidConfig(String),
    /// A queued attack refers to a move slot the attacker does not have
    #[error("{name} has no attack in slot {index}")]
    InvalidMoveIndex { name: String, index: usize },
    /// A round was resolved before both sides had chosen an action
    #[error("Entered {state} without a chosen action")]
    MissingAction { state: String },
    /// The machine was driven after reaching its terminal state
    #[error("The battle has already finished")]
    AlreadyFinished,
}

/// Errors related to reference data (species, attacks, items) and config files
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    /// The specified ingredient species was not found
    #[error("Ingredient species not found: {0}")]
    IngredientNotFound(u32),
    /// A data file could not be read
    #[error("Could not read {path}: {details}")]
    Io { path: String, details: String },
    /// A data file was read but could not be parsed
    #[error("Malformed data in {path}: {details}")]
    Malformed { path: String, details: String },
}

/// Errors raised while reading or writing the save file
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("save file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("save file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Type alias for Results using BattleError
pub type BattleResult<T> = Result<T, BattleError>;

/// Type alias for Results using DataError
pub type DataResult<T> = Result<T, DataError>;
