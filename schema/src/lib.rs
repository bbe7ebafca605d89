// Ingredient Battle Schema - Shared type definitions
// This crate contains the immutable reference data shared between the
// battle engine, its data loaders and any frontend: attacks, ingredient
// species templates and items.

// Re-export the main types
pub use attack_data::*;
pub use ingredient_data::*;
pub use item_data::*;

pub mod attack_data;
pub mod ingredient_data;
pub mod item_data;
