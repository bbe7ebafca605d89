pub mod action;
pub mod combatant;
pub mod console;
pub mod experience;
pub mod frontend;
pub mod machine;
pub mod resolver;
pub mod rng;
pub mod state;

#[cfg(test)]
mod tests;
