use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What the player picked from the battle menu. This is the raw result of
/// the input collaborator; the machine validates it before it becomes a
/// `PlayerIntent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuSelection {
    /// Use the attack in this move slot.
    Attack(usize),
    /// Use an item from the bag on a roster member.
    UseItem { item_id: u32, roster_index: usize },
    Flee,
    /// Open the roster picker to swap the active ingredient.
    SwitchIngredient,
}

/// An item the player has committed to using this round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemUse {
    pub item_id: u32,
    pub roster_index: usize,
}

/// The player's action for one round. Only lives until the round is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerIntent {
    UseMove(usize),
    UseItem(ItemUse),
    AttemptFlee,
    SwitchCombatant(usize),
}

impl PlayerIntent {
    /// True when the player's own action takes the whole turn, leaving only
    /// the enemy's attack to resolve.
    pub fn consumes_turn(&self) -> bool {
        !matches!(self, PlayerIntent::UseMove(_))
    }
}

/// Why an item could not be used. The message is shown to the player and
/// the turn is not spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum ItemRejection {
    #[error("You don't have any of that item left.")]
    NotInBag,
    #[error("That item can't be used in battle.")]
    UnknownItem,
    #[error("There is no ingredient in that slot.")]
    InvalidTarget,
    #[error("Come on! It is rotten! I won't heal it.")]
    TargetFainted,
    #[error("What are you thinking, it is fresh!")]
    TargetAtFullHealth,
}
