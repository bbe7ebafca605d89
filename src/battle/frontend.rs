//! Collaborators the battle waits on. Every async method resolves when the
//! corresponding animation, message or menu has completed; the machine never
//! has more than one of them in flight.

use crate::battle::action::MenuSelection;
use crate::battle::combatant::{Combatant, Side};
use crate::battle::state::BattleOutcome;
use crate::ingredient::{IngredientInst, InventoryEntry};
use async_trait::async_trait;
use schema::AttackKey;

/// Animation, tweening and audio.
#[async_trait]
pub trait Presentation: Send {
    /// Resolves once the transition into the battle scene has finished.
    async fn play_scene_transition(&mut self);
    async fn play_appear_animation(&mut self, combatant: &Combatant);
    async fn play_damage_animation(&mut self, combatant: &Combatant);
    async fn play_death_animation(&mut self, combatant: &Combatant);
    async fn play_move_animation(&mut self, animation: AttackKey, target: Side);
    /// Fire and forget.
    fn play_sound(&mut self, audio_key: &str);
    async fn update_health_bar(&mut self, combatant: &Combatant);
    /// Fill the experience bar to `ratio`. With `leveled_up` the bar fills to
    /// the end and rolls over first.
    async fn play_exp_bar_animation(&mut self, leveled_up: bool, ratio: f64);
    /// Leave the battle scene. `outcome.player_knocked_out` tells the world
    /// to heal and reposition the player.
    async fn transition_out(&mut self, outcome: &BattleOutcome);
}

/// The battle's info pane.
#[async_trait]
pub trait Messaging: Send {
    /// Show every message in turn and resolve once the player acknowledged the last.
    async fn show_messages_and_wait(&mut self, messages: &[String]);
    /// Show a message that completes without player input.
    async fn show_message_no_input(&mut self, message: &str);
}

/// What the player menu needs to render its options.
#[derive(Debug, Clone, Copy)]
pub struct MenuContext<'a> {
    pub active: &'a Combatant,
    pub roster: &'a [IngredientInst],
    pub inventory: &'a [InventoryEntry],
}

/// Menus and the roster picker. Raw key presses stay behind this trait.
#[async_trait]
pub trait PlayerInput: Send {
    async fn choose_selection(&mut self, context: MenuContext<'_>) -> MenuSelection;
    /// Pick a roster member to send out. `None` means the picker was cancelled.
    async fn choose_roster_member(
        &mut self,
        roster: &[IngredientInst],
        active_index: usize,
        forced: bool,
    ) -> Option<usize>;
}

/// Everything a battle needs from its host.
pub trait BattleFrontend: Presentation + Messaging + PlayerInput {}

impl<T: Presentation + Messaging + PlayerInput> BattleFrontend for T {}
