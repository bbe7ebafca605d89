//! A console frontend that narrates the battle and plays the player's side.

use std::time::Duration;

use async_trait::async_trait;
use schema::AttackKey;

use crate::battle::action::MenuSelection;
use crate::battle::combatant::{Combatant, Side};
use crate::battle::frontend::{MenuContext, Messaging, PlayerInput, Presentation};
use crate::battle::state::BattleOutcome;
use crate::ingredient::IngredientInst;

const ANIMATION_DELAY: Duration = Duration::from_millis(150);

/// Prints the battle to stdout and plays the player's side automatically.
///
/// The autopilot attacks in slot order and reaches for the first bag entry
/// when the active ingredient drops below a third of its health. It never
/// offers an item twice in a row, so a bag entry the battle refuses cannot
/// stall the menu.
#[derive(Debug, Default)]
pub struct ConsoleFrontend {
    skip_animations: bool,
    next_attack: usize,
    offered_item: bool,
}

impl ConsoleFrontend {
    pub fn new(skip_animations: bool) -> Self {
        Self {
            skip_animations,
            next_attack: 0,
            offered_item: false,
        }
    }

    async fn pause(&self) {
        if !self.skip_animations {
            tokio::time::sleep(ANIMATION_DELAY).await;
        }
    }
}

#[async_trait]
impl Presentation for ConsoleFrontend {
    async fn play_scene_transition(&mut self) {
        println!("=== A wild ingredient blocks the path! ===");
        self.pause().await;
    }

    async fn play_appear_animation(&mut self, _combatant: &Combatant) {
        self.pause().await;
    }

    async fn play_damage_animation(&mut self, _combatant: &Combatant) {
        self.pause().await;
    }

    async fn play_death_animation(&mut self, combatant: &Combatant) {
        println!("  ({} leaves the field)", combatant.name());
        self.pause().await;
    }

    async fn play_move_animation(&mut self, animation: AttackKey, target: Side) {
        tracing::debug!("playing {} at {:?}", animation, target);
        self.pause().await;
    }

    fn play_sound(&mut self, audio_key: &str) {
        tracing::trace!("sound {}", audio_key);
    }

    async fn update_health_bar(&mut self, combatant: &Combatant) {
        println!(
            "  [{}] {}/{} HP",
            combatant.name(),
            combatant.current_hp(),
            combatant.max_hp()
        );
    }

    async fn play_exp_bar_animation(&mut self, leveled_up: bool, ratio: f64) {
        let filled = (ratio * 20.0).round() as usize;
        let bar = format!("{}{}", "#".repeat(filled), "-".repeat(20 - filled.min(20)));
        let suffix = if leveled_up { " LEVEL UP!" } else { "" };
        println!("  EXP [{}]{}", bar, suffix);
        self.pause().await;
    }

    async fn transition_out(&mut self, outcome: &BattleOutcome) {
        println!(
            "=== Battle over: {} in {} rounds ===",
            outcome.result, outcome.rounds
        );
    }
}

#[async_trait]
impl Messaging for ConsoleFrontend {
    async fn show_messages_and_wait(&mut self, messages: &[String]) {
        for message in messages {
            println!("{}", message);
        }
        self.pause().await;
    }

    async fn show_message_no_input(&mut self, message: &str) {
        println!("{}", message);
    }
}

#[async_trait]
impl PlayerInput for ConsoleFrontend {
    async fn choose_selection(&mut self, context: MenuContext<'_>) -> MenuSelection {
        let active = context.active;
        let low_health = active.current_hp() * 3 < active.max_hp();
        if low_health && !self.offered_item {
            if let (Some(item), Some(roster_index)) =
                (context.inventory.first(), active.roster_index())
            {
                self.offered_item = true;
                return MenuSelection::UseItem {
                    item_id: item.item_id,
                    roster_index,
                };
            }
        }
        self.offered_item = false;

        let move_count = active.moves().len().max(1);
        let selection = MenuSelection::Attack(self.next_attack % move_count);
        self.next_attack += 1;
        selection
    }

    async fn choose_roster_member(
        &mut self,
        roster: &[IngredientInst],
        active_index: usize,
        _forced: bool,
    ) -> Option<usize> {
        roster
            .iter()
            .enumerate()
            .find(|(index, ingredient)| *index != active_index && !ingredient.is_fainted())
            .map(|(index, _)| index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::tests::common::{player_combatant, TestIngredientBuilder, HEAL_ITEM_ID};
    use crate::ingredient::InventoryEntry;
    use pretty_assertions::assert_eq;

    fn bag(item_id: u32) -> Vec<InventoryEntry> {
        vec![InventoryEntry {
            item_id,
            quantity: 1,
        }]
    }

    #[tokio::test]
    async fn test_refused_item_falls_back_to_attacking() {
        // Arrange
        let chili = TestIngredientBuilder::new("Chili").with_hp(3).build();
        let active = player_combatant(chili.clone());
        let roster = vec![chili];
        let inventory = bag(99);
        let mut frontend = ConsoleFrontend::new(true);
        let context = || MenuContext {
            active: &active,
            roster: &roster,
            inventory: &inventory,
        };

        // Act
        let first = frontend.choose_selection(context()).await;
        let second = frontend.choose_selection(context()).await;

        // Assert
        assert_eq!(
            first,
            MenuSelection::UseItem {
                item_id: 99,
                roster_index: 0
            }
        );
        assert_eq!(second, MenuSelection::Attack(0));
    }

    #[tokio::test]
    async fn test_healthy_ingredient_cycles_attack_slots() {
        let chili = TestIngredientBuilder::new("Chili").build();
        let active = player_combatant(chili.clone());
        let roster = vec![chili];
        let inventory = bag(HEAL_ITEM_ID);
        let mut frontend = ConsoleFrontend::new(true);

        let mut picks = Vec::new();
        for _ in 0..3 {
            let context = MenuContext {
                active: &active,
                roster: &roster,
                inventory: &inventory,
            };
            picks.push(frontend.choose_selection(context).await);
        }

        assert_eq!(
            picks,
            vec![
                MenuSelection::Attack(0),
                MenuSelection::Attack(1),
                MenuSelection::Attack(0)
            ]
        );
    }

    #[tokio::test]
    async fn test_picker_skips_active_and_fainted_members() {
        let roster = vec![
            TestIngredientBuilder::new("Chili").build(),
            TestIngredientBuilder::new("Basil").fainted().build(),
            TestIngredientBuilder::new("Garlic").build(),
        ];
        let mut frontend = ConsoleFrontend::new(true);

        let choice = frontend.choose_roster_member(&roster, 0, true).await;

        assert_eq!(choice, Some(2));
    }
}
