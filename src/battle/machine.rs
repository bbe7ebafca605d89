//! The battle flow, from the scene transition in to the transition out.
//!
//! Each state's entry behaviour runs to completion, awaiting the frontend at
//! every animation or message, and ends with exactly one transition. `step`
//! runs one state; `run` steps until the battle is over.

use std::sync::Arc;

use crate::battle::action::{ItemRejection, ItemUse, MenuSelection, PlayerIntent};
use crate::battle::combatant::{Combatant, Combatants, Side};
use crate::battle::experience::distribute_experience;
use crate::battle::frontend::{BattleFrontend, MenuContext};
use crate::battle::resolver::{resolve_round, ActionQueue};
use crate::battle::rng::RandomSource;
use crate::battle::state::{BattleEvent, BattleOutcome, BattleStateKind, EventBus, OutcomeKind};
use crate::config::BattleConfig;
use crate::data::DataLookup;
use crate::errors::{BattleError, BattleResult};
use crate::ingredient::{IngredientInst, InventoryEntry};
use crate::store::SaveStore;
use schema::ItemEffect;

const FLEE_SOUND: &str = "flee";

pub type SharedData = Arc<dyn DataLookup + Send + Sync>;

pub struct BattleMachine<F, S, R> {
    data: SharedData,
    config: BattleConfig,
    frontend: F,
    store: S,
    rng: R,

    roster: Vec<IngredientInst>,
    inventory: Vec<InventoryEntry>,
    active_index: usize,
    combatants: Combatants,

    state: BattleStateKind,
    pending_intent: Option<PlayerIntent>,
    enemy_move: Option<usize>,
    switching_active: bool,
    active_knocked_out: bool,
    player_knocked_out: bool,

    bus: EventBus,
    rounds: u32,
    outcome: Option<BattleOutcome>,
}

impl<F, S, R> BattleMachine<F, S, R>
where
    F: BattleFrontend,
    S: SaveStore,
    R: RandomSource,
{
    /// Set up a battle against `enemy`, reading the roster and inventory from
    /// `store`. The first roster member with health left fights first.
    pub fn new(
        data: SharedData,
        config: BattleConfig,
        frontend: F,
        store: S,
        rng: R,
        enemy: IngredientInst,
    ) -> BattleResult<Self> {
        config.validate().map_err(BattleError::InvalidConfig)?;
        let roster = store.roster();
        let inventory = store.inventory();
        let active_index = roster
            .iter()
            .position(|ingredient| !ingredient.is_fainted())
            .ok_or(BattleError::NoEligibleIngredient)?;

        let player = Combatant::player(roster[active_index].clone(), active_index, &*data);
        let enemy = Combatant::enemy(enemy, &*data);

        let mut bus = EventBus::new();
        bus.push(BattleEvent::BattleStarted {
            player: player.name().to_string(),
            enemy: enemy.name().to_string(),
            enemy_level: enemy.level(),
        });
        bus.push(BattleEvent::StateEntered {
            state: BattleStateKind::Intro,
        });
        tracing::info!(
            "Battle started: {} vs wild {} (Lv. {})",
            player.name(),
            enemy.name(),
            enemy.level()
        );

        Ok(Self {
            data,
            config,
            frontend,
            store,
            rng,
            roster,
            inventory,
            active_index,
            combatants: Combatants::new(player, enemy),
            state: BattleStateKind::Intro,
            pending_intent: None,
            enemy_move: None,
            switching_active: false,
            active_knocked_out: false,
            player_knocked_out: false,
            bus,
            rounds: 0,
            outcome: None,
        })
    }

    /// Drive the battle to its end.
    pub async fn run(&mut self) -> BattleResult<BattleOutcome> {
        loop {
            if let Some(outcome) = self.outcome {
                return Ok(outcome);
            }
            self.step().await?;
        }
    }

    /// Run the current state's entry behaviour and return the state it moved to.
    pub async fn step(&mut self) -> BattleResult<BattleStateKind> {
        if self.outcome.is_some() {
            return Err(BattleError::AlreadyFinished);
        }

        match self.state {
            BattleStateKind::Intro => self.enter_intro().await,
            BattleStateKind::PreBattleInfo => self.enter_pre_battle_info().await,
            BattleStateKind::BringOutIngredient => self.enter_bring_out_ingredient().await,
            BattleStateKind::PlayerInput => self.enter_player_input().await,
            BattleStateKind::EnemyInput => self.enter_enemy_input()?,
            BattleStateKind::Battle => self.enter_battle().await?,
            BattleStateKind::PostAttackCheck => self.enter_post_attack_check().await,
            BattleStateKind::FleeAttempt => self.enter_flee_attempt().await,
            BattleStateKind::GainExperience => self.enter_gain_experience().await,
            BattleStateKind::SwitchIngredient => self.enter_switch_ingredient().await,
            BattleStateKind::Finished => self.enter_finished().await,
        }
        Ok(self.state)
    }

    fn set_state(&mut self, next: BattleStateKind) {
        tracing::debug!("battle state {} -> {}", self.state, next);
        self.state = next;
        self.bus.push(BattleEvent::StateEntered { state: next });
    }

    async fn enter_intro(&mut self) {
        self.frontend.play_scene_transition().await;
        self.set_state(BattleStateKind::PreBattleInfo);
    }

    async fn enter_pre_battle_info(&mut self) {
        let enemy = &self.combatants.enemy;
        self.frontend.play_appear_animation(enemy).await;
        self.bus.push(BattleEvent::CombatantAppeared {
            side: Side::Enemy,
            name: enemy.name().to_string(),
        });
        let message = format!("wild {} appeared!", enemy.name());
        self.frontend.show_messages_and_wait(&[message]).await;
        self.set_state(BattleStateKind::BringOutIngredient);
    }

    async fn enter_bring_out_ingredient(&mut self) {
        let player = &self.combatants.player;
        self.frontend.play_appear_animation(player).await;
        self.bus.push(BattleEvent::CombatantAppeared {
            side: Side::Player,
            name: player.name().to_string(),
        });
        let message = format!("go {}!", player.name());
        self.frontend.show_message_no_input(&message).await;

        // A voluntary switch spends the turn, so the enemy attacks the newcomer.
        if self.switching_active && !self.active_knocked_out {
            self.set_state(BattleStateKind::EnemyInput);
            return;
        }
        self.switching_active = false;
        self.active_knocked_out = false;
        self.set_state(BattleStateKind::PlayerInput);
    }

    async fn enter_player_input(&mut self) {
        loop {
            let context = MenuContext {
                active: &self.combatants.player,
                roster: &self.roster,
                inventory: &self.inventory,
            };
            let selection = self.frontend.choose_selection(context).await;
            tracing::debug!(?selection, "player selection");

            match selection {
                MenuSelection::Attack(move_index) => {
                    if move_index >= self.combatants.player.moves().len() {
                        tracing::warn!("ignoring selection of empty attack slot {}", move_index);
                        continue;
                    }
                    self.pending_intent = Some(PlayerIntent::UseMove(move_index));
                    self.set_state(BattleStateKind::EnemyInput);
                }
                MenuSelection::UseItem {
                    item_id,
                    roster_index,
                } => {
                    let item_use = ItemUse {
                        item_id,
                        roster_index,
                    };
                    match self.use_item(item_use).await {
                        Ok(()) => {
                            self.pending_intent = Some(PlayerIntent::UseItem(item_use));
                            self.set_state(BattleStateKind::EnemyInput);
                        }
                        Err(reason) => {
                            self.bus.push(BattleEvent::ItemRejected { item_id, reason });
                            self.frontend
                                .show_messages_and_wait(&[reason.to_string()])
                                .await;
                            self.set_state(BattleStateKind::PlayerInput);
                        }
                    }
                }
                MenuSelection::Flee => {
                    self.pending_intent = Some(PlayerIntent::AttemptFlee);
                    self.set_state(BattleStateKind::FleeAttempt);
                }
                MenuSelection::SwitchIngredient => {
                    self.set_state(BattleStateKind::SwitchIngredient);
                }
            }
            return;
        }
    }

    fn enter_enemy_input(&mut self) -> BattleResult<()> {
        let move_index = self.combatants.enemy.pick_random_move(&mut self.rng)?;
        if let Some(attack) = self.combatants.enemy.moves().get(move_index) {
            self.bus.push(BattleEvent::EnemyChoseMove {
                attack: attack.name.clone(),
            });
        }
        self.enemy_move = Some(move_index);
        self.set_state(BattleStateKind::Battle);
        Ok(())
    }

    async fn enter_battle(&mut self) -> BattleResult<()> {
        let intent = self.pending_intent.take();
        let enemy_move = self.enemy_move.take();
        let (Some(intent), Some(enemy_move)) = (intent, enemy_move) else {
            return Err(BattleError::MissingAction {
                state: BattleStateKind::Battle.to_string(),
            });
        };

        self.rounds += 1;
        tracing::debug!(round = self.rounds, ?intent, enemy_move, "resolving round");

        let mut queue = ActionQueue::build(&intent, enemy_move, &mut self.rng, &mut self.bus);
        resolve_round(
            &mut queue,
            &mut self.combatants,
            &mut self.frontend,
            &mut self.bus,
        )
        .await?;

        self.switching_active = false;
        self.set_state(BattleStateKind::PostAttackCheck);
        Ok(())
    }

    async fn enter_post_attack_check(&mut self) {
        self.sync_active_into_roster();
        self.save_roster();

        if self.combatants.enemy.is_fainted() {
            let enemy = &self.combatants.enemy;
            self.frontend.play_death_animation(enemy).await;
            self.bus.push(BattleEvent::CombatantFainted {
                side: Side::Enemy,
                name: enemy.name().to_string(),
            });
            let message = format!("Wild {} fainted.", enemy.name());
            self.frontend.show_messages_and_wait(&[message]).await;
            self.set_state(BattleStateKind::GainExperience);
            return;
        }

        if self.combatants.player.is_fainted() {
            let player = &self.combatants.player;
            self.frontend.play_death_animation(player).await;
            self.bus.push(BattleEvent::CombatantFainted {
                side: Side::Player,
                name: player.name().to_string(),
            });
            let fainted = format!("{} fainted.", player.name());

            if !self.has_other_eligible() {
                self.frontend
                    .show_messages_and_wait(&[
                        fainted,
                        "You have no more Ingredients, escaping to safety...".to_string(),
                    ])
                    .await;
                self.player_knocked_out = true;
                self.set_state(BattleStateKind::Finished);
                return;
            }

            self.frontend
                .show_messages_and_wait(&[
                    fainted,
                    "Choose another Ingredient to continue the battle".to_string(),
                ])
                .await;
            self.active_knocked_out = true;
            self.set_state(BattleStateKind::SwitchIngredient);
            return;
        }

        self.set_state(BattleStateKind::PlayerInput);
    }

    async fn enter_flee_attempt(&mut self) {
        let roll = self
            .rng
            .between(1, self.config.flee_roll_max, "flee roll");
        let success = roll > self.config.flee_success_above;
        self.bus.push(BattleEvent::FleeAttempted { roll, success });

        if success {
            self.frontend
                .show_messages_and_wait(&["You got away safely!".to_string()])
                .await;
            self.frontend.play_sound(FLEE_SOUND);
            self.set_state(BattleStateKind::Finished);
            return;
        }

        self.frontend
            .show_messages_and_wait(&["You failed to run away...".to_string()])
            .await;
        self.set_state(BattleStateKind::EnemyInput);
    }

    async fn enter_gain_experience(&mut self) {
        self.sync_active_into_roster();
        let report = distribute_experience(
            &mut self.roster,
            self.active_index,
            self.combatants.enemy.base_exp_value(),
            self.combatants.enemy.level(),
            &mut self.rng,
            &mut self.bus,
        );
        self.combatants
            .player
            .refresh_record(self.roster[self.active_index].clone());

        let ratio = self.combatants.player.exp_progress();
        self.frontend
            .play_exp_bar_animation(report.active_leveled_up, ratio)
            .await;
        self.frontend.show_messages_and_wait(&report.messages).await;

        self.save_roster();
        self.set_state(BattleStateKind::Finished);
    }

    async fn enter_switch_ingredient(&mut self) {
        self.sync_active_into_roster();

        if !self.has_other_eligible() {
            self.frontend
                .show_messages_and_wait(&[
                    "You have no other Ingredients in your party...".to_string()
                ])
                .await;
            self.set_state(BattleStateKind::PlayerInput);
            return;
        }

        let forced = self.active_knocked_out;
        self.bus.push(BattleEvent::SwitchRequested { forced });

        let chosen = loop {
            let choice = self
                .frontend
                .choose_roster_member(&self.roster, self.active_index, forced)
                .await;

            let rejection = match choice {
                None if forced => "You must select another ingredient for now...",
                None => {
                    self.set_state(BattleStateKind::PlayerInput);
                    return;
                }
                Some(index) => match self.roster.get(index) {
                    None => "There is no ingredient in that slot.",
                    Some(ingredient) if ingredient.is_fainted() => {
                        "Selected ingredient is not fresh."
                    }
                    Some(_) if index == self.active_index => "That ingredient is already battling.",
                    Some(_) => break index,
                },
            };
            self.frontend
                .show_messages_and_wait(&[rejection.to_string()])
                .await;
        };

        // The outgoing ingredient leaves the field before the newcomer appears.
        self.frontend
            .play_death_animation(&self.combatants.player)
            .await;

        let from = self.combatants.player.name().to_string();
        self.active_index = chosen;
        self.combatants
            .player
            .switch_to(self.roster[chosen].clone(), chosen, &*self.data);
        self.bus.push(BattleEvent::CombatantSwitched {
            from,
            to: self.combatants.player.name().to_string(),
        });

        self.switching_active = true;
        if !forced {
            self.pending_intent = Some(PlayerIntent::SwitchCombatant(chosen));
        }
        self.set_state(BattleStateKind::BringOutIngredient);
    }

    async fn enter_finished(&mut self) {
        let result = if self.player_knocked_out {
            OutcomeKind::KnockedOut
        } else if self.combatants.enemy.is_fainted() {
            OutcomeKind::Victory
        } else {
            OutcomeKind::Fled
        };
        let outcome = BattleOutcome {
            result,
            player_knocked_out: self.player_knocked_out,
            rounds: self.rounds,
        };

        self.frontend.transition_out(&outcome).await;
        self.bus.push(BattleEvent::BattleEnded { outcome });
        tracing::info!("Battle finished: {} after {} rounds", result, self.rounds);
        self.outcome = Some(outcome);
    }

    /// Apply an item picked from the bag. Rejections leave everything untouched.
    async fn use_item(&mut self, item_use: ItemUse) -> Result<(), ItemRejection> {
        let slot = self
            .inventory
            .iter()
            .position(|entry| entry.item_id == item_use.item_id && entry.quantity > 0)
            .ok_or(ItemRejection::NotInBag)?;
        let Some(item) = self.data.item(item_use.item_id).cloned() else {
            tracing::warn!("item {} is in the bag but has no data", item_use.item_id);
            return Err(ItemRejection::UnknownItem);
        };

        self.sync_active_into_roster();
        let target = self
            .roster
            .get_mut(item_use.roster_index)
            .ok_or(ItemRejection::InvalidTarget)?;

        let healed = match item.effect {
            ItemEffect::HealFlat(amount) => {
                if target.is_fainted() {
                    return Err(ItemRejection::TargetFainted);
                }
                if target.is_at_full_health() {
                    return Err(ItemRejection::TargetAtFullHealth);
                }
                target.heal(amount)
            }
        };
        let target_name = target.name.clone();

        self.inventory[slot].quantity -= 1;
        self.inventory.retain(|entry| entry.quantity > 0);
        self.bus.push(BattleEvent::ItemUsed {
            item: item.name.clone(),
            target: target_name.clone(),
            healed,
        });

        if item_use.roster_index == self.active_index {
            self.combatants
                .player
                .refresh_record(self.roster[self.active_index].clone());
            self.frontend
                .update_health_bar(&self.combatants.player)
                .await;
        }

        self.store.set_inventory(self.inventory.clone());
        self.save_roster();
        self.frontend
            .show_messages_and_wait(&[format!("{} freshened up by {} HP", target_name, healed)])
            .await;
        Ok(())
    }

    fn sync_active_into_roster(&mut self) {
        if let Some(slot) = self.roster.get_mut(self.active_index) {
            *slot = self.combatants.player.record().clone();
        }
    }

    fn save_roster(&mut self) {
        self.store.set_roster(self.roster.clone());
        self.bus.push(BattleEvent::RosterSaved);
    }

    /// Someone other than the active ingredient can still fight.
    fn has_other_eligible(&self) -> bool {
        self.roster
            .iter()
            .enumerate()
            .any(|(index, ingredient)| index != self.active_index && !ingredient.is_fainted())
    }

    pub fn state(&self) -> BattleStateKind {
        self.state
    }

    pub fn events(&self) -> &EventBus {
        &self.bus
    }

    pub fn roster(&self) -> &[IngredientInst] {
        &self.roster
    }

    pub fn inventory(&self) -> &[InventoryEntry] {
        &self.inventory
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn combatants(&self) -> &Combatants {
        &self.combatants
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        self.outcome
    }

    pub fn player_knocked_out(&self) -> bool {
        self.player_knocked_out
    }

    pub fn frontend(&self) -> &F {
        &self.frontend
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_parts(self) -> (F, S, EventBus) {
        (self.frontend, self.store, self.bus)
    }

    #[cfg(test)]
    pub(crate) fn jump_to(&mut self, state: BattleStateKind) {
        self.set_state(state);
    }

    #[cfg(test)]
    pub(crate) fn combatants_mut(&mut self) -> &mut Combatants {
        &mut self.combatants
    }

    #[cfg(test)]
    pub(crate) fn roster_mut(&mut self) -> &mut Vec<IngredientInst> {
        &mut self.roster
    }

    #[cfg(test)]
    pub(crate) fn queue_round(&mut self, intent: PlayerIntent, enemy_move: usize) {
        self.pending_intent = Some(intent);
        self.enemy_move = Some(enemy_move);
    }
}
