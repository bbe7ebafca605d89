use std::collections::VecDeque;

use crate::battle::action::PlayerIntent;
use crate::battle::combatant::{Combatants, Side};
use crate::battle::frontend::{Messaging, Presentation};
use crate::battle::rng::RandomSource;
use crate::battle::state::{BattleEvent, EventBus};
use crate::errors::{BattleError, BattleResult};
use schema::AttackTarget;

/// One attack waiting to resolve this round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BattleAction {
    pub attacker: Side,
    pub move_index: usize,
}

/// Attacks for the current round, in the order they resolve.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionQueue {
    actions: VecDeque<BattleAction>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self {
            actions: VecDeque::new(),
        }
    }

    /// Order the round's attacks.
    ///
    /// Using an item, a failed flee and a switch all spend the player's turn,
    /// so only the enemy attacks. When both sides attack, an unweighted coin
    /// flip decides who goes first; there is no speed stat.
    pub fn build<R: RandomSource + ?Sized>(
        intent: &PlayerIntent,
        enemy_move: usize,
        rng: &mut R,
        bus: &mut EventBus,
    ) -> Self {
        let mut queue = Self::new();
        let enemy_attack = BattleAction {
            attacker: Side::Enemy,
            move_index: enemy_move,
        };

        if intent.consumes_turn() {
            queue.push_back(enemy_attack);
            return queue;
        }

        if let PlayerIntent::UseMove(move_index) = *intent {
            let player_attack = BattleAction {
                attacker: Side::Player,
                move_index,
            };
            let player_first = rng.between(0, 1, "attack order coin flip") == 0;
            bus.push(BattleEvent::AttackOrderDecided { player_first });

            if player_first {
                queue.push_back(player_attack);
                queue.push_back(enemy_attack);
            } else {
                queue.push_back(enemy_attack);
                queue.push_back(player_attack);
            }
        }
        queue
    }

    pub fn push_back(&mut self, action: BattleAction) {
        self.actions.push_back(action);
    }

    pub fn pop_front(&mut self) -> Option<BattleAction> {
        self.actions.pop_front()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.actions.len()
    }

    #[cfg(test)]
    pub(crate) fn attackers(&self) -> Vec<Side> {
        self.actions.iter().map(|action| action.attacker).collect()
    }
}

/// Resolve every queued attack strictly one after another.
pub async fn resolve_round<F>(
    queue: &mut ActionQueue,
    combatants: &mut Combatants,
    frontend: &mut F,
    bus: &mut EventBus,
) -> BattleResult<()>
where
    F: Presentation + Messaging + ?Sized,
{
    while let Some(action) = queue.pop_front() {
        execute_attack(action, combatants, frontend, bus).await?;
    }
    Ok(())
}

/// announce -> sound -> move animation -> damage animation -> apply damage -> health bar
async fn execute_attack<F>(
    action: BattleAction,
    combatants: &mut Combatants,
    frontend: &mut F,
    bus: &mut EventBus,
) -> BattleResult<()>
where
    F: Presentation + Messaging + ?Sized,
{
    let attacker = combatants.get(action.attacker);
    if attacker.is_fainted() {
        tracing::debug!("{} has fainted, skipping its attack", attacker.name());
        bus.push(BattleEvent::ActionSkipped {
            side: action.attacker,
            name: attacker.name().to_string(),
        });
        return Ok(());
    }

    let attack = attacker
        .moves()
        .get(action.move_index)
        .cloned()
        .ok_or_else(|| BattleError::InvalidMoveIndex {
            name: attacker.name().to_string(),
            index: action.move_index,
        })?;
    let damage = attacker.base_attack();
    let announcement = format!("{} used {}", attacker.display_name(), attack.name);

    bus.push(BattleEvent::MoveUsed {
        side: action.attacker,
        name: attacker.name().to_string(),
        attack: attack.name.clone(),
    });

    let target = match attack.target {
        AttackTarget::Opponent => action.attacker.opponent(),
        AttackTarget::User => action.attacker,
    };

    frontend.show_message_no_input(&announcement).await;
    frontend.play_sound(&attack.audio_key);
    frontend.play_move_animation(attack.animation, target).await;
    frontend.play_damage_animation(combatants.get(target)).await;

    let defender = combatants.get_mut(target);
    defender.take_damage(damage);
    bus.push(BattleEvent::DamageDealt {
        target,
        name: defender.name().to_string(),
        damage,
        remaining_hp: defender.current_hp(),
    });

    frontend.update_health_bar(combatants.get(target)).await;
    Ok(())
}
