use crate::battle::action::ItemRejection;
use crate::battle::combatant::Side;
use serde::{Deserialize, Serialize};
use strum::Display;

/// Named states of the battle flow. `Intro` is the initial state and
/// `Finished` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum BattleStateKind {
    Intro,
    PreBattleInfo,
    BringOutIngredient,
    PlayerInput,
    EnemyInput,
    Battle,
    PostAttackCheck,
    FleeAttempt,
    GainExperience,
    SwitchIngredient,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum OutcomeKind {
    Victory,
    Fled,
    KnockedOut,
}

/// What the battle hands back to the world when it ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleOutcome {
    pub result: OutcomeKind,
    /// Every roster member fainted; the world should heal and reposition the player.
    pub player_knocked_out: bool,
    pub rounds: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BattleEvent {
    // State flow
    StateEntered {
        state: BattleStateKind,
    },
    BattleStarted {
        player: String,
        enemy: String,
        enemy_level: u8,
    },
    BattleEnded {
        outcome: BattleOutcome,
    },

    // Round resolution
    AttackOrderDecided {
        player_first: bool,
    },
    EnemyChoseMove {
        attack: String,
    },
    MoveUsed {
        side: Side,
        name: String,
        attack: String,
    },
    DamageDealt {
        target: Side,
        name: String,
        damage: u32,
        remaining_hp: u32,
    },
    ActionSkipped {
        side: Side,
        name: String,
    },
    CombatantFainted {
        side: Side,
        name: String,
    },

    // Player actions
    CombatantAppeared {
        side: Side,
        name: String,
    },
    ItemUsed {
        item: String,
        target: String,
        healed: u32,
    },
    ItemRejected {
        item_id: u32,
        reason: ItemRejection,
    },
    FleeAttempted {
        roll: u32,
        success: bool,
    },
    SwitchRequested {
        forced: bool,
    },
    CombatantSwitched {
        from: String,
        to: String,
    },

    // Rewards
    ExperienceGained {
        name: String,
        exp: u32,
    },
    LevelUp {
        name: String,
        new_level: u8,
        attack_gained: u32,
        health_gained: u32,
    },
    RosterSaved,
}

impl BattleEvent {
    /// Human-readable line for the battle log, `None` for bookkeeping events.
    pub fn format(&self) -> Option<String> {
        match self {
            BattleEvent::StateEntered { .. }
            | BattleEvent::RosterSaved
            | BattleEvent::EnemyChoseMove { .. }
            | BattleEvent::SwitchRequested { .. } => None,

            BattleEvent::BattleStarted {
                player,
                enemy,
                enemy_level,
            } => Some(format!(
                "{} faces a wild {} (Lv. {})",
                player, enemy, enemy_level
            )),
            BattleEvent::BattleEnded { outcome } => Some(match outcome.result {
                OutcomeKind::Victory => format!("Won the battle after {} rounds", outcome.rounds),
                OutcomeKind::Fled => format!("Fled the battle after {} rounds", outcome.rounds),
                OutcomeKind::KnockedOut => {
                    format!("Lost the battle after {} rounds", outcome.rounds)
                }
            }),
            BattleEvent::AttackOrderDecided { player_first } => Some(if *player_first {
                "Player attacks first".to_string()
            } else {
                "Enemy attacks first".to_string()
            }),
            BattleEvent::MoveUsed { side, name, attack } => Some(match side {
                Side::Player => format!("{} used {}", name, attack),
                Side::Enemy => format!("foe {} used {}", name, attack),
            }),
            BattleEvent::DamageDealt {
                name,
                damage,
                remaining_hp,
                ..
            } => Some(format!(
                "{} took {} damage ({} HP left)",
                name, damage, remaining_hp
            )),
            BattleEvent::ActionSkipped { name, .. } => {
                Some(format!("{} is too worn out to act", name))
            }
            BattleEvent::CombatantFainted { side, name } => Some(match side {
                Side::Player => format!("{} fainted.", name),
                Side::Enemy => format!("Wild {} fainted.", name),
            }),
            BattleEvent::CombatantAppeared { side, name } => Some(match side {
                Side::Player => format!("go {}!", name),
                Side::Enemy => format!("wild {} appeared!", name),
            }),
            BattleEvent::ItemUsed {
                item,
                target,
                healed,
            } => Some(format!("Used {} on {}, restoring {} HP", item, target, healed)),
            BattleEvent::ItemRejected { reason, .. } => Some(reason.to_string()),
            BattleEvent::FleeAttempted { success, .. } => Some(if *success {
                "You got away safely!".to_string()
            } else {
                "You failed to run away...".to_string()
            }),
            BattleEvent::CombatantSwitched { from, to } => {
                Some(format!("{} was swapped out for {}", from, to))
            }
            BattleEvent::ExperienceGained { name, exp } => {
                Some(format!("{} gained {} exp.", name, exp))
            }
            BattleEvent::LevelUp {
                name, new_level, ..
            } => Some(format!("{} level increased to {}!", name, new_level)),
        }
    }
}

/// Ordered log of everything that happened during a battle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        tracing::debug!(?event, "battle event");
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    /// States entered so far, in order.
    pub fn states(&self) -> Vec<BattleStateKind> {
        self.events
            .iter()
            .filter_map(|event| match event {
                BattleEvent::StateEntered { state } => Some(*state),
                _ => None,
            })
            .collect()
    }

    /// Print all events in debug format with indentation.
    pub fn print_debug(&self) {
        for event in &self.events {
            println!("  {:?}", event);
        }
    }

    /// Print all events in debug format with a custom prefix message.
    pub fn print_debug_with_message(&self, message: &str) {
        println!("{}", message);
        self.print_debug();
    }

    /// Print all events using their formatted text, falling back to debug
    /// format for silent events.
    pub fn print_formatted(&self) {
        for event in &self.events {
            match event.format() {
                Some(formatted) => println!("  {}", formatted),
                None => println!("  {:?} (silent)", event),
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl std::fmt::Display for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for event in &self.events {
            if let Some(line) = event.format() {
                writeln!(f, "{}", line)?;
            }
        }
        Ok(())
    }
}
