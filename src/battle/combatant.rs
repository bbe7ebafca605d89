use crate::data::DataLookup;
use crate::errors::{BattleError, BattleResult};
use crate::ingredient::IngredientInst;
use crate::progression;
use crate::battle::rng::RandomSource;
use schema::AttackData;
use serde::{Deserialize, Serialize};

/// Most attacks a combatant carries into battle.
pub const MAX_MOVES: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }
}

/// State shared by both sides: the wrapped roster record plus its resolved attacks.
#[derive(Debug, Clone, PartialEq)]
pub struct CombatantCore {
    record: IngredientInst,
    moves: Vec<AttackData>,
}

impl CombatantCore {
    fn new(record: IngredientInst, data: &dyn DataLookup) -> Self {
        let moves = resolve_moves(&record, data);
        Self { record, moves }
    }
}

/// What only one side can do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideExtras {
    /// The player's fighter remembers which roster slot it came from.
    Player { roster_index: usize },
    Enemy,
}

/// One side's active fighter.
///
/// Switching replaces the wrapped record in place, so anything holding the
/// combatant keeps a valid handle across the switch.
#[derive(Debug, Clone, PartialEq)]
pub struct Combatant {
    core: CombatantCore,
    extras: SideExtras,
}

impl Combatant {
    pub fn player(record: IngredientInst, roster_index: usize, data: &dyn DataLookup) -> Self {
        Self {
            core: CombatantCore::new(record, data),
            extras: SideExtras::Player { roster_index },
        }
    }

    pub fn enemy(record: IngredientInst, data: &dyn DataLookup) -> Self {
        Self {
            core: CombatantCore::new(record, data),
            extras: SideExtras::Enemy,
        }
    }

    pub fn side(&self) -> Side {
        match self.extras {
            SideExtras::Player { .. } => Side::Player,
            SideExtras::Enemy => Side::Enemy,
        }
    }

    pub fn roster_index(&self) -> Option<usize> {
        match self.extras {
            SideExtras::Player { roster_index } => Some(roster_index),
            SideExtras::Enemy => None,
        }
    }

    pub fn record(&self) -> &IngredientInst {
        &self.core.record
    }

    pub fn name(&self) -> &str {
        &self.core.record.name
    }

    pub fn level(&self) -> u8 {
        self.core.record.level
    }

    pub fn current_hp(&self) -> u32 {
        self.core.record.current_hp
    }

    pub fn max_hp(&self) -> u32 {
        self.core.record.max_hp
    }

    /// Flat damage dealt by every successful attack.
    pub fn base_attack(&self) -> u32 {
        self.core.record.base_attack
    }

    pub fn moves(&self) -> &[AttackData] {
        &self.core.moves
    }

    pub fn is_fainted(&self) -> bool {
        self.core.record.is_fainted()
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.core.record.take_damage(amount);
    }

    /// Returns the health actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        self.core.record.heal(amount)
    }

    /// Uniformly pick one of the known attacks.
    pub fn pick_random_move<R: RandomSource + ?Sized>(&self, rng: &mut R) -> BattleResult<usize> {
        let count = self.core.moves.len();
        if count == 0 {
            return Err(BattleError::EmptyMoveList {
                name: self.name().to_string(),
            });
        }
        let index = rng.between(0, (count - 1) as u32, "enemy move choice") as usize;
        Ok(index.min(count - 1))
    }

    /// Fight on with a different roster member.
    pub fn switch_to(&mut self, record: IngredientInst, roster_index: usize, data: &dyn DataLookup) {
        self.core = CombatantCore::new(record, data);
        if let SideExtras::Player { roster_index: slot } = &mut self.extras {
            *slot = roster_index;
        }
    }

    /// Take over progress made on the roster copy of the same ingredient.
    pub fn refresh_record(&mut self, record: IngredientInst) {
        self.core.record = record;
    }

    /// Experience the defeated ingredient is worth before level scaling.
    pub fn base_exp_value(&self) -> u32 {
        self.core.record.base_exp
    }

    /// Fill of the experience bar for the current level.
    pub fn exp_progress(&self) -> f64 {
        progression::progress_ratio(self.core.record.level, self.core.record.current_exp)
    }

    /// Name as the battle log shows it when this side acts.
    pub fn display_name(&self) -> String {
        match self.side() {
            Side::Player => self.name().to_string(),
            Side::Enemy => format!("foe {}", self.name()),
        }
    }
}

fn resolve_moves(record: &IngredientInst, data: &dyn DataLookup) -> Vec<AttackData> {
    let mut moves = Vec::with_capacity(MAX_MOVES);
    for id in &record.attack_ids {
        match data.attack(*id) {
            Some(attack) => moves.push(attack.clone()),
            None => tracing::warn!("{} knows unknown attack {}, skipping it", record.name, id),
        }
    }
    if moves.len() > MAX_MOVES {
        tracing::warn!(
            "{} knows {} attacks, only the first {} are usable",
            record.name,
            moves.len(),
            MAX_MOVES
        );
        moves.truncate(MAX_MOVES);
    }
    moves
}

/// Both active fighters, borrowed as a pair during a round.
#[derive(Debug, Clone, PartialEq)]
pub struct Combatants {
    pub player: Combatant,
    pub enemy: Combatant,
}

impl Combatants {
    pub fn new(player: Combatant, enemy: Combatant) -> Self {
        Self { player, enemy }
    }

    pub fn get(&self, side: Side) -> &Combatant {
        match side {
            Side::Player => &self.player,
            Side::Enemy => &self.enemy,
        }
    }

    pub fn get_mut(&mut self, side: Side) -> &mut Combatant {
        match side {
            Side::Player => &mut self.player,
            Side::Enemy => &mut self.enemy,
        }
    }
}
