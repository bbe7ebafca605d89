use crate::battle::rng::RandomSource;
use crate::ingredient::{IngredientInst, MAX_LEVEL};
use crate::progression::rate::total_points_needed_for_level;

// Level-up bonus ranges, both drawn inclusively.
const HEALTH_BONUS_STEP: u32 = 5;
const HEALTH_BONUS_ROLL_MAX: u32 = 3;
const ATTACK_BONUS_BASE: u32 = 1;
const ATTACK_BONUS_ROLL_MAX: u32 = 1;

const EXP_DIVISOR: u64 = 7;

/// Stats gained from one call to `apply_experience_gain`. All zero when no
/// level was gained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatChange {
    pub levels_gained: u32,
    pub health_gained: u32,
    pub attack_gained: u32,
}

impl StatChange {
    pub fn leveled_up(&self) -> bool {
        self.levels_gained > 0
    }
}

/// Experience awarded for defeating an enemy of `enemy_level`:
/// `round(base_exp * enemy_level / 7)`.
///
/// Benched and active roster members receive the same award; `is_active` is
/// accepted so callers keep stating which award they mean.
pub fn exp_gained_from_defeat(base_exp: u32, enemy_level: u8, _is_active: bool) -> u32 {
    let scaled = u64::from(base_exp) * u64::from(enemy_level);
    // Round half up, the way the original curve rounds.
    let rounded = (2 * scaled + EXP_DIVISOR) / (2 * EXP_DIVISOR);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}

/// Add experience and apply every level-up it unlocks.
///
/// Each level gained draws an attack bonus of 1 or 2 and a health bonus of
/// 0, 5, 10 or 15 from `rng`. The attack bonus raises both `base_attack` and
/// `current_attack`; the health bonus raises `max_hp` only. Ingredients at
/// the level cap gain nothing, not even experience.
pub fn apply_experience_gain<R: RandomSource + ?Sized>(
    ingredient: &mut IngredientInst,
    gained_exp: u32,
    rng: &mut R,
) -> StatChange {
    let mut change = StatChange::default();
    if ingredient.level >= MAX_LEVEL {
        return change;
    }

    ingredient.current_exp = ingredient.current_exp.saturating_add(gained_exp);

    while ingredient.level < MAX_LEVEL
        && ingredient.current_exp >= total_points_needed_for_level(ingredient.level + 1)
    {
        ingredient.level += 1;

        let attack_bonus =
            ATTACK_BONUS_BASE + rng.between(0, ATTACK_BONUS_ROLL_MAX, "level-up attack bonus");
        let health_bonus =
            HEALTH_BONUS_STEP * rng.between(0, HEALTH_BONUS_ROLL_MAX, "level-up health bonus");

        ingredient.max_hp += health_bonus;
        ingredient.base_attack += attack_bonus;
        ingredient.current_attack += attack_bonus;

        change.levels_gained += 1;
        change.health_gained += health_bonus;
        change.attack_gained += attack_bonus;
    }

    if change.leveled_up() {
        tracing::info!(
            "{} reached level {} (+{} attack, +{} health)",
            ingredient.name,
            ingredient.level,
            change.attack_gained,
            change.health_gained
        );
    }
    change
}
