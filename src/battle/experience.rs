use crate::battle::rng::RandomSource;
use crate::battle::state::{BattleEvent, EventBus};
use crate::ingredient::IngredientInst;
use crate::progression::{apply_experience_gain, exp_gained_from_defeat};

/// Result of sharing out experience after a win.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExperienceReport {
    /// Messages for the info pane. The active ingredient's block comes first.
    pub messages: Vec<String>,
    pub active_leveled_up: bool,
}

/// Award experience for the defeated enemy to every roster member still
/// standing. Fainted members get nothing.
pub fn distribute_experience<R: RandomSource + ?Sized>(
    roster: &mut [IngredientInst],
    active_index: usize,
    enemy_base_exp: u32,
    enemy_level: u8,
    rng: &mut R,
    bus: &mut EventBus,
) -> ExperienceReport {
    let active_award = exp_gained_from_defeat(enemy_base_exp, enemy_level, true);
    let benched_award = exp_gained_from_defeat(enemy_base_exp, enemy_level, false);

    let mut active_messages = Vec::new();
    let mut benched_messages = Vec::new();
    let mut active_leveled_up = false;

    for (index, ingredient) in roster.iter_mut().enumerate() {
        if ingredient.is_fainted() {
            continue;
        }

        let is_active = index == active_index;
        let award = if is_active { active_award } else { benched_award };
        let change = apply_experience_gain(ingredient, award, rng);

        bus.push(BattleEvent::ExperienceGained {
            name: ingredient.name.clone(),
            exp: award,
        });
        let mut messages = vec![format!("{} gained {} exp.", ingredient.name, award)];

        if change.leveled_up() {
            bus.push(BattleEvent::LevelUp {
                name: ingredient.name.clone(),
                new_level: ingredient.level,
                attack_gained: change.attack_gained,
                health_gained: change.health_gained,
            });
            messages.push(format!(
                "{} level increased to {}!",
                ingredient.name, ingredient.level
            ));
            messages.push(format!(
                "{} attack increased by {} and health increased by {}",
                ingredient.name, change.attack_gained, change.health_gained
            ));
        }

        if is_active {
            active_leveled_up = change.leveled_up();
            active_messages = messages;
        } else {
            benched_messages.extend(messages);
        }
    }

    active_messages.extend(benched_messages);
    ExperienceReport {
        messages: active_messages,
        active_leveled_up,
    }
}
