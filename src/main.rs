use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use ingredient_battle::{
    BattleMachine, ConsoleFrontend, GameConfig, GameData, IngredientInst, InventoryEntry,
    JsonFileStore, SaveStore, ThreadRandom,
};
use tracing_subscriber::EnvFilter;

const STARTER_SPECIES: [u32; 3] = [1, 3, 4];
const WILD_SPECIES: u32 = 2;
const STARTER_ITEM: InventoryEntry = InventoryEntry {
    item_id: 1,
    quantity: 1,
};

fn starting_save(data: &GameData) -> Result<Vec<IngredientInst>, Box<dyn Error>> {
    let mut roster = Vec::with_capacity(STARTER_SPECIES.len());
    for (slot, species_id) in STARTER_SPECIES.iter().enumerate() {
        let species = data.species(*species_id)?;
        roster.push(IngredientInst::from_species(slot as u32 + 1, species));
    }
    Ok(roster)
}

/// What the world does for a knocked-out player: everyone is restored.
fn heal_roster(store: &mut JsonFileStore) {
    let healed = store
        .roster()
        .into_iter()
        .map(|mut ingredient| {
            ingredient.current_hp = ingredient.max_hp;
            ingredient
        })
        .collect();
    store.set_roster(healed);
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("config.ron"));
    let config = GameConfig::load(&config_path)?;
    let data = GameData::load(&config.data_dir)?;

    let mut store = JsonFileStore::open(config.save_path.clone());
    if store.is_empty() {
        tracing::info!("Fresh save, handing out the starter ingredients");
        store.set_roster(starting_save(&data)?);
        store.set_inventory(vec![STARTER_ITEM]);
    }
    if store.roster().iter().all(IngredientInst::is_fainted) {
        heal_roster(&mut store);
    }

    let enemy = IngredientInst::from_species(0, data.species(WILD_SPECIES)?);
    let frontend = ConsoleFrontend::new(config.battle.skip_animations);
    let mut machine = BattleMachine::new(
        Arc::new(data),
        config.battle.clone(),
        frontend,
        store,
        ThreadRandom,
        enemy,
    )?;

    let outcome = machine.run().await?;
    let (_, mut store, events) = machine.into_parts();
    tracing::debug!("battle log:\n{}", events);

    if outcome.player_knocked_out {
        println!("You rush home and your ingredients are restored.");
        heal_roster(&mut store);
    }
    Ok(())
}
