use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use schema::{AttackData, AttackKey, AttackTarget, IngredientSpecies, ItemData, ItemEffect};

use crate::battle::action::MenuSelection;
use crate::battle::combatant::{Combatant, Side};
use crate::battle::frontend::{MenuContext, Messaging, PlayerInput, Presentation};
use crate::battle::machine::{BattleMachine, SharedData};
use crate::battle::rng::ScriptedRandom;
use crate::battle::state::BattleOutcome;
use crate::config::BattleConfig;
use crate::data::GameData;
use crate::errors::BattleResult;
use crate::ingredient::{IngredientInst, InventoryEntry};
use crate::store::MemoryStore;

pub const HEAL_ITEM_ID: u32 = 1;

/// A builder for test ingredients with small, easy-to-reason-about stats.
///
/// # Example
/// ```ignore
/// let chili = TestIngredientBuilder::new("Chili")
///     .with_hp(10)
///     .with_attack(30)
///     .build();
/// ```
pub struct TestIngredientBuilder {
    name: String,
    id: u32,
    level: u8,
    max_hp: u32,
    current_hp: Option<u32>,
    base_attack: u32,
    base_exp: u32,
    attack_ids: Vec<u32>,
}

impl TestIngredientBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            id: 1,
            level: 5,
            max_hp: 25,
            current_hp: None,
            base_attack: 5,
            base_exp: 45,
            attack_ids: vec![1, 2],
        }
    }

    pub fn with_id(mut self, id: u32) -> Self {
        self.id = id;
        self
    }

    pub fn with_level(mut self, level: u8) -> Self {
        self.level = level;
        self
    }

    pub fn with_max_hp(mut self, max_hp: u32) -> Self {
        self.max_hp = max_hp;
        self
    }

    /// Sets the current HP. If not set, HP will be max.
    pub fn with_hp(mut self, hp: u32) -> Self {
        self.current_hp = Some(hp);
        self
    }

    pub fn fainted(self) -> Self {
        self.with_hp(0)
    }

    pub fn with_attack(mut self, base_attack: u32) -> Self {
        self.base_attack = base_attack;
        self
    }

    pub fn with_base_exp(mut self, base_exp: u32) -> Self {
        self.base_exp = base_exp;
        self
    }

    pub fn with_attack_ids(mut self, attack_ids: Vec<u32>) -> Self {
        self.attack_ids = attack_ids;
        self
    }

    pub fn build(self) -> IngredientInst {
        let species = IngredientSpecies {
            id: self.id,
            name: self.name,
            asset_key: "TEST".to_string(),
            asset_frame: 0,
            level: self.level,
            max_hp: self.max_hp,
            base_attack: self.base_attack,
            attack_ids: self.attack_ids,
            base_exp: self.base_exp,
        };
        let mut ingredient = IngredientInst::from_species(self.id, &species);
        if let Some(hp) = self.current_hp {
            ingredient.current_hp = hp.min(ingredient.max_hp);
        }
        ingredient
    }
}

fn attack(id: u32, name: &str, animation: AttackKey, audio_key: &str) -> AttackData {
    AttackData {
        id,
        name: name.to_string(),
        animation,
        audio_key: audio_key.to_string(),
        target: AttackTarget::Opponent,
    }
}

/// Attacks 1-5 and a single heal item, mirroring the shipped data.
pub fn test_data() -> GameData {
    GameData::new(
        vec![
            attack(1, "Lafire", AttackKey::Lafire, "flame"),
            attack(2, "Slash", AttackKey::SlashPurple, "claw"),
            attack(3, "Dark Spell", AttackKey::DarkSpell, "dark"),
            attack(4, "Green Slash", AttackKey::GreenSlash, "claw"),
            attack(5, "Flame Slash", AttackKey::FlameSlash, "flame"),
        ],
        Vec::new(),
        vec![ItemData {
            id: HEAL_ITEM_ID,
            name: "Fresh Water".to_string(),
            effect: ItemEffect::HealFlat(30),
            description: String::new(),
        }],
    )
}

pub fn shared_test_data() -> SharedData {
    Arc::new(test_data())
}

pub fn player_combatant(record: IngredientInst) -> Combatant {
    Combatant::player(record, 0, &test_data())
}

pub fn enemy_combatant(record: IngredientInst) -> Combatant {
    Combatant::enemy(record, &test_data())
}

/// Every collaborator call the battle made, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum FrontendCall {
    SceneTransition,
    Appear(String),
    DamageAnimation(String),
    Death(String),
    MoveAnimation(AttackKey, Side),
    Sound(String),
    HealthBar(String, u32),
    ExpBar { leveled_up: bool, ratio: f64 },
    Messages(Vec<String>),
    MessageNoInput(String),
    Menu,
    RosterPicker { forced: bool },
    TransitionOut(BattleOutcome),
}

/// Frontend that completes every animation immediately, replays scripted
/// menu choices and records what it was asked to do.
#[derive(Debug, Default)]
pub struct ScriptedFrontend {
    selections: VecDeque<MenuSelection>,
    roster_choices: VecDeque<Option<usize>>,
    pub calls: Vec<FrontendCall>,
}

impl ScriptedFrontend {
    pub fn new(selections: Vec<MenuSelection>) -> Self {
        Self {
            selections: selections.into(),
            roster_choices: VecDeque::new(),
            calls: Vec::new(),
        }
    }

    pub fn with_roster_choices(mut self, choices: Vec<Option<usize>>) -> Self {
        self.roster_choices = choices.into();
        self
    }

    /// Every message shown, whether or not it waited for input.
    pub fn messages(&self) -> Vec<String> {
        self.calls
            .iter()
            .flat_map(|call| match call {
                FrontendCall::Messages(messages) => messages.clone(),
                FrontendCall::MessageNoInput(message) => vec![message.clone()],
                _ => Vec::new(),
            })
            .collect()
    }

    pub fn has_message(&self, message: &str) -> bool {
        self.messages().iter().any(|shown| shown == message)
    }
}

#[async_trait]
impl Presentation for ScriptedFrontend {
    async fn play_scene_transition(&mut self) {
        self.calls.push(FrontendCall::SceneTransition);
    }

    async fn play_appear_animation(&mut self, combatant: &Combatant) {
        self.calls.push(FrontendCall::Appear(combatant.name().to_string()));
    }

    async fn play_damage_animation(&mut self, combatant: &Combatant) {
        self.calls
            .push(FrontendCall::DamageAnimation(combatant.name().to_string()));
    }

    async fn play_death_animation(&mut self, combatant: &Combatant) {
        self.calls.push(FrontendCall::Death(combatant.name().to_string()));
    }

    async fn play_move_animation(&mut self, animation: AttackKey, target: Side) {
        self.calls.push(FrontendCall::MoveAnimation(animation, target));
    }

    fn play_sound(&mut self, audio_key: &str) {
        self.calls.push(FrontendCall::Sound(audio_key.to_string()));
    }

    async fn update_health_bar(&mut self, combatant: &Combatant) {
        self.calls.push(FrontendCall::HealthBar(
            combatant.name().to_string(),
            combatant.current_hp(),
        ));
    }

    async fn play_exp_bar_animation(&mut self, leveled_up: bool, ratio: f64) {
        self.calls.push(FrontendCall::ExpBar { leveled_up, ratio });
    }

    async fn transition_out(&mut self, outcome: &BattleOutcome) {
        self.calls.push(FrontendCall::TransitionOut(*outcome));
    }
}

#[async_trait]
impl Messaging for ScriptedFrontend {
    async fn show_messages_and_wait(&mut self, messages: &[String]) {
        self.calls.push(FrontendCall::Messages(messages.to_vec()));
    }

    async fn show_message_no_input(&mut self, message: &str) {
        self.calls
            .push(FrontendCall::MessageNoInput(message.to_string()));
    }
}

#[async_trait]
impl PlayerInput for ScriptedFrontend {
    async fn choose_selection(&mut self, _context: MenuContext<'_>) -> MenuSelection {
        self.calls.push(FrontendCall::Menu);
        match self.selections.pop_front() {
            Some(selection) => selection,
            None => panic!("ScriptedFrontend ran out of menu selections"),
        }
    }

    async fn choose_roster_member(
        &mut self,
        _roster: &[IngredientInst],
        _active_index: usize,
        forced: bool,
    ) -> Option<usize> {
        self.calls.push(FrontendCall::RosterPicker { forced });
        match self.roster_choices.pop_front() {
            Some(choice) => choice,
            None => panic!("ScriptedFrontend ran out of roster choices"),
        }
    }
}

pub type TestMachine = BattleMachine<ScriptedFrontend, MemoryStore, ScriptedRandom>;

/// Creates a battle against `enemy` with the given roster, bag, frontend script
/// and random outcomes.
pub fn create_test_machine(
    roster: Vec<IngredientInst>,
    inventory: Vec<InventoryEntry>,
    enemy: IngredientInst,
    frontend: ScriptedFrontend,
    rng_values: Vec<u32>,
) -> BattleResult<TestMachine> {
    BattleMachine::new(
        shared_test_data(),
        BattleConfig::default(),
        frontend,
        MemoryStore::new(roster, inventory),
        ScriptedRandom::new(rng_values),
        enemy,
    )
}

/// Chili (active), Basil and Garlic, all healthy.
pub fn standard_roster() -> Vec<IngredientInst> {
    vec![
        TestIngredientBuilder::new("Chili").with_id(1).build(),
        TestIngredientBuilder::new("Basil").with_id(3).build(),
        TestIngredientBuilder::new("Garlic").with_id(4).build(),
    ]
}

/// A level 4 wild onion with 20 HP that hits for 4.
pub fn wild_onion() -> IngredientInst {
    TestIngredientBuilder::new("Onion")
        .with_id(2)
        .with_level(4)
        .with_max_hp(20)
        .with_attack(4)
        .with_attack_ids(vec![2])
        .build()
}

pub fn heal_items(quantity: u32) -> Vec<InventoryEntry> {
    vec![InventoryEntry {
        item_id: HEAL_ITEM_ID,
        quantity,
    }]
}

/// Helper function to assert that a Result is Ok and return the value.
pub fn assert_ok<T>(result: BattleResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("Expected Ok but got error: {}", err),
    }
}
