#[cfg(test)]
mod tests {
    use crate::battle::action::{ItemUse, PlayerIntent};
    use crate::battle::combatant::{Combatants, Side};
    use crate::battle::resolver::{resolve_round, ActionQueue, BattleAction};
    use crate::battle::rng::ScriptedRandom;
    use crate::battle::state::{BattleEvent, EventBus};
    use crate::battle::tests::common::{
        enemy_combatant, player_combatant, FrontendCall, ScriptedFrontend, TestIngredientBuilder,
    };
    use crate::errors::BattleError;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use schema::AttackKey;

    fn chili_vs_onion() -> Combatants {
        Combatants::new(
            player_combatant(TestIngredientBuilder::new("Chili").with_attack(6).build()),
            enemy_combatant(
                TestIngredientBuilder::new("Onion")
                    .with_max_hp(20)
                    .with_attack(4)
                    .with_attack_ids(vec![2])
                    .build(),
            ),
        )
    }

    #[rstest]
    #[case(0, vec![Side::Player, Side::Enemy])]
    #[case(1, vec![Side::Enemy, Side::Player])]
    fn test_coin_flip_decides_attack_order(#[case] coin: u32, #[case] expected: Vec<Side>) {
        let mut rng = ScriptedRandom::new(vec![coin]);
        let mut bus = EventBus::new();

        let queue = ActionQueue::build(&PlayerIntent::UseMove(0), 0, &mut rng, &mut bus);

        assert_eq!(queue.attackers(), expected);
        assert_eq!(
            bus.events(),
            &[BattleEvent::AttackOrderDecided {
                player_first: coin == 0
            }]
        );
    }

    #[rstest]
    #[case(PlayerIntent::UseItem(ItemUse { item_id: 1, roster_index: 0 }))]
    #[case(PlayerIntent::AttemptFlee)]
    #[case(PlayerIntent::SwitchCombatant(1))]
    fn test_turn_consuming_intents_leave_only_the_enemy(#[case] intent: PlayerIntent) {
        // An empty script panics if the coin is flipped.
        let mut rng = ScriptedRandom::new(Vec::new());
        let mut bus = EventBus::new();

        let queue = ActionQueue::build(&intent, 0, &mut rng, &mut bus);

        assert!(intent.consumes_turn());
        assert_eq!(queue.attackers(), vec![Side::Enemy]);
        assert!(bus.is_empty());
    }

    #[tokio::test]
    async fn test_attack_sequence_runs_in_order() {
        // Arrange
        let mut combatants = chili_vs_onion();
        let mut queue = ActionQueue::new();
        queue.push_back(BattleAction {
            attacker: Side::Player,
            move_index: 0,
        });
        let mut frontend = ScriptedFrontend::default();
        let mut bus = EventBus::new();

        // Act
        resolve_round(&mut queue, &mut combatants, &mut frontend, &mut bus)
            .await
            .unwrap();

        // Assert
        assert_eq!(
            frontend.calls,
            vec![
                FrontendCall::MessageNoInput("Chili used Lafire".to_string()),
                FrontendCall::Sound("flame".to_string()),
                FrontendCall::MoveAnimation(AttackKey::Lafire, Side::Enemy),
                FrontendCall::DamageAnimation("Onion".to_string()),
                FrontendCall::HealthBar("Onion".to_string(), 14),
            ]
        );
        assert_eq!(combatants.enemy.current_hp(), 14);
        assert_eq!(combatants.player.current_hp(), 25);
        assert!(queue.is_empty());
    }

    #[tokio::test]
    async fn test_enemy_only_round_leaves_enemy_untouched() {
        let mut combatants = chili_vs_onion();
        let mut rng = ScriptedRandom::new(Vec::new());
        let mut bus = EventBus::new();
        let mut queue = ActionQueue::build(&PlayerIntent::AttemptFlee, 0, &mut rng, &mut bus);
        let mut frontend = ScriptedFrontend::default();

        resolve_round(&mut queue, &mut combatants, &mut frontend, &mut bus)
            .await
            .unwrap();

        bus.print_debug_with_message("Events for test_enemy_only_round_leaves_enemy_untouched:");
        assert_eq!(combatants.enemy.current_hp(), 20);
        assert_eq!(combatants.player.current_hp(), 21);
        assert!(frontend.has_message("foe Onion used Slash"));
    }

    #[tokio::test]
    async fn test_fainted_attacker_is_skipped() {
        // Arrange: the enemy attacks first and knocks Chili out
        let mut combatants = Combatants::new(
            player_combatant(TestIngredientBuilder::new("Chili").with_hp(3).build()),
            enemy_combatant(
                TestIngredientBuilder::new("Onion")
                    .with_max_hp(20)
                    .with_attack(4)
                    .with_attack_ids(vec![2])
                    .build(),
            ),
        );
        let mut rng = ScriptedRandom::new(vec![1]);
        let mut bus = EventBus::new();
        let mut queue = ActionQueue::build(&PlayerIntent::UseMove(0), 0, &mut rng, &mut bus);
        let mut frontend = ScriptedFrontend::default();

        // Act
        resolve_round(&mut queue, &mut combatants, &mut frontend, &mut bus)
            .await
            .unwrap();

        // Assert
        bus.print_debug_with_message("Events for test_fainted_attacker_is_skipped:");
        assert!(combatants.player.is_fainted());
        assert_eq!(combatants.enemy.current_hp(), 20);
        assert!(bus.events().contains(&BattleEvent::ActionSkipped {
            side: Side::Player,
            name: "Chili".to_string(),
        }));
        assert!(!frontend.has_message("Chili used Lafire"));
    }

    #[tokio::test]
    async fn test_missing_move_slot_is_an_error() {
        let mut combatants = chili_vs_onion();
        let mut queue = ActionQueue::new();
        queue.push_back(BattleAction {
            attacker: Side::Enemy,
            move_index: 3,
        });
        let mut frontend = ScriptedFrontend::default();
        let mut bus = EventBus::new();

        let result = resolve_round(&mut queue, &mut combatants, &mut frontend, &mut bus).await;

        assert_eq!(
            result,
            Err(BattleError::InvalidMoveIndex {
                name: "Onion".to_string(),
                index: 3,
            })
        );
    }
}
