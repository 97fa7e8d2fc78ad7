//! Cascade Integration Tests
//!
//! Exercises whole turns through `TurnEngine::play_turn`, covering the
//! cross-agent guarantees: one action per agent, resource gating, claim
//! exclusivity, and the carried memory transitions.

#[cfg(test)]
mod tests {
    use crate::engine::actions::Action;
    use crate::engine::arena::{gate, timer, Arena};
    use crate::engine::snapshot::TurnSnapshot;
    use crate::engine::test_support::{
        agent_at, drone_at, enemy_at, snapshot_with_resource, threat_drone_at,
    };
    use crate::engine::turn::TurnEngine;
    use crate::engine::types::{Entity, Position, Threat, Velocity};

    fn engine() -> TurnEngine {
        TurnEngine::new(Arena::from_own_base(Position::new(0, 0)))
    }

    fn spread_agents() -> Vec<Entity> {
        vec![
            agent_at(10, 2500, 2500),
            agent_at(11, 9000, 5000),
            agent_at(12, 16000, 8000),
        ]
    }

    #[test]
    fn test_every_agent_gets_exactly_one_action() {
        let snap = snapshot_with_resource(spread_agents(), 0);
        let decisions = engine().play_turn(&snap);
        assert_eq!(decisions.len(), 3);
        for (idx, d) in decisions.iter().enumerate() {
            assert_eq!(d.agent_idx, idx);
        }
    }

    #[test]
    fn test_no_cast_below_ability_cost() {
        // A danger cluster, a disable-able adversary, everything an agent
        // could want to cast at; with pool 5 every decision is a move.
        let mut entities = spread_agents();
        entities.push(threat_drone_at(1, 3000, 2000));
        entities.push(enemy_at(20, 3500, 3000));
        let snap = snapshot_with_resource(entities, gate::ABILITY_COST / 2);

        let decisions = engine().play_turn(&snap);
        for d in &decisions {
            assert!(
                matches!(d.action, Action::Move { .. }),
                "agent {} cast with an empty pool: {:?}",
                d.agent_idx,
                d.action
            );
        }
    }

    #[test]
    fn test_broke_warden_still_closes_on_danger() {
        let mut entities = spread_agents();
        entities.push(threat_drone_at(1, 4000, 3000));
        let snap = snapshot_with_resource(entities, 5);

        let decisions = engine().play_turn(&snap);
        assert_eq!(decisions[0].rule, "base-defense");
        assert_eq!(
            decisions[0].action,
            Action::Move {
                to: Position::new(4000, 3000)
            }
        );
    }

    #[test]
    fn test_opportunistic_disable_sends_enemy_to_exile_corner() {
        // Visible unshielded adversary, no danger cluster, pool covers the
        // cast: the warden redirects it to the far side corner.
        let mut entities = spread_agents();
        entities.push(enemy_at(20, 3000, 2500));
        let snap = snapshot_with_resource(entities, 30);

        let mut eng = engine();
        let exile = eng.arena().exile_corner;
        let decisions = eng.play_turn(&snap);
        assert_eq!(decisions[0].rule, "opportunistic-disable");
        assert_eq!(
            decisions[0].action,
            Action::Control {
                target: 20,
                to: exile
            }
        );
    }

    #[test]
    fn test_counter_shield_claim_blocks_second_raider() {
        // One shield-worthy drone in reach of both raiders: the first
        // claims it, the second must fall through to its stack corner.
        let mut bomb = drone_at(1, 16200, 8500);
        bomb.threat = Threat::EnemyBase;
        bomb.health = 20;
        bomb.velocity = Velocity::new(400, 0);

        let entities = vec![
            agent_at(10, 2500, 2500),
            agent_at(11, 16000, 7000),
            agent_at(12, 15500, 7000),
            bomb,
        ];
        // Pool above the attack-mode gate so the raider cascade runs.
        let snap = snapshot_with_resource(entities, 100);

        let decisions = engine().play_turn(&snap);
        assert_eq!(decisions[1].rule, "counter-shield");
        assert_eq!(decisions[1].action, Action::Shield { target: 1 });
        assert!(
            matches!(decisions[2].action, Action::Move { .. }),
            "second raider duplicated the shield: {:?}",
            decisions[2].action
        );
    }

    #[test]
    fn test_invest_redirect_claim_blocks_second_raider() {
        // Farm mode, pool above the invest gate: the first raider
        // redirects the drone, the second holds its zone.
        let mut fat = drone_at(1, 9200, 5200);
        fat.threat = Threat::OwnBase;
        fat.health = 20;
        fat.velocity = Velocity::new(-400, 0);

        let entities = vec![
            agent_at(10, 2500, 2500),
            agent_at(11, 9000, 5000),
            agent_at(12, 8800, 5100),
            fat,
        ];
        let snap = snapshot_with_resource(entities, 60);

        let mut eng = engine();
        let corner = eng.arena().nearer_enemy_corner(Position::new(9200, 5200));
        let decisions = eng.play_turn(&snap);
        assert_eq!(decisions[1].rule, "future-investment");
        assert_eq!(
            decisions[1].action,
            Action::Control {
                target: 1,
                to: corner
            }
        );
        assert_eq!(
            decisions[2].action,
            Action::Move {
                to: eng.arena().farm_zones[2]
            }
        );
    }

    #[test]
    fn test_aggressive_cast_opens_engagement_window() {
        let mut fat = drone_at(1, 9200, 5200);
        fat.threat = Threat::OwnBase;
        fat.health = 20;
        fat.velocity = Velocity::new(-400, 0);

        let entities = vec![
            agent_at(10, 2500, 2500),
            agent_at(11, 9000, 5000),
            agent_at(12, 16000, 8000),
            fat,
        ];
        let snap = snapshot_with_resource(entities, 60);

        let mut eng = engine();
        let decisions = eng.play_turn(&snap);
        assert!(decisions[1].action.is_aggressive());
        assert_eq!(eng.memory().agents[1].engagement, timer::ENGAGEMENT_WINDOW);
        assert_eq!(eng.memory().agents[0].engagement, 0);
    }

    #[test]
    fn test_assault_triggers_self_shield() {
        // A shielded drone bearing down on the base confirms the assault;
        // the enemy agent next to the warden forces a self-shield.
        let mut shielded = threat_drone_at(1, 3000, 2000);
        shielded.shield_turns = 4;

        let mut entities = spread_agents();
        entities.push(shielded);
        entities.push(enemy_at(20, 3200, 3100));
        let snap = snapshot_with_resource(entities, 30);

        let decisions = engine().play_turn(&snap);
        assert_eq!(decisions[0].rule, "assault-response");
        assert_eq!(decisions[0].action, Action::Shield { target: 10 });
    }

    #[test]
    fn test_attack_mode_switches_raider_fallback_to_corners() {
        let snap_farm = snapshot_with_resource(spread_agents(), 0);
        let snap_rich = snapshot_with_resource(spread_agents(), gate::ATTACK_MODE + 20);

        let mut eng = engine();
        let farm_decisions = eng.play_turn(&snap_farm);
        assert_eq!(
            farm_decisions[1].action,
            Action::Move {
                to: eng.arena().farm_zones[1]
            }
        );

        let attack_decisions = eng.play_turn(&snap_rich);
        assert_eq!(
            attack_decisions[1].action,
            Action::Move {
                to: eng.arena().enemy_corners[0]
            }
        );

        // Mode never reverts, even broke.
        let after = eng.play_turn(&snap_farm);
        assert_eq!(
            after[1].action,
            Action::Move {
                to: eng.arena().enemy_corners[0]
            }
        );
    }

    #[test]
    fn test_stuck_raider_alternates_corner() {
        let corner_hugger = |x, y| {
            snapshot_with_resource(
                vec![
                    agent_at(10, 2500, 2500),
                    agent_at(11, x, y),
                    agent_at(12, 15500, 7000),
                ],
                gate::ATTACK_MODE + 20,
            )
        };

        let mut eng = engine();
        let parked = corner_hugger(17000, 4600);
        let mut last = None;
        // STUCK_LIMIT turns parked plus the initial observation, then one
        // more: the corner flips exactly once.
        for _ in 0..(timer::STUCK_LIMIT + 2) {
            last = Some(eng.play_turn(&parked));
        }
        let decisions = last.unwrap();
        assert_eq!(
            decisions[1].action,
            Action::Move {
                to: eng.arena().enemy_corners[1]
            }
        );
        assert_eq!(eng.memory().agents[1].corner_idx, 1);
    }

    #[test]
    fn test_parsed_turn_round_trip() {
        // A full wire-format turn drives the engine end to end.
        let input = [
            "50 20",
            "50 15",
            "4",
            "5 0 3500 2500 0 0 16 -300 -200 1 1",
            "30 1 2600 2600 0 0 0 0 0 0 0",
            "31 1 9000 5000 0 0 0 0 0 0 0",
            "32 1 16000 8000 0 0 0 0 0 0 0",
        ];
        let mut lines = input.iter().map(|s| s.to_string());
        let arena = Arena::from_own_base(Position::new(0, 0));
        let snap = TurnSnapshot::parse(&mut lines, &arena).unwrap().unwrap();

        let decisions = TurnEngine::new(arena).play_turn(&snap);
        assert_eq!(decisions.len(), 3);
        // The warden answers the lone danger drone.
        assert_eq!(decisions[0].rule, "base-defense");
    }
}
