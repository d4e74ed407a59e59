//! Integration tests for mission progress simulation
//!
//! These tests drive missions through the registry with scripted random
//! sources:
//! - Always-succeeding rolls complete exactly one objective per call
//! - A failed roll with a certain abort fails the mission
//! - Closed missions are refused and left untouched

use garrison::core::config::SimulationConfig;
use garrison::core::error::GarrisonError;
use garrison::core::types::{MissionId, Vec2};
use garrison::entity::equipment::EquipmentCatalog;
use garrison::entity::rank::Rank;
use garrison::entity::status::SoldierStatus;
use garrison::mission::MissionStatus;
use garrison::registry::Registry;
use garrison::simulation::{auto_complete, simulate_mission_progress, Simulator};
use rand::rngs::mock::StepRng;

/// Flavor events and injuries disabled so only the objective roll matters
fn quiet_config() -> SimulationConfig {
    SimulationConfig {
        flavor_event_chance: 0.0,
        injury_check_chance: 0.0,
        ..SimulationConfig::default()
    }
}

fn setup(objectives: usize) -> (Registry, MissionId) {
    let mut reg = Registry::new(EquipmentCatalog::default());
    let a = reg.create_soldier("Johnson", Rank::Sergeant, SoldierStatus::Active, Vec2::new(10.0, 10.0));
    let b = reg.create_soldier("Smith", Rank::Corporal, SoldierStatus::Active, Vec2::new(12.0, 10.0));
    let team = reg.create_team("Alpha");
    reg.add_to_team(team, a).unwrap();
    reg.add_to_team(team, b).unwrap();

    let mission = reg.create_mission("Eagle Eye", "Reconnaissance", Vec2::new(50.0, 60.0));
    for i in 0..objectives {
        reg.mission_mut(mission)
            .unwrap()
            .add_objective(&format!("Objective {}", i + 1));
    }
    reg.assign_team_to_mission(team, mission).unwrap();
    (reg, mission)
}

#[test]
fn test_always_success_completes_one_objective_per_call() {
    let (mut reg, mission) = setup(4);
    let config = quiet_config();
    let mut rng = StepRng::new(0, 0);

    for call in 1..=3 {
        let outcome =
            simulate_mission_progress(&mut reg, mission, Some(100.0), &config, &mut rng).unwrap();
        assert!(outcome.succeeded);
        assert_eq!(outcome.objective, Some(call - 1));
        assert_eq!(reg.mission(mission).unwrap().progress(), (call, 4));
        assert_eq!(outcome.status, MissionStatus::Active);
    }

    let outcome =
        simulate_mission_progress(&mut reg, mission, Some(100.0), &config, &mut rng).unwrap();
    assert_eq!(outcome.status, MissionStatus::Completed);

    // Difficulty 1 pays 10 XP to every member
    for s in reg.soldiers() {
        assert_eq!(s.experience(), 10);
    }
    assert!(reg.mission(mission).unwrap().ended_at().is_some());
}

#[test]
fn test_failed_roll_with_certain_abort_fails_mission() {
    let (mut reg, mission) = setup(3);
    let config = SimulationConfig {
        objective_failure_abort_chance: 1.0,
        ..quiet_config()
    };
    let mut rng = StepRng::new(0, 0);

    let outcome =
        simulate_mission_progress(&mut reg, mission, Some(0.0), &config, &mut rng).unwrap();
    assert!(!outcome.succeeded);
    assert_eq!(outcome.status, MissionStatus::Failed);

    let m = reg.mission(mission).unwrap();
    assert_eq!(m.progress(), (0, 3));
    assert!(m
        .events()
        .iter()
        .any(|e| e.text == "Failed to complete objective: Objective 1"));
}

#[test]
fn test_closed_mission_is_refused() {
    let (mut reg, mission) = setup(2);
    reg.mission_mut(mission)
        .unwrap()
        .update_status(MissionStatus::Aborted);
    let events_before = reg.mission(mission).unwrap().events().len();

    let err = simulate_mission_progress(&mut reg, mission, Some(100.0), &quiet_config(), &mut StepRng::new(0, 0))
        .unwrap_err();
    assert!(matches!(err, GarrisonError::MissionClosed { .. }));

    let m = reg.mission(mission).unwrap();
    assert_eq!(m.status(), MissionStatus::Aborted);
    assert_eq!(m.progress(), (0, 2));
    assert_eq!(m.events().len(), events_before);
}

#[test]
fn test_auto_complete_then_closed() {
    let (mut reg, mission) = setup(3);
    let done = auto_complete(&mut reg, mission).unwrap();
    assert_eq!(done.len(), 3);

    let m = reg.mission(mission).unwrap();
    assert_eq!(m.status(), MissionStatus::Completed);
    assert!(m.objectives().iter().all(|o| o.completed));

    assert!(matches!(
        auto_complete(&mut reg, mission),
        Err(GarrisonError::MissionClosed { .. })
    ));
}

#[test]
fn test_seeded_simulators_agree() {
    let run = |seed: u64| {
        let mut sim = Simulator::new(SimulationConfig {
            seed: Some(seed),
            ..SimulationConfig::default()
        });
        garrison::data::load_sample_data(&mut sim.registry).unwrap();
        let mut statuses = Vec::new();
        for _ in 0..6 {
            match sim.simulate_progress("Hammer Strike", Some(60.0)) {
                Ok(outcome) => statuses.push(outcome.status),
                Err(_) => break,
            }
        }
        let health: Vec<u8> = sim.registry.soldiers().iter().map(|s| s.health()).collect();
        (statuses, health)
    };

    assert_eq!(run(1234), run(1234));
}
