//! Mission progress simulation
//!
//! Each call advances at most one objective. The objective roll, flavor
//! events and injuries all draw from the caller's random source, so a seeded
//! generator replays a session exactly.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::core::config::SimulationConfig;
use crate::core::error::{GarrisonError, Result};
use crate::core::types::{MissionId, SoldierId};
use crate::mission::MissionStatus;
use crate::registry::Registry;
use crate::simulation::constants::FLAVOR_EVENTS;
use crate::simulation::probability::refresh_success_rate;

/// Damage dealt to one soldier during a progress step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Injury {
    pub soldier: SoldierId,
    pub damage: u32,
}

/// What a single progress step did
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressOutcome {
    /// Mission status after the step
    pub status: MissionStatus,
    /// Index of the objective that was rolled, if any remained open
    pub objective: Option<usize>,
    /// Whether the objective roll succeeded
    pub succeeded: bool,
    /// Success chance (0-100) the roll was made against
    pub chance: f64,
    pub flavor_event: Option<&'static str>,
    pub injuries: Vec<Injury>,
}

fn ensure_open(registry: &Registry, mission: MissionId) -> Result<()> {
    let m = registry
        .mission(mission)
        .ok_or_else(|| GarrisonError::UnknownId(format!("{:?}", mission)))?;
    if m.status().is_terminal() {
        return Err(GarrisonError::MissionClosed {
            mission: m.name.clone(),
            status: m.status().to_string(),
        });
    }
    Ok(())
}

/// Advance a mission by one objective
///
/// `success_chance` is on the 0-100 scale; when absent the estimator is run
/// and its value cached on the mission. Terminal missions are refused with
/// [`GarrisonError::MissionClosed`] and left untouched.
pub fn simulate_mission_progress<R: Rng + ?Sized>(
    registry: &mut Registry,
    mission: MissionId,
    success_chance: Option<f64>,
    config: &SimulationConfig,
    rng: &mut R,
) -> Result<ProgressOutcome> {
    ensure_open(registry, mission)?;

    let m = registry.mission_entry(mission)?;
    if m.status() == MissionStatus::Pending {
        m.update_status(MissionStatus::Active);
    }

    let chance = match success_chance {
        Some(chance) => chance,
        None => refresh_success_rate(registry, mission)?,
    };

    let mut outcome = ProgressOutcome {
        status: MissionStatus::Active,
        objective: None,
        succeeded: false,
        chance,
        flavor_event: None,
        injuries: Vec::new(),
    };

    let m = registry.mission_entry(mission)?;
    let Some(index) = m.next_open_objective() else {
        outcome.status = m.status();
        return Ok(outcome);
    };
    outcome.objective = Some(index);

    if rng.gen::<f64>() * 100.0 < chance {
        outcome.succeeded = true;
        registry.complete_objective(mission, index)?;

        if rng.gen::<f64>() < config.flavor_event_chance {
            if let Some(event) = FLAVOR_EVENTS.choose(rng) {
                outcome.flavor_event = Some(*event);
                registry
                    .mission_entry(mission)?
                    .log_event(format!("Random event: {}", event));
            }
        }

        if rng.gen::<f64>() < config.injury_check_chance {
            outcome.injuries = roll_injuries(registry, mission, config, rng)?;
        }
    } else {
        let m = registry.mission_entry(mission)?;
        let description = m.objectives()[index].description.clone();
        m.log_event(format!("Failed to complete objective: {}", description));
        tracing::debug!("{}: objective {} failed", m.name, index + 1);

        if rng.gen::<f64>() < config.objective_failure_abort_chance {
            m.update_status(MissionStatus::Failed);
            tracing::info!("Mission {} failed", m.name);
        }
    }

    outcome.status = registry.mission_entry(mission)?.status();
    Ok(outcome)
}

/// Roll every active member of every assigned team for damage
///
/// Status is checked at roll time; a soldier knocked down earlier in the same
/// step is skipped without consuming a roll.
fn roll_injuries<R: Rng + ?Sized>(
    registry: &mut Registry,
    mission: MissionId,
    config: &SimulationConfig,
    rng: &mut R,
) -> Result<Vec<Injury>> {
    let roster: Vec<SoldierId> = match registry.mission(mission) {
        Some(m) => m
            .teams()
            .iter()
            .filter_map(|&t| registry.team(t))
            .flat_map(|t| t.members().iter().copied())
            .collect(),
        None => Vec::new(),
    };

    let mut injuries = Vec::new();
    for soldier in roster {
        let s = registry.soldier_entry(soldier)?;
        if !s.is_active() || rng.gen::<f64>() >= config.member_injury_chance {
            continue;
        }
        let damage = rng.gen_range(config.injury_damage_min..=config.injury_damage_max);
        s.update_health(-(damage as i32));
        let name = s.name.clone();

        registry
            .mission_entry(mission)?
            .log_event(format!("{} took {} damage", name, damage));
        injuries.push(Injury { soldier, damage });
    }
    Ok(injuries)
}

/// Force every open objective complete and close the mission as Completed
///
/// Skips the probability gate and all side effects. Returns the descriptions
/// of the objectives completed by this call, in order.
pub fn auto_complete(registry: &mut Registry, mission: MissionId) -> Result<Vec<String>> {
    ensure_open(registry, mission)?;
    registry
        .mission_entry(mission)?
        .update_status(MissionStatus::Active);

    let mut completed = Vec::new();
    while let Some(index) = registry
        .mission(mission)
        .and_then(|m| m.next_open_objective())
    {
        registry.complete_objective(mission, index)?;
        if let Some(m) = registry.mission(mission) {
            completed.push(m.objectives()[index].description.clone());
        }
    }

    let m = registry.mission_entry(mission)?;
    if m.status() != MissionStatus::Completed {
        m.update_status(MissionStatus::Completed);
    }
    tracing::info!("Mission {} auto-completed ({} objectives)", m.name, completed.len());
    Ok(completed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Vec2;
    use crate::entity::equipment::EquipmentCatalog;
    use crate::entity::rank::Rank;
    use crate::entity::status::SoldierStatus;
    use rand::rngs::mock::StepRng;

    /// Rolls of exactly 0.0: every "below chance" branch is taken
    fn always_low() -> StepRng {
        StepRng::new(0, 0)
    }

    /// Rolls just under 1.0: no probability branch below 1 is taken
    fn always_high() -> StepRng {
        StepRng::new(u64::MAX, 0)
    }

    fn setup(objectives: &[&str]) -> (Registry, MissionId, Vec<SoldierId>) {
        let mut reg = Registry::new(EquipmentCatalog::default());
        let a = reg.create_soldier("Johnson", Rank::Sergeant, SoldierStatus::Active, Vec2::default());
        let b = reg.create_soldier("Smith", Rank::Corporal, SoldierStatus::Active, Vec2::default());
        let t = reg.create_team("Alpha");
        reg.add_to_team(t, a).unwrap();
        reg.add_to_team(t, b).unwrap();
        let m = reg.create_mission("Eagle Eye", "Recon", Vec2::new(50.0, 60.0));
        for o in objectives {
            reg.mission_mut(m).unwrap().add_objective(o);
        }
        reg.assign_team_to_mission(t, m).unwrap();
        (reg, m, vec![a, b])
    }

    #[test]
    fn test_pending_mission_becomes_active() {
        let (mut reg, m, _) = setup(&["One", "Two"]);
        let config = SimulationConfig::default();
        let outcome =
            simulate_mission_progress(&mut reg, m, Some(100.0), &config, &mut always_high()).unwrap();

        assert_eq!(outcome.status, MissionStatus::Active);
        assert_eq!(outcome.objective, Some(0));
        assert!(outcome.succeeded);
        assert!(reg.mission(m).unwrap().started_at().is_some());
        assert_eq!(reg.mission(m).unwrap().progress(), (1, 2));
    }

    #[test]
    fn test_one_objective_per_call() {
        let (mut reg, m, _) = setup(&["One", "Two", "Three"]);
        let config = SimulationConfig::default();
        let mut rng = always_high();

        for expected in 1..=3 {
            simulate_mission_progress(&mut reg, m, Some(100.0), &config, &mut rng).unwrap();
            assert_eq!(reg.mission(m).unwrap().progress(), (expected, 3));
        }
        assert_eq!(reg.mission(m).unwrap().status(), MissionStatus::Completed);
        assert_eq!(reg.mission(m).unwrap().success_rate(), 100.0);
    }

    #[test]
    fn test_low_rolls_trigger_flavor_and_injuries() {
        let (mut reg, m, members) = setup(&["One", "Two"]);
        let config = SimulationConfig::default();
        let outcome =
            simulate_mission_progress(&mut reg, m, Some(50.0), &config, &mut always_low()).unwrap();

        assert!(outcome.succeeded);
        assert_eq!(outcome.flavor_event, Some(FLAVOR_EVENTS[0]));
        // Both members hit for the minimum damage
        assert_eq!(outcome.injuries.len(), 2);
        for id in members {
            assert_eq!(reg.soldier(id).unwrap().health(), 95);
        }
        let last = reg.mission(m).unwrap().events().last().unwrap().text.clone();
        assert_eq!(last, "Smith took 5 damage");
    }

    #[test]
    fn test_failed_roll_can_fail_mission() {
        let (mut reg, m, _) = setup(&["One"]);
        let config = SimulationConfig::default();
        let outcome =
            simulate_mission_progress(&mut reg, m, Some(0.0), &config, &mut always_low()).unwrap();

        assert!(!outcome.succeeded);
        assert_eq!(outcome.status, MissionStatus::Failed);
        assert_eq!(reg.mission(m).unwrap().progress(), (0, 1));
        assert!(reg.mission(m).unwrap().ended_at().is_some());
    }

    #[test]
    fn test_failed_roll_without_abort_stays_active() {
        let (mut reg, m, _) = setup(&["Hold the bridge"]);
        let config = SimulationConfig::default();
        let outcome =
            simulate_mission_progress(&mut reg, m, Some(50.0), &config, &mut always_high()).unwrap();

        assert!(!outcome.succeeded);
        assert_eq!(outcome.status, MissionStatus::Active);
        let texts: Vec<_> = reg.mission(m).unwrap().events().iter().map(|e| e.text.clone()).collect();
        assert!(texts.contains(&"Failed to complete objective: Hold the bridge".to_string()));
    }

    #[test]
    fn test_terminal_mission_is_refused() {
        let (mut reg, m, _) = setup(&["One"]);
        reg.mission_mut(m).unwrap().update_status(MissionStatus::Aborted);
        let events = reg.mission(m).unwrap().events().len();
        let config = SimulationConfig::default();

        let result = simulate_mission_progress(&mut reg, m, Some(100.0), &config, &mut always_low());
        assert!(matches!(result, Err(GarrisonError::MissionClosed { .. })));
        assert_eq!(reg.mission(m).unwrap().events().len(), events);
    }

    #[test]
    fn test_estimate_used_when_no_chance_given() {
        let (mut reg, m, _) = setup(&["One"]);
        let config = SimulationConfig::default();
        let outcome = simulate_mission_progress(&mut reg, m, None, &config, &mut always_high()).unwrap();

        // Default skills at difficulty 1 with everyone active
        assert_eq!(outcome.chance, 10.0);
        assert_eq!(reg.mission(m).unwrap().success_rate(), 10.0);
    }

    #[test]
    fn test_auto_complete() {
        let (mut reg, m, members) = setup(&["One", "Two", "Three"]);
        reg.complete_objective(m, 1).unwrap();

        let done = auto_complete(&mut reg, m).unwrap();
        assert_eq!(done, vec!["One".to_string(), "Three".to_string()]);
        assert_eq!(reg.mission(m).unwrap().status(), MissionStatus::Completed);
        assert_eq!(reg.soldier(members[0]).unwrap().experience(), 10);
        // No injuries on the forced path
        assert_eq!(reg.soldier(members[0]).unwrap().health(), 100);

        assert!(auto_complete(&mut reg, m).is_err());
    }

    #[test]
    fn test_auto_complete_without_objectives() {
        let (mut reg, m, _) = setup(&[]);
        assert!(auto_complete(&mut reg, m).unwrap().is_empty());
        assert_eq!(reg.mission(m).unwrap().status(), MissionStatus::Completed);
    }
}
