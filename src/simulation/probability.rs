//! Mission success estimator
//!
//! A deterministic function of the current mission, team and soldier state:
//!
//! ```text
//! p = (average_skill / 10) * (1 / difficulty) * active_ratio * 100
//! ```
//!
//! clamped to 0..=100 and rounded to one decimal place. Average skill is
//! taken over all four categories of active members only.

use crate::core::error::{GarrisonError, Result};
use crate::core::types::MissionId;
use crate::entity::soldier::Soldier;
use crate::entity::team::Team;
use crate::mission::Mission;
use crate::registry::Registry;
use crate::simulation::constants::{SKILL_CATEGORY_COUNT, SKILL_SCALE};

/// Personnel factors feeding the estimate
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Readiness {
    pub team_count: usize,
    pub total_members: usize,
    pub active_members: usize,
    /// Mean skill level per category across active members
    pub average_skill: f64,
}

impl Readiness {
    pub fn active_ratio(&self) -> f64 {
        if self.total_members == 0 {
            0.0
        } else {
            self.active_members as f64 / self.total_members as f64
        }
    }
}

/// Gather the personnel factors for a mission
///
/// Members are counted per assigned team, so a soldier in two assigned
/// teams counts twice.
pub fn assess(mission: &Mission, teams: &[Team], soldiers: &[Soldier]) -> Readiness {
    let mut readiness = Readiness::default();
    let mut skill_sum: u64 = 0;

    for team in mission.teams().iter().filter_map(|t| teams.get(t.index())) {
        readiness.team_count += 1;
        readiness.total_members += team.members().len();

        for soldier in team.members().iter().filter_map(|m| soldiers.get(m.index())) {
            if soldier.is_active() {
                readiness.active_members += 1;
                skill_sum += soldier.skills().total();
            }
        }
    }

    if readiness.active_members > 0 {
        readiness.average_skill =
            skill_sum as f64 / (readiness.active_members * SKILL_CATEGORY_COUNT) as f64;
    }
    readiness
}

/// Success probability (0-100) for a given difficulty and readiness
pub fn success_probability(difficulty: u8, readiness: &Readiness) -> f64 {
    if readiness.total_members == 0 || readiness.active_members == 0 || difficulty == 0 {
        return 0.0;
    }

    let probability = (readiness.average_skill / SKILL_SCALE)
        * (1.0 / difficulty as f64)
        * readiness.active_ratio()
        * 100.0;
    round_to_tenth(probability.clamp(0.0, 100.0))
}

/// Pure estimate for a mission; nothing is cached or logged
pub fn estimate_success(mission: &Mission, teams: &[Team], soldiers: &[Soldier]) -> f64 {
    let readiness = assess(mission, teams, soldiers);
    success_probability(mission.difficulty(), &readiness)
}

/// Recompute the estimate, cache it on the mission and log it
pub fn refresh_success_rate(registry: &mut Registry, mission: MissionId) -> Result<f64> {
    let m = registry
        .mission(mission)
        .ok_or_else(|| GarrisonError::UnknownId(format!("{:?}", mission)))?;
    let rate = estimate_success(m, registry.teams(), registry.soldiers());

    let m = registry.mission_entry(mission)?;
    m.set_success_rate(rate);
    m.log_event(format!("Success probability calculated: {}%", rate));
    tracing::debug!("Success estimate for {}: {}%", m.name, rate);
    Ok(rate)
}

pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{SoldierId, TeamId, Vec2};
    use crate::entity::rank::Rank;
    use crate::entity::skills::SkillCategory;
    use crate::entity::status::SoldierStatus;

    fn soldier(id: u32, status: SoldierStatus) -> Soldier {
        Soldier::new(SoldierId(id), &format!("S{}", id), Rank::Recruit, status, Vec2::default())
    }

    #[test]
    fn test_worked_example_is_fifty_percent() {
        // Two active members, skills summing to 40 across the pair -> average 5
        let mut soldiers = vec![
            soldier(0, SoldierStatus::Active),
            soldier(1, SoldierStatus::Active),
        ];
        for s in soldiers.iter_mut() {
            for category in SkillCategory::ALL {
                s.improve_skill(category, 4);
            }
            assert_eq!(s.skills().total(), 20);
        }

        let mut team = Team::new(TeamId(0), "Alpha");
        for s in &soldiers {
            team.add_member(s).unwrap();
        }
        let mut mission = Mission::new(MissionId(0), "Op", "", Vec2::default());
        mission.add_team(TeamId(0), "Alpha").unwrap();

        assert_eq!(estimate_success(&mission, &[team], &soldiers), 50.0);
    }

    #[test]
    fn test_no_teams_is_zero() {
        let mission = Mission::new(MissionId(0), "Op", "", Vec2::default());
        assert_eq!(estimate_success(&mission, &[], &[]), 0.0);
    }

    #[test]
    fn test_no_active_members_is_zero() {
        let soldiers = vec![soldier(0, SoldierStatus::Wounded)];
        let mut team = Team::new(TeamId(0), "Alpha");
        team.add_member(&soldiers[0]).unwrap();
        let mut mission = Mission::new(MissionId(0), "Op", "", Vec2::default());
        mission.add_team(TeamId(0), "Alpha").unwrap();

        assert_eq!(estimate_success(&mission, &[team], &soldiers), 0.0);
    }

    #[test]
    fn test_active_ratio_and_difficulty_scale_estimate() {
        // Default skills: average 1 -> 10% at difficulty 1 with everyone active
        let soldiers = vec![
            soldier(0, SoldierStatus::Active),
            soldier(1, SoldierStatus::OnLeave),
        ];
        let mut team = Team::new(TeamId(0), "Alpha");
        for s in &soldiers {
            team.add_member(s).unwrap();
        }
        let mut mission = Mission::new(MissionId(0), "Op", "", Vec2::default());
        mission.add_team(TeamId(0), "Alpha").unwrap();

        // (1/10) * 1 * 0.5 * 100
        assert_eq!(estimate_success(&mission, &[team.clone()], &soldiers), 5.0);

        mission.set_difficulty(3).unwrap();
        // 5 / 3 = 1.666.. -> 1.7
        assert_eq!(estimate_success(&mission, &[team], &soldiers), 1.7);
    }

    #[test]
    fn test_estimate_clamped_to_hundred() {
        let readiness = Readiness {
            team_count: 1,
            total_members: 1,
            active_members: 1,
            average_skill: 50.0,
        };
        assert_eq!(success_probability(1, &readiness), 100.0);
    }

    #[test]
    fn test_round_to_tenth() {
        assert_eq!(round_to_tenth(33.333), 33.3);
        assert_eq!(round_to_tenth(16.66), 16.7);
    }
}
