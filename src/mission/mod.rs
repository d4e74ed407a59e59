//! Missions - objectives, assigned teams, status and rewards

pub mod objective;
pub mod status;

pub use objective::Objective;
pub use status::{MissionStatus, RewardKind};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::core::error::{GarrisonError, Result};
use crate::core::log::EventLog;
use crate::core::types::{MissionId, TeamId, Vec2};
use crate::simulation::constants::{EXPERIENCE_PER_DIFFICULTY, MAX_DIFFICULTY, MIN_DIFFICULTY};

/// What completing an objective did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectiveCompletion {
    /// The objective was already complete; nothing changed
    AlreadyComplete,
    /// The objective was completed and others remain open
    Completed,
    /// This was the last open objective; the mission is now Completed
    MissionCompleted,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mission {
    pub id: MissionId,
    pub name: String,
    pub description: String,
    pub location: Vec2,
    teams: Vec<TeamId>,
    status: MissionStatus,
    objectives: Vec<Objective>,
    difficulty: u8,
    rewards: BTreeMap<RewardKind, u32>,
    /// Last computed success estimate, 0-100
    success_rate: f64,
    started_at: Option<DateTime<Local>>,
    ended_at: Option<DateTime<Local>>,
    events: EventLog,
}

impl Mission {
    pub fn new(id: MissionId, name: &str, description: &str, location: Vec2) -> Self {
        let mut rewards = BTreeMap::new();
        rewards.insert(
            RewardKind::Experience,
            EXPERIENCE_PER_DIFFICULTY * MIN_DIFFICULTY as u32,
        );

        let mut mission = Self {
            id,
            name: name.to_string(),
            description: description.to_string(),
            location,
            teams: Vec::new(),
            status: MissionStatus::Pending,
            objectives: Vec::new(),
            difficulty: MIN_DIFFICULTY,
            rewards,
            success_rate: 0.0,
            started_at: None,
            ended_at: None,
            events: EventLog::new(),
        };
        mission.log_event(format!("Mission created: {}", name));
        mission
    }

    pub fn teams(&self) -> &[TeamId] {
        &self.teams
    }

    pub fn status(&self) -> MissionStatus {
        self.status
    }

    pub fn objectives(&self) -> &[Objective] {
        &self.objectives
    }

    pub fn difficulty(&self) -> u8 {
        self.difficulty
    }

    pub fn rewards(&self) -> &BTreeMap<RewardKind, u32> {
        &self.rewards
    }

    pub fn experience_reward(&self) -> u32 {
        self.rewards.get(&RewardKind::Experience).copied().unwrap_or(0)
    }

    pub fn success_rate(&self) -> f64 {
        self.success_rate
    }

    pub fn started_at(&self) -> Option<DateTime<Local>> {
        self.started_at
    }

    pub fn ended_at(&self) -> Option<DateTime<Local>> {
        self.ended_at
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// (completed, total) objective counts
    pub fn progress(&self) -> (usize, usize) {
        let done = self.objectives.iter().filter(|o| o.completed).count();
        (done, self.objectives.len())
    }

    /// Index of the first incomplete objective
    pub fn next_open_objective(&self) -> Option<usize> {
        self.objectives.iter().position(|o| !o.completed)
    }

    pub fn add_team(&mut self, team: TeamId, team_name: &str) -> Result<()> {
        if self.teams.contains(&team) {
            return Err(GarrisonError::AlreadyAssigned {
                team: team_name.to_string(),
                mission: self.name.clone(),
            });
        }
        self.teams.push(team);
        self.log_event(format!("Team {} added to the mission", team_name));
        Ok(())
    }

    pub fn add_objective(&mut self, description: &str) {
        self.objectives.push(Objective::new(description));
        self.log_event(format!("Objective added: {}", description));
    }

    /// Complete the objective at `index` (0-based)
    ///
    /// Completing the last open objective moves the mission to Completed with
    /// a success rate of 100 in the same call. Completing an objective that
    /// is already complete changes nothing.
    pub fn complete_objective(&mut self, index: usize) -> Result<ObjectiveCompletion> {
        let count = self.objectives.len();
        let Some(objective) = self.objectives.get_mut(index) else {
            return Err(GarrisonError::ObjectiveOutOfRange {
                number: index + 1,
                count,
            });
        };

        if !objective.complete() {
            return Ok(ObjectiveCompletion::AlreadyComplete);
        }
        let description = objective.description.clone();
        self.log_event(format!("Objective completed: {}", description));

        if self.objectives.iter().all(|o| o.completed) {
            self.transition(MissionStatus::Completed);
            self.success_rate = 100.0;
            self.log_event("All objectives completed");
            return Ok(ObjectiveCompletion::MissionCompleted);
        }
        Ok(ObjectiveCompletion::Completed)
    }

    /// Change status, returning the previous one
    pub fn update_status(&mut self, new_status: MissionStatus) -> MissionStatus {
        let old = self.transition(new_status);
        self.log_event(format!("Status updated from {} to {}", old, new_status));
        old
    }

    /// Set status and stamp start/end times the first time they apply
    fn transition(&mut self, new_status: MissionStatus) -> MissionStatus {
        let old = self.status;
        self.status = new_status;

        if new_status == MissionStatus::Active && self.started_at.is_none() {
            self.started_at = Some(Local::now());
        } else if new_status.is_terminal() && self.ended_at.is_none() {
            self.ended_at = Some(Local::now());
        }
        old
    }

    /// Set difficulty on the 1-10 scale; the experience reward scales with it
    pub fn set_difficulty(&mut self, level: i64) -> Result<()> {
        if !(MIN_DIFFICULTY as i64..=MAX_DIFFICULTY as i64).contains(&level) {
            return Err(GarrisonError::InvalidDifficulty(level));
        }
        self.difficulty = level as u8;
        self.rewards
            .insert(RewardKind::Experience, EXPERIENCE_PER_DIFFICULTY * level as u32);
        self.log_event(format!("Difficulty set to {}", level));
        Ok(())
    }

    pub fn add_reward(&mut self, kind: RewardKind, value: u32) {
        self.rewards.insert(kind, value);
        self.log_event(format!("Reward added: {} = {}", kind, value));
    }

    pub(crate) fn set_success_rate(&mut self, rate: f64) {
        self.success_rate = rate;
    }

    pub fn log_event(&mut self, description: impl Into<String>) {
        self.events.push(description);
    }
}

impl fmt::Display for Mission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mission: {} ({})", self.name, self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mission_with(objectives: &[&str]) -> Mission {
        let mut m = Mission::new(MissionId(0), "Eagle Eye", "Recon", Vec2::new(50.0, 60.0));
        for o in objectives {
            m.add_objective(o);
        }
        m
    }

    #[test]
    fn test_new_mission_defaults() {
        let m = mission_with(&[]);
        assert_eq!(m.status(), MissionStatus::Pending);
        assert_eq!(m.difficulty(), 1);
        assert_eq!(m.experience_reward(), 10);
        assert_eq!(m.success_rate(), 0.0);
        assert!(m.started_at().is_none());
    }

    #[test]
    fn test_last_objective_completes_mission() {
        let mut m = mission_with(&["Reach the ridge", "Observe"]);
        assert_eq!(m.complete_objective(0).unwrap(), ObjectiveCompletion::Completed);
        assert_eq!(m.status(), MissionStatus::Pending);

        assert_eq!(
            m.complete_objective(1).unwrap(),
            ObjectiveCompletion::MissionCompleted
        );
        assert_eq!(m.status(), MissionStatus::Completed);
        assert_eq!(m.success_rate(), 100.0);
        assert!(m.ended_at().is_some());
    }

    #[test]
    fn test_completing_twice_is_noop() {
        let mut m = mission_with(&["Only"]);
        m.complete_objective(0).unwrap();
        let events = m.events().len();
        let ended = m.ended_at();

        assert_eq!(
            m.complete_objective(0).unwrap(),
            ObjectiveCompletion::AlreadyComplete
        );
        assert_eq!(m.events().len(), events);
        assert_eq!(m.ended_at(), ended);
    }

    #[test]
    fn test_out_of_range_objective() {
        let mut m = mission_with(&["Only"]);
        assert!(matches!(
            m.complete_objective(3),
            Err(GarrisonError::ObjectiveOutOfRange { number: 4, count: 1 })
        ));
    }

    #[test]
    fn test_timestamps_set_once() {
        let mut m = mission_with(&[]);
        m.update_status(MissionStatus::Active);
        let started = m.started_at();
        assert!(started.is_some());

        m.update_status(MissionStatus::Pending);
        m.update_status(MissionStatus::Active);
        assert_eq!(m.started_at(), started);

        m.update_status(MissionStatus::Aborted);
        let ended = m.ended_at();
        assert!(ended.is_some());
        m.update_status(MissionStatus::Failed);
        assert_eq!(m.ended_at(), ended);
    }

    #[test]
    fn test_set_difficulty_scales_reward() {
        let mut m = mission_with(&[]);
        m.set_difficulty(7).unwrap();
        assert_eq!(m.difficulty(), 7);
        assert_eq!(m.experience_reward(), 70);

        assert!(matches!(
            m.set_difficulty(11),
            Err(GarrisonError::InvalidDifficulty(11))
        ));
        assert!(m.set_difficulty(0).is_err());
        assert_eq!(m.difficulty(), 7);
    }

    #[test]
    fn test_duplicate_team_rejected() {
        let mut m = mission_with(&[]);
        m.add_team(TeamId(0), "Alpha").unwrap();
        assert!(m.add_team(TeamId(0), "Alpha").is_err());
        assert_eq!(m.teams().len(), 1);
    }

    #[test]
    fn test_add_reward() {
        let mut m = mission_with(&[]);
        m.add_reward(RewardKind::Commendation, 1);
        assert_eq!(m.rewards().get(&RewardKind::Commendation), Some(&1));
        assert_eq!(m.experience_reward(), 10);
    }
}
