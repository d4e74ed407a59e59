//! Entity registry - owns every soldier, team and mission
//!
//! Records live in arenas and are addressed by stable ids; teams and
//! missions refer to each other through those ids. Name lookups are
//! case-insensitive exact matches over a linear scan, returning the first
//! hit.

use crate::core::error::{GarrisonError, Result};
use crate::core::log::EventLog;
use crate::core::types::{MissionId, SoldierId, TeamId, Vec2};
use crate::entity::equipment::EquipmentCatalog;
use crate::entity::rank::Rank;
use crate::entity::soldier::Soldier;
use crate::entity::status::SoldierStatus;
use crate::entity::team::Team;
use crate::mission::{Mission, ObjectiveCompletion};

#[derive(Debug, Clone, Default)]
pub struct Registry {
    soldiers: Vec<Soldier>,
    teams: Vec<Team>,
    missions: Vec<Mission>,
    events: EventLog,
    catalog: EquipmentCatalog,
}

fn matches_name(candidate: &str, wanted: &str) -> bool {
    candidate.to_lowercase() == wanted.trim().to_lowercase()
}

fn soldier_in(soldiers: &[Soldier], id: SoldierId) -> Result<&Soldier> {
    soldiers
        .get(id.index())
        .ok_or_else(|| GarrisonError::UnknownId(format!("{:?}", id)))
}

impl Registry {
    pub fn new(catalog: EquipmentCatalog) -> Self {
        let mut registry = Self {
            catalog,
            ..Self::default()
        };
        registry.log_event("Military simulator initialized");
        registry
    }

    // === ACCESS ===

    pub fn soldiers(&self) -> &[Soldier] {
        &self.soldiers
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn missions(&self) -> &[Mission] {
        &self.missions
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub fn catalog(&self) -> &EquipmentCatalog {
        &self.catalog
    }

    pub fn soldier(&self, id: SoldierId) -> Option<&Soldier> {
        self.soldiers.get(id.index())
    }

    pub fn soldier_mut(&mut self, id: SoldierId) -> Option<&mut Soldier> {
        self.soldiers.get_mut(id.index())
    }

    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.get(id.index())
    }

    pub fn team_mut(&mut self, id: TeamId) -> Option<&mut Team> {
        self.teams.get_mut(id.index())
    }

    pub fn mission(&self, id: MissionId) -> Option<&Mission> {
        self.missions.get(id.index())
    }

    pub fn mission_mut(&mut self, id: MissionId) -> Option<&mut Mission> {
        self.missions.get_mut(id.index())
    }

    // === CREATION ===

    pub fn create_soldier(
        &mut self,
        name: &str,
        rank: Rank,
        status: SoldierStatus,
        location: Vec2,
    ) -> SoldierId {
        let id = SoldierId(self.soldiers.len() as u32);
        self.soldiers
            .push(Soldier::new(id, name, rank, status, location));
        self.log_event(format!("Soldier created: {}", name));
        tracing::debug!("Created soldier {} ({:?})", name, id);
        id
    }

    pub fn create_team(&mut self, name: &str) -> TeamId {
        let id = TeamId(self.teams.len() as u32);
        self.teams.push(Team::new(id, name));
        self.log_event(format!("Team created: {}", name));
        tracing::debug!("Created team {} ({:?})", name, id);
        id
    }

    pub fn create_mission(&mut self, name: &str, description: &str, location: Vec2) -> MissionId {
        let id = MissionId(self.missions.len() as u32);
        self.missions
            .push(Mission::new(id, name, description, location));
        self.log_event(format!("Mission created: {}", name));
        tracing::debug!("Created mission {} ({:?})", name, id);
        id
    }

    // === LOOKUP ===

    pub fn find_soldier(&self, name: &str) -> Option<SoldierId> {
        self.soldiers
            .iter()
            .find(|s| matches_name(&s.name, name))
            .map(|s| s.id)
    }

    pub fn find_team(&self, name: &str) -> Option<TeamId> {
        self.teams
            .iter()
            .find(|t| matches_name(&t.name, name))
            .map(|t| t.id)
    }

    pub fn find_mission(&self, name: &str) -> Option<MissionId> {
        self.missions
            .iter()
            .find(|m| matches_name(&m.name, name))
            .map(|m| m.id)
    }

    pub fn require_soldier(&self, name: &str) -> Result<SoldierId> {
        self.find_soldier(name)
            .ok_or_else(|| GarrisonError::SoldierNotFound(name.trim().to_string()))
    }

    pub fn require_team(&self, name: &str) -> Result<TeamId> {
        self.find_team(name)
            .ok_or_else(|| GarrisonError::TeamNotFound(name.trim().to_string()))
    }

    pub fn require_mission(&self, name: &str) -> Result<MissionId> {
        self.find_mission(name)
            .ok_or_else(|| GarrisonError::MissionNotFound(name.trim().to_string()))
    }

    pub(crate) fn soldier_entry(&mut self, id: SoldierId) -> Result<&mut Soldier> {
        self.soldiers
            .get_mut(id.index())
            .ok_or_else(|| GarrisonError::UnknownId(format!("{:?}", id)))
    }

    pub(crate) fn mission_entry(&mut self, id: MissionId) -> Result<&mut Mission> {
        self.missions
            .get_mut(id.index())
            .ok_or_else(|| GarrisonError::UnknownId(format!("{:?}", id)))
    }

    fn team_index(&self, id: TeamId) -> Result<usize> {
        if id.index() < self.teams.len() {
            Ok(id.index())
        } else {
            Err(GarrisonError::UnknownId(format!("{:?}", id)))
        }
    }

    // === TEAM OPERATIONS ===

    pub fn add_to_team(&mut self, team: TeamId, soldier: SoldierId) -> Result<()> {
        let t = self.team_index(team)?;
        let s = soldier_in(&self.soldiers, soldier)?;
        self.teams[t].add_member(s)?;

        let text = format!("{} assigned to team {}", s.name, self.teams[t].name);
        tracing::info!("{}", text);
        self.log_event(text);
        Ok(())
    }

    /// Lookup-by-name wrapper around [`Registry::add_to_team`]
    pub fn assign_soldier_to_team(&mut self, soldier_name: &str, team_name: &str) -> Result<()> {
        let soldier = self.require_soldier(soldier_name)?;
        let team = self.require_team(team_name)?;
        self.add_to_team(team, soldier)
    }

    pub fn remove_from_team(&mut self, team: TeamId, soldier: SoldierId) -> Result<()> {
        let t = self.team_index(team)?;
        let s = soldier_in(&self.soldiers, soldier)?;
        self.teams[t].remove_member(s)?;

        let text = format!("{} removed from team {}", s.name, self.teams[t].name);
        self.log_event(text);
        Ok(())
    }

    pub fn set_commander(&mut self, team: TeamId, soldier: SoldierId) -> Result<()> {
        let t = self.team_index(team)?;
        let s = soldier_in(&self.soldiers, soldier)?;
        self.teams[t].set_commander(s)
    }

    pub fn move_team(&mut self, team: TeamId, target: Vec2, spacing: f32) -> Result<usize> {
        let t = self.team_index(team)?;
        let moved = self.teams[t].move_team(target, spacing, &mut self.soldiers)?;
        tracing::debug!("Moved {} members of {} to {}", moved, self.teams[t].name, target);
        Ok(moved)
    }

    pub fn distribute_equipment(&mut self, team: TeamId, items: &[(String, u32)]) -> Result<usize> {
        let t = self.team_index(team)?;
        self.teams[t].distribute_equipment(items, &mut self.soldiers)
    }

    pub fn broadcast(&mut self, team: TeamId, sender: &str, message: &str) -> Result<()> {
        let t = self.team_index(team)?;
        self.teams[t].broadcast(sender, message, &mut self.soldiers);
        Ok(())
    }

    pub fn direct_message(
        &mut self,
        team: TeamId,
        sender: &str,
        recipient: &str,
        message: &str,
    ) -> Result<()> {
        let t = self.team_index(team)?;
        self.teams[t].direct_message(sender, recipient, message, &mut self.soldiers)
    }

    // === MISSION OPERATIONS ===

    /// Attach a team to a mission and hand its active members the assignment
    ///
    /// Returns the team's assignment number.
    pub fn assign_team_to_mission(&mut self, team: TeamId, mission: MissionId) -> Result<usize> {
        let t = self.team_index(team)?;
        let team_name = self.teams[t].name.clone();
        let m = self.mission_entry(mission)?;
        m.add_team(team, &team_name)?;
        let mission_name = m.name.clone();

        let number = self.teams[t].assign_mission(&mission_name, &mut self.soldiers);
        let text = format!("Team {} assigned to mission {}", team_name, mission_name);
        tracing::info!("{}", text);
        self.log_event(text);
        Ok(number)
    }

    /// Complete one objective, rewarding assigned soldiers if it finished the mission
    pub fn complete_objective(&mut self, mission: MissionId, index: usize) -> Result<ObjectiveCompletion> {
        let outcome = self.mission_entry(mission)?.complete_objective(index)?;
        if outcome == ObjectiveCompletion::MissionCompleted {
            self.award_mission_experience(mission);
        }
        Ok(outcome)
    }

    fn award_mission_experience(&mut self, mission: MissionId) {
        let Some(m) = self.mission(mission) else {
            return;
        };
        let reward = m.experience_reward();
        let name = m.name.clone();
        let recipients: Vec<SoldierId> = m
            .teams()
            .iter()
            .filter_map(|&t| self.team(t))
            .flat_map(|t| t.members().iter().copied())
            .collect();

        for id in &recipients {
            if let Some(s) = self.soldier_mut(*id) {
                s.gain_experience(reward);
            }
        }
        tracing::info!(
            "Mission {} completed; {} XP awarded to {} soldiers",
            name,
            reward,
            recipients.len()
        );
    }

    /// Active members across every team assigned to the mission
    ///
    /// Order follows team assignment, then membership. A soldier sitting in
    /// two assigned teams appears twice.
    pub fn mission_active_members(&self, mission: MissionId) -> Vec<SoldierId> {
        let Some(m) = self.mission(mission) else {
            return Vec::new();
        };
        m.teams()
            .iter()
            .filter_map(|&t| self.team(t))
            .flat_map(|t| t.active_members(&self.soldiers))
            .collect()
    }

    // === JOURNAL ===

    pub fn log_event(&mut self, description: impl Into<String>) {
        self.events.push(description);
    }
}
