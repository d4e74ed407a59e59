//! Teams - named groups of soldiers
//!
//! A team holds soldier ids, not soldiers. Every operation that touches
//! members takes the registry's soldier arena (indexed by `SoldierId`).
//! A soldier may sit in several teams at once.

use ahash::AHashMap;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::core::error::{GarrisonError, Result};
use crate::core::log::EventLog;
use crate::core::types::{SoldierId, TeamId, Vec2};
use crate::entity::skills::SkillSet;
use crate::entity::soldier::Soldier;
use crate::entity::status::SoldierStatus;

pub const STATUS_IN_RESERVE: &str = "In Reserve";
pub const STATUS_ON_MISSION: &str = "On Mission";

/// Sender used for broadcasts without an explicit sender
pub const DEFAULT_SENDER: &str = "HQ";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    members: Vec<SoldierId>,
    commander: Option<SoldierId>,
    /// Free-form, e.g. "In Reserve" or "On Mission"
    pub status: String,
    location: Vec2,
    created_at: DateTime<Local>,
    mission_log: EventLog,
    chat: EventLog,
    assignments: Vec<String>,
}

fn member<'a>(soldiers: &'a [Soldier], id: SoldierId) -> Option<&'a Soldier> {
    soldiers.get(id.index())
}

/// Alternating left/right offset of the `index`-th member from the target
///
/// Index 0 stands on the target, odd indices step right by
/// `ceil(i/2) * spacing`, even indices step left by `floor(i/2) * spacing`.
pub fn formation_offset(index: usize, spacing: f32) -> f32 {
    if index == 0 {
        0.0
    } else if index % 2 == 1 {
        index.div_ceil(2) as f32 * spacing
    } else {
        -((index / 2) as f32 * spacing)
    }
}

impl Team {
    pub fn new(id: TeamId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            members: Vec::new(),
            commander: None,
            status: STATUS_IN_RESERVE.to_string(),
            location: Vec2::default(),
            created_at: Local::now(),
            mission_log: EventLog::new(),
            chat: EventLog::new(),
            assignments: Vec::new(),
        }
    }

    pub fn members(&self) -> &[SoldierId] {
        &self.members
    }

    pub fn is_member(&self, id: SoldierId) -> bool {
        self.members.contains(&id)
    }

    pub fn commander(&self) -> Option<SoldierId> {
        self.commander
    }

    pub fn location(&self) -> Vec2 {
        self.location
    }

    pub fn created_at(&self) -> DateTime<Local> {
        self.created_at
    }

    pub fn mission_log(&self) -> &EventLog {
        &self.mission_log
    }

    pub fn chat(&self) -> &EventLog {
        &self.chat
    }

    pub fn assignments(&self) -> &[String] {
        &self.assignments
    }

    pub fn add_member(&mut self, soldier: &Soldier) -> Result<()> {
        if self.is_member(soldier.id) {
            return Err(GarrisonError::AlreadyMember {
                soldier: soldier.name.clone(),
                team: self.name.clone(),
            });
        }
        self.members.push(soldier.id);
        self.log_event(format!("{} {} added to the team", soldier.rank(), soldier.name));
        Ok(())
    }

    /// Remove a member
    ///
    /// The commander field is left untouched even when the removed soldier
    /// was the commander.
    pub fn remove_member(&mut self, soldier: &Soldier) -> Result<()> {
        let Some(pos) = self.members.iter().position(|&id| id == soldier.id) else {
            return Err(GarrisonError::NotATeamMember {
                soldier: soldier.name.clone(),
                team: self.name.clone(),
            });
        };
        self.members.remove(pos);
        if self.commander == Some(soldier.id) {
            tracing::warn!(
                "{} removed from {} while still recorded as its commander",
                soldier.name,
                self.name
            );
        }
        self.log_event(format!("{} {} removed from the team", soldier.rank(), soldier.name));
        Ok(())
    }

    pub fn set_commander(&mut self, soldier: &Soldier) -> Result<()> {
        if !self.is_member(soldier.id) {
            self.log_event(format!("{} {} is not in the team", soldier.rank(), soldier.name));
            return Err(GarrisonError::NotATeamMember {
                soldier: soldier.name.clone(),
                team: self.name.clone(),
            });
        }
        self.commander = Some(soldier.id);
        self.log_event(format!("{} {} is now commander", soldier.rank(), soldier.name));
        Ok(())
    }

    /// Active members in membership order
    pub fn active_members(&self, soldiers: &[Soldier]) -> Vec<SoldierId> {
        self.members
            .iter()
            .copied()
            .filter(|&id| member(soldiers, id).is_some_and(|s| s.is_active()))
            .collect()
    }

    pub fn count_with_status(&self, status: SoldierStatus, soldiers: &[Soldier]) -> usize {
        self.members
            .iter()
            .filter(|&&id| member(soldiers, id).is_some_and(|s| s.status() == status))
            .count()
    }

    /// Send a message to every member and record it in the team chat
    pub fn broadcast(&mut self, sender: &str, message: &str, soldiers: &mut [Soldier]) {
        self.chat.push(format!("{}: {}", sender, message));
        for &id in &self.members {
            if let Some(s) = soldiers.get_mut(id.index()) {
                s.receive_message(sender, message);
            }
        }
        self.log_event(format!("Message sent by {}: {}", sender, message));
    }

    /// Deliver a message to one member, matched by name (case-insensitive)
    pub fn direct_message(
        &mut self,
        sender: &str,
        recipient: &str,
        message: &str,
        soldiers: &mut [Soldier],
    ) -> Result<()> {
        let wanted = recipient.to_lowercase();
        let roster: &[Soldier] = soldiers;
        let target = self
            .members
            .iter()
            .copied()
            .find(|&id| member(roster, id).is_some_and(|s| s.name.to_lowercase() == wanted));

        let Some(id) = target else {
            self.log_event(format!("Recipient {} not found", recipient));
            return Err(GarrisonError::NotATeamMember {
                soldier: recipient.to_string(),
                team: self.name.clone(),
            });
        };

        let name = soldiers[id.index()].name.clone();
        self.chat.push(format!("{} to {}: {}", sender, name, message));
        soldiers[id.index()].receive_message(sender, message);
        self.log_event(format!("Direct message from {} to {}", sender, name));
        Ok(())
    }

    /// Record a mission assignment and hand its label to active members
    ///
    /// Returns the team's assignment number (1-based).
    pub fn assign_mission(&mut self, description: &str, soldiers: &mut [Soldier]) -> usize {
        let number = self.assignments.len() + 1;
        let label = format!("Mission #{}: {}", number, description);

        for id in self.active_members(soldiers) {
            soldiers[id.index()].assign_mission(&label);
        }

        self.log_event(format!("Team assigned to {}", label));
        self.assignments.push(label);
        self.status = STATUS_ON_MISSION.to_string();
        number
    }

    /// Target positions for a formation move
    ///
    /// Only active members move. Offsets are indexed by position in the full
    /// membership list, so inactive members leave gaps in the line.
    pub fn formation_positions(
        &self,
        target: Vec2,
        spacing: f32,
        soldiers: &[Soldier],
    ) -> Vec<(SoldierId, Vec2)> {
        self.members
            .iter()
            .enumerate()
            .filter(|(_, &id)| member(soldiers, id).is_some_and(|s| s.is_active()))
            .map(|(i, &id)| {
                let pos = Vec2::new(target.x + formation_offset(i, spacing), target.y);
                (id, pos)
            })
            .collect()
    }

    /// Move active members into formation around `target`
    ///
    /// Returns the number of soldiers moved. Fails for a team with no
    /// members at all.
    pub fn move_team(&mut self, target: Vec2, spacing: f32, soldiers: &mut [Soldier]) -> Result<usize> {
        if self.members.is_empty() {
            return Err(GarrisonError::EmptyTeam(self.name.clone()));
        }

        self.log_event(format!("Team moving to {}", target));
        let positions = self.formation_positions(target, spacing, soldiers);
        for (id, pos) in &positions {
            soldiers[id.index()].update_location(*pos);
        }
        self.location = target;
        Ok(positions.len())
    }

    /// Summed equipment of all members, sorted by item name
    pub fn equipment_totals(&self, soldiers: &[Soldier]) -> Vec<(String, u32)> {
        let mut totals = AHashMap::new();
        for &id in &self.members {
            if let Some(s) = member(soldiers, id) {
                s.equipment().add_to(&mut totals);
            }
        }
        let mut totals: Vec<_> = totals.into_iter().collect();
        totals.sort_by(|a, b| a.0.cmp(&b.0));
        totals
    }

    /// Split equipment evenly among active members
    ///
    /// For each item every active member gets `qty / n`; the first
    /// `qty % n` active members (membership order) get one more. Returns the
    /// number of recipients.
    pub fn distribute_equipment(
        &mut self,
        items: &[(String, u32)],
        soldiers: &mut [Soldier],
    ) -> Result<usize> {
        let active = self.active_members(soldiers);
        if active.is_empty() {
            self.log_event("No active members to distribute equipment to");
            return Err(GarrisonError::NoActiveMembers(self.name.clone()));
        }

        let n = active.len() as u32;
        for (item, quantity) in items {
            let per_person = quantity / n;
            let remainder = (quantity % n) as usize;

            for (i, id) in active.iter().enumerate() {
                let share = per_person + u32::from(i < remainder);
                if share > 0 {
                    soldiers[id.index()].add_equipment(item, share);
                }
            }
        }

        self.log_event(format!(
            "Equipment distributed among {} active members",
            active.len()
        ));
        Ok(active.len())
    }

    /// Summed skills of all members
    pub fn skill_totals(&self, soldiers: &[Soldier]) -> SkillSet {
        let mut totals = SkillSet::zero();
        for &id in &self.members {
            if let Some(s) = member(soldiers, id) {
                totals.accumulate(s.skills());
            }
        }
        totals
    }

    pub fn log_event(&mut self, description: impl AsRef<str>) {
        let text = format!("Team {} - {}", self.name, description.as_ref());
        self.mission_log.push(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::rank::Rank;

    fn squad(n: usize) -> (Team, Vec<Soldier>) {
        let soldiers: Vec<Soldier> = (0..n)
            .map(|i| {
                Soldier::new(
                    SoldierId(i as u32),
                    &format!("S{}", i),
                    Rank::Recruit,
                    SoldierStatus::Active,
                    Vec2::default(),
                )
            })
            .collect();
        let mut team = Team::new(TeamId(0), "Alpha");
        for s in &soldiers {
            team.add_member(s).unwrap();
        }
        (team, soldiers)
    }

    #[test]
    fn test_formation_offsets() {
        assert_eq!(formation_offset(0, 5.0), 0.0);
        assert_eq!(formation_offset(1, 5.0), 5.0);
        assert_eq!(formation_offset(2, 5.0), -5.0);
        assert_eq!(formation_offset(3, 5.0), 10.0);
        assert_eq!(formation_offset(4, 5.0), -10.0);
    }

    #[test]
    fn test_distribute_seven_rifles_over_three() {
        let (mut team, mut soldiers) = squad(3);
        let recipients = team
            .distribute_equipment(&[("Rifle".to_string(), 7)], &mut soldiers)
            .unwrap();
        assert_eq!(recipients, 3);

        let counts: Vec<u32> = soldiers.iter().map(|s| s.equipment().count("Rifle")).collect();
        assert_eq!(counts, vec![3, 2, 2]);
    }

    #[test]
    fn test_distribute_skips_inactive_members() {
        let (mut team, mut soldiers) = squad(3);
        soldiers[0].update_status(SoldierStatus::Wounded);

        team.distribute_equipment(&[("Water".to_string(), 3)], &mut soldiers)
            .unwrap();

        assert_eq!(soldiers[0].equipment().count("Water"), 0);
        assert_eq!(soldiers[1].equipment().count("Water"), 2);
        assert_eq!(soldiers[2].equipment().count("Water"), 1);
    }

    #[test]
    fn test_distribute_fewer_items_than_members() {
        let (mut team, mut soldiers) = squad(4);
        team.distribute_equipment(&[("Radio".to_string(), 1)], &mut soldiers)
            .unwrap();
        let counts: Vec<u32> = soldiers.iter().map(|s| s.equipment().count("Radio")).collect();
        assert_eq!(counts, vec![1, 0, 0, 0]);
        assert!(!soldiers[3].equipment().contains("Radio"));
    }

    #[test]
    fn test_distribute_without_active_members_fails() {
        let (mut team, mut soldiers) = squad(2);
        for s in soldiers.iter_mut() {
            s.update_status(SoldierStatus::OnLeave);
        }
        let result = team.distribute_equipment(&[("Ammo".to_string(), 4)], &mut soldiers);
        assert!(matches!(result, Err(GarrisonError::NoActiveMembers(_))));
        assert!(soldiers.iter().all(|s| s.equipment().is_empty()));
    }

    #[test]
    fn test_move_team_formation() {
        let (mut team, mut soldiers) = squad(4);
        soldiers[2].update_status(SoldierStatus::Unavailable);

        let moved = team
            .move_team(Vec2::new(50.0, 60.0), 5.0, &mut soldiers)
            .unwrap();
        assert_eq!(moved, 3);

        assert_eq!(soldiers[0].location(), Vec2::new(50.0, 60.0));
        assert_eq!(soldiers[1].location(), Vec2::new(55.0, 60.0));
        // Inactive member stays put, leaving its slot empty
        assert_eq!(soldiers[2].location(), Vec2::default());
        assert_eq!(soldiers[3].location(), Vec2::new(60.0, 60.0));
        assert_eq!(team.location(), Vec2::new(50.0, 60.0));
    }

    #[test]
    fn test_move_empty_team_fails() {
        let mut team = Team::new(TeamId(1), "Ghost");
        let mut soldiers: Vec<Soldier> = Vec::new();
        assert!(matches!(
            team.move_team(Vec2::new(1.0, 1.0), 5.0, &mut soldiers),
            Err(GarrisonError::EmptyTeam(_))
        ));
    }

    #[test]
    fn test_commander_must_be_member() {
        let (mut team, soldiers) = squad(2);
        let outsider = Soldier::new(
            SoldierId(9),
            "Outsider",
            Rank::Sergeant,
            SoldierStatus::Active,
            Vec2::default(),
        );
        assert!(team.set_commander(&outsider).is_err());
        assert_eq!(team.commander(), None);

        team.set_commander(&soldiers[1]).unwrap();
        assert_eq!(team.commander(), Some(SoldierId(1)));
    }

    #[test]
    fn test_removing_commander_keeps_commander_field() {
        let (mut team, soldiers) = squad(2);
        team.set_commander(&soldiers[0]).unwrap();
        team.remove_member(&soldiers[0]).unwrap();

        assert!(!team.is_member(SoldierId(0)));
        assert_eq!(team.commander(), Some(SoldierId(0)));
    }

    #[test]
    fn test_duplicate_member_rejected() {
        let (mut team, soldiers) = squad(1);
        assert!(matches!(
            team.add_member(&soldiers[0]),
            Err(GarrisonError::AlreadyMember { .. })
        ));
        assert_eq!(team.members().len(), 1);
    }

    #[test]
    fn test_broadcast_reaches_every_member() {
        let (mut team, mut soldiers) = squad(3);
        soldiers[1].update_status(SoldierStatus::Wounded);
        team.broadcast(DEFAULT_SENDER, "Rally at the bridge", &mut soldiers);

        assert!(soldiers.iter().all(|s| s.mailbox().len() == 1));
        assert_eq!(team.chat().len(), 1);
        assert_eq!(team.chat().entries()[0].text, "HQ: Rally at the bridge");
    }

    #[test]
    fn test_direct_message() {
        let (mut team, mut soldiers) = squad(2);
        team.direct_message("Command", "s1", "Report in", &mut soldiers)
            .unwrap();
        assert_eq!(soldiers[1].mailbox().len(), 1);
        assert!(soldiers[0].mailbox().is_empty());

        assert!(team
            .direct_message("Command", "Nobody", "Hello", &mut soldiers)
            .is_err());
    }

    #[test]
    fn test_assign_mission_numbers_and_status() {
        let (mut team, mut soldiers) = squad(2);
        soldiers[1].update_status(SoldierStatus::OnLeave);

        assert_eq!(team.assign_mission("Eagle Eye", &mut soldiers), 1);
        assert_eq!(team.status, STATUS_ON_MISSION);
        assert_eq!(soldiers[0].assignment(), Some("Mission #1: Eagle Eye"));
        assert_eq!(soldiers[1].assignment(), None);

        assert_eq!(team.assign_mission("Hammer Strike", &mut soldiers), 2);
    }

    #[test]
    fn test_equipment_and_skill_totals() {
        let (team, mut soldiers) = squad(2);
        soldiers[0].add_equipment("Ammo", 5);
        soldiers[1].add_equipment("Ammo", 3);
        soldiers[1].add_equipment("Binoculars", 1);

        assert_eq!(
            team.equipment_totals(&soldiers),
            vec![("Ammo".to_string(), 8), ("Binoculars".to_string(), 1)]
        );
        assert_eq!(team.skill_totals(&soldiers).total(), 8);
    }
}
