//! Text reports
//!
//! Each report is a borrowed view implementing `Display`, so the shell can
//! print it and tests can compare the rendered text. Reports never mutate;
//! callers that want a "report generated" audit entry log it themselves.

pub mod snapshot;

pub use snapshot::RosterSnapshot;

use ahash::AHashMap;
use std::fmt;

use crate::core::log::{EventLog, TIMESTAMP_FORMAT};
use crate::entity::equipment::EquipmentCatalog;
use crate::entity::skills::SkillCategory;
use crate::entity::soldier::Soldier;
use crate::entity::status::SoldierStatus;
use crate::entity::team::Team;
use crate::mission::{Mission, MissionStatus};
use crate::registry::Registry;
use crate::simulation::probability::assess;

fn write_recent(f: &mut fmt::Formatter<'_>, log: &EventLog, limit: usize) -> fmt::Result {
    for entry in log.recent(limit) {
        writeln!(f, "  - {}", entry)?;
    }
    Ok(())
}

/// Field-by-field details of one soldier plus the latest history entries
pub struct SoldierDetails<'a> {
    pub soldier: &'a Soldier,
    pub recent: usize,
}

impl fmt::Display for SoldierDetails<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.soldier;
        writeln!(f, "===== SOLDIER DETAILS =====")?;
        writeln!(f, "Name: {}", s.name)?;
        writeln!(f, "Rank: {}", s.rank())?;
        writeln!(f, "Status: {}", s.status())?;
        writeln!(f, "Location: {}", s.location())?;
        writeln!(f, "Health: {}%", s.health())?;

        if s.equipment().is_empty() {
            writeln!(f, "Equipment: none")?;
        } else {
            let items: Vec<String> = s
                .equipment()
                .sorted()
                .into_iter()
                .map(|(item, qty)| format!("{} x{}", item, qty))
                .collect();
            writeln!(f, "Equipment: {}", items.join(", "))?;
        }

        writeln!(f, "Mission: {}", s.assignment().unwrap_or("none"))?;
        writeln!(f, "Experience: {}", s.experience())?;
        let skills: Vec<String> = SkillCategory::ALL
            .iter()
            .map(|&c| format!("{} {}", c, s.skills().get(c)))
            .collect();
        writeln!(f, "Skills: {}", skills.join(", "))?;

        if !s.mailbox().is_empty() {
            writeln!(f, "Messages: {}", s.mailbox().len())?;
        }

        writeln!(f, "\nRecent events:")?;
        write_recent(f, s.history(), self.recent)
    }
}

/// Numbered one-line summary of every soldier
pub struct SoldierList<'a>(pub &'a [Soldier]);

impl fmt::Display for SoldierList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No soldiers found");
        }
        writeln!(f, "===== ALL SOLDIERS =====")?;
        for (i, s) in self.0.iter().enumerate() {
            writeln!(f, "{}. {}", i + 1, s)?;
        }
        Ok(())
    }
}

pub struct TeamStatus<'a> {
    pub team: &'a Team,
    pub soldiers: &'a [Soldier],
}

impl fmt::Display for TeamStatus<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let team = self.team;
        let active = team.count_with_status(SoldierStatus::Active, self.soldiers);
        let wounded = team.count_with_status(SoldierStatus::Wounded, self.soldiers);

        writeln!(f, "Team {} status report:", team.name)?;
        writeln!(
            f,
            "Total members: {}, Active: {}, Wounded: {}",
            team.members().len(),
            active,
            wounded
        )?;
        if let Some(c) = team.commander().and_then(|id| self.soldiers.get(id.index())) {
            writeln!(f, "Commander: {} {}", c.rank(), c.name)?;
        }
        writeln!(f, "Current location: {}", team.location())?;
        writeln!(f, "Current status: {}", team.status)?;

        writeln!(f, "\nMembers:")?;
        for s in team.members().iter().filter_map(|id| self.soldiers.get(id.index())) {
            writeln!(
                f,
                "{} {}: {} at {}, Health: {}%",
                s.rank(),
                s.name,
                s.status(),
                s.location(),
                s.health()
            )?;
        }
        Ok(())
    }
}

pub struct TeamEquipment<'a> {
    pub team: &'a Team,
    pub soldiers: &'a [Soldier],
}

impl fmt::Display for TeamEquipment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Team {} equipment report:", self.team.name)?;
        let totals = self.team.equipment_totals(self.soldiers);
        if totals.is_empty() {
            return writeln!(f, "- none");
        }
        for (item, qty) in totals {
            writeln!(f, "- {}: {}", item, qty)?;
        }
        Ok(())
    }
}

/// Skill totals and per-member averages over all members
pub struct TeamSkills<'a> {
    pub team: &'a Team,
    pub soldiers: &'a [Soldier],
}

impl fmt::Display for TeamSkills<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Team {} skill report:", self.team.name)?;
        let totals = self.team.skill_totals(self.soldiers);
        let members = self.team.members().len();
        for category in SkillCategory::ALL {
            let total = totals.get(category);
            let average = if members == 0 {
                0.0
            } else {
                total as f64 / members as f64
            };
            writeln!(f, "- {}: Total {}, Average {:.1}", category, total, average)?;
        }
        Ok(())
    }
}

pub struct TeamList<'a> {
    pub teams: &'a [Team],
    pub soldiers: &'a [Soldier],
}

impl fmt::Display for TeamList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.teams.is_empty() {
            return writeln!(f, "No teams found");
        }
        writeln!(f, "===== ALL TEAMS =====")?;
        for (i, team) in self.teams.iter().enumerate() {
            let commander = team
                .commander()
                .and_then(|id| self.soldiers.get(id.index()))
                .map_or("None", |s| s.name.as_str());
            writeln!(
                f,
                "{}. {} - Members: {}, Commander: {}",
                i + 1,
                team.name,
                team.members().len(),
                commander
            )?;
        }
        Ok(())
    }
}

pub struct MissionReport<'a> {
    pub mission: &'a Mission,
    pub teams: &'a [Team],
    pub recent: usize,
}

fn format_duration(duration: chrono::Duration) -> String {
    let secs = duration.num_seconds().max(0);
    format!("{}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

impl fmt::Display for MissionReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.mission;
        let (done, total) = m.progress();

        writeln!(f, "Mission report: {}", m.name)?;
        writeln!(f, "Status: {}", m.status())?;
        writeln!(f, "Location: {}", m.location)?;
        writeln!(f, "Description: {}", m.description)?;
        writeln!(f, "Difficulty: {}/10", m.difficulty())?;

        if let Some(start) = m.started_at() {
            writeln!(f, "Start time: {}", start.format(TIMESTAMP_FORMAT))?;
        }
        if let Some(end) = m.ended_at() {
            writeln!(f, "End time: {}", end.format(TIMESTAMP_FORMAT))?;
            if let Some(start) = m.started_at() {
                writeln!(f, "Duration: {}", format_duration(end - start))?;
            }
        }

        writeln!(f, "Objectives: {}/{} completed", done, total)?;
        for (i, objective) in m.objectives().iter().enumerate() {
            writeln!(f, "  {} {}. {}", objective.mark(), i + 1, objective.description)?;
        }

        writeln!(f, "\nAssigned teams:")?;
        for team in m.teams().iter().filter_map(|t| self.teams.get(t.index())) {
            writeln!(f, "- {} ({} members)", team.name, team.members().len())?;
        }

        if !m.events().is_empty() {
            writeln!(f, "\nRecent events:")?;
            write_recent(f, m.events(), self.recent)?;
        }
        Ok(())
    }
}

pub struct MissionList<'a>(pub &'a [Mission]);

impl fmt::Display for MissionList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No missions found");
        }
        writeln!(f, "===== ALL MISSIONS =====")?;
        for (i, m) in self.0.iter().enumerate() {
            let (done, total) = m.progress();
            writeln!(
                f,
                "{}. {} - Status: {}, Objectives: {}/{}, Teams: {}",
                i + 1,
                m.name,
                m.status(),
                done,
                total,
                m.teams().len()
            )?;
        }
        Ok(())
    }
}

/// Personnel and mission counts by status
pub struct GlobalStatus<'a>(pub &'a Registry);

impl fmt::Display for GlobalStatus<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reg = self.0;
        writeln!(f, "===== GLOBAL STATUS REPORT =====")?;
        writeln!(f, "Total personnel: {}", reg.soldiers().len())?;
        writeln!(f, "Teams: {}", reg.teams().len())?;
        writeln!(f, "Missions: {}", reg.missions().len())?;

        writeln!(f, "\nPersonnel status:")?;
        for status in SoldierStatus::ALL {
            let count = reg.soldiers().iter().filter(|s| s.status() == status).count();
            if count > 0 {
                writeln!(f, "- {}: {}", status, count)?;
            }
        }

        writeln!(f, "\nMission status:")?;
        for status in MissionStatus::ALL {
            let count = reg.missions().iter().filter(|m| m.status() == status).count();
            if count > 0 {
                writeln!(f, "- {}: {}", status, count)?;
            }
        }
        Ok(())
    }
}

/// Cached success estimate of every mission with the factors behind it
///
/// Shows `success_rate` as last cached; refresh the estimates first for
/// current numbers.
pub struct SuccessOverview<'a>(pub &'a Registry);

impl fmt::Display for SuccessOverview<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reg = self.0;
        writeln!(f, "===== MISSION SUCCESS PROBABILITIES =====")?;
        if reg.missions().is_empty() {
            return writeln!(f, "No missions found");
        }
        for m in reg.missions() {
            let readiness = assess(m, reg.teams(), reg.soldiers());
            writeln!(f, "Mission: {}", m.name)?;
            writeln!(f, "Status: {}", m.status())?;
            writeln!(f, "Difficulty: {}/10", m.difficulty())?;
            writeln!(f, "Success probability: {}%", m.success_rate())?;
            writeln!(f, "Contributing factors:")?;
            writeln!(f, "- Teams assigned: {}", readiness.team_count)?;
            writeln!(
                f,
                "- Personnel: {} active of {} total",
                readiness.active_members, readiness.total_members
            )?;
            writeln!(f, "- Average skill: {:.1}", readiness.average_skill)?;
            writeln!(f)?;
        }
        Ok(())
    }
}

pub struct RecentEvents<'a> {
    pub log: &'a EventLog,
    pub limit: usize,
}

impl fmt::Display for RecentEvents<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "===== RECENT EVENTS =====")?;
        for entry in self.log.recent(self.limit) {
            writeln!(f, "{}", entry)?;
        }
        Ok(())
    }
}

/// Equipment held across all soldiers, with catalog weight and effectiveness
pub struct EquipmentSummary<'a> {
    pub soldiers: &'a [Soldier],
    pub catalog: &'a EquipmentCatalog,
}

impl fmt::Display for EquipmentSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "===== EQUIPMENT SUMMARY =====")?;
        let mut totals = AHashMap::new();
        for s in self.soldiers {
            s.equipment().add_to(&mut totals);
        }
        if totals.is_empty() {
            return writeln!(f, "No equipment found");
        }

        let mut totals: Vec<(String, u32)> = totals.into_iter().collect();
        totals.sort();
        for (item, qty) in totals {
            match self.catalog.find(&item) {
                Some(spec) => writeln!(
                    f,
                    "- {}: {} units (Weight: {}, Effectiveness: {})",
                    item, qty, spec.weight, spec.effectiveness
                )?,
                None => writeln!(
                    f,
                    "- {}: {} units (Weight: N/A, Effectiveness: N/A)",
                    item, qty
                )?,
            }
        }
        Ok(())
    }
}

/// Soldiers grouped by status
pub struct PersonnelByStatus<'a>(pub &'a [Soldier]);

impl fmt::Display for PersonnelByStatus<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "===== PERSONNEL STATUS =====")?;
        if self.0.is_empty() {
            return writeln!(f, "No personnel found");
        }
        for status in SoldierStatus::ALL {
            let group: Vec<&Soldier> = self.0.iter().filter(|s| s.status() == status).collect();
            if group.is_empty() {
                continue;
            }
            writeln!(f, "\n{} personnel ({}):", status, group.len())?;
            for s in group {
                writeln!(f, "- {} {}, Health: {}%", s.rank(), s.name, s.health())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Vec2;
    use crate::entity::rank::Rank;

    fn registry() -> Registry {
        let mut reg = Registry::new(EquipmentCatalog::default());
        let a = reg.create_soldier("Johnson", Rank::Sergeant, SoldierStatus::Active, Vec2::new(10.0, 10.0));
        let b = reg.create_soldier("Williams", Rank::Recruit, SoldierStatus::Wounded, Vec2::new(8.0, 10.0));
        reg.soldier_mut(a).unwrap().add_equipment("Rifle", 1);
        reg.soldier_mut(b).unwrap().add_equipment("Medkit", 3);
        reg.soldier_mut(b).unwrap().add_equipment("Flare", 2);
        let t = reg.create_team("Alpha");
        reg.add_to_team(t, a).unwrap();
        reg.add_to_team(t, b).unwrap();
        reg.set_commander(t, a).unwrap();
        let m = reg.create_mission("Eagle Eye", "Recon", Vec2::new(50.0, 60.0));
        reg.mission_mut(m).unwrap().add_objective("Reach the observation point");
        reg.mission_mut(m).unwrap().add_objective("Gather intelligence");
        reg.assign_team_to_mission(t, m).unwrap();
        reg.complete_objective(m, 0).unwrap();
        reg
    }

    #[test]
    fn test_team_status_counts() {
        let reg = registry();
        let text = TeamStatus {
            team: &reg.teams()[0],
            soldiers: reg.soldiers(),
        }
        .to_string();

        assert!(text.contains("Total members: 2, Active: 1, Wounded: 1"));
        assert!(text.contains("Commander: Sergeant Johnson"));
        assert!(text.contains("Current status: On Mission"));
        assert!(text.contains("Recruit Williams: Wounded at (8, 10), Health: 100%"));
    }

    #[test]
    fn test_team_skill_averages() {
        let reg = registry();
        let text = TeamSkills {
            team: &reg.teams()[0],
            soldiers: reg.soldiers(),
        }
        .to_string();
        assert!(text.contains("- Combat: Total 2, Average 1.0"));
    }

    #[test]
    fn test_mission_report_marks_objectives() {
        let reg = registry();
        let text = MissionReport {
            mission: &reg.missions()[0],
            teams: reg.teams(),
            recent: 5,
        }
        .to_string();

        assert!(text.contains("Objectives: 1/2 completed"));
        assert!(text.contains("✓ 1. Reach the observation point"));
        assert!(text.contains("✗ 2. Gather intelligence"));
        assert!(text.contains("- Alpha (2 members)"));
        assert!(text.contains("Difficulty: 1/10"));
    }

    #[test]
    fn test_lists() {
        let reg = registry();
        let teams = TeamList {
            teams: reg.teams(),
            soldiers: reg.soldiers(),
        }
        .to_string();
        assert!(teams.contains("1. Alpha - Members: 2, Commander: Johnson"));

        let missions = MissionList(reg.missions()).to_string();
        assert!(missions.contains("1. Eagle Eye - Status: Pending, Objectives: 1/2, Teams: 1"));

        assert_eq!(SoldierList(&[]).to_string(), "No soldiers found\n");
    }

    #[test]
    fn test_global_status_skips_empty_groups() {
        let reg = registry();
        let text = GlobalStatus(&reg).to_string();
        assert!(text.contains("- Active: 1"));
        assert!(text.contains("- Wounded: 1"));
        assert!(!text.contains("On Leave"));
        assert!(text.contains("- Pending: 1"));
    }

    #[test]
    fn test_equipment_summary_uses_catalog() {
        let reg = registry();
        let text = EquipmentSummary {
            soldiers: reg.soldiers(),
            catalog: reg.catalog(),
        }
        .to_string();
        assert!(text.contains("- Rifle: 1 units (Weight: 4.5, Effectiveness: 7)"));
        assert!(text.contains("- Flare: 2 units (Weight: N/A, Effectiveness: N/A)"));
    }

    #[test]
    fn test_personnel_grouped_by_status() {
        let reg = registry();
        let text = PersonnelByStatus(reg.soldiers()).to_string();
        assert!(text.contains("Active personnel (1):"));
        assert!(text.contains("- Recruit Williams, Health: 100%"));
    }

    #[test]
    fn test_duration_format() {
        assert_eq!(format_duration(chrono::Duration::seconds(3725)), "1:02:05");
    }
}
