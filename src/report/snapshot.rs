//! Serializable roster snapshot

use serde::Serialize;

use crate::core::error::Result;
use crate::core::types::SoldierId;
use crate::entity::soldier::SoldierReport;
use crate::mission::MissionStatus;
use crate::registry::Registry;

/// Point-in-time view of every soldier, team and mission
#[derive(Debug, Clone, Serialize)]
pub struct RosterSnapshot {
    pub soldiers: Vec<SoldierReport>,
    pub teams: Vec<TeamSnapshot>,
    pub missions: Vec<MissionSnapshot>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamSnapshot {
    pub name: String,
    pub status: String,
    pub commander: Option<String>,
    pub members: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MissionSnapshot {
    pub name: String,
    pub status: MissionStatus,
    pub difficulty: u8,
    pub objectives_completed: usize,
    pub objectives_total: usize,
    pub success_rate: f64,
    pub teams: Vec<String>,
}

impl RosterSnapshot {
    pub fn capture(registry: &Registry) -> Self {
        let soldier_name = |id: SoldierId| {
            registry.soldier(id).map(|s| s.name.clone())
        };

        let teams = registry
            .teams()
            .iter()
            .map(|t| TeamSnapshot {
                name: t.name.clone(),
                status: t.status.clone(),
                commander: t.commander().and_then(soldier_name),
                members: t.members().iter().filter_map(|&id| soldier_name(id)).collect(),
            })
            .collect();

        let missions = registry
            .missions()
            .iter()
            .map(|m| {
                let (done, total) = m.progress();
                MissionSnapshot {
                    name: m.name.clone(),
                    status: m.status(),
                    difficulty: m.difficulty(),
                    objectives_completed: done,
                    objectives_total: total,
                    success_rate: m.success_rate(),
                    teams: m
                        .teams()
                        .iter()
                        .filter_map(|&t| registry.team(t).map(|t| t.name.clone()))
                        .collect(),
                }
            })
            .collect();

        Self {
            soldiers: registry.soldiers().iter().map(|s| s.report()).collect(),
            teams,
            missions,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Vec2;
    use crate::entity::equipment::EquipmentCatalog;
    use crate::entity::rank::Rank;
    use crate::entity::status::SoldierStatus;

    #[test]
    fn test_snapshot_json() {
        let mut reg = Registry::new(EquipmentCatalog::default());
        let s = reg.create_soldier("Taylor", Rank::Recruit, SoldierStatus::Active, Vec2::new(20.0, 22.0));
        reg.soldier_mut(s).unwrap().add_equipment("Radio", 3);
        let t = reg.create_team("Bravo");
        reg.add_to_team(t, s).unwrap();
        reg.set_commander(t, s).unwrap();

        let snapshot = RosterSnapshot::capture(&reg);
        assert_eq!(snapshot.teams[0].commander.as_deref(), Some("Taylor"));

        let json: serde_json::Value = serde_json::from_str(&snapshot.to_json().unwrap()).unwrap();
        assert_eq!(json["soldiers"][0]["name"], "Taylor");
        assert_eq!(json["soldiers"][0]["health"], 100);
        assert_eq!(json["teams"][0]["members"][0], "Taylor");
        assert!(json["missions"].as_array().unwrap().is_empty());
    }
}
