//! Sample scenario: two teams and two missions in progress

use crate::core::error::Result;
use crate::core::types::Vec2;
use crate::entity::rank::Rank;
use crate::entity::status::SoldierStatus;
use crate::mission::MissionStatus;
use crate::registry::Registry;

/// (name, rank text, location, equipment)
const SOLDIERS: &[(&str, &str, (f32, f32), &[(&str, u32)])] = &[
    ("Johnson", "Sergeant", (10.0, 10.0), &[("Rifle", 1), ("Ammo", 5)]),
    ("Smith", "Corporal", (12.0, 10.0), &[("Radio", 1), ("Pistol", 1)]),
    // "Medic" is not a rank, so Williams enlists as a Recruit
    ("Williams", "Medic", (8.0, 10.0), &[("Medkit", 3), ("Water", 2)]),
    ("Miller", "Recruit", (10.0, 12.0), &[("Binoculars", 1), ("Ammo", 3)]),
    ("Davis", "Recruit", (10.0, 8.0), &[("Rifle", 1), ("Grenade", 2)]),
    ("Garcia", "Sergeant", (20.0, 20.0), &[("Rifle", 1), ("Night Scope", 1)]),
    ("Wilson", "Corporal", (22.0, 20.0), &[("Radio", 1), ("Ammo", 4)]),
    ("Taylor", "Recruit", (20.0, 22.0), &[("Rifle", 1), ("Radio", 3)]),
];

/// (team, members, commander)
const TEAMS: &[(&str, &[&str], &str)] = &[
    ("Alpha", &["Johnson", "Smith", "Williams", "Miller", "Davis"], "Johnson"),
    ("Bravo", &["Garcia", "Wilson", "Taylor"], "Garcia"),
];

/// Populate an empty registry with the sample scenario
pub fn load_sample_data(registry: &mut Registry) -> Result<()> {
    for &(name, rank, (x, y), kit) in SOLDIERS {
        let id = registry.create_soldier(
            name,
            Rank::parse_or_default(rank),
            SoldierStatus::Active,
            Vec2::new(x, y),
        );
        let soldier = registry.soldier_entry(id)?;
        for &(item, quantity) in kit {
            soldier.add_equipment(item, quantity);
        }
    }

    for &(team_name, members, commander) in TEAMS {
        let team = registry.create_team(team_name);
        for member in members {
            let soldier = registry.require_soldier(member)?;
            registry.add_to_team(team, soldier)?;
        }
        let commander = registry.require_soldier(commander)?;
        registry.set_commander(team, commander)?;
    }

    let recon = registry.create_mission(
        "Eagle Eye",
        "Reconnaissance of enemy territory",
        Vec2::new(50.0, 60.0),
    );
    {
        let mission = registry.mission_entry(recon)?;
        mission.set_difficulty(3)?;
        for objective in [
            "Reach the observation point",
            "Gather intelligence",
            "Document enemy movement",
            "Return to base",
        ] {
            mission.add_objective(objective);
        }
    }

    let assault = registry.create_mission(
        "Hammer Strike",
        "Destroy the enemy stronghold",
        Vec2::new(80.0, 30.0),
    );
    {
        let mission = registry.mission_entry(assault)?;
        mission.set_difficulty(7)?;
        for objective in [
            "Secure the perimeter",
            "Neutralize enemy forces",
            "Secure the facility",
            "Retrieve intelligence",
            "Withdraw from the area",
        ] {
            mission.add_objective(objective);
        }
    }

    let alpha = registry.require_team("Alpha")?;
    let bravo = registry.require_team("Bravo")?;
    registry.assign_team_to_mission(alpha, recon)?;
    registry.assign_team_to_mission(bravo, assault)?;

    registry.mission_entry(recon)?.update_status(MissionStatus::Active);
    registry.complete_objective(recon, 0)?;
    registry
        .mission_entry(recon)?
        .log_event("Team Alpha reached the observation point");

    registry.log_event("Sample data created successfully");
    tracing::info!(
        "Loaded sample data: {} soldiers, {} teams, {} missions",
        registry.soldiers().len(),
        registry.teams().len(),
        registry.missions().len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::equipment::EquipmentCatalog;

    #[test]
    fn test_sample_scenario() {
        let mut reg = Registry::new(EquipmentCatalog::default());
        load_sample_data(&mut reg).unwrap();

        assert_eq!(reg.soldiers().len(), 8);
        let williams = reg.require_soldier("williams").unwrap();
        assert_eq!(reg.soldier(williams).unwrap().rank(), Rank::Recruit);

        let alpha = reg.team(reg.require_team("Alpha").unwrap()).unwrap();
        assert_eq!(alpha.members().len(), 5);
        assert_eq!(alpha.status, "On Mission");

        let eagle = reg.mission(reg.require_mission("Eagle Eye").unwrap()).unwrap();
        assert_eq!(eagle.status(), MissionStatus::Active);
        assert_eq!(eagle.progress(), (1, 4));
        assert_eq!(eagle.difficulty(), 3);

        let hammer = reg.mission(reg.require_mission("Hammer Strike").unwrap()).unwrap();
        assert_eq!(hammer.status(), MissionStatus::Pending);
        assert_eq!(hammer.progress(), (0, 5));
    }
}
