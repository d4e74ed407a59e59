//! Command execution - applies a [`Command`] to the simulator
//!
//! Returns the text the operator should see. Errors leave the simulator
//! untouched and are reported by the caller.

use crate::command::Command;
use crate::core::error::{GarrisonError, Result};
use crate::core::types::{MissionId, SoldierId, TeamId};
use crate::entity::rank::Rank;
use crate::entity::skills::SkillCategory;
use crate::entity::soldier::Soldier;
use crate::entity::status::SoldierStatus;
use crate::entity::team::{Team, DEFAULT_SENDER};
use crate::mission::{MissionStatus, ObjectiveCompletion, RewardKind};
use crate::registry::Registry;
use crate::report::{
    EquipmentSummary, GlobalStatus, MissionList, MissionReport, PersonnelByStatus, RecentEvents,
    RosterSnapshot, SoldierDetails, SoldierList, SuccessOverview, TeamEquipment, TeamList,
    TeamSkills, TeamStatus,
};
use crate::simulation::probability::refresh_success_rate;
use crate::simulation::Simulator;

/// Stateless dispatcher over [`Command`]s
pub struct CommandExecutor;

impl CommandExecutor {
    pub fn execute(sim: &mut Simulator, command: &Command) -> Result<String> {
        tracing::debug!("Executing {:?}", command);
        match command {
            Command::CreateSoldier { .. }
            | Command::ShowSoldier { .. }
            | Command::UpdateSoldierStatus { .. }
            | Command::GrantEquipment { .. }
            | Command::UseEquipment { .. }
            | Command::AdjustHealth { .. }
            | Command::ImproveSkill { .. }
            | Command::MoveSoldier { .. }
            | Command::SendMessage { .. }
            | Command::ListSoldiers => execute_soldier(sim, command),

            Command::CreateTeam { .. }
            | Command::AddToTeam { .. }
            | Command::RemoveFromTeam { .. }
            | Command::SetCommander { .. }
            | Command::TeamStatus { .. }
            | Command::MoveTeam { .. }
            | Command::TeamEquipment { .. }
            | Command::DistributeEquipment { .. }
            | Command::TeamSkills { .. }
            | Command::Broadcast { .. }
            | Command::DirectMessage { .. }
            | Command::ListTeams => execute_team(sim, command),

            Command::CreateMission { .. }
            | Command::AssignTeam { .. }
            | Command::AddObjective { .. }
            | Command::CompleteObjective { .. }
            | Command::UpdateMissionStatus { .. }
            | Command::MissionReport { .. }
            | Command::EstimateSuccess { .. }
            | Command::SetDifficulty { .. }
            | Command::AddReward { .. }
            | Command::ListMissions => execute_mission(sim, command),

            Command::SimulateProgress { .. }
            | Command::AutoComplete { .. }
            | Command::Casualty { .. }
            | Command::FieldEvent { .. } => execute_simulation(sim, command),

            _ => execute_report(sim, command),
        }
    }
}

fn execute_soldier(sim: &mut Simulator, command: &Command) -> Result<String> {
    let reg = &mut sim.registry;
    match command {
        Command::CreateSoldier {
            name,
            rank,
            status,
            location,
        } => {
            let name = name.trim();
            if name.is_empty() {
                return Err(GarrisonError::InvalidInput("soldier name is empty".into()));
            }
            let rank = rank.as_deref().map_or(Rank::default(), Rank::parse_or_default);
            let status = status
                .as_deref()
                .map_or(SoldierStatus::default(), SoldierStatus::parse_or_default);
            let id = reg.create_soldier(name, rank, status, *location);
            let soldier = reg.soldier_entry(id)?;
            Ok(format!("Soldier created: {}", soldier))
        }
        Command::ShowSoldier { name } => {
            let id = reg.require_soldier(name)?;
            let soldier = reg.soldier_entry(id)?;
            Ok(SoldierDetails {
                soldier: &*soldier,
                recent: sim.config.recent_entity_events,
            }
            .to_string())
        }
        Command::UpdateSoldierStatus { name, status } => {
            let status: SoldierStatus = status.parse()?;
            let id = reg.require_soldier(name)?;
            let soldier = reg.soldier_entry(id)?;
            let old = soldier.update_status(status);
            Ok(format!("{}: status updated from {} to {}", soldier.name, old, status))
        }
        Command::GrantEquipment {
            soldier,
            item,
            quantity,
        } => {
            let id = reg.require_soldier(soldier)?;
            let item = reg.catalog().resolve(item)?.to_string();
            let s = reg.soldier_entry(id)?;
            s.add_equipment(&item, *quantity);
            Ok(format!("Added {} {} to {}", quantity, item, s.name))
        }
        Command::UseEquipment {
            soldier,
            item,
            quantity,
        } => {
            let id = reg.require_soldier(soldier)?;
            let s = reg.soldier_entry(id)?;
            s.use_equipment(item.trim(), *quantity)?;
            Ok(format!(
                "{} used {} {} ({} left)",
                s.name,
                quantity,
                item.trim(),
                s.equipment().count(item.trim())
            ))
        }
        Command::AdjustHealth { soldier, delta } => {
            let id = reg.require_soldier(soldier)?;
            let s = reg.soldier_entry(id)?;
            let health = s.update_health(*delta);
            let mut out = format!("Health updated to {}", health);
            if health == 0 {
                out.push_str(&format!("\n{} is wounded and needs medical attention!", s.name));
            }
            Ok(out)
        }
        Command::ImproveSkill {
            soldier,
            skill,
            amount,
        } => {
            let category: SkillCategory = skill.parse()?;
            let id = reg.require_soldier(soldier)?;
            let s = reg.soldier_entry(id)?;
            s.improve_skill(category, *amount);
            Ok(format!(
                "{} skill of {} is now {}",
                category,
                s.name,
                s.skills().get(category)
            ))
        }
        Command::MoveSoldier { soldier, target } => {
            let id = reg.require_soldier(soldier)?;
            let s = reg.soldier_entry(id)?;
            let distance = s.update_location(*target);
            Ok(format!("{} moved to {} ({:.2} units)", s.name, target, distance))
        }
        Command::SendMessage { soldier, message } => {
            let id = reg.require_soldier(soldier)?;
            Ok(reg.soldier_entry(id)?.send_message(message))
        }
        Command::ListSoldiers => Ok(SoldierList(reg.soldiers()).to_string()),
        _ => Err(unroutable(command)),
    }
}

fn execute_team(sim: &mut Simulator, command: &Command) -> Result<String> {
    let spacing_default = sim.config.default_formation_spacing;
    let reg = &mut sim.registry;
    match command {
        Command::CreateTeam { name } => {
            let name = name.trim();
            if name.is_empty() {
                return Err(GarrisonError::InvalidInput("team name is empty".into()));
            }
            reg.create_team(name);
            Ok(format!("Team created: {}", name))
        }
        Command::AddToTeam { team, soldier } => {
            let t = reg.require_team(team)?;
            let s = reg.require_soldier(soldier)?;
            reg.add_to_team(t, s)?;
            Ok(format!("{} added to team {}", name_of_soldier(reg, s), name_of_team(reg, t)))
        }
        Command::RemoveFromTeam { team, soldier } => {
            let t = reg.require_team(team)?;
            let s = reg.require_soldier(soldier)?;
            reg.remove_from_team(t, s)?;
            Ok(format!(
                "{} removed from team {}",
                name_of_soldier(reg, s),
                name_of_team(reg, t)
            ))
        }
        Command::SetCommander { team, soldier } => {
            let t = reg.require_team(team)?;
            let s = reg.require_soldier(soldier)?;
            reg.set_commander(t, s)?;
            Ok(format!(
                "{} is now commander of team {}",
                name_of_soldier(reg, s),
                name_of_team(reg, t)
            ))
        }
        Command::TeamStatus { team } => {
            let t = reg.require_team(team)?;
            let text = team_view(reg, t, |team, soldiers| {
                TeamStatus { team, soldiers }.to_string()
            })?;
            log_on_team(reg, t, "Team status report generated");
            Ok(text)
        }
        Command::MoveTeam {
            team,
            target,
            spacing,
        } => {
            let t = reg.require_team(team)?;
            let moved = reg.move_team(t, *target, spacing.unwrap_or(spacing_default))?;
            Ok(format!(
                "Team {} moved to {} ({} soldiers repositioned)",
                name_of_team(reg, t),
                target,
                moved
            ))
        }
        Command::TeamEquipment { team } => {
            let t = reg.require_team(team)?;
            let text = team_view(reg, t, |team, soldiers| {
                TeamEquipment { team, soldiers }.to_string()
            })?;
            log_on_team(reg, t, "Equipment report generated");
            Ok(text)
        }
        Command::DistributeEquipment { team, items } => {
            let t = reg.require_team(team)?;
            if items.is_empty() {
                return Err(GarrisonError::InvalidInput("no equipment given".into()));
            }
            let resolved = items
                .iter()
                .map(|(item, qty)| -> Result<(String, u32)> {
                    Ok((reg.catalog().resolve(item)?.to_string(), *qty))
                })
                .collect::<Result<Vec<_>>>()?;
            let recipients = reg.distribute_equipment(t, &resolved)?;
            Ok(format!(
                "Equipment distributed in team {} among {} active members",
                name_of_team(reg, t),
                recipients
            ))
        }
        Command::TeamSkills { team } => {
            let t = reg.require_team(team)?;
            let text = team_view(reg, t, |team, soldiers| {
                TeamSkills { team, soldiers }.to_string()
            })?;
            log_on_team(reg, t, "Team skill report generated");
            Ok(text)
        }
        Command::Broadcast {
            team,
            sender,
            message,
        } => {
            let t = reg.require_team(team)?;
            let sender = sender.as_deref().unwrap_or(DEFAULT_SENDER);
            reg.broadcast(t, sender, message)?;
            Ok(format!("Message broadcast to team {}", name_of_team(reg, t)))
        }
        Command::DirectMessage {
            team,
            sender,
            recipient,
            message,
        } => {
            let t = reg.require_team(team)?;
            reg.direct_message(t, sender, recipient, message)?;
            Ok(format!("Message delivered to {}", recipient.trim()))
        }
        Command::ListTeams => Ok(TeamList {
            teams: reg.teams(),
            soldiers: reg.soldiers(),
        }
        .to_string()),
        _ => Err(unroutable(command)),
    }
}

fn execute_mission(sim: &mut Simulator, command: &Command) -> Result<String> {
    let recent = sim.config.recent_entity_events;
    let reg = &mut sim.registry;
    match command {
        Command::CreateMission {
            name,
            description,
            location,
            difficulty,
        } => {
            let name = name.trim();
            if name.is_empty() {
                return Err(GarrisonError::InvalidInput("mission name is empty".into()));
            }
            let id = reg.create_mission(name, description.trim(), *location);
            let mission = reg.mission_entry(id)?;
            let mut out = String::new();
            if let Some(level) = difficulty {
                if let Err(e) = mission.set_difficulty(*level) {
                    out.push_str(&format!("{}; using default difficulty\n", e));
                }
            }
            out.push_str(&format!("Mission created: {}", mission));
            Ok(out)
        }
        Command::AssignTeam { mission, team } => {
            let m = reg.require_mission(mission)?;
            let t = reg.require_team(team)?;
            let number = reg.assign_team_to_mission(t, m)?;
            Ok(format!(
                "Team {} added to mission {} (assignment #{})",
                name_of_team(reg, t),
                name_of_mission(reg, m),
                number
            ))
        }
        Command::AddObjective {
            mission,
            description,
        } => {
            let description = description.trim();
            if description.is_empty() {
                return Err(GarrisonError::InvalidInput("objective is empty".into()));
            }
            let m = reg.require_mission(mission)?;
            reg.mission_entry(m)?.add_objective(description);
            Ok(format!("Objective added to mission {}", name_of_mission(reg, m)))
        }
        Command::CompleteObjective { mission, number } => {
            let m = reg.require_mission(mission)?;
            let count = reg.mission_entry(m)?.objectives().len();
            let index = number
                .checked_sub(1)
                .ok_or(GarrisonError::ObjectiveOutOfRange {
                    number: *number,
                    count,
                })?;
            let text = match reg.complete_objective(m, index)? {
                ObjectiveCompletion::AlreadyComplete => "Objective already completed".to_string(),
                ObjectiveCompletion::Completed => "Objective completed".to_string(),
                ObjectiveCompletion::MissionCompleted => format!(
                    "Objective completed\nAll objectives completed; mission {} is Completed",
                    name_of_mission(reg, m)
                ),
            };
            Ok(text)
        }
        Command::UpdateMissionStatus { mission, status } => {
            let status: MissionStatus = status.parse()?;
            let m = reg.require_mission(mission)?;
            let old = reg.mission_entry(m)?.update_status(status);
            Ok(format!("Status updated from {} to {}", old, status))
        }
        Command::MissionReport { mission } => {
            let m = reg.require_mission(mission)?;
            let text = match reg.mission(m) {
                Some(mission) => MissionReport {
                    mission,
                    teams: reg.teams(),
                    recent,
                }
                .to_string(),
                None => return Err(GarrisonError::UnknownId(format!("{:?}", m))),
            };
            reg.mission_entry(m)?.log_event("Mission report generated");
            Ok(text)
        }
        Command::EstimateSuccess { mission } => {
            let m = reg.require_mission(mission)?;
            let rate = refresh_success_rate(reg, m)?;
            Ok(format!("Mission success probability: {}%", rate))
        }
        Command::SetDifficulty { mission, level } => {
            let m = reg.require_mission(mission)?;
            reg.mission_entry(m)?.set_difficulty(*level)?;
            Ok(format!("Difficulty set to {}", level))
        }
        Command::AddReward {
            mission,
            kind,
            value,
        } => {
            let kind: RewardKind = kind.parse()?;
            let m = reg.require_mission(mission)?;
            reg.mission_entry(m)?.add_reward(kind, *value);
            Ok(format!("Reward added: {} = {}", kind, value))
        }
        Command::ListMissions => Ok(MissionList(reg.missions()).to_string()),
        _ => Err(unroutable(command)),
    }
}

fn execute_simulation(sim: &mut Simulator, command: &Command) -> Result<String> {
    match command {
        Command::SimulateProgress { mission, chance } => {
            if let Some(c) = chance {
                if !(0.0..=100.0).contains(c) {
                    return Err(GarrisonError::InvalidInput(format!(
                        "success chance {} is outside 0-100",
                        c
                    )));
                }
            }
            let outcome = sim.simulate_progress(mission, *chance)?;
            let mut out = String::new();
            match outcome.objective {
                Some(i) if outcome.succeeded => {
                    out.push_str(&format!("Objective {} completed\n", i + 1))
                }
                Some(i) => out.push_str(&format!("Objective {} failed\n", i + 1)),
                None => out.push_str("No open objectives\n"),
            }
            if let Some(event) = outcome.flavor_event {
                out.push_str(&format!("Random event: {}\n", event));
            }
            for injury in &outcome.injuries {
                if let Some(s) = sim.registry.soldier(injury.soldier) {
                    out.push_str(&format!("{} took {} damage\n", s.name, injury.damage));
                }
            }
            out.push_str(&format!(
                "Mission progress simulated. New status: {}",
                outcome.status
            ));
            Ok(out)
        }
        Command::AutoComplete { mission } => {
            let completed = sim.auto_complete(mission)?;
            let m = sim.registry.require_mission(mission)?;
            let name = name_of_mission(&sim.registry, m);
            let mut out = format!("Auto-completing mission {}...\n", name);
            for description in completed {
                out.push_str(&format!("Objective completed: {}\n", description));
            }
            out.push_str(&format!("Mission {} auto-completed", name));
            Ok(out)
        }
        Command::Casualty { team } => {
            let hit = sim.inflict_casualty(team)?;
            let mut out = format!(
                "Casualty event generated for {}\nHealth of {} reduced to {}",
                hit.name, hit.name, hit.health
            );
            if hit.wounded {
                out.push_str(&format!(
                    "\n{} is now wounded and needs medical attention!",
                    hit.name
                ));
            }
            Ok(out)
        }
        Command::FieldEvent { mission } => {
            let event = sim.random_field_event(mission)?;
            let m = sim.registry.require_mission(mission)?;
            Ok(format!(
                "Random event for mission {}: {}",
                name_of_mission(&sim.registry, m),
                event
            ))
        }
        _ => Err(unroutable(command)),
    }
}

fn execute_report(sim: &mut Simulator, command: &Command) -> Result<String> {
    let reg = &mut sim.registry;
    match command {
        Command::GlobalStatus => Ok(GlobalStatus(reg).to_string()),
        Command::SkillOverview => {
            if reg.teams().is_empty() {
                return Ok("No teams found\n".to_string());
            }
            let mut out = String::from("===== TEAM SKILL ASSESSMENT =====\n");
            let ids: Vec<_> = reg.teams().iter().map(|t| t.id).collect();
            for t in ids {
                out.push_str(&team_view(reg, t, |team, soldiers| {
                    TeamSkills { team, soldiers }.to_string()
                })?);
                out.push('\n');
                log_on_team(reg, t, "Team skill report generated");
            }
            Ok(out)
        }
        Command::SuccessOverview => {
            let ids: Vec<_> = reg.missions().iter().map(|m| m.id).collect();
            for m in ids {
                refresh_success_rate(reg, m)?;
            }
            Ok(SuccessOverview(reg).to_string())
        }
        Command::RecentEvents => Ok(RecentEvents {
            log: reg.events(),
            limit: sim.config.recent_global_events,
        }
        .to_string()),
        Command::EquipmentSummary => Ok(EquipmentSummary {
            soldiers: reg.soldiers(),
            catalog: reg.catalog(),
        }
        .to_string()),
        Command::PersonnelStatus => Ok(PersonnelByStatus(reg.soldiers()).to_string()),
        Command::Snapshot => RosterSnapshot::capture(reg).to_json(),
        _ => Err(unroutable(command)),
    }
}

fn unroutable(command: &Command) -> GarrisonError {
    GarrisonError::InvalidInput(format!("unroutable command {:?}", command))
}

fn team_view(
    reg: &Registry,
    id: TeamId,
    render: impl FnOnce(&Team, &[Soldier]) -> String,
) -> Result<String> {
    let team = reg
        .team(id)
        .ok_or_else(|| GarrisonError::UnknownId(format!("{:?}", id)))?;
    Ok(render(team, reg.soldiers()))
}

fn log_on_team(reg: &mut Registry, id: TeamId, text: &str) {
    if let Some(team) = reg.team_mut(id) {
        team.log_event(text);
    }
}

fn name_of_soldier(reg: &Registry, id: SoldierId) -> String {
    reg.soldier(id).map(|s| s.name.clone()).unwrap_or_default()
}

fn name_of_team(reg: &Registry, id: TeamId) -> String {
    reg.team(id).map(|t| t.name.clone()).unwrap_or_default()
}

fn name_of_mission(reg: &Registry, id: MissionId) -> String {
    reg.mission(id).map(|m| m.name.clone()).unwrap_or_default()
}
