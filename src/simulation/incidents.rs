//! Operator-triggered incidents: casualties and random field events

use rand::seq::SliceRandom;
use rand::Rng;

use crate::core::config::SimulationConfig;
use crate::core::error::{GarrisonError, Result};
use crate::core::types::{MissionId, SoldierId, TeamId};
use crate::entity::status::SoldierStatus;
use crate::registry::Registry;
use crate::simulation::constants::FIELD_EVENTS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Casualty {
    pub soldier: SoldierId,
    pub name: String,
    pub damage: u32,
    /// Health after the hit
    pub health: u8,
    pub wounded: bool,
}

/// Hurt one randomly chosen active member of a team
pub fn inflict_casualty<R: Rng + ?Sized>(
    registry: &mut Registry,
    team: TeamId,
    config: &SimulationConfig,
    rng: &mut R,
) -> Result<Casualty> {
    let t = registry
        .team(team)
        .ok_or_else(|| GarrisonError::UnknownId(format!("{:?}", team)))?;
    let active = t.active_members(registry.soldiers());
    let team_name = t.name.clone();

    let victim = *active
        .choose(rng)
        .ok_or_else(|| GarrisonError::NoActiveMembers(team_name.clone()))?;
    let damage = rng.gen_range(config.casualty_damage_min..=config.casualty_damage_max);

    let s = registry.soldier_entry(victim)?;
    let health = s.update_health(-(damage as i32));
    let casualty = Casualty {
        soldier: victim,
        name: s.name.clone(),
        damage,
        health,
        wounded: s.status() == SoldierStatus::Wounded,
    };

    if let Some(t) = registry.team_mut(team) {
        t.log_event(format!(
            "Casualty event: {} took {} damage",
            casualty.name, damage
        ));
    }
    tracing::debug!("Casualty in {}: {} (-{})", team_name, casualty.name, damage);
    Ok(casualty)
}

/// Log one random field event on a mission
pub fn random_field_event<R: Rng + ?Sized>(
    registry: &mut Registry,
    mission: MissionId,
    rng: &mut R,
) -> Result<&'static str> {
    let event = FIELD_EVENTS
        .choose(rng)
        .copied()
        .unwrap_or(FIELD_EVENTS[0]);
    registry
        .mission_entry(mission)?
        .log_event(format!("Random event: {}", event));
    Ok(event)
}
