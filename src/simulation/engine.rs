//! Simulator - the registry plus its configuration and random source

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::core::config::SimulationConfig;
use crate::core::error::Result;
use crate::entity::equipment::EquipmentCatalog;
use crate::registry::Registry;
use crate::simulation::incidents::{self, Casualty};
use crate::simulation::probability;
use crate::simulation::progress::{self, ProgressOutcome};

/// Top-level simulation state
///
/// Every random draw in a session goes through `rng`, so two simulators
/// built with the same seed and fed the same commands end in the same state.
pub struct Simulator {
    pub registry: Registry,
    pub config: SimulationConfig,
    /// Random number generator (deterministic)
    rng: ChaCha8Rng,
    seed: u64,
}

impl Simulator {
    pub fn new(config: SimulationConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        tracing::info!("Simulator seed: {}", seed);

        let registry = Registry::new(EquipmentCatalog::new(config.equipment.clone()));
        Self {
            registry,
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Recompute and cache the success estimate for a mission by name
    pub fn success_estimate(&mut self, mission_name: &str) -> Result<f64> {
        let mission = self.registry.require_mission(mission_name)?;
        probability::refresh_success_rate(&mut self.registry, mission)
    }

    /// One progress step for a mission by name
    pub fn simulate_progress(
        &mut self,
        mission_name: &str,
        success_chance: Option<f64>,
    ) -> Result<ProgressOutcome> {
        let mission = self.registry.require_mission(mission_name)?;
        progress::simulate_mission_progress(
            &mut self.registry,
            mission,
            success_chance,
            &self.config,
            &mut self.rng,
        )
    }

    pub fn auto_complete(&mut self, mission_name: &str) -> Result<Vec<String>> {
        let mission = self.registry.require_mission(mission_name)?;
        progress::auto_complete(&mut self.registry, mission)
    }

    pub fn inflict_casualty(&mut self, team_name: &str) -> Result<Casualty> {
        let team = self.registry.require_team(team_name)?;
        incidents::inflict_casualty(&mut self.registry, team, &self.config, &mut self.rng)
    }

    pub fn random_field_event(&mut self, mission_name: &str) -> Result<&'static str> {
        let mission = self.registry.require_mission(mission_name)?;
        incidents::random_field_event(&mut self.registry, mission, &mut self.rng)
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}
