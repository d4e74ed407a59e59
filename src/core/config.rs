//! Simulator configuration with documented constants
//!
//! Every field defaults to the matching value in
//! [`crate::simulation::constants`]. A TOML file passed with `--config` may
//! override any subset of them; missing keys keep their defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{GarrisonError, Result};
use crate::entity::equipment::{default_catalog, EquipmentSpec};
use crate::simulation::constants::*;

/// Configuration for the simulator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seed for the simulator's random source
    ///
    /// `None` draws a fresh seed at startup. The seed in use is logged so a
    /// session can be rerun with the same random outcomes.
    pub seed: Option<u64>,

    // === MISSION PROGRESS ===
    /// Chance that a completed objective also logs a flavor event
    pub flavor_event_chance: f64,

    /// Chance that a completed objective triggers an injury check
    pub injury_check_chance: f64,

    /// Per active member chance of being hurt during an injury check
    pub member_injury_chance: f64,

    /// Inclusive damage range for progress injuries
    pub injury_damage_min: u32,
    pub injury_damage_max: u32,

    /// Chance that a failed objective fails the whole mission
    pub objective_failure_abort_chance: f64,

    // === CASUALTY EVENTS ===
    /// Inclusive damage range for operator-triggered casualty events
    pub casualty_damage_min: u32,
    pub casualty_damage_max: u32,

    // === SHELL ===
    /// Spacing used when the operator leaves formation spacing blank
    pub default_formation_spacing: f32,

    /// Cosmetic pause between auto-completed objectives, in milliseconds
    pub auto_complete_pause_ms: u64,

    /// How many entity events the detail reports show
    pub recent_entity_events: usize,

    /// How many global journal entries the event report shows
    pub recent_global_events: usize,

    // === EQUIPMENT ===
    /// Known equipment; shell-driven grants only accept these items
    pub equipment: Vec<EquipmentSpec>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: None,

            flavor_event_chance: FLAVOR_EVENT_CHANCE,
            injury_check_chance: INJURY_CHECK_CHANCE,
            member_injury_chance: MEMBER_INJURY_CHANCE,
            injury_damage_min: INJURY_DAMAGE_MIN,
            injury_damage_max: INJURY_DAMAGE_MAX,
            objective_failure_abort_chance: OBJECTIVE_FAILURE_ABORT_CHANCE,

            casualty_damage_min: CASUALTY_DAMAGE_MIN,
            casualty_damage_max: CASUALTY_DAMAGE_MAX,

            default_formation_spacing: DEFAULT_FORMATION_SPACING,
            auto_complete_pause_ms: 0,
            recent_entity_events: RECENT_ENTITY_EVENTS,
            recent_global_events: RECENT_GLOBAL_EVENTS,

            equipment: default_catalog(),
        }
    }
}

impl SimulationConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let chances = [
            ("flavor_event_chance", self.flavor_event_chance),
            ("injury_check_chance", self.injury_check_chance),
            ("member_injury_chance", self.member_injury_chance),
            (
                "objective_failure_abort_chance",
                self.objective_failure_abort_chance,
            ),
        ];
        for (name, value) in chances {
            if !(0.0..=1.0).contains(&value) {
                return Err(GarrisonError::InvalidConfig(format!(
                    "{} ({}) must be within 0.0..=1.0",
                    name, value
                )));
            }
        }

        if self.injury_damage_min > self.injury_damage_max {
            return Err(GarrisonError::InvalidConfig(format!(
                "injury_damage_min ({}) exceeds injury_damage_max ({})",
                self.injury_damage_min, self.injury_damage_max
            )));
        }
        if self.casualty_damage_min > self.casualty_damage_max {
            return Err(GarrisonError::InvalidConfig(format!(
                "casualty_damage_min ({}) exceeds casualty_damage_max ({})",
                self.casualty_damage_min, self.casualty_damage_max
            )));
        }

        if self.default_formation_spacing < 0.0 {
            return Err(GarrisonError::InvalidConfig(
                "default_formation_spacing must not be negative".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.flavor_event_chance, FLAVOR_EVENT_CHANCE);
        assert_eq!(config.equipment.len(), 9);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = SimulationConfig::from_toml_str(
            r#"
            seed = 7
            member_injury_chance = 0.5
            "#,
        )
        .unwrap();

        assert_eq!(config.seed, Some(7));
        assert_eq!(config.member_injury_chance, 0.5);
        assert_eq!(config.injury_check_chance, INJURY_CHECK_CHANCE);
        assert_eq!(config.default_formation_spacing, DEFAULT_FORMATION_SPACING);
        assert!(!config.equipment.is_empty());
    }

    #[test]
    fn test_toml_equipment_overrides_catalog() {
        let config = SimulationConfig::from_toml_str(
            r#"
            [[equipment]]
            name = "Flare"
            weight = 0.3
            effectiveness = 2
            "#,
        )
        .unwrap();

        assert_eq!(config.equipment.len(), 1);
        assert_eq!(config.equipment[0].name, "Flare");
    }

    #[test]
    fn test_invalid_chance_rejected() {
        let result = SimulationConfig::from_toml_str("flavor_event_chance = 1.5");
        assert!(matches!(result, Err(GarrisonError::InvalidConfig(_))));
    }

    #[test]
    fn test_inverted_damage_range_rejected() {
        let result = SimulationConfig::from_toml_str(
            r#"
            injury_damage_min = 30
            injury_damage_max = 10
            "#,
        );
        assert!(matches!(result, Err(GarrisonError::InvalidConfig(_))));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let result = SimulationConfig::from_toml_str("seed = ");
        assert!(matches!(result, Err(GarrisonError::TomlError(_))));
    }
}
