//! Simulation constants - all tunable values in one place
//!
//! `SimulationConfig::default()` is built from these; a TOML config file can
//! override any of them at startup.

// Mission progress
pub const FLAVOR_EVENT_CHANCE: f64 = 0.3;
pub const INJURY_CHECK_CHANCE: f64 = 0.2;
pub const MEMBER_INJURY_CHANCE: f64 = 0.1;
pub const INJURY_DAMAGE_MIN: u32 = 5;
pub const INJURY_DAMAGE_MAX: u32 = 25;
pub const OBJECTIVE_FAILURE_ABORT_CHANCE: f64 = 0.3;

// Operator-triggered casualty event
pub const CASUALTY_DAMAGE_MIN: u32 = 10;
pub const CASUALTY_DAMAGE_MAX: u32 = 50;

// Success estimator
pub const SKILL_SCALE: f64 = 10.0;
pub const SKILL_CATEGORY_COUNT: usize = 4;

// Progression
pub const EXPERIENCE_PER_RANK: u32 = 100;
pub const EXPERIENCE_PER_DIFFICULTY: u32 = 10;
pub const MIN_DIFFICULTY: u8 = 1;
pub const MAX_DIFFICULTY: u8 = 10;

// Health
pub const MAX_HEALTH: u8 = 100;

// Movement
pub const DEFAULT_FORMATION_SPACING: f32 = 5.0;

// Reports
pub const RECENT_ENTITY_EVENTS: usize = 5;
pub const RECENT_GLOBAL_EVENTS: usize = 20;

/// Flavor events that may accompany a completed objective
pub const FLAVOR_EVENTS: [&str; 5] = [
    "encountered light resistance",
    "found valuable intelligence",
    "found an alternate route",
    "equipment malfunction",
    "weather deteriorated",
];

/// Operator-triggered random field events
pub const FIELD_EVENTS: [&str; 10] = [
    "encountered unexpected resistance",
    "found valuable intelligence",
    "equipment malfunction occurred",
    "weather deteriorated",
    "found an alternate route",
    "communications disrupted",
    "received resupply",
    "met friendly forces",
    "spotted an enemy patrol",
    "seized a key position",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probabilities_are_valid() {
        for p in [
            FLAVOR_EVENT_CHANCE,
            INJURY_CHECK_CHANCE,
            MEMBER_INJURY_CHANCE,
            OBJECTIVE_FAILURE_ABORT_CHANCE,
        ] {
            assert!((0.0..=1.0).contains(&p));
        }
    }

    #[test]
    fn test_damage_ranges_ordered() {
        assert!(INJURY_DAMAGE_MIN <= INJURY_DAMAGE_MAX);
        assert!(CASUALTY_DAMAGE_MIN <= CASUALTY_DAMAGE_MAX);
        assert!(INJURY_DAMAGE_MAX < MAX_HEALTH as u32);
    }
}
