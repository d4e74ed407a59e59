pub mod constants;
pub mod engine;
pub mod incidents;
pub mod probability;
pub mod progress;

pub use engine::Simulator;
pub use incidents::{inflict_casualty, random_field_event, Casualty};
pub use probability::{estimate_success, refresh_success_rate, Readiness};
pub use progress::{auto_complete, simulate_mission_progress, Injury, ProgressOutcome};
