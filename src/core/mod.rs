pub mod config;
pub mod error;
pub mod log;
pub mod types;

pub use config::SimulationConfig;
pub use error::{GarrisonError, Result};
pub use log::{EventLog, LogEntry};
