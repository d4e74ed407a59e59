use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// A single sub-goal of a mission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Objective {
    pub description: String,
    pub completed: bool,
    pub added_at: DateTime<Local>,
    pub completed_at: Option<DateTime<Local>>,
}

impl Objective {
    pub fn new(description: &str) -> Self {
        Self {
            description: description.to_string(),
            completed: false,
            added_at: Local::now(),
            completed_at: None,
        }
    }

    /// Mark complete; returns false if it already was
    pub fn complete(&mut self) -> bool {
        if self.completed {
            return false;
        }
        self.completed = true;
        self.completed_at = Some(Local::now());
        true
    }

    /// Check mark used in reports
    pub fn mark(&self) -> &'static str {
        if self.completed {
            "✓"
        } else {
            "✗"
        }
    }
}
