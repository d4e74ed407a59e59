//! Mission lifecycle statuses and reward kinds

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::GarrisonError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MissionStatus {
    #[default]
    Pending,
    Active,
    Completed,
    Failed,
    Aborted,
}

impl MissionStatus {
    pub const ALL: [MissionStatus; 5] = [
        MissionStatus::Pending,
        MissionStatus::Active,
        MissionStatus::Completed,
        MissionStatus::Failed,
        MissionStatus::Aborted,
    ];

    /// Completed, Failed and Aborted accept no further progress
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            MissionStatus::Completed | MissionStatus::Failed | MissionStatus::Aborted
        )
    }
}

impl fmt::Display for MissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MissionStatus::Pending => "Pending",
            MissionStatus::Active => "Active",
            MissionStatus::Completed => "Completed",
            MissionStatus::Failed => "Failed",
            MissionStatus::Aborted => "Aborted",
        };
        f.write_str(name)
    }
}

impl FromStr for MissionStatus {
    type Err = GarrisonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(MissionStatus::Pending),
            "active" => Ok(MissionStatus::Active),
            "completed" | "complete" => Ok(MissionStatus::Completed),
            "failed" => Ok(MissionStatus::Failed),
            "aborted" => Ok(MissionStatus::Aborted),
            _ => Err(GarrisonError::InvalidStatus(s.trim().to_string())),
        }
    }
}

/// Kinds of mission reward
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RewardKind {
    /// Experience points granted to every assigned soldier on completion
    Experience,
    Commendation,
    Supplies,
}

impl fmt::Display for RewardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RewardKind::Experience => "Experience",
            RewardKind::Commendation => "Commendation",
            RewardKind::Supplies => "Supplies",
        };
        f.write_str(name)
    }
}

impl FromStr for RewardKind {
    type Err = GarrisonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "experience" | "xp" => Ok(RewardKind::Experience),
            "commendation" => Ok(RewardKind::Commendation),
            "supplies" => Ok(RewardKind::Supplies),
            _ => Err(GarrisonError::InvalidReward(s.trim().to_string())),
        }
    }
}
