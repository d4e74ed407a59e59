//! Soldier duty statuses

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::GarrisonError;

/// Duty status of a soldier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SoldierStatus {
    #[default]
    Active,
    Wounded,
    Unavailable,
    OnLeave,
    MissingInAction,
}

impl SoldierStatus {
    pub const ALL: [SoldierStatus; 5] = [
        SoldierStatus::Active,
        SoldierStatus::Wounded,
        SoldierStatus::Unavailable,
        SoldierStatus::OnLeave,
        SoldierStatus::MissingInAction,
    ];

    pub fn is_active(self) -> bool {
        self == SoldierStatus::Active
    }

    /// Parse free text; invalid values become `Active`
    pub fn parse_or_default(s: &str) -> SoldierStatus {
        s.parse().unwrap_or_default()
    }
}

impl fmt::Display for SoldierStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SoldierStatus::Active => "Active",
            SoldierStatus::Wounded => "Wounded",
            SoldierStatus::Unavailable => "Unavailable",
            SoldierStatus::OnLeave => "On Leave",
            SoldierStatus::MissingInAction => "Missing in Action",
        };
        f.write_str(name)
    }
}

impl FromStr for SoldierStatus {
    type Err = GarrisonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect();
        match normalized.as_str() {
            "active" => Ok(SoldierStatus::Active),
            "wounded" => Ok(SoldierStatus::Wounded),
            "unavailable" => Ok(SoldierStatus::Unavailable),
            "onleave" | "leave" => Ok(SoldierStatus::OnLeave),
            "missinginaction" | "mia" | "missing" => Ok(SoldierStatus::MissingInAction),
            _ => Err(GarrisonError::InvalidStatus(s.trim().to_string())),
        }
    }
}
