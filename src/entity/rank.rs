//! Military ranks and promotion thresholds

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::GarrisonError;
use crate::simulation::constants::EXPERIENCE_PER_RANK;

/// Ordered rank ladder. Ranks only ever move up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rank {
    #[default]
    Recruit = 0,
    Corporal = 1,
    Sergeant = 2,
    Lieutenant = 3,
    Captain = 4,
    Major = 5,
}

impl Rank {
    pub const ALL: [Rank; 6] = [
        Rank::Recruit,
        Rank::Corporal,
        Rank::Sergeant,
        Rank::Lieutenant,
        Rank::Captain,
        Rank::Major,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// The rank above this one, if any
    pub fn next(self) -> Option<Rank> {
        Self::ALL.get(self.index() + 1).copied()
    }

    pub fn is_top(self) -> bool {
        self.next().is_none()
    }

    /// Experience needed to leave this rank
    pub fn promotion_threshold(self) -> u32 {
        EXPERIENCE_PER_RANK * (self.index() as u32 + 1)
    }

    /// Parse free text, falling back to Recruit for anything unrecognised
    pub fn parse_or_default(s: &str) -> Rank {
        s.parse().unwrap_or_default()
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rank::Recruit => "Recruit",
            Rank::Corporal => "Corporal",
            Rank::Sergeant => "Sergeant",
            Rank::Lieutenant => "Lieutenant",
            Rank::Captain => "Captain",
            Rank::Major => "Major",
        };
        f.write_str(name)
    }
}

impl FromStr for Rank {
    type Err = GarrisonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "recruit" | "private" => Ok(Rank::Recruit),
            "corporal" => Ok(Rank::Corporal),
            "sergeant" => Ok(Rank::Sergeant),
            "lieutenant" => Ok(Rank::Lieutenant),
            "captain" => Ok(Rank::Captain),
            "major" => Ok(Rank::Major),
            other => Err(GarrisonError::InvalidInput(format!("unknown rank '{}'", other))),
        }
    }
}
