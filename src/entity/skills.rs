//! Soldier skill categories

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::GarrisonError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillCategory {
    Combat,
    Medical,
    Recon,
    Leadership,
}

impl SkillCategory {
    pub const ALL: [SkillCategory; 4] = [
        SkillCategory::Combat,
        SkillCategory::Medical,
        SkillCategory::Recon,
        SkillCategory::Leadership,
    ];
}

impl fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SkillCategory::Combat => "Combat",
            SkillCategory::Medical => "Medical",
            SkillCategory::Recon => "Recon",
            SkillCategory::Leadership => "Leadership",
        };
        f.write_str(name)
    }
}

impl FromStr for SkillCategory {
    type Err = GarrisonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "combat" => Ok(SkillCategory::Combat),
            "medical" => Ok(SkillCategory::Medical),
            "recon" | "reconnaissance" => Ok(SkillCategory::Recon),
            "leadership" => Ok(SkillCategory::Leadership),
            _ => Err(GarrisonError::InvalidSkill(s.trim().to_string())),
        }
    }
}

/// Skill levels for the four fixed categories
///
/// Levels start at 1 and only grow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillSet {
    pub combat: u32,
    pub medical: u32,
    pub recon: u32,
    pub leadership: u32,
}

impl Default for SkillSet {
    fn default() -> Self {
        Self {
            combat: 1,
            medical: 1,
            recon: 1,
            leadership: 1,
        }
    }
}

impl SkillSet {
    /// All categories at zero; used as an accumulator for team totals
    pub fn zero() -> Self {
        Self {
            combat: 0,
            medical: 0,
            recon: 0,
            leadership: 0,
        }
    }

    pub fn get(&self, category: SkillCategory) -> u32 {
        match category {
            SkillCategory::Combat => self.combat,
            SkillCategory::Medical => self.medical,
            SkillCategory::Recon => self.recon,
            SkillCategory::Leadership => self.leadership,
        }
    }

    fn slot_mut(&mut self, category: SkillCategory) -> &mut u32 {
        match category {
            SkillCategory::Combat => &mut self.combat,
            SkillCategory::Medical => &mut self.medical,
            SkillCategory::Recon => &mut self.recon,
            SkillCategory::Leadership => &mut self.leadership,
        }
    }

    pub fn improve(&mut self, category: SkillCategory, amount: u32) {
        let slot = self.slot_mut(category);
        *slot = slot.saturating_add(amount);
    }

    /// Add another set category by category
    pub fn accumulate(&mut self, other: &SkillSet) {
        for category in SkillCategory::ALL {
            self.improve(category, other.get(category));
        }
    }

    pub fn total(&self) -> u64 {
        [self.combat, self.medical, self.recon, self.leadership]
            .iter()
            .map(|&level| u64::from(level))
            .sum()
    }
}
