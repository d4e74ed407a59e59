//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a soldier (index into the registry arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SoldierId(pub u32);

impl SoldierId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Stable identifier of a team
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TeamId(pub u32);

impl TeamId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Stable identifier of a mission
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MissionId(pub u32);

impl MissionId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// 2D position on the operations map
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec2_distance() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(3.0, 4.0);
        assert!((a.distance(&b) - 5.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_vec2_display_drops_trailing_zeroes() {
        assert_eq!(Vec2::new(10.0, -5.0).to_string(), "(10, -5)");
        assert_eq!(Vec2::new(1.5, 2.0).to_string(), "(1.5, 2)");
    }

    #[test]
    fn test_id_index() {
        assert_eq!(SoldierId(3).index(), 3);
        assert_eq!(TeamId(0).index(), 0);
        assert_eq!(MissionId(7).index(), 7);
    }
}
