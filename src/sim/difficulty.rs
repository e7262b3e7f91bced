//! Difficulty tiers
//!
//! Each tier fixes the gap height and base obstacle speed for a run. Tiers are
//! ordered: gaps shrink and speed grows as the id increases.

use serde::Serialize;

use crate::consts::SPEED_SCORE_FACTOR;

/// A named difficulty tier (immutable for the duration of a run)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DifficultyProfile {
    pub id: u8,
    pub name: &'static str,
    /// Vertical opening between top and bottom obstacle segments
    pub gap_height: f32,
    /// Obstacle speed at score 0 (pixels per frame)
    pub base_speed: f32,
}

/// Tier selected when nothing else has been chosen
pub const DEFAULT_DIFFICULTY_ID: u8 = 1;

/// All tiers, easiest first
pub const PROFILES: [DifficultyProfile; 6] = [
    DifficultyProfile { id: 1, name: "Lvl 01", gap_height: 250.0, base_speed: 3.0 },
    DifficultyProfile { id: 2, name: "Lvl 02", gap_height: 220.0, base_speed: 4.0 },
    DifficultyProfile { id: 3, name: "Lvl 03", gap_height: 190.0, base_speed: 5.0 },
    DifficultyProfile { id: 4, name: "Lvl 04", gap_height: 170.0, base_speed: 6.0 },
    DifficultyProfile { id: 5, name: "Lvl 05", gap_height: 150.0, base_speed: 7.0 },
    DifficultyProfile { id: 6, name: "MAX", gap_height: 130.0, base_speed: 9.0 },
];

impl Default for DifficultyProfile {
    fn default() -> Self {
        PROFILES[0]
    }
}

impl DifficultyProfile {
    /// Look up a tier by id
    pub fn by_id(id: u8) -> Option<Self> {
        PROFILES.iter().copied().find(|p| p.id == id)
    }

    /// Obstacle speed for a given score
    #[inline]
    pub fn live_speed(&self, score: u32) -> f32 {
        self.base_speed + score as f32 * SPEED_SCORE_FACTOR
    }
}
