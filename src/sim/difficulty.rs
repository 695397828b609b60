//! Difficulty curve: score -> level, level -> speed / obstacles / lethal walls

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// A board edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Wall {
    Top,
    Bottom,
    Left,
    Right,
}

impl Wall {
    /// Lowest danger tier at which this wall kills
    pub fn required_tier(self) -> u8 {
        match self {
            Wall::Top => 1,
            Wall::Bottom => 2,
            Wall::Left => 3,
            Wall::Right => 4,
        }
    }
}

/// How many walls are lethal (0 = all wrap, 4 = none wrap)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct WallTier(pub u8);

impl WallTier {
    pub const MAX: WallTier = WallTier(4);

    pub fn is_lethal(self, wall: Wall) -> bool {
        self.0 >= wall.required_tier()
    }
}

/// Wall danger for a level: safe below 3, one more wall every two levels,
/// every wall from level 9
pub fn wall_danger_tier(level: u32) -> WallTier {
    match level {
        0..3 => WallTier(0),
        3..5 => WallTier(1),
        5..7 => WallTier(2),
        7..9 => WallTier(3),
        _ => WallTier::MAX,
    }
}

pub fn obstacle_count_for_level(tuning: &Tuning, level: u32) -> usize {
    tuning.base_obstacles + level as usize
}

/// Level-driven tick threshold in frames (lower is faster)
pub fn speed_for_level(tuning: &Tuning, level: u32) -> f32 {
    let steps = level.saturating_sub(1) as f32;
    (tuning.base_speed - steps * tuning.level_speed_step).max(tuning.min_level_speed)
}

/// Tick threshold while bonus food is live
pub fn bonus_speed(tuning: &Tuning, speed: f32) -> f32 {
    (speed - tuning.bonus_speed_boost).max(tuning.min_bonus_speed)
}

/// Highest level whose threshold the score meets
pub fn level_for_score(tuning: &Tuning, score: u32) -> u32 {
    (1..=tuning.max_level())
        .rev()
        .find(|&level| {
            tuning
                .level_thresholds
                .get(level as usize)
                .is_some_and(|&threshold| score >= threshold)
        })
        .unwrap_or(1)
}
