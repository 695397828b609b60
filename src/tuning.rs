//! Data-driven game balance
//!
//! Every number the simulation uses lives here so tests and hosts can
//! shrink the board, shorten the bonus cooldown, and so on.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::grid::Grid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Board ===
    pub board_width: i32,
    pub board_height: i32,
    pub cell_size: i32,
    /// Respawn cell for the snake head (pixels, grid aligned)
    pub start: IVec2,

    // === Session ===
    pub start_lives: u32,

    // === Speed (frames per tick) ===
    pub base_speed: f32,
    pub level_speed_step: f32,
    pub min_level_speed: f32,
    pub bonus_speed_boost: f32,
    pub min_bonus_speed: f32,

    // === Levels ===
    /// Score threshold per level; the last index is the max level
    pub level_thresholds: Vec<u32>,
    pub base_obstacles: usize,

    // === Bonus food ===
    pub bonus_cooldown_ms: u64,
    pub bonus_base_chance: f64,
    pub bonus_chance_per_level: f64,
    pub bonus_min_chance: f64,
    pub bonus_duration_multiplier: u64,
    pub bonus_placement_attempts: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            board_width: BOARD_WIDTH,
            board_height: BOARD_HEIGHT,
            cell_size: CELL_SIZE,
            start: IVec2::new(START_X, START_Y),

            start_lives: START_LIVES,

            base_speed: BASE_SPEED,
            level_speed_step: LEVEL_SPEED_STEP,
            min_level_speed: MIN_LEVEL_SPEED,
            bonus_speed_boost: BONUS_SPEED_BOOST,
            min_bonus_speed: MIN_BONUS_SPEED,

            level_thresholds: LEVEL_THRESHOLDS.to_vec(),
            base_obstacles: BASE_OBSTACLES,

            bonus_cooldown_ms: BONUS_COOLDOWN_MS,
            bonus_base_chance: BONUS_BASE_CHANCE,
            bonus_chance_per_level: BONUS_CHANCE_PER_LEVEL,
            bonus_min_chance: BONUS_MIN_CHANCE,
            bonus_duration_multiplier: BONUS_DURATION_MULTIPLIER,
            bonus_placement_attempts: BONUS_PLACEMENT_ATTEMPTS,
        }
    }
}

impl Tuning {
    pub fn grid(&self) -> Grid {
        Grid::new(self.board_width, self.board_height, self.cell_size)
    }

    /// Highest reachable level
    pub fn max_level(&self) -> u32 {
        self.level_thresholds.len().saturating_sub(1).max(1) as u32
    }

    /// Score that wins the game once the max level is reached
    pub fn victory_score(&self) -> u32 {
        self.level_thresholds
            .get(self.max_level() as usize)
            .copied()
            .unwrap_or(u32::MAX)
    }
}
