//! Snake Arcade - a grid snake game with levels, lethal walls and bonus food
//!
//! Core modules:
//! - `sim`: Tick simulation (movement, collisions, scoring, bonus food)
//! - `game`: Frame scheduler and session driver
//! - `renderer`: Rendering collaborator interface and a text renderer
//! - `platform`: Clocks and input mapping
//! - `persistence`: Key/value storage backends
//! - `tuning`: Data-driven game balance

pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use game::{FrameOutcome, FrameScheduler, Game};
pub use highscores::{Badges, HighScoreEntry, HighScores};
pub use settings::{Settings, resolve_player_name};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Board dimensions in pixels
    pub const BOARD_WIDTH: i32 = 600;
    pub const BOARD_HEIGHT: i32 = 600;
    /// Size of one grid cell in pixels
    pub const CELL_SIZE: i32 = 20;

    /// Where the snake (re)spawns
    pub const START_X: i32 = 160;
    pub const START_Y: i32 = 160;

    pub const START_LIVES: u32 = 4;

    /// Frames per tick at level 1 (higher is slower)
    pub const BASE_SPEED: f32 = 16.0;
    /// Frames shaved off per level
    pub const LEVEL_SPEED_STEP: f32 = 1.5;
    /// Fastest level-driven speed
    pub const MIN_LEVEL_SPEED: f32 = 3.0;
    /// Bonus food speeds the game up by this many frames
    pub const BONUS_SPEED_BOOST: f32 = 7.0;
    /// Fastest speed while bonus food is live
    pub const MIN_BONUS_SPEED: f32 = 2.0;

    /// Score needed for each level, indexed by level (index 0 unused)
    pub const LEVEL_THRESHOLDS: [u32; 11] = [0, 3, 7, 12, 18, 25, 33, 42, 52, 63, 75];
    pub const MAX_LEVEL: u32 = 10;

    /// Obstacles at level L = BASE_OBSTACLES + L
    pub const BASE_OBSTACLES: usize = 2;

    /// Minimum gap between two bonus foods (3 minutes)
    pub const BONUS_COOLDOWN_MS: u64 = 180_000;
    /// Spawn chance per tick = max(MIN, BASE - PER_LEVEL * level)
    pub const BONUS_BASE_CHANCE: f64 = 0.18;
    pub const BONUS_CHANCE_PER_LEVEL: f64 = 0.012;
    pub const BONUS_MIN_CHANCE: f64 = 0.03;
    /// Bonus food stays visible this many times its base duration
    pub const BONUS_DURATION_MULTIPLIER: u64 = 4;
    /// Random adjacent cells tried before falling back to a random safe cell
    pub const BONUS_PLACEMENT_ATTEMPTS: u32 = 10;

    pub const DEFAULT_PLAYER_NAME: &str = "Agent";
}
