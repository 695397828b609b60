//! Grid simulation module
//!
//! All gameplay logic lives here:
//! - One move per tick, driven by the frame scheduler
//! - Seeded RNG only
//! - Time comes in as a monotonic millisecond reading, never read here
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod bonus;
pub mod collision;
pub mod difficulty;
pub mod grid;
pub mod state;
pub mod tick;

pub use autopilot::autopilot_turn;
pub use bonus::{BonusFood, BonusTier};
pub use collision::{WallOutcome, body_or_obstacle_hit, resolve_walls};
pub use difficulty::{
    Wall, WallTier, bonus_speed, level_for_score, obstacle_count_for_level, speed_for_level,
    wall_danger_tier,
};
pub use grid::{Direction, Grid, Position};
pub use state::{DeathCause, GameEvent, GamePhase, GameState};
pub use tick::{tick, update_level};
