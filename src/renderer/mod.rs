//! Rendering collaborator interface
//!
//! The simulation hands a `Frame` snapshot to whatever draws it. The web
//! host draws on a canvas from the JSON form; the native binary uses the
//! text renderer.

pub mod ascii;

pub use ascii::AsciiRenderer;

use serde::Serialize;

use crate::sim::{BonusTier, GamePhase, GameState, Position};

/// Bonus food as the HUD needs it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BonusView {
    pub pos: Position,
    pub tier: BonusTier,
    pub color: &'static str,
    pub points: u32,
    pub remaining_ms: u64,
    /// Countdown bar width (1.0 = full)
    pub remaining_fraction: f32,
    /// Whole seconds left, rounded up
    pub remaining_secs: u64,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub board_width: i32,
    pub board_height: i32,
    pub cell_size: i32,
    /// Head first
    pub snake: Vec<Position>,
    pub food: Position,
    pub obstacles: Vec<Position>,
    pub bonus: Option<BonusView>,
    /// Number of lethal walls (top, bottom, left, right in that order)
    pub wall_tier: u8,
    pub score: u32,
    pub level: u32,
    pub lives: u32,
    pub phase: GamePhase,
    pub player_name: String,
}

impl Frame {
    pub fn capture(state: &GameState, now_ms: u64) -> Self {
        let bonus = state.bonus.as_ref().map(|b| {
            // A paused countdown is shown as it was when paused
            let now = state.paused_at_ms.unwrap_or(now_ms);
            let remaining_ms = b.remaining_ms(now);
            BonusView {
                pos: b.pos,
                tier: b.tier,
                color: b.tier.color(),
                points: b.points(),
                remaining_ms,
                remaining_fraction: b.remaining_fraction(now),
                remaining_secs: remaining_ms.div_ceil(1000),
            }
        });

        Self {
            board_width: state.tuning.board_width,
            board_height: state.tuning.board_height,
            cell_size: state.tuning.cell_size,
            snake: state.snake.iter().copied().collect(),
            food: state.food,
            obstacles: state.obstacles.clone(),
            bonus,
            wall_tier: state.wall_tier().0,
            score: state.score,
            level: state.level,
            lives: state.lives,
            phase: state.phase,
            player_name: state.player_name.clone(),
        }
    }
}

/// Something that can draw frames
pub trait Renderer {
    fn draw(&mut self, frame: &Frame);
}
