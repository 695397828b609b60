//! Collision detection on the grid
//!
//! Walls are resolved first: each crossed edge either wraps the head to the
//! opposite side or kills, depending on the current wall tier. Body and
//! obstacle hits are checked after the snake has moved.

use std::collections::VecDeque;

use super::difficulty::{Wall, WallTier};
use super::grid::{Grid, Position};
use super::state::DeathCause;

/// Result of moving the head across the board edges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallOutcome {
    /// Head is on the board (possibly wrapped)
    Clear(Position),
    /// Head crossed a lethal wall
    Fatal(Wall),
}

/// Wrap or kill for every edge the prospective head has crossed
///
/// Edges are judged independently, so a corner crossing can wrap on one
/// axis and still be fatal on the other.
pub fn resolve_walls(head: Position, grid: &Grid, tier: WallTier) -> WallOutcome {
    let mut pos = head;
    let mut fatal = None;

    if pos.y < 0 {
        if tier.is_lethal(Wall::Top) {
            fatal = fatal.or(Some(Wall::Top));
        } else {
            pos.y = grid.height - grid.cell;
        }
    }
    if pos.y >= grid.height {
        if tier.is_lethal(Wall::Bottom) {
            fatal = fatal.or(Some(Wall::Bottom));
        } else {
            pos.y = 0;
        }
    }
    if pos.x < 0 {
        if tier.is_lethal(Wall::Left) {
            fatal = fatal.or(Some(Wall::Left));
        } else {
            pos.x = grid.width - grid.cell;
        }
    }
    if pos.x >= grid.width {
        if tier.is_lethal(Wall::Right) {
            fatal = fatal.or(Some(Wall::Right));
        } else {
            pos.x = 0;
        }
    }

    match fatal {
        Some(wall) => WallOutcome::Fatal(wall),
        None => WallOutcome::Clear(pos),
    }
}

/// Head against the rest of the body, then against obstacles
pub fn body_or_obstacle_hit(snake: &VecDeque<Position>, obstacles: &[Position]) -> Option<DeathCause> {
    let head = *snake.front()?;
    if snake.iter().skip(1).any(|&segment| segment == head) {
        Some(DeathCause::SelfBite)
    } else if obstacles.contains(&head) {
        Some(DeathCause::Obstacle)
    } else {
        None
    }
}
