//! Idle/demo steering
//!
//! Greedy: among the moves that do not die next tick, take the one that
//! ends closest to the bonus food (if live) or the food.

use super::collision::{WallOutcome, resolve_walls};
use super::grid::{Direction, Position};
use super::state::GameState;

/// Turn to request this tick, if any
pub fn autopilot_turn(state: &GameState) -> Option<Direction> {
    let grid = state.tuning.grid();
    let tier = state.wall_tier();
    let target = state.bonus.as_ref().map_or(state.food, |b| b.pos);
    let current = state.direction;

    let candidates = [current]
        .into_iter()
        .chain(Direction::ALL.into_iter().filter(|d| d.is_perpendicular(current)));

    let best = candidates
        .filter_map(|dir| {
            let next = state.head() + dir.delta(grid.cell);
            match resolve_walls(next, &grid, tier) {
                WallOutcome::Clear(pos) if is_survivable(state, pos) => Some((dir, pos)),
                _ => None,
            }
        })
        .min_by_key(|&(dir, pos)| (manhattan(pos, target), dir != current))
        .map(|(dir, _)| dir)?;

    (best != current).then_some(best)
}

fn is_survivable(state: &GameState, pos: Position) -> bool {
    // The tail moves out of the way unless the snake is about to grow
    let body_len = if pos == state.food {
        state.snake.len()
    } else {
        state.snake.len().saturating_sub(1)
    };
    !state.obstacles.contains(&pos) && !state.snake.iter().take(body_len).any(|&s| s == pos)
}

fn manhattan(a: Position, b: Position) -> i32 {
    let d = (a - b).abs();
    d.x + d.y
}
