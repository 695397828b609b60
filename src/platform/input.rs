//! Input mapping
//!
//! Raw key names (as reported by `KeyboardEvent.key`) and on-screen button
//! ids become `InputCommand`s. Whether a turn is legal is decided by the
//! game state, not here.

use serde::{Deserialize, Serialize};

use crate::sim::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputCommand {
    Turn(Direction),
    TogglePause,
    Pause,
    Resume,
    /// Dismiss a life-lost / game-over / victory message
    Acknowledge,
}

/// Map a key name; `wasd` enables the letter keys
pub fn map_key(key: &str, wasd: bool) -> Option<InputCommand> {
    let command = match key {
        "ArrowUp" => InputCommand::Turn(Direction::Up),
        "ArrowDown" => InputCommand::Turn(Direction::Down),
        "ArrowLeft" => InputCommand::Turn(Direction::Left),
        "ArrowRight" => InputCommand::Turn(Direction::Right),
        "w" | "W" if wasd => InputCommand::Turn(Direction::Up),
        "s" | "S" if wasd => InputCommand::Turn(Direction::Down),
        "a" | "A" if wasd => InputCommand::Turn(Direction::Left),
        "d" | "D" if wasd => InputCommand::Turn(Direction::Right),
        " " | "p" | "P" | "Escape" => InputCommand::TogglePause,
        "Enter" => InputCommand::Acknowledge,
        _ => return None,
    };
    Some(command)
}

/// Map an on-screen button id
pub fn map_button(id: &str) -> Option<InputCommand> {
    let command = match id {
        "up" | "btn-up" => InputCommand::Turn(Direction::Up),
        "down" | "btn-down" => InputCommand::Turn(Direction::Down),
        "left" | "btn-left" => InputCommand::Turn(Direction::Left),
        "right" | "btn-right" => InputCommand::Turn(Direction::Right),
        "pause" | "btn-pause" => InputCommand::Pause,
        "continue" | "btn-continue" => InputCommand::Resume,
        "ok" | "btn-ok" => InputCommand::Acknowledge,
        _ => return None,
    };
    Some(command)
}
