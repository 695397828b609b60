//! Game state and core simulation types
//!
//! One `GameState` per session, owned by the driver and threaded through
//! every tick. Nothing here touches a clock directly; callers pass in the
//! current monotonic time in milliseconds.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bonus::{BonusFood, BonusTier};
use super::difficulty::{WallTier, obstacle_count_for_level, speed_for_level, wall_danger_tier};
use super::grid::{Direction, Position};
use crate::highscores::HighScoreEntry;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Paused by the player; ticks are ignored and real time is frozen
    Paused,
    /// A life was lost; the snake has respawned and waits for acknowledgement
    LifeLost,
    /// All lives lost; the session was recorded and reset
    GameOver,
    /// Final level completed; the session was recorded and reset
    Victory,
}

impl GamePhase {
    /// Phases that wait for the player to acknowledge a message
    pub fn awaits_acknowledge(self) -> bool {
        matches!(
            self,
            GamePhase::LifeLost | GamePhase::GameOver | GamePhase::Victory
        )
    }
}

/// What killed the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    Wall,
    SelfBite,
    Obstacle,
}

/// Things that happened during a tick, for presentation and persistence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    FoodEaten { score: u32 },
    LevelUp { level: u32 },
    BonusSpawned { tier: BonusTier, pos: Position },
    BonusExpired { tier: BonusTier },
    BonusEaten { tier: BonusTier, points: u32, score: u32 },
    LifeLost { lives: u32, cause: DeathCause },
    GameOver { entry: HighScoreEntry },
    Victory { entry: HighScoreEntry },
    Paused,
    Resumed,
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: Tuning,
    /// Player identity, fixed for the session
    pub player_name: String,
    pub seed: u64,
    pub(crate) rng: Pcg32,
    /// Head at the front
    pub snake: VecDeque<Position>,
    /// Direction of the last executed move
    pub direction: Direction,
    /// Direction the next move will use
    pub pending_direction: Direction,
    pub food: Position,
    pub obstacles: Vec<Position>,
    pub bonus: Option<BonusFood>,
    pub score: u32,
    pub level: u32,
    pub lives: u32,
    /// Frames per tick (lower is faster)
    pub speed: f32,
    pub phase: GamePhase,
    /// When the last bonus food ended (or the session started)
    pub last_bonus_end_ms: u64,
    pub(crate) paused_at_ms: Option<u64>,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Create a fresh session
    pub fn new(seed: u64, player_name: impl Into<String>, tuning: Tuning, now_ms: u64) -> Self {
        let mut state = Self {
            player_name: player_name.into(),
            seed,
            rng: Pcg32::seed_from_u64(seed),
            snake: VecDeque::from([tuning.start]),
            direction: Direction::Right,
            pending_direction: Direction::Right,
            food: tuning.start,
            obstacles: Vec::new(),
            bonus: None,
            score: 0,
            level: 1,
            lives: tuning.start_lives,
            speed: speed_for_level(&tuning, 1),
            phase: GamePhase::Playing,
            last_bonus_end_ms: now_ms,
            paused_at_ms: None,
            time_ticks: 0,
            tuning,
        };
        state.reset();
        state
    }

    /// Full game reset (keeps player identity, RNG stream and bonus cooldown)
    pub fn reset(&mut self) {
        self.respawn_snake();
        self.score = 0;
        self.level = 1;
        self.lives = self.tuning.start_lives;
        self.speed = speed_for_level(&self.tuning, 1);
        self.bonus = None;
        self.paused_at_ms = None;

        self.obstacles.clear();
        self.food = self.safe_random_position();
        let count = obstacle_count_for_level(&self.tuning, self.level);
        while self.obstacles.len() < count {
            let pos = self.safe_random_position();
            self.obstacles.push(pos);
        }
        log::debug!(
            "Session reset for {} ({} obstacles)",
            self.player_name,
            self.obstacles.len()
        );
    }

    /// Put the snake back to a single segment at the start cell
    pub fn respawn_snake(&mut self) {
        self.snake.clear();
        self.snake.push_back(self.tuning.start);
        self.direction = Direction::Right;
        self.pending_direction = Direction::Right;
    }

    pub fn head(&self) -> Position {
        self.snake.front().copied().unwrap_or(self.tuning.start)
    }

    pub fn wall_tier(&self) -> WallTier {
        wall_danger_tier(self.level)
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    /// True once the final level is reached with the winning score
    pub fn is_victory(&self) -> bool {
        self.level == self.tuning.max_level() && self.score >= self.tuning.victory_score()
    }

    /// Cell holds snake, obstacle, food or bonus food
    pub fn is_occupied(&self, pos: Position) -> bool {
        self.snake.contains(&pos)
            || self.obstacles.contains(&pos)
            || self.food == pos
            || self.bonus.as_ref().is_some_and(|b| b.pos == pos)
    }

    /// Random cell free of snake, obstacles, food and bonus food
    ///
    /// Rejection sampling first, then a scan of the board. A completely
    /// full board cannot happen in practice; it returns an occupied cell.
    pub fn safe_random_position(&mut self) -> Position {
        let grid = self.tuning.grid();
        for _ in 0..grid.cell_count() * 4 {
            let pos = grid.random_cell(&mut self.rng);
            if !self.is_occupied(pos) {
                return pos;
            }
        }
        let free = grid.cells().find(|&pos| !self.is_occupied(pos));
        match free {
            Some(pos) => pos,
            None => {
                log::warn!("No free cell left on the board");
                grid.random_cell(&mut self.rng)
            }
        }
    }

    /// Queue a turn. Only turns across the current axis of travel are
    /// accepted, and nothing is accepted outside active play.
    pub fn request_turn(&mut self, dir: Direction) -> bool {
        if self.phase != GamePhase::Playing || !self.direction.is_perpendicular(dir) {
            return false;
        }
        self.pending_direction = dir;
        true
    }

    /// Pause active play, freezing the bonus countdown
    pub fn pause(&mut self, now_ms: u64) -> Option<GameEvent> {
        if self.phase != GamePhase::Playing {
            return None;
        }
        self.phase = GamePhase::Paused;
        self.paused_at_ms = Some(now_ms);
        log::info!("Paused");
        Some(GameEvent::Paused)
    }

    /// Resume from pause, shifting every real-time deadline by the pause span
    pub fn resume(&mut self, now_ms: u64) -> Option<GameEvent> {
        if self.phase != GamePhase::Paused {
            return None;
        }
        let span = self
            .paused_at_ms
            .take()
            .map(|at| now_ms.saturating_sub(at))
            .unwrap_or(0);
        if let Some(bonus) = self.bonus.as_mut() {
            bonus.expires_at_ms += span;
        }
        self.last_bonus_end_ms += span;
        self.phase = GamePhase::Playing;
        log::info!("Resumed after {} ms", span);
        Some(GameEvent::Resumed)
    }

    pub fn toggle_pause(&mut self, now_ms: u64) -> Option<GameEvent> {
        match self.phase {
            GamePhase::Paused => self.resume(now_ms),
            _ => self.pause(now_ms),
        }
    }

    /// Dismiss a life-lost / game-over / victory message and continue
    pub fn acknowledge(&mut self) -> bool {
        if !self.phase.awaits_acknowledge() {
            return false;
        }
        self.phase = GamePhase::Playing;
        true
    }

    /// Leaderboard record for the current session
    pub fn entry(&self, lives: u32) -> HighScoreEntry {
        HighScoreEntry {
            player_name: self.player_name.clone(),
            score: self.score,
            level: self.level,
            lives,
        }
    }
}
