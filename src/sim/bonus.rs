//! Timed bonus food
//!
//! Dormant until the cooldown has passed, then rolled once per tick. A live
//! bonus speeds the game up until it is eaten or its real-time deadline
//! passes; either way the cooldown starts over.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::difficulty::{bonus_speed, speed_for_level};
use super::grid::{Direction, Position};
use super::state::{GameEvent, GameState};
use crate::tuning::Tuning;

/// Bonus food varieties, cheapest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BonusTier {
    Blue,
    Violet,
    Orange,
    White,
}

impl BonusTier {
    pub const ALL: [BonusTier; 4] = [
        BonusTier::Blue,
        BonusTier::Violet,
        BonusTier::Orange,
        BonusTier::White,
    ];

    pub fn points(self) -> u32 {
        match self {
            BonusTier::Blue => 5,
            BonusTier::Violet => 10,
            BonusTier::Orange => 15,
            BonusTier::White => 25,
        }
    }

    /// Base duration before the visibility multiplier
    pub fn base_duration_ms(self) -> u64 {
        match self {
            BonusTier::Blue => 2000,
            BonusTier::Violet => 1800,
            BonusTier::Orange => 1500,
            BonusTier::White => 1200,
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            BonusTier::Blue => "blue",
            BonusTier::Violet => "violet",
            BonusTier::Orange => "orange",
            BonusTier::White => "white",
        }
    }

    /// Draw weights per tier; higher levels favour the cheap ones
    pub fn weights(level: u32) -> [f64; 4] {
        match level {
            0..=5 => [0.6, 0.25, 0.10, 0.05],
            6..=8 => [0.7, 0.18, 0.08, 0.04],
            _ => [0.8, 0.13, 0.05, 0.02],
        }
    }

    /// Weighted random tier for a level
    pub fn roll<R: Rng + ?Sized>(rng: &mut R, level: u32) -> BonusTier {
        let r: f64 = rng.random();
        let mut sum = 0.0;
        for (tier, weight) in Self::ALL.into_iter().zip(Self::weights(level)) {
            sum += weight;
            if r < sum {
                return tier;
            }
        }
        BonusTier::Blue
    }
}

/// A live bonus food
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusFood {
    pub pos: Position,
    pub tier: BonusTier,
    /// Monotonic deadline (shifted forward on resume)
    pub expires_at_ms: u64,
    /// Total visible time, for progress bars
    pub visible_ms: u64,
    /// Tick speed before the bonus sped things up
    pub prev_speed: f32,
}

impl BonusFood {
    pub fn new(
        tier: BonusTier,
        pos: Position,
        now_ms: u64,
        duration_multiplier: u64,
        prev_speed: f32,
    ) -> Self {
        let visible_ms = tier.base_duration_ms() * duration_multiplier;
        Self {
            pos,
            tier,
            expires_at_ms: now_ms + visible_ms,
            visible_ms,
            prev_speed,
        }
    }

    pub fn points(&self) -> u32 {
        self.tier.points()
    }

    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        self.expires_at_ms.saturating_sub(now_ms)
    }

    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms >= self.expires_at_ms
    }

    /// Fraction of visible time left (1.0 = just spawned)
    pub fn remaining_fraction(&self, now_ms: u64) -> f32 {
        if self.visible_ms == 0 {
            return 0.0;
        }
        self.remaining_ms(now_ms) as f32 / self.visible_ms as f32
    }
}

/// Per-tick spawn chance, falling with level down to a floor
pub fn spawn_chance(tuning: &Tuning, level: u32) -> f64 {
    (tuning.bonus_base_chance - level as f64 * tuning.bonus_chance_per_level)
        .max(tuning.bonus_min_chance)
}

/// Past the cooldown and nothing live
pub fn is_eligible(state: &GameState, now_ms: u64) -> bool {
    state.bonus.is_none()
        && now_ms.saturating_sub(state.last_bonus_end_ms) >= state.tuning.bonus_cooldown_ms
}

/// Cell next to a random obstacle, or any safe cell if none is free
/// within the attempt budget
pub fn bonus_position(state: &mut GameState) -> Position {
    if state.obstacles.is_empty() {
        return state.safe_random_position();
    }
    let grid = state.tuning.grid();
    let index = state.rng.random_range(0..state.obstacles.len());
    let anchor = state.obstacles[index];
    for _ in 0..state.tuning.bonus_placement_attempts {
        let dir = Direction::ALL[state.rng.random_range(0..Direction::ALL.len())];
        let pos = anchor + dir.delta(grid.cell);
        if grid.is_in_bounds(pos)
            && !state.snake.contains(&pos)
            && !state.obstacles.contains(&pos)
            && state.food != pos
        {
            return pos;
        }
    }
    state.safe_random_position()
}

/// Drop a bonus whose deadline has passed
pub fn expire_if_due(state: &mut GameState, now_ms: u64, events: &mut Vec<GameEvent>) {
    let Some(bonus) = state.bonus.as_ref() else {
        return;
    };
    if !bonus.is_expired(now_ms) {
        return;
    }
    let tier = bonus.tier;
    state.bonus = None;
    state.speed = speed_for_level(&state.tuning, state.level);
    state.last_bonus_end_ms = now_ms;
    log::info!("Bonus {} expired, speed back to {}", tier.color(), state.speed);
    events.push(GameEvent::BonusExpired { tier });
}

/// Roll for a new bonus food
pub fn maybe_spawn(state: &mut GameState, now_ms: u64, events: &mut Vec<GameEvent>) {
    if !is_eligible(state, now_ms) {
        return;
    }
    let chance = spawn_chance(&state.tuning, state.level);
    if state.rng.random::<f64>() >= chance {
        return;
    }

    let tier = BonusTier::roll(&mut state.rng, state.level);
    let pos = bonus_position(state);
    let bonus = BonusFood::new(
        tier,
        pos,
        now_ms,
        state.tuning.bonus_duration_multiplier,
        state.speed,
    );
    state.speed = bonus_speed(&state.tuning, state.speed);
    log::info!(
        "Bonus {} at ({}, {}) for {} ms, speed {} -> {}",
        tier.color(),
        pos.x,
        pos.y,
        bonus.visible_ms,
        bonus.prev_speed,
        state.speed
    );
    state.bonus = Some(bonus);
    events.push(GameEvent::BonusSpawned { tier, pos });
}

/// Eat the bonus if the head is on it. Returns true if eaten; the caller
/// re-evaluates the level.
pub fn try_consume(state: &mut GameState, now_ms: u64, events: &mut Vec<GameEvent>) -> bool {
    let head = state.head();
    let Some(bonus) = state.bonus.take_if(|b| b.pos == head) else {
        return false;
    };
    let points = bonus.points();
    state.score += points;
    state.speed = speed_for_level(&state.tuning, state.level);
    state.last_bonus_end_ms = now_ms;
    log::info!(
        "Bonus {} eaten for {} points (score {})",
        bonus.tier.color(),
        points,
        state.score
    );
    events.push(GameEvent::BonusEaten {
        tier: bonus.tier,
        points,
        score: state.score,
    });
    true
}
