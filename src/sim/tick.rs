//! Simulation tick
//!
//! Advances the snake one cell and resolves everything that follows from
//! it. Called by the frame scheduler once the speed threshold is reached.

use super::bonus;
use super::collision::{WallOutcome, body_or_obstacle_hit, resolve_walls};
use super::difficulty::{level_for_score, obstacle_count_for_level, speed_for_level};
use super::state::{DeathCause, GameEvent, GamePhase, GameState};

/// Advance the game state by one move
///
/// `now_ms` is read once per tick from a monotonic clock and drives the
/// bonus food deadline and cooldown. Ticks outside `Playing` are ignored.
pub fn tick(state: &mut GameState, now_ms: u64) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase != GamePhase::Playing {
        return events;
    }
    state.time_ticks += 1;

    bonus::expire_if_due(state, now_ms, &mut events);

    state.direction = state.pending_direction;
    let grid = state.tuning.grid();
    let next = state.head() + state.direction.delta(grid.cell);

    let head = match resolve_walls(next, &grid, state.wall_tier()) {
        WallOutcome::Clear(pos) => pos,
        WallOutcome::Fatal(wall) => {
            log::debug!("Hit the {:?} wall", wall);
            lose_life(state, DeathCause::Wall, &mut events);
            return events;
        }
    };

    state.snake.push_front(head);

    if head == state.food {
        state.score += 1;
        events.push(GameEvent::FoodEaten { score: state.score });
        state.food = state.safe_random_position();
        update_level(state, &mut events);
        if state.is_victory() {
            finish_victory(state, &mut events);
            return events;
        }
    } else {
        state.snake.pop_back();
    }

    if let Some(cause) = body_or_obstacle_hit(&state.snake, &state.obstacles) {
        lose_life(state, cause, &mut events);
        return events;
    }

    bonus::maybe_spawn(state, now_ms, &mut events);

    // Victory is only decided on regular food
    if bonus::try_consume(state, now_ms, &mut events) {
        update_level(state, &mut events);
    }

    log::trace!(
        "tick {} head=({}, {}) len={} score={}",
        state.time_ticks,
        head.x,
        head.y,
        state.snake.len(),
        state.score
    );
    events
}

/// Recompute the level from the score; on change, top up obstacles and
/// speed (unless bonus food is overriding speed)
pub fn update_level(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let level = level_for_score(&state.tuning, state.score);
    if level == state.level {
        return;
    }
    state.level = level;

    let count = obstacle_count_for_level(&state.tuning, level);
    while state.obstacles.len() < count {
        let pos = state.safe_random_position();
        state.obstacles.push(pos);
    }
    if state.bonus.is_none() {
        state.speed = speed_for_level(&state.tuning, level);
    }

    log::info!(
        "Level {} reached (score {}, {} obstacles, speed {}, walls {:?})",
        level,
        state.score,
        state.obstacles.len(),
        state.speed,
        state.wall_tier()
    );
    events.push(GameEvent::LevelUp { level });
}

/// Take a life. Respawns the snake if any are left, otherwise records the
/// session and resets it.
fn lose_life(state: &mut GameState, cause: DeathCause, events: &mut Vec<GameEvent>) {
    state.lives = state.lives.saturating_sub(1);

    if state.lives > 0 {
        state.respawn_snake();
        state.phase = GamePhase::LifeLost;
        log::info!("Life lost ({:?}), {} left", cause, state.lives);
        events.push(GameEvent::LifeLost {
            lives: state.lives,
            cause,
        });
        return;
    }

    let entry = state.entry(0);
    log::info!(
        "Game over for {}: score {}, level {}",
        entry.player_name,
        entry.score,
        entry.level
    );
    events.push(GameEvent::LifeLost { lives: 0, cause });
    events.push(GameEvent::GameOver { entry });
    state.reset();
    state.phase = GamePhase::GameOver;
}

fn finish_victory(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let entry = state.entry(state.lives);
    log::info!(
        "Victory for {}: score {}, {} lives left",
        entry.player_name,
        entry.score,
        entry.lives
    );
    events.push(GameEvent::Victory { entry });
    state.reset();
    state.phase = GamePhase::Victory;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::bonus::{BonusFood, BonusTier};
    use crate::sim::grid::Direction;
    use crate::tuning::Tuning;
    use glam::IVec2;

    fn state() -> GameState {
        let mut state = GameState::new(12345, "Tester", Tuning::default(), 0);
        // Keep the path ahead of the start cell clear
        state.obstacles = vec![IVec2::new(0, 500), IVec2::new(20, 500), IVec2::new(40, 500)];
        state.food = IVec2::new(400, 400);
        state
    }

    fn food_ahead(state: &mut GameState) {
        state.food = state.head() + state.direction.delta(state.tuning.cell_size);
    }

    #[test]
    fn test_move_keeps_length() {
        let mut state = state();
        let events = tick(&mut state, 0);
        assert!(events.is_empty());
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.head(), IVec2::new(180, 160));
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_eating_grows_and_scores() {
        let mut state = state();
        food_ahead(&mut state);
        let events = tick(&mut state, 0);
        assert_eq!(state.snake.len(), 2);
        assert_eq!(state.score, 1);
        assert_eq!(state.level, 1);
        assert_eq!(events, vec![GameEvent::FoodEaten { score: 1 }]);
        assert!(!state.snake.contains(&state.food));
        assert!(!state.obstacles.contains(&state.food));

        state.food = IVec2::new(400, 400);
        tick(&mut state, 0);
        assert_eq!(state.snake.len(), 2);
    }

    #[test]
    fn test_reaching_threshold_levels_up() {
        let mut state = state();
        state.score = 2;
        food_ahead(&mut state);
        let events = tick(&mut state, 0);
        assert_eq!(state.score, 3);
        assert_eq!(state.level, 2);
        assert_eq!(state.speed, 14.5);
        assert_eq!(state.obstacles.len(), 4);
        assert!(events.contains(&GameEvent::LevelUp { level: 2 }));
    }

    #[test]
    fn test_level_up_keeps_bonus_speed() {
        let mut state = state();
        state.score = 2;
        state.speed = 9.0;
        state.bonus = Some(BonusFood::new(BonusTier::Blue, IVec2::new(580, 0), 0, 4, 16.0));
        food_ahead(&mut state);
        tick(&mut state, 0);
        assert_eq!(state.level, 2);
        assert_eq!(state.speed, 9.0);
    }

    #[test]
    fn test_pending_turn_applies_on_tick() {
        let mut state = state();
        assert!(state.request_turn(Direction::Down));
        assert_eq!(state.direction, Direction::Right);
        tick(&mut state, 0);
        assert_eq!(state.direction, Direction::Down);
        assert_eq!(state.head(), IVec2::new(160, 180));
        // Now travelling down, Up is a reversal
        assert!(!state.request_turn(Direction::Up));
    }

    #[test]
    fn test_safe_wall_wraps() {
        let mut state = state();
        state.snake = [IVec2::new(580, 160)].into();
        tick(&mut state, 0);
        assert_eq!(state.head(), IVec2::new(0, 160));
        assert_eq!(state.lives, 4);
    }

    #[test]
    fn test_lethal_wall_costs_life_without_moving() {
        let mut state = state();
        state.level = 9;
        state.snake = [IVec2::new(580, 160), IVec2::new(560, 160)].into();
        let events = tick(&mut state, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.phase, GamePhase::LifeLost);
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.head(), IVec2::new(160, 160));
        assert_eq!(state.direction, Direction::Right);
        assert_eq!(
            events,
            vec![GameEvent::LifeLost {
                lives: 3,
                cause: DeathCause::Wall
            }]
        );

        // Nothing happens until acknowledged
        assert!(tick(&mut state, 0).is_empty());
        assert!(state.acknowledge());
        tick(&mut state, 0);
        assert_eq!(state.head(), IVec2::new(180, 160));
    }

    #[test]
    fn test_last_life_on_wall_is_game_over() {
        let mut state = state();
        state.level = 9;
        state.score = 60;
        state.lives = 1;
        state.snake = [IVec2::new(580, 160)].into();
        let events = tick(&mut state, 0);

        let entry = events
            .iter()
            .find_map(|e| match e {
                GameEvent::GameOver { entry } => Some(entry.clone()),
                _ => None,
            })
            .expect("game over event");
        assert_eq!(entry.lives, 0);
        assert_eq!(entry.score, 60);
        assert_eq!(entry.level, 9);
        assert_eq!(entry.player_name, "Tester");

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.lives, 4);
        assert_eq!(state.speed, 16.0);
    }

    #[test]
    fn test_obstacle_hit() {
        let mut state = state();
        state.obstacles.push(IVec2::new(180, 160));
        let events = tick(&mut state, 0);
        assert_eq!(state.lives, 3);
        assert!(matches!(
            events[..],
            [GameEvent::LifeLost {
                cause: DeathCause::Obstacle,
                ..
            }]
        ));
    }

    #[test]
    fn test_self_bite() {
        let mut state = state();
        // Head at (200,160) moving up into its own body
        state.snake = [
            IVec2::new(200, 160),
            IVec2::new(200, 180),
            IVec2::new(180, 180),
            IVec2::new(180, 160),
            IVec2::new(180, 140),
            IVec2::new(200, 140),
            IVec2::new(220, 140),
        ]
        .into();
        state.direction = Direction::Right;
        state.request_turn(Direction::Up);
        let events = tick(&mut state, 0);
        assert!(matches!(
            events[..],
            [GameEvent::LifeLost {
                cause: DeathCause::SelfBite,
                ..
            }]
        ));
    }

    #[test]
    fn test_moving_into_old_tail_is_safe() {
        let mut state = state();
        // A 4-cell loop: the head follows the tail around
        state.snake = [
            IVec2::new(200, 160),
            IVec2::new(200, 180),
            IVec2::new(220, 180),
            IVec2::new(220, 160),
        ]
        .into();
        state.direction = Direction::Down;
        state.pending_direction = Direction::Right;
        tick(&mut state, 0);
        assert_eq!(state.lives, 4);
        assert_eq!(state.head(), IVec2::new(220, 160));
    }

    #[test]
    fn test_victory_at_final_threshold() {
        let mut state = state();
        state.level = 9;
        state.score = 74;
        state.lives = 2;
        food_ahead(&mut state);
        let events = tick(&mut state, 0);

        let entry = events
            .iter()
            .find_map(|e| match e {
                GameEvent::Victory { entry } => Some(entry.clone()),
                _ => None,
            })
            .expect("victory event");
        assert_eq!(entry.score, 75);
        assert_eq!(entry.level, 10);
        assert_eq!(entry.lives, 2);
        assert_eq!(state.phase, GamePhase::Victory);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 4);
    }

    #[test]
    fn test_bonus_eaten_on_arrival() {
        let mut state = state();
        state.speed = 9.0;
        state.bonus = Some(BonusFood::new(BonusTier::Violet, IVec2::new(180, 160), 0, 4, 16.0));
        let events = tick(&mut state, 100);
        assert_eq!(state.score, 10);
        assert_eq!(state.level, 3);
        assert!(state.bonus.is_none());
        assert_eq!(state.speed, speed_for_level(&state.tuning, 3));
        assert_eq!(state.last_bonus_end_ms, 100);
        assert!(events.contains(&GameEvent::LevelUp { level: 3 }));
    }

    #[test]
    fn test_bonus_past_final_threshold_waits_for_food() {
        let mut state = state();
        state.level = 9;
        state.score = 70;
        state.speed = 4.0;
        state.bonus = Some(BonusFood::new(BonusTier::Violet, IVec2::new(180, 160), 0, 4, 11.0));
        let events = tick(&mut state, 100);
        assert_eq!(state.score, 80);
        assert_eq!(state.level, 10);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(events.contains(&GameEvent::LevelUp { level: 10 }));
        assert!(!events.iter().any(|e| matches!(e, GameEvent::Victory { .. })));

        food_ahead(&mut state);
        let events = tick(&mut state, 200);
        let entry = events
            .iter()
            .find_map(|e| match e {
                GameEvent::Victory { entry } => Some(entry.clone()),
                _ => None,
            })
            .expect("victory on the next food");
        assert_eq!(entry.score, 81);
        assert_eq!(state.phase, GamePhase::Victory);
    }

    #[test]
    fn test_game_over_cancels_live_bonus() {
        let mut state = state();
        state.level = 9;
        state.lives = 1;
        state.speed = 9.0;
        state.bonus = Some(BonusFood::new(BonusTier::Blue, IVec2::new(0, 0), 0, 4, 16.0));
        state.snake = [IVec2::new(580, 160)].into();
        let events = tick(&mut state, 1_000);
        assert!(matches!(events.last(), Some(GameEvent::GameOver { .. })));
        assert!(state.bonus.is_none());
        assert_eq!(state.speed, 16.0);

        // The old deadline has passed but nothing is left to expire
        assert!(state.acknowledge());
        let events = tick(&mut state, 9_000);
        assert!(!events.iter().any(|e| matches!(e, GameEvent::BonusExpired { .. })));
    }

    #[test]
    fn test_bonus_expires_by_real_time() {
        let mut state = state();
        state.speed = 9.0;
        state.bonus = Some(BonusFood::new(BonusTier::Blue, IVec2::new(580, 580), 0, 4, 16.0));
        tick(&mut state, 7_999);
        assert!(state.bonus.is_some());
        let events = tick(&mut state, 8_000);
        assert!(state.bonus.is_none());
        assert_eq!(state.speed, 16.0);
        assert_eq!(events[0], GameEvent::BonusExpired { tier: BonusTier::Blue });
    }

    #[test]
    fn test_scripted_run_to_level_two() {
        let mut state = state();
        for expected in 1..=3 {
            food_ahead(&mut state);
            tick(&mut state, 0);
            assert_eq!(state.score, expected);
            assert_eq!(state.snake.len() as u32, expected + 1);
        }
        assert_eq!(state.level, 2);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999, "A", Tuning::default(), 0);
        let mut state2 = GameState::new(99999, "A", Tuning::default(), 0);
        for i in 0..200u64 {
            if i % 7 == 0 {
                let dir = if i % 14 == 0 { Direction::Up } else { Direction::Left };
                state1.request_turn(dir);
                state2.request_turn(dir);
            }
            state1.acknowledge();
            state2.acknowledge();
            tick(&mut state1, i * 100);
            tick(&mut state2, i * 100);
        }
        assert_eq!(state1.snake, state2.snake);
        assert_eq!(state1.food, state2.food);
        assert_eq!(state1.obstacles, state2.obstacles);
        assert_eq!(state1.score, state2.score);
    }
}
