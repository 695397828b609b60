//! Frame scheduler and session driver
//!
//! The host calls `Game::frame` once per display refresh. The scheduler
//! counts frames and runs one simulation tick whenever the count reaches
//! the current speed threshold, so a lower threshold means a faster game.

use crate::highscores::{Badges, HighScoreEntry, HighScores};
use crate::persistence::Storage;
use crate::platform::{Clock, InputCommand};
use crate::renderer::{Frame, Renderer};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, tick};
use crate::tuning::Tuning;

/// Frame counter gating simulation ticks
#[derive(Debug, Clone, Default)]
pub struct FrameScheduler {
    count: u32,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a frame; true when a tick is due (the counter restarts)
    pub fn advance(&mut self, speed: f32) -> bool {
        self.count += 1;
        if (self.count as f32) < speed {
            return false;
        }
        self.count = 0;
        true
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }
}

/// What one display frame produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameOutcome {
    /// A simulation tick ran this frame
    pub ticked: bool,
    pub events: Vec<GameEvent>,
}

/// A running session: state, scheduler, clock and persistence
pub struct Game<C: Clock, S: Storage> {
    state: GameState,
    scheduler: FrameScheduler,
    clock: C,
    storage: S,
    settings: Settings,
    highscores: HighScores,
    badges: Badges,
}

impl<C: Clock, S: Storage> Game<C, S> {
    /// Start a session. The player is put on the leaderboard straight away
    /// so they always show up in it.
    pub fn new(settings: Settings, tuning: Tuning, seed: u64, clock: C, storage: S) -> Self {
        let highscores = HighScores::load(&storage);
        let badges = Badges::load(&storage);
        let now = clock.now_ms();
        let state = GameState::new(seed, settings.player_name.clone(), tuning, now);

        let mut game = Self {
            state,
            scheduler: FrameScheduler::new(),
            clock,
            storage,
            settings,
            highscores,
            badges,
        };
        let entry = HighScoreEntry {
            player_name: game.state.player_name.clone(),
            score: 0,
            level: 1,
            lives: game.state.tuning.start_lives,
        };
        game.highscores.record(entry);
        game.persist();

        log::info!(
            "Session started for {} with seed {}",
            game.state.player_name,
            seed
        );
        game
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn highscores(&self) -> &HighScores {
        &self.highscores
    }

    pub fn badges(&self) -> &Badges {
        &self.badges
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn is_paused(&self) -> bool {
        self.state.is_paused()
    }

    /// Apply one input command right away
    pub fn handle(&mut self, command: InputCommand) -> Vec<GameEvent> {
        let now = self.clock.now_ms();
        let event = match command {
            InputCommand::Turn(dir) => {
                if !self.state.request_turn(dir) {
                    log::trace!("Turn {:?} rejected", dir);
                }
                None
            }
            InputCommand::TogglePause => self.state.toggle_pause(now),
            InputCommand::Pause => self.state.pause(now),
            InputCommand::Resume => self.state.resume(now),
            InputCommand::Acknowledge => {
                if self.state.acknowledge() {
                    self.scheduler.reset();
                }
                None
            }
        };
        event.into_iter().collect()
    }

    /// Called once per display refresh
    pub fn frame(&mut self) -> FrameOutcome {
        if self.state.phase != GamePhase::Playing {
            return FrameOutcome::default();
        }
        if !self.scheduler.advance(self.state.speed) {
            return FrameOutcome::default();
        }

        let now = self.clock.now_ms();
        let events = tick(&mut self.state, now);
        self.apply_outcomes(&events);
        FrameOutcome {
            ticked: true,
            events,
        }
    }

    /// Snapshot for the rendering collaborator
    pub fn snapshot(&self) -> Frame {
        Frame::capture(&self.state, self.clock.now_ms())
    }

    pub fn render<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        renderer.draw(&self.snapshot());
    }

    /// Record finished sessions and award badges
    fn apply_outcomes(&mut self, events: &[GameEvent]) {
        let mut dirty = false;
        for event in events {
            match event {
                GameEvent::GameOver { entry } => {
                    self.highscores.record(entry.clone());
                    dirty = true;
                }
                GameEvent::Victory { entry } => {
                    self.badges.award(&entry.player_name);
                    self.highscores.record(entry.clone());
                    dirty = true;
                }
                _ => {}
            }
        }
        if dirty {
            self.persist();
        }
    }

    fn persist(&mut self) {
        if let Err(e) = self.highscores.save(&mut self.storage) {
            log::error!("Failed to save high scores: {}", e);
        }
        if let Err(e) = self.badges.save(&mut self.storage) {
            log::error!("Failed to save badges: {}", e);
        }
    }
}
