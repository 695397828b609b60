//! Browser bindings
//!
//! The page owns the canvas and calls `frame` from `requestAnimationFrame`,
//! then draws from `snapshot_json`. Events come back as JSON so the page can
//! show its own life-lost / game-over / victory messages.

use wasm_bindgen::prelude::*;

use crate::game::Game;
use crate::persistence::{LocalStorage, MemoryStorage, Storage, StorageError};
use crate::platform::{InputCommand, WebClock, map_button, map_key};
use crate::settings::Settings;
use crate::tuning::Tuning;

/// LocalStorage when the browser allows it, memory otherwise
enum WebStorage {
    Local(LocalStorage),
    Memory(MemoryStorage),
}

impl Storage for WebStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self {
            WebStorage::Local(s) => s.get_item(key),
            WebStorage::Memory(s) => s.get_item(key),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        match self {
            WebStorage::Local(s) => s.set_item(key, value),
            WebStorage::Memory(s) => s.set_item(key, value),
        }
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        match self {
            WebStorage::Local(s) => s.remove_item(key),
            WebStorage::Memory(s) => s.remove_item(key),
        }
    }
}

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialised".into());
    }
    log::info!("Snake Arcade starting...");
}

#[wasm_bindgen]
pub struct WebGame {
    game: Game<WebClock, WebStorage>,
}

#[wasm_bindgen]
impl WebGame {
    /// `player_name` is the answer to the code-name prompt
    #[wasm_bindgen(constructor)]
    pub fn new(player_name: Option<String>) -> WebGame {
        let mut storage = match LocalStorage::open() {
            Ok(local) => WebStorage::Local(local),
            Err(e) => {
                log::warn!("{}, scores will not persist", e);
                WebStorage::Memory(MemoryStorage::new())
            }
        };
        let settings = Settings::load(&storage).with_player_name(player_name.as_deref());
        if let Err(e) = settings.save(&mut storage) {
            log::warn!("Failed to save settings: {}", e);
        }
        let seed = js_sys::Date::now() as u64;
        WebGame {
            game: Game::new(settings, Tuning::default(), seed, WebClock::default(), storage),
        }
    }

    /// Call once per animation frame; returns the events as JSON
    pub fn frame(&mut self) -> String {
        let outcome = self.game.frame();
        serde_json::to_string(&outcome.events).unwrap_or_else(|_| "[]".to_string())
    }

    /// Feed a `KeyboardEvent.key`; returns the events as JSON
    pub fn key(&mut self, key: &str) -> String {
        let wasd = self.game.settings().wasd_controls;
        self.command(map_key(key, wasd))
    }

    /// Feed an on-screen button id; returns the events as JSON
    pub fn button(&mut self, id: &str) -> String {
        self.command(map_button(id))
    }

    /// Pause when the page loses focus (if enabled)
    pub fn blur(&mut self) -> String {
        if self.game.settings().pause_on_blur {
            self.command(Some(InputCommand::Pause))
        } else {
            "[]".to_string()
        }
    }

    #[wasm_bindgen(js_name = isPaused)]
    pub fn is_paused(&self) -> bool {
        self.game.is_paused()
    }

    /// Current frame as JSON for drawing
    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.game.snapshot()).unwrap_or_else(|_| "{}".to_string())
    }

    /// Leaderboard and badges as JSON
    #[wasm_bindgen(js_name = highscoresJson)]
    pub fn highscores_json(&self) -> String {
        let board = serde_json::json!({
            "highscores": self.game.highscores(),
            "badges": self.game.badges(),
        });
        board.to_string()
    }

    fn command(&mut self, command: Option<InputCommand>) -> String {
        let events = command.map(|c| self.game.handle(c)).unwrap_or_default();
        serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string())
    }
}
