//! Player settings and preferences
//!
//! Persisted separately from the leaderboard.

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_PLAYER_NAME;
use crate::persistence::{Storage, StorageError, load_json, save_json};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Code name shown on the leaderboard
    pub player_name: String,

    // === Controls ===
    /// Accept WASD as well as the arrow keys
    pub wasd_controls: bool,

    // === Host behaviour ===
    /// Pause when the window loses focus
    pub pause_on_blur: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            player_name: DEFAULT_PLAYER_NAME.to_string(),
            wasd_controls: true,
            pause_on_blur: true,
        }
    }
}

impl Settings {
    const STORAGE_KEY: &'static str = "snakeSettings";

    /// Apply the answer to the code-name prompt
    pub fn with_player_name(mut self, answer: Option<&str>) -> Self {
        self.player_name = resolve_player_name(answer);
        self
    }

    /// Load settings; missing or corrupt data gives defaults
    pub fn load<S: Storage + ?Sized>(storage: &S) -> Self {
        let mut settings: Self = load_json(storage, Self::STORAGE_KEY);
        settings.player_name = resolve_player_name(Some(&settings.player_name));
        settings
    }

    pub fn save<S: Storage + ?Sized>(&self, storage: &mut S) -> Result<(), StorageError> {
        save_json(storage, Self::STORAGE_KEY, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}

/// Trimmed player name, or the default code name if none was given
pub fn resolve_player_name(answer: Option<&str>) -> String {
    match answer.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => DEFAULT_PLAYER_NAME.to_string(),
    }
}
