//! Game settings and preferences
//!
//! Persisted separately from the leaderboard in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_TILE_SIZE;
use crate::platform;

/// Smallest tile that still takes pointer input reliably
pub const MIN_TILE_SIZE: f32 = 8.0;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Tile size in screen pixels, used to map pointer positions to cells
    pub tile_size: f32,
    /// Last level the player started (catalog id or the daily id)
    pub last_level: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            last_level: 1,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "pathprint_settings";

    /// Tile size with bad stored values replaced
    pub fn effective_tile_size(&self) -> f32 {
        if self.tile_size.is_finite() && self.tile_size >= MIN_TILE_SIZE {
            self.tile_size
        } else {
            DEFAULT_TILE_SIZE
        }
    }

    /// Record the level being started so the next visit resumes it
    pub fn remember_level(&mut self, level_id: u32) {
        if self.last_level != level_id {
            self.last_level = level_id;
            self.save();
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load settings from storage, falling back to defaults
    pub fn load() -> Self {
        let Some(json) = platform::storage_get(Self::STORAGE_KEY) else {
            log::info!("Using default settings");
            return Self::default();
        };
        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from storage");
                settings
            }
            Err(e) => {
                log::warn!("Stored settings unreadable ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Save settings to storage
    pub fn save(&self) {
        match self.to_json() {
            Ok(json) if platform::storage_set(Self::STORAGE_KEY, &json) => {
                log::info!("Settings saved");
            }
            Ok(_) => log::debug!("Settings not saved: no storage"),
            Err(e) => log::warn!("Failed to serialize settings: {}", e),
        }
    }
}
