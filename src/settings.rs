//! Game settings and preferences
//!
//! Persisted separately from the best score in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::sim::{DEFAULT_DIFFICULTY_ID, DifficultyProfile};

/// Emoji characters offered by the selector (first is the default)
pub const EMOJI_ROSTER: [&str; 12] = [
    "🐦", "🦅", "🦆", "🦉", "🦇", "🐝", "🦋", "🐞", "🚀", "🛸", "🚁", "✈️",
];

/// What the renderer draws for the actor. The simulation never looks at it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Character {
    Emoji(String),
    /// Uploaded image as a data URL
    Image(String),
}

impl Default for Character {
    fn default() -> Self {
        Character::Emoji(EMOJI_ROSTER[0].to_string())
    }
}

impl Character {
    /// Emoji from the roster by index
    pub fn from_roster(index: usize) -> Option<Self> {
        EMOJI_ROSTER
            .get(index)
            .map(|e| Character::Emoji((*e).to_string()))
    }

    /// Only data URLs are accepted as uploaded images
    pub fn image(data_url: impl Into<String>) -> Option<Self> {
        let data_url = data_url.into();
        data_url
            .starts_with("data:image/")
            .then_some(Character::Image(data_url))
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Selected difficulty tier id
    pub difficulty: u8,
    /// Selected character
    pub character: Character,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    /// Attract mode: the autopilot plays
    pub autopilot: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: DEFAULT_DIFFICULTY_ID,
            character: Character::default(),
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            autopilot: false,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "flop_bird_settings";

    /// Parse settings, repairing out-of-range values
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Unknown difficulty falls back to the default tier; volumes are clamped
    pub fn sanitize(&mut self) {
        if DifficultyProfile::by_id(self.difficulty).is_none() {
            log::warn!("Unknown difficulty {}, using default", self.difficulty);
            self.difficulty = DEFAULT_DIFFICULTY_ID;
        }
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
    }

    /// Selected tier (always valid after sanitize)
    pub fn difficulty_profile(&self) -> DifficultyProfile {
        DifficultyProfile::by_id(self.difficulty).unwrap_or_default()
    }

    /// Effective sound effect volume (respects mute)
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = Self::from_json(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = self.to_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }
}
