//! Player settings and preferences
//!
//! Persisted as JSON next to the rankings. Missing or corrupt data falls back
//! to defaults.

use serde::{Deserialize, Serialize};

use crate::candy::{CANDY_SETS, CandySet, candy_set};
use crate::error::StorageError;
use crate::persistence::{KeyValueStore, load_json, save_json};

/// Mixer levels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundSettings {
    /// Background phrase volume (0.0 - 1.0)
    pub bgm_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for SoundSettings {
    fn default() -> Self {
        Self {
            bgm_volume: 0.2,
            sfx_volume: 0.8,
            muted: false,
        }
    }
}

impl SoundSettings {
    /// Clamp volumes into range
    pub fn normalized(self) -> Self {
        Self {
            bgm_volume: self.bgm_volume.clamp(0.0, 1.0),
            sfx_volume: self.sfx_volume.clamp(0.0, 1.0),
            muted: self.muted,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub sound: SoundSettings,
    /// Index into the candy set catalog
    #[serde(default)]
    pub candy_set: usize,
}

impl Settings {
    pub const STORAGE_KEY: &'static str = "kintaro-slicer-settings";

    pub fn load(store: &impl KeyValueStore) -> Self {
        match load_json::<Settings>(store, Self::STORAGE_KEY) {
            Ok(Some(settings)) => {
                log::info!("Loaded settings");
                Settings {
                    sound: settings.sound.normalized(),
                    ..settings
                }
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(err) => {
                log::warn!("Settings not loaded, using defaults: {err}");
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<(), StorageError> {
        save_json(store, Self::STORAGE_KEY, self)?;
        log::info!("Settings saved");
        Ok(())
    }

    /// The active candy set (out-of-range indices fall back to the first)
    pub fn candy_set(&self) -> &'static CandySet {
        candy_set(self.candy_set)
    }

    /// Returns false for an unknown set
    pub fn select_candy_set(&mut self, index: usize) -> bool {
        if index >= CANDY_SETS.len() {
            return false;
        }
        self.candy_set = index;
        true
    }
}
