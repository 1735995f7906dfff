//! Candy Slicer - slice the scrolling candy roll before time runs out
//!
//! Core modules:
//! - `sim`: Deterministic simulation (belt motion, countdown, hit-testing, minigame)
//! - `app`: Session driver wiring the simulation to screens, sound and storage
//! - `screen`: Screen navigation table
//! - `ranking`: Per-difficulty high score tables
//! - `persistence`: Key-value storage (memory / LocalStorage)
//! - `audio`: Sound cue routing and Web Audio synthesis
//! - `platform`: Clocks and date helpers
//! - `tuning`: Data-driven game balance

pub mod app;
pub mod audio;
pub mod candy;
pub mod difficulty;
pub mod error;
pub mod persistence;
pub mod platform;
pub mod ranking;
pub mod screen;
pub mod settings;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use app::{App, Session, Snapshot};
pub use difficulty::Difficulty;
pub use error::{AudioError, StorageError};
pub use ranking::{Ranking, RankingBook, RankingEntry};
pub use screen::{NavEvent, Screen};
pub use settings::{Settings, SoundSettings};
pub use tuning::{ComboScoring, OddOneOutTuning, SlicerTuning};

/// Game configuration constants
pub mod consts {
    /// Slicing round length in seconds
    pub const GAME_DURATION_SECS: u32 = 30;

    /// Play area (pixels, origin at top-left)
    pub const PLAY_AREA_WIDTH: f32 = 896.0;
    pub const PLAY_AREA_HEIGHT: f32 = 192.0;

    /// Candy belt segments
    pub const SEGMENT_WIDTH: f32 = 800.0;
    pub const SEGMENT_HEIGHT: f32 = 128.0;
    /// Belt speed at round start (pixels/s)
    pub const BASE_SPEED: f32 = 200.0;
    /// Advanced difficulty speed ramp (pixels/s²)
    pub const ADVANCED_ACCELERATION: f32 = 15.0;

    /// Obstacles keep this much room at the end of their segment
    pub const OBSTACLE_CLEARANCE: f32 = 150.0;
    pub const OBSTACLE_MIN_WIDTH: f32 = 80.0;
    pub const OBSTACLE_WIDTH_JITTER: f32 = 50.0;
    pub const OBSTACLE_SPAWN_MIN_MS: f64 = 2000.0;
    pub const OBSTACLE_SPAWN_MAX_MS: f64 = 4000.0;

    /// Delay between game over and reporting the final score
    pub const TIMEOUT_HOLD_MS: f64 = 1500.0;
    pub const COLLISION_HOLD_MS: f64 = 500.0;
    /// BGM phrase repeat period
    pub const BGM_REPEAT_MS: f64 = 2000.0;

    /// Hit feedback lifetimes
    pub const SLICE_DEBRIS_MS: f64 = 2000.0;
    pub const SCORE_POPUP_MS: f64 = 1000.0;
    pub const PARTICLE_MS: f64 = 800.0;
    pub const SLASH_MS: f64 = 200.0;
    pub const COMBO_BANNER_MS: f64 = 800.0;
    pub const PARTICLES_PER_HIT: usize = 20;
    pub const PARTICLE_COLORS: [u32; 4] = [0xff6b6b, 0xf9d423, 0x48dbfb, 0x1dd1a1];

    /// Odd-one-out minigame
    pub const MINI_GAME_DURATION_SECS: u32 = 60;
    pub const MINI_COLUMNS: usize = 8;
    /// Extra cells per row so the scrolling strip never shows a gap
    pub const MINI_BUFFER_COLUMNS: usize = 4;
    pub const MINI_CANDY_SIZE: f32 = 80.0;
    pub const MINI_CANDY_MARGIN: f32 = 5.0;
    pub const MINI_ROW_GAP: f32 = 10.0;
    pub const MINI_HIT_SCORE: u64 = 100;
    pub const MINI_BASE_SCROLL: f32 = 50.0;
    /// Scroll speed gained per elapsed second (pixels/s)
    pub const MINI_SCROLL_RAMP: f32 = 2.0;
}
