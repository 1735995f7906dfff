//! Browser entry point
//!
//! Exposes `WebApp` to JavaScript. The page owns the DOM and the animation
//! loop; it calls `frame` from `requestAnimationFrame`, forwards pointer
//! presses in play-area pixels and renders from `snapshot_json`.

use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::app::{App, PointerOutcome};
use crate::audio::WebAudio;
use crate::difficulty::Difficulty;
use crate::error::StorageError;
use crate::persistence::{KeyValueStore, LocalStorage, MemoryStore};
use crate::platform::{Clock, PerformanceClock};
use crate::screen::NavEvent;
use crate::settings::SoundSettings;
use crate::sim::{SliceOutcome, TapOutcome};

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Candy Slicer starting...");
}

/// LocalStorage, or memory when the browser blocks it
enum BrowserStore {
    Local(LocalStorage),
    Memory(MemoryStore),
}

impl BrowserStore {
    fn open() -> Self {
        match LocalStorage::open() {
            Ok(storage) => BrowserStore::Local(storage),
            Err(err) => {
                log::warn!("{err}; progress will not be saved");
                BrowserStore::Memory(MemoryStore::new())
            }
        }
    }
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self {
            BrowserStore::Local(store) => store.get(key),
            BrowserStore::Memory(store) => store.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        match self {
            BrowserStore::Local(store) => store.set(key, value),
            BrowserStore::Memory(store) => store.set(key, value),
        }
    }
}

#[wasm_bindgen]
pub struct WebApp {
    app: App<BrowserStore, WebAudio>,
    clock: PerformanceClock,
}

#[wasm_bindgen]
impl WebApp {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebApp {
        let seed = js_sys::Date::now() as u64;
        log::info!("App initialized with seed: {}", seed);
        WebApp {
            app: App::new(BrowserStore::open(), WebAudio::new(), seed),
            clock: PerformanceClock::new(),
        }
    }

    pub fn frame(&mut self) {
        let now = self.clock.now_ms();
        self.app.frame(now);
    }

    /// Pointer press in play-area pixels; returns what it did
    pub fn pointer(&mut self, x: f32, y: f32) -> String {
        self.app.audio().resume();
        let now = self.clock.now_ms();
        let outcome = match self.app.pointer(Vec2::new(x, y), now) {
            PointerOutcome::Ignored => "ignored",
            PointerOutcome::Slice(SliceOutcome::Ignored) => "ignored",
            PointerOutcome::Slice(SliceOutcome::Obstacle) => "obstacle",
            PointerOutcome::Slice(SliceOutcome::Hit { .. }) => "hit",
            PointerOutcome::Slice(SliceOutcome::Miss) => "miss",
            PointerOutcome::Tap(TapOutcome::Ignored) => "ignored",
            PointerOutcome::Tap(TapOutcome::Correct { .. }) => "correct",
            PointerOutcome::Tap(TapOutcome::Wrong { .. }) => "wrong",
        };
        outcome.to_string()
    }

    fn navigate(&mut self, event: NavEvent) -> bool {
        self.app.audio().resume();
        let now = self.clock.now_ms();
        self.app.navigate(event, now)
    }

    /// Start a slicing round (0 = beginner, 1 = intermediate, 2 = advanced)
    pub fn start_game(&mut self, difficulty: u8) -> bool {
        match Difficulty::from_ordinal(difficulty) {
            Some(difficulty) => self.navigate(NavEvent::StartGame(difficulty)),
            None => false,
        }
    }

    pub fn start_mini_game(&mut self, difficulty: u8) -> bool {
        match Difficulty::from_ordinal(difficulty) {
            Some(difficulty) => self.navigate(NavEvent::StartMiniGame(difficulty)),
            None => false,
        }
    }

    pub fn restart(&mut self) -> bool {
        self.navigate(NavEvent::Restart)
    }

    pub fn go_to_title(&mut self) -> bool {
        self.navigate(NavEvent::GoToTitle)
    }

    pub fn go_to_ranking(&mut self) -> bool {
        self.navigate(NavEvent::GoToRanking)
    }

    pub fn go_to_candy_selection(&mut self) -> bool {
        self.navigate(NavEvent::GoToCandySelection)
    }

    /// Returns the rank achieved, or 0 if nothing was saved
    pub fn submit_name(&mut self, name: &str) -> i32 {
        let now = self.clock.now_ms();
        self.app
            .submit_name(name, now)
            .map_or(0, |rank| rank as i32)
    }

    pub fn dismiss_name_prompt(&mut self) -> bool {
        let now = self.clock.now_ms();
        self.app.dismiss_name_prompt(now)
    }

    pub fn select_candy_set(&mut self, index: usize) -> bool {
        self.app.select_candy_set(index)
    }

    pub fn set_sound(&mut self, bgm_volume: f32, sfx_volume: f32, muted: bool) {
        self.app.set_sound_settings(SoundSettings {
            bgm_volume,
            sfx_volume,
            muted,
        });
    }

    pub fn snapshot_json(&self) -> Result<String, JsError> {
        serde_json::to_string(&self.app.snapshot()).map_err(|err| JsError::new(&err.to_string()))
    }
}

impl Default for WebApp {
    fn default() -> Self {
        Self::new()
    }
}
