//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Monotonic time for the frame driver
//! - Calendar dates for ranking entries

use std::cell::Cell;

/// Millisecond time source driving `App::frame`
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Hand-advanced clock for tests and scripted runs
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn advance(&self, ms: f64) -> f64 {
        let now = self.now.get() + ms;
        self.now.set(now);
        now
    }

    pub fn set(&self, now_ms: f64) {
        self.now.set(now_ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

/// Milliseconds since the clock was created
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub struct SystemClock {
    origin: std::time::Instant,
}

#[cfg(not(target_arch = "wasm32"))]
impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// `performance.now()`, falling back to `Date.now()` when unavailable
#[cfg(target_arch = "wasm32")]
pub struct PerformanceClock {
    performance: Option<web_sys::Performance>,
}

#[cfg(target_arch = "wasm32")]
impl PerformanceClock {
    pub fn new() -> Self {
        Self {
            performance: web_sys::window().and_then(|w| w.performance()),
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl Clock for PerformanceClock {
    fn now_ms(&self) -> f64 {
        match &self.performance {
            Some(performance) => performance.now(),
            None => js_sys::Date::now(),
        }
    }
}

/// Today's date in the browser's locale
#[cfg(target_arch = "wasm32")]
pub fn today() -> String {
    let date = js_sys::Date::new_0();
    String::from(date.to_locale_date_string("default", &wasm_bindgen::JsValue::UNDEFINED))
}

/// Today's UTC date as `YYYY/MM/DD`
#[cfg(not(target_arch = "wasm32"))]
pub fn today() -> String {
    chrono::Utc::now().format("%Y/%m/%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock() {
        let clock = ManualClock::new(100.0);
        assert_eq!(clock.now_ms(), 100.0);
        assert_eq!(clock.advance(16.0), 116.0);
        clock.set(5.0);
        assert_eq!(clock.now_ms(), 5.0);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_today_is_slash_separated_date() {
        let date = today();
        assert!(chrono::NaiveDate::parse_from_str(&date, "%Y/%m/%d").is_ok(), "{date}");
        assert_eq!(date.len(), 10);
    }
}
