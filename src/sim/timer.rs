//! Wall-clock countdown
//!
//! The countdown keeps an absolute deadline and recomputes whole seconds on
//! every tick, so it is independent of how often frames arrive. Penalties move
//! the deadline itself.

/// Result of a single countdown tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTick {
    /// Not running (never started, cancelled or already expired)
    Idle,
    Unchanged,
    Changed(u32),
    /// Reached zero; reported exactly once
    Expired,
}

#[derive(Debug, Clone)]
pub struct CountdownTimer {
    duration_secs: u32,
    deadline_ms: Option<f64>,
    remaining: u32,
    expired: bool,
}

/// Whole seconds left until `deadline_ms`, rounded up, never negative
pub fn remaining_secs(deadline_ms: f64, now_ms: f64) -> u32 {
    ((deadline_ms - now_ms) / 1000.0).ceil().max(0.0) as u32
}

impl CountdownTimer {
    pub fn new(duration_secs: u32) -> Self {
        Self {
            duration_secs,
            deadline_ms: None,
            remaining: duration_secs,
            expired: false,
        }
    }

    pub fn start(&mut self, now_ms: f64) {
        self.deadline_ms = Some(now_ms + f64::from(self.duration_secs) * 1000.0);
        self.remaining = self.duration_secs;
        self.expired = false;
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    /// Last computed whole seconds
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn deadline_ms(&self) -> Option<f64> {
        self.deadline_ms
    }

    pub fn is_running(&self) -> bool {
        self.deadline_ms.is_some()
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }

    /// Pull the deadline in by `secs`; takes effect on the next tick
    pub fn penalize(&mut self, secs: u32) {
        if let Some(deadline) = self.deadline_ms.as_mut() {
            *deadline -= f64::from(secs) * 1000.0;
        }
    }

    pub fn cancel(&mut self) {
        self.deadline_ms = None;
    }

    pub fn tick(&mut self, now_ms: f64) -> TimerTick {
        let Some(deadline) = self.deadline_ms else {
            return TimerTick::Idle;
        };

        let secs = remaining_secs(deadline, now_ms);
        if secs == 0 {
            self.remaining = 0;
            self.expired = true;
            self.deadline_ms = None;
            return TimerTick::Expired;
        }

        if secs != self.remaining {
            self.remaining = secs;
            TimerTick::Changed(secs)
        } else {
            TimerTick::Unchanged
        }
    }
}
