//! Cooperative scheduling primitives
//!
//! Every recurring loop in a round is one of these, owned by the round state,
//! so tearing a round down is just cancelling its fields.

/// A cancellable one-shot delay against the session clock
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Delay {
    due_at: Option<f64>,
}

impl Delay {
    pub const fn idle() -> Self {
        Self { due_at: None }
    }

    /// (Re)arm to fire `delay_ms` after `now_ms`
    pub fn arm(&mut self, now_ms: f64, delay_ms: f64) {
        self.due_at = Some(now_ms + delay_ms);
    }

    pub fn cancel(&mut self) {
        self.due_at = None;
    }

    pub fn is_armed(&self) -> bool {
        self.due_at.is_some()
    }

    pub fn due_at(&self) -> Option<f64> {
        self.due_at
    }

    /// Returns true exactly once when the delay has elapsed, then disarms
    pub fn fire(&mut self, now_ms: f64) -> bool {
        match self.due_at {
            Some(due) if now_ms >= due => {
                self.due_at = None;
                true
            }
            _ => false,
        }
    }
}

/// Frame-to-frame elapsed time tracker
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameDelta {
    last_ms: Option<f64>,
}

impl FrameDelta {
    /// Seconds since the previous sample; the first sample is a zero baseline
    pub fn sample(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0).max(0.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        dt
    }

    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_fires_once() {
        let mut delay = Delay::idle();
        delay.arm(100.0, 50.0);
        assert!(!delay.fire(149.0));
        assert!(delay.fire(150.0));
        assert!(!delay.fire(200.0));
        assert!(!delay.is_armed());
    }

    #[test]
    fn test_cancelled_delay_never_fires() {
        let mut delay = Delay::idle();
        delay.arm(0.0, 10.0);
        delay.cancel();
        assert!(!delay.fire(1_000.0));
    }

    #[test]
    fn test_frame_delta_baseline() {
        let mut frame = FrameDelta::default();
        assert_eq!(frame.sample(5_000.0), 0.0);
        assert!((frame.sample(5_016.0) - 0.016).abs() < 1e-6);
        // Clock going backwards never yields negative motion
        assert_eq!(frame.sample(4_000.0), 0.0);

        frame.reset();
        assert_eq!(frame.sample(9_000.0), 0.0);
    }
}
