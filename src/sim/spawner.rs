//! Obstacle spawner
//!
//! Runs on a self-rescheduling random delay; each firing drops one hazard zone
//! onto a random segment.

use rand::Rng;

use super::belt::{Obstacle, SegmentId};
use super::schedule::Delay;
use crate::tuning::SlicerTuning;

#[derive(Debug, Clone)]
pub struct ObstacleSpawner {
    delay: Delay,
    next_id: u32,
}

impl Default for ObstacleSpawner {
    fn default() -> Self {
        Self::new()
    }
}

impl ObstacleSpawner {
    pub fn new() -> Self {
        Self {
            delay: Delay::idle(),
            next_id: 1,
        }
    }

    /// Begin the spawn loop
    pub fn start(&mut self, now_ms: f64, rng: &mut impl Rng, tuning: &SlicerTuning) {
        self.schedule(now_ms, rng, tuning);
    }

    /// Stop the spawn loop; nothing spawns until `start` is called again
    pub fn cancel(&mut self) {
        self.delay.cancel();
    }

    pub fn is_active(&self) -> bool {
        self.delay.is_armed()
    }

    pub fn next_spawn_at(&self) -> Option<f64> {
        self.delay.due_at()
    }

    fn schedule(&mut self, now_ms: f64, rng: &mut impl Rng, tuning: &SlicerTuning) {
        let spread = (tuning.spawn_max_ms - tuning.spawn_min_ms).max(0.0);
        let wait = tuning.spawn_min_ms + rng.random::<f64>() * spread;
        self.delay.arm(now_ms, wait);
    }

    /// Spawn an obstacle if the delay elapsed, then reschedule
    pub fn poll(
        &mut self,
        now_ms: f64,
        rng: &mut impl Rng,
        tuning: &SlicerTuning,
    ) -> Option<(SegmentId, Obstacle)> {
        if !self.delay.fire(now_ms) {
            return None;
        }

        let segment = if rng.random_bool(0.5) {
            SegmentId::A
        } else {
            SegmentId::B
        };
        let room = (tuning.segment_width - tuning.obstacle_clearance).max(0.0);
        let obstacle = Obstacle {
            id: self.next_id,
            left: rng.random::<f32>() * room,
            width: tuning.obstacle_min_width + rng.random::<f32>() * tuning.obstacle_width_jitter,
        };
        self.next_id += 1;

        self.schedule(now_ms, rng, tuning);
        Some((segment, obstacle))
    }
}
