//! Candy belt motion
//!
//! Two segments chase each other leftward, forming a continuous belt. When a
//! segment scrolls fully off-screen it is recycled behind its partner with a
//! fresh pattern and no obstacles.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::tuning::SlicerTuning;

/// Which belt segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentId {
    A,
    B,
}

impl SegmentId {
    /// Hit-test order
    pub const ALL: [SegmentId; 2] = [SegmentId::A, SegmentId::B];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            SegmentId::A => 0,
            SegmentId::B => 1,
        }
    }

    #[inline]
    pub fn other(self) -> Self {
        match self {
            SegmentId::A => SegmentId::B,
            SegmentId::B => SegmentId::A,
        }
    }
}

/// A hazard zone riding on a segment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Obstacle {
    pub id: u32,
    /// Position relative to the segment's left edge
    pub left: f32,
    pub width: f32,
}

/// One scrolling band of candy
#[derive(Debug, Clone, Serialize)]
pub struct Segment {
    /// Left edge in play-area pixels
    pub offset: f32,
    /// Index into the round's candy patterns
    pub pattern: usize,
    pub obstacles: Vec<Obstacle>,
}

impl Segment {
    fn new(offset: f32, pattern: usize) -> Self {
        Self {
            offset,
            pattern,
            obstacles: Vec::new(),
        }
    }
}

/// The belt: both segments plus their shared speed
#[derive(Debug, Clone, Serialize)]
pub struct Belt {
    pub segments: [Segment; 2],
    /// Current speed (pixels/s)
    pub speed: f32,
    /// Speed gained per second (0 = constant speed)
    pub acceleration: f32,
    pub segment_width: f32,
    pub segment_height: f32,
    pub lane_top: f32,
}

impl Belt {
    /// Segment A starts at the left edge, B directly behind it
    pub fn new(tuning: &SlicerTuning, accelerate: bool, patterns: (usize, usize)) -> Self {
        Self {
            segments: [
                Segment::new(0.0, patterns.0),
                Segment::new(tuning.segment_width, patterns.1),
            ],
            speed: tuning.base_speed,
            acceleration: if accelerate { tuning.acceleration } else { 0.0 },
            segment_width: tuning.segment_width,
            segment_height: tuning.segment_height,
            lane_top: tuning.lane_top(),
        }
    }

    pub fn segment(&self, id: SegmentId) -> &Segment {
        &self.segments[id.index()]
    }

    pub fn segment_mut(&mut self, id: SegmentId) -> &mut Segment {
        &mut self.segments[id.index()]
    }

    /// Current hit box of a segment
    pub fn segment_rect(&self, id: SegmentId) -> Rect {
        let segment = self.segment(id);
        Rect::new(
            segment.offset,
            self.lane_top,
            self.segment_width,
            self.segment_height,
        )
    }

    /// Current hit box of an obstacle (spans the full segment height)
    pub fn obstacle_rect(&self, id: SegmentId, obstacle: &Obstacle) -> Rect {
        let segment = self.segment(id);
        Rect::new(
            segment.offset + obstacle.left,
            self.lane_top,
            obstacle.width,
            self.segment_height,
        )
    }

    /// Distance between the two segments' left edges
    pub fn spacing(&self) -> f32 {
        (self.segments[0].offset - self.segments[1].offset).abs()
    }

    /// Advance by `dt` seconds; returns the segments that were recycled
    pub fn advance(&mut self, dt: f32, rng: &mut impl Rng, pattern_count: usize) -> Vec<SegmentId> {
        self.speed += self.acceleration * dt;

        let step = self.speed * dt;
        for segment in &mut self.segments {
            segment.offset -= step;
        }

        let width = self.segment_width;
        let period = 2.0 * width;
        let mut recycled = Vec::new();

        // A long frame gap can carry the belt through several laps at once
        let lead = if self.segments[0].offset <= self.segments[1].offset {
            SegmentId::A
        } else {
            SegmentId::B
        };
        let lead_offset = self.segments[lead.index()].offset;
        if lead_offset <= -period {
            let offset = lead_offset % period;
            self.segments[lead.index()].offset = offset;
            self.segments[lead.other().index()].offset = offset + width;
            for id in SegmentId::ALL {
                self.refresh(id, rng, pattern_count);
                recycled.push(id);
            }
        }

        while let Some(id) = SegmentId::ALL
            .into_iter()
            .find(|&id| self.segments[id.index()].offset <= -width)
        {
            let partner = self.segments[id.other().index()].offset;
            self.segments[id.index()].offset = partner + width;
            self.refresh(id, rng, pattern_count);
            if !recycled.contains(&id) {
                recycled.push(id);
            }
        }
        recycled
    }

    /// New pattern, no obstacles
    fn refresh(&mut self, id: SegmentId, rng: &mut impl Rng, pattern_count: usize) {
        let segment = &mut self.segments[id.index()];
        segment.pattern = rng.random_range(0..pattern_count.max(1));
        segment.obstacles.clear();
    }
}
