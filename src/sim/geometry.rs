//! Axis-aligned hit boxes in play-area pixels

use glam::Vec2;
use serde::Serialize;

/// An axis-aligned rectangle (origin at top-left, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.origin.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.origin.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.origin.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.origin + self.size * 0.5
    }

    /// Point containment, edges inclusive
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }
}
