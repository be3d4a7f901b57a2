//! Axis-aligned rectangle geometry for the ball and paddle
//!
//! Screen conventions throughout: the origin is the top-left corner of the
//! arena and y grows downward, so `top() < bottom()` and a positive vertical
//! velocity moves toward the floor.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle stored as top-left corner plus size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    /// Width and height (both positive)
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Build a rect from its horizontal center, top edge, and size
    pub fn from_center_x(center_x: f32, top: f32, size: Vec2) -> Self {
        Self {
            min: Vec2::new(center_x - size.x / 2.0, top),
            size,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.min.x + self.size.x / 2.0
    }

    /// Move the rect so its horizontal center sits at `x`
    pub fn set_center_x(&mut self, x: f32) {
        self.min.x = x - self.size.x / 2.0;
    }

    /// Strict overlap test. Rectangles that only share an edge do not
    /// intersect, matching the classic sprite-rect collision rule.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}
