//! Paddle control from tracked-hand samples
//!
//! The upstream tracker reports where the controlling hand currently is; the
//! paddle mirrors how far it moved. Relative tracking means the hand never has
//! to sit over the paddle, it only has to move in the same direction.

use glam::Vec2;

use super::rect::Rect;
use crate::tuning::Tuning;

/// Converts raw horizontal control samples into a clamped paddle position.
///
/// Owns the paddle rect exclusively; the engine only ever sees copies. The
/// mapping is 1:1 and unsmoothed: each new absolute sample moves the paddle by
/// exactly the distance the hand moved since the previous sample. The first
/// sample after construction only primes the memory and moves nothing.
#[derive(Debug, Clone)]
pub struct PaddleController {
    rect: Rect,
    arena_width: f32,
    prev_x: Option<f32>,
}

impl PaddleController {
    pub fn new(tuning: &Tuning) -> Self {
        let size = Vec2::new(tuning.paddle_width, tuning.paddle_height);
        let top = tuning.arena_height - tuning.paddle_offset;
        Self {
            rect: Rect::from_center_x(tuning.arena_width / 2.0, top, size),
            arena_width: tuning.arena_width,
            prev_x: None,
        }
    }

    /// Feed one hand sample: landmark x coordinates normalized to [0, 1].
    ///
    /// The landmarks are averaged and rescaled to arena units before the
    /// relative-tracking step. An empty slice counts as no sample at all, so
    /// the paddle holds and the tracking memory is untouched.
    pub fn track(&mut self, landmarks: &[f32]) {
        if landmarks.is_empty() {
            return;
        }
        let mean = landmarks.iter().sum::<f32>() / landmarks.len() as f32;
        self.track_abs(mean * self.arena_width);
    }

    /// Feed one absolute horizontal position in arena units.
    pub fn track_abs(&mut self, x: f32) {
        if let Some(prev) = self.prev_x {
            let half_w = self.rect.size.x / 2.0;
            let center = self.rect.center_x() + (x - prev);
            self.rect
                .set_center_x(center.clamp(half_w, self.arena_width - half_w));
        }
        self.prev_x = Some(x);
    }

    /// Current paddle rect. Center x is always within
    /// `[width/2, arena_width - width/2]`.
    pub fn rect(&self) -> Rect {
        self.rect
    }
}
