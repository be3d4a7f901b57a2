//! Match state and the engine that owns it
//!
//! Everything that determines the next tick lives here: ball, lives, phase,
//! and the engine's own RNG. The paddle is deliberately absent; it belongs
//! to the input side and is handed to the engine read-only each tick.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::tuning::Tuning;

/// Fixed playfield bounds. Top-left origin, y grows downward, floor at
/// `y == height`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    /// Where a served ball is placed. The ball rect's top-left corner lands
    /// here, not its midpoint, so the ball actually sits just right of and
    /// below the true center.
    pub fn serve_origin(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// The ball: an axis-aligned square plus its displacement per tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub rect: Rect,
    /// Arena units per tick. The tick is the time unit; nothing scales by dt.
    pub vel: Vec2,
}

impl Ball {
    /// A ball at the serve origin moving up-right at the serve speed.
    pub fn serve(arena: &Arena, size: f32, serve_speed: f32) -> Self {
        Self {
            rect: Rect::new(arena.serve_origin(), Vec2::splat(size)),
            vel: Vec2::new(serve_speed, -serve_speed),
        }
    }
}

/// Where the match is in its lifecycle.
///
/// Transitions are owned by [`MatchEngine`]: `start` leaves Idle, the final
/// miss leaves Playing, `restart` leaves GameOver. Physics runs only while
/// Playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Waiting for the first serve; ball parked at the serve origin.
    Idle,
    /// Rally in progress.
    Playing,
    /// Out of lives. Ball stays frozen where it fell until restart.
    GameOver,
}

/// Read-only projection of one tick for display layers.
///
/// Ball and paddle are `Some` only while the rally is live; the Idle and
/// GameOver screens have nothing to draw beyond phase and lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: MatchPhase,
    pub lives: u8,
    pub ball: Option<Rect>,
    pub paddle: Option<Rect>,
}

/// Deterministic match simulation.
///
/// All mutation goes through `start`, `restart`, and `step`; reads go through
/// the accessors or [`MatchEngine::snapshot`]. Two engines built with the
/// same tuning and seed and fed the same paddle rects stay identical tick
/// for tick.
#[derive(Debug, Clone)]
pub struct MatchEngine {
    pub(super) arena: Arena,
    pub(super) ball: Ball,
    pub(super) phase: MatchPhase,
    pub(super) lives: u8,
    pub(super) rng: Pcg32,
    pub(super) ball_size: f32,
    pub(super) serve_speed: f32,
    pub(super) starting_lives: u8,
}

impl MatchEngine {
    pub fn new(tuning: &Tuning, seed: u64) -> Self {
        let arena = Arena {
            width: tuning.arena_width,
            height: tuning.arena_height,
        };
        Self {
            ball: Ball::serve(&arena, tuning.ball_size, tuning.serve_speed),
            arena,
            phase: MatchPhase::Idle,
            lives: tuning.starting_lives,
            rng: Pcg32::seed_from_u64(seed),
            ball_size: tuning.ball_size,
            serve_speed: tuning.serve_speed,
            starting_lives: tuning.starting_lives,
        }
    }

    /// Put the match back to its pre-serve state: full lives, ball at the
    /// serve origin with the serve velocity, phase Idle. The RNG is left
    /// alone, so the deflection sequence continues across matches.
    pub fn reset(&mut self) {
        self.phase = MatchPhase::Idle;
        self.lives = self.starting_lives;
        self.ball = Ball::serve(&self.arena, self.ball_size, self.serve_speed);
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Project the current tick for a display layer. The paddle is passed in
    /// because the engine never owns it.
    pub fn snapshot(&self, paddle: Rect) -> Snapshot {
        let live = self.phase == MatchPhase::Playing;
        Snapshot {
            phase: self.phase,
            lives: self.lives,
            ball: live.then_some(self.ball.rect),
            paddle: live.then_some(paddle),
        }
    }
}
