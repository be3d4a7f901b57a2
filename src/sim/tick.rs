//! Match lifecycle commands and the per-tick physics step
//!
//! The step runs a fixed order over the post-move rect: advance, walls,
//! paddle, floor. Collision looks only at where the ball landed, never at
//! the path it took, so a fast enough ball can cross the paddle row in a
//! single tick without a hit.

use rand::Rng;

use super::collision;
use super::rect::Rect;
use super::state::{MatchEngine, MatchPhase};

impl MatchEngine {
    /// Begin the rally. Meaningful only from Idle; elsewhere a no-op. The
    /// ball first moves on the step after this returns.
    pub fn start(&mut self) {
        if self.phase == MatchPhase::Idle {
            self.phase = MatchPhase::Playing;
        }
    }

    /// Fresh match via [`MatchEngine::reset`]. Meaningful only from
    /// GameOver; elsewhere a no-op.
    pub fn restart(&mut self) {
        if self.phase == MatchPhase::GameOver {
            self.reset();
        }
    }

    /// Advance the match by one tick against the given paddle. Outside
    /// Playing this returns without touching anything.
    pub fn step(&mut self, paddle: Rect) {
        if self.phase != MatchPhase::Playing {
            return;
        }

        self.ball.rect.min += self.ball.vel;

        collision::reflect_off_walls(&mut self.ball, &self.arena);

        if collision::hits_paddle(&self.ball, &paddle) {
            self.ball.vel.y = -self.ball.vel.y;
            // Random walk on vx: unbounded either way, and it may pass
            // through zero.
            let kick = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
            self.ball.vel.x += kick;
        }

        if collision::past_floor(&self.ball, &self.arena) {
            self.lives = self.lives.saturating_sub(1);
            if self.lives == 0 {
                // Ball stays where it fell for the game-over screen.
                self.phase = MatchPhase::GameOver;
            } else {
                self.ball.rect.min = self.arena.serve_origin();
                // Only vy resets on a re-serve; accumulated vx is kept.
                self.ball.vel.y = -self.serve_speed;
            }
        }
    }
}
