//! Match tuning parameters
//!
//! Everything that shapes a match in one serde struct, so the classic
//! geometry can be overridden from a JSON file next to the binary. Values
//! are validated before use; a bad file falls back to defaults instead of
//! aborting.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts;

/// Tuning file looked for in the working directory.
pub const TUNING_FILE: &str = "hand_pong_tuning.json";

/// A tuning value that makes the match geometrically impossible.
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("arena must have positive finite dimensions, got {width}x{height}")]
    EmptyArena { width: f32, height: f32 },
    #[error("paddle must have positive finite dimensions, got {width}x{height}")]
    BadPaddle { width: f32, height: f32 },
    #[error("paddle width {paddle} exceeds arena width {arena}")]
    PaddleTooWide { paddle: f32, arena: f32 },
    #[error("ball size {0} must be positive and finite")]
    BadBallSize(f32),
    #[error("serve speed {0} must be positive and finite")]
    BadServeSpeed(f32),
    #[error("starting lives must be at least 1")]
    NoLives,
    #[error("tick rate must be at least 1 Hz")]
    ZeroTickRate,
}

fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

/// Match parameters. Defaults are the classic 640x480 setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub arena_width: f32,
    pub arena_height: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Distance from the floor up to the paddle's top edge.
    pub paddle_offset: f32,
    /// The ball is a square of this side.
    pub ball_size: f32,
    /// Serve velocity magnitude per axis, arena units per tick.
    pub serve_speed: f32,
    pub starting_lives: u8,
    /// Session tick rate.
    pub tick_hz: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena_width: consts::ARENA_WIDTH,
            arena_height: consts::ARENA_HEIGHT,
            paddle_width: consts::PADDLE_WIDTH,
            paddle_height: consts::PADDLE_HEIGHT,
            paddle_offset: consts::PADDLE_OFFSET,
            ball_size: consts::BALL_SIZE,
            serve_speed: consts::SERVE_SPEED,
            starting_lives: consts::STARTING_LIVES,
            tick_hz: consts::TICK_HZ,
        }
    }
}

impl Tuning {
    /// Reject values the engine cannot run with. Anything that passes here
    /// is safe for `MatchEngine::new` and `PaddleController::new`.
    pub fn validate(&self) -> Result<(), TuningError> {
        if !positive(self.arena_width) || !positive(self.arena_height) {
            return Err(TuningError::EmptyArena {
                width: self.arena_width,
                height: self.arena_height,
            });
        }
        if !positive(self.paddle_width) || !positive(self.paddle_height) {
            return Err(TuningError::BadPaddle {
                width: self.paddle_width,
                height: self.paddle_height,
            });
        }
        if self.paddle_width > self.arena_width {
            return Err(TuningError::PaddleTooWide {
                paddle: self.paddle_width,
                arena: self.arena_width,
            });
        }
        if !positive(self.ball_size) {
            return Err(TuningError::BadBallSize(self.ball_size));
        }
        if !positive(self.serve_speed) {
            return Err(TuningError::BadServeSpeed(self.serve_speed));
        }
        if self.starting_lives == 0 {
            return Err(TuningError::NoLives);
        }
        if self.tick_hz == 0 {
            return Err(TuningError::ZeroTickRate);
        }
        Ok(())
    }

    /// Load tuning from [`TUNING_FILE`] in the working directory, falling
    /// back to defaults when the file is absent or unusable.
    pub fn load() -> Self {
        Self::load_from(Path::new(TUNING_FILE))
    }

    pub fn load_from(path: &Path) -> Self {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(_) => {
                log::info!("Using default tuning");
                return Self::default();
            }
        };

        match serde_json::from_str::<Self>(&json) {
            Ok(tuning) => match tuning.validate() {
                Ok(()) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(err) => {
                    log::warn!("Ignoring {}: {}", path.display(), err);
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!("Ignoring {}: {}", path.display(), err);
                Self::default()
            }
        }
    }
}
