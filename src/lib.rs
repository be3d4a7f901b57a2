//! Hand Pong - a hand-tracked ping pong match engine
//!
//! Core modules:
//! - `sim`: deterministic simulation (paddle tracking, ball physics, match
//!   state machine)
//! - `session`: fixed-rate driver wiring a control source and a frame sink
//!   to the simulation
//! - `tuning`: data-driven match parameters
//!
//! Camera capture and hand recognition live outside this crate; they reach
//! the match through [`session::ControlSource`] as per-tick frames of
//! normalized landmark x-coordinates.

pub mod session;
pub mod sim;
pub mod tuning;

pub use session::{
    Command, ControlFrame, ControlSource, FrameSink, Session, SessionStats, SourceFailure,
};
pub use sim::{Arena, Ball, MatchEngine, MatchPhase, PaddleController, Rect, Snapshot};
pub use tuning::{Tuning, TuningError};

/// Match configuration constants: the classic 640x480 setup
pub mod consts {
    /// Arena dimensions in arena units (pixels)
    pub const ARENA_WIDTH: f32 = 640.0;
    pub const ARENA_HEIGHT: f32 = 480.0;

    /// Paddle defaults - a wide bar floating just above the floor
    pub const PADDLE_WIDTH: f32 = 120.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    /// Distance from the floor up to the paddle's top edge
    pub const PADDLE_OFFSET: f32 = 30.0;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 20.0;
    /// Serve speed per axis, arena units per tick
    pub const SERVE_SPEED: f32 = 4.0;

    pub const STARTING_LIVES: u8 = 3;

    /// Session tick rate
    pub const TICK_HZ: u32 = 60;
    /// Late ticks burst through back to back up to this many; past that the
    /// backlog is dropped to prevent a catch-up spiral
    pub const MAX_CATCHUP_TICKS: u32 = 8;
}
