//! Deterministic match simulation
//!
//! All gameplay logic lives here. This module must stay pure and
//! deterministic:
//! - One tick is the time unit; nothing scales by wall-clock dt
//! - Seeded RNG only, owned by the engine
//! - No I/O, rendering, or input dependencies
//!
//! The session layer drives it; anything that talks to the outside world
//! belongs there.

pub mod collision;
pub mod paddle;
pub mod rect;
pub mod state;
pub mod tick;

pub use paddle::PaddleController;
pub use rect::Rect;
pub use state::{Arena, Ball, MatchEngine, MatchPhase, Snapshot};
