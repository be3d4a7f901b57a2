//! Fixed-rate session driver
//!
//! Connects an upstream control producer and a downstream snapshot consumer
//! to the simulation, one tick at a time. Single-threaded by construction:
//! the session is the only writer of match state, and sources and sinks only
//! ever see the read-only snapshot of a finished tick.

use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::consts;
use crate::sim::{MatchEngine, MatchPhase, PaddleController, Snapshot};
use crate::tuning::Tuning;

/// One-shot player commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Serve and begin playing. Ignored unless the match is Idle.
    Start,
    /// Back to Idle with a fresh match. Ignored unless game over.
    Restart,
    /// End the session after the current tick.
    Quit,
}

/// Everything the control side produced for one tick.
#[derive(Debug, Clone, Default)]
pub struct ControlFrame {
    /// One entry per detected hand: landmark x-coordinates in [0, 1].
    /// Empty when nothing was detected this tick; the paddle then holds.
    pub hands: Vec<Vec<f32>>,
    pub command: Option<Command>,
}

/// The upstream control producer died and cannot recover. Fatal to the
/// session; a tick with no hands is not this, it is an ordinary empty frame.
#[derive(Debug, Error)]
#[error("control source failed: {reason}")]
pub struct SourceFailure {
    pub reason: String,
}

impl SourceFailure {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Produces one control frame per tick. The last published snapshot is
/// passed in so closed-loop sources can react to what was shown.
pub trait ControlSource {
    fn poll(&mut self, view: &Snapshot) -> Result<ControlFrame, SourceFailure>;
}

/// Consumes the snapshot of each finished tick.
pub trait FrameSink {
    fn present(&mut self, snapshot: &Snapshot);
}

/// Counters accumulated over a session, reported when it ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Ticks executed, idle ones included.
    pub ticks: u64,
    /// Lives lost across all matches.
    pub misses: u32,
    /// Matches that reached game over.
    pub matches: u32,
}

/// Owns the engine, the paddle controller, and the two ends of the pipeline.
pub struct Session<S, F> {
    source: S,
    sink: F,
    engine: MatchEngine,
    controller: PaddleController,
    tick_interval: Duration,
    last_snapshot: Snapshot,
    stats: SessionStats,
    quit: bool,
}

impl<S: ControlSource, F: FrameSink> Session<S, F> {
    /// Build a session from validated tuning. The seed feeds the engine's
    /// deflection RNG.
    pub fn new(tuning: &Tuning, seed: u64, source: S, sink: F) -> Self {
        let engine = MatchEngine::new(tuning, seed);
        let controller = PaddleController::new(tuning);
        let last_snapshot = engine.snapshot(controller.rect());
        Self {
            source,
            sink,
            engine,
            controller,
            tick_interval: Duration::from_secs(1) / tuning.tick_hz,
            last_snapshot,
            stats: SessionStats::default(),
            quit: false,
        }
    }

    /// The snapshot published by the most recent tick.
    pub fn last_snapshot(&self) -> &Snapshot {
        &self.last_snapshot
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Run exactly one un-paced tick: poll, track, step, publish, then
    /// apply the frame's command. Commands land after the snapshot, so a
    /// Start issued this tick first moves the ball next tick.
    pub fn step_once(&mut self) -> Result<(), SourceFailure> {
        let frame = self.source.poll(&self.last_snapshot)?;

        // The game-over screen ignores the player's hands.
        if self.engine.phase() != MatchPhase::GameOver {
            for hand in &frame.hands {
                self.controller.track(hand);
            }
        }

        self.engine.step(self.controller.rect());

        let snapshot = self.engine.snapshot(self.controller.rect());
        if snapshot.lives < self.last_snapshot.lives {
            self.stats.misses += u32::from(self.last_snapshot.lives - snapshot.lives);
            log::info!("Miss, {} lives left", snapshot.lives);
        }
        if snapshot.phase != self.last_snapshot.phase {
            log::info!("Phase {:?} -> {:?}", self.last_snapshot.phase, snapshot.phase);
            if snapshot.phase == MatchPhase::GameOver {
                self.stats.matches += 1;
            }
        }
        self.sink.present(&snapshot);
        self.last_snapshot = snapshot;
        self.stats.ticks += 1;

        match frame.command {
            Some(Command::Start) => self.engine.start(),
            Some(Command::Restart) => self.engine.restart(),
            Some(Command::Quit) => self.quit = true,
            None => {}
        }
        Ok(())
    }

    /// Drive ticks at the tuned rate until the source quits or fails. A
    /// slow tick is caught up by running the following ones without sleep;
    /// past a backlog cap the debt is dropped instead of replayed.
    pub fn run(&mut self) -> Result<SessionStats, SourceFailure> {
        let max_lag = self.tick_interval * consts::MAX_CATCHUP_TICKS;
        let mut next_tick = Instant::now() + self.tick_interval;
        loop {
            self.step_once()?;
            if self.quit {
                log::info!(
                    "Session ended: {} ticks, {} misses, {} matches",
                    self.stats.ticks,
                    self.stats.misses,
                    self.stats.matches
                );
                return Ok(self.stats);
            }

            let now = Instant::now();
            if let Some(wait) = next_tick.checked_duration_since(now) {
                thread::sleep(wait);
            } else if now.duration_since(next_tick) > max_lag {
                next_tick = now;
            }
            next_tick += self.tick_interval;
        }
    }
}
