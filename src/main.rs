//! Demo binary: an autopilot plays the match against itself
//!
//! No camera here - the control source synthesizes hand landmarks from the
//! published snapshots, closing the same loop a real hand tracker would.
//! Snapshots go to the log as JSON lines.

use std::time::{SystemTime, UNIX_EPOCH};

use hand_pong::{
    Command, ControlFrame, ControlSource, FrameSink, MatchPhase, Session, Snapshot, SourceFailure,
    Tuning,
};

/// How many restarts the autopilot spends before quitting.
const MATCH_BUDGET: u32 = 3;
/// Hard cap on demo length, in ticks.
const TICK_BUDGET: u64 = 10_000;

/// Synthetic player: nudges a virtual hand toward the ball with a small
/// lead and a wobble, so rallies vary without ever settling into a loop.
struct Autopilot {
    arena_width: f32,
    /// Normalized hand position, the value a tracker would report.
    hand_x: f32,
    prev_ball_x: Option<f32>,
    matches_left: u32,
    last_phase: Option<MatchPhase>,
    ticks: u64,
    tick_budget: u64,
}

impl Autopilot {
    fn new(tuning: &Tuning, matches: u32, tick_budget: u64) -> Self {
        Self {
            arena_width: tuning.arena_width,
            hand_x: 0.5,
            prev_ball_x: None,
            matches_left: matches,
            last_phase: None,
            ticks: 0,
            tick_budget,
        }
    }
}

impl ControlSource for Autopilot {
    fn poll(&mut self, view: &Snapshot) -> Result<ControlFrame, SourceFailure> {
        self.ticks += 1;
        if self.ticks >= self.tick_budget {
            return Ok(ControlFrame {
                hands: Vec::new(),
                command: Some(Command::Quit),
            });
        }

        // The restart tick republishes GameOver, so react to edges only.
        let fresh_game_over =
            view.phase == MatchPhase::GameOver && self.last_phase != Some(MatchPhase::GameOver);
        self.last_phase = Some(view.phase);

        let command = match view.phase {
            MatchPhase::Idle => Some(Command::Start),
            MatchPhase::Playing => None,
            MatchPhase::GameOver if fresh_game_over && self.matches_left > 0 => {
                self.matches_left -= 1;
                Some(Command::Restart)
            }
            MatchPhase::GameOver if fresh_game_over => Some(Command::Quit),
            MatchPhase::GameOver => None,
        };

        // Every few ticks the hand "leaves the frame", exercising the
        // paddle-hold path.
        if self.ticks % 7 == 0 {
            return Ok(ControlFrame {
                hands: Vec::new(),
                command,
            });
        }

        if let (Some(ball), Some(paddle)) = (view.ball, view.paddle) {
            let ball_x = ball.center_x();
            let drift = match self.prev_ball_x {
                Some(prev) => ball_x - prev,
                None => 0.0,
            };
            self.prev_ball_x = Some(ball_x);

            // The player looks away for a second every few seconds, so
            // rallies end and the match actually runs out of lives.
            let lapsed = (self.ticks / 60) % 7 == 6;
            if !lapsed {
                // Aim a little ahead of the ball, plus a two-sine wobble.
                let t = self.ticks as f32 * 0.01;
                let wobble = t.sin() * 24.0 + (t * 0.7).sin() * 12.0;
                let target = ball_x + drift * 6.0 + wobble;

                let error = target - paddle.center_x();
                let step = (error / self.arena_width).clamp(-0.04, 0.04);
                self.hand_x = (self.hand_x + step).clamp(0.0, 1.0);
            }
        } else {
            self.prev_ball_x = None;
        }

        // Three landmarks around the wrist, averaging back to hand_x.
        let hand = vec![self.hand_x - 0.01, self.hand_x, self.hand_x + 0.01];
        Ok(ControlFrame {
            hands: vec![hand],
            command,
        })
    }
}

/// Logs snapshots as JSON lines: every phase edge at info, and a steady
/// sample of the rally at debug.
struct JsonlSink {
    every: u64,
    ticks: u64,
    last_phase: Option<MatchPhase>,
}

impl JsonlSink {
    fn new(every: u64) -> Self {
        Self {
            every,
            ticks: 0,
            last_phase: None,
        }
    }
}

impl FrameSink for JsonlSink {
    fn present(&mut self, snapshot: &Snapshot) {
        self.ticks += 1;
        if self.last_phase != Some(snapshot.phase) {
            if let Ok(line) = serde_json::to_string(snapshot) {
                log::info!("{}", line);
            }
            self.last_phase = Some(snapshot.phase);
        } else if self.every > 0 && self.ticks % self.every == 0 {
            if let Ok(line) = serde_json::to_string(snapshot) {
                log::debug!("{}", line);
            }
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("Hand Pong demo starting...");

    let tuning = Tuning::load();
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    log::info!("Session seed: {}", seed);

    let autopilot = Autopilot::new(&tuning, MATCH_BUDGET, TICK_BUDGET);
    let mut session = Session::new(&tuning, seed, autopilot, JsonlSink::new(60));
    match session.run() {
        Ok(stats) => log::info!(
            "Demo finished: {} ticks, {} misses, {} matches",
            stats.ticks,
            stats.misses,
            stats.matches
        ),
        Err(err) => {
            log::error!("{}", err);
            std::process::exit(1);
        }
    }
}
