use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use hand_pong::*;

/// Plays back a fixed list of frames, then reports empty hands forever.
struct Script {
    frames: VecDeque<Result<ControlFrame, SourceFailure>>,
}

impl Script {
    fn new(frames: Vec<Result<ControlFrame, SourceFailure>>) -> Self {
        Self {
            frames: frames.into(),
        }
    }
}

impl ControlSource for Script {
    fn poll(&mut self, _view: &Snapshot) -> Result<ControlFrame, SourceFailure> {
        self.frames
            .pop_front()
            .unwrap_or_else(|| Ok(ControlFrame::default()))
    }
}

/// Starts the match, restarts a fixed number of times, then quits.
struct Referee {
    restarts: u32,
    last_phase: Option<MatchPhase>,
}

impl ControlSource for Referee {
    fn poll(&mut self, view: &Snapshot) -> Result<ControlFrame, SourceFailure> {
        // The restart tick republishes GameOver, so react to edges only.
        let fresh_game_over =
            view.phase == MatchPhase::GameOver && self.last_phase != Some(MatchPhase::GameOver);
        self.last_phase = Some(view.phase);

        let command = match view.phase {
            MatchPhase::Idle => Some(Command::Start),
            MatchPhase::Playing => None,
            MatchPhase::GameOver if fresh_game_over && self.restarts > 0 => {
                self.restarts -= 1;
                Some(Command::Restart)
            }
            MatchPhase::GameOver if fresh_game_over => Some(Command::Quit),
            MatchPhase::GameOver => None,
        };
        Ok(ControlFrame {
            hands: Vec::new(),
            command,
        })
    }
}

/// Shares every published snapshot with the test body.
#[derive(Clone)]
struct Recorder {
    snapshots: Rc<RefCell<Vec<Snapshot>>>,
}

impl Recorder {
    fn new() -> Self {
        Self {
            snapshots: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl FrameSink for Recorder {
    fn present(&mut self, snapshot: &Snapshot) {
        self.snapshots.borrow_mut().push(snapshot.clone());
    }
}

fn hands(xs: &[f32]) -> Result<ControlFrame, SourceFailure> {
    Ok(ControlFrame {
        hands: vec![xs.to_vec()],
        command: None,
    })
}

fn command(command: Command) -> Result<ControlFrame, SourceFailure> {
    Ok(ControlFrame {
        hands: Vec::new(),
        command: Some(command),
    })
}

#[test]
fn test_start_takes_effect_on_the_next_tick() {
    let tuning = Tuning::default();
    let recorder = Recorder::new();
    let script = Script::new(vec![command(Command::Start)]);
    let mut session = Session::new(&tuning, 7, script, recorder.clone());

    // The tick that polls Start still publishes the idle state.
    session.step_once().unwrap();
    session.step_once().unwrap();

    let snaps = recorder.snapshots.borrow();
    assert_eq!(snaps[0].phase, MatchPhase::Idle);
    assert!(snaps[0].ball.is_none());
    assert_eq!(snaps[0].lives, 3);

    // First simulated tick: serve origin plus one up-right displacement.
    assert_eq!(snaps[1].phase, MatchPhase::Playing);
    let ball = snaps[1].ball.unwrap();
    assert_eq!(ball.min.x, 324.0);
    assert_eq!(ball.min.y, 236.0);
}

#[test]
fn test_absent_hands_hold_the_paddle() {
    let tuning = Tuning::default();
    let recorder = Recorder::new();
    let script = Script::new(vec![command(Command::Start), hands(&[0.5]), hands(&[0.8])]);
    let mut session = Session::new(&tuning, 7, script, recorder.clone());

    for _ in 0..4 {
        session.step_once().unwrap();
    }

    let snaps = recorder.snapshots.borrow();
    // The first sample anchors tracking without moving the paddle.
    assert_eq!(snaps[1].paddle.unwrap().center_x(), 320.0);
    // 0.5 -> 0.8 is a 192-unit swipe across a 640-wide arena.
    assert_eq!(snaps[2].paddle.unwrap().center_x(), 512.0);
    // No hands in frame: the paddle stays where it was.
    assert_eq!(snaps[3].paddle.unwrap().center_x(), 512.0);
}

#[test]
fn test_source_failure_stops_the_session() {
    let tuning = Tuning::default();
    let recorder = Recorder::new();
    let script = Script::new(vec![
        Ok(ControlFrame::default()),
        Ok(ControlFrame::default()),
        Err(SourceFailure::new("camera unplugged")),
    ]);
    let mut session = Session::new(&tuning, 7, script, recorder.clone());

    let err = session.run().unwrap_err();
    assert!(err.to_string().contains("camera unplugged"));
    // The failing tick publishes nothing.
    assert_eq!(recorder.snapshots.borrow().len(), 2);
}

#[test]
fn test_quit_still_publishes_its_final_tick() {
    let tuning = Tuning::default();
    let recorder = Recorder::new();
    let script = Script::new(vec![
        command(Command::Start),
        Ok(ControlFrame::default()),
        command(Command::Quit),
    ]);
    let mut session = Session::new(&tuning, 7, script, recorder.clone());

    let stats = session.run().unwrap();
    assert_eq!(stats.ticks, 3);

    let snaps = recorder.snapshots.borrow();
    assert_eq!(snaps.len(), 3);
    assert_eq!(snaps[2].phase, MatchPhase::Playing);
}

#[test]
fn test_match_runs_to_game_over_and_restarts() {
    // Low ceiling so the untouched ball falls out quickly; the paddle stays
    // parked in the middle and the serve trajectory never crosses it.
    let tuning = Tuning {
        arena_height: 100.0,
        starting_lives: 2,
        tick_hz: 1000,
        ..Tuning::default()
    };
    let recorder = Recorder::new();
    let referee = Referee {
        restarts: 1,
        last_phase: None,
    };
    let mut session = Session::new(&tuning, 7, referee, recorder.clone());

    let stats = session.run().unwrap();
    assert_eq!(stats.matches, 2);
    assert_eq!(stats.misses, 4);

    let snaps = recorder.snapshots.borrow();
    let mut phases: Vec<MatchPhase> = Vec::new();
    for snap in snaps.iter() {
        if phases.last() != Some(&snap.phase) {
            phases.push(snap.phase);
        }
    }
    assert_eq!(
        phases,
        vec![
            MatchPhase::Idle,
            MatchPhase::Playing,
            MatchPhase::GameOver,
            MatchPhase::Idle,
            MatchPhase::Playing,
            MatchPhase::GameOver,
        ]
    );

    // Restart hands back the full set of lives.
    let rematch = snaps
        .iter()
        .skip_while(|snap| snap.phase != MatchPhase::GameOver)
        .find(|snap| snap.phase == MatchPhase::Idle)
        .unwrap();
    assert_eq!(rematch.lives, 2);
}

#[test]
fn test_entities_are_hidden_outside_play() {
    let tuning = Tuning {
        arena_height: 100.0,
        starting_lives: 1,
        ..Tuning::default()
    };
    let recorder = Recorder::new();
    let script = Script::new(vec![command(Command::Start)]);
    let mut session = Session::new(&tuning, 7, script, recorder.clone());

    let mut guard = 0;
    while session.last_snapshot().phase != MatchPhase::GameOver {
        session.step_once().unwrap();
        guard += 1;
        assert!(guard < 200, "match never ended");
    }

    let snaps = recorder.snapshots.borrow();
    for snap in snaps.iter() {
        let live = snap.phase == MatchPhase::Playing;
        assert_eq!(snap.ball.is_some(), live);
        assert_eq!(snap.paddle.is_some(), live);
    }
    assert_eq!(snaps.last().unwrap().lives, 0);

    let stats = session.stats();
    assert_eq!(stats.ticks, snaps.len() as u64);
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.matches, 1);
}
