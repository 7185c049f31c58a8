use std::time::Duration;

use target_sum::countdown::TimerState;
use target_sum::game::Status;
use target_sum::round::Round;
use target_sum::runtime::{FixedTicker, GameEvent, RoundId, Runner, TestEventSource};
use target_sum::session::{Session, SessionConfig};

fn scenario_round() -> Round {
    Round::from_parts(vec![4, 7, 2, 9, 1, 3], 22)
}

// Headless integration using the runtime + a real countdown without a TTY.
#[test]
fn headless_countdown_runs_out() {
    let runner = Runner::new(
        TestEventSource::new(),
        FixedTicker::new(Duration::from_millis(5)),
    );
    let config = SessionConfig {
        number_count: 6,
        initial_seconds: 3,
        tick_interval: Duration::from_millis(5),
    };
    let mut session = Session::start(scenario_round(), &config, RoundId(1), runner.sender());

    let mut ticks = 0;
    for _ in 0..1000u32 {
        if let GameEvent::Tick(round) = runner.step() {
            ticks += 1;
            session.on_tick(round);
        }
        if session.status().is_terminal() {
            break;
        }
    }

    assert_eq!(ticks, 3);
    assert_eq!(session.status(), Status::GameOver);
    assert_eq!(session.game().seconds_remaining(), 0);
    assert_eq!(session.timer_state(), TimerState::Cancelled);

    // Anything still in flight is absorbed without effect.
    for _ in 0..5 {
        if let GameEvent::Tick(round) = runner.step() {
            session.on_tick(round);
        }
    }
    assert_eq!(session.game().seconds_remaining(), 0);
    assert_eq!(session.status(), Status::GameOver);
}

#[test]
fn headless_taps_interleaved_with_ticks() {
    let runner = Runner::new(
        TestEventSource::new(),
        FixedTicker::new(Duration::from_millis(5)),
    );
    let config = SessionConfig {
        number_count: 6,
        initial_seconds: 10,
        // ticks are injected by hand below
        tick_interval: Duration::from_secs(60),
    };
    let mut session = Session::start(scenario_round(), &config, RoundId(1), runner.sender());

    let tx = runner.sender();
    tx.send(GameEvent::Tick(RoundId(1))).unwrap();
    tx.send(GameEvent::Tick(RoundId(1))).unwrap();

    let taps = [3usize, 2, 1, 0];
    let mut next_tap = 0;
    for _ in 0..20u32 {
        match runner.step() {
            GameEvent::Tick(round) => {
                session.on_tick(round);
            }
            GameEvent::Frame => {
                if next_tap < taps.len() {
                    session.select(taps[next_tap]);
                    next_tap += 1;
                }
            }
            _ => {}
        }
        if session.status().is_terminal() {
            break;
        }
    }

    assert_eq!(session.status(), Status::Won);
    assert_eq!(session.game().seconds_remaining(), 8);
    assert_eq!(session.timer_state(), TimerState::Cancelled);
}

#[test]
fn headless_overshoot_scenario() {
    let config = SessionConfig {
        number_count: 6,
        initial_seconds: 10,
        tick_interval: Duration::from_secs(60),
    };
    let (tx, _rx) = std::sync::mpsc::channel();
    let mut session = Session::start(scenario_round(), &config, RoundId(1), tx);

    assert_eq!(session.select(3), Status::Playing); // 9
    assert_eq!(session.select(3), Status::Playing); // duplicate tap
    assert_eq!(session.select(1), Status::Playing); // 16
    assert_eq!(session.select(4), Status::Playing); // 17
    assert_eq!(session.select(5), Status::Playing); // 20
    assert_eq!(session.select(2), Status::Won); // 22 exactly

    // a fresh attempt that passes the target instead
    let (tx, _rx) = std::sync::mpsc::channel();
    let mut session = Session::start(scenario_round(), &config, RoundId(2), tx);
    for i in [3, 1, 4, 5] {
        session.select(i);
    }
    assert_eq!(session.select(0), Status::GameOver); // 24
    assert_eq!(session.timer_state(), TimerState::Cancelled);
}
