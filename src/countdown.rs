//! The once-per-second scheduler that drives [`crate::game::Game::tick`].
//!
//! A [`Countdown`] does not touch game state. It only posts
//! [`GameEvent::Tick`] into the host's event queue; the host applies the tick
//! on its own loop. Cancelling stops further posts, and dropping a countdown
//! cancels it, so a discarded round can never keep receiving ticks.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::debug;

use crate::runtime::{GameEvent, RoundId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Running,
    Cancelled,
}

#[derive(Debug)]
pub struct Countdown {
    round: RoundId,
    cancelled: Arc<AtomicBool>,
    state: TimerState,
}

impl Countdown {
    /// Start posting `Tick(round)` to `tx` every `interval`.
    pub fn start(tx: Sender<GameEvent>, round: RoundId, interval: Duration) -> Self {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);

        thread::spawn(move || loop {
            thread::sleep(interval);
            if flag.load(Ordering::Acquire) {
                break;
            }
            if tx.send(GameEvent::Tick(round)).is_err() {
                break;
            }
        });

        debug!(round = round.0, ?interval, "countdown started");
        Self {
            round,
            cancelled,
            state: TimerState::Running,
        }
    }

    /// Stop the countdown. Returns true only for the call that stopped it.
    ///
    /// A tick already in the queue may still be delivered; consumers match
    /// it against the round and the engine ignores ticks once it is over.
    pub fn cancel(&mut self) -> bool {
        if self.state == TimerState::Cancelled {
            return false;
        }
        self.cancelled.store(true, Ordering::Release);
        self.state = TimerState::Cancelled;
        debug!(round = self.round.0, "countdown cancelled");
        true
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn round(&self) -> RoundId {
        self.round
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.cancel();
    }
}
