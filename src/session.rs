use std::sync::mpsc::Sender;
use std::time::Duration;

use tracing::{debug, info};

use crate::countdown::{Countdown, TimerState};
use crate::game::{Game, Status};
use crate::round::Round;
use crate::runtime::{GameEvent, RoundId};

/// Timing parameters shared by every round a host starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub number_count: usize,
    pub initial_seconds: u32,
    pub tick_interval: Duration,
}

/// A live round: the engine plus the countdown that feeds it.
///
/// Replaying never mutates a session. The host calls [`Session::discard`]
/// (or drops it) and starts a new one with a fresh [`Round`].
#[derive(Debug)]
pub struct Session {
    id: RoundId,
    game: Game,
    countdown: Countdown,
}

impl Session {
    pub fn start(round: Round, config: &SessionConfig, id: RoundId, tx: Sender<GameEvent>) -> Self {
        let game = Game::new(round, config.initial_seconds);
        let mut countdown = Countdown::start(tx, id, config.tick_interval);
        if game.is_finished() {
            countdown.cancel();
        }
        info!(round = id.0, target = game.target(), "round started");
        Self {
            id,
            game,
            countdown,
        }
    }

    pub fn id(&self) -> RoundId {
        self.id
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn status(&self) -> Status {
        self.game.status()
    }

    pub fn timer_state(&self) -> TimerState {
        self.countdown.state()
    }

    pub fn select(&mut self, index: usize) -> Status {
        let status = self.game.select(index);
        self.stop_timer_if_over(status);
        status
    }

    /// Apply a countdown tick. Ticks addressed to another round are dropped.
    pub fn on_tick(&mut self, round: RoundId) -> Status {
        if round != self.id {
            debug!(stale = round.0, current = self.id.0, "dropping tick from another round");
            return self.game.status();
        }
        let status = self.game.tick();
        self.stop_timer_if_over(status);
        status
    }

    /// End this round for good, stopping its countdown.
    pub fn discard(mut self) {
        if self.countdown.cancel() {
            debug!(round = self.id.0, "discarded while running");
        }
    }

    fn stop_timer_if_over(&mut self, status: Status) {
        if status.is_terminal() {
            self.countdown.cancel();
        }
    }
}
