use std::collections::BTreeSet;

use tracing::{debug, info};

use crate::round::Round;

/// Outcome of a round at a point in time. Always derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Status {
    Playing,
    Won,
    #[strum(serialize = "Game Over")]
    GameOver,
}

impl Status {
    /// `Won` and `GameOver` are terminal: no transition leaves them.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Status::Playing)
    }
}

/// Derive the status from the round and its mutable state.
///
/// Time running out wins over the sum comparison, so completing the sum on
/// the same step the counter reaches zero is still a loss.
pub fn compute_status(
    numbers: &[u32],
    selected: &BTreeSet<usize>,
    target: u32,
    seconds_remaining: u32,
) -> Status {
    if seconds_remaining == 0 {
        return Status::GameOver;
    }

    let sum: u32 = selected.iter().map(|&i| numbers[i]).sum();

    match sum.cmp(&target) {
        std::cmp::Ordering::Equal => Status::Won,
        std::cmp::Ordering::Greater => Status::GameOver,
        std::cmp::Ordering::Less => Status::Playing,
    }
}

/// Game engine for a single round.
///
/// There is no reset: replaying means dropping this value and building a
/// new one from a fresh [`Round`].
#[derive(Debug, Clone)]
pub struct Game {
    round: Round,
    selected: BTreeSet<usize>,
    seconds_remaining: u32,
    initial_seconds: u32,
}

impl Game {
    pub fn new(round: Round, initial_seconds: u32) -> Self {
        debug!(
            numbers = ?round.numbers(),
            target = round.target(),
            initial_seconds,
            "new game"
        );
        Self {
            round,
            selected: BTreeSet::new(),
            seconds_remaining: initial_seconds,
            initial_seconds,
        }
    }

    pub fn status(&self) -> Status {
        compute_status(
            self.round.numbers(),
            &self.selected,
            self.round.target(),
            self.seconds_remaining,
        )
    }

    /// Select the number at `index`.
    ///
    /// Ignored when the game is over, the index is already selected, or the
    /// index is outside the pool.
    pub fn select(&mut self, index: usize) -> Status {
        let before = self.status();
        if before.is_terminal() || index >= self.round.len() || self.selected.contains(&index) {
            debug!(index, status = %before, "select ignored");
            return before;
        }

        self.selected.insert(index);
        let after = self.status();
        debug!(
            index,
            value = self.round.numbers()[index],
            sum = self.selected_sum(),
            "selected"
        );
        if after.is_terminal() {
            info!(
                status = %after,
                sum = self.selected_sum(),
                target = self.round.target(),
                "round over"
            );
        }
        after
    }

    /// Advance the countdown by one second.
    pub fn tick(&mut self) -> Status {
        let before = self.status();
        if before.is_terminal() {
            return before;
        }

        self.seconds_remaining = self.seconds_remaining.saturating_sub(1);
        let after = self.status();
        if after.is_terminal() {
            info!(status = %after, "round over on tick");
        }
        after
    }

    pub fn numbers(&self) -> &[u32] {
        self.round.numbers()
    }

    pub fn target(&self) -> u32 {
        self.round.target()
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn selected_indices(&self) -> &BTreeSet<usize> {
        &self.selected
    }

    pub fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    pub fn initial_seconds(&self) -> u32 {
        self.initial_seconds
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    /// Whether tapping `index` would have any effect
    pub fn is_selectable(&self, index: usize) -> bool {
        index < self.round.len() && !self.is_selected(index) && !self.is_finished()
    }

    pub fn selected_sum(&self) -> u32 {
        self.selected.iter().map(|&i| self.round.numbers()[i]).sum()
    }

    pub fn is_finished(&self) -> bool {
        self.status().is_terminal()
    }
}
