//! A run of chained rounds with a score and a pool of lives.

use serde::Serialize;

use crate::config::{MAX_LIVES, RunMode};
use crate::game::RoundStatus;

/// Whether a run is still going. `Over` is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    /// More rounds will follow.
    Playing,
    /// Out of lives.
    Over,
}

/// Score and lives across several rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    starting_lives: u8,
    lives_remaining: u8,
    score: u32,
    rounds_played: u32,
    status: RunStatus,
}

impl Run {
    /// A fresh run. Lives are clamped to `1..=5`.
    #[must_use]
    pub fn new(lives: u8) -> Self {
        let lives = lives.clamp(1, MAX_LIVES);
        Self {
            starting_lives: lives,
            lives_remaining: lives,
            score: 0,
            rounds_played: 0,
            status: RunStatus::Playing,
        }
    }

    /// The run a mode calls for; classic play has none.
    #[must_use]
    pub fn for_mode(mode: RunMode) -> Option<Self> {
        mode.starting_lives().map(Self::new)
    }

    /// Fold a finished round into the run.
    ///
    /// A win scores a point, a loss costs a life and the run ends at zero
    /// lives. Rounds still in play and anything after the run ended are
    /// ignored.
    pub fn record(&mut self, outcome: RoundStatus) -> RunStatus {
        if self.status == RunStatus::Over {
            return self.status;
        }
        match outcome {
            RoundStatus::Playing => return self.status,
            RoundStatus::Won => self.score += 1,
            RoundStatus::Lost => {
                self.lives_remaining = self.lives_remaining.saturating_sub(1);
                if self.lives_remaining == 0 {
                    self.status = RunStatus::Over;
                }
            }
        }
        self.rounds_played += 1;
        self.status
    }

    /// Rounds won.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Lives left.
    #[must_use]
    pub const fn lives_remaining(&self) -> u8 {
        self.lives_remaining
    }

    /// Lives the run started with; recorded on the leaderboard.
    #[must_use]
    pub const fn starting_lives(&self) -> u8 {
        self.starting_lives
    }

    /// Rounds folded in so far.
    #[must_use]
    pub const fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> RunStatus {
        self.status
    }

    /// Whether the run has ended.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.status == RunStatus::Over
    }
}
