//! Game configuration.

use std::fmt;
use std::time::Duration;

use crate::search::DEFAULT_SUGGESTIONS;

/// Guesses allowed per round unless configured otherwise.
pub const DEFAULT_MAX_GUESSES: u8 = 5;

/// Pause between a finished round and the next one in streak and lives runs.
pub const DEFAULT_NEXT_ROUND_DELAY: Duration = Duration::from_millis(1400);

/// Most lives a run can start with.
pub const MAX_LIVES: u8 = 5;

/// How rounds chain together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RunMode {
    /// Independent rounds, no score kept. The player starts each round.
    #[default]
    Classic,
    /// Rounds chain until the first lost round.
    Streak,
    /// Rounds chain until the given number of rounds is lost.
    Lives(u8),
}

impl RunMode {
    /// Lives mode with the count clamped to `1..=5`.
    #[must_use]
    pub fn lives(count: u8) -> Self {
        Self::Lives(count.clamp(1, MAX_LIVES))
    }

    /// Lives a run starts with, or `None` for classic play.
    #[must_use]
    pub fn starting_lives(self) -> Option<u8> {
        match self {
            Self::Classic => None,
            Self::Streak => Some(1),
            Self::Lives(count) => Some(count.clamp(1, MAX_LIVES)),
        }
    }

    /// Whether rounds are chained into a scored run.
    #[must_use]
    pub fn is_run(self) -> bool {
        !matches!(self, Self::Classic)
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Classic => f.write_str("classic"),
            Self::Streak => f.write_str("streak"),
            Self::Lives(count) => write!(f, "lives ({count})"),
        }
    }
}

/// Settings for a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Guesses per round. Zero is treated as one.
    pub max_guesses: u8,
    /// How rounds chain together.
    pub mode: RunMode,
    /// Delay before the next round starts automatically.
    pub next_round_delay: Duration,
    /// Suggestions offered while typing.
    pub max_suggestions: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_guesses: DEFAULT_MAX_GUESSES,
            mode: RunMode::Classic,
            next_round_delay: DEFAULT_NEXT_ROUND_DELAY,
            max_suggestions: DEFAULT_SUGGESTIONS,
        }
    }
}

impl GameConfig {
    /// Defaults with the given run mode.
    #[must_use]
    pub fn with_mode(mode: RunMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }
}
