//! One player's game: the current round, the run around it and the status
//! line a front end shows.

use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use crate::atlas::Atlas;
use crate::catalog::{Country, CountryId};
use crate::config::GameConfig;
use crate::error::{GuessRejected, SessionError, SubmitError};
use crate::game::{Deferred, Guess, Round, RoundStatus, Run, RunStatus};
use crate::leaderboard::LeaderboardEntry;
use crate::search::Suggestion;

const NEW_ROUND: &str = "New round started. Pick your first country guess.";
const NEW_RUN: &str = "New run started. Pick your first country guess.";
const DUPLICATE: &str = "You already guessed that country. Pick a new one.";
const FORFEITED: &str = "Round forfeited.";
const NOT_FOUND: &str = "That input does not match a valid country in this game.";

/// How a status line should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// Neutral progress.
    Info,
    /// The round was won.
    Success,
    /// Input was ignored but nothing went wrong.
    Warning,
    /// Input was rejected or the round was lost.
    Error,
}

/// The single line of feedback shown to the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusMessage {
    /// Presentation hint.
    pub tone: Tone,
    /// Message text.
    pub text: String,
}

impl StatusMessage {
    /// A message with the given tone.
    #[must_use]
    pub fn new(tone: Tone, text: impl Into<String>) -> Self {
        Self {
            tone,
            text: text.into(),
        }
    }
}

/// A running game over a shared [`Atlas`].
#[derive(Debug)]
pub struct Session<R> {
    atlas: Arc<Atlas>,
    config: GameConfig,
    rng: R,
    round: Round,
    run: Option<Run>,
    round_number: u32,
    status: StatusMessage,
    next_round: Deferred<()>,
}

impl<R: Rng> Session<R> {
    /// Start a session with its first round already in play.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::EmptyCatalog`] if the atlas has no countries.
    pub fn new(atlas: Arc<Atlas>, config: GameConfig, mut rng: R) -> Result<Self, SessionError> {
        let round = Round::random(atlas.catalog(), config.max_guesses, &mut rng)?;
        debug!(mode = %config.mode, target = %round.target(), "session started");
        Ok(Self {
            run: Run::for_mode(config.mode),
            atlas,
            config,
            rng,
            round,
            round_number: 1,
            status: StatusMessage::new(Tone::Info, NEW_ROUND),
            next_round: Deferred::new(),
        })
    }

    /// Abandon the current round and draw a new target.
    ///
    /// Cancels a pending automatic round. If the run already ended, a new
    /// run starts instead. In streak and lives runs a round still in play is
    /// forfeited and counts as lost; when that ends the run, no new round is
    /// drawn.
    pub fn start_new_round(&mut self) {
        if self.run.is_some_and(|run| run.is_over()) {
            self.restart_run();
            return;
        }
        self.next_round.cancel();

        if let Some(run) = self.run.as_mut()
            && self.round.forfeit()
        {
            let status = run.record(RoundStatus::Lost);
            let (score, lives) = (run.score(), run.lives_remaining());
            debug!(round = self.round_number, lives, "round forfeited");
            if status == RunStatus::Over {
                info!(score, lives = run.starting_lives(), "run over");
                let name = self.target().map_or("?", |c| c.name.as_str());
                self.status = StatusMessage::new(
                    Tone::Error,
                    format!("{FORFEITED} The country was {name}. Run over with a score of {score}."),
                );
                return;
            }
            self.begin_round();
            self.status = StatusMessage::new(Tone::Warning, format!("{FORFEITED} Lives left: {lives}."));
            return;
        }

        self.begin_round();
    }

    /// Throw away the run and start over from round one.
    pub fn restart_run(&mut self) {
        self.next_round.cancel();
        self.run = Run::for_mode(self.config.mode);
        self.round_number = 0;
        self.begin_round();
        if self.run.is_some() {
            self.status = StatusMessage::new(Tone::Info, NEW_RUN);
        }
    }

    fn begin_round(&mut self) {
        // The catalog was checked to be non-empty in `new` and never changes.
        if let Some(target) = self.atlas.catalog().choose(&mut self.rng) {
            self.round = Round::new(target.id, self.config.max_guesses);
        }
        self.round_number += 1;
        self.status = StatusMessage::new(Tone::Info, NEW_ROUND);
        debug!(round = self.round_number, target = %self.round.target(), "round started");
    }

    /// Suggestions for what the player is typing.
    #[must_use]
    pub fn suggestions(&self, query: &str) -> Vec<Suggestion> {
        self.atlas.suggestions(query, self.config.max_suggestions)
    }

    /// Submit the player's input, optionally with the suggestion they picked.
    ///
    /// Submissions to a finished round are ignored without touching the
    /// status line. A finished round is folded into the run; in streak and
    /// lives runs the next round is scheduled `next_round_delay` after `now`.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::NotFound`] for unrecognised input and
    /// [`SubmitError::Rejected`] for stale or repeated guesses. The round is
    /// unchanged in every error case.
    pub fn submit(&mut self, text: &str, selected: Option<CountryId>, now: Instant) -> Result<Guess, SubmitError> {
        if !self.round.is_playing() {
            return Err(GuessRejected::NotPlaying {
                status: self.round.status(),
            }
            .into());
        }

        let atlas = Arc::clone(&self.atlas);
        let Some(country) = atlas.resolve_input(text, selected) else {
            self.status = StatusMessage::new(Tone::Error, NOT_FOUND);
            return Err(SubmitError::NotFound);
        };
        let target = atlas
            .country(self.round.target())
            .ok_or(SubmitError::NotFound)?;

        let guess = match self.round.submit_guess(country, target) {
            Ok(guess) => guess.clone(),
            Err(rejected) => {
                if matches!(rejected, GuessRejected::Duplicate { .. }) {
                    self.status = StatusMessage::new(Tone::Warning, DUPLICATE);
                }
                return Err(rejected.into());
            }
        };

        let run_status = self.finish_round(now);
        self.status = feedback(&self.round, &guess, target, self.run.as_ref(), run_status);
        Ok(guess)
    }

    fn finish_round(&mut self, now: Instant) -> Option<RunStatus> {
        let outcome = self.round.status();
        if !outcome.is_terminal() {
            return None;
        }
        let run = self.run.as_mut()?;
        let status = run.record(outcome);
        match status {
            RunStatus::Playing => {
                self.next_round.schedule(now + self.config.next_round_delay, ());
            }
            RunStatus::Over => {
                info!(score = run.score(), lives = run.starting_lives(), "run over");
            }
        }
        Some(status)
    }

    /// Advance the clock, starting the scheduled round once it is due.
    ///
    /// Returns whether a new round started.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.next_round.poll(now).is_some() {
            self.begin_round();
            true
        } else {
            false
        }
    }

    /// Time until the scheduled round starts, if one is scheduled.
    #[must_use]
    pub fn next_round_in(&self, now: Instant) -> Option<Duration> {
        self.next_round.remaining(now)
    }

    /// A leaderboard entry for the finished run, if the run is over.
    #[must_use]
    pub fn leaderboard_entry(&self, name: Option<&str>, created_at: i64) -> Option<LeaderboardEntry> {
        self.run
            .filter(Run::is_over)
            .map(|run| LeaderboardEntry::new(name, run.score(), run.starting_lives(), created_at))
    }

    /// Shared country data.
    #[must_use]
    pub fn atlas(&self) -> &Arc<Atlas> {
        &self.atlas
    }

    /// Session settings.
    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The round in play or just finished.
    #[must_use]
    pub const fn round(&self) -> &Round {
        &self.round
    }

    /// The run, outside classic play.
    #[must_use]
    pub const fn run(&self) -> Option<&Run> {
        self.run.as_ref()
    }

    /// 1-based number of the current round within the run.
    #[must_use]
    pub const fn round_number(&self) -> u32 {
        self.round_number
    }

    /// Current status line.
    #[must_use]
    pub const fn status(&self) -> &StatusMessage {
        &self.status
    }

    /// The hidden country of the current round.
    #[must_use]
    pub fn target(&self) -> Option<&Country> {
        self.atlas.country(self.round.target())
    }
}

fn feedback(round: &Round, guess: &Guess, target: &Country, run: Option<&Run>, run_status: Option<RunStatus>) -> StatusMessage {
    match round.status() {
        RoundStatus::Playing => StatusMessage::new(
            Tone::Info,
            format!(
                "{}: {} {} {}",
                guess.display_name,
                guess.distance_text,
                guess.direction_arrow(),
                guess.direction_label()
            ),
        ),
        RoundStatus::Won => {
            let mut text = format!("Correct. {} found in {} guess(es).", target.name, round.guesses().len());
            if let Some(run) = run {
                text.push_str(&format!(" Score: {}.", run.score()));
            }
            StatusMessage::new(Tone::Success, text)
        }
        RoundStatus::Lost => {
            let mut text = format!("Round over. The country was {}.", target.name);
            match (run, run_status) {
                (Some(run), Some(RunStatus::Over)) => {
                    text.push_str(&format!(" Run over with a score of {}.", run.score()));
                }
                (Some(run), _) => text.push_str(&format!(" Lives left: {}.", run.lives_remaining())),
                (None, _) => text.push_str(" Start a new round."),
            }
            StatusMessage::new(Tone::Error, text)
        }
    }
}
