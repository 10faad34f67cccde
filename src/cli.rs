//! CLI command implementations for Silhouette.

pub(crate) mod compare;
pub(crate) mod countries;
pub(crate) mod leaderboard;
pub(crate) mod outline;
pub(crate) mod play;
pub(crate) mod resolve;

mod output;

use clap::ValueEnum;
use silhouette::{Atlas, Country, RunMode};
use std::error::Error;
use std::fmt;
use std::path::PathBuf;

/// Output format for the inspection commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Output format for the `outline` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutlineFormat {
    /// Filled character grid.
    Ascii,
    /// SVG path data fitted to the silhouette card.
    Svg,
}

/// Run mode for the `play` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ModeArg {
    /// Independent rounds.
    Classic,
    /// Chain rounds until the first loss.
    Streak,
    /// Chain rounds until the lives run out.
    Lives,
}

impl ModeArg {
    /// The library run mode, with `lives` used by lives mode only.
    pub(crate) fn into_run_mode(self, lives: u8) -> RunMode {
        match self {
            Self::Classic => RunMode::Classic,
            Self::Streak => RunMode::Streak,
            Self::Lives => RunMode::lives(lives),
        }
    }
}

/// Where the datasets and the leaderboard live.
#[derive(Debug, Clone)]
pub(crate) struct DataPaths {
    /// Reference countries JSON.
    pub(crate) countries: PathBuf,
    /// Boundary GeoJSON or TopoJSON.
    pub(crate) boundaries: PathBuf,
    /// Leaderboard JSON.
    pub(crate) leaderboard: PathBuf,
}

impl DataPaths {
    /// Load and index both datasets.
    pub(crate) fn load_atlas(&self) -> Result<Atlas, CliError> {
        let atlas = Atlas::load(&self.countries, &self.boundaries)?;
        if atlas.catalog().is_empty() {
            return Err(CliError::new(format!(
                "No playable countries in {} and {}",
                self.countries.display(),
                self.boundaries.display()
            )));
        }
        Ok(atlas)
    }
}

/// Resolve a command-line country argument or fail with a readable message.
pub(crate) fn require_country<'a>(atlas: &'a Atlas, text: &str) -> Result<&'a Country, CliError> {
    atlas
        .resolve(text)
        .ok_or_else(|| CliError::new(format!("No country matches \"{text}\"")))
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<silhouette::DatasetError> for CliError {
    fn from(e: silhouette::DatasetError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<silhouette::LeaderboardError> for CliError {
    fn from(e: silhouette::LeaderboardError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<silhouette::SessionError> for CliError {
    fn from(e: silhouette::SessionError) -> Self {
        Self::new(e.to_string())
    }
}
