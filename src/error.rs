//! Error types for dataset loading, guess submission and persistence.
//!
//! Nothing in the game core is fatal. Dataset loading is the only place a
//! hard error reaches the caller; everything else degrades to "no match" or
//! "no-op" and is reported through these types so the caller can show it.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::catalog::CountryId;
use crate::game::RoundStatus;

/// Failure while reading a reference or boundary dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The file is not valid JSON for the expected layout.
    #[error("failed to parse {context}: {source}")]
    Json {
        /// File name or other description of the input.
        context: String,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },
    /// The GeoJSON document or one of its geometries is malformed.
    #[error("invalid GeoJSON in {context}: {source}")]
    GeoJson {
        /// File name or other description of the input.
        context: String,
        /// Underlying GeoJSON error.
        #[source]
        source: Box<geojson::Error>,
    },
    /// Valid GeoJSON, but not a feature collection.
    #[error("expected a FeatureCollection or Topology, found a {0}")]
    Layout(String),
    /// A TopoJSON document is structurally broken.
    #[error("invalid topology: {0}")]
    Topology(String),
}

/// Why a guess was not recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GuessRejected {
    /// The round already finished; the submission is stale.
    #[error("round is not in play (status: {status})")]
    NotPlaying {
        /// Status the round was in.
        status: RoundStatus,
    },
    /// The same country was already guessed in this round.
    #[error("{id} was already guessed this round")]
    Duplicate {
        /// Country that was guessed twice.
        id: CountryId,
    },
}

/// Why a submitted guess was not recorded by a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// The input names no country in the catalog.
    #[error("input does not match a country in this game")]
    NotFound,
    /// The round refused the guess.
    #[error(transparent)]
    Rejected(#[from] GuessRejected),
}

/// Failure while writing the leaderboard.
#[derive(Debug, Error)]
pub enum LeaderboardError {
    /// The leaderboard file could not be written.
    #[error("failed to write {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// Entries could not be encoded.
    #[error("failed to encode leaderboard: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Failure to set up a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    /// There is nothing to pick a target from.
    #[error("the country catalog is empty")]
    EmptyCatalog,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_rejected_display() {
        let id = CountryId::parse("FRA").unwrap();
        let err = GuessRejected::Duplicate { id };
        assert_eq!(err.to_string(), "FRA was already guessed this round");

        let err = GuessRejected::NotPlaying {
            status: RoundStatus::Won,
        };
        assert!(err.to_string().contains("won"));
    }

    #[test]
    fn test_dataset_error_carries_path() {
        let err = DatasetError::Io {
            path: PathBuf::from("data/countries.json"),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.to_string().contains("data/countries.json"));
    }

    #[test]
    fn test_layout_error_names_found_layout() {
        let err = DatasetError::Layout("bare geometry".to_string());
        assert_eq!(
            err.to_string(),
            "expected a FeatureCollection or Topology, found a bare geometry"
        );
    }
}
