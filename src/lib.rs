// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Silhouette: guess the country from its outline.
//!
//! This crate provides the game core:
//! - Free-text country lookup that ignores accents, case and punctuation
//! - Great-circle distance and compass direction feedback per guess
//! - Round and run state machines with a deterministic, injectable clock
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │      Session (rounds, runs)         │
//! ├─────────────────────────────────────┤
//! │   Atlas (alias + search indexes)    │
//! ├─────────────────────────────────────┤
//! │  Catalog (reference ⋈ boundaries)   │
//! └─────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Instant;
//!
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use silhouette::geo::MultiPolygon;
//! use silhouette::{Atlas, Catalog, Country, CountryId, GameConfig, LonLat, Session};
//!
//! let country = |id: &str, name: &str, lon: f64, lat: f64| {
//!     Country::new(
//!         CountryId::parse(id).unwrap(),
//!         name,
//!         Vec::new(),
//!         LonLat::new(lon, lat),
//!         MultiPolygon(Vec::new()),
//!     )
//! };
//! let catalog = Catalog::from_countries([
//!     country("FRA", "France", 2.2, 46.2),
//!     country("ESP", "Spain", -3.7, 40.4),
//! ]);
//! let atlas = Arc::new(Atlas::new(catalog));
//! let mut session = Session::new(atlas, GameConfig::default(), ChaCha8Rng::seed_from_u64(1)).unwrap();
//!
//! let guess = session.submit("france", None, Instant::now()).unwrap();
//! assert_eq!(guess.display_name, "France");
//! ```

pub mod alias;
pub mod atlas;
pub mod catalog;
pub mod config;
pub mod error;
pub mod game;
pub mod geo;
pub mod leaderboard;
pub mod search;
pub mod text;

pub use alias::AliasIndex;
pub use atlas::Atlas;
pub use catalog::{Catalog, Country, CountryId};
pub use config::{GameConfig, RunMode};
pub use error::{DatasetError, GuessRejected, LeaderboardError, SessionError, SubmitError};

// Re-export key game types at crate root for convenience
pub use game::{Guess, Round, RoundStatus, Run, RunStatus, Session, StatusMessage, Tone};
pub use geo::{Compass, Comparison, LonLat, Outline, compare, direction_from_to, format_distance, haversine_km};
pub use leaderboard::{Leaderboard, LeaderboardEntry};
pub use search::{SearchIndex, Suggestion};
pub use text::normalize_term;
