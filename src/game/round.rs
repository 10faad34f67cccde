//! A single round: one hidden target, a bounded number of guesses.

use std::fmt;

use rand::Rng;
use serde::Serialize;

use crate::catalog::{Catalog, Country, CountryId};
use crate::error::{GuessRejected, SessionError};
use crate::geo::{Compass, compare};

/// Where a round stands. `Won` and `Lost` are final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundStatus {
    /// Guesses are still accepted.
    Playing,
    /// The target was guessed.
    Won,
    /// The guesses ran out.
    Lost,
}

impl RoundStatus {
    /// Whether the round has finished.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Playing)
    }
}

impl fmt::Display for RoundStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Playing => "playing",
            Self::Won => "won",
            Self::Lost => "lost",
        })
    }
}

/// A recorded guess with its feedback. Never changes once recorded.
///
/// Serializes the direction as separate `directionLabel` and
/// `directionArrow` fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "GuessRecord")]
pub struct Guess {
    /// Guessed country.
    pub country_id: CountryId,
    /// Its canonical name at the time of guessing.
    pub display_name: String,
    /// Centroid distance to the target.
    pub distance_km: f64,
    /// Formatted distance, e.g. `"1,234 km"`.
    pub distance_text: String,
    /// Direction from the guess towards the target.
    pub direction: Compass,
    /// Whether this guess was the target.
    pub correct: bool,
}

impl Guess {
    /// Label of the direction, e.g. `"SW"`.
    #[must_use]
    pub const fn direction_label(&self) -> &'static str {
        self.direction.label()
    }

    /// Arrow glyph of the direction.
    #[must_use]
    pub const fn direction_arrow(&self) -> &'static str {
        self.direction.arrow()
    }
}

/// Wire form of a [`Guess`].
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GuessRecord {
    country_id: CountryId,
    display_name: String,
    distance_km: f64,
    distance_text: String,
    direction_label: &'static str,
    direction_arrow: &'static str,
    correct: bool,
}

impl From<Guess> for GuessRecord {
    fn from(guess: Guess) -> Self {
        Self {
            direction_label: guess.direction_label(),
            direction_arrow: guess.direction_arrow(),
            country_id: guess.country_id,
            display_name: guess.display_name,
            distance_km: guess.distance_km,
            distance_text: guess.distance_text,
            correct: guess.correct,
        }
    }
}

/// One round of play.
#[derive(Debug, Clone)]
pub struct Round {
    target: CountryId,
    max_guesses: u8,
    guesses: Vec<Guess>,
    status: RoundStatus,
}

impl Round {
    /// Start a round for a known target. A limit of zero is raised to one.
    #[must_use]
    pub fn new(target: CountryId, max_guesses: u8) -> Self {
        let max_guesses = max_guesses.max(1);
        Self {
            target,
            max_guesses,
            guesses: Vec::with_capacity(usize::from(max_guesses)),
            status: RoundStatus::Playing,
        }
    }

    /// Start a round with a target drawn uniformly from the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::EmptyCatalog`] if there is nothing to draw.
    pub fn random<R: Rng + ?Sized>(
        catalog: &Catalog,
        max_guesses: u8,
        rng: &mut R,
    ) -> Result<Self, SessionError> {
        let target = catalog.choose(rng).ok_or(SessionError::EmptyCatalog)?;
        Ok(Self::new(target.id, max_guesses))
    }

    /// The hidden country.
    #[must_use]
    pub const fn target(&self) -> CountryId {
        self.target
    }

    /// Guesses allowed in this round.
    #[must_use]
    pub const fn max_guesses(&self) -> u8 {
        self.max_guesses
    }

    /// Guesses so far, oldest first.
    #[must_use]
    pub fn guesses(&self) -> &[Guess] {
        &self.guesses
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> RoundStatus {
        self.status
    }

    /// Whether guesses are still accepted.
    #[must_use]
    pub const fn is_playing(&self) -> bool {
        matches!(self.status, RoundStatus::Playing)
    }

    /// Guesses left before the round is lost.
    #[must_use]
    pub fn guesses_remaining(&self) -> usize {
        usize::from(self.max_guesses).saturating_sub(self.guesses.len())
    }

    /// Whether a country was already guessed this round.
    #[must_use]
    pub fn has_guessed(&self, id: CountryId) -> bool {
        self.guesses.iter().any(|guess| guess.country_id == id)
    }

    /// End a round still in play as lost.
    ///
    /// Returns whether the round was in play. A finished round is left as it
    /// was.
    pub fn forfeit(&mut self) -> bool {
        if self.is_playing() {
            self.status = RoundStatus::Lost;
            true
        } else {
            false
        }
    }

    /// Record a guess against `target`, which must be this round's target.
    ///
    /// A finished round rejects everything before any other check, so stale
    /// submissions never surface as duplicates.
    ///
    /// # Errors
    ///
    /// Returns [`GuessRejected::NotPlaying`] once the round has finished and
    /// [`GuessRejected::Duplicate`] for a repeated country. The round is
    /// unchanged in both cases.
    pub fn submit_guess(&mut self, guess: &Country, target: &Country) -> Result<&Guess, GuessRejected> {
        if !self.is_playing() {
            return Err(GuessRejected::NotPlaying {
                status: self.status,
            });
        }
        if self.has_guessed(guess.id) {
            return Err(GuessRejected::Duplicate { id: guess.id });
        }
        debug_assert_eq!(target.id, self.target);

        let comparison = compare(guess, target);
        let correct = guess.id == self.target;

        if correct {
            self.status = RoundStatus::Won;
        } else if self.guesses.len() + 1 >= usize::from(self.max_guesses) {
            self.status = RoundStatus::Lost;
        }

        let index = self.guesses.len();
        self.guesses.push(Guess {
            country_id: guess.id,
            display_name: guess.name.clone(),
            distance_km: comparison.distance_km,
            distance_text: comparison.distance_text,
            direction: comparison.direction,
            correct,
        });
        Ok(&self.guesses[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::{LonLat, MultiPolygon};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn country(id: &str, lon: f64, lat: f64) -> Country {
        Country::new(
            CountryId::parse(id).unwrap(),
            format!("Country {id}"),
            Vec::new(),
            LonLat::new(lon, lat),
            MultiPolygon(Vec::new()),
        )
    }

    #[test]
    fn test_correct_guess_wins_immediately() {
        let target = country("TGT", 10.0, 10.0);
        let mut round = Round::new(target.id, 5);

        let guess = round.submit_guess(&target, &target).unwrap();
        assert!(guess.correct);
        assert_eq!(guess.distance_text, "0 km");
        assert_eq!(guess.direction, Compass::Here);
        assert_eq!(round.status(), RoundStatus::Won);
        assert_eq!(round.guesses().len(), 1);
    }

    #[test]
    fn test_running_out_of_guesses_loses() {
        let target = country("TGT", 0.0, 0.0);
        let mut round = Round::new(target.id, 3);

        for (i, id) in ["AAA", "BBB", "CCC"].iter().enumerate() {
            assert_eq!(round.status(), RoundStatus::Playing);
            let miss = country(id, 15.0 + f64::from(u8::try_from(i).unwrap()), 0.0);
            let guess = round.submit_guess(&miss, &target).unwrap();
            assert!(!guess.correct);
            assert_eq!(guess.direction, Compass::W);
        }
        assert_eq!(round.status(), RoundStatus::Lost);
        assert_eq!(round.guesses_remaining(), 0);
    }

    #[test]
    fn test_guess_serializes_label_and_arrow() {
        let target = country("TGT", 0.0, 0.0);
        let miss = country("AAA", 15.0, 0.0);
        let mut round = Round::new(target.id, 5);
        let guess = round.submit_guess(&miss, &target).unwrap();

        let value = serde_json::to_value(guess).unwrap();
        assert_eq!(value["countryId"], "AAA");
        assert_eq!(value["displayName"], "Country AAA");
        assert_eq!(value["directionLabel"], "W");
        assert_eq!(value["directionArrow"], Compass::W.arrow());
        assert_eq!(value["correct"], false);
        assert!(value.get("direction").is_none());
    }

    #[test]
    fn test_forfeit_only_ends_a_round_in_play() {
        let target = country("TGT", 0.0, 0.0);
        let mut round = Round::new(target.id, 5);
        assert!(round.forfeit());
        assert_eq!(round.status(), RoundStatus::Lost);
        assert!(!round.forfeit());

        let mut won = Round::new(target.id, 5);
        won.submit_guess(&target, &target).unwrap();
        assert!(!won.forfeit());
        assert_eq!(won.status(), RoundStatus::Won);
    }

    #[test]
    fn test_duplicate_is_rejected_without_change() {
        let target = country("TGT", 0.0, 0.0);
        let miss = country("AAA", 5.0, 5.0);
        let mut round = Round::new(target.id, 5);

        round.submit_guess(&miss, &target).unwrap();
        let err = round.submit_guess(&miss, &target).unwrap_err();
        assert_eq!(err, GuessRejected::Duplicate { id: miss.id });
        assert_eq!(round.guesses().len(), 1);
        assert_eq!(round.status(), RoundStatus::Playing);
    }

    #[test]
    fn test_finished_round_rejects_before_duplicate_check() {
        let target = country("TGT", 0.0, 0.0);
        let mut round = Round::new(target.id, 5);
        round.submit_guess(&target, &target).unwrap();

        let err = round.submit_guess(&target, &target).unwrap_err();
        assert_eq!(
            err,
            GuessRejected::NotPlaying {
                status: RoundStatus::Won
            }
        );
        assert_eq!(round.guesses().len(), 1);
    }

    #[test]
    fn test_zero_max_guesses_is_raised() {
        let round = Round::new(CountryId::parse("TGT").unwrap(), 0);
        assert_eq!(round.max_guesses(), 1);
    }

    #[test]
    fn test_random_round_uses_injected_rng() {
        let catalog = Catalog::from_countries(vec![
            country("AAA", 0.0, 0.0),
            country("BBB", 1.0, 0.0),
            country("CCC", 2.0, 0.0),
        ]);
        let mut a = ChaCha8Rng::seed_from_u64(42);
        let mut b = ChaCha8Rng::seed_from_u64(42);
        let first = Round::random(&catalog, 5, &mut a).unwrap();
        let second = Round::random(&catalog, 5, &mut b).unwrap();
        assert_eq!(first.target(), second.target());
        assert!(first.guesses().is_empty());

        assert_eq!(
            Round::random(&Catalog::default(), 5, &mut a).unwrap_err(),
            SessionError::EmptyCatalog
        );
    }
}
