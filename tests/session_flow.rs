//! Full game sessions over the bundled dataset with a seeded RNG and a
//! hand-driven clock.
//!
//! Run with: cargo test --test session_flow

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use silhouette::{
    Atlas, CountryId, GameConfig, GuessRejected, RoundStatus, RunMode, RunStatus, Session, SubmitError, Tone,
};

fn atlas() -> Arc<Atlas> {
    let data = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data");
    Arc::new(Atlas::load(&data.join("countries.json"), &data.join("boundaries.geojson")).unwrap())
}

fn session(mode: RunMode, max_guesses: u8, seed: u64) -> Session<ChaCha8Rng> {
    let config = GameConfig {
        max_guesses,
        ..GameConfig::with_mode(mode)
    };
    Session::new(atlas(), config, ChaCha8Rng::seed_from_u64(seed)).unwrap()
}

/// Names of countries other than the current target, in catalog order.
fn wrong_names(session: &Session<ChaCha8Rng>) -> Vec<String> {
    let target = session.round().target();
    session
        .atlas()
        .catalog()
        .iter()
        .filter(|c| c.id != target)
        .map(|c| c.name.clone())
        .collect()
}

fn target_name(session: &Session<ChaCha8Rng>) -> String {
    session.target().unwrap().name.clone()
}

fn lose_round(session: &mut Session<ChaCha8Rng>, now: Instant) {
    let wrong = wrong_names(session);
    for name in wrong.iter().take(usize::from(session.round().max_guesses())) {
        session.submit(name, None, now).unwrap();
    }
    assert_eq!(session.round().status(), RoundStatus::Lost);
}

#[test]
fn test_same_seed_same_targets() {
    let mut a = session(RunMode::Classic, 5, 42);
    let mut b = session(RunMode::Classic, 5, 42);
    for _ in 0..10 {
        assert_eq!(a.round().target(), b.round().target());
        a.start_new_round();
        b.start_new_round();
    }
}

#[test]
fn test_classic_round_is_won_by_alias() {
    let mut session = session(RunMode::Classic, 5, 7);
    let start = Instant::now();

    let wrong = wrong_names(&session);
    let first = session.submit(&wrong[0], None, start).unwrap();
    assert!(!first.correct);
    assert!(first.distance_km > 0.0);
    assert_eq!(session.status().tone, Tone::Info);
    assert_eq!(session.round().guesses_remaining(), 4);

    let target = session.target().unwrap();
    let upper = target.name.to_uppercase();
    let guess = session.submit(&upper, None, start).unwrap();
    assert!(guess.correct);
    assert!(guess.distance_km.abs() < f64::EPSILON);
    assert_eq!(session.round().status(), RoundStatus::Won);
    assert_eq!(session.status().tone, Tone::Success);

    // Classic rounds never advance by themselves.
    assert!(session.next_round_in(start).is_none());
    assert!(!session.tick(start + Duration::from_secs(60)));

    let stale = session.submit(&wrong[1], None, start).unwrap_err();
    assert!(matches!(
        stale,
        SubmitError::Rejected(GuessRejected::NotPlaying {
            status: RoundStatus::Won
        })
    ));
}

#[test]
fn test_unknown_and_duplicate_input_keep_the_round() {
    let mut session = session(RunMode::Classic, 3, 11);
    let now = Instant::now();

    assert!(matches!(session.submit("Atlantis", None, now), Err(SubmitError::NotFound)));
    assert_eq!(session.status().tone, Tone::Error);
    assert!(session.round().guesses().is_empty());

    let wrong = wrong_names(&session);
    session.submit(&wrong[0], None, now).unwrap();
    let again = session.submit(&wrong[0].to_lowercase(), None, now).unwrap_err();
    assert!(matches!(again, SubmitError::Rejected(GuessRejected::Duplicate { .. })));
    assert_eq!(session.status().tone, Tone::Warning);
    assert_eq!(session.round().guesses().len(), 1);
}

#[test]
fn test_stale_selection_falls_back_to_typed_text() {
    let mut session = session(RunMode::Classic, 5, 5);
    let now = Instant::now();
    let target = session.round().target();
    let name = target_name(&session);

    // The picked suggestion counts only when the text still matches it.
    let other = session
        .atlas()
        .catalog()
        .iter()
        .find(|c| c.id != target)
        .map(|c| c.id)
        .unwrap();
    let guess = session.submit(&name, Some(other), now).unwrap();
    assert_eq!(guess.country_id, target);
    assert!(guess.correct);
}

#[test]
fn test_lives_run_counts_down_and_ends() {
    let mut session = session(RunMode::lives(2), 2, 3);
    let mut now = Instant::now();
    let delay = session.config().next_round_delay;

    // Win the first round.
    let name = target_name(&session);
    session.submit(&name, None, now).unwrap();
    assert_eq!(session.run().unwrap().score(), 1);
    assert!(session.status().text.contains("Score: 1."));
    assert_eq!(session.next_round_in(now), Some(delay));

    assert!(!session.tick(now + delay / 2));
    now += delay;
    assert!(session.tick(now));
    assert_eq!(session.round_number(), 2);
    assert_eq!(session.round().status(), RoundStatus::Playing);

    // First loss leaves one life.
    lose_round(&mut session, now);
    let run = *session.run().unwrap();
    assert_eq!(run.lives_remaining(), 1);
    assert_eq!(run.status(), RunStatus::Playing);
    assert!(session.status().text.contains("Lives left: 1."));

    now += delay;
    assert!(session.tick(now));
    assert_eq!(session.round_number(), 3);

    // Second loss ends the run.
    lose_round(&mut session, now);
    let run = *session.run().unwrap();
    assert!(run.is_over());
    assert_eq!(run.score(), 1);
    assert_eq!(run.rounds_played(), 3);
    assert!(session.status().text.contains("Run over with a score of 1."));
    assert!(session.next_round_in(now).is_none());
    assert!(!session.tick(now + delay * 10));

    let entry = session.leaderboard_entry(Some("  Ada  "), 1_000).unwrap();
    assert_eq!(entry.name, "Ada");
    assert_eq!(entry.score, 1);
    assert_eq!(entry.difficulty_or_lives, 2);

    // A new round after the run ends starts a fresh run.
    session.start_new_round();
    assert_eq!(session.round_number(), 1);
    let run = *session.run().unwrap();
    assert_eq!(run.score(), 0);
    assert_eq!(run.lives_remaining(), 2);
    assert!(session.leaderboard_entry(None, 0).is_none());
}

#[test]
fn test_manual_round_cancels_the_scheduled_one() {
    let mut session = session(RunMode::Streak, 5, 9);
    let now = Instant::now();

    let name = target_name(&session);
    session.submit(&name, None, now).unwrap();
    assert!(session.next_round_in(now).is_some());

    session.start_new_round();
    assert_eq!(session.round_number(), 2);
    assert!(session.next_round_in(now).is_none());
    assert!(!session.tick(now + Duration::from_secs(60)));
    assert_eq!(session.round_number(), 2);
}

#[test]
fn test_repeated_skipping_cannot_outlast_the_lives() {
    let mut session = session(RunMode::Lives(1), 2, 13);
    let now = Instant::now();

    for _ in 0..50 {
        if session.run().unwrap().is_over() {
            break;
        }
        let wrong = wrong_names(&session);
        session.submit(&wrong[0], None, now).unwrap();
        session.start_new_round();
    }

    let run = *session.run().unwrap();
    assert!(run.is_over());
    assert_eq!(run.lives_remaining(), 0);
    assert_eq!(run.rounds_played(), 1);
    assert_eq!(session.round_number(), 1);
    assert_eq!(session.round().status(), RoundStatus::Lost);
    assert!(session.status().text.contains("Run over with a score of 0."));
    assert!(session.leaderboard_entry(None, 0).is_some());
}

#[test]
fn test_skipping_an_untouched_round_still_counts() {
    let mut session = session(RunMode::Streak, 5, 17);
    session.start_new_round();
    let run = *session.run().unwrap();
    assert_eq!(run.status(), RunStatus::Over);
    assert_eq!(run.rounds_played(), 1);
}

#[test]
fn test_streak_ends_on_first_loss() {
    let mut session = session(RunMode::Streak, 1, 21);
    let now = Instant::now();

    lose_round(&mut session, now);
    let run = *session.run().unwrap();
    assert!(run.is_over());
    assert_eq!(run.score(), 0);
    assert_eq!(session.leaderboard_entry(None, 5).unwrap().name, "Anonymous");
}

#[test]
fn test_session_ids_are_catalog_members() {
    let mut session = session(RunMode::Classic, 5, 1);
    for _ in 0..25 {
        let target: CountryId = session.round().target();
        assert!(session.atlas().country(target).is_some());
        session.start_new_round();
    }
}
