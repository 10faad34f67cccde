#![no_main]

use libfuzzer_sys::fuzz_target;
use silhouette::leaderboard::{Leaderboard, MAX_ENTRIES, MAX_NAME_CHARS};

fuzz_target!(|text: &str| {
    // Whatever is on disk, loading yields a valid board.
    let board = Leaderboard::from_json_str(text);
    assert!(board.len() <= MAX_ENTRIES);
    for entry in board.entries() {
        assert!(!entry.name.is_empty() && entry.name.chars().count() <= MAX_NAME_CHARS);
        assert!((1..=5).contains(&entry.difficulty_or_lives));
    }
    for pair in board.entries().windows(2) {
        assert!(pair[0].score >= pair[1].score, "Board is not ranked");
    }

    // Saving and reloading is lossless.
    let json = board.to_json().unwrap();
    assert_eq!(Leaderboard::from_json_str(&json), board);
});
