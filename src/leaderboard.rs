//! Local high-score table.
//!
//! The table is a JSON array of `{ name, score, difficultyOrLives, createdAt }`
//! objects. Reading is forgiving: malformed entries are dropped and an
//! unreadable file is an empty table, so a corrupt file never stops a game.

use std::cmp::Ordering;
use std::fs;
use std::io;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::MAX_LIVES;
use crate::error::LeaderboardError;

/// Entries kept on the board.
pub const MAX_ENTRIES: usize = 5;

/// Longest stored player name, in characters.
pub const MAX_NAME_CHARS: usize = 24;

/// Name used when the player leaves it blank.
pub const DEFAULT_NAME: &str = "Anonymous";

/// One finished run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    /// Sanitized player name.
    pub name: String,
    /// Rounds won.
    pub score: u32,
    /// Lives the run started with, `1..=5`.
    pub difficulty_or_lives: u8,
    /// Milliseconds since the Unix epoch.
    pub created_at: i64,
}

impl LeaderboardEntry {
    /// Build an entry, sanitizing the name and clamping the lives.
    #[must_use]
    pub fn new(name: Option<&str>, score: u32, difficulty_or_lives: u8, created_at: i64) -> Self {
        Self {
            name: sanitize_name(name),
            score,
            difficulty_or_lives: difficulty_or_lives.clamp(1, MAX_LIVES),
            created_at,
        }
    }

    /// `created_at` as a UTC timestamp, if it is in range.
    #[must_use]
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.created_at)
    }

    fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .cmp(&self.score)
            .then(self.difficulty_or_lives.cmp(&other.difficulty_or_lives))
            .then(self.created_at.cmp(&other.created_at))
    }
}

/// Current time in epoch milliseconds.
#[must_use]
pub fn timestamp_now() -> i64 {
    Utc::now().timestamp_millis()
}

/// Trim, default blank names to [`DEFAULT_NAME`] and cut to [`MAX_NAME_CHARS`].
///
/// The cut never leaves trailing whitespace, so sanitizing is idempotent.
#[must_use]
pub fn sanitize_name(name: Option<&str>) -> String {
    match name.map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => {
            let cut: String = trimmed.chars().take(MAX_NAME_CHARS).collect();
            cut.trim_end().to_string()
        }
        _ => DEFAULT_NAME.to_string(),
    }
}

/// Validate one stored value. Returns `None` for anything unusable.
#[must_use]
pub fn entry_from_value(value: &Value) -> Option<LeaderboardEntry> {
    let object = value.as_object()?;

    let score = object.get("score").and_then(non_negative_integer)?;
    let score = u32::try_from(score).ok()?;

    let created_at = object.get("createdAt").and_then(Value::as_f64).filter(|t| t.is_finite())?;
    #[allow(clippy::cast_possible_truncation)]
    let created_at = created_at as i64;

    let difficulty = match object.get("difficultyOrLives") {
        None | Some(Value::Null) => 1,
        Some(raw) => clamp_lives(raw.as_f64().filter(|l| l.is_finite())?),
    };

    Some(LeaderboardEntry::new(
        object.get("name").and_then(Value::as_str),
        score,
        difficulty,
        created_at,
    ))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_lives(lives: f64) -> u8 {
    lives.round().clamp(1.0, f64::from(MAX_LIVES)) as u8
}

fn non_negative_integer(value: &Value) -> Option<u64> {
    if let Some(n) = value.as_u64() {
        return Some(n);
    }
    let n = value.as_f64()?;
    if n >= 0.0 && n.fract().abs() < f64::EPSILON && n <= f64::from(u32::MAX) {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        return Some(n as u64);
    }
    None
}

/// The top [`MAX_ENTRIES`] runs, best first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// An empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from arbitrary entries, sorting and capping them.
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = LeaderboardEntry>) -> Self {
        let mut entries: Vec<LeaderboardEntry> = entries.into_iter().collect();
        entries.sort_by(LeaderboardEntry::rank_cmp);
        entries.truncate(MAX_ENTRIES);
        Self { entries }
    }

    /// Parse stored JSON, dropping malformed entries.
    ///
    /// Text that is not a JSON array gives an empty board.
    #[must_use]
    pub fn from_json_str(text: &str) -> Self {
        let values = match serde_json::from_str::<Value>(text) {
            Ok(Value::Array(values)) => values,
            Ok(_) => {
                warn!("leaderboard is not a JSON array, starting empty");
                return Self::new();
            }
            Err(err) => {
                warn!(%err, "leaderboard is not valid JSON, starting empty");
                return Self::new();
            }
        };

        let total = values.len();
        let entries: Vec<LeaderboardEntry> = values.iter().filter_map(entry_from_value).collect();
        if entries.len() < total {
            warn!(dropped = total - entries.len(), "dropped malformed leaderboard entries");
        }
        Self::from_entries(entries)
    }

    /// Read the board from disk. A missing or unreadable file is an empty board.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(text) => Self::from_json_str(&text),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no leaderboard file yet");
                Self::new()
            }
            Err(err) => {
                warn!(path = %path.display(), %err, "could not read leaderboard, starting empty");
                Self::new()
            }
        }
    }

    /// Pretty-printed JSON array.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, LeaderboardError> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }

    /// Write the board to disk, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or its directory cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), LeaderboardError> {
        let json = self.to_json()?;
        let io_err = |source| LeaderboardError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(path, json).map_err(io_err)
    }

    /// Entries, best first.
    #[must_use]
    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the board is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Where an entry would land, as a 0-based index. Ties go after
    /// existing entries.
    fn position(&self, entry: &LeaderboardEntry) -> usize {
        self.entries
            .iter()
            .take_while(|existing| existing.rank_cmp(entry) != Ordering::Greater)
            .count()
    }

    /// Whether a run with this score would make the board.
    #[must_use]
    pub fn qualifies(&self, score: u32, difficulty_or_lives: u8, created_at: i64) -> bool {
        let candidate = LeaderboardEntry::new(None, score, difficulty_or_lives, created_at);
        self.position(&candidate) < MAX_ENTRIES
    }

    /// Insert an entry, returning its 1-based rank or `None` if it did not
    /// make the board.
    pub fn insert(&mut self, entry: LeaderboardEntry) -> Option<usize> {
        let index = self.position(&entry);
        if index >= MAX_ENTRIES {
            return None;
        }
        self.entries.insert(index, entry);
        self.entries.truncate(MAX_ENTRIES);
        Some(index + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(name: &str, score: u32, lives: u8, created_at: i64) -> LeaderboardEntry {
        LeaderboardEntry::new(Some(name), score, lives, created_at)
    }

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name(None), "Anonymous");
        assert_eq!(sanitize_name(Some("   ")), "Anonymous");
        assert_eq!(sanitize_name(Some("  Ada  ")), "Ada");
        let long = "x".repeat(40);
        assert_eq!(sanitize_name(Some(&long)).chars().count(), 24);
        assert_eq!(sanitize_name(Some("ÅÅÅÅÅÅÅÅÅÅÅÅÅÅÅÅÅÅÅÅÅÅÅÅÅÅ")).chars().count(), 24);
        assert_eq!(sanitize_name(Some("Ada Lovelace            of Ockham")), "Ada Lovelace");
    }

    #[test]
    fn test_ordering_and_cap() {
        let mut board = Leaderboard::new();
        assert_eq!(board.insert(entry("a", 3, 3, 10)), Some(1));
        assert_eq!(board.insert(entry("b", 5, 3, 20)), Some(1));
        assert_eq!(board.insert(entry("c", 3, 1, 30)), Some(2));
        assert_eq!(board.insert(entry("d", 3, 3, 5)), Some(3));
        assert_eq!(board.insert(entry("e", 1, 1, 1)), Some(5));
        assert_eq!(board.insert(entry("f", 0, 1, 0)), None);
        assert_eq!(board.insert(entry("g", 4, 5, 0)), Some(2));

        let names: Vec<&str> = board.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["b", "g", "c", "d", "a"]);
        assert_eq!(board.len(), MAX_ENTRIES);
    }

    #[test]
    fn test_qualifies() {
        let board = Leaderboard::from_entries((0..5).map(|i| entry("p", 10, 1, i)));
        assert!(!board.qualifies(10, 1, 100));
        assert!(board.qualifies(10, 1, -1));
        assert!(board.qualifies(11, 5, 100));
        assert!(Leaderboard::new().qualifies(0, 1, 0));
    }

    #[test]
    fn test_entry_validation() {
        let ok = entry_from_value(&json!({"name": "Ada", "score": 4, "difficultyOrLives": 2.6, "createdAt": 1_700_000_000_000_i64})).unwrap();
        assert_eq!(ok.difficulty_or_lives, 3);

        let defaults = entry_from_value(&json!({"score": 4.0, "createdAt": 1.5})).unwrap();
        assert_eq!(defaults.name, "Anonymous");
        assert_eq!(defaults.difficulty_or_lives, 1);
        assert_eq!(defaults.created_at, 1);

        let clamped = entry_from_value(&json!({"name": 7, "score": 1, "difficultyOrLives": 40, "createdAt": 0})).unwrap();
        assert_eq!(clamped.difficulty_or_lives, 5);
        assert_eq!(clamped.name, "Anonymous");

        assert!(entry_from_value(&json!({"score": -1, "createdAt": 0})).is_none());
        assert!(entry_from_value(&json!({"score": 1.5, "createdAt": 0})).is_none());
        assert!(entry_from_value(&json!({"score": "3", "createdAt": 0})).is_none());
        assert!(entry_from_value(&json!({"score": 3})).is_none());
        assert!(entry_from_value(&json!({"score": 3, "createdAt": 0, "difficultyOrLives": "hard"})).is_none());
        assert!(entry_from_value(&json!([1, 2])).is_none());
    }

    #[test]
    fn test_from_json_str_filters_and_sorts() {
        let text = r#"[
            {"name": "low", "score": 1, "difficultyOrLives": 1, "createdAt": 1},
            {"name": "bad", "score": "x", "createdAt": 1},
            {"name": "high", "score": 9, "difficultyOrLives": 3, "createdAt": 2}
        ]"#;
        let board = Leaderboard::from_json_str(text);
        let names: Vec<&str> = board.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["high", "low"]);

        assert!(Leaderboard::from_json_str("{\"score\": 1}").is_empty());
        assert!(Leaderboard::from_json_str("not json").is_empty());
    }

    #[test]
    fn test_json_uses_camel_case() {
        let board = Leaderboard::from_entries([entry("Ada", 2, 3, 42)]);
        let json = board.to_json().unwrap();
        assert!(json.contains("\"difficultyOrLives\": 3"));
        assert!(json.contains("\"createdAt\": 42"));
        assert_eq!(Leaderboard::from_json_str(&json), board);
    }
}
