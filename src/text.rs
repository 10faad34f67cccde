//! Free-text canonicalization.
//!
//! [`normalize_term`] produces the comparison key for country names: it is
//! run on every alias when the index is built and on every query, so both
//! sides always agree.

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Canonicalize free text into an accent-, case- and punctuation-insensitive key.
///
/// Accents are removed (decompose, then drop the marks), `&` reads as
/// "and", every run of characters outside `[a-zA-Z0-9]` collapses to one
/// space, the result is trimmed and lowercased.
///
/// ```
/// use silhouette::text::normalize_term;
///
/// assert_eq!(normalize_term("  Côte d'Ivoire  "), "cote d ivoire");
/// assert_eq!(normalize_term("Trinidad & Tobago"), "trinidad and tobago");
/// ```
#[must_use]
pub fn normalize_term(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut gap = false;

    for ch in value.nfd().filter(|&c| !is_diacritic(c)) {
        if ch == '&' {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str("and");
            gap = true;
        } else if ch.is_ascii_alphanumeric() {
            if gap && !out.is_empty() {
                out.push(' ');
            }
            gap = false;
            out.push(ch.to_ascii_lowercase());
        } else {
            gap = true;
        }
    }

    out
}

/// Characters dropped outright rather than turned into a word break.
///
/// Besides combining marks this covers the spacing accents and modifier
/// letters (`^`, `` ` ``, `´`, `ʻ`, ...) so "Hawaiʻi" folds to "hawaii".
fn is_diacritic(c: char) -> bool {
    is_combining_mark(c)
        || matches!(c, '^' | '`' | '\u{a8}' | '\u{af}' | '\u{b4}' | '\u{b7}' | '\u{b8}')
        || ('\u{2b0}'..='\u{2ff}').contains(&c)
}

/// Sort key used to order display names the way a reader expects:
/// accents do not push "Åland" after "Zambia" and case does not matter.
#[must_use]
pub fn collation_key(value: &str) -> String {
    value
        .nfd()
        .filter(|&c| !is_combining_mark(c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Compare two display names by [`collation_key`], falling back to the raw
/// text so the order is total and deterministic.
#[must_use]
pub fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}
