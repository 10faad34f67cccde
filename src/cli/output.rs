//! Output formatting utilities for CLI.

use serde::Serialize;
use silhouette::geo::Direction;
use silhouette::{Comparison, Country, LeaderboardEntry, normalize_term};

/// JSON-serializable country.
#[derive(Debug, Serialize)]
pub(super) struct JsonCountry<'a> {
    /// Country code.
    pub(super) id: &'a str,
    /// Canonical name.
    pub(super) name: &'a str,
    /// Alternate names.
    pub(super) aliases: &'a [String],
    /// Centroid as `[lon, lat]`.
    pub(super) centroid: [f64; 2],
}

impl<'a> JsonCountry<'a> {
    /// Create from a catalog country.
    pub(super) fn from_country(country: &'a Country) -> Self {
        Self {
            id: country.id.as_str(),
            name: &country.name,
            aliases: &country.aliases,
            centroid: [country.centroid.lon, country.centroid.lat],
        }
    }
}

/// JSON-serializable resolution of one query.
#[derive(Debug, Serialize)]
pub(super) struct JsonResolution<'a> {
    /// Text as given.
    pub(super) query: &'a str,
    /// Lookup key the text normalized to.
    pub(super) normalized: String,
    /// Matching country (null if none).
    pub(super) country: Option<JsonCountry<'a>>,
}

impl<'a> JsonResolution<'a> {
    /// Create from a query and its match.
    pub(super) fn new(query: &'a str, country: Option<&'a Country>) -> Self {
        Self {
            query,
            normalized: normalize_term(query),
            country: country.map(JsonCountry::from_country),
        }
    }
}

/// JSON-serializable comparison.
#[derive(Debug, Serialize)]
pub(super) struct JsonComparison<'a> {
    /// Guessed country code.
    pub(super) guess: &'a str,
    /// Target country code.
    pub(super) target: &'a str,
    /// Centroid distance.
    pub(super) distance_km: f64,
    /// Formatted distance.
    pub(super) distance_text: &'a str,
    /// Compass label.
    pub(super) direction: &'static str,
    /// Compass arrow.
    pub(super) arrow: &'static str,
    /// Initial bearing in degrees.
    pub(super) bearing: f64,
}

impl<'a> JsonComparison<'a> {
    /// Create from a comparison.
    pub(super) fn new(guess: &'a Country, target: &'a Country, comparison: &'a Comparison, direction: Direction) -> Self {
        Self {
            guess: guess.id.as_str(),
            target: target.id.as_str(),
            distance_km: comparison.distance_km,
            distance_text: &comparison.distance_text,
            direction: comparison.direction_label(),
            arrow: comparison.direction_arrow(),
            bearing: direction.bearing,
        }
    }
}

/// Format one resolution as a text line.
pub(super) fn format_resolution_text(query: &str, country: Option<&Country>) -> String {
    match country {
        Some(country) => format!("{query:<24} -> {} ({})", country.name, country.id),
        None => format!("{query:<24} -> no match"),
    }
}

/// Format a comparison as text.
pub(super) fn format_comparison_text(guess: &Country, target: &Country, comparison: &Comparison, direction: Direction) -> String {
    format!(
        "{} -> {}: {} {} {} (bearing {:.1}°)",
        guess.name,
        target.name,
        comparison.distance_text,
        comparison.direction_arrow(),
        comparison.direction_label(),
        direction.bearing
    )
}

/// Format the catalog as an aligned table.
pub(super) fn format_countries_text<'a>(countries: impl ExactSizeIterator<Item = &'a Country>) -> String {
    let mut output = format!("{} playable countries\n\n", countries.len());
    for country in countries {
        output.push_str(&format!(
            "  {}  {:<36} {:>8.3} {:>8.3}  {} aliases\n",
            country.id,
            country.name,
            country.centroid.lon,
            country.centroid.lat,
            country.aliases.len()
        ));
    }
    output
}

/// Format leaderboard entries as a ranked table.
pub(super) fn format_leaderboard_text(entries: &[LeaderboardEntry]) -> String {
    if entries.is_empty() {
        return "No scores yet.\n".to_string();
    }

    let mut output = String::from("  #  Name                      Score  Lives  When\n");
    for (rank, entry) in entries.iter().enumerate() {
        let when = entry
            .created_at_utc()
            .map_or_else(|| "-".to_string(), |t| t.format("%Y-%m-%d %H:%M").to_string());
        output.push_str(&format!(
            "  {}  {:<24}  {:>5}  {:>5}  {when}\n",
            rank + 1,
            entry.name,
            entry.score,
            entry.difficulty_or_lives
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use silhouette::geo::MultiPolygon;
    use silhouette::{CountryId, LonLat};

    fn country(id: &str, name: &str) -> Country {
        Country::new(
            CountryId::parse(id).unwrap(),
            name,
            vec![format!("{name} Republic")],
            LonLat::new(1.5, -2.25),
            MultiPolygon(Vec::new()),
        )
    }

    #[test]
    fn test_resolution_json() {
        let chad = country("TCD", "Chad");
        let json = serde_json::to_string(&JsonResolution::new("  CHAD ", Some(&chad))).unwrap();
        assert!(json.contains("\"normalized\":\"chad\""));
        assert!(json.contains("\"id\":\"TCD\""));
        assert!(json.contains("\"centroid\":[1.5,-2.25]"));

        let missing = serde_json::to_string(&JsonResolution::new("nowhere", None)).unwrap();
        assert!(missing.contains("\"country\":null"));
    }

    #[test]
    fn test_leaderboard_text() {
        assert_eq!(format_leaderboard_text(&[]), "No scores yet.\n");
        let entries = [LeaderboardEntry::new(Some("Ada"), 7, 3, 0)];
        let text = format_leaderboard_text(&entries);
        assert!(text.contains("Ada"));
        assert!(text.contains("1970-01-01 00:00"));
    }
}
