//! End-to-end tests over the bundled demonstration dataset.
//!
//! These load `data/countries.json` and `data/boundaries.geojson`, build the
//! catalog and exercise alias resolution and comparison on real names.
//!
//! Run with: cargo test --test catalog_dataset

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::path::PathBuf;

use silhouette::{Atlas, Compass, CountryId, compare};

fn data_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join(name)
}

fn atlas() -> Atlas {
    Atlas::load(&data_path("countries.json"), &data_path("boundaries.geojson")).unwrap()
}

fn id(code: &str) -> CountryId {
    CountryId::parse(code).unwrap()
}

#[test]
fn test_catalog_is_sorted_and_filtered() {
    let atlas = atlas();
    let names: Vec<&str> = atlas.catalog().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Australia",
            "Brazil",
            "Canada",
            "Fiji",
            "France",
            "Germany",
            "Ireland",
            "Italy",
            "Ivory Coast",
            "Japan",
            "Mexico",
            "Niger",
            "Nigeria",
            "Portugal",
            "Spain",
            "United Kingdom",
            "United States",
        ]
    );

    // Not eligible, no geometry, or no numeric code.
    for excluded in ["GRL", "ATA", "TUV", "UNK"] {
        assert!(atlas.country(id(excluded)).is_none(), "{excluded} should be excluded");
    }
    assert!(atlas.catalog().iter().all(|c| c.centroid.is_finite()));
}

#[test]
fn test_resolves_names_aliases_and_abbreviations() {
    let atlas = atlas();
    let cases = [
        ("usa", "USA"),
        ("U.S.", "USA"),
        ("America", "USA"),
        ("united states of america", "USA"),
        ("Côte d'Ivoire", "CIV"),
        ("COTE D'IVOIRE", "CIV"),
        ("ivory coast", "CIV"),
        ("UK", "GBR"),
        ("Great Britain", "GBR"),
        ("bundesrepublik deutschland", "DEU"),
        ("Reino de España", "ESP"),
        ("nippon", "JPN"),
    ];
    for (text, expected) in cases {
        let found = atlas.resolve(text).unwrap_or_else(|| panic!("{text} did not resolve"));
        assert_eq!(found.id, id(expected), "{text}");
    }
}

#[test]
fn test_unknown_and_filtered_inputs() {
    let atlas = atlas();
    for text in ["unknown", "", "   ", "Greenland", "Kosovo", "FR", "Tuvalu"] {
        assert!(atlas.resolve(text).is_none(), "{text} should not resolve");
    }
}

#[test]
fn test_compare_neighbours() {
    let atlas = atlas();
    let france = atlas.country(id("FRA")).unwrap();
    let spain = atlas.country(id("ESP")).unwrap();

    let comparison = compare(france, spain);
    assert!(
        comparison.distance_km > 600.0 && comparison.distance_km < 1100.0,
        "{}",
        comparison.distance_km
    );
    assert_eq!(comparison.direction, Compass::SW);
    assert!(comparison.distance_text.ends_with(" km"));

    let back = compare(spain, france);
    assert_eq!(back.direction, Compass::NE);
    assert!((back.distance_km - comparison.distance_km).abs() < 1e-6);

    assert_eq!(compare(spain, spain).direction, Compass::Here);
}

#[test]
fn test_island_centroids() {
    let atlas = atlas();
    let japan = atlas.country(id("JPN")).unwrap();
    assert!(japan.centroid.lon > 130.0 && japan.centroid.lon < 146.0);
    assert!(japan.centroid.lat > 31.0 && japan.centroid.lat < 46.0);

    // Fiji straddles the antimeridian.
    let fiji = atlas.country(id("FJI")).unwrap();
    assert!(fiji.centroid.lon.abs() > 175.0, "{}", fiji.centroid.lon);
    assert!(fiji.centroid.lat < -15.0 && fiji.centroid.lat > -19.0);
}

#[test]
fn test_suggestions_over_dataset() {
    let atlas = atlas();
    let names: Vec<String> = atlas.suggestions("nig", 8).into_iter().map(|s| s.name).collect();
    assert_eq!(names, vec!["Niger", "Nigeria"]);

    let names: Vec<String> = atlas.suggestions("land", 8).into_iter().map(|s| s.name).collect();
    assert_eq!(names, vec!["Ireland"]);

    assert_eq!(atlas.suggestions("", 8).len(), 8);
}
