#![no_main]

use libfuzzer_sys::fuzz_target;
use silhouette::catalog::{Catalog, parse_boundaries, parse_reference};
use silhouette::geo::projection::rasterize;
use silhouette::text::compare_names;

/// Reference data matching every numeric code a fuzzed feature is likely to use.
const REFERENCE: &str = r#"[
    {"name": {"common": "Alpha", "official": "Alpha"}, "cca3": "AAA", "ccn3": "001", "unMember": true},
    {"name": {"common": "Beta", "official": "Beta"}, "cca3": "BBB", "ccn3": "002", "unMember": true},
    {"name": {"common": "Gamma", "official": "Gamma"}, "cca3": "CCC", "ccn3": "3", "independent": true}
]"#;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    // Malformed GeoJSON and TopoJSON must be rejected, never panic.
    let Ok(features) = parse_boundaries(text) else {
        return;
    };
    let Ok(reference) = parse_reference(REFERENCE) else {
        return;
    };

    let catalog = Catalog::build(&reference, &features);
    assert!(catalog.len() <= 3);
    for country in &catalog {
        assert!(country.centroid.is_finite(), "Non-finite centroid for {}", country.id);
        let rows = rasterize(&country.geometry, 16, 8);
        assert!(rows.iter().all(|row| row.chars().count() == 16));
    }
    for pair in catalog.countries().windows(2) {
        assert!(compare_names(&pair[0].name, &pair[1].name).is_le(), "Catalog is not sorted");
    }
});
