#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use silhouette::geo::EARTH_RADIUS_KM;
use silhouette::{Compass, LonLat, direction_from_to, format_distance, haversine_km};

/// Two centroids, as raw coordinates.
#[derive(Arbitrary, Debug)]
struct CompareInput {
    from_lon: f64,
    from_lat: f64,
    to_lon: f64,
    to_lat: f64,
}

fuzz_target!(|input: CompareInput| {
    let coords = [input.from_lon, input.from_lat, input.to_lon, input.to_lat];
    if coords.iter().any(|c| !c.is_finite()) {
        return;
    }
    let from = LonLat::new(input.from_lon.clamp(-180.0, 180.0), input.from_lat.clamp(-90.0, 90.0));
    let to = LonLat::new(input.to_lon.clamp(-180.0, 180.0), input.to_lat.clamp(-90.0, 90.0));

    let km = haversine_km(from, to);
    assert!(km.is_finite() && km >= 0.0, "Bad distance {km}");
    assert!(km <= std::f64::consts::PI * EARTH_RADIUS_KM + 1e-6, "Distance past the antipode: {km}");
    assert!(format_distance(km).ends_with(" km"));

    let direction = direction_from_to(from, to);
    assert!((0.0..360.0).contains(&direction.bearing), "Bearing out of range: {}", direction.bearing);
    if direction.compass != Compass::Here {
        assert_eq!(direction.compass, Compass::from_bearing(direction.bearing));
    }
});
