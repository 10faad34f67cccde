//! Boundary geometry in longitude/latitude degrees.
//!
//! Outlines are `geo-types` multipolygons with `x` as longitude and `y` as
//! latitude. A single polygon is held as a one-element multipolygon so every
//! consumer walks the same shape.

use geo_types::{Coord, LineString, MultiPolygon, Polygon};
use serde::Serialize;

/// A country outline.
pub type Outline = MultiPolygon<f64>;

/// A point on the globe as `(longitude, latitude)` in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LonLat {
    /// Longitude in degrees, east positive.
    pub lon: f64,
    /// Latitude in degrees, north positive.
    pub lat: f64,
}

impl LonLat {
    /// Create a new point.
    #[must_use]
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Both coordinates are finite numbers.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.lon.is_finite() && self.lat.is_finite()
    }
}

impl From<(f64, f64)> for LonLat {
    fn from((lon, lat): (f64, f64)) -> Self {
        Self { lon, lat }
    }
}

impl From<Coord<f64>> for LonLat {
    fn from(coord: Coord<f64>) -> Self {
        Self {
            lon: coord.x,
            lat: coord.y,
        }
    }
}

/// Every ring of every polygon: exteriors followed by their holes.
pub fn rings(outline: &Outline) -> impl Iterator<Item = &LineString<f64>> {
    outline
        .0
        .iter()
        .flat_map(|polygon| std::iter::once(polygon.exterior()).chain(polygon.interiors()))
}

/// Build a ring from `(lon, lat)` pairs.
#[must_use]
pub fn ring(points: &[(f64, f64)]) -> LineString<f64> {
    LineString::from(points.to_vec())
}

/// A polygon without holes from `(lon, lat)` pairs. The ring is closed if needed.
#[must_use]
pub fn polygon(exterior: &[(f64, f64)]) -> Polygon<f64> {
    Polygon::new(ring(exterior), Vec::new())
}
