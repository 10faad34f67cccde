//! Great-circle feedback for a guess: distance, compass direction, formatting.
//!
//! All angles are in degrees, all distances in kilometres. Points are
//! `(longitude, latitude)`, matching the order boundary datasets use.

mod centroid;
mod geometry;
pub mod projection;

pub use centroid::spherical_centroid;
pub use geo_types::{LineString, MultiPolygon, Polygon};
pub use geometry::{LonLat, Outline, polygon, ring, rings};

use std::fmt;

use serde::Serialize;

use crate::catalog::Country;

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Points closer than this on both axes have no meaningful bearing.
const SAME_POINT_EPSILON: f64 = 1e-8;

/// Great-circle distance between two points (haversine).
///
/// Returns exactly `0.0` for identical points.
#[must_use]
pub fn haversine_km(from: LonLat, to: LonLat) -> f64 {
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lon = (to.lon - from.lon).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + from.lat.to_radians().cos() * to.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push `a` a hair past 1 for antipodal points.
    let a = a.clamp(0.0, 1.0);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// One of the eight compass octants, or `Here` when the points coincide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "&'static str")]
pub enum Compass {
    /// North.
    N,
    /// North-east.
    NE,
    /// East.
    E,
    /// South-east.
    SE,
    /// South.
    S,
    /// South-west.
    SW,
    /// West.
    W,
    /// North-west.
    NW,
    /// Guess and target share a centroid.
    Here,
}

impl Compass {
    /// Octants clockwise from north; index `i` covers bearings around `45 * i`.
    pub const OCTANTS: [Self; 8] = [
        Self::N,
        Self::NE,
        Self::E,
        Self::SE,
        Self::S,
        Self::SW,
        Self::W,
        Self::NW,
    ];

    /// Octant nearest to a bearing in degrees. Any finite bearing is accepted.
    #[must_use]
    pub fn from_bearing(bearing: f64) -> Self {
        let normalized = bearing.rem_euclid(360.0);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let index = (normalized / 45.0).round() as usize % 8;
        Self::OCTANTS[index]
    }

    /// Short label: `N`, `NE`, ... or `HERE`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::N => "N",
            Self::NE => "NE",
            Self::E => "E",
            Self::SE => "SE",
            Self::S => "S",
            Self::SW => "SW",
            Self::W => "W",
            Self::NW => "NW",
            Self::Here => "HERE",
        }
    }

    /// Arrow glyph pointing towards the target.
    #[must_use]
    pub const fn arrow(self) -> &'static str {
        match self {
            Self::N => "↑",
            Self::NE => "↗",
            Self::E => "→",
            Self::SE => "↘",
            Self::S => "↓",
            Self::SW => "↙",
            Self::W => "←",
            Self::NW => "↖",
            Self::Here => "•",
        }
    }
}

impl From<Compass> for &'static str {
    fn from(compass: Compass) -> Self {
        compass.label()
    }
}

impl fmt::Display for Compass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Direction from one point to another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Direction {
    /// Quantized compass octant.
    pub compass: Compass,
    /// Initial great-circle bearing in `[0, 360)`; `0` for [`Compass::Here`].
    pub bearing: f64,
}

impl Direction {
    /// Label of the compass octant.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        self.compass.label()
    }

    /// Arrow glyph of the compass octant.
    #[must_use]
    pub const fn arrow(&self) -> &'static str {
        self.compass.arrow()
    }
}

/// Initial bearing from `from` towards `to`, quantized to a compass octant.
#[must_use]
pub fn direction_from_to(from: LonLat, to: LonLat) -> Direction {
    if (from.lon - to.lon).abs() < SAME_POINT_EPSILON && (from.lat - to.lat).abs() < SAME_POINT_EPSILON {
        return Direction {
            compass: Compass::Here,
            bearing: 0.0,
        };
    }

    let phi1 = from.lat.to_radians();
    let phi2 = to.lat.to_radians();
    let delta_lambda = (to.lon - from.lon).to_radians();

    let y = delta_lambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * delta_lambda.cos();

    let bearing = (y.atan2(x).to_degrees() + 360.0) % 360.0;

    Direction {
        compass: Compass::from_bearing(bearing),
        bearing,
    }
}

/// Round to whole kilometres and group thousands: `1234.4` → `"1,234 km"`.
#[must_use]
pub fn format_distance(km: f64) -> String {
    #[allow(clippy::cast_possible_truncation)]
    let rounded = km.round() as i64;
    let digits = rounded.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 4);
    if rounded < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped.push_str(" km");
    grouped
}

/// Feedback for one guessed country against the target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    /// Great-circle distance between centroids.
    pub distance_km: f64,
    /// [`format_distance`] of `distance_km`.
    pub distance_text: String,
    /// Direction from the guess towards the target.
    pub direction: Compass,
}

impl Comparison {
    /// Label of the direction, e.g. `"NE"`.
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

/// Compare a guessed country with the target using their centroids.
#[must_use]
pub fn compare(guess: &Country, target: &Country) -> Comparison {
    let distance_km = haversine_km(guess.centroid, target.centroid);
    let direction = direction_from_to(guess.centroid, target.centroid);

    Comparison {
        distance_km,
        distance_text: format_distance(distance_km),
        direction: direction.compass,
    }
}
