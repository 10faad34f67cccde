//! Spherical centroid of boundary geometry.
//!
//! Points are lifted to unit vectors on the sphere. The area-weighted
//! centroid comes from the cross products of consecutive ring vertices; if
//! that vanishes (a degenerate ring) the length-weighted centroid of the ring
//! edges is used, and failing that the plain mean of the vertices.
//!
//! Datasets disagree on ring winding (RFC 7946 GeoJSON is counter-clockwise,
//! `world-atlas` TopoJSON clockwise), and a reversed ring describes the rest
//! of the globe. The area-weighted vector is therefore oriented towards the
//! edge-weighted one, so every country is read as the smaller region.

use geo_types::Coord;

use crate::geo::{LonLat, Outline, rings};

const EPSILON: f64 = 1e-6;
const EPSILON2: f64 = 1e-12;

#[derive(Debug, Default)]
struct Accumulator {
    /// Vertex mean.
    w0: f64,
    x0: f64,
    y0: f64,
    z0: f64,
    /// Edge-length weighted sums.
    w1: f64,
    x1: f64,
    y1: f64,
    z1: f64,
    /// Area weighted sums.
    x2: f64,
    y2: f64,
    z2: f64,
}

impl Accumulator {
    fn add_vertex(&mut self, v: [f64; 3]) {
        self.w0 += 1.0;
        self.x0 += (v[0] - self.x0) / self.w0;
        self.y0 += (v[1] - self.y0) / self.w0;
        self.z0 += (v[2] - self.z0) / self.w0;
    }

    fn add_edge(&mut self, a: [f64; 3], b: [f64; 3]) {
        let cx = a[1] * b[2] - a[2] * b[1];
        let cy = a[2] * b[0] - a[0] * b[2];
        let cz = a[0] * b[1] - a[1] * b[0];
        let m = (cx * cx + cy * cy + cz * cz).sqrt();
        let w = m.min(1.0).asin();
        let v = if m > 0.0 { -w / m } else { 0.0 };

        self.x2 += v * cx;
        self.y2 += v * cy;
        self.z2 += v * cz;

        self.w1 += w;
        self.x1 += w * (a[0] + b[0]);
        self.y1 += w * (a[1] + b[1]);
        self.z1 += w * (a[2] + b[2]);

        self.add_vertex(b);
    }

    fn add_ring(&mut self, ring: &[Coord<f64>]) {
        // The closing point duplicates the first; the ring is closed explicitly.
        let open = match ring {
            [first, .., last] if first == last => &ring[..ring.len() - 1],
            _ => ring,
        };
        let Some((first, rest)) = open.split_first() else {
            return;
        };

        let start = cartesian(*first);
        self.add_vertex(start);
        let mut previous = start;
        for point in rest {
            let next = cartesian(*point);
            self.add_edge(previous, next);
            previous = next;
        }
        self.add_edge(previous, start);
    }

    fn finish(&self) -> LonLat {
        let (mut x, mut y, mut z) = (self.x2, self.y2, self.z2);
        let mut m = norm(x, y, z);

        if m >= EPSILON2 && x * self.x1 + y * self.y1 + z * self.z1 < 0.0 {
            (x, y, z) = (-x, -y, -z);
        }

        if m < EPSILON2 {
            (x, y, z) = (self.x1, self.y1, self.z1);
            if self.w1 < EPSILON {
                (x, y, z) = (self.x0, self.y0, self.z0);
            }
            m = norm(x, y, z);
            if m < EPSILON2 {
                return LonLat::new(f64::NAN, f64::NAN);
            }
        }

        LonLat::new(y.atan2(x).to_degrees(), (z / m).asin().to_degrees())
    }
}

fn cartesian(p: Coord<f64>) -> [f64; 3] {
    let lambda = p.x.to_radians();
    let phi = p.y.to_radians();
    let cos_phi = phi.cos();
    [cos_phi * lambda.cos(), cos_phi * lambda.sin(), phi.sin()]
}

fn norm(x: f64, y: f64, z: f64) -> f64 {
    (x * x + y * y + z * z).sqrt()
}

/// Spherical centroid of a polygon or multipolygon.
///
/// Returns a point with NaN coordinates when the geometry has no usable
/// points; callers check [`LonLat::is_finite`].
#[must_use]
pub fn spherical_centroid(outline: &Outline) -> LonLat {
    let mut acc = Accumulator::default();
    for ring in rings(outline) {
        acc.add_ring(&ring.0);
    }
    acc.finish()
}
