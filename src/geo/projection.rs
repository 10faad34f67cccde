//! Silhouette projection: Mercator fitted to a viewport.
//!
//! The core only supplies coordinates. [`Mercator::path_data`] emits SVG path
//! data for graphical front ends and [`rasterize`] fills a character grid for
//! terminals.

use crate::geo::{LonLat, Outline, rings};

/// Latitude beyond which Mercator diverges.
const MAX_LATITUDE: f64 = 85.051_128_78;

/// Terminal cells are roughly twice as tall as they are wide.
pub const CELL_ASPECT: f64 = 2.0;

/// Rectangle in output coordinates, `y` growing downwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    /// Left edge.
    pub x0: f64,
    /// Top edge.
    pub y0: f64,
    /// Right edge.
    pub x1: f64,
    /// Bottom edge.
    pub y1: f64,
}

impl Extent {
    /// Viewport used for the silhouette card: 440x280 with an 18px margin.
    pub const SILHOUETTE: Self = Self {
        x0: 18.0,
        y0: 18.0,
        x1: 422.0,
        y1: 262.0,
    };

    /// Width of the extent.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// Height of the extent.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }
}

/// Spherical Mercator with a uniform scale and a translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mercator {
    scale: f64,
    translate: (f64, f64),
}

impl Mercator {
    /// Projection with an explicit scale (pixels per radian) and translation.
    #[must_use]
    pub const fn new(scale: f64, translate: (f64, f64)) -> Self {
        Self { scale, translate }
    }

    /// Fit the geometry into `extent`, preserving aspect ratio and centring it.
    ///
    /// Returns `None` for geometry with no finite points.
    #[must_use]
    pub fn fit_extent(extent: Extent, outline: &Outline) -> Option<Self> {
        let rings = unwrapped_rings(outline);
        let mut bounds: Option<(f64, f64, f64, f64)> = None;
        for (x, y) in rings.iter().flatten().map(|p| raw(*p)) {
            let (px, py) = (x, -y);
            bounds = Some(match bounds {
                None => (px, py, px, py),
                Some((x0, y0, x1, y1)) => (x0.min(px), y0.min(py), x1.max(px), y1.max(py)),
            });
        }
        let (bx0, by0, bx1, by1) = bounds?;

        let kx = extent.width() / (bx1 - bx0);
        let ky = extent.height() / (by1 - by0);
        let scale = match (kx.is_finite(), ky.is_finite()) {
            (true, true) => kx.min(ky),
            (true, false) => kx,
            (false, true) => ky,
            (false, false) => return None,
        };

        let tx = extent.x0 + (extent.width() - scale * (bx1 + bx0)) / 2.0;
        let ty = extent.y0 + (extent.height() - scale * (by1 + by0)) / 2.0;
        Some(Self::new(scale, (tx, ty)))
    }

    /// Project a point to output coordinates.
    #[must_use]
    pub fn project(&self, point: LonLat) -> (f64, f64) {
        let (x, y) = raw(point);
        (
            x * self.scale + self.translate.0,
            self.translate.1 - y * self.scale,
        )
    }

    /// SVG path data for the geometry: one `M…L…Z` subpath per ring.
    #[must_use]
    pub fn path_data(&self, outline: &Outline) -> String {
        let mut out = String::new();
        for ring in unwrapped_rings(outline) {
            let open = open_ring(&ring);
            for (i, point) in open.iter().enumerate() {
                let (x, y) = self.project(*point);
                out.push(if i == 0 { 'M' } else { 'L' });
                out.push_str(&format_number(x));
                out.push(',');
                out.push_str(&format_number(y));
            }
            if !open.is_empty() {
                out.push('Z');
            }
        }
        out
    }

    fn project_rings(&self, outline: &Outline) -> Vec<Vec<(f64, f64)>> {
        unwrapped_rings(outline)
            .iter()
            .map(|ring| ring.iter().map(|p| self.project(*p)).collect())
            .collect()
    }
}

/// SVG path data for the geometry fitted into `extent`; empty when it cannot be fitted.
#[must_use]
pub fn svg_path(outline: &Outline, extent: Extent) -> String {
    Mercator::fit_extent(extent, outline)
        .map(|projection| projection.path_data(outline))
        .unwrap_or_default()
}

/// Fill a `cols` x `rows` character grid with the silhouette.
///
/// A cell is filled when its centre lies inside the geometry (even-odd rule,
/// so holes stay empty). Each row is exactly `cols` characters.
#[must_use]
pub fn rasterize(outline: &Outline, cols: usize, rows: usize) -> Vec<String> {
    if cols == 0 || rows == 0 {
        return Vec::new();
    }

    #[allow(clippy::cast_precision_loss)]
    let extent = Extent {
        x0: 0.0,
        y0: 0.0,
        x1: cols as f64,
        y1: rows as f64 * CELL_ASPECT,
    };
    let Some(projection) = Mercator::fit_extent(extent, outline) else {
        return vec![" ".repeat(cols); rows];
    };
    let rings = projection.project_rings(outline);

    (0..rows)
        .map(|row| {
            (0..cols)
                .map(|col| {
                    #[allow(clippy::cast_precision_loss)]
                    let centre = (col as f64 + 0.5, (row as f64 + 0.5) * CELL_ASPECT);
                    if contains(&rings, centre) { '█' } else { ' ' }
                })
                .collect()
        })
        .collect()
}

/// Even-odd containment over all rings.
fn contains(rings: &[Vec<(f64, f64)>], (px, py): (f64, f64)) -> bool {
    let mut inside = false;
    for ring in rings {
        let n = ring.len();
        if n < 3 {
            continue;
        }
        let mut j = n - 1;
        for i in 0..n {
            let (xi, yi) = ring[i];
            let (xj, yj) = ring[j];
            if (yi > py) != (yj > py) && px < (xj - xi) * (py - yi) / (yj - yi) + xi {
                inside = !inside;
            }
            j = i;
        }
    }
    inside
}

fn raw(point: LonLat) -> (f64, f64) {
    let lat = point.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let y = (std::f64::consts::FRAC_PI_4 + lat / 2.0).tan().ln();
    (point.lon.to_radians(), y)
}

/// Rings with longitudes shifted by whole turns so that no edge jumps across
/// the antimeridian. Every ring is anchored to the first point of the
/// geometry, which keeps island groups on one side of the map.
fn unwrapped_rings(outline: &Outline) -> Vec<Vec<LonLat>> {
    let mut anchor: Option<f64> = None;
    let mut out = Vec::new();

    for ring in rings(outline) {
        let mut unwrapped = Vec::with_capacity(ring.0.len());
        let mut previous: Option<f64> = None;
        for point in ring.0.iter().map(|&c| LonLat::from(c)).filter(|p| p.is_finite()) {
            let reference = previous.or(anchor).unwrap_or(point.lon);
            let lon = nearest_turn(point.lon, reference);
            anchor.get_or_insert(lon);
            previous = Some(lon);
            unwrapped.push(LonLat::new(lon, point.lat));
        }
        if !unwrapped.is_empty() {
            out.push(unwrapped);
        }
    }

    out
}

/// Shift `lon` by multiples of 360 so it lies within 180 of `reference`.
fn nearest_turn(lon: f64, reference: f64) -> f64 {
    lon - ((lon - reference) / 360.0).round() * 360.0
}

fn open_ring(ring: &[LonLat]) -> &[LonLat] {
    match ring {
        [first, .., last] if first == last => &ring[..ring.len() - 1],
        _ => ring,
    }
}

/// Three decimals without trailing zeros, as SVG path data is usually written.
fn format_number(value: f64) -> String {
    let text = format!("{value:.3}");
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
