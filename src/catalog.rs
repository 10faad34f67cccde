//! The playable country catalog.
//!
//! Built once at startup by joining the political reference dataset with the
//! boundary dataset on the numeric country code, then shared read-only. Every
//! other module refers to countries by [`CountryId`] and borrows the
//! [`Country`] from here.

mod aliases;
mod boundary;
mod reference;

pub use aliases::{CUSTOM_ALIASES, EXTRA_COUNTRIES, assemble_aliases, custom_aliases, is_eligible};
pub use boundary::{BoundaryFeature, load_boundaries, parse_boundaries};
pub use reference::{CountryNames, ReferenceCountry, load_reference, parse_reference};

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Serialize, Serializer};
use tracing::{debug, info};

use crate::error::DatasetError;
use crate::geo::{LonLat, Outline, spherical_centroid};
use crate::text::compare_names;

/// Three-character country code (ISO 3166-1 alpha-3 or user-assigned).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CountryId([u8; 3]);

impl CountryId {
    /// Parse a code such as `"FRA"`. Letters are uppercased; anything that is
    /// not exactly three ASCII letters or digits is rejected.
    #[must_use]
    pub fn parse(code: &str) -> Option<Self> {
        let bytes: [u8; 3] = code.trim().as_bytes().try_into().ok()?;
        if !bytes.iter().all(u8::is_ascii_alphanumeric) {
            return None;
        }
        Some(Self(bytes.map(|b| b.to_ascii_uppercase())))
    }

    /// The code as text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        // Only ASCII alphanumerics get in through `parse`.
        std::str::from_utf8(&self.0).unwrap_or("???")
    }
}

impl fmt::Display for CountryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for CountryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CountryId({})", self.as_str())
    }
}

impl Serialize for CountryId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A playable country.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Country {
    /// Stable code.
    pub id: CountryId,
    /// Canonical display name.
    pub name: String,
    /// Alternate names that resolve to this country.
    pub aliases: Vec<String>,
    /// Representative point for distance and direction.
    pub centroid: LonLat,
    /// Outline used for the silhouette.
    #[serde(skip)]
    pub geometry: Outline,
}

impl Country {
    /// Create a country entry.
    #[must_use]
    pub fn new(
        id: CountryId,
        name: impl Into<String>,
        aliases: Vec<String>,
        centroid: LonLat,
        geometry: Outline,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            aliases,
            centroid,
            geometry,
        }
    }
}

/// Immutable, name-ordered set of playable countries.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    countries: Vec<Country>,
    by_id: HashMap<CountryId, usize>,
}

impl Catalog {
    /// Build a catalog from ready-made entries.
    ///
    /// Entries with a non-finite centroid are dropped, the first entry wins
    /// for a repeated id, and the result is ordered by name.
    #[must_use]
    pub fn from_countries(countries: impl IntoIterator<Item = Country>) -> Self {
        let mut seen = HashSet::new();
        let mut kept: Vec<Country> = countries
            .into_iter()
            .filter(|country| {
                if !country.centroid.is_finite() {
                    debug!(id = %country.id, "dropping country without a finite centroid");
                    return false;
                }
                seen.insert(country.id)
            })
            .collect();

        kept.sort_by(|a, b| compare_names(&a.name, &b.name));

        let by_id = kept
            .iter()
            .enumerate()
            .map(|(index, country)| (country.id, index))
            .collect();

        Self {
            countries: kept,
            by_id,
        }
    }

    /// Join the reference dataset with boundary features.
    ///
    /// Only eligible reference entries (UN member, independent or
    /// whitelisted) with a numeric code take part. Each boundary feature is
    /// matched on that code; features with unusable geometry are skipped and
    /// the first usable feature for a country wins.
    #[must_use]
    pub fn build(reference: &[ReferenceCountry], features: &[BoundaryFeature]) -> Self {
        let mut eligible_by_code: HashMap<i32, &ReferenceCountry> = HashMap::new();
        for country in reference.iter().filter(|c| is_eligible(c)) {
            if let Some(code) = country.numeric_code() {
                eligible_by_code.insert(code, country);
            }
        }

        let mut seen = HashSet::new();
        let mut countries = Vec::new();

        for feature in features {
            let Some(meta) = feature
                .numeric_code
                .and_then(|code| eligible_by_code.get(&code))
            else {
                continue;
            };
            let Some(id) = CountryId::parse(&meta.cca3) else {
                debug!(code = %meta.cca3, "skipping country with malformed code");
                continue;
            };
            if seen.contains(&id) {
                continue;
            }
            let Some(geometry) = &feature.geometry else {
                debug!(%id, "skipping feature without areal geometry");
                continue;
            };

            let centroid = spherical_centroid(geometry);
            if !centroid.is_finite() {
                debug!(%id, "skipping feature with degenerate geometry");
                continue;
            }

            seen.insert(id);
            countries.push(Country {
                id,
                name: meta.name.common.clone(),
                aliases: assemble_aliases(meta, feature.name.as_deref()),
                centroid,
                geometry: geometry.clone(),
            });
        }

        let catalog = Self::from_countries(countries);
        info!(
            countries = catalog.len(),
            eligible = eligible_by_code.len(),
            features = features.len(),
            "built country catalog"
        );
        catalog
    }

    /// Read both datasets from disk and build the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if either file cannot be read or parsed.
    pub fn load(reference_path: &Path, boundaries_path: &Path) -> Result<Self, DatasetError> {
        let reference = load_reference(reference_path)?;
        let features = load_boundaries(boundaries_path)?;
        Ok(Self::build(&reference, &features))
    }

    /// Look up a country by id.
    #[must_use]
    pub fn get(&self, id: CountryId) -> Option<&Country> {
        self.by_id.get(&id).map(|&index| &self.countries[index])
    }

    /// All countries in name order.
    #[must_use]
    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    /// Iterate in name order.
    pub fn iter(&self) -> std::slice::Iter<'_, Country> {
        self.countries.iter()
    }

    /// Number of countries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.countries.len()
    }

    /// Whether the catalog has no countries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    /// Pick a country uniformly at random.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Country> {
        self.countries.choose(rng)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Country;
    type IntoIter = std::slice::Iter<'a, Country>;

    fn into_iter(self) -> Self::IntoIter {
        self.countries.iter()
    }
}
