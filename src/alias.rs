//! Free-text lookup of countries by name or alias.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::debug;

use crate::catalog::{Catalog, Country, CountryId};
use crate::text::normalize_term;

/// Maps normalized names and aliases to exactly one country.
///
/// A key that two different countries claim is ambiguous and removed, except
/// that every country's own canonical name always resolves to it.
#[derive(Debug, Clone, Default)]
pub struct AliasIndex {
    keys: HashMap<String, CountryId>,
}

impl AliasIndex {
    /// Index every name and alias in the catalog.
    #[must_use]
    pub fn build(catalog: &Catalog) -> Self {
        let mut keys: HashMap<String, CountryId> = HashMap::new();
        let mut collided: Vec<String> = Vec::new();

        for country in catalog {
            let terms = std::iter::once(&country.name).chain(&country.aliases);
            for key in terms.map(|term| normalize_term(term)) {
                if key.is_empty() {
                    continue;
                }
                match keys.entry(key) {
                    Entry::Vacant(slot) => {
                        slot.insert(country.id);
                    }
                    Entry::Occupied(slot) if *slot.get() != country.id => {
                        collided.push(slot.key().clone());
                    }
                    Entry::Occupied(_) => {}
                }
            }
        }

        for key in &collided {
            if keys.remove(key).is_some() {
                debug!(alias = %key, "dropping alias shared by several countries");
            }
        }

        for country in catalog {
            let key = normalize_term(&country.name);
            if !key.is_empty() {
                keys.insert(key, country.id);
            }
        }

        Self { keys }
    }

    /// Country id for an already-normalized key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<CountryId> {
        self.keys.get(key).copied()
    }

    /// Resolve free text to a country.
    ///
    /// Returns `None` for empty input, unknown names, ambiguous aliases, or
    /// an id the catalog does not hold.
    #[must_use]
    pub fn resolve<'a>(&self, text: &str, catalog: &'a Catalog) -> Option<&'a Country> {
        let key = normalize_term(text);
        if key.is_empty() {
            return None;
        }
        self.get(&key).and_then(|id| catalog.get(id))
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the index holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::{LonLat, MultiPolygon};

    fn country(id: &str, name: &str, aliases: &[&str]) -> Country {
        Country::new(
            CountryId::parse(id).unwrap(),
            name,
            aliases.iter().map(ToString::to_string).collect(),
            LonLat::new(0.0, 0.0),
            MultiPolygon(Vec::new()),
        )
    }

    #[test]
    fn test_shared_alias_is_dropped() {
        let catalog = Catalog::from_countries(vec![
            country("AAA", "Alpha", &["Shared", "First Letter"]),
            country("BBB", "Beta", &["Shared"]),
        ]);
        let index = AliasIndex::build(&catalog);

        assert!(index.get("shared").is_none());
        assert!(index.resolve("Shared", &catalog).is_none());
        assert_eq!(index.resolve("alpha", &catalog).unwrap().name, "Alpha");
        assert_eq!(index.resolve("BETA", &catalog).unwrap().name, "Beta");
        assert_eq!(index.resolve("first-letter", &catalog).unwrap().name, "Alpha");
    }

    #[test]
    fn test_canonical_name_survives_collision() {
        let catalog = Catalog::from_countries(vec![
            country("NIG", "Niger", &[]),
            country("NGA", "Nigeria", &["Niger"]),
        ]);
        let index = AliasIndex::build(&catalog);
        assert_eq!(index.resolve("niger", &catalog).unwrap().name, "Niger");
    }

    #[test]
    fn test_resolve_abbreviation_and_unknown() {
        let catalog = Catalog::from_countries(vec![country(
            "USA",
            "United States",
            &["United States of America", "USA", "U.S."],
        )]);
        let index = AliasIndex::build(&catalog);

        assert_eq!(index.resolve("usa", &catalog).unwrap().name, "United States");
        assert_eq!(index.resolve("u s", &catalog).unwrap().name, "United States");
        assert!(index.resolve("unknown", &catalog).is_none());
        assert!(index.resolve("   ", &catalog).is_none());
        assert!(index.resolve("", &catalog).is_none());
    }

    #[test]
    fn test_empty_terms_are_skipped() {
        let catalog = Catalog::from_countries(vec![country("AAA", "Alpha", &["--", "  "])]);
        let index = AliasIndex::build(&catalog);
        assert_eq!(index.len(), 1);
        assert!(index.get("").is_none());
    }

    #[test]
    fn test_missing_catalog_entry_is_not_found() {
        let full = Catalog::from_countries(vec![country("AAA", "Alpha", &[])]);
        let index = AliasIndex::build(&full);
        assert!(index.resolve("alpha", &Catalog::default()).is_none());
    }
}
