//! Type-ahead suggestions over canonical country names.

use crate::catalog::{Catalog, CountryId};
use crate::text::normalize_term;

/// Default number of suggestions shown under the input.
pub const DEFAULT_SUGGESTIONS: usize = 8;

/// One suggestion row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// Suggested country.
    pub id: CountryId,
    /// Canonical display name.
    pub name: String,
}

#[derive(Debug, Clone)]
struct SearchEntry {
    id: CountryId,
    name: String,
    key: String,
}

/// Prefix-then-substring matcher over catalog names, in catalog order.
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    entries: Vec<SearchEntry>,
}

impl SearchIndex {
    /// Index the canonical name of every country.
    #[must_use]
    pub fn build(catalog: &Catalog) -> Self {
        let entries = catalog
            .iter()
            .map(|country| SearchEntry {
                id: country.id,
                name: country.name.clone(),
                key: normalize_term(&country.name),
            })
            .collect();
        Self { entries }
    }

    /// Up to `limit` suggestions for a partial query.
    ///
    /// An empty query lists the first countries. Otherwise names starting
    /// with the query come first, then names containing it elsewhere.
    #[must_use]
    pub fn suggestions(&self, query: &str, limit: usize) -> Vec<Suggestion> {
        let query = normalize_term(query);
        let to_suggestion = |entry: &SearchEntry| Suggestion {
            id: entry.id,
            name: entry.name.clone(),
        };

        if query.is_empty() {
            return self.entries.iter().take(limit).map(to_suggestion).collect();
        }

        let starts = self.entries.iter().filter(|e| e.key.starts_with(&query));
        let contains = self
            .entries
            .iter()
            .filter(|e| !e.key.starts_with(&query) && e.key.contains(&query));

        starts.chain(contains).take(limit).map(to_suggestion).collect()
    }

    /// Number of indexed names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Country;
    use crate::geo::{LonLat, MultiPolygon};

    fn catalog(names: &[&str]) -> Catalog {
        Catalog::from_countries(names.iter().enumerate().map(|(i, name)| {
            Country::new(
                CountryId::parse(&format!("C{i:02}")).unwrap(),
                *name,
                Vec::new(),
                LonLat::new(0.0, 0.0),
                MultiPolygon(Vec::new()),
            )
        }))
    }

    fn names(suggestions: &[Suggestion]) -> Vec<&str> {
        suggestions.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_prefix_matches_come_first() {
        let index = SearchIndex::build(&catalog(&["Guinea", "Equatorial Guinea", "Guinea-Bissau", "Papua New Guinea", "Gabon"]));
        let result = index.suggestions("guin", 8);
        assert_eq!(
            names(&result),
            vec!["Guinea", "Guinea-Bissau", "Equatorial Guinea", "Papua New Guinea"]
        );
    }

    #[test]
    fn test_empty_query_lists_first_entries() {
        let index = SearchIndex::build(&catalog(&["Chad", "Benin", "Angola", "Denmark"]));
        assert_eq!(names(&index.suggestions("  ", 2)), vec!["Angola", "Benin"]);
    }

    #[test]
    fn test_limit_and_accents() {
        let index = SearchIndex::build(&catalog(&["Côte d'Ivoire", "Costa Rica", "Comoros"]));
        assert_eq!(names(&index.suggestions("CO", 2)), vec!["Comoros", "Costa Rica"]);
        assert_eq!(names(&index.suggestions("cote", 8)), vec!["Côte d'Ivoire"]);
        assert!(index.suggestions("xyz", 8).is_empty());
    }
}
