//! The catalog together with the lookup structures built from it.

use std::path::Path;

use tracing::info;

use crate::alias::AliasIndex;
use crate::catalog::{Catalog, Country, CountryId};
use crate::error::DatasetError;
use crate::search::{SearchIndex, Suggestion};
use crate::text::normalize_term;

/// Read-only country data shared by every session.
#[derive(Debug, Clone, Default)]
pub struct Atlas {
    catalog: Catalog,
    aliases: AliasIndex,
    search: SearchIndex,
}

impl Atlas {
    /// Build the alias and search indexes for a catalog.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        let aliases = AliasIndex::build(&catalog);
        let search = SearchIndex::build(&catalog);
        info!(countries = catalog.len(), aliases = aliases.len(), "indexed catalog");
        Self {
            catalog,
            aliases,
            search,
        }
    }

    /// Load both datasets and index them.
    ///
    /// # Errors
    ///
    /// Returns an error if either dataset cannot be read or parsed.
    pub fn load(reference_path: &Path, boundaries_path: &Path) -> Result<Self, DatasetError> {
        Catalog::load(reference_path, boundaries_path).map(Self::new)
    }

    /// The playable countries.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Alias lookup.
    #[must_use]
    pub fn aliases(&self) -> &AliasIndex {
        &self.aliases
    }

    /// Country by id.
    #[must_use]
    pub fn country(&self, id: CountryId) -> Option<&Country> {
        self.catalog.get(id)
    }

    /// Resolve free text through the alias index.
    #[must_use]
    pub fn resolve(&self, text: &str) -> Option<&Country> {
        self.aliases.resolve(text, &self.catalog)
    }

    /// Resolve what the player submitted.
    ///
    /// A suggestion the player picked wins as long as the input still reads
    /// as that country's name; otherwise the text goes through the alias
    /// index.
    #[must_use]
    pub fn resolve_input(&self, text: &str, selected: Option<CountryId>) -> Option<&Country> {
        if let Some(country) = selected.and_then(|id| self.catalog.get(id))
            && normalize_term(&country.name) == normalize_term(text)
        {
            return Some(country);
        }
        self.resolve(text)
    }

    /// Type-ahead suggestions for a partial query.
    #[must_use]
    pub fn suggestions(&self, query: &str, limit: usize) -> Vec<Suggestion> {
        self.search.suggestions(query, limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::{LonLat, MultiPolygon};

    fn atlas() -> Atlas {
        let country = |id: &str, name: &str, aliases: &[&str]| {
            Country::new(
                CountryId::parse(id).unwrap(),
                name,
                aliases.iter().map(ToString::to_string).collect(),
                LonLat::new(0.0, 0.0),
                MultiPolygon(Vec::new()),
            )
        };
        Atlas::new(Catalog::from_countries(vec![
            country("NER", "Niger", &[]),
            country("NGA", "Nigeria", &["Federal Republic of Nigeria"]),
        ]))
    }

    #[test]
    fn test_selected_suggestion_wins_when_text_matches() {
        let atlas = atlas();
        let nga = CountryId::parse("NGA").unwrap();
        assert_eq!(atlas.resolve_input("NIGERIA ", Some(nga)).unwrap().id, nga);
    }

    #[test]
    fn test_edited_text_falls_back_to_aliases() {
        let atlas = atlas();
        let nga = CountryId::parse("NGA").unwrap();
        let found = atlas.resolve_input("Niger", Some(nga)).unwrap();
        assert_eq!(found.name, "Niger");
        assert!(atlas.resolve_input("Nowhere", Some(nga)).is_none());
        assert!(atlas.resolve_input("federal republic of nigeria", None).is_some());
    }

    #[test]
    fn test_suggestions_delegate_to_search() {
        let atlas = atlas();
        let names: Vec<String> = atlas.suggestions("nig", 8).into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["Niger", "Nigeria"]);
    }
}
