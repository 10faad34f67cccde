//! Eligibility whitelist and hand-maintained alternate names.

use crate::catalog::reference::ReferenceCountry;

/// Partially recognised states that are playable even though the reference
/// dataset marks them neither UN members nor independent.
pub const EXTRA_COUNTRIES: [&str; 4] = ["KOS", "PSE", "TWN", "VAT"];

/// Well-known names the reference dataset does not carry: short forms,
/// former names and common English variants.
pub const CUSTOM_ALIASES: &[(&str, &[&str])] = &[
    ("BRN", &["Brunei Darussalam"]),
    ("COG", &["Republic of the Congo", "Congo Republic"]),
    ("COD", &["DR Congo", "DRC", "Democratic Republic of the Congo"]),
    ("CIV", &["Ivory Coast"]),
    ("CZE", &["Czech Republic"]),
    ("GBR", &["UK", "U.K.", "Britain", "Great Britain"]),
    ("KOR", &["Republic of Korea"]),
    ("PRK", &["DPRK", "Democratic People's Republic of Korea"]),
    ("MMR", &["Burma"]),
    ("MKD", &["Macedonia"]),
    ("RUS", &["Russian Federation"]),
    ("SWZ", &["Swaziland"]),
    ("TZA", &["United Republic of Tanzania"]),
    ("TLS", &["East Timor"]),
    ("USA", &["United States", "USA", "US", "U.S.", "America"]),
    ("VEN", &["Venezuela"]),
    ("VNM", &["Viet Nam"]),
];

/// Alternate spellings this short are mostly ISO codes and too ambiguous.
const MIN_ALT_SPELLING_LEN: usize = 3;

/// Whether a reference entry is playable.
#[must_use]
pub fn is_eligible(country: &ReferenceCountry) -> bool {
    country.un_member
        || country.independent == Some(true)
        || EXTRA_COUNTRIES.contains(&country.cca3.as_str())
}

/// Extra aliases configured for a country code.
#[must_use]
pub fn custom_aliases(cca3: &str) -> &'static [&'static str] {
    CUSTOM_ALIASES
        .iter()
        .find(|(code, _)| *code == cca3)
        .map(|(_, aliases)| *aliases)
        .unwrap_or(&[])
}

/// Assemble the alias list for a country, in insertion order without duplicates.
#[must_use]
pub fn assemble_aliases(country: &ReferenceCountry, feature_name: Option<&str>) -> Vec<String> {
    let mut aliases: Vec<String> = Vec::new();
    let mut add = |alias: &str| {
        if !aliases.iter().any(|existing| existing == alias) {
            aliases.push(alias.to_string());
        }
    };

    add(&country.name.common);
    add(&country.name.official);

    if let Some(name) = feature_name
        && name != country.name.common
    {
        add(name);
    }

    for alt in &country.alt_spellings {
        if alt.chars().count() >= MIN_ALT_SPELLING_LEN {
            add(alt);
        }
    }

    for custom in custom_aliases(&country.cca3) {
        add(custom);
    }

    aliases
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::reference::CountryNames;

    fn reference(cca3: &str, common: &str, official: &str, alts: &[&str]) -> ReferenceCountry {
        ReferenceCountry {
            name: CountryNames {
                common: common.to_string(),
                official: official.to_string(),
            },
            cca3: cca3.to_string(),
            ccn3: String::new(),
            alt_spellings: alts.iter().map(ToString::to_string).collect(),
            un_member: false,
            independent: None,
        }
    }

    #[test]
    fn test_eligibility() {
        let mut country = reference("XXX", "Somewhere", "Somewhere", &[]);
        assert!(!is_eligible(&country));

        country.un_member = true;
        assert!(is_eligible(&country));

        country.un_member = false;
        country.independent = Some(true);
        assert!(is_eligible(&country));

        let taiwan = reference("TWN", "Taiwan", "Republic of China (Taiwan)", &[]);
        assert!(is_eligible(&taiwan));
    }

    #[test]
    fn test_assemble_aliases_order_and_filters() {
        let usa = reference(
            "USA",
            "United States",
            "United States of America",
            &["US", "USA", "United States of America"],
        );
        let aliases = assemble_aliases(&usa, Some("United States of America"));
        assert_eq!(
            aliases,
            vec![
                "United States",
                "United States of America",
                "USA",
                "US",
                "U.S.",
                "America",
            ]
        );
    }

    #[test]
    fn test_feature_name_same_as_common_is_skipped() {
        let france = reference("FRA", "France", "French Republic", &["FR"]);
        let aliases = assemble_aliases(&france, Some("France"));
        assert_eq!(aliases, vec!["France", "French Republic"]);
    }

    #[test]
    fn test_custom_aliases_lookup() {
        assert!(custom_aliases("GBR").contains(&"UK"));
        assert!(custom_aliases("FRA").is_empty());
    }
}
