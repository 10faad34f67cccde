//! Political reference dataset (the `world-countries` JSON layout).

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::DatasetError;

/// Common and official English names.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CountryNames {
    /// Short everyday name, e.g. "Germany".
    pub common: String,
    /// Formal name, e.g. "Federal Republic of Germany".
    pub official: String,
}

/// One entry of the reference dataset. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceCountry {
    /// English names.
    pub name: CountryNames,
    /// ISO 3166-1 alpha-3 (or user-assigned) code.
    pub cca3: String,
    /// ISO 3166-1 numeric code as text, e.g. `"004"`. Empty when unassigned.
    #[serde(default)]
    pub ccn3: String,
    /// Alternate spellings and abbreviations.
    #[serde(default)]
    pub alt_spellings: Vec<String>,
    /// United Nations member state.
    #[serde(default)]
    pub un_member: bool,
    /// Sovereign state; `null` in the dataset for disputed entries.
    #[serde(default)]
    pub independent: Option<bool>,
}

impl ReferenceCountry {
    /// Numeric join key, ignoring leading zeros. `None` when the code is
    /// missing or not a number.
    #[must_use]
    pub fn numeric_code(&self) -> Option<i32> {
        parse_numeric_code(&self.ccn3)
    }
}

/// Parse a numeric country code the way it is written in either dataset
/// (`"004"`, `"4"`, `"-99"`).
pub(crate) fn parse_numeric_code(text: &str) -> Option<i32> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse().ok()
}

/// Parse the reference dataset from JSON text.
///
/// # Errors
///
/// Returns an error if the text is not a JSON array of country entries.
pub fn parse_reference(json: &str) -> Result<Vec<ReferenceCountry>, DatasetError> {
    serde_json::from_str(json).map_err(|source| DatasetError::Json {
        context: "reference countries".to_string(),
        source,
    })
}

/// Read and parse the reference dataset.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_reference(path: &Path) -> Result<Vec<ReferenceCountry>, DatasetError> {
    let text = fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| DatasetError::Json {
        context: path.display().to_string(),
        source,
    })
}
