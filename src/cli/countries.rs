//! Countries command implementation.

use super::output::{JsonCountry, format_countries_text};
use super::{CliError, DataPaths, OutputFormat};

/// Execute the countries command.
///
/// # Errors
///
/// Returns an error if the datasets cannot be loaded.
pub(crate) fn execute(data: &DataPaths, format: OutputFormat) -> Result<(), CliError> {
    let atlas = data.load_atlas()?;
    let catalog = atlas.catalog();

    match format {
        OutputFormat::Text => print!("{}", format_countries_text(catalog.iter())),
        OutputFormat::Json => {
            let countries: Vec<JsonCountry<'_>> = catalog.iter().map(JsonCountry::from_country).collect();
            println!("{}", serde_json::to_string_pretty(&countries)?);
        }
    }

    Ok(())
}
