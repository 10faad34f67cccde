//! Resolve command implementation.

use super::output::{JsonResolution, format_resolution_text};
use super::{CliError, DataPaths, OutputFormat};

/// Execute the resolve command.
///
/// # Errors
///
/// Returns an error if the datasets cannot be loaded.
pub(crate) fn execute(data: &DataPaths, queries: &[String], format: OutputFormat) -> Result<(), CliError> {
    let atlas = data.load_atlas()?;

    match format {
        OutputFormat::Text => {
            for query in queries {
                println!("{}", format_resolution_text(query, atlas.resolve(query)));
            }
        }
        OutputFormat::Json => {
            let results: Vec<JsonResolution<'_>> = queries
                .iter()
                .map(|query| JsonResolution::new(query, atlas.resolve(query)))
                .collect();
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
    }

    Ok(())
}
