//! Compare command implementation.

use super::output::{JsonComparison, format_comparison_text};
use super::{CliError, DataPaths, OutputFormat, require_country};
use silhouette::{compare, direction_from_to};

/// Execute the compare command.
///
/// # Errors
///
/// Returns an error if the datasets cannot be loaded or either name is unknown.
pub(crate) fn execute(data: &DataPaths, guess: &str, target: &str, format: OutputFormat) -> Result<(), CliError> {
    let atlas = data.load_atlas()?;
    let guess = require_country(&atlas, guess)?;
    let target = require_country(&atlas, target)?;

    let comparison = compare(guess, target);
    let direction = direction_from_to(guess.centroid, target.centroid);

    match format {
        OutputFormat::Text => println!("{}", format_comparison_text(guess, target, &comparison, direction)),
        OutputFormat::Json => {
            let json = JsonComparison::new(guess, target, &comparison, direction);
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }

    Ok(())
}
