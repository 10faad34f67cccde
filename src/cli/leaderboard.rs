//! Leaderboard command implementation.

use super::output::format_leaderboard_text;
use super::{CliError, DataPaths, OutputFormat};
use silhouette::Leaderboard;

/// Execute the leaderboard command.
///
/// # Errors
///
/// Returns an error if the entries cannot be encoded as JSON.
pub(crate) fn execute(data: &DataPaths, format: OutputFormat) -> Result<(), CliError> {
    let board = Leaderboard::load(&data.leaderboard);

    match format {
        OutputFormat::Text => print!("{}", format_leaderboard_text(board.entries())),
        OutputFormat::Json => println!("{}", board.to_json()?),
    }

    Ok(())
}
