//! Outline command implementation.

use super::{CliError, DataPaths, OutlineFormat, require_country};
use silhouette::geo::projection::{Extent, rasterize, svg_path};

/// Execute the outline command.
///
/// # Errors
///
/// Returns an error if the datasets cannot be loaded, the name is unknown or
/// the requested grid is empty.
pub(crate) fn execute(
    data: &DataPaths,
    country: &str,
    format: OutlineFormat,
    width: usize,
    height: usize,
) -> Result<(), CliError> {
    let atlas = data.load_atlas()?;
    let country = require_country(&atlas, country)?;

    match format {
        OutlineFormat::Ascii => {
            if width == 0 || height == 0 {
                return Err(CliError::new("Outline size must be at least 1x1"));
            }
            println!("{} ({})", country.name, country.id);
            for row in rasterize(&country.geometry, width, height) {
                println!("{}", row.trim_end());
            }
        }
        OutlineFormat::Svg => {
            let extent = Extent::SILHOUETTE;
            println!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}"><path fill-rule="evenodd" d="{}"/></svg>"#,
                extent.x1 + extent.x0,
                extent.y1 + extent.y0,
                svg_path(&country.geometry, extent)
            );
        }
    }

    Ok(())
}
