//! `cosmo run`: the full convert-then-analyze workflow.

use std::path::Path;

use cosmo_core::AppConfig;

use crate::analyze::analyze_catalog;
use crate::catalog::load_catalog;
use crate::convert::write_catalog_extracts;

/// Loads the catalog once and feeds it to every enabled step.
///
/// # Errors
///
/// Returns an error if `input` does not exist or any enabled step fails.
pub(crate) fn run_pipeline(
    config: &AppConfig,
    input: &Path,
    skip_conversion: bool,
    skip_analysis: bool,
) -> anyhow::Result<()> {
    if !input.is_file() {
        anyhow::bail!("input file {} not found", input.display());
    }
    let catalog = if skip_conversion && skip_analysis {
        None
    } else {
        Some(load_catalog(input)?)
    };

    match &catalog {
        Some(catalog) if !skip_conversion => {
            println!("step 1: converting {} to CSV extracts", input.display());
            write_catalog_extracts(catalog, &config.data_dir)?;
        }
        _ => println!("step 1: skipping conversion"),
    }

    match &catalog {
        Some(catalog) if !skip_analysis => {
            println!("step 2: running analysis");
            analyze_catalog(config, catalog, &config.reports_dir, None)?;
        }
        _ => println!("step 2: skipping analysis"),
    }

    println!();
    println!("done");
    println!("  extracts: {}", config.data_dir.display());
    println!("  reports:  {}", config.reports_dir.display());
    Ok(())
}
