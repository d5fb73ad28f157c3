//! `cosmo options`: the values each preference can take.

use std::path::Path;

use cosmo_catalog::filter_options;

use crate::catalog::load_catalog;

/// # Errors
///
/// Returns an error if the catalog cannot be loaded or JSON output fails.
pub(crate) fn run_options(input: &Path, threshold: usize, json: bool) -> anyhow::Result<()> {
    let catalog = load_catalog(input)?;
    let options = filter_options(&catalog, threshold);

    if json {
        println!("{}", serde_json::to_string_pretty(&options)?);
        return Ok(());
    }

    for (title, values) in options.sections() {
        println!("{title} ({}):", values.len());
        if values.is_empty() {
            println!("  (none)");
        }
        for (i, value) in values.iter().enumerate() {
            println!("  {:>3}. {value}", i + 1);
        }
        println!();
    }
    Ok(())
}
