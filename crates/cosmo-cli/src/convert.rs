//! `cosmo convert`: catalog JSON to flattened CSV extracts.

use std::path::Path;

use cosmo_catalog::Catalog;

use crate::catalog::load_catalog;

/// # Errors
///
/// Returns an error if the catalog cannot be loaded or an extract cannot be
/// written.
pub(crate) fn run_convert(input: &Path, data_dir: &Path) -> anyhow::Result<()> {
    let catalog = load_catalog(input)?;
    write_catalog_extracts(&catalog, data_dir)
}

/// # Errors
///
/// Returns an error if an extract cannot be written.
pub(crate) fn write_catalog_extracts(catalog: &Catalog, data_dir: &Path) -> anyhow::Result<()> {
    let written = cosmo_report::write_extracts(catalog, data_dir)?;
    for path in &written {
        println!("wrote {}", path.display());
    }
    Ok(())
}
