use std::path::Path;

use anyhow::Context;

use cosmo_catalog::Catalog;

/// Loads the catalog at `path` and reports how many records were kept.
///
/// Skipped and coerced records are logged by the store; here they are only
/// summarized for the user.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a JSON array.
pub(crate) fn load_catalog(path: &Path) -> anyhow::Result<Catalog> {
    let (catalog, summary) = Catalog::load_file(path)
        .with_context(|| format!("loading catalog from {}", path.display()))?;

    println!(
        "loaded {} products from {} ({} skipped, {} prices and {} ratings unreadable)",
        summary.loaded,
        path.display(),
        summary.skipped,
        summary.coerced_prices,
        summary.coerced_ratings
    );

    if catalog.is_empty() {
        tracing::warn!(path = %path.display(), "catalog contains no usable products");
    }
    Ok(catalog)
}
