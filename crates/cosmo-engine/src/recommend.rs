//! Validate, match, rank, and truncate: one recommendation per query.

use cosmo_catalog::Catalog;
use cosmo_core::{PreferenceQuery, Product, QueryError};

use crate::matcher::matches;
use crate::rank::rank;

/// Ranked products for one query.
#[derive(Debug, Clone)]
pub struct Recommendation<'a> {
    /// Best-first, truncated to the requested limit.
    pub products: Vec<&'a Product>,
    /// Matches before truncation.
    pub total_matches: usize,
}

impl Recommendation<'_> {
    /// Zero matches is a normal outcome, not an error.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Every product in `catalog` that satisfies `query`, in catalog order.
///
/// Does not validate the query; see [`recommend`].
#[must_use]
pub fn filter<'a>(catalog: &'a Catalog, query: &PreferenceQuery) -> Vec<&'a Product> {
    catalog.iter().filter(|p| matches(p, query)).collect()
}

/// Validates `query`, then matches, ranks, and truncates to `limit`
/// (`0` keeps every match).
///
/// # Errors
///
/// Returns [`QueryError`] before any matching if the query is inconsistent,
/// so an impossible query is never reported as "no results".
pub fn recommend<'a>(
    catalog: &'a Catalog,
    query: &PreferenceQuery,
    limit: usize,
) -> Result<Recommendation<'a>, QueryError> {
    query.validate()?;

    let matched = filter(catalog, query);
    let total_matches = matched.len();
    let products = rank(matched, limit);

    tracing::info!(
        filters = ?query.describe(),
        total_matches,
        returned = products.len(),
        limit,
        "recommendation computed"
    );

    Ok(Recommendation {
        products,
        total_matches,
    })
}
