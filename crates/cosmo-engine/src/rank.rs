//! Ranking & Selection for matched products.

use std::cmp::Ordering;

use cosmo_core::Product;

/// Orders `matches` best-first and keeps at most `limit` of them.
///
/// Order: rating descending (unrated after every rated product), then price
/// ascending (unknown price last), then `id` ascending. The order is total,
/// so the result does not depend on the input order.
///
/// A `limit` of `0`, or one larger than the number of matches, keeps
/// everything.
#[must_use]
pub fn rank(mut matches: Vec<&Product>, limit: usize) -> Vec<&Product> {
    matches.sort_by(|a, b| compare_for_ranking(a, b));
    if limit > 0 {
        matches.truncate(limit);
    }
    matches
}

/// The comparator behind [`rank`]; `Less` means `a` ranks ahead of `b`.
#[must_use]
pub fn compare_for_ranking(a: &Product, b: &Product) -> Ordering {
    let by_rating = match (a.rating, b.rating) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };

    let by_price = || match (a.price, b.price) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };

    by_rating.then_with(by_price).then_with(|| a.id.cmp(&b.id))
}
