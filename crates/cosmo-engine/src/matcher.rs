//! Predicate Matcher: decides whether one product satisfies one query.
//!
//! Every constraint that is set must hold (AND across fields). Unset
//! constraints impose nothing. A product missing the value a constraint
//! refers to fails that constraint.
//!
//! Tag and colour constraints are OR-matched by case-insensitive substring:
//! any query value contained in any product value satisfies the field. This
//! means `"red"` also matches a shade called `"Bored Beige"`.

use rust_decimal::Decimal;

use cosmo_core::{PreferenceQuery, Product};

/// Returns `true` if `product` satisfies every constraint set in `query`.
///
/// An empty query matches every product, including ones with no optional
/// fields at all.
#[must_use]
pub fn matches(product: &Product, query: &PreferenceQuery) -> bool {
    text_matches(product.brand.as_deref(), query.brand.as_deref())
        && text_matches(product.product_type.as_deref(), query.product_type.as_deref())
        && text_matches(product.category.as_deref(), query.category.as_deref())
        && any_contains(product.tags.iter().map(String::as_str), &query.tags)
        && any_contains(product.color_names(), &query.colors)
        && rating_matches(product.rating, query.min_rating)
        && price_matches(product.price, query)
}

/// Case-insensitive exact comparison after trimming.
fn text_matches(value: Option<&str>, wanted: Option<&str>) -> bool {
    let Some(wanted) = wanted else {
        return true;
    };
    value.is_some_and(|v| v.trim().to_lowercase() == wanted.trim().to_lowercase())
}

/// `true` when `wanted` is empty, or when some wanted value is a
/// case-insensitive substring of some product value.
fn any_contains<'a>(values: impl Iterator<Item = &'a str>, wanted: &[String]) -> bool {
    if wanted.is_empty() {
        return true;
    }
    let wanted: Vec<String> = wanted.iter().map(|w| w.trim().to_lowercase()).collect();
    values
        .map(str::to_lowercase)
        .any(|value| wanted.iter().any(|w| value.contains(w.as_str())))
}

fn rating_matches(rating: Option<Decimal>, min_rating: Option<Decimal>) -> bool {
    match min_rating {
        None => true,
        Some(min) => rating.is_some_and(|r| r >= min),
    }
}

fn price_matches(price: Option<Decimal>, query: &PreferenceQuery) -> bool {
    let constrained =
        query.min_price.is_some() || query.max_price.is_some() || query.price_range.is_some();
    if !constrained {
        return true;
    }
    let Some(price) = price else {
        return false;
    };

    query.min_price.is_none_or(|min| price >= min)
        && query.max_price.is_none_or(|max| price <= max)
        && query.price_range.is_none_or(|range| range.contains(price))
}

#[cfg(test)]
#[path = "matcher_test.rs"]
mod tests;
