//! Filter options offered to whoever builds a [`cosmo_core::PreferenceQuery`],
//! plus "did you mean" suggestions for values that are not in the catalog.

use serde::Serialize;

use cosmo_core::{Field, PriceRange};

use crate::store::{sort_case_insensitive, Catalog};

/// Minimum similarity for [`suggest`] to offer a replacement.
pub const SUGGESTION_CUTOFF: f64 = 0.6;

/// Values available for each filterable field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub brands: Vec<String>,
    pub product_types: Vec<String>,
    pub categories: Vec<String>,
    pub price_ranges: Vec<String>,
    /// Only tags seen on at least `threshold` products.
    pub tags: Vec<String>,
    /// Only colour names seen on at least `threshold` products.
    pub colors: Vec<String>,
}

impl FilterOptions {
    /// `(display name, values)` pairs in presentation order.
    #[must_use]
    pub fn sections(&self) -> [(&'static str, &[String]); 6] {
        [
            ("Brands", self.brands.as_slice()),
            ("Product Types", self.product_types.as_slice()),
            ("Categories", self.categories.as_slice()),
            ("Price Ranges", self.price_ranges.as_slice()),
            ("Tags", self.tags.as_slice()),
            ("Colors", self.colors.as_slice()),
        ]
    }
}

/// Collects the filter options present in `catalog`.
///
/// Text fields list every observed value. Tags and colours are long-tailed,
/// so only values carried by at least `threshold` products are offered.
#[must_use]
pub fn filter_options(catalog: &Catalog, threshold: usize) -> FilterOptions {
    let common = |field: Field| -> Vec<String> {
        let mut values: Vec<String> = catalog
            .value_counts(field)
            .into_iter()
            .filter(|(_, count)| *count >= threshold)
            .map(|(value, _)| value)
            .collect();
        sort_case_insensitive(&mut values);
        values
    };

    let options = FilterOptions {
        brands: catalog.distinct_values(Field::Brand),
        product_types: catalog.distinct_values(Field::ProductType),
        categories: catalog.distinct_values(Field::Category),
        price_ranges: PriceRange::ALL
            .iter()
            .map(|r| r.label().to_string())
            .collect(),
        tags: common(Field::Tag),
        colors: common(Field::Color),
    };

    tracing::debug!(
        brands = options.brands.len(),
        product_types = options.product_types.len(),
        categories = options.categories.len(),
        tags = options.tags.len(),
        colors = options.colors.len(),
        threshold,
        "filter options extracted"
    );

    options
}

/// Returns the option closest to `value`, if any is similar enough.
///
/// Comparison is case-insensitive. An exact case-insensitive match always
/// wins; otherwise the highest [`similarity`] at or above
/// [`SUGGESTION_CUTOFF`] is returned, earliest option first on ties.
#[must_use]
pub fn suggest<'a>(value: &str, options: &'a [String]) -> Option<&'a str> {
    let needle = value.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }

    if let Some(exact) = options.iter().find(|o| o.to_lowercase() == needle) {
        return Some(exact.as_str());
    }

    let mut best: Option<(&'a str, f64)> = None;
    for option in options {
        let score = similarity(&needle, &option.to_lowercase());
        if score >= SUGGESTION_CUTOFF && best.is_none_or(|(_, s)| score > s) {
            best = Some((option.as_str(), score));
        }
    }
    best.map(|(option, _)| option)
}

/// Normalized edit-distance similarity in `[0, 1]`; `1.0` means equal.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let longest = a.len().max(b.len());
    if longest == 0 {
        return 1.0;
    }
    1.0 - levenshtein(&a, &b) as f64 / longest as f64
}

fn levenshtein(a: &[char], b: &[char]) -> usize {
    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != cb);
            current[j + 1] = substitution
                .min(previous[j + 1] + 1)
                .min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}
