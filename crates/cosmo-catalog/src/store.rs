//! The in-memory catalog for one report or recommendation run.
//!
//! Loading never aborts on a single bad record: malformed records are
//! skipped and described in the [`LoadSummary`]. Once built, a [`Catalog`] is
//! read-only.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde_json::Value;

use cosmo_core::{Field, Product, ProductId};

use crate::error::CatalogError;
use crate::normalize::normalize_product;
use crate::types::RawProduct;

/// A record that could not be turned into a [`Product`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    /// Zero-based position of the record in the input sequence.
    pub index: usize,
    /// The record's `id`, when one could be read.
    pub id: Option<ProductId>,
    pub reason: String,
}

/// Counts from one [`Catalog::load`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub loaded: usize,
    pub skipped: usize,
    /// Records kept with their price replaced by "unknown".
    pub coerced_prices: usize,
    /// Records kept with their rating replaced by "unknown".
    pub coerced_ratings: usize,
    pub failures: Vec<ParseFailure>,
}

/// Immutable product collection, ordered by ascending `id`.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Builds a catalog from raw JSON records.
    ///
    /// A record is skipped (and recorded in [`LoadSummary::failures`]) when it
    /// is structurally malformed or repeats an `id` already loaded; the first
    /// occurrence of an `id` wins.
    pub fn load<I>(records: I) -> (Catalog, LoadSummary)
    where
        I: IntoIterator<Item = Value>,
    {
        let mut summary = LoadSummary::default();
        let mut seen: HashSet<ProductId> = HashSet::new();
        let mut products = Vec::new();

        for (index, record) in records.into_iter().enumerate() {
            let id_hint = record.get("id").and_then(Value::as_i64);

            let raw: RawProduct = match serde_json::from_value(record) {
                Ok(raw) => raw,
                Err(e) => {
                    tracing::warn!(
                        record = index,
                        id = ?id_hint,
                        error = %e,
                        "skipping malformed catalog record"
                    );
                    summary.failures.push(ParseFailure {
                        index,
                        id: id_hint,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            if !seen.insert(raw.id) {
                tracing::warn!(record = index, id = raw.id, "skipping duplicate product id");
                summary.failures.push(ParseFailure {
                    index,
                    id: Some(raw.id),
                    reason: format!("duplicate id {}", raw.id),
                });
                continue;
            }

            let normalized = normalize_product(raw);
            for warning in &normalized.warnings {
                tracing::debug!(
                    id = normalized.product.id,
                    field = warning.field,
                    reason = %warning.reason,
                    "value coerced to unknown"
                );
            }
            if normalized.price_coerced() {
                summary.coerced_prices += 1;
            }
            if normalized.rating_coerced() {
                summary.coerced_ratings += 1;
            }
            products.push(normalized.product);
        }

        summary.loaded = products.len();
        summary.skipped = summary.failures.len();
        products.sort_by_key(|p| p.id);

        tracing::info!(
            loaded = summary.loaded,
            skipped = summary.skipped,
            coerced_prices = summary.coerced_prices,
            coerced_ratings = summary.coerced_ratings,
            "catalog loaded"
        );

        (Catalog { products }, summary)
    }

    /// Parses a JSON document holding an array of product records.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Json`] if the document is not valid JSON and
    /// [`CatalogError::NotAnArray`] if its top level is not an array.
    pub fn load_from_str(json: &str) -> Result<(Catalog, LoadSummary), CatalogError> {
        let document: Value = serde_json::from_str(json)?;
        match document {
            Value::Array(records) => Ok(Self::load(records)),
            other => Err(CatalogError::NotAnArray {
                found: json_type_name(&other),
            }),
        }
    }

    /// Reads and parses a catalog file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] if the file cannot be read, otherwise as
    /// [`Catalog::load_from_str`].
    pub fn load_file(path: &Path) -> Result<(Catalog, LoadSummary), CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::load_from_str(&content)
    }

    /// Builds a catalog from already-normalized products.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateId`] if two products share an `id`.
    pub fn from_products(mut products: Vec<Product>) -> Result<Catalog, CatalogError> {
        products.sort_by_key(|p| p.id);
        if let Some(pair) = products.windows(2).find(|w| w[0].id == w[1].id) {
            return Err(CatalogError::DuplicateId(pair[0].id));
        }
        Ok(Catalog { products })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Iterates in ascending `id` order.
    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products
            .binary_search_by_key(&id, |p| p.id)
            .ok()
            .map(|idx| &self.products[idx])
    }

    /// All distinct non-empty values observed for `field`, sorted
    /// case-insensitively (exact spelling breaks ties).
    #[must_use]
    pub fn distinct_values(&self, field: Field) -> Vec<String> {
        let mut values: Vec<String> = self.value_counts(field).into_keys().collect();
        sort_case_insensitive(&mut values);
        values
    }

    /// Number of products carrying each value of `field`.
    ///
    /// Products without a value are not counted anywhere. For multi-valued
    /// fields a product counts once per distinct value it carries.
    #[must_use]
    pub fn value_counts(&self, field: Field) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for product in &self.products {
            for value in field.values(product) {
                *counts.entry(value).or_insert(0) += 1;
            }
        }
        counts
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}

pub(crate) fn sort_case_insensitive(values: &mut [String]) {
    values.sort_by(|a, b| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b))
    });
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
