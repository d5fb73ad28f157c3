//! Aggregation Engine: grouped counts, price statistics, and cross-tabs.
//!
//! Products missing the grouped field are excluded; there is no implicit
//! "unknown" bucket. Results are held in ordered maps so iteration is
//! deterministic, and every "top N" style output goes through an explicit
//! sort ([`GroupCounts::sorted`], [`price_report`]).

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

use cosmo_catalog::Catalog;
use cosmo_core::Field;

/// Number of products per value of one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupCounts {
    pub field: Field,
    pub counts: BTreeMap<String, usize>,
}

impl GroupCounts {
    #[must_use]
    pub fn get(&self, group: &str) -> usize {
        self.counts.get(group).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all group counts.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Groups ordered by count descending, then key ascending.
    #[must_use]
    pub fn sorted(&self) -> Vec<(&str, usize)> {
        let mut rows: Vec<(&str, usize)> = self
            .counts
            .iter()
            .map(|(k, v)| (k.as_str(), *v))
            .collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        rows
    }
}

/// Counts products per value of `field`.
///
/// For single-valued fields the counts sum to the number of products that
/// have a value. For [`Field::Tag`] and [`Field::Color`] each product counts
/// once per distinct value it carries.
#[must_use]
pub fn group_counts(catalog: &Catalog, field: Field) -> GroupCounts {
    GroupCounts {
        field,
        counts: catalog.value_counts(field),
    }
}

/// Descriptive statistics over known prices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceStats {
    pub count: usize,
    pub mean: Decimal,
    pub min: Decimal,
    pub max: Decimal,
    /// 25th percentile, linearly interpolated.
    pub q1: Decimal,
    pub median: Decimal,
    /// 75th percentile, linearly interpolated.
    pub q3: Decimal,
}

impl PriceStats {
    /// Computes statistics over `prices`; `None` when there are none.
    #[must_use]
    pub fn from_prices(mut prices: Vec<Decimal>) -> Option<PriceStats> {
        if prices.is_empty() {
            return None;
        }
        prices.sort_unstable();

        let count = prices.len();
        Some(PriceStats {
            count,
            mean: mean(&prices),
            min: prices[0],
            max: prices[count - 1],
            q1: quantile(&prices, Decimal::new(25, 2)),
            median: quantile(&prices, Decimal::new(5, 1)),
            q3: quantile(&prices, Decimal::new(75, 2)),
        })
    }
}

/// Arithmetic mean of non-empty `values`. When the plain sum would overflow
/// `Decimal`, the terms are divided by the count before being added.
fn mean(values: &[Decimal]) -> Decimal {
    let count = Decimal::from(values.len());
    values
        .iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(*v))
        .map_or_else(
            || {
                values
                    .iter()
                    .fold(Decimal::ZERO, |acc, v| acc.saturating_add(*v / count))
            },
            |sum| sum / count,
        )
}

/// Linear-interpolated quantile of non-empty, ascending `sorted`.
fn quantile(sorted: &[Decimal], q: Decimal) -> Decimal {
    let last = sorted.len() - 1;
    let position = q * Decimal::from(last);
    let lower = position.floor();
    let idx = lower.to_usize().unwrap_or(0).min(last);
    let fraction = position - lower;
    match sorted.get(idx + 1) {
        Some(next) if !fraction.is_zero() => sorted[idx] + (*next - sorted[idx]) * fraction,
        _ => sorted[idx],
    }
}

/// Statistics over every product with a known price.
#[must_use]
pub fn price_stats(catalog: &Catalog) -> Option<PriceStats> {
    PriceStats::from_prices(catalog.iter().filter_map(|p| p.price).collect())
}

/// Statistics per value of `field`, over products with a known price and a
/// value for `field`.
#[must_use]
pub fn price_stats_by(catalog: &Catalog, field: Field) -> BTreeMap<String, PriceStats> {
    let mut grouped: BTreeMap<String, Vec<Decimal>> = BTreeMap::new();
    for product in catalog {
        let Some(price) = product.price else {
            continue;
        };
        for group in field.values(product) {
            grouped.entry(group).or_default().push(price);
        }
    }

    grouped
        .into_iter()
        .filter_map(|(group, prices)| PriceStats::from_prices(prices).map(|s| (group, s)))
        .collect()
}

/// One row of a [`price_report`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupPriceStats {
    pub group: String,
    pub stats: PriceStats,
}

/// [`price_stats_by`] ordered by priced-product count descending, then group
/// key ascending.
#[must_use]
pub fn price_report(catalog: &Catalog, field: Field) -> Vec<GroupPriceStats> {
    let mut rows: Vec<GroupPriceStats> = price_stats_by(catalog, field)
        .into_iter()
        .map(|(group, stats)| GroupPriceStats { group, stats })
        .collect();
    rows.sort_by(|a, b| {
        b.stats
            .count
            .cmp(&a.stats.count)
            .then_with(|| a.group.cmp(&b.group))
    });
    rows
}

/// Per-brand price statistics, largest brands first.
#[must_use]
pub fn brand_price_report(catalog: &Catalog) -> Vec<GroupPriceStats> {
    price_report(catalog, Field::Brand)
}

/// Two-key grouped counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrossTab {
    pub row_field: Field,
    pub column_field: Field,
    #[serde(serialize_with = "serialize_cells")]
    pub cells: BTreeMap<(String, String), usize>,
}

impl CrossTab {
    #[must_use]
    pub fn get(&self, row: &str, column: &str) -> usize {
        self.cells
            .get(&(row.to_string(), column.to_string()))
            .copied()
            .unwrap_or(0)
    }

    /// Row keys in ascending order.
    #[must_use]
    pub fn rows(&self) -> Vec<&str> {
        let keys: BTreeSet<&str> = self.cells.keys().map(|(r, _)| r.as_str()).collect();
        keys.into_iter().collect()
    }

    /// Column keys in ascending order.
    #[must_use]
    pub fn columns(&self) -> Vec<&str> {
        let keys: BTreeSet<&str> = self.cells.keys().map(|(_, c)| c.as_str()).collect();
        keys.into_iter().collect()
    }

    #[must_use]
    pub fn row_total(&self, row: &str) -> usize {
        self.cells
            .iter()
            .filter(|((r, _), _)| r == row)
            .map(|(_, n)| n)
            .sum()
    }

    #[must_use]
    pub fn column_total(&self, column: &str) -> usize {
        self.cells
            .iter()
            .filter(|((_, c), _)| c == column)
            .map(|(_, n)| n)
            .sum()
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.cells.values().sum()
    }

    /// Drops rows and columns whose totals are below `threshold`.
    ///
    /// Totals are taken from the unpruned table, so removing a sparse column
    /// never causes a row to be removed as well.
    #[must_use]
    pub fn prune(&self, threshold: usize) -> CrossTab {
        let keep_rows: BTreeSet<&str> = self
            .rows()
            .into_iter()
            .filter(|r| self.row_total(r) >= threshold)
            .collect();
        let keep_columns: BTreeSet<&str> = self
            .columns()
            .into_iter()
            .filter(|c| self.column_total(c) >= threshold)
            .collect();

        CrossTab {
            row_field: self.row_field,
            column_field: self.column_field,
            cells: self
                .cells
                .iter()
                .filter(|((r, c), _)| {
                    keep_rows.contains(r.as_str()) && keep_columns.contains(c.as_str())
                })
                .map(|(k, v)| (k.clone(), *v))
                .collect(),
        }
    }
}

/// Counts products per `(field_a, field_b)` value pair.
///
/// Products missing either field are excluded. Multi-valued fields
/// contribute one count per distinct value pair.
#[must_use]
pub fn cross_tab(catalog: &Catalog, field_a: Field, field_b: Field) -> CrossTab {
    let mut cells: BTreeMap<(String, String), usize> = BTreeMap::new();
    for product in catalog {
        let rows = field_a.values(product);
        if rows.is_empty() {
            continue;
        }
        let columns = field_b.values(product);
        for row in &rows {
            for column in &columns {
                *cells.entry((row.clone(), column.clone())).or_insert(0) += 1;
            }
        }
    }

    CrossTab {
        row_field: field_a,
        column_field: field_b,
        cells,
    }
}

fn serialize_cells<S>(
    cells: &BTreeMap<(String, String), usize>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use serde::ser::SerializeSeq;

    let mut seq = serializer.serialize_seq(Some(cells.len()))?;
    for ((row, column), count) in cells {
        seq.serialize_element(&(row, column, count))?;
    }
    seq.end()
}

/// Headline numbers for a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogSummary {
    pub total_products: usize,
    pub unique_brands: usize,
    pub unique_product_types: usize,
    pub unique_categories: usize,
    /// `None` when no product has a known price.
    pub price: Option<PriceStats>,
}

#[must_use]
pub fn summarize(catalog: &Catalog) -> CatalogSummary {
    CatalogSummary {
        total_products: catalog.len(),
        unique_brands: catalog.value_counts(Field::Brand).len(),
        unique_product_types: catalog.value_counts(Field::ProductType).len(),
        unique_categories: catalog.value_counts(Field::Category).len(),
        price: price_stats(catalog),
    }
}

#[cfg(test)]
#[path = "aggregate_test.rs"]
mod tests;
