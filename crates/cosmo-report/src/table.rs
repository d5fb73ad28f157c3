//! Row shapes handed to the exporter, plus their CSV encoding.
//!
//! Every builder takes already-ordered engine output; a table never sorts
//! its rows itself.

use rust_decimal::Decimal;

use cosmo_core::{Field, Product};
use cosmo_engine::{CatalogSummary, CrossTab, GroupCounts, GroupPriceStats, PriceStats};

/// Columns written for each recommended product.
pub const RECOMMENDATION_HEADERS: [&str; 9] = [
    "id",
    "brand",
    "name",
    "product_type",
    "category",
    "price",
    "price_sign",
    "currency",
    "rating",
];

/// Decimal places kept for derived statistics (mean, quartiles).
const STAT_DP: u32 = 2;

/// A header row plus data rows, all of the same width.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    #[must_use]
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        debug_assert_eq!(row.len(), self.headers.len(), "row width mismatch");
        self.rows.push(row);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Ranked products, one row each, in the order given.
    #[must_use]
    pub fn recommendations(products: &[&Product]) -> Self {
        let mut table = Self::new(RECOMMENDATION_HEADERS);
        for product in products {
            table.push_row(vec![
                product.id.to_string(),
                text(product.brand.as_deref()),
                text(product.name.as_deref()),
                text(product.product_type.as_deref()),
                text(product.category.as_deref()),
                decimal(product.price),
                text(product.price_sign.as_deref()),
                text(product.currency.as_deref()),
                decimal(product.rating),
            ]);
        }
        table
    }

    /// `<field>,count` rows ordered by count descending; `limit` of `0`
    /// keeps every group.
    #[must_use]
    pub fn group_counts(counts: &GroupCounts, limit: usize) -> Self {
        let mut table = Self::new([counts.field.as_str(), "count"]);
        let sorted = counts.sorted();
        let take = if limit == 0 { sorted.len() } else { limit };
        for (group, count) in sorted.into_iter().take(take) {
            table.push_row(vec![group.to_string(), count.to_string()]);
        }
        table
    }

    /// Per-group price statistics, in the order given.
    #[must_use]
    pub fn price_report(field: Field, report: &[GroupPriceStats]) -> Self {
        let mut table = Self::new([
            field.as_str(),
            "count",
            "mean",
            "min",
            "q1",
            "median",
            "q3",
            "max",
        ]);
        for row in report {
            let mut cells = vec![row.group.clone()];
            cells.extend(stat_cells(&row.stats));
            table.push_row(cells);
        }
        table
    }

    /// A wide cross-tab: one row per row key, one column per column key.
    #[must_use]
    pub fn cross_tab(tab: &CrossTab) -> Self {
        let columns = tab.columns();
        let corner = format!("{}/{}", tab.row_field, tab.column_field);
        let mut table = Self::new(
            std::iter::once(corner).chain(columns.iter().map(|c| (*c).to_string())),
        );
        for row in tab.rows() {
            let mut cells = vec![row.to_string()];
            cells.extend(columns.iter().map(|c| tab.get(row, c).to_string()));
            table.push_row(cells);
        }
        table
    }

    /// `metric,value` rows for the headline numbers.
    #[must_use]
    pub fn summary(summary: &CatalogSummary) -> Self {
        let mut table = Self::new(["metric", "value"]);
        let mut push = |metric: &str, value: String| {
            table.push_row(vec![metric.to_string(), value]);
        };
        push("total_products", summary.total_products.to_string());
        push("unique_brands", summary.unique_brands.to_string());
        push("unique_product_types", summary.unique_product_types.to_string());
        push("unique_categories", summary.unique_categories.to_string());
        if let Some(price) = &summary.price {
            let [count, mean, min, q1, median, q3, max] = stat_cells(price);
            push("priced_products", count);
            push("price_mean", mean);
            push("price_min", min);
            push("price_q1", q1);
            push("price_median", median);
            push("price_q3", q3);
            push("price_max", max);
        }
        table
    }

    /// Encodes the table as comma-separated text with RFC 4180 quoting.
    ///
    /// Records end with `\n`. A table with no rows still yields its header.
    #[must_use]
    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        write_record(&mut out, &self.headers);
        for row in &self.rows {
            write_record(&mut out, row);
        }
        out
    }
}

fn stat_cells(stats: &PriceStats) -> [String; 7] {
    [
        stats.count.to_string(),
        rounded(stats.mean),
        rounded(stats.min),
        rounded(stats.q1),
        rounded(stats.median),
        rounded(stats.q3),
        rounded(stats.max),
    ]
}

fn rounded(value: Decimal) -> String {
    value.round_dp(STAT_DP).normalize().to_string()
}

pub(crate) fn text(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

fn decimal(value: Option<Decimal>) -> String {
    value.map(|d| d.to_string()).unwrap_or_default()
}

fn write_record(out: &mut String, fields: &[String]) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        push_field(out, field);
    }
    out.push('\n');
}

/// Quotes a field when it contains a separator, quote, or line break;
/// embedded quotes are doubled.
fn push_field(out: &mut String, field: &str) {
    if field.contains([',', '"', '\n', '\r']) {
        out.push('"');
        out.push_str(&field.replace('"', "\"\""));
        out.push('"');
    } else {
        out.push_str(field);
    }
}
