//! The full analysis pass: every aggregate report for one catalog, written
//! through [`crate::export`].

use std::path::{Path, PathBuf};

use cosmo_catalog::Catalog;
use cosmo_core::{Field, PriceRange};
use cosmo_engine::{brand_price_report, cross_tab, group_counts, summarize, CatalogSummary};

use crate::error::ExportError;
use crate::export::{export, export_json};
use crate::table::Table;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Rows kept in the brand, tag, and colour rankings (`0` keeps all).
    pub top_n: usize,
    /// Minimum row/column total kept in the category by type cross-tab.
    pub cross_tab_threshold: usize,
}

#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub summary: CatalogSummary,
    /// Every file written, in write order.
    pub files: Vec<PathBuf>,
}

/// Price-bucket counts in bucket order, including empty buckets.
#[must_use]
pub fn price_distribution(catalog: &Catalog) -> Table {
    let counts = group_counts(catalog, Field::PriceRange);
    let mut table = Table::new([Field::PriceRange.as_str(), "count"]);
    for range in PriceRange::ALL {
        table.push_row(vec![
            range.label().to_string(),
            counts.get(range.label()).to_string(),
        ]);
    }
    table
}

/// Writes the summary (as JSON and as a `metric,value` CSV) and every
/// analysis CSV into `dir`.
///
/// # Errors
///
/// Returns [`ExportError`] on the first artifact that cannot be written.
pub fn write_analysis(
    catalog: &Catalog,
    dir: &Path,
    options: AnalysisOptions,
) -> Result<AnalysisReport, ExportError> {
    let summary = summarize(catalog);
    let mut files = vec![export_json(&summary, dir, "analysis_stats")?];

    let tables = [
        ("analysis_stats", Table::summary(&summary)),
        (
            "top_brands",
            Table::group_counts(&group_counts(catalog, Field::Brand), options.top_n),
        ),
        (
            "product_types",
            Table::group_counts(&group_counts(catalog, Field::ProductType), 0),
        ),
        ("price_distribution", price_distribution(catalog)),
        (
            "tag_distribution",
            Table::group_counts(&group_counts(catalog, Field::Tag), options.top_n),
        ),
        (
            "color_distribution",
            Table::group_counts(&group_counts(catalog, Field::Color), options.top_n),
        ),
        (
            "brand_price_report",
            Table::price_report(Field::Brand, &brand_price_report(catalog)),
        ),
        (
            "category_type_crosstab",
            Table::cross_tab(
                &cross_tab(catalog, Field::Category, Field::ProductType)
                    .prune(options.cross_tab_threshold),
            ),
        ),
    ];

    for (stem, table) in tables {
        files.push(export(&table, dir, stem)?);
    }

    tracing::info!(
        dir = %dir.display(),
        files = files.len(),
        products = summary.total_products,
        "analysis written"
    );
    Ok(AnalysisReport { summary, files })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = include_str!("../../../test-fixtures/makeup_sample.json");

    fn fixture() -> Catalog {
        Catalog::load_from_str(SAMPLE).expect("fixture loads").0
    }

    #[test]
    fn price_distribution_lists_every_bucket_in_order() {
        let table = price_distribution(&fixture());
        let labels: Vec<&str> = table.rows.iter().map(|r| r[0].as_str()).collect();
        let expected: Vec<&str> = PriceRange::ALL.iter().map(|r| r.label()).collect();
        assert_eq!(labels, expected);
        let counts: Vec<&str> = table.rows.iter().map(|r| r[1].as_str()).collect();
        // 5.0, 5.5, 7.49 | 10.29, 14.99 | 32.0
        assert_eq!(counts, vec!["0", "3", "2", "0", "0", "1"]);
    }

    #[test]
    fn write_analysis_emits_summary_json_and_eight_tables() {
        let dir = tempfile::tempdir().expect("tempdir");
        let report = write_analysis(
            &fixture(),
            dir.path(),
            AnalysisOptions {
                top_n: 2,
                cross_tab_threshold: 1,
            },
        )
        .expect("analysis");

        assert_eq!(report.files.len(), 9);
        assert_eq!(report.summary.total_products, 8);
        for file in &report.files {
            assert!(file.exists(), "{}", file.display());
        }

        let stats = std::fs::read_to_string(&report.files[1]).expect("read");
        assert!(
            stats.starts_with("metric,value\ntotal_products,8\nunique_brands,5\n"),
            "{stats}"
        );
        assert!(stats.contains("\npriced_products,6\n"), "{stats}");

        let brands = std::fs::read_to_string(&report.files[2]).expect("read");
        assert_eq!(brands, "brand,count\nmaybelline,3\ncolourpop,2\n");
    }
}
