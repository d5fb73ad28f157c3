//! `cosmo analyze`: summary statistics and distribution reports.

use std::path::Path;

use cosmo_catalog::Catalog;
use cosmo_core::AppConfig;
use cosmo_engine::CatalogSummary;
use cosmo_report::{write_analysis, AnalysisOptions};

use crate::catalog::load_catalog;

/// # Errors
///
/// Returns an error if the catalog cannot be loaded or a report cannot be
/// written.
pub(crate) fn run_analyze(
    config: &AppConfig,
    input: &Path,
    reports_dir: &Path,
    top: Option<usize>,
) -> anyhow::Result<()> {
    let catalog = load_catalog(input)?;
    analyze_catalog(config, &catalog, reports_dir, top)
}

/// # Errors
///
/// Returns an error if a report cannot be written.
pub(crate) fn analyze_catalog(
    config: &AppConfig,
    catalog: &Catalog,
    reports_dir: &Path,
    top: Option<usize>,
) -> anyhow::Result<()> {
    let options = AnalysisOptions {
        top_n: top.unwrap_or(config.top_n),
        cross_tab_threshold: config.option_threshold,
    };
    let report = write_analysis(catalog, reports_dir, options)?;

    print_summary(&report.summary);
    println!();
    for path in &report.files {
        println!("wrote {}", path.display());
    }
    Ok(())
}

fn print_summary(summary: &CatalogSummary) {
    println!("Total products:   {}", summary.total_products);
    println!("Brands:           {}", summary.unique_brands);
    println!("Product types:    {}", summary.unique_product_types);
    println!("Categories:       {}", summary.unique_categories);
    match &summary.price {
        Some(price) => {
            println!("Price range:      ${} - ${}", price.min, price.max);
            println!("Average price:    ${:.2}", price.mean);
            println!("Median price:     ${:.2}", price.median);
        }
        None => println!("Price range:      no known prices"),
    }
}
