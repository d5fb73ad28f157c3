//! Flattened per-concern CSV extracts of a loaded catalog.
//!
//! Unlike [`crate::export`], extracts have fixed names and each run replaces
//! the previous run's files. Every file is still staged in the destination
//! directory and renamed over the old one, so readers never see a partial
//! file.

use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};

use cosmo_catalog::Catalog;

use crate::error::ExportError;
use crate::export::{create_dir, stage};
use crate::table::{text, Table};

pub const PRODUCTS_MAIN: &str = "products_main.csv";
pub const PRODUCT_DESCRIPTIONS: &str = "product_descriptions.csv";
pub const PRODUCT_TAGS: &str = "product_tags.csv";
pub const PRODUCT_COLORS: &str = "product_colors.csv";
pub const PRODUCT_URLS: &str = "product_urls.csv";

/// Writes the five catalog extracts into `dir` and returns their paths in a
/// fixed order.
///
/// # Errors
///
/// Returns [`ExportError`] on the first file that cannot be written. Files
/// already replaced stay replaced.
pub fn write_extracts(catalog: &Catalog, dir: &Path) -> Result<Vec<PathBuf>, ExportError> {
    create_dir(dir)?;

    let tables = [
        (PRODUCTS_MAIN, main_table(catalog)),
        (PRODUCT_DESCRIPTIONS, descriptions_table(catalog)),
        (PRODUCT_TAGS, tags_table(catalog)),
        (PRODUCT_COLORS, colors_table(catalog)),
        (PRODUCT_URLS, urls_table(catalog)),
    ];

    let mut written = Vec::with_capacity(tables.len());
    for (name, table) in tables {
        let path = dir.join(name);
        let staged = stage(table.to_csv().as_bytes(), dir)?;
        staged.persist(&path).map_err(|err| ExportError::Persist {
            path: path.display().to_string(),
            source: err.error,
        })?;
        tracing::info!(path = %path.display(), rows = table.len(), "wrote extract");
        written.push(path);
    }
    Ok(written)
}

fn main_table(catalog: &Catalog) -> Table {
    let mut table = Table::new([
        "id",
        "brand",
        "name",
        "price",
        "price_sign",
        "currency",
        "category",
        "product_type",
        "rating",
        "created_at",
        "updated_at",
    ]);
    for p in catalog {
        table.push_row(vec![
            p.id.to_string(),
            text(p.brand.as_deref()),
            text(p.name.as_deref()),
            p.price.map(|d| d.to_string()).unwrap_or_default(),
            text(p.price_sign.as_deref()),
            text(p.currency.as_deref()),
            text(p.category.as_deref()),
            text(p.product_type.as_deref()),
            p.rating.map(|d| d.to_string()).unwrap_or_default(),
            timestamp(p.created_at),
            timestamp(p.updated_at),
        ]);
    }
    table
}

fn descriptions_table(catalog: &Catalog) -> Table {
    let mut table = Table::new(["id", "name", "description"]);
    for p in catalog {
        table.push_row(vec![
            p.id.to_string(),
            text(p.name.as_deref()),
            text(p.description.as_deref()),
        ]);
    }
    table
}

/// One row per (product, tag).
fn tags_table(catalog: &Catalog) -> Table {
    let mut table = Table::new(["id", "name", "tag"]);
    for p in catalog {
        for tag in &p.tags {
            table.push_row(vec![p.id.to_string(), text(p.name.as_deref()), tag.clone()]);
        }
    }
    table
}

/// One row per (product, shade).
fn colors_table(catalog: &Catalog) -> Table {
    let mut table = Table::new(["product_id", "product_name", "colour_name", "hex_value"]);
    for p in catalog {
        for color in &p.colors {
            table.push_row(vec![
                p.id.to_string(),
                text(p.name.as_deref()),
                text(color.name.as_deref()),
                text(color.hex.as_deref()),
            ]);
        }
    }
    table
}

fn urls_table(catalog: &Catalog) -> Table {
    let mut table = Table::new([
        "id",
        "name",
        "image_link",
        "product_link",
        "website_link",
        "product_api_url",
        "api_featured_image",
    ]);
    for p in catalog {
        let links = &p.links;
        table.push_row(vec![
            p.id.to_string(),
            text(p.name.as_deref()),
            text(links.image_link.as_deref()),
            text(links.product_link.as_deref()),
            text(links.website_link.as_deref()),
            text(links.product_api_url.as_deref()),
            text(links.api_featured_image.as_deref()),
        ]);
    }
    table
}

fn timestamp(value: Option<DateTime<Utc>>) -> String {
    value
        .map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_default()
}
