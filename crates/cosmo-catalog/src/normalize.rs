//! Normalization from [`RawProduct`] to [`cosmo_core::Product`].
//!
//! Numeric coercion is delegated to [`crate::parse`]; this module handles the
//! structural mapping and records which coercions fell back to "unknown".

use cosmo_core::{Product, ProductColor, ProductLinks};

use crate::parse::{clean_text, parse_price, parse_rating, parse_timestamp};
use crate::types::{RawColor, RawProduct};

/// A coercion that failed and was replaced by "unknown".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoercionWarning {
    pub field: &'static str,
    pub reason: String,
}

/// Output of [`normalize_product`]: the product plus any coercion fallbacks.
#[derive(Debug, Clone)]
pub struct NormalizedRecord {
    pub product: Product,
    pub warnings: Vec<CoercionWarning>,
}

impl NormalizedRecord {
    #[must_use]
    pub fn price_coerced(&self) -> bool {
        self.warnings.iter().any(|w| w.field == "price")
    }

    #[must_use]
    pub fn rating_coerced(&self) -> bool {
        self.warnings.iter().any(|w| w.field == "rating")
    }
}

/// Normalizes a structurally valid [`RawProduct`].
///
/// Never fails: text members are trimmed (empty becomes absent), unparsable
/// prices and ratings become unknown with a [`CoercionWarning`], and blank
/// tags and shades are dropped.
#[must_use]
pub fn normalize_product(raw: RawProduct) -> NormalizedRecord {
    let mut warnings = Vec::new();

    let price = parse_price(raw.price.as_ref()).unwrap_or_else(|reason| {
        warnings.push(CoercionWarning {
            field: "price",
            reason,
        });
        None
    });

    let rating = parse_rating(raw.rating.as_ref()).unwrap_or_else(|reason| {
        warnings.push(CoercionWarning {
            field: "rating",
            reason,
        });
        None
    });

    let tags = raw
        .tag_list
        .unwrap_or_default()
        .into_iter()
        .filter_map(|t| clean_text(Some(t)))
        .collect();

    let colors = raw
        .product_colors
        .unwrap_or_default()
        .into_iter()
        .filter_map(normalize_color)
        .collect();

    let product = Product {
        id: raw.id,
        brand: clean_text(raw.brand),
        name: clean_text(raw.name),
        category: clean_text(raw.category),
        product_type: clean_text(raw.product_type),
        price,
        price_sign: clean_text(raw.price_sign),
        currency: clean_text(raw.currency),
        rating,
        tags,
        colors,
        description: clean_text(raw.description),
        links: ProductLinks {
            image_link: clean_text(raw.image_link),
            product_link: clean_text(raw.product_link),
            website_link: clean_text(raw.website_link),
            product_api_url: clean_text(raw.product_api_url),
            api_featured_image: clean_text(raw.api_featured_image),
        },
        created_at: parse_timestamp(raw.created_at.as_deref()),
        updated_at: parse_timestamp(raw.updated_at.as_deref()),
    };

    NormalizedRecord { product, warnings }
}

/// Keeps a shade if it has a hex value or a name; drops fully blank entries.
fn normalize_color(raw: RawColor) -> Option<ProductColor> {
    let hex = clean_text(raw.hex_value);
    let name = clean_text(raw.colour_name);
    if hex.is_none() && name.is_none() {
        return None;
    }
    Some(ProductColor { hex, name })
}
