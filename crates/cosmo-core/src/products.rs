use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::query::PriceRange;

/// Catalog-wide unique product key, as assigned by the upstream makeup API.
pub type ProductId = i64;

/// A cosmetic product after normalization, ready for matching and
/// aggregation.
///
/// Every field other than `id` is optional: absence is represented as `None`
/// (or an empty `Vec`), never as an empty string or a zero sentinel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub brand: Option<String>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub product_type: Option<String>,
    /// Parsed price. `None` means "unknown", which is distinct from zero.
    pub price: Option<Decimal>,
    /// Display symbol such as `"$"` or `"£"`.
    pub price_sign: Option<String>,
    /// ISO 4217 currency code, e.g. `"USD"`.
    pub currency: Option<String>,
    /// Rating in `[1, 5]`. `None` means the product has not been rated.
    pub rating: Option<Decimal>,
    pub tags: Vec<String>,
    pub colors: Vec<ProductColor>,
    pub description: Option<String>,
    pub links: ProductLinks,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Creates a product with only its key set. Used by normalization and by
    /// tests that fill in the fields they care about.
    #[must_use]
    pub fn new(id: ProductId) -> Self {
        Self {
            id,
            brand: None,
            name: None,
            category: None,
            product_type: None,
            price: None,
            price_sign: None,
            currency: None,
            rating: None,
            tags: Vec::new(),
            colors: Vec::new(),
            description: None,
            links: ProductLinks::default(),
            created_at: None,
            updated_at: None,
        }
    }

    /// Iterates over the colour names that are present, in catalog order.
    pub fn color_names(&self) -> impl Iterator<Item = &str> {
        self.colors.iter().filter_map(|c| c.name.as_deref())
    }

    /// Returns the preset price bucket this product falls into, if its price
    /// is known.
    #[must_use]
    pub fn price_range(&self) -> Option<PriceRange> {
        self.price.and_then(PriceRange::for_price)
    }
}

/// A single shade offered for a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductColor {
    /// Hex colour code as published, e.g. `"#F2C4A0"`. Not always prefixed.
    pub hex: Option<String>,
    /// Marketing shade name, e.g. `"Rosy Nude"`.
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductLinks {
    pub image_link: Option<String>,
    pub product_link: Option<String>,
    pub website_link: Option<String>,
    pub product_api_url: Option<String>,
    pub api_featured_image: Option<String>,
}
