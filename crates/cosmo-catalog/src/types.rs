//! Raw record types for the makeup catalog JSON.
//!
//! ## Observed shape of catalog records
//!
//! ### `price`
//! Usually a decimal string (`"5.0"`, `"12.99"`), sometimes a bare number,
//! sometimes `null`. A handful of records carry `"0.0"` for products that are
//! simply unpriced. We keep the raw JSON value and coerce it in
//! [`crate::parse`]; anything unparsable becomes "unknown", not zero.
//!
//! ### `rating`
//! A number in `[1, 5]` or `null`. Older exports occasionally stringify it.
//!
//! ### `tag_list`
//! A JSON array of strings, frequently empty. `null` is treated as empty.
//!
//! ### `product_colors`
//! An array of `{hex_value, colour_name}` objects. Either member can be `null`
//! or an empty string, and `hex_value` is not always `#`-prefixed.
//!
//! Any other member with the wrong JSON type (e.g. a numeric `brand`) makes the
//! record structurally malformed; the store skips it and counts the failure.

use serde::Deserialize;
use serde_json::Value;

/// A single catalog entry exactly as it appears in the source JSON.
#[derive(Debug, Deserialize)]
pub struct RawProduct {
    pub id: i64,

    #[serde(default)]
    pub brand: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    /// String, number, or `null`; coerced during normalization.
    #[serde(default)]
    pub price: Option<Value>,

    #[serde(default)]
    pub price_sign: Option<String>,

    #[serde(default)]
    pub currency: Option<String>,

    #[serde(default)]
    pub image_link: Option<String>,

    #[serde(default)]
    pub product_link: Option<String>,

    #[serde(default)]
    pub website_link: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Number, string, or `null`; coerced during normalization.
    #[serde(default)]
    pub rating: Option<Value>,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub product_type: Option<String>,

    #[serde(default)]
    pub tag_list: Option<Vec<String>>,

    /// RFC 3339 timestamp, e.g. `"2018-07-08T22:01:20.178Z"`.
    #[serde(default)]
    pub created_at: Option<String>,

    #[serde(default)]
    pub updated_at: Option<String>,

    #[serde(default)]
    pub product_api_url: Option<String>,

    #[serde(default)]
    pub api_featured_image: Option<String>,

    #[serde(default)]
    pub product_colors: Option<Vec<RawColor>>,
}

/// One shade entry under `product_colors`.
#[derive(Debug, Deserialize)]
pub struct RawColor {
    #[serde(default)]
    pub hex_value: Option<String>,

    #[serde(default)]
    pub colour_name: Option<String>,
}
