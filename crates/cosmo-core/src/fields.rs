use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::products::Product;

/// A product attribute that can be listed, grouped, or cross-tabulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Brand,
    Name,
    Category,
    ProductType,
    /// Preset price bucket label (see [`crate::PriceRange`]).
    PriceRange,
    Currency,
    Tag,
    /// Colour name, lower-cased so shade spellings group together.
    Color,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::Brand,
        Field::Name,
        Field::Category,
        Field::ProductType,
        Field::PriceRange,
        Field::Currency,
        Field::Tag,
        Field::Color,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Brand => "brand",
            Field::Name => "name",
            Field::Category => "category",
            Field::ProductType => "product_type",
            Field::PriceRange => "price_range",
            Field::Currency => "currency",
            Field::Tag => "tag",
            Field::Color => "color",
        }
    }

    /// `true` for fields where one product can carry several values.
    #[must_use]
    pub fn is_multi_valued(self) -> bool {
        matches!(self, Field::Tag | Field::Color)
    }

    /// Returns the product's non-empty values for this field.
    ///
    /// Single-valued fields yield zero or one value. Multi-valued fields yield
    /// each distinct value once, in first-seen order.
    #[must_use]
    pub fn values(self, product: &Product) -> Vec<String> {
        let single = |value: Option<&str>| -> Vec<String> {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .into_iter()
                .collect()
        };

        match self {
            Field::Brand => single(product.brand.as_deref()),
            Field::Name => single(product.name.as_deref()),
            Field::Category => single(product.category.as_deref()),
            Field::ProductType => single(product.product_type.as_deref()),
            Field::Currency => single(product.currency.as_deref()),
            Field::PriceRange => single(product.price_range().map(|r| r.label())),
            Field::Tag => dedup(product.tags.iter().map(|t| t.trim().to_string())),
            Field::Color => dedup(product.color_names().map(|c| c.trim().to_lowercase())),
        }
    }
}

fn dedup(values: impl Iterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for value in values {
        if !value.is_empty() && !out.contains(&value) {
            out.push(value);
        }
    }
    out
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        let normalized = match normalized.as_str() {
            "type" => "product_type",
            "tags" => "tag",
            "colors" | "colour" | "colours" => "color",
            "price" => "price_range",
            other => other,
        }
        .to_string();
        Field::ALL
            .into_iter()
            .find(|f| f.as_str() == normalized)
            .ok_or_else(|| format!("unknown field '{s}'"))
    }
}
