//! User preference queries and the preset price buckets they can reference.
//!
//! A [`PreferenceQuery`] is a plain value: however the caller collected it
//! (flags, a YAML file, a prompt), the engine only ever sees the finished
//! struct. [`PreferenceQuery::validate`] must pass before matching starts.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lowest and highest ratings a product can carry.
pub const MIN_RATING: Decimal = Decimal::ONE;
pub const MAX_RATING: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("min_price ({min}) is greater than max_price ({max})")]
    InvertedPriceBounds { min: Decimal, max: Decimal },

    #[error("{field} must not be negative (got {value})")]
    NegativePrice { field: &'static str, value: Decimal },

    #[error("min_rating must be between 1 and 5 (got {value})")]
    RatingOutOfRange { value: Decimal },

    #[error("price range '{range}' does not overlap the requested price bounds")]
    PriceRangeConflict { range: PriceRange },

    #[error("{field} must not be blank")]
    EmptyValue { field: &'static str },

    #[error("unknown price range '{0}'")]
    UnknownPriceRange(String),
}

/// Fixed price buckets used for both reporting and filtering.
///
/// Each bucket is half-open: `[lower, upper)`. `OverThirty` has no upper
/// bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PriceRange {
    #[serde(rename = "Under $5")]
    UnderFive,
    #[serde(rename = "$5-$10")]
    FiveToTen,
    #[serde(rename = "$10-$15")]
    TenToFifteen,
    #[serde(rename = "$15-$20")]
    FifteenToTwenty,
    #[serde(rename = "$20-$30")]
    TwentyToThirty,
    #[serde(rename = "Over $30")]
    OverThirty,
}

impl PriceRange {
    pub const ALL: [PriceRange; 6] = [
        PriceRange::UnderFive,
        PriceRange::FiveToTen,
        PriceRange::TenToFifteen,
        PriceRange::FifteenToTwenty,
        PriceRange::TwentyToThirty,
        PriceRange::OverThirty,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            PriceRange::UnderFive => "Under $5",
            PriceRange::FiveToTen => "$5-$10",
            PriceRange::TenToFifteen => "$10-$15",
            PriceRange::FifteenToTwenty => "$15-$20",
            PriceRange::TwentyToThirty => "$20-$30",
            PriceRange::OverThirty => "Over $30",
        }
    }

    /// Returns `(lower, upper)` where `upper` is exclusive and `None` means
    /// unbounded.
    #[must_use]
    pub fn bounds(self) -> (Decimal, Option<Decimal>) {
        let (lower, upper): (i64, Option<i64>) = match self {
            PriceRange::UnderFive => (0, Some(5)),
            PriceRange::FiveToTen => (5, Some(10)),
            PriceRange::TenToFifteen => (10, Some(15)),
            PriceRange::FifteenToTwenty => (15, Some(20)),
            PriceRange::TwentyToThirty => (20, Some(30)),
            PriceRange::OverThirty => (30, None),
        };
        (Decimal::from(lower), upper.map(Decimal::from))
    }

    #[must_use]
    pub fn contains(self, price: Decimal) -> bool {
        let (lower, upper) = self.bounds();
        price >= lower && upper.is_none_or(|u| price < u)
    }

    /// Returns the bucket containing `price`, or `None` for negative prices.
    #[must_use]
    pub fn for_price(price: Decimal) -> Option<PriceRange> {
        Self::ALL.into_iter().find(|r| r.contains(price))
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PriceRange {
    type Err = QueryError;

    /// Accepts a bucket label (case-insensitive) or its 1-based position in
    /// [`PriceRange::ALL`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(position) = trimmed.parse::<usize>() {
            return position
                .checked_sub(1)
                .and_then(|idx| Self::ALL.get(idx).copied())
                .ok_or_else(|| QueryError::UnknownPriceRange(trimmed.to_string()));
        }
        Self::ALL
            .into_iter()
            .find(|r| r.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| QueryError::UnknownPriceRange(trimmed.to_string()))
    }
}

/// The optional constraints a caller wants applied to the catalog.
///
/// An all-default query constrains nothing and matches every product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreferenceQuery {
    pub brand: Option<String>,
    pub product_type: Option<String>,
    pub category: Option<String>,
    /// Matched with OR semantics; empty means unconstrained.
    pub tags: Vec<String>,
    /// Matched with OR semantics against colour names; empty means
    /// unconstrained.
    pub colors: Vec<String>,
    pub min_rating: Option<Decimal>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub price_range: Option<PriceRange>,
}

impl PreferenceQuery {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Checks the query for internally inconsistent or malformed constraints.
    ///
    /// # Errors
    ///
    /// Returns the first [`QueryError`] found, naming the offending field and
    /// value.
    pub fn validate(&self) -> Result<(), QueryError> {
        for (field, value) in [
            ("brand", &self.brand),
            ("product_type", &self.product_type),
            ("category", &self.category),
        ] {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                return Err(QueryError::EmptyValue { field });
            }
        }
        if self.tags.iter().any(|t| t.trim().is_empty()) {
            return Err(QueryError::EmptyValue { field: "tags" });
        }
        if self.colors.iter().any(|c| c.trim().is_empty()) {
            return Err(QueryError::EmptyValue { field: "colors" });
        }

        if let Some(value) = self.min_rating {
            if value < MIN_RATING || value > MAX_RATING {
                return Err(QueryError::RatingOutOfRange { value });
            }
        }

        for (field, value) in [("min_price", self.min_price), ("max_price", self.max_price)] {
            if let Some(value) = value {
                if value.is_sign_negative() && !value.is_zero() {
                    return Err(QueryError::NegativePrice { field, value });
                }
            }
        }

        if let (Some(min), Some(max)) = (self.min_price, self.max_price) {
            if min > max {
                return Err(QueryError::InvertedPriceBounds { min, max });
            }
        }

        if let Some(range) = self.price_range {
            let (lower, upper) = range.bounds();
            let above_max = self.max_price.is_some_and(|max| max < lower);
            let below_min = matches!((self.min_price, upper), (Some(min), Some(u)) if min >= u);
            if above_max || below_min {
                return Err(QueryError::PriceRangeConflict { range });
            }
        }

        Ok(())
    }

    /// Human-readable list of the constraints that are set, in field order.
    #[must_use]
    pub fn describe(&self) -> Vec<String> {
        let mut applied = Vec::new();
        if let Some(brand) = &self.brand {
            applied.push(format!("Brand: {brand}"));
        }
        if let Some(product_type) = &self.product_type {
            applied.push(format!("Product Type: {product_type}"));
        }
        if let Some(category) = &self.category {
            applied.push(format!("Category: {category}"));
        }
        if let Some(range) = self.price_range {
            applied.push(format!("Price Range: {range}"));
        }
        if let Some(min) = self.min_price {
            applied.push(format!("Minimum Price: {min}"));
        }
        if let Some(max) = self.max_price {
            applied.push(format!("Maximum Price: {max}"));
        }
        if !self.tags.is_empty() {
            applied.push(format!("Tags: {}", self.tags.join(", ")));
        }
        if !self.colors.is_empty() {
            applied.push(format!("Colors: {}", self.colors.join(", ")));
        }
        if let Some(rating) = self.min_rating {
            applied.push(format!("Minimum Rating: {rating}"));
        }
        applied
    }
}
