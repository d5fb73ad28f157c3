//! Coercion helpers for the loosely-typed members of a catalog record.
//!
//! Each numeric coercion returns `Ok(None)` when the value is simply absent,
//! `Ok(Some(_))` when it parsed, and `Err(reason)` when a value was present
//! but unusable. Callers turn `Err` into "unknown" and count it.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::Value;

use cosmo_core::query::{MAX_RATING, MIN_RATING};

/// Prices above this are treated as data errors, not real listings.
pub(crate) const MAX_PRICE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Coerces a raw `price` member into a non-negative decimal no larger than
/// [`MAX_PRICE`].
pub(crate) fn parse_price(value: Option<&Value>) -> Result<Option<Decimal>, String> {
    let Some(price) = parse_decimal(value)? else {
        return Ok(None);
    };
    if price.is_sign_negative() && !price.is_zero() {
        return Err(format!("negative price {price}"));
    }
    if price > MAX_PRICE {
        return Err(format!("price {price} above {MAX_PRICE}"));
    }
    Ok(Some(price.normalize()))
}

/// Coerces a raw `rating` member into a decimal within `[1, 5]`.
pub(crate) fn parse_rating(value: Option<&Value>) -> Result<Option<Decimal>, String> {
    let Some(rating) = parse_decimal(value)? else {
        return Ok(None);
    };
    if rating < MIN_RATING || rating > MAX_RATING {
        return Err(format!("rating {rating} outside 1-5"));
    }
    Ok(Some(rating.normalize()))
}

/// Parses an RFC 3339 timestamp. Timestamps are informational only, so an
/// unparsable value is dropped rather than reported.
pub(crate) fn parse_timestamp(value: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = value.map(str::trim).filter(|v| !v.is_empty())?;
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Trims a text member, treating an empty result as absent.
pub(crate) fn clean_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_decimal(value: Option<&Value>) -> Result<Option<Decimal>, String> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            decimal_from_text(trimmed)
                .map(Some)
                .ok_or_else(|| format!("not a number: {trimmed:?}"))
        }
        Some(Value::Number(n)) => decimal_from_text(&n.to_string())
            .map(Some)
            .ok_or_else(|| format!("number out of range: {n}")),
        Some(other) => Err(format!("unexpected JSON type: {other}")),
    }
}

fn decimal_from_text(text: &str) -> Option<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().expect("valid decimal literal")
    }

    #[test]
    fn price_from_decimal_string() {
        assert_eq!(parse_price(Some(&json!("12.99"))), Ok(Some(dec("12.99"))));
    }

    #[test]
    fn price_from_number() {
        assert_eq!(parse_price(Some(&json!(5))), Ok(Some(dec("5"))));
        assert_eq!(parse_price(Some(&json!(7.5))), Ok(Some(dec("7.5"))));
    }

    #[test]
    fn price_trailing_zeros_normalized() {
        let price = parse_price(Some(&json!("5.0"))).unwrap().unwrap();
        assert_eq!(price.to_string(), "5");
    }

    #[test]
    fn price_absent_forms_are_none() {
        assert_eq!(parse_price(None), Ok(None));
        assert_eq!(parse_price(Some(&Value::Null)), Ok(None));
        assert_eq!(parse_price(Some(&json!("  "))), Ok(None));
    }

    #[test]
    fn price_zero_is_a_known_price() {
        assert_eq!(parse_price(Some(&json!("0.0"))), Ok(Some(Decimal::ZERO)));
    }

    #[test]
    fn price_garbage_is_an_error() {
        assert!(parse_price(Some(&json!("free"))).is_err());
        assert!(parse_price(Some(&json!([1, 2]))).is_err());
        assert!(parse_price(Some(&json!(true))).is_err());
    }

    #[test]
    fn price_negative_is_an_error() {
        assert!(parse_price(Some(&json!("-3"))).is_err());
    }

    #[test]
    fn price_above_ceiling_is_an_error() {
        assert_eq!(parse_price(Some(&json!("1000000"))), Ok(Some(MAX_PRICE)));
        assert!(parse_price(Some(&json!("1000000.01"))).is_err());
        assert!(parse_price(Some(&json!("79228162514264337593543950335"))).is_err());
    }

    #[test]
    fn price_scientific_notation_accepted() {
        assert_eq!(parse_price(Some(&json!("1.5e1"))), Ok(Some(dec("15"))));
    }

    #[test]
    fn rating_within_scale() {
        assert_eq!(parse_rating(Some(&json!(4.5))), Ok(Some(dec("4.5"))));
        assert_eq!(parse_rating(Some(&json!("3"))), Ok(Some(dec("3"))));
        assert_eq!(parse_rating(Some(&json!(1))), Ok(Some(dec("1"))));
        assert_eq!(parse_rating(Some(&json!(5.0))), Ok(Some(dec("5"))));
    }

    #[test]
    fn rating_absent_is_none_not_zero() {
        assert_eq!(parse_rating(Some(&Value::Null)), Ok(None));
        assert_eq!(parse_rating(None), Ok(None));
    }

    #[test]
    fn rating_outside_scale_is_an_error() {
        assert!(parse_rating(Some(&json!(0))).is_err());
        assert!(parse_rating(Some(&json!(5.5))).is_err());
    }

    #[test]
    fn timestamp_rfc3339_parsed() {
        let ts = parse_timestamp(Some("2018-07-08T22:01:20.178Z")).expect("valid timestamp");
        assert_eq!(ts.to_rfc3339(), "2018-07-08T22:01:20.178+00:00");
    }

    #[test]
    fn timestamp_garbage_dropped() {
        assert!(parse_timestamp(Some("yesterday")).is_none());
        assert!(parse_timestamp(Some("")).is_none());
        assert!(parse_timestamp(None).is_none());
    }

    #[test]
    fn clean_text_trims_and_drops_empty() {
        assert_eq!(clean_text(Some("  nyx ".to_string())).as_deref(), Some("nyx"));
        assert_eq!(clean_text(Some("   ".to_string())), None);
        assert_eq!(clean_text(None), None);
    }
}
