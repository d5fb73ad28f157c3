//! End-to-end recommendation and aggregation checks, on a hand-built
//! three-product catalog and on the shared makeup fixture.

use rust_decimal::Decimal;

use cosmo_catalog::Catalog;
use cosmo_core::{Field, PreferenceQuery, PriceRange, Product, QueryError};
use cosmo_engine::{group_counts, price_stats, recommend, summarize};

const SAMPLE: &str = include_str!("../../../test-fixtures/makeup_sample.json");

fn dec(s: &str) -> Decimal {
    s.parse().expect("valid decimal literal")
}

fn ids(products: &[&Product]) -> Vec<i64> {
    products.iter().map(|p| p.id).collect()
}

/// A = acme/10/4.0/vegan, B = acme/20/unrated, C = other/5/5.0/vegan.
fn abc() -> Catalog {
    let mut a = Product::new(1);
    a.brand = Some("acme".to_string());
    a.price = Some(dec("10"));
    a.rating = Some(dec("4.0"));
    a.tags = vec!["vegan".to_string()];

    let mut b = Product::new(2);
    b.brand = Some("acme".to_string());
    b.price = Some(dec("20"));

    let mut c = Product::new(3);
    c.brand = Some("other".to_string());
    c.price = Some(dec("5"));
    c.rating = Some(dec("5.0"));
    c.tags = vec!["vegan".to_string()];

    Catalog::from_products(vec![a, b, c]).expect("unique ids")
}

fn fixture() -> Catalog {
    Catalog::load_from_str(SAMPLE).expect("fixture is a JSON array").0
}

#[test]
fn brand_query_ranks_rated_before_unrated() {
    let query = PreferenceQuery {
        brand: Some("acme".to_string()),
        ..PreferenceQuery::default()
    };
    let catalog = abc();
    let rec = recommend(&catalog, &query, 10).expect("valid query");
    assert_eq!(ids(&rec.products), vec![1, 2]);
}

#[test]
fn tag_query_ranks_by_rating() {
    let query = PreferenceQuery {
        tags: vec!["vegan".to_string()],
        ..PreferenceQuery::default()
    };
    let catalog = abc();
    let rec = recommend(&catalog, &query, 10).expect("valid query");
    assert_eq!(ids(&rec.products), vec![3, 1]);
}

#[test]
fn min_price_query_keeps_expensive_product() {
    let query = PreferenceQuery {
        min_price: Some(dec("15")),
        ..PreferenceQuery::default()
    };
    let catalog = abc();
    let rec = recommend(&catalog, &query, 10).expect("valid query");
    assert_eq!(ids(&rec.products), vec![2]);
}

#[test]
fn price_range_conflicting_with_max_is_rejected() {
    let query = PreferenceQuery {
        max_price: Some(dec("4")),
        price_range: Some(PriceRange::TenToFifteen),
        ..PreferenceQuery::default()
    };
    let catalog = abc();
    let err = recommend(&catalog, &query, 10).expect_err("conflicting query");
    assert!(matches!(err, QueryError::PriceRangeConflict { .. }));
}

#[test]
fn fixture_vegan_tag_is_case_insensitive() {
    let query = PreferenceQuery {
        tags: vec!["vegan".to_string()],
        ..PreferenceQuery::default()
    };
    let catalog = fixture();
    let rec = recommend(&catalog, &query, 0).expect("valid query");
    // 468 carries a stringified rating; 1048 is unrated.
    assert_eq!(ids(&rec.products), vec![468, 1047, 1048]);
    assert_eq!(rec.total_matches, 3);
}

#[test]
fn fixture_bronzers_with_unknown_price_still_match_without_price_filter() {
    let query = PreferenceQuery {
        product_type: Some("Bronzer".to_string()),
        ..PreferenceQuery::default()
    };
    let catalog = fixture();
    let rec = recommend(&catalog, &query, 0).expect("valid query");
    assert_eq!(ids(&rec.products), vec![495, 488, 468, 477]);
}

#[test]
fn fixture_price_range_excludes_unknown_prices() {
    let query = PreferenceQuery {
        product_type: Some("bronzer".to_string()),
        price_range: Some(PriceRange::TenToFifteen),
        ..PreferenceQuery::default()
    };
    let catalog = fixture();
    let rec = recommend(&catalog, &query, 0).expect("valid query");
    assert_eq!(ids(&rec.products), vec![495, 488]);
}

#[test]
fn fixture_color_substring_and_limit() {
    let query = PreferenceQuery {
        colors: vec!["red".to_string()],
        ..PreferenceQuery::default()
    };
    let catalog = fixture();
    let rec = recommend(&catalog, &query, 2).expect("valid query");
    assert_eq!(ids(&rec.products), vec![380, 1047]);
    assert_eq!(rec.total_matches, 3);
}

#[test]
fn fixture_price_stats() {
    let stats = price_stats(&fixture()).expect("fixture has prices");
    assert_eq!(stats.count, 6);
    assert_eq!(stats.min, dec("5"));
    assert_eq!(stats.max, dec("32"));
    assert_eq!(stats.mean, dec("12.545"));
    assert_eq!(stats.median, dec("8.89"));
}

#[test]
fn fixture_brand_counts() {
    let counts = group_counts(&fixture(), Field::Brand);
    assert_eq!(
        counts.sorted(),
        vec![
            ("maybelline", 3),
            ("colourpop", 2),
            ("dior", 1),
            ("milani", 1),
            ("nyx", 1)
        ]
    );
}

#[test]
fn fixture_summary() {
    let summary = summarize(&fixture());
    assert_eq!(summary.total_products, 8);
    assert_eq!(summary.unique_brands, 5);
    assert_eq!(summary.unique_product_types, 4);
    assert_eq!(summary.unique_categories, 3);
}

#[test]
fn absurd_prices_leave_statistics_to_the_sane_records() {
    let json = r#"[
        {"id": 1, "brand": "nyx", "price": "79228162514264337593543950335"},
        {"id": 2, "brand": "nyx", "price": "79228162514264337593543950335"},
        {"id": 3, "brand": "nyx", "price": "8.00"}
    ]"#;
    let (catalog, load) = Catalog::load_from_str(json).expect("loads");
    assert_eq!(load.coerced_prices, 2);

    let stats = price_stats(&catalog).expect("one sane price");
    assert_eq!(stats.count, 1);
    assert_eq!(stats.mean, dec("8"));
    assert_eq!(summarize(&catalog).total_products, 3);
}
