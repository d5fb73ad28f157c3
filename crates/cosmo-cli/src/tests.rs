use std::path::Path;

use cosmo_core::PriceRange;
use rust_decimal::Decimal;

use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["cosmo"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_convert_with_paths() {
    let cli = Cli::try_parse_from(["cosmo", "convert", "-i", "in.json", "--data-dir", "out"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Convert {
            input: Some(ref i),
            data_dir: Some(ref d),
        }) if i == Path::new("in.json") && d == Path::new("out")
    ));
}

#[test]
fn parses_analyze_defaults() {
    let cli = Cli::try_parse_from(["cosmo", "analyze"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Analyze {
            input: None,
            reports_dir: None,
            top: None
        })
    ));
}

#[test]
fn parses_recommend_with_repeated_tags_and_colors() {
    let cli = Cli::try_parse_from([
        "cosmo",
        "recommend",
        "--brand",
        "maybelline",
        "--tag",
        "vegan",
        "--tag",
        "natural",
        "--color",
        "red",
        "--min-rating",
        "4.5",
        "--max-price",
        "20",
    ])
    .expect("expected valid cli args");

    let Some(Commands::Recommend(args)) = cli.command else {
        panic!("expected recommend command");
    };
    assert_eq!(args.brand.as_deref(), Some("maybelline"));
    assert_eq!(args.tags, vec!["vegan".to_string(), "natural".to_string()]);
    assert_eq!(args.colors, vec!["red".to_string()]);
    assert_eq!(args.min_rating, Some(Decimal::new(45, 1)));
    assert_eq!(args.max_price, Some(Decimal::from(20)));
    assert_eq!(args.limit, None);
}

#[test]
fn parses_price_range_by_label_or_position() {
    let cli = Cli::try_parse_from(["cosmo", "recommend", "--price-range", "$10-$15"])
        .expect("expected valid cli args");
    let Some(Commands::Recommend(args)) = cli.command else {
        panic!("expected recommend command");
    };
    assert_eq!(args.price_range, Some(PriceRange::TenToFifteen));

    let cli = Cli::try_parse_from(["cosmo", "recommend", "--price-range", "1"])
        .expect("expected valid cli args");
    let Some(Commands::Recommend(args)) = cli.command else {
        panic!("expected recommend command");
    };
    assert_eq!(args.price_range, Some(PriceRange::UnderFive));
}

#[test]
fn rejects_unknown_price_range() {
    let result = Cli::try_parse_from(["cosmo", "recommend", "--price-range", "cheap"]);
    assert!(result.is_err());
}

#[test]
fn rejects_non_numeric_price() {
    let result = Cli::try_parse_from(["cosmo", "recommend", "--min-price", "ten"]);
    assert!(result.is_err());
}

#[test]
fn accepts_negative_limit() {
    let cli = Cli::try_parse_from(["cosmo", "recommend", "--limit", "-1"])
        .expect("expected valid cli args");
    let Some(Commands::Recommend(args)) = cli.command else {
        panic!("expected recommend command");
    };
    assert_eq!(args.limit, Some(-1));
}

#[test]
fn parses_options_json_flag() {
    let cli = Cli::try_parse_from(["cosmo", "options", "--threshold", "1", "--json"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Options {
            input: None,
            threshold: Some(1),
            json: true
        })
    ));
}

#[test]
fn parses_run_skip_flags() {
    let cli = Cli::try_parse_from(["cosmo", "run", "-s", "--skip-analysis"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Run {
            input: None,
            skip_conversion: true,
            skip_analysis: true
        })
    ));
}

#[test]
fn run_defaults_to_both_steps() {
    let cli = Cli::try_parse_from(["cosmo", "run"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Run {
            skip_conversion: false,
            skip_analysis: false,
            ..
        })
    ));
}
