//! `cosmo recommend`: builds a preference query from a YAML file and flags,
//! ranks matching products, prints them, and saves them.

use std::path::PathBuf;

use clap::Args;
use rust_decimal::Decimal;

use cosmo_catalog::{filter_options, suggest, FilterOptions};
use cosmo_core::{load_preferences, AppConfig, PreferenceQuery, PriceRange, Product};
use cosmo_report::{export, Table};

use crate::catalog::load_catalog;

/// Shades listed per product before the rest are summarized.
const SHADES_SHOWN: usize = 5;

#[derive(Debug, Args)]
pub struct RecommendArgs {
    /// Catalog JSON file (defaults to `COSMO_INPUT_PATH`)
    #[arg(long, short)]
    pub input: Option<PathBuf>,
    /// YAML preferences file; flags given alongside it take precedence
    #[arg(long)]
    pub preferences: Option<PathBuf>,
    #[arg(long)]
    pub brand: Option<String>,
    #[arg(long)]
    pub product_type: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    /// Tag to look for; repeat for several (any one matching is enough)
    #[arg(long = "tag")]
    pub tags: Vec<String>,
    /// Colour to look for; repeat for several (any one matching is enough)
    #[arg(long = "color")]
    pub colors: Vec<String>,
    #[arg(long)]
    pub min_rating: Option<Decimal>,
    #[arg(long)]
    pub min_price: Option<Decimal>,
    #[arg(long)]
    pub max_price: Option<Decimal>,
    /// Price bucket by label (e.g. "$5-$10") or 1-based position
    #[arg(long)]
    pub price_range: Option<PriceRange>,
    /// Maximum results; zero or negative returns every match
    #[arg(long, allow_negative_numbers = true)]
    pub limit: Option<i64>,
    /// Print results without saving them
    #[arg(long)]
    pub no_save: bool,
}

/// Merges the preferences file (if any) with the flags. Flags win; repeated
/// `--tag`/`--color` flags replace the file's list rather than extending it.
///
/// # Errors
///
/// Returns an error if the preferences file cannot be read or is invalid.
pub(crate) fn build_query(args: &RecommendArgs) -> anyhow::Result<PreferenceQuery> {
    let mut query = match &args.preferences {
        Some(path) => load_preferences(path)?,
        None => PreferenceQuery::default(),
    };

    if args.brand.is_some() {
        query.brand.clone_from(&args.brand);
    }
    if args.product_type.is_some() {
        query.product_type.clone_from(&args.product_type);
    }
    if args.category.is_some() {
        query.category.clone_from(&args.category);
    }
    if !args.tags.is_empty() {
        query.tags.clone_from(&args.tags);
    }
    if !args.colors.is_empty() {
        query.colors.clone_from(&args.colors);
    }
    query.min_rating = args.min_rating.or(query.min_rating);
    query.min_price = args.min_price.or(query.min_price);
    query.max_price = args.max_price.or(query.max_price);
    query.price_range = args.price_range.or(query.price_range);

    Ok(query)
}

/// Negative limits mean "no limit", the same as zero.
pub(crate) fn effective_limit(requested: Option<i64>, default: usize) -> usize {
    match requested {
        Some(n) => usize::try_from(n).unwrap_or(0),
        None => default,
    }
}

/// "Did you mean" hints for text preferences the catalog has never seen.
pub(crate) fn unknown_value_hints(query: &PreferenceQuery, options: &FilterOptions) -> Vec<String> {
    let checks = [
        ("brand", query.brand.as_deref(), &options.brands),
        ("product type", query.product_type.as_deref(), &options.product_types),
        ("category", query.category.as_deref(), &options.categories),
    ];

    let mut hints = Vec::new();
    for (label, value, known) in checks {
        let Some(value) = value else {
            continue;
        };
        let wanted = value.trim().to_lowercase();
        let exists = known.iter().any(|k| k.trim().to_lowercase() == wanted);
        if exists {
            continue;
        }
        match suggest(value, known) {
            Some(candidate) => {
                hints.push(format!("no {label} \"{value}\"; did you mean \"{candidate}\"?"));
            }
            None => hints.push(format!("no {label} \"{value}\" in the catalog")),
        }
    }
    hints
}

/// # Errors
///
/// Returns an error if the query is invalid, the catalog cannot be loaded,
/// or the results cannot be saved. An empty result is not an error.
pub(crate) fn run_recommend(config: &AppConfig, args: &RecommendArgs) -> anyhow::Result<()> {
    let query = build_query(args)?;
    query.validate()?;

    let input = args.input.clone().unwrap_or_else(|| config.input_path.clone());
    let catalog = load_catalog(&input)?;

    let options = filter_options(&catalog, config.option_threshold);
    for hint in unknown_value_hints(&query, &options) {
        println!("note: {hint}");
    }

    let limit = effective_limit(args.limit, config.default_limit);
    let rec = cosmo_engine::recommend(&catalog, &query, limit)?;

    println!();
    println!("Preferences:");
    let described = query.describe();
    if described.is_empty() {
        println!("  (none; every product qualifies)");
    }
    for line in &described {
        println!("  {line}");
    }
    println!();

    if rec.is_empty() {
        println!("no products match these preferences");
        return Ok(());
    }

    println!(
        "showing {} of {} matching products",
        rec.products.len(),
        rec.total_matches
    );
    println!();
    for (rank, product) in rec.products.iter().enumerate() {
        print_product(rank + 1, product);
    }

    if args.no_save {
        return Ok(());
    }
    let path = export(
        &Table::recommendations(&rec.products),
        &config.recommendations_dir,
        "recommendations",
    )?;
    println!("recommendations saved to {}", path.display());
    Ok(())
}

fn print_product(rank: usize, product: &Product) {
    let name = product.name.as_deref().unwrap_or("(unnamed)");
    let brand = product.brand.as_deref().unwrap_or("unknown brand");
    println!("{rank:>3}. {name} by {brand}");

    let price = match product.price {
        Some(p) => format!("{}{p}", product.price_sign.as_deref().unwrap_or("$")),
        None => "unknown".to_string(),
    };
    let rating = product
        .rating
        .map_or_else(|| "unrated".to_string(), |r| format!("{r}/5"));
    println!("     price: {price}   rating: {rating}");

    let kind = [product.product_type.as_deref(), product.category.as_deref()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" / ");
    if !kind.is_empty() {
        println!("     type: {kind}");
    }
    if !product.tags.is_empty() {
        println!("     tags: {}", product.tags.join(", "));
    }

    let shades: Vec<&str> = product.color_names().collect();
    if !shades.is_empty() {
        let shown = shades.iter().take(SHADES_SHOWN).copied().collect::<Vec<_>>().join(", ");
        if shades.len() > SHADES_SHOWN {
            println!("     shades: {shown} ... and {} more", shades.len() - SHADES_SHOWN);
        } else {
            println!("     shades: {shown}");
        }
    }
    println!();
}
