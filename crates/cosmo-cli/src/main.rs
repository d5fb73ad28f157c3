mod analyze;
mod catalog;
mod convert;
mod options;
mod recommend;
mod run;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::recommend::RecommendArgs;

#[derive(Debug, Parser)]
#[command(name = "cosmo")]
#[command(about = "Cosmetics catalog analysis and product recommendations")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Flatten the catalog JSON into per-table CSV extracts
    Convert {
        /// Catalog JSON file (defaults to `COSMO_INPUT_PATH`)
        #[arg(long, short)]
        input: Option<PathBuf>,
        /// Destination directory (defaults to `COSMO_DATA_DIR`)
        #[arg(long, short)]
        data_dir: Option<PathBuf>,
    },
    /// Write summary statistics and distribution reports
    Analyze {
        /// Catalog JSON file (defaults to `COSMO_INPUT_PATH`)
        #[arg(long, short)]
        input: Option<PathBuf>,
        /// Destination directory (defaults to `COSMO_REPORTS_DIR`)
        #[arg(long, short)]
        reports_dir: Option<PathBuf>,
        /// Rows kept in the brand, tag, and colour rankings
        #[arg(long)]
        top: Option<usize>,
    },
    /// Recommend products matching the given preferences
    Recommend(RecommendArgs),
    /// List the values each preference can take
    Options {
        /// Catalog JSON file (defaults to `COSMO_INPUT_PATH`)
        #[arg(long, short)]
        input: Option<PathBuf>,
        /// Minimum products per tag or colour (defaults to `COSMO_OPTION_THRESHOLD`)
        #[arg(long)]
        threshold: Option<usize>,
        /// Print the options as JSON
        #[arg(long)]
        json: bool,
    },
    /// Convert, then analyze, in one pass
    Run {
        /// Catalog JSON file (defaults to `COSMO_INPUT_PATH`)
        #[arg(long, short)]
        input: Option<PathBuf>,
        /// Skip writing the CSV extracts
        #[arg(long, short = 's')]
        skip_conversion: bool,
        /// Skip the analysis reports
        #[arg(long, short = 'a')]
        skip_analysis: bool,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = cosmo_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(?config, "configuration loaded");

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Convert { input, data_dir }) => {
            let input = input.unwrap_or_else(|| config.input_path.clone());
            let data_dir = data_dir.unwrap_or_else(|| config.data_dir.clone());
            convert::run_convert(&input, &data_dir)
        }
        Some(Commands::Analyze {
            input,
            reports_dir,
            top,
        }) => {
            let input = input.unwrap_or_else(|| config.input_path.clone());
            let reports_dir = reports_dir.unwrap_or_else(|| config.reports_dir.clone());
            analyze::run_analyze(&config, &input, &reports_dir, top)
        }
        Some(Commands::Recommend(args)) => recommend::run_recommend(&config, &args),
        Some(Commands::Options {
            input,
            threshold,
            json,
        }) => {
            let input = input.unwrap_or_else(|| config.input_path.clone());
            let threshold = threshold.unwrap_or(config.option_threshold);
            options::run_options(&input, threshold, json)
        }
        Some(Commands::Run {
            input,
            skip_conversion,
            skip_analysis,
        }) => {
            let input = input.unwrap_or_else(|| config.input_path.clone());
            run::run_pipeline(&config, &input, skip_conversion, skip_analysis)
        }
        None => {
            println!("no command given; run `cosmo --help` for usage");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests;
