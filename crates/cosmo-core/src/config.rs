use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a
/// `HashMap` instead of `set_var`/`remove_var`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("COSMO_ENV", "development"))?;
    let log_level = or_default("COSMO_LOG_LEVEL", "info");

    let input_path = PathBuf::from(or_default("COSMO_INPUT_PATH", "makeup_data.json"));
    let data_dir = PathBuf::from(or_default("COSMO_DATA_DIR", "data"));
    let reports_dir = PathBuf::from(or_default("COSMO_REPORTS_DIR", "reports"));
    let recommendations_dir =
        PathBuf::from(or_default("COSMO_RECOMMENDATIONS_DIR", "recommendations"));

    let option_threshold = parse_usize("COSMO_OPTION_THRESHOLD", "3")?;
    let default_limit = parse_usize("COSMO_DEFAULT_LIMIT", "10")?;
    let top_n = parse_usize("COSMO_TOP_N", "20")?;

    Ok(AppConfig {
        env,
        log_level,
        input_path,
        data_dir,
        reports_dir,
        recommendations_dir,
        option_threshold,
        default_limit,
        top_n,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s.trim() {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "COSMO_ENV".to_string(),
            reason: format!("unrecognized environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
