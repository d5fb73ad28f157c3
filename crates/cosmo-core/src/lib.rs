pub mod app_config;
pub mod config;
pub mod fields;
pub mod preferences;
pub mod products;
pub mod query;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use fields::Field;
pub use preferences::load_preferences;
pub use products::{Product, ProductColor, ProductId, ProductLinks};
pub use query::{PreferenceQuery, PriceRange, QueryError};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read preferences file {path}: {source}")]
    PreferencesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse preferences file: {0}")]
    PreferencesFileParse(#[from] serde_yaml::Error),

    #[error("invalid preferences: {0}")]
    InvalidPreferences(#[from] QueryError),
}
