use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Catalog JSON consumed when no `--input` is given.
    pub input_path: PathBuf,
    /// Destination of the flattened per-table extracts.
    pub data_dir: PathBuf,
    pub reports_dir: PathBuf,
    pub recommendations_dir: PathBuf,
    /// Minimum occurrences before a tag or colour is offered as a filter
    /// option.
    pub option_threshold: usize,
    pub default_limit: usize,
    /// Rows kept in "top N" style reports.
    pub top_n: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("input_path", &self.input_path.display())
            .field("data_dir", &self.data_dir.display())
            .field("reports_dir", &self.reports_dir.display())
            .field("recommendations_dir", &self.recommendations_dir.display())
            .field("option_threshold", &self.option_threshold)
            .field("default_limit", &self.default_limit)
            .field("top_n", &self.top_n)
            .finish()
    }
}
