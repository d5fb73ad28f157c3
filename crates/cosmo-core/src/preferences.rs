use std::path::Path;

use crate::query::PreferenceQuery;
use crate::ConfigError;

/// Load and validate a preference query from a YAML file.
///
/// Missing keys are unconstrained; unknown keys are rejected so a typo does
/// not silently widen the query.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// [`PreferenceQuery::validate`].
pub fn load_preferences(path: &Path) -> Result<PreferenceQuery, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::PreferencesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_preferences(&content)
}

fn parse_preferences(content: &str) -> Result<PreferenceQuery, ConfigError> {
    // An empty document deserializes to `null`; treat it as "no preferences".
    if content.trim().is_empty() {
        return Ok(PreferenceQuery::default());
    }

    let query: PreferenceQuery = serde_yaml::from_str(content)?;
    query.validate()?;
    Ok(query)
}
