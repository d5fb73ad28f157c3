use std::collections::HashMap;
use std::env::VarError;
use std::path::Path;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_is_an_error() {
    let result = parse_environment("staging");
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "COSMO_ENV"),
        "expected InvalidEnvVar(COSMO_ENV), got: {result:?}"
    );
}

#[test]
fn build_app_config_uses_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.input_path, Path::new("makeup_data.json"));
    assert_eq!(cfg.data_dir, Path::new("data"));
    assert_eq!(cfg.reports_dir, Path::new("reports"));
    assert_eq!(cfg.recommendations_dir, Path::new("recommendations"));
    assert_eq!(cfg.option_threshold, 3);
    assert_eq!(cfg.default_limit, 10);
    assert_eq!(cfg.top_n, 20);
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("COSMO_ENV", "production");
    map.insert("COSMO_LOG_LEVEL", "debug");
    map.insert("COSMO_DATA_DIR", "/tmp/cosmo-data");
    map.insert("COSMO_RECOMMENDATIONS_DIR", "/tmp/recs");
    map.insert("COSMO_OPTION_THRESHOLD", "5");
    map.insert("COSMO_DEFAULT_LIMIT", " 25 ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.log_level, "debug");
    assert_eq!(cfg.data_dir, Path::new("/tmp/cosmo-data"));
    assert_eq!(cfg.recommendations_dir, Path::new("/tmp/recs"));
    assert_eq!(cfg.option_threshold, 5);
    assert_eq!(cfg.default_limit, 25);
}

#[test]
fn build_app_config_option_threshold_invalid() {
    let mut map = HashMap::new();
    map.insert("COSMO_OPTION_THRESHOLD", "three");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "COSMO_OPTION_THRESHOLD"),
        "expected InvalidEnvVar(COSMO_OPTION_THRESHOLD), got: {result:?}"
    );
}

#[test]
fn build_app_config_default_limit_rejects_negative() {
    let mut map = HashMap::new();
    map.insert("COSMO_DEFAULT_LIMIT", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "COSMO_DEFAULT_LIMIT"),
        "expected InvalidEnvVar(COSMO_DEFAULT_LIMIT), got: {result:?}"
    );
}

#[test]
fn build_app_config_top_n_invalid() {
    let mut map = HashMap::new();
    map.insert("COSMO_TOP_N", "lots");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "COSMO_TOP_N"),
        "expected InvalidEnvVar(COSMO_TOP_N), got: {result:?}"
    );
}

#[test]
fn app_config_debug_lists_paths() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let debug = format!("{cfg:?}");
    assert!(debug.contains("recommendations_dir"));
    assert!(debug.contains("option_threshold: 3"));
}
