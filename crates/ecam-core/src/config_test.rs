use std::collections::HashMap;
use std::env::VarError;

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

/// Returns a map with all required env vars populated with valid defaults.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("ECAM_API_ENDPOINT", "https://api.ecam.test");
    m.insert("ECAM_STORE_ID", "7");
    m
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
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "ECAM_ENV"));
}

#[test]
fn build_app_config_fails_without_api_endpoint() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "ECAM_API_ENDPOINT"),
        "expected MissingEnvVar(ECAM_API_ENDPOINT), got: {result:?}"
    );
}

#[test]
fn build_app_config_treats_blank_api_endpoint_as_missing() {
    let mut map = full_env();
    map.insert("ECAM_API_ENDPOINT", "   ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "ECAM_API_ENDPOINT"),
        "expected MissingEnvVar(ECAM_API_ENDPOINT), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_without_store_id() {
    let mut map: HashMap<&str, &str> = HashMap::new();
    map.insert("ECAM_API_ENDPOINT", "https://api.ecam.test");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "ECAM_STORE_ID"),
        "expected MissingEnvVar(ECAM_STORE_ID), got: {result:?}"
    );
}

#[test]
fn build_app_config_succeeds_with_all_required_vars() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.api_base_url, "https://api.ecam.test");
    assert_eq!(cfg.api_prefix, "api/v1");
    assert_eq!(cfg.store_id, "7");
    assert_eq!(cfg.product_dir, "https://example.com/uploads");
    assert_eq!(cfg.store_dir, "https://example.com/uploads/store");
    assert_eq!(cfg.category_dir, "https://example.com/uploads/category");
    assert!(cfg.messenger_profile_id.is_none());
    assert!(cfg.pixel_id.is_none());
    assert_eq!(cfg.site_origin, "http://localhost:3000");
    assert_eq!(cfg.module_id, "1");
    assert_eq!(cfg.zone_id, "[1]");
    assert_eq!(cfg.http_timeout_secs, 15);
    assert_eq!(cfg.http_user_agent, "ecam/0.1 (storefront)");
    assert_eq!(cfg.http_max_retries, 2);
    assert_eq!(cfg.http_backoff_base_ms, 250);
    assert_eq!(cfg.cache_ttl_secs, 60);
}

#[test]
fn build_app_config_trims_trailing_slashes() {
    let mut map = full_env();
    map.insert("ECAM_API_ENDPOINT", "https://api.ecam.test/");
    map.insert("ECAM_API_PREFIX", "/api/v2/");
    map.insert("ECAM_PRODUCT_DIR", "https://cdn.ecam.test/product/");
    map.insert("ECAM_SITE_ORIGIN", "https://ecam.test/");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.api_base_url, "https://api.ecam.test");
    assert_eq!(cfg.api_prefix, "api/v2");
    assert_eq!(cfg.product_dir, "https://cdn.ecam.test/product");
    assert_eq!(cfg.site_origin, "https://ecam.test");
}

#[test]
fn build_app_config_reads_optional_ids() {
    let mut map = full_env();
    map.insert("ECAM_MESSENGER_PROFILE_ID", "ecamshop");
    map.insert("ECAM_PIXEL_ID", "1286414552944002");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.messenger_profile_id.as_deref(), Some("ecamshop"));
    assert_eq!(cfg.pixel_id.as_deref(), Some("1286414552944002"));
}

#[test]
fn build_app_config_ignores_empty_optional_ids() {
    let mut map = full_env();
    map.insert("ECAM_MESSENGER_PROFILE_ID", "");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.messenger_profile_id.is_none());
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = full_env();
    map.insert("ECAM_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ECAM_BIND_ADDR"),
        "expected InvalidEnvVar(ECAM_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_invalid_env() {
    let mut map = full_env();
    map.insert("ECAM_ENV", "qa");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ECAM_ENV"),
        "expected InvalidEnvVar(ECAM_ENV), got: {result:?}"
    );
}

#[test]
fn http_timeout_secs_override() {
    let mut map = full_env();
    map.insert("ECAM_HTTP_TIMEOUT_SECS", "60");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.http_timeout_secs, 60);
}

#[test]
fn http_timeout_secs_invalid() {
    let mut map = full_env();
    map.insert("ECAM_HTTP_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ECAM_HTTP_TIMEOUT_SECS"),
        "expected InvalidEnvVar(ECAM_HTTP_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn http_max_retries_invalid() {
    let mut map = full_env();
    map.insert("ECAM_HTTP_MAX_RETRIES", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ECAM_HTTP_MAX_RETRIES"),
        "expected InvalidEnvVar(ECAM_HTTP_MAX_RETRIES), got: {result:?}"
    );
}

#[test]
fn cache_ttl_secs_zero_is_accepted() {
    let mut map = full_env();
    map.insert("ECAM_CACHE_TTL_SECS", "0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.cache_ttl_secs, 0);
}

#[test]
fn cache_ttl_secs_invalid() {
    let mut map = full_env();
    map.insert("ECAM_CACHE_TTL_SECS", "forever");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ECAM_CACHE_TTL_SECS"),
        "expected InvalidEnvVar(ECAM_CACHE_TTL_SECS), got: {result:?}"
    );
}
