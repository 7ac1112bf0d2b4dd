use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
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
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Kept separate from the process environment so tests can feed a plain
/// `HashMap` instead of mutating global state.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> { lookup(var).ok().filter(|v| !v.is_empty()) };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let api_base_url = require("ECAM_API_ENDPOINT")?
        .trim_end_matches('/')
        .to_string();
    let store_id = require("ECAM_STORE_ID")?;

    let env = parse_environment(&or_default("ECAM_ENV", "development"))?;
    let bind_addr = parse_addr("ECAM_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("ECAM_LOG_LEVEL", "info");

    let api_prefix = or_default("ECAM_API_PREFIX", "api/v1")
        .trim_matches('/')
        .to_string();
    let product_dir = trim_dir(&or_default("ECAM_PRODUCT_DIR", "https://example.com/uploads"));
    let store_dir = trim_dir(&or_default(
        "ECAM_STORE_DIR",
        "https://example.com/uploads/store",
    ));
    let category_dir = trim_dir(&or_default(
        "ECAM_CATEGORY_DIR",
        "https://example.com/uploads/category",
    ));
    let messenger_profile_id = optional("ECAM_MESSENGER_PROFILE_ID");
    let pixel_id = optional("ECAM_PIXEL_ID");
    let site_origin = trim_dir(&or_default("ECAM_SITE_ORIGIN", "http://localhost:3000"));
    let module_id = or_default("ECAM_MODULE_ID", "1");
    let zone_id = or_default("ECAM_ZONE_ID", "[1]");

    let http_timeout_secs = parse_u64("ECAM_HTTP_TIMEOUT_SECS", "15")?;
    let http_user_agent = or_default("ECAM_HTTP_USER_AGENT", "ecam/0.1 (storefront)");
    let http_max_retries = parse_u32("ECAM_HTTP_MAX_RETRIES", "2")?;
    let http_backoff_base_ms = parse_u64("ECAM_HTTP_BACKOFF_BASE_MS", "250")?;
    let cache_ttl_secs = parse_u64("ECAM_CACHE_TTL_SECS", "60")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        api_base_url,
        api_prefix,
        store_id,
        product_dir,
        store_dir,
        category_dir,
        messenger_profile_id,
        pixel_id,
        site_origin,
        module_id,
        zone_id,
        http_timeout_secs,
        http_user_agent,
        http_max_retries,
        http_backoff_base_ms,
        cache_ttl_secs,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "ECAM_ENV".to_string(),
            reason: format!("expected development, test, or production; got \"{other}\""),
        }),
    }
}

fn trim_dir(raw: &str) -> String {
    raw.trim_end_matches('/').to_string()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
