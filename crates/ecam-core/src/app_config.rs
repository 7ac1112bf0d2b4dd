use std::net::SocketAddr;

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

/// Everything the storefront needs to know about its surroundings.
///
/// Built once at startup by [`crate::load_app_config`] and handed to the
/// catalog client, the variant engine, and the binaries. Nothing downstream
/// reads the environment on its own.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Root of the commerce API, e.g. `https://api.ecamshopping.com`.
    pub api_base_url: String,
    /// Path segment between the base URL and every endpoint, e.g. `api/v1`.
    pub api_prefix: String,
    pub store_id: String,
    /// Directory URL that relative product image paths are resolved against.
    pub product_dir: String,
    pub store_dir: String,
    pub category_dir: String,
    /// Messenger page the "Messenger" button opens; the button is hidden when unset.
    pub messenger_profile_id: Option<String>,
    pub pixel_id: Option<String>,
    /// Public origin of the storefront, used to build share links.
    pub site_origin: String,
    /// Value of the `moduleId` header the item endpoints expect.
    pub module_id: String,
    /// Value of the `zoneId` header, e.g. `[1]`.
    pub zone_id: String,
    pub http_timeout_secs: u64,
    pub http_user_agent: String,
    pub http_max_retries: u32,
    pub http_backoff_base_ms: u64,
    /// Lifetime of memoized catalog responses. `0` disables memoization.
    pub cache_ttl_secs: u64,
}
