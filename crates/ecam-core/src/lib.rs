//! Shared data model and configuration for the ecam storefront.

pub mod app_config;
pub mod assets;
pub mod catalog;
pub mod config;
mod de;

pub use app_config::{AppConfig, Environment};
pub use assets::{AssetUrls, PRODUCT_PLACEHOLDER, STORE_LOGO_PLACEHOLDER};
pub use catalog::{
    Category, ChoiceOption, DiscountType, ProductDetail, ProductImage, ProductSummary,
    RecommendedResponse, SearchResponse, StoreProfile,
};
pub use config::{load_app_config, load_app_config_from_env};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
