//! Turns the API's relative media paths into displayable URLs.

use crate::AppConfig;

/// Shown for product cards that have no image.
pub const PRODUCT_PLACEHOLDER: &str =
    "https://via.placeholder.com/300x300/6B7280/FFFFFF?text=No+Image";

/// Shown in the header when the store has no logo.
pub const STORE_LOGO_PLACEHOLDER: &str = "/logo.png";

/// Base directories for the three kinds of uploaded media.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetUrls {
    product_dir: String,
    store_dir: String,
    category_dir: String,
}

impl AssetUrls {
    #[must_use]
    pub fn new(product_dir: &str, store_dir: &str, category_dir: &str) -> Self {
        Self {
            product_dir: product_dir.trim_end_matches('/').to_owned(),
            store_dir: store_dir.trim_end_matches('/').to_owned(),
            category_dir: category_dir.trim_end_matches('/').to_owned(),
        }
    }

    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.product_dir, &config.store_dir, &config.category_dir)
    }

    #[must_use]
    pub fn product_image(&self, path: Option<&str>) -> String {
        resolve(&self.product_dir, path, PRODUCT_PLACEHOLDER)
    }

    #[must_use]
    pub fn store_logo(&self, path: Option<&str>) -> String {
        resolve(&self.store_dir, path, STORE_LOGO_PLACEHOLDER)
    }

    #[must_use]
    pub fn category_image(&self, path: Option<&str>) -> String {
        resolve(&self.category_dir, path, PRODUCT_PLACEHOLDER)
    }
}

fn resolve(dir: &str, path: Option<&str>, placeholder: &str) -> String {
    match path.map(str::trim) {
        None | Some("") => placeholder.to_owned(),
        Some(p) if p.starts_with("http") => p.to_owned(),
        Some(p) => format!("{dir}/{}", p.trim_start_matches('/')),
    }
}
