//! HTTP client for the storefront's commerce API.

mod endpoint;

use std::time::Duration;

use ecam_core::{
    AppConfig, Category, ProductDetail, ProductSummary, RecommendedResponse, SearchResponse,
    StoreProfile,
};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::CatalogError;
use crate::retry::retry_with_backoff;

use endpoint::{api_root, domain_of, endpoint_url};

/// Connection and retry settings for a [`CatalogClient`].
#[derive(Debug, Clone)]
pub struct CatalogSettings {
    pub base_url: String,
    pub api_prefix: String,
    pub store_id: String,
    pub module_id: String,
    pub zone_id: String,
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Additional attempts after the first failure. `0` disables retries.
    pub max_retries: u32,
    pub backoff_base_ms: u64,
}

impl CatalogSettings {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            base_url: config.api_base_url.clone(),
            api_prefix: config.api_prefix.clone(),
            store_id: config.store_id.clone(),
            module_id: config.module_id.clone(),
            zone_id: config.zone_id.clone(),
            timeout_secs: config.http_timeout_secs,
            user_agent: config.http_user_agent.clone(),
            max_retries: config.http_max_retries,
            backoff_base_ms: config.http_backoff_base_ms,
        }
    }
}

/// Which scoping headers an endpoint expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    /// `moduleId` and `zoneId`: the item endpoints.
    Item,
    /// `zoneId` only: store details.
    Zone,
    None,
}

/// Client for the commerce API.
///
/// Every request goes to `{base_url}/{api_prefix}/...`. 404s surface as
/// [`CatalogError::NotFound`]; 429s, 5xx responses, and network failures are
/// retried with jittered back-off before being returned.
pub struct CatalogClient {
    client: Client,
    root: Url,
    store_id: String,
    module_id: String,
    zone_id: String,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl CatalogClient {
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidBaseUrl`] if the configured endpoint is
    /// not an http(s) URL, or [`CatalogError::Http`] if the `reqwest::Client`
    /// cannot be constructed.
    pub fn new(config: &AppConfig) -> Result<Self, CatalogError> {
        Self::with_settings(CatalogSettings::from_config(config))
    }

    /// # Errors
    ///
    /// Same as [`CatalogClient::new`].
    pub fn with_settings(settings: CatalogSettings) -> Result<Self, CatalogError> {
        let root = api_root(&settings.base_url, &settings.api_prefix)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(settings.user_agent)
            .build()?;

        Ok(Self {
            client,
            root,
            store_id: settings.store_id,
            module_id: settings.module_id,
            zone_id: settings.zone_id,
            max_retries: settings.max_retries,
            backoff_base_ms: settings.backoff_base_ms,
        })
    }

    /// Fetches the full record for the product page at `slug`.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::NotFound`]: no product has that slug.
    /// - [`CatalogError::RateLimited`], [`CatalogError::UnexpectedStatus`],
    ///   [`CatalogError::Http`]: after all retries are exhausted.
    /// - [`CatalogError::Deserialize`]: the body is not a product record.
    pub async fn product_details(&self, slug: &str) -> Result<ProductDetail, CatalogError> {
        let url = endpoint_url(&self.root, &["items", "details", slug], &[])?;
        self.get_json(url, Scope::Item, &format!("product details for {slug}"))
            .await
    }

    /// Searches products by name.
    ///
    /// A blank `name` returns an empty list without calling the API.
    ///
    /// # Errors
    ///
    /// Same as [`CatalogClient::product_details`].
    pub async fn search_products(&self, name: &str) -> Result<Vec<ProductSummary>, CatalogError> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(Vec::new());
        }

        let url = endpoint_url(&self.root, &["items", "search"], &[("name", name)])?;
        let response: SearchResponse = self
            .get_json(url, Scope::Item, &format!("search results for \"{name}\""))
            .await?;
        Ok(response.products)
    }

    /// # Errors
    ///
    /// Same as [`CatalogClient::product_details`].
    pub async fn recommended_products(&self) -> Result<Vec<ProductSummary>, CatalogError> {
        let url = endpoint_url(&self.root, &["items", "recommended"], &[])?;
        let response: RecommendedResponse = self
            .get_json(url, Scope::Item, "recommended products")
            .await?;
        Ok(response.items)
    }

    /// Top-level categories of the configured store, children nested.
    ///
    /// # Errors
    ///
    /// Same as [`CatalogClient::product_details`].
    pub async fn categories(&self) -> Result<Vec<Category>, CatalogError> {
        let url = endpoint_url(
            &self.root,
            &["categories"],
            &[("store_id", self.store_id.as_str())],
        )?;
        self.get_json(url, Scope::None, "categories").await
    }

    /// # Errors
    ///
    /// Same as [`CatalogClient::product_details`].
    pub async fn store_profile(&self) -> Result<StoreProfile, CatalogError> {
        let url = endpoint_url(
            &self.root,
            &["stores", "details", self.store_id.as_str()],
            &[],
        )?;
        self.get_json(url, Scope::Zone, "store profile").await
    }

    async fn get_json<T>(&self, url: Url, scope: Scope, context: &str) -> Result<T, CatalogError>
    where
        T: DeserializeOwned,
    {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let url = url.clone();
            async move {
                let mut request = self
                    .client
                    .get(url.clone())
                    .header(reqwest::header::ACCEPT, "application/json");
                if scope == Scope::Item {
                    request = request.header("moduleId", &self.module_id);
                }
                if matches!(scope, Scope::Item | Scope::Zone) {
                    request = request.header("zoneId", &self.zone_id);
                }

                let response = request.send().await?;
                let status = response.status();

                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(60);
                    return Err(CatalogError::RateLimited {
                        domain: domain_of(&url),
                        retry_after_secs,
                    });
                }

                if status == reqwest::StatusCode::NOT_FOUND {
                    return Err(CatalogError::NotFound {
                        url: url.to_string(),
                    });
                }

                if !status.is_success() {
                    return Err(CatalogError::UnexpectedStatus {
                        status: status.as_u16(),
                        url: url.to_string(),
                    });
                }

                let body = response.text().await?;
                serde_json::from_str::<T>(&body).map_err(|e| CatalogError::Deserialize {
                    context: context.to_owned(),
                    source: e,
                })
            }
        })
        .await
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
