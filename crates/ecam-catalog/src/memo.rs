//! Short-lived memoization in front of [`CatalogClient`].
//!
//! Several parts of one page (header, category bar, detail view) ask for the
//! same data; within the TTL they share one response. Concurrent misses on
//! one key share a single upstream fetch. Failures are never stored, so the
//! next caller tries the API again.

use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use ecam_core::{Category, ProductDetail, ProductSummary, StoreProfile};
use moka::future::Cache;

use crate::client::CatalogClient;
use crate::error::CatalogError;

const KEYED_CAPACITY: u64 = 1000;

struct Caches {
    products: Cache<String, ProductDetail>,
    searches: Cache<String, Vec<ProductSummary>>,
    recommended: Cache<(), Vec<ProductSummary>>,
    categories: Cache<(), Vec<Category>>,
    store: Cache<(), StoreProfile>,
}

impl Caches {
    fn new(ttl: Duration) -> Self {
        Self {
            products: build_cache(KEYED_CAPACITY, ttl),
            searches: build_cache(KEYED_CAPACITY, ttl),
            recommended: build_cache(1, ttl),
            categories: build_cache(1, ttl),
            store: build_cache(1, ttl),
        }
    }
}

fn build_cache<K, V>(capacity: u64, ttl: Duration) -> Cache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    Cache::builder()
        .max_capacity(capacity)
        .time_to_live(ttl)
        .build()
}

/// Serves `key` from `cache`, running `fetch` only on a miss.
///
/// With no cache every call runs `fetch`.
async fn memoize<K, V, Fut>(
    cache: Option<&Cache<K, V>>,
    key: K,
    fetch: Fut,
) -> Result<V, Arc<CatalogError>>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
    Fut: Future<Output = Result<V, CatalogError>>,
{
    match cache {
        Some(cache) => cache.try_get_with(key, fetch).await,
        None => fetch.await.map_err(Arc::new),
    }
}

/// [`CatalogClient`] with per-request memoization.
///
/// Exposes the same five operations. A TTL of zero turns every call into a
/// direct pass-through. Errors come back behind an [`Arc`] because callers
/// waiting on the same fetch share its failure.
pub struct MemoizedCatalog {
    inner: CatalogClient,
    caches: Option<Caches>,
}

impl MemoizedCatalog {
    #[must_use]
    pub fn new(inner: CatalogClient, ttl: Duration) -> Self {
        let caches = (!ttl.is_zero()).then(|| Caches::new(ttl));
        Self { inner, caches }
    }

    /// # Errors
    ///
    /// See [`CatalogClient::product_details`].
    pub async fn product_details(&self, slug: &str) -> Result<ProductDetail, Arc<CatalogError>> {
        let cache = self.caches.as_ref().map(|c| &c.products);
        memoize(cache, slug.to_owned(), self.inner.product_details(slug)).await
    }

    /// # Errors
    ///
    /// See [`CatalogClient::search_products`].
    pub async fn search_products(
        &self,
        name: &str,
    ) -> Result<Vec<ProductSummary>, Arc<CatalogError>> {
        let key = name.trim();
        if key.is_empty() {
            return Ok(Vec::new());
        }
        let cache = self.caches.as_ref().map(|c| &c.searches);
        memoize(cache, key.to_owned(), self.inner.search_products(key)).await
    }

    /// # Errors
    ///
    /// See [`CatalogClient::recommended_products`].
    pub async fn recommended_products(&self) -> Result<Vec<ProductSummary>, Arc<CatalogError>> {
        let cache = self.caches.as_ref().map(|c| &c.recommended);
        memoize(cache, (), self.inner.recommended_products()).await
    }

    /// # Errors
    ///
    /// See [`CatalogClient::categories`].
    pub async fn categories(&self) -> Result<Vec<Category>, Arc<CatalogError>> {
        let cache = self.caches.as_ref().map(|c| &c.categories);
        memoize(cache, (), self.inner.categories()).await
    }

    /// # Errors
    ///
    /// See [`CatalogClient::store_profile`].
    pub async fn store_profile(&self) -> Result<StoreProfile, Arc<CatalogError>> {
        let cache = self.caches.as_ref().map(|c| &c.store);
        memoize(cache, (), self.inner.store_profile()).await
    }
}
