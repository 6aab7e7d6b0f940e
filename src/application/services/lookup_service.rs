//! Cache-aside lookups against the upstream shipping API.

use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::gateways::ShippingApi;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::utils::key_validator::{any_key, ensure_valid, is_digits};

/// Fixed cache key for the item-category listing.
pub const ITEM_CATEGORIES_KEY: &str = "item_categories";

/// Read-through cache in front of the shipping API.
///
/// A live cache entry is returned without any I/O. On a miss the upstream is
/// fetched once and the result stored with the cache's TTL; failed fetches
/// leave the cache untouched.
///
/// Two concurrent misses for the same key both fetch; the later write wins.
pub struct LookupService {
    api: Arc<dyn ShippingApi>,
    cache: Arc<dyn CacheService>,
    cache_item_categories: bool,
}

impl LookupService {
    /// Creates a new lookup service. Item categories are not cached.
    pub fn new(api: Arc<dyn ShippingApi>, cache: Arc<dyn CacheService>) -> Self {
        Self {
            api,
            cache,
            cache_item_categories: false,
        }
    }

    /// Caches the item-category listing under [`ITEM_CATEGORIES_KEY`].
    pub fn with_item_category_caching(mut self, enabled: bool) -> Self {
        self.cache_item_categories = enabled;
        self
    }

    pub fn cache(&self) -> &Arc<dyn CacheService> {
        &self.cache
    }

    /// Returns the postal code document for a numeric ID.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidKey`] if `id` is not all digits (upstream untouched)
    /// - Upstream errors from [`ShippingApi::fetch_postal_code`]
    pub async fn postal_code(&self, id: &str) -> Result<Value, AppError> {
        self.lookup(id, is_digits, || self.api.fetch_postal_code(id))
            .await
    }

    /// Returns the item-category listing.
    ///
    /// Always fetched upstream unless item-category caching is enabled.
    ///
    /// # Errors
    ///
    /// Upstream errors from [`ShippingApi::fetch_item_categories`].
    pub async fn item_categories(&self) -> Result<Value, AppError> {
        if !self.cache_item_categories {
            let value = self.api.fetch_item_categories().await?;
            info!("Fetched item categories from upstream");
            return Ok(value);
        }

        self.lookup(ITEM_CATEGORIES_KEY, any_key, || {
            self.api.fetch_item_categories()
        })
        .await
    }

    /// Generic cache-aside lookup.
    ///
    /// Validates `key`, serves a live entry if present, otherwise runs
    /// `fetch` exactly once and caches a successful result.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidKey`] if `validator` rejects `key`, or the
    /// error produced by `fetch`.
    pub async fn lookup<V, F, Fut>(&self, key: &str, validator: V, fetch: F) -> Result<Value, AppError>
    where
        V: Fn(&str) -> bool,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Value, AppError>>,
    {
        ensure_valid(key, validator)?;

        if let Some(cached) = self.cache.get(key) {
            metrics::counter!("postal_relay_cache_lookups_total", "result" => "hit").increment(1);
            debug!(key, "Cache HIT");
            return Ok(cached);
        }

        metrics::counter!("postal_relay_cache_lookups_total", "result" => "miss").increment(1);

        let value = fetch().await?;
        self.cache.set(key, value.clone());
        info!(key, "Cache MISS, fetched from upstream");

        Ok(value)
    }
}
