// src/services/shop_api_client.rs
// DOCUMENTATION: Client for the upstream shop search endpoint
// PURPOSE: Fetch shop candidates around a position within a radius

use crate::errors::ShopMapError;
use crate::models::Shop;
use crate::services::ShopsCache;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::{Client, StatusCode};
use std::num::NonZeroU32;
use std::sync::Arc;

/// Shop search endpoint client
/// DOCUMENTATION: GET `{base_url}?lat=..&lng=..&distance=..` returning a JSON
/// array of shops. No retry and no timeout beyond reqwest's defaults; a failed
/// call surfaces as `ExternalApiError`.
pub struct ShopApiClient {
    /// HTTP client for making requests
    client: Client,
    /// Endpoint URL, query string is appended
    base_url: String,
    /// Optional shared cache of result sets
    cache: Option<Arc<ShopsCache>>,
    /// Optional outbound quota
    limiter: Option<DefaultDirectRateLimiter>,
}

impl ShopApiClient {
    /// Create new client without cache
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            cache: None,
            limiter: None,
        }
    }

    /// Create new client with a shared cache
    pub fn new_with_cache(base_url: String, cache: Arc<ShopsCache>) -> Self {
        Self {
            cache: Some(cache),
            ..Self::new(base_url)
        }
    }

    /// Limit outbound requests; zero disables the limiter
    pub fn with_rate_limit(mut self, requests_per_second: u32) -> Self {
        self.limiter = NonZeroU32::new(requests_per_second)
            .map(|rps| RateLimiter::direct(Quota::per_second(rps)));
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch shops within `distance` meters of (lat, lng)
    /// DOCUMENTATION: Served from cache when a fresh entry exists; only real
    /// upstream calls count against the rate limit.
    pub async fn fetch_shops(
        &self,
        lat: f64,
        lng: f64,
        distance: u32,
    ) -> Result<Arc<Vec<Shop>>, ShopMapError> {
        let cache_key = ShopsCache::generate_key(lat, lng, distance);

        if let Some(cache) = &self.cache {
            if let Some(shops) = cache.get(&cache_key).await {
                log::info!("Returning {} cached shops for {}", shops.len(), cache_key);
                return Ok(shops);
            }
        }

        if let Some(limiter) = &self.limiter {
            limiter.check().map_err(|_| {
                log::warn!("Shop search endpoint quota exhausted");
                ShopMapError::RateLimitExceeded
            })?;
        }

        log::debug!(
            "Shop search: lat={}, lng={}, distance={}",
            lat,
            lng,
            distance
        );

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("lat", lat.to_string()),
                ("lng", lng.to_string()),
                ("distance", distance.to_string()),
            ])
            .send()
            .await
            .map_err(|e| {
                log::error!("Shop search request failed: {}", e);
                ShopMapError::ExternalApiError(format!("Request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(upstream_status_error(status, &body));
        }

        let shops: Vec<Shop> = response.json().await.map_err(|e| {
            log::error!("Failed to parse shop search response: {}", e);
            ShopMapError::ExternalApiError(format!("Parse error: {}", e))
        })?;

        log::info!("Shop search returned {} shops", shops.len());

        let shops = Arc::new(shops);
        if let Some(cache) = &self.cache {
            cache.set(cache_key, shops.clone()).await;
        }

        Ok(shops)
    }
}

/// Map a non-2xx upstream reply to an error
/// DOCUMENTATION: The body only goes to the log; callers see the status alone.
fn upstream_status_error(status: StatusCode, body: &str) -> ShopMapError {
    log::error!("Shop search endpoint error {}: {}", status, body);
    ShopMapError::ExternalApiError(format!("API error {}", status))
}
