// src/services/cache.rs
// DOCUMENTATION: In-memory cache for shop search endpoint responses
// PURPOSE: Avoid re-querying the endpoint when the user searches the same area again

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::models::Shop;

/// Cache entry with expiration
#[derive(Clone, Debug)]
struct CacheEntry<T> {
    data: T,
    expires_at: Instant,
}

impl<T> CacheEntry<T> {
    fn new(data: T, ttl: Duration) -> Self {
        Self {
            data,
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() > self.expires_at
    }
}

/// Thread-safe TTL cache of upstream result sets
/// DOCUMENTATION: Values are shared `Arc<Vec<Shop>>`, hits never copy the list
pub struct ShopsCache {
    store: RwLock<HashMap<String, CacheEntry<Arc<Vec<Shop>>>>>,
    default_ttl: Duration,
}

impl ShopsCache {
    /// Create new cache with default TTL
    pub fn new(ttl_seconds: u64) -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
            default_ttl: Duration::from_secs(ttl_seconds),
        }
    }

    /// Cache key for an upstream query
    /// DOCUMENTATION: Position rounded to ~10m so small GPS jitter still hits
    pub fn generate_key(lat: f64, lng: f64, distance: u32) -> String {
        format!(
            "shops:{}:{}:{}",
            (lat * 10000.0).round() as i64,
            (lng * 10000.0).round() as i64,
            distance
        )
    }

    /// Get cached value
    pub async fn get(&self, key: &str) -> Option<Arc<Vec<Shop>>> {
        let store = self.store.read().await;

        match store.get(key) {
            Some(entry) if !entry.is_expired() => {
                log::debug!("Cache HIT for key: {}", key);
                Some(entry.data.clone())
            }
            Some(_) => {
                log::debug!("Cache EXPIRED for key: {}", key);
                None
            }
            None => {
                log::debug!("Cache MISS for key: {}", key);
                None
            }
        }
    }

    /// Set cached value with default TTL
    pub async fn set(&self, key: String, value: Arc<Vec<Shop>>) {
        self.set_with_ttl(key, value, self.default_ttl).await;
    }

    /// Set cached value with custom TTL
    pub async fn set_with_ttl(&self, key: String, value: Arc<Vec<Shop>>, ttl: Duration) {
        let mut store = self.store.write().await;
        log::debug!("Cache SET for key: {} (TTL: {}s)", key, ttl.as_secs());
        store.insert(key, CacheEntry::new(value, ttl));
    }

    /// Clear expired entries
    pub async fn cleanup(&self) {
        let mut store = self.store.write().await;
        let before_count = store.len();
        store.retain(|_, entry| !entry.is_expired());
        let after_count = store.len();

        if before_count > after_count {
            log::info!(
                "Cache cleanup: removed {} expired entries ({} remaining)",
                before_count - after_count,
                after_count
            );
        }
    }

    /// Get cache statistics
    pub async fn stats(&self) -> CacheStats {
        let store = self.store.read().await;
        let total = store.len();
        let expired = store.values().filter(|e| e.is_expired()).count();
        let cached_shops = store
            .values()
            .filter(|e| !e.is_expired())
            .map(|e| e.data.len())
            .sum();

        CacheStats {
            total_entries: total,
            expired_entries: expired,
            active_entries: total - expired,
            cached_shops,
        }
    }

    /// Clear all cache entries, returns how many were dropped
    pub async fn clear(&self) -> usize {
        let mut store = self.store.write().await;
        let count = store.len();
        store.clear();
        log::info!("Cache cleared: {} entries removed", count);
        count
    }
}

/// Cache statistics
#[derive(Debug, Serialize, Deserialize)]
pub struct CacheStats {
    pub total_entries: usize,
    pub expired_entries: usize,
    pub active_entries: usize,
    pub cached_shops: usize,
}

/// Start background cleanup task
/// DOCUMENTATION: Periodically removes expired entries
pub fn start_cleanup_task(cache: Arc<ShopsCache>, interval_seconds: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(interval_seconds.max(1)));

        loop {
            interval.tick().await;
            cache.cleanup().await;
        }
    });
}
