// src/config/env.rs
// DOCUMENTATION: Environment variable management
// PURPOSE: Load and validate configuration from .env files

use dotenv::dotenv;
use std::env;
use std::str::FromStr;

use crate::models::LatLng;

/// Shin-Yahashira station, the map's initial center before geolocation resolves
const DEFAULT_LAT: f64 = 35.791714531276135;
const DEFAULT_LNG: f64 = 139.93828231114674;

const OSM_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
const OSM_ATTRIBUTION: &str =
    "&copy; <a href=\"http://osm.org/copyright\">OpenStreetMap</a> contributors";

/// Application configuration loaded from environment variables
/// DOCUMENTATION: Centralizes all configuration in one struct
/// Load with Config::from_env() at application startup
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "127.0.0.1")
    pub server_address: String,

    /// Server listen port (default 8003)
    pub server_port: u16,

    /// Environment: development, staging, production
    pub environment: String,

    /// Log level: debug, info, warn, error
    pub log_level: String,

    /// Upstream shop search endpoint (queried with lat, lng, distance)
    pub shop_api_url: String,

    /// Admin authentication token (for cache endpoints)
    pub admin_token: String,

    /// How long upstream results stay cached
    pub cache_ttl_seconds: u64,

    /// Interval of the expired-entry sweep
    pub cache_cleanup_interval_seconds: u64,

    /// Upstream request quota, 0 disables the limiter
    pub upstream_requests_per_second: u32,

    pub map_default_lat: f64,
    pub map_default_lng: f64,
    pub map_default_zoom: u8,
    pub map_tile_url: String,
    pub map_tile_attribution: String,

    /// Where category marker images are served from
    pub marker_icon_base_url: String,
}

fn parse_or<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            log::warn!("Ignoring unparsable {}={}", key, raw);
            default
        }),
        Err(_) => default,
    }
}

fn string_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

impl Config {
    /// Load configuration from environment variables
    /// DOCUMENTATION: Reads from .env or process environment
    /// Called once at application startup
    pub fn from_env() -> Self {
        dotenv().ok();

        Config {
            server_address: string_or("SERVER_ADDRESS", "127.0.0.1"),
            server_port: parse_or("SERVER_PORT", 8003),
            environment: string_or("ENVIRONMENT", "development"),
            log_level: string_or("LOG_LEVEL", "info"),
            shop_api_url: string_or("SHOP_API_URL", ""),
            admin_token: string_or("ADMIN_TOKEN", "admin-token-dev"),
            cache_ttl_seconds: parse_or("CACHE_TTL_SECONDS", 300),
            cache_cleanup_interval_seconds: parse_or("CACHE_CLEANUP_INTERVAL_SECONDS", 60),
            upstream_requests_per_second: parse_or("UPSTREAM_REQUESTS_PER_SECOND", 5),
            map_default_lat: parse_or("MAP_DEFAULT_LAT", DEFAULT_LAT),
            map_default_lng: parse_or("MAP_DEFAULT_LNG", DEFAULT_LNG),
            map_default_zoom: parse_or("MAP_DEFAULT_ZOOM", 18),
            map_tile_url: string_or("MAP_TILE_URL", OSM_TILE_URL),
            map_tile_attribution: string_or("MAP_TILE_ATTRIBUTION", OSM_ATTRIBUTION),
            marker_icon_base_url: string_or("MARKER_ICON_BASE_URL", "/static/icons"),
        }
    }

    /// Validate critical configuration
    /// DOCUMENTATION: Ensures application can start safely
    pub fn validate(&self) -> Result<(), String> {
        if self.shop_api_url.is_empty() {
            return Err("SHOP_API_URL is required".to_string());
        }

        if !self.shop_api_url.starts_with("http://") && !self.shop_api_url.starts_with("https://")
        {
            return Err(format!(
                "SHOP_API_URL must be an http(s) URL, got {}",
                self.shop_api_url
            ));
        }

        if self.upstream_requests_per_second == 0 {
            log::warn!("UPSTREAM_REQUESTS_PER_SECOND=0, upstream calls are not rate limited");
        }

        if !(-90.0..=90.0).contains(&self.map_default_lat)
            || !(-180.0..=180.0).contains(&self.map_default_lng)
        {
            return Err("MAP_DEFAULT_LAT/MAP_DEFAULT_LNG out of range".to_string());
        }

        if self.admin_token == "admin-token-dev" && self.environment == "production" {
            log::warn!("ADMIN_TOKEN is the development default in production");
        }

        Ok(())
    }

    /// Center used when a search carries no position
    pub fn default_center(&self) -> LatLng {
        LatLng {
            lat: self.map_default_lat,
            lng: self.map_default_lng,
        }
    }
}

#[cfg(test)]
pub(crate) fn test_config(shop_api_url: &str) -> Config {
    Config {
        server_address: "127.0.0.1".to_string(),
        server_port: 8003,
        environment: "test".to_string(),
        log_level: "debug".to_string(),
        shop_api_url: shop_api_url.to_string(),
        admin_token: "secret".to_string(),
        cache_ttl_seconds: 60,
        cache_cleanup_interval_seconds: 60,
        upstream_requests_per_second: 5,
        map_default_lat: DEFAULT_LAT,
        map_default_lng: DEFAULT_LNG,
        map_default_zoom: 18,
        map_tile_url: OSM_TILE_URL.to_string(),
        map_tile_attribution: OSM_ATTRIBUTION.to_string(),
        marker_icon_base_url: "/static/icons".to_string(),
    }
}
