// src/main.rs
// DOCUMENTATION: Application entry point
// PURPOSE: Initialize config, shared clients, and start HTTP server

mod config;
mod errors;
mod handlers;
mod models;
mod services;

use actix_web::{middleware::Logger, web, App, HttpServer};
use config::Config;
use dotenv::dotenv;
use models::MapConfig;
use services::{start_cleanup_task, ShopApiClient, ShopsCache};
use std::io;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 1. Load environment variables
    dotenv().ok();

    // 2. Load configuration
    let config = Config::from_env();

    // 3. Initialize logging
    if std::env::var("RUST_LOG").is_err() {
        let log_level = if !config.log_level.is_empty() {
            &config.log_level
        } else {
            "info,actix_web=info"
        };
        std::env::set_var("RUST_LOG", log_level);
    }
    env_logger::init();

    if let Err(e) = config.validate() {
        log::error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    log::info!("Starting shop-map service...");
    log::info!("Environment: {}", config.environment);
    log::info!(
        "Server Address: {}:{}",
        config.server_address,
        config.server_port
    );

    // 4. Initialize cache for shop search endpoint responses
    let cache = Arc::new(ShopsCache::new(config.cache_ttl_seconds));
    log::info!(
        "Initialized shop cache (TTL: {}s)",
        config.cache_ttl_seconds
    );

    start_cleanup_task(cache.clone(), config.cache_cleanup_interval_seconds);
    log::info!(
        "Started cache cleanup task (interval: {}s)",
        config.cache_cleanup_interval_seconds
    );

    // 5. Shared upstream client and map defaults
    let client = web::Data::new(
        ShopApiClient::new_with_cache(config.shop_api_url.clone(), cache.clone())
            .with_rate_limit(config.upstream_requests_per_second),
    );
    let map = web::Data::new(MapConfig::from_config(&config));
    log::info!("Shop search endpoint: {}", client.base_url());

    // 6. Start HTTP server
    let server_addr = format!("{}:{}", config.server_address, config.server_port);
    let config_data = web::Data::new(config);
    let cache_data = web::Data::new(cache);

    HttpServer::new(move || {
        App::new()
            // Application state (config, cache, upstream client, map defaults)
            .app_data(config_data.clone())
            .app_data(cache_data.clone())
            .app_data(client.clone())
            .app_data(map.clone())
            // Middleware
            .wrap(Logger::default())
            .wrap(actix_web::middleware::Compress::default())
            // Routes
            .configure(handlers::health_config)
            .configure(handlers::shops_config)
            .configure(handlers::map_config)
            .configure(handlers::admin_config)
    })
    .bind(&server_addr)?
    .run()
    .await
}
