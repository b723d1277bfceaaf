// src/handlers/admin.rs
// DOCUMENTATION: Admin handlers for the upstream result cache
// PURPOSE: Inspect and flush cached shop search results

use crate::config::Config;
use crate::errors::ShopMapError;
use crate::services::ShopsCache;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use std::sync::Arc;

/// GET /admin/cache/stats
/// Cache entry counts
pub async fn cache_stats(
    cache: web::Data<Arc<ShopsCache>>,
    config: web::Data<Config>,
    req: HttpRequest,
) -> Result<impl Responder, ShopMapError> {
    verify_admin_token(&req, &config)?;

    let stats = cache.stats().await;
    Ok(HttpResponse::Ok().json(stats))
}

/// POST /admin/cache/clear
/// Drop every cached result set, the next searches go upstream
pub async fn clear_cache(
    cache: web::Data<Arc<ShopsCache>>,
    config: web::Data<Config>,
    req: HttpRequest,
) -> Result<impl Responder, ShopMapError> {
    verify_admin_token(&req, &config)?;

    let removed = cache.clear().await;
    log::info!("Admin cleared shop cache ({} entries)", removed);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "removed_entries": removed,
    })))
}

/// Helper function to verify admin authentication
/// DOCUMENTATION: Checks X-Admin-Token header against configured admin token
fn verify_admin_token(req: &HttpRequest, config: &Config) -> Result<(), ShopMapError> {
    let token = req
        .headers()
        .get("X-Admin-Token")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            log::warn!("Admin request without token");
            ShopMapError::Unauthorized
        })?;

    if token != config.admin_token {
        log::warn!("Admin request with invalid token");
        return Err(ShopMapError::Forbidden);
    }

    Ok(())
}

/// Configuration for admin routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/cache/stats", web::get().to(cache_stats))
            .route("/cache/clear", web::post().to(clear_cache)),
    );
}
