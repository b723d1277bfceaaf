// src/handlers/health.rs
// DOCUMENTATION: Liveness probe
// PURPOSE: Report service name, version and environment

use crate::config::Config;
use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

/// GET /health
/// DOCUMENTATION: Does not contact the shop search endpoint
pub async fn health_check(config: web::Data<Config>) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "service": "shop-map",
        "version": env!("CARGO_PKG_VERSION"),
        "environment": config.environment,
    }))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}
