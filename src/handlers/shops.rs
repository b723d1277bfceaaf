// src/handlers/shops.rs
// DOCUMENTATION: HTTP handlers for shop searches
// PURPOSE: Parse requests, call services, return responses

use crate::errors::ShopMapError;
use crate::models::{MapConfig, SearchOptionsResponse, SearchQuery};
use crate::services::{ShopApiClient, ShopService};
use actix_web::{web, HttpResponse, Responder};

/// GET /shops/search
/// Search shops around a position and return grouped markers
pub async fn search_shops(
    client: web::Data<ShopApiClient>,
    map: web::Data<MapConfig>,
    query: web::Query<SearchQuery>,
) -> Result<impl Responder, ShopMapError> {
    let params = query.into_inner().resolve(map.center)?;
    let result = ShopService::search(client.get_ref(), &map.icons, params).await?;
    Ok(HttpResponse::Ok().json(result))
}

/// GET /shops/search/geojson
/// Same search as a GeoJSON FeatureCollection
pub async fn search_shops_geojson(
    client: web::Data<ShopApiClient>,
    map: web::Data<MapConfig>,
    query: web::Query<SearchQuery>,
) -> Result<impl Responder, ShopMapError> {
    let params = query.into_inner().resolve(map.center)?;
    let collection = ShopService::search_geojson(client.get_ref(), &map.icons, params).await?;
    let body = serde_json::to_string(&collection)
        .map_err(|e| ShopMapError::InternalError(e.to_string()))?;

    Ok(HttpResponse::Ok()
        .content_type("application/geo+json")
        .body(body))
}

/// GET /shops/options
/// Selectable radii and categories
pub async fn search_options() -> impl Responder {
    HttpResponse::Ok().json(SearchOptionsResponse::new())
}

/// Configuration for shop routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/shops")
            .route("/search", web::get().to(search_shops))
            .route("/search/geojson", web::get().to(search_shops_geojson))
            .route("/options", web::get().to(search_options)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use crate::models::{Shop, Tag};
    use crate::services::ShopsCache;
    use actix_web::{http::StatusCode, test, App};
    use std::sync::Arc;

    fn shop(id: &str, lat: f64, lng: f64) -> Shop {
        Shop {
            id: id.to_string(),
            title: format!("shop {}", id),
            tag: Tag::Convenience,
            exclusive: false,
            address: String::new(),
            tel: "047-000-0000".to_string(),
            url: "https://example.jp".to_string(),
            lat,
            lng,
        }
    }

    async fn seeded_state() -> (web::Data<ShopApiClient>, web::Data<MapConfig>) {
        let config = test_config("http://127.0.0.1:9/shops");
        let map = MapConfig::from_config(&config);

        let cache = Arc::new(ShopsCache::new(60));
        cache
            .set(
                ShopsCache::generate_key(map.center.lat, map.center.lng, 500),
                Arc::new(vec![
                    shop("a", 35.79, 139.93),
                    shop("b", 35.79, 139.93),
                    shop("c", 35.80, 139.94),
                ]),
            )
            .await;

        let client = ShopApiClient::new_with_cache(config.shop_api_url.clone(), cache);
        (web::Data::new(client), web::Data::new(map))
    }

    #[actix_web::test]
    async fn test_options() {
        let app = test::init_service(App::new().configure(config)).await;
        let req = test::TestRequest::get().uri("/shops/options").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["distances"].as_array().map(|d| d.len()), Some(13));
        assert_eq!(body["default_distance"], 500);
        assert_eq!(body["tags"][5]["key"], "restaurant");
    }

    #[actix_web::test]
    async fn test_search_uses_default_center() {
        let (client, map) = seeded_state().await;
        let app = test::init_service(
            App::new()
                .app_data(client)
                .app_data(map)
                .configure(config),
        )
        .await;

        let req = test::TestRequest::get().uri("/shops/search").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["total_shops"], 3);
        assert_eq!(body["markers"][0]["entity"]["kind"], "group");
        assert_eq!(body["markers"][0]["popup"][1]["id"], "b");
        assert_eq!(body["markers"][1]["entity"]["kind"], "shop");
        assert_eq!(body["markers"][1]["icon_url"], "/static/icons/convenience.png");
    }

    #[actix_web::test]
    async fn test_search_rejects_unlisted_distance() {
        let (client, map) = seeded_state().await;
        let app = test::init_service(
            App::new()
                .app_data(client)
                .app_data(map)
                .configure(config),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/shops/search?lat=35.79&lng=139.93&distance=750")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_search_rejects_nan_position() {
        let cache = Arc::new(ShopsCache::new(60));
        cache
            .set(
                ShopsCache::generate_key(0.0, 0.0, 500),
                Arc::new(vec![shop("null-island", 0.0, 0.0)]),
            )
            .await;
        let client = ShopApiClient::new_with_cache("http://127.0.0.1:9/shops".to_string(), cache);
        let map = MapConfig::from_config(&test_config("http://127.0.0.1:9/shops"));

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(client))
                .app_data(web::Data::new(map))
                .configure(config),
        )
        .await;

        for uri in ["/shops/search?lat=NaN&lng=0", "/shops/search/geojson?lat=0&lng=inf"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", uri);
        }
    }

    #[actix_web::test]
    async fn test_search_geojson() {
        let (client, map) = seeded_state().await;
        let app = test::init_service(
            App::new()
                .app_data(client)
                .app_data(map)
                .configure(config),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/shops/search/geojson?exclusive_only=false")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers()
                .get("content-type")
                .and_then(|v| v.to_str().ok()),
            Some("application/geo+json")
        );

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["features"].as_array().map(|f| f.len()), Some(2));
    }
}
