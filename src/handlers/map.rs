// src/handlers/map.rs
// DOCUMENTATION: Map bootstrap handler
// PURPOSE: Hand the rendering layer its defaults and marker icon registry

use crate::models::MapConfig;
use actix_web::{web, HttpResponse, Responder};

/// GET /map/config
pub async fn map_config(map: web::Data<MapConfig>) -> impl Responder {
    HttpResponse::Ok().json(map.get_ref())
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/map/config", web::get().to(map_config));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_map_config() {
        let map = MapConfig::from_config(&test_config("http://127.0.0.1:9/shops"));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(map))
                .configure(config),
        )
        .await;

        let req = test::TestRequest::get().uri("/map/config").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["zoom"], 18);
        assert_eq!(body["center"]["lat"], 35.791714531276135);
        assert_eq!(
            body["icons"]["default_icon"]["icon_url"],
            "/static/icons/marker-icon.png"
        );
        assert_eq!(body["icons"]["tag_icons"][0]["tag"], "electronics");
    }
}
