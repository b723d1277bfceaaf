// src/services/shop_service.rs
// DOCUMENTATION: Business logic for shop searches
// PURPOSE: Fetch candidates, apply filters, group co-located shops, shape markers

use geojson::{feature::Id, Feature, FeatureCollection, Geometry, JsonObject};
use serde_json::Value;

use crate::errors::ShopMapError;
use crate::models::{
    DisplayEntity, LatLng, MarkerIconConfig, MarkerView, SearchParams, SearchResponse, Shop,
    ShopFilter,
};
use crate::services::popup::shop_card;
use crate::services::{ShopAggregator, ShopApiClient};

pub struct ShopService;

impl ShopService {
    /// Filter then group a result set
    /// DOCUMENTATION: Filters run on the flat list so a group only holds shops
    /// that survived them.
    pub fn filter_and_group(shops: &[Shop], filter: &ShopFilter) -> Vec<DisplayEntity> {
        ShopAggregator::group(filter.apply(shops.to_vec()))
    }

    /// Attach icon and popup content to each entity
    pub fn to_markers(entities: Vec<DisplayEntity>, icons: &MarkerIconConfig) -> Vec<MarkerView> {
        entities
            .into_iter()
            .map(|entity| MarkerView {
                position: LatLng {
                    lat: entity.lat(),
                    lng: entity.lng(),
                },
                icon_url: icons.icon_for(&entity).icon_url.clone(),
                popup: entity.shops().iter().map(shop_card).collect(),
                entity,
            })
            .collect()
    }

    /// Run a search for the map
    pub async fn search(
        client: &ShopApiClient,
        icons: &MarkerIconConfig,
        params: SearchParams,
    ) -> Result<SearchResponse, ShopMapError> {
        let entities = Self::fetch_entities(client, &params).await?;
        let total_shops = entities.iter().map(|e| e.member_count()).sum();

        Ok(SearchResponse {
            center: params.center,
            distance: params.distance,
            tag: params.filter.tag,
            exclusive_only: params.filter.exclusive_only,
            total_shops,
            markers: Self::to_markers(entities, icons),
        })
    }

    /// Run a search and return it as GeoJSON
    pub async fn search_geojson(
        client: &ShopApiClient,
        icons: &MarkerIconConfig,
        params: SearchParams,
    ) -> Result<FeatureCollection, ShopMapError> {
        let entities = Self::fetch_entities(client, &params).await?;
        Self::to_feature_collection(&entities, icons)
    }

    async fn fetch_entities(
        client: &ShopApiClient,
        params: &SearchParams,
    ) -> Result<Vec<DisplayEntity>, ShopMapError> {
        let shops = client
            .fetch_shops(params.center.lat, params.center.lng, params.distance)
            .await?;

        let entities = Self::filter_and_group(&shops, &params.filter);

        log::info!(
            "Search at ({}, {}) r={}m tag={} exclusive_only={}: {} shops -> {} markers",
            params.center.lat,
            params.center.lng,
            params.distance,
            params.filter.tag.key(),
            params.filter.exclusive_only,
            shops.len(),
            entities.len()
        );

        Ok(entities)
    }

    /// One Point feature per entity
    /// DOCUMENTATION: Properties carry `kind`, `count`, `icon_url` and the popup cards
    pub fn to_feature_collection(
        entities: &[DisplayEntity],
        icons: &MarkerIconConfig,
    ) -> Result<FeatureCollection, ShopMapError> {
        let mut features = Vec::with_capacity(entities.len());

        for entity in entities {
            let point = geo_types::Point::new(entity.lng(), entity.lat());
            let cards: Vec<_> = entity.shops().iter().map(shop_card).collect();

            let mut properties = JsonObject::new();
            let kind = if entity.is_group() { "group" } else { "shop" };
            properties.insert("kind".to_string(), Value::from(kind));
            properties.insert("count".to_string(), Value::from(entity.member_count()));
            properties.insert(
                "icon_url".to_string(),
                Value::from(icons.icon_for(entity).icon_url.clone()),
            );
            properties.insert(
                "shops".to_string(),
                serde_json::to_value(&cards)
                    .map_err(|e| ShopMapError::InternalError(e.to_string()))?,
            );

            let id = match entity {
                DisplayEntity::Shop(shop) => shop.id.clone(),
                DisplayEntity::Group(group) => group
                    .shops
                    .first()
                    .map(|first| format!("group:{}", first.id))
                    .unwrap_or_else(|| "group".to_string()),
            };

            features.push(Feature {
                bbox: None,
                geometry: Some(Geometry::new(geojson::Value::from(&point))),
                id: Some(Id::String(id)),
                properties: Some(properties),
                foreign_members: None,
            });
        }

        Ok(FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        })
    }
}
