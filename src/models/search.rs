// src/models/search.rs
// DOCUMENTATION: Search request/response models
// PURPOSE: Validate map search parameters and shape search results

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::{LatLng, MarkerView, Shop, Tag, TagOption};
use crate::errors::ShopMapError;

/// Selectable search radii in meters
pub const DISTANCE_OPTIONS: [u32; 13] = [
    100, 200, 300, 400, 500, 600, 800, 1000, 1200, 1500, 2000, 2500, 3000,
];

/// Radius used when the client does not pick one
pub const DEFAULT_DISTANCE: u32 = 500;

/// Checks the range attributes cannot express: NaN passes every comparison
/// and the distance must be one of the listed options.
fn validate_search_query(query: &SearchQuery) -> Result<(), ValidationError> {
    let non_finite = [query.lat, query.lng]
        .iter()
        .flatten()
        .any(|value| !value.is_finite());
    if non_finite {
        let mut err = ValidationError::new("coordinate_not_finite");
        err.message = Some("lat and lng must be finite numbers".into());
        return Err(err);
    }

    match query.distance {
        Some(distance) if !DISTANCE_OPTIONS.contains(&distance) => {
            let mut err = ValidationError::new("distance_option");
            err.message = Some(format!("distance must be one of {:?}", DISTANCE_OPTIONS).into());
            Err(err)
        }
        _ => Ok(()),
    }
}

/// Query parameters for GET /shops/search
/// DOCUMENTATION: Position comes from the browser's geolocation; when absent the
/// configured default map center is used.
#[derive(Debug, Default, Deserialize, Validate)]
#[validate(schema(function = "validate_search_query"))]
pub struct SearchQuery {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: Option<f64>,

    /// Search radius in meters, one of `DISTANCE_OPTIONS`
    pub distance: Option<u32>,

    /// Category key or label
    pub tag: Option<String>,

    /// Only exclusive-use shops
    pub exclusive_only: Option<bool>,
}

/// Resolved search parameters
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
    pub center: LatLng,
    pub distance: u32,
    pub filter: ShopFilter,
}

impl SearchQuery {
    /// Validate and fill defaults
    pub fn resolve(self, default_center: LatLng) -> Result<SearchParams, ShopMapError> {
        self.validate()
            .map_err(|e| ShopMapError::ValidationError(e.to_string()))?;

        let tag = match self.tag.as_deref() {
            None | Some("") => Tag::None,
            Some(raw) => Tag::parse(raw)
                .ok_or_else(|| ShopMapError::InvalidInput(format!("Unknown tag: {}", raw)))?,
        };

        let center = match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => LatLng { lat, lng },
            (None, None) => default_center,
            _ => {
                return Err(ShopMapError::InvalidInput(
                    "lat and lng must be given together".to_string(),
                ))
            }
        };

        Ok(SearchParams {
            center,
            distance: self.distance.unwrap_or(DEFAULT_DISTANCE),
            filter: ShopFilter {
                tag,
                exclusive_only: self.exclusive_only.unwrap_or(false),
            },
        })
    }
}

/// Client-side filters applied to the upstream result set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShopFilter {
    pub tag: Tag,
    pub exclusive_only: bool,
}

impl ShopFilter {
    pub fn matches(&self, shop: &Shop) -> bool {
        if self.exclusive_only && !shop.exclusive {
            return false;
        }
        if self.tag.is_filter() && shop.tag != self.tag {
            return false;
        }
        true
    }

    /// Keep matching shops, order preserved
    pub fn apply(&self, shops: Vec<Shop>) -> Vec<Shop> {
        shops.into_iter().filter(|shop| self.matches(shop)).collect()
    }
}

/// Response for GET /shops/search
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub center: LatLng,
    pub distance: u32,
    pub tag: Tag,
    pub exclusive_only: bool,
    /// Shops after filtering (sum of marker members)
    pub total_shops: usize,
    pub markers: Vec<MarkerView>,
}

/// Response for GET /shops/options
#[derive(Debug, Serialize)]
pub struct SearchOptionsResponse {
    pub distances: Vec<u32>,
    pub default_distance: u32,
    pub tags: Vec<TagOption>,
}

impl SearchOptionsResponse {
    pub fn new() -> Self {
        SearchOptionsResponse {
            distances: DISTANCE_OPTIONS.to_vec(),
            default_distance: DEFAULT_DISTANCE,
            tags: Tag::ALL.iter().copied().map(TagOption::from).collect(),
        }
    }
}
