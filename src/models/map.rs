// src/models/map.rs
// DOCUMENTATION: Rendering-layer contract
// PURPOSE: Map defaults, marker icon registry, markers and popup cards

use serde::{Deserialize, Serialize};

use super::{DisplayEntity, Tag};
use crate::config::Config;

/// Geographic position (WGS84 degrees)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Leaflet-compatible icon description
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IconSpec {
    pub icon_url: String,
    pub shadow_url: Option<String>,
    pub icon_size: [u32; 2],
    pub icon_anchor: [i32; 2],
    pub popup_anchor: [i32; 2],
    pub shadow_size: Option<[u32; 2]>,
}

impl IconSpec {
    /// Standard 25x41 pin geometry with a shadow
    fn pin(icon_url: String, shadow_url: String) -> Self {
        IconSpec {
            icon_url,
            shadow_url: Some(shadow_url),
            icon_size: [25, 41],
            icon_anchor: [12, 41],
            popup_anchor: [1, -34],
            shadow_size: Some([41, 41]),
        }
    }
}

/// Icon for one business category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagIcon {
    pub tag: &'static str,
    pub icon: IconSpec,
}

/// Marker icon registry handed to the rendering layer
/// DOCUMENTATION: Built once from configuration; nothing mutates a global default.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerIconConfig {
    pub default_icon: IconSpec,
    pub group_icon: IconSpec,
    pub tag_icons: Vec<TagIcon>,
}

impl MarkerIconConfig {
    /// Registry with one `{key}.png` per category under `base_url`
    pub fn from_base_url(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        let shadow = format!("{}/marker-shadow.png", base);

        let tag_icons = Tag::ALL
            .iter()
            .copied()
            .filter(|tag| tag.is_filter())
            .map(|tag| TagIcon {
                tag: tag.key(),
                icon: IconSpec::pin(format!("{}/{}.png", base, tag.key()), shadow.clone()),
            })
            .collect();

        MarkerIconConfig {
            default_icon: IconSpec::pin(format!("{}/marker-icon.png", base), shadow.clone()),
            group_icon: IconSpec::pin(format!("{}/group.png", base), shadow),
            tag_icons,
        }
    }

    /// Icon for a single shop category, default pin when unregistered
    pub fn icon_for_tag(&self, tag: Tag) -> &IconSpec {
        self.tag_icons
            .iter()
            .find(|entry| entry.tag == tag.key())
            .map(|entry| &entry.icon)
            .unwrap_or(&self.default_icon)
    }

    /// Icon for a marker
    pub fn icon_for(&self, entity: &DisplayEntity) -> &IconSpec {
        match entity {
            DisplayEntity::Shop(shop) => self.icon_for_tag(shop.tag),
            DisplayEntity::Group(_) => &self.group_icon,
        }
    }
}

/// Response for GET /map/config
#[derive(Debug, Clone, Serialize)]
pub struct MapConfig {
    pub center: LatLng,
    pub zoom: u8,
    pub tile_url: String,
    pub tile_attribution: String,
    pub icons: MarkerIconConfig,
}

impl MapConfig {
    pub fn from_config(config: &Config) -> Self {
        MapConfig {
            center: config.default_center(),
            zoom: config.map_default_zoom,
            tile_url: config.map_tile_url.clone(),
            tile_attribution: config.map_tile_attribution.clone(),
            icons: MarkerIconConfig::from_base_url(&config.marker_icon_base_url),
        }
    }
}

/// Phone link rendered in a popup
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TelLink {
    /// Number as published
    pub display: String,
    /// `tel:` URI with dashes stripped
    pub href: String,
}

/// Popup content for one shop
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShopCard {
    pub id: String,
    pub title: String,
    pub tag: Tag,
    pub exclusive: bool,
    pub address: String,
    pub tel: Option<TelLink>,
    /// Only present for http(s) links
    pub url: Option<String>,
}

/// One marker on the map
#[derive(Debug, Clone, Serialize)]
pub struct MarkerView {
    pub position: LatLng,
    pub icon_url: String,
    pub entity: DisplayEntity,
    pub popup: Vec<ShopCard>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GroupedShops, Shop};

    fn shop(tag: Tag) -> Shop {
        Shop {
            id: "1".to_string(),
            title: "test".to_string(),
            tag,
            exclusive: false,
            address: String::new(),
            tel: String::new(),
            url: String::new(),
            lat: 0.0,
            lng: 0.0,
        }
    }

    #[test]
    fn test_icon_registry_per_tag() {
        let icons = MarkerIconConfig::from_base_url("/static/icons/");

        assert_eq!(icons.tag_icons.len(), Tag::ALL.len() - 1);
        assert_eq!(icons.default_icon.icon_url, "/static/icons/marker-icon.png");
        assert_eq!(
            icons.icon_for_tag(Tag::Barber).icon_url,
            "/static/icons/barber.png"
        );
        assert_eq!(
            icons.icon_for_tag(Tag::None).icon_url,
            "/static/icons/marker-icon.png"
        );
        assert_eq!(icons.default_icon.icon_anchor, [12, 41]);
    }

    #[test]
    fn test_icon_for_entity() {
        let icons = MarkerIconConfig::from_base_url("https://cdn.example.jp/icons");

        let single = DisplayEntity::Shop(shop(Tag::Food));
        assert_eq!(
            icons.icon_for(&single).icon_url,
            "https://cdn.example.jp/icons/food.png"
        );

        let group = DisplayEntity::Group(GroupedShops {
            lat: 0.0,
            lng: 0.0,
            shops: vec![shop(Tag::Food), shop(Tag::Gas)],
        });
        assert_eq!(icons.icon_for(&group), &icons.group_icon);
    }
}
