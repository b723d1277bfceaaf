// src/models/shop.rs
// DOCUMENTATION: Shop records and the entities placed on the map
// PURPOSE: Wire format of the upstream endpoint and grouped display entities

use serde::{Deserialize, Serialize};

use super::Tag;

/// A single business record returned by the shop search endpoint
/// DOCUMENTATION: Field names follow the upstream JSON.
/// Immutable once fetched, replaced wholesale on each search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shop {
    /// Upstream identifier
    pub id: String,

    /// Shop name shown in the popup
    pub title: String,

    /// Business category
    pub tag: Tag,

    /// Exclusive-use shop (false = shared/common-use)
    #[serde(rename = "especial")]
    pub exclusive: bool,

    #[serde(default)]
    pub address: String,

    /// Phone number as published, may contain dashes
    #[serde(default)]
    pub tel: String,

    #[serde(default)]
    pub url: String,

    pub lat: f64,

    pub lng: f64,
}

impl Shop {
    /// Exact coordinate match (no tolerance, NaN never matches)
    pub fn is_at(&self, lat: f64, lng: f64) -> bool {
        self.lat == lat && self.lng == lng
    }
}

/// Two or more shops occupying the exact same coordinate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedShops {
    pub lat: f64,
    pub lng: f64,
    /// Members in the order they appeared in the search result
    pub shops: Vec<Shop>,
}

/// What gets rendered as one marker
/// DOCUMENTATION: Serialized with an explicit `kind` discriminant
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DisplayEntity {
    Shop(Shop),
    Group(GroupedShops),
}

impl DisplayEntity {
    pub fn lat(&self) -> f64 {
        match self {
            DisplayEntity::Shop(shop) => shop.lat,
            DisplayEntity::Group(group) => group.lat,
        }
    }

    pub fn lng(&self) -> f64 {
        match self {
            DisplayEntity::Shop(shop) => shop.lng,
            DisplayEntity::Group(group) => group.lng,
        }
    }

    /// Shops represented by this entity, in order
    pub fn shops(&self) -> &[Shop] {
        match self {
            DisplayEntity::Shop(shop) => std::slice::from_ref(shop),
            DisplayEntity::Group(group) => &group.shops,
        }
    }

    pub fn member_count(&self) -> usize {
        self.shops().len()
    }

    pub fn is_group(&self) -> bool {
        matches!(self, DisplayEntity::Group(_))
    }
}
