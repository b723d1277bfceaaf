// src/models/tag.rs
// DOCUMENTATION: Business category of a shop
// PURPOSE: Fixed set of categories used for filtering and marker icons

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Business category as published by the shop search endpoint
/// DOCUMENTATION: Upstream transmits the Japanese label, filters accept key or label.
/// `None` only appears in filters ("no category selected"), never on a shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tag {
    #[default]
    None,
    Electronics,
    Barber,
    Glasses,
    Convenience,
    Restaurant,
    Food,
    Clothing,
    Supermarket,
    Service,
    Drugstore,
    Gas,
    Retail,
    Other,
}

impl Tag {
    /// All categories in display order (`None` first)
    pub const ALL: [Tag; 14] = [
        Tag::None,
        Tag::Electronics,
        Tag::Barber,
        Tag::Glasses,
        Tag::Convenience,
        Tag::Restaurant,
        Tag::Food,
        Tag::Clothing,
        Tag::Supermarket,
        Tag::Service,
        Tag::Drugstore,
        Tag::Gas,
        Tag::Retail,
        Tag::Other,
    ];

    /// Stable ASCII key (used in query strings and icon file names)
    pub fn key(self) -> &'static str {
        match self {
            Tag::None => "none",
            Tag::Electronics => "electronics",
            Tag::Barber => "barber",
            Tag::Glasses => "glasses",
            Tag::Convenience => "convenience",
            Tag::Restaurant => "restaurant",
            Tag::Food => "food",
            Tag::Clothing => "clothing",
            Tag::Supermarket => "supermarket",
            Tag::Service => "service",
            Tag::Drugstore => "drugstore",
            Tag::Gas => "gas",
            Tag::Retail => "retail",
            Tag::Other => "other",
        }
    }

    /// Label as transmitted by the upstream endpoint
    pub fn label(self) -> &'static str {
        match self {
            Tag::None => "選択なし",
            Tag::Electronics => "家電販売店",
            Tag::Barber => "理容・美容店",
            Tag::Glasses => "メガネ・コンタクトレンズ・補聴器",
            Tag::Convenience => "コンビニ",
            Tag::Restaurant => "飲食店",
            Tag::Food => "飲食料品店",
            Tag::Clothing => "衣料・身の回り品取扱店",
            Tag::Supermarket => "スーパー",
            Tag::Service => "その他サービス業",
            Tag::Drugstore => "ドラッグストア・調剤薬局",
            Tag::Gas => "ガソリンスタンド",
            Tag::Retail => "その他小売業",
            Tag::Other => "その他業種",
        }
    }

    /// Parse from either the key or the label
    pub fn parse(value: &str) -> Option<Tag> {
        let value = value.trim();
        Tag::ALL
            .iter()
            .copied()
            .find(|tag| tag.key() == value || tag.label() == value)
    }

    /// Whether this tag restricts a search
    pub fn is_filter(self) -> bool {
        self != Tag::None
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Tag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Tag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Tag::parse(&raw).unwrap_or_else(|| {
            log::warn!("Unknown shop tag '{}', treating as '{}'", raw, Tag::Other.label());
            Tag::Other
        }))
    }
}

/// Tag entry for option listings
#[derive(Debug, Serialize)]
pub struct TagOption {
    pub key: &'static str,
    pub label: &'static str,
}

impl From<Tag> for TagOption {
    fn from(tag: Tag) -> Self {
        TagOption {
            key: tag.key(),
            label: tag.label(),
        }
    }
}
