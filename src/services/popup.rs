// src/services/popup.rs
// DOCUMENTATION: Popup card rendering rules
// PURPOSE: Turn raw shop contact fields into links the map popup can show

use crate::models::{Shop, ShopCard, TelLink};

/// Phone link, `None` for an empty number
/// DOCUMENTATION: The href drops every '-' ("047-000-0000" -> "tel:0470000000")
pub fn tel_link(tel: &str) -> Option<TelLink> {
    let display = tel.trim();
    if display.is_empty() {
        return None;
    }

    Some(TelLink {
        display: display.to_string(),
        href: format!("tel:{}", display.replace('-', "")),
    })
}

/// Website link, only for values starting with "http"
pub fn external_url(url: &str) -> Option<String> {
    let url = url.trim();
    url.starts_with("http").then(|| url.to_string())
}

/// Popup card for one shop
pub fn shop_card(shop: &Shop) -> ShopCard {
    ShopCard {
        id: shop.id.clone(),
        title: shop.title.clone(),
        tag: shop.tag,
        exclusive: shop.exclusive,
        address: shop.address.clone(),
        tel: tel_link(&shop.tel),
        url: external_url(&shop.url),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Tag;

    #[test]
    fn test_tel_link_strips_dashes() {
        let link = tel_link("047-123-4567").unwrap();
        assert_eq!(link.display, "047-123-4567");
        assert_eq!(link.href, "tel:0471234567");

        assert!(tel_link("").is_none());
        assert!(tel_link("   ").is_none());
    }

    #[test]
    fn test_external_url_requires_http() {
        assert_eq!(
            external_url("https://example.jp/shop"),
            Some("https://example.jp/shop".to_string())
        );
        assert_eq!(
            external_url("http://example.jp"),
            Some("http://example.jp".to_string())
        );
        assert_eq!(external_url("www.example.jp"), None);
        assert_eq!(external_url("なし"), None);
        assert_eq!(external_url(""), None);
    }

    #[test]
    fn test_shop_card() {
        let shop = Shop {
            id: "7".to_string(),
            title: "ドラッグ八柱".to_string(),
            tag: Tag::Drugstore,
            exclusive: true,
            address: "松戸市".to_string(),
            tel: "047-111-2222".to_string(),
            url: "-".to_string(),
            lat: 35.79,
            lng: 139.93,
        };

        let card = shop_card(&shop);
        assert_eq!(card.title, "ドラッグ八柱");
        assert_eq!(card.tag, Tag::Drugstore);
        assert!(card.exclusive);
        assert_eq!(card.tel.unwrap().href, "tel:0471112222");
        assert!(card.url.is_none());
    }
}
