// src/services/aggregator.rs
// DOCUMENTATION: Merges shops standing on the same coordinate
// PURPOSE: One marker per distinct (lat, lng) so co-located shops stay clickable

use crate::models::{DisplayEntity, GroupedShops, Shop};

pub struct ShopAggregator;

impl ShopAggregator {
    /// Group shops sharing an exact (lat, lng) pair
    /// DOCUMENTATION: Left fold over the input. The first shop at a coordinate
    /// becomes a standalone entity; the second converts that entity in place
    /// into a group; later ones are appended to the group. Output keeps the
    /// first-occurrence order of each coordinate and contains every input shop
    /// exactly once.
    ///
    /// Equality is plain `f64 ==`: no tolerance, and NaN coordinates never
    /// match anything, so such shops always stand alone.
    pub fn group<I>(shops: I) -> Vec<DisplayEntity>
    where
        I: IntoIterator<Item = Shop>,
    {
        let mut entities: Vec<DisplayEntity> = Vec::new();

        for shop in shops {
            let existing = entities
                .iter_mut()
                .find(|entity| shop.is_at(entity.lat(), entity.lng()));

            match existing {
                None => entities.push(DisplayEntity::Shop(shop)),
                Some(entity) => Self::merge_into(entity, shop),
            }
        }

        entities
    }

    fn merge_into(entity: &mut DisplayEntity, shop: Shop) {
        match entity {
            DisplayEntity::Group(group) => group.shops.push(shop),
            DisplayEntity::Shop(first) => {
                let (lat, lng) = (first.lat, first.lng);
                let placeholder = DisplayEntity::Group(GroupedShops {
                    lat,
                    lng,
                    shops: Vec::new(),
                });

                let DisplayEntity::Shop(first) = std::mem::replace(entity, placeholder) else {
                    unreachable!("matched a standalone shop above");
                };
                *entity = DisplayEntity::Group(GroupedShops {
                    lat,
                    lng,
                    shops: vec![first, shop],
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Tag;

    fn shop(id: &str, lat: f64, lng: f64) -> Shop {
        Shop {
            id: id.to_string(),
            title: format!("shop {}", id),
            tag: Tag::Retail,
            exclusive: false,
            address: String::new(),
            tel: String::new(),
            url: String::new(),
            lat,
            lng,
        }
    }

    fn ids(entity: &DisplayEntity) -> Vec<&str> {
        entity.shops().iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(ShopAggregator::group(Vec::new()).is_empty());
    }

    #[test]
    fn test_single_shop_stays_standalone() {
        let a = shop("a", 35.0, 139.0);
        let out = ShopAggregator::group(vec![a.clone()]);

        assert_eq!(out, vec![DisplayEntity::Shop(a)]);
    }

    #[test]
    fn test_two_shops_same_coordinate() {
        let a = shop("a", 35.0, 139.0);
        let b = shop("b", 35.0, 139.0);
        let out = ShopAggregator::group(vec![a.clone(), b.clone()]);

        assert_eq!(
            out,
            vec![DisplayEntity::Group(GroupedShops {
                lat: 35.0,
                lng: 139.0,
                shops: vec![a, b],
            })]
        );
    }

    #[test]
    fn test_group_keeps_first_position() {
        let out = ShopAggregator::group(vec![
            shop("1", 35.0, 139.0),
            shop("2", 35.1, 139.1),
            shop("3", 35.0, 139.0),
        ]);

        assert_eq!(out.len(), 2);
        assert!(out[0].is_group());
        assert_eq!(ids(&out[0]), vec!["1", "3"]);
        assert!(!out[1].is_group());
        assert_eq!(ids(&out[1]), vec!["2"]);
    }

    #[test]
    fn test_distinct_coordinates_preserve_order() {
        let out = ShopAggregator::group(vec![shop("x", 1.0, 2.0), shop("y", 2.0, 1.0)]);

        assert_eq!(out.len(), 2);
        assert_eq!(ids(&out[0]), vec!["x"]);
        assert_eq!(ids(&out[1]), vec!["y"]);
        assert!(out.iter().all(|e| !e.is_group()));
    }

    #[test]
    fn test_third_member_appended_to_group() {
        let out = ShopAggregator::group(vec![
            shop("1", 10.0, 20.0),
            shop("2", 10.0, 20.0),
            shop("3", 0.0, 0.0),
            shop("4", 10.0, 20.0),
        ]);

        assert_eq!(out.len(), 2);
        assert_eq!(ids(&out[0]), vec!["1", "2", "4"]);
        assert_eq!(ids(&out[1]), vec!["3"]);
    }

    #[test]
    fn test_no_tolerance_between_nearby_points() {
        let out = ShopAggregator::group(vec![
            shop("1", 35.0, 139.0),
            shop("2", 35.000000001, 139.0),
        ]);

        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_nan_coordinates_stand_alone() {
        let out = ShopAggregator::group(vec![
            shop("1", f64::NAN, 139.0),
            shop("2", f64::NAN, 139.0),
        ]);

        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|e| !e.is_group()));
    }

    #[test]
    fn test_member_count_matches_input() {
        let coords = [
            (1.0, 1.0),
            (2.0, 2.0),
            (1.0, 1.0),
            (3.0, 3.0),
            (2.0, 2.0),
            (1.0, 1.0),
            (4.0, 4.0),
        ];
        let shops: Vec<Shop> = coords
            .iter()
            .enumerate()
            .map(|(i, (lat, lng))| shop(&i.to_string(), *lat, *lng))
            .collect();

        let out = ShopAggregator::group(shops);
        let total: usize = out.iter().map(|e| e.member_count()).sum();

        assert_eq!(total, coords.len());
        let firsts: Vec<(f64, f64)> = out.iter().map(|e| (e.lat(), e.lng())).collect();
        assert_eq!(firsts, vec![(1.0, 1.0), (2.0, 2.0), (3.0, 3.0), (4.0, 4.0)]);
    }
}
