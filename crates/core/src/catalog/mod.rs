//! Catalog engine: filtering, sorting, model groups and store merging.
//!
//! Everything here is a pure function over in-memory listings. A view is
//! recomputed from scratch whenever the criteria or the sort key change.

pub mod brands;
pub mod filter;
pub mod merge;
pub mod model_group;
pub mod sort;

pub use brands::{BRANDS, Brand, CITIES, brand_names, find_brand};
pub use filter::{FilterCriteria, ModelSelector, NumericRange, filter, parse_bound};
pub use merge::{Visibility, merge};
pub use model_group::{GROUP_SELECTOR_PREFIX, ModelGroup, OTHER_GROUP, model_group, model_groups};
pub use sort::{SortKey, sort_listings};

use crate::types::Listing;

/// Filter then sort.
#[must_use]
pub fn view<'a>(listings: &'a [Listing], criteria: &FilterCriteria, sort: SortKey) -> Vec<&'a Listing> {
    let mut kept = filter(listings, criteria);
    sort_listings(&mut kept, sort);
    kept
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{DateTime, Utc};

    use crate::types::{FuelType, Listing, ListingId, ModerationStatus, Price, Transmission};

    /// An approved petrol manual listing created at a fixed instant.
    pub fn listing(id: &str, brand: &str, model: &str, year: i32, price: i64) -> Listing {
        Listing {
            id: ListingId::new(id),
            brand: brand.to_owned(),
            model: model.to_owned(),
            year,
            odometer_km: 100_000,
            fuel: FuelType::Petrol,
            transmission: Transmission::Manual,
            horsepower: 120,
            displacement_ccm: Some(1600),
            price: Price::new(price),
            city: "Budapest".to_owned(),
            images: vec!["https://img.lunnar.hu/1.jpg".to_owned()],
            description: String::new(),
            phone: None,
            email: None,
            status: ModerationStatus::Approved,
            created_at: DateTime::<Utc>::from_timestamp(1_714_557_600, 0).unwrap_or_default(),
            owner_id: None,
            owner_email: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_support::listing;

    #[test]
    fn test_view_filters_then_sorts() {
        let listings = vec![
            listing("1", "Toyota", "Corolla", 2019, 8_000_000),
            listing("2", "BMW", "320", 2021, 15_000_000),
            listing("3", "BMW", "X3", 2017, 11_000_000),
        ];
        let criteria = FilterCriteria {
            brand: Some("BMW".to_owned()),
            ..FilterCriteria::default()
        };
        let ids: Vec<_> = view(&listings, &criteria, SortKey::PriceAsc)
            .iter()
            .map(|l| l.id.as_str())
            .collect();
        assert_eq!(ids, ["3", "2"]);
    }
}
