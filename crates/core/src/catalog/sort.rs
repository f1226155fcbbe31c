//! Result ordering.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use crate::types::Listing;

/// Sort order applied after filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Most recently created first.
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
    KmAsc,
    YearDesc,
}

impl SortKey {
    /// All keys, default first.
    pub const ALL: [Self; 5] = [
        Self::Newest,
        Self::PriceAsc,
        Self::PriceDesc,
        Self::KmAsc,
        Self::YearDesc,
    ];

    /// Parse a sort option value. Unknown values fall back to [`SortKey::Newest`].
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "price-asc" => Self::PriceAsc,
            "price-desc" => Self::PriceDesc,
            "km-asc" => Self::KmAsc,
            "year-desc" => Self::YearDesc,
            _ => Self::Newest,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
            Self::KmAsc => "km-asc",
            Self::YearDesc => "year-desc",
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort listings in place. The sort is stable: listings with equal keys keep
/// their relative order.
pub fn sort_listings(listings: &mut [&Listing], key: SortKey) {
    match key {
        SortKey::Newest => listings.sort_by_key(|l| Reverse(l.created_at)),
        SortKey::PriceAsc => listings.sort_by_key(|l| l.price),
        SortKey::PriceDesc => listings.sort_by_key(|l| Reverse(l.price)),
        SortKey::KmAsc => listings.sort_by_key(|l| l.odometer_km),
        SortKey::YearDesc => listings.sort_by_key(|l| Reverse(l.year)),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::catalog::test_support::listing;

    #[test]
    fn test_parse_unknown_is_newest() {
        assert_eq!(SortKey::parse("price-desc"), SortKey::PriceDesc);
        assert_eq!(SortKey::parse("cheapest"), SortKey::Newest);
        assert_eq!(SortKey::parse(""), SortKey::Newest);
        for key in SortKey::ALL {
            assert_eq!(SortKey::parse(key.as_str()), key);
        }
    }

    #[test]
    fn test_price_desc_puts_bmw_first() {
        let listings = [
            listing("1", "Toyota", "Corolla", 2019, 8_000_000),
            listing("2", "BMW", "320", 2021, 15_000_000),
        ];
        let mut view: Vec<_> = listings.iter().collect();
        sort_listings(&mut view, SortKey::PriceDesc);
        assert_eq!(view.first().map(|l| l.brand.as_str()), Some("BMW"));
    }

    #[test]
    fn test_newest_first() {
        let mut old = listing("old", "Kia", "Rio", 2010, 1_000_000);
        old.created_at -= Duration::days(3);
        let fresh = listing("fresh", "Kia", "Rio", 2010, 1_000_000);
        let listings = [old, fresh];
        let mut view: Vec<_> = listings.iter().collect();
        sort_listings(&mut view, SortKey::Newest);
        let ids: Vec<_> = view.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, ["fresh", "old"]);
    }

    #[test]
    fn test_sort_is_stable_for_every_key() {
        // Same price, km, year and creation time everywhere: order must not move.
        let listings: Vec<_> = (0..12)
            .map(|i| listing(&format!("id-{i}"), "Mazda", "3", 2015, 4_000_000))
            .collect();
        for key in SortKey::ALL {
            let mut view: Vec<_> = listings.iter().collect();
            sort_listings(&mut view, key);
            let ids: Vec<_> = view.iter().map(|l| l.id.as_str()).collect();
            let expected: Vec<_> = listings.iter().map(|l| l.id.as_str()).collect();
            assert_eq!(ids, expected, "order changed under {key}");
        }
    }

    #[test]
    fn test_km_and_year_order() {
        let mut a = listing("a", "Ford", "Focus", 2012, 2_000_000);
        a.odometer_km = 90_000;
        let mut b = listing("b", "Ford", "Focus", 2018, 2_000_000);
        b.odometer_km = 40_000;
        let listings = [a, b];

        let mut view: Vec<_> = listings.iter().collect();
        sort_listings(&mut view, SortKey::KmAsc);
        assert_eq!(view.first().map(|l| l.id.as_str()), Some("b"));

        let mut view: Vec<_> = listings.iter().collect();
        sort_listings(&mut view, SortKey::YearDesc);
        assert_eq!(view.first().map(|l| l.id.as_str()), Some("b"));
    }
}
