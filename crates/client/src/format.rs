//! Display helpers for listing cards and detail views.

use chrono::{DateTime, Utc};

use lunnar_core::{Listing, group_thousands};

/// Whole days between `created` and `now`, never negative.
#[must_use]
pub fn days_since(created: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - created).num_days().max(0)
}

/// `Today`, `Yesterday` or `N days ago`.
#[must_use]
pub fn days_ago_text(days: i64) -> String {
    match days {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        n => format!("{n} days ago"),
    }
}

/// Odometer reading, e.g. `80 000 km`.
#[must_use]
pub fn format_km(km: i32) -> String {
    format!("{} km", group_thousands(km.into()))
}

/// One-line summary used in listing tables.
#[must_use]
pub fn summary_line(listing: &Listing, now: DateTime<Utc>) -> String {
    format!(
        "{} | {} | {} | {} | {} | {}",
        listing.title(),
        listing.year,
        format_km(listing.odometer_km),
        listing.fuel.label(),
        listing.price,
        days_ago_text(days_since(listing.created_at, now)),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::testing::listing;

    #[test]
    fn test_days_ago_text() {
        assert_eq!(days_ago_text(0), "Today");
        assert_eq!(days_ago_text(1), "Yesterday");
        assert_eq!(days_ago_text(12), "12 days ago");
    }

    #[test]
    fn test_days_since_clamps_future_dates() {
        let now = Utc::now();
        assert_eq!(days_since(now - Duration::hours(30), now), 1);
        assert_eq!(days_since(now + Duration::days(2), now), 0);
    }

    #[test]
    fn test_format_km() {
        assert_eq!(format_km(80_000), "80 000 km");
        assert_eq!(format_km(0), "0 km");
    }

    #[test]
    fn test_summary_line() {
        let car = listing("r-1", "Toyota", "Corolla");
        let now = car.created_at + Duration::days(3);
        assert_eq!(
            summary_line(&car, now),
            "Toyota Corolla | 2019 | 80 000 km | Petrol | 8 000 000 Ft | 3 days ago"
        );
    }
}
