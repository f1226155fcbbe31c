//! Plain-text rendering of listings and profiles.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};

use lunnar_client::Profile;
use lunnar_client::format::{days_ago_text, days_since, format_km, summary_line};
use lunnar_core::{FavoriteSet, Listing};

/// One line per listing, favorites marked with `*`.
pub fn listing_table(listings: &[&Listing], favorites: &FavoriteSet, now: DateTime<Utc>) -> String {
    if listings.is_empty() {
        return "No listings found.".to_string();
    }
    let mut out = format!("{} listings\n", listings.len());
    for listing in listings {
        let mark = if favorites.contains(&listing.id) { '*' } else { ' ' };
        let _ = writeln!(out, "{mark} {}  {}", listing.id, summary_line(listing, now));
    }
    out.trim_end().to_string()
}

/// Moderation view: every listing with its status.
pub fn moderation_table(listings: &[Listing], now: DateTime<Utc>) -> String {
    if listings.is_empty() {
        return "No listings found.".to_string();
    }
    let mut out = String::new();
    for listing in listings {
        let _ = writeln!(
            out,
            "[{:<8}] {}  {}",
            listing.status.as_str(),
            listing.id,
            summary_line(listing, now)
        );
    }
    out.trim_end().to_string()
}

/// Full detail view.
pub fn listing_detail(listing: &Listing, favorite: bool, now: DateTime<Utc>) -> String {
    let mut out = String::new();
    let star = if favorite { " *" } else { "" };
    let _ = writeln!(out, "{}{star}", listing.title());
    let _ = writeln!(out, "Price:        {}", listing.price);
    let _ = writeln!(out, "Year:         {}", listing.year);
    let _ = writeln!(out, "Odometer:     {}", format_km(listing.odometer_km));
    let _ = writeln!(out, "Fuel:         {}", listing.fuel.label());
    let _ = writeln!(out, "Transmission: {}", listing.transmission.label());
    let _ = writeln!(out, "Power:        {} hp", listing.horsepower);
    if let Some(ccm) = listing.displacement_ccm {
        let _ = writeln!(out, "Engine:       {ccm} cm3");
    }
    let _ = writeln!(out, "City:         {}", listing.city);
    let _ = writeln!(
        out,
        "Listed:       {}",
        days_ago_text(days_since(listing.created_at, now))
    );
    if let Some(phone) = &listing.phone {
        let _ = writeln!(out, "Phone:        {phone}");
    }
    if let Some(email) = &listing.email {
        let _ = writeln!(out, "Email:        {email}");
    }
    let _ = writeln!(out, "Images:       {}", listing.images.len());
    if !listing.description.is_empty() {
        let _ = writeln!(out, "\n{}", listing.description);
    }
    out.trim_end().to_string()
}

pub fn profile(profile: &Profile) -> String {
    format!(
        "{} <{}>\nOwn listings: {}\nFavorites:    {}",
        profile.username, profile.email, profile.own_listings, profile.favorites
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{Duration, TimeZone};
    use lunnar_core::{FuelType, ListingId, ModerationStatus, Price, Transmission};

    use super::*;

    fn car() -> Listing {
        Listing {
            id: ListingId::new("r-1"),
            brand: "BMW".to_string(),
            model: "320".to_string(),
            year: 2021,
            odometer_km: 45_000,
            fuel: FuelType::Diesel,
            transmission: Transmission::Automatic,
            horsepower: 190,
            displacement_ccm: Some(1995),
            price: Price::new(15_000_000),
            city: "Debrecen".to_string(),
            images: vec!["https://img.example/1.jpg".to_string()],
            description: String::new(),
            phone: Some("+36 30 123 4567".to_string()),
            email: None,
            status: ModerationStatus::Pending,
            created_at: Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap(),
            owner_id: None,
            owner_email: None,
        }
    }

    #[test]
    fn test_listing_table_marks_favorites() {
        let listing = car();
        let now = listing.created_at + Duration::days(1);
        let mut favorites = FavoriteSet::new();
        favorites.toggle(&listing.id);

        let table = listing_table(&[&listing], &favorites, now);
        assert_eq!(
            table,
            "1 listings\n* r-1  BMW 320 | 2021 | 45 000 km | Diesel | 15 000 000 Ft | Yesterday"
        );
    }

    #[test]
    fn test_empty_tables() {
        let now = Utc::now();
        assert_eq!(listing_table(&[], &FavoriteSet::new(), now), "No listings found.");
        assert_eq!(moderation_table(&[], now), "No listings found.");
    }

    #[test]
    fn test_listing_detail() {
        let listing = car();
        let detail = listing_detail(&listing, true, listing.created_at);
        assert!(detail.starts_with("BMW 320 *\n"));
        assert!(detail.contains("Engine:       1995 cm3"));
        assert!(detail.contains("Listed:       Today"));
        assert!(detail.contains("Phone:        +36 30 123 4567"));
        assert!(!detail.contains("Email:"));
    }

    #[test]
    fn test_moderation_table_shows_status() {
        let listing = car();
        let table = moderation_table(&[listing.clone()], listing.created_at);
        assert!(table.starts_with("[pending ] r-1  BMW 320"));
    }
}
