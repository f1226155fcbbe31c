//! Demo data for a fresh database.
//!
//! Generates plausible approved listings from the brand table so the
//! catalog has something to filter on.

use chrono::{DateTime, Datelike, Duration, Utc};
use rand::Rng;
use rand::seq::IndexedRandom;
use sqlx::PgPool;

use lunnar_core::catalog::{BRANDS, CITIES};
use lunnar_core::{FuelType, Listing, ListingId, ModerationStatus, Price, Transmission};

use crate::db::{AdRepository, RepositoryError};

/// Generate `count` approved demo listings created within the last 60 days.
pub fn demo_listings<R: Rng + ?Sized>(
    count: usize,
    rng: &mut R,
    now: DateTime<Utc>,
) -> Vec<Listing> {
    let this_year = now.year();
    let mut listings = Vec::with_capacity(count);

    while listings.len() < count {
        let (Some(brand), Some(city), Some(fuel), Some(transmission)) = (
            BRANDS.choose(rng),
            CITIES.choose(rng),
            FuelType::ALL.choose(rng).copied(),
            Transmission::ALL.choose(rng).copied(),
        ) else {
            break;
        };
        let Some(model) = brand.models.choose(rng) else {
            continue;
        };

        let year = rng.random_range(2005..=this_year);
        let age = i64::from(this_year - year);
        let km = i32::try_from(age * rng.random_range(8_000..=25_000)).unwrap_or(i32::MAX);
        let hp = rng.random_range(75..=420);
        let base = rng.random_range(3_000_000_i64..=30_000_000);
        let price = (base - age * 600_000).max(900_000) / 10_000 * 10_000;
        let ccm = fuel.has_displacement().then(|| rng.random_range(10..=40) * 100);
        let id = ListingId::new(uuid::Uuid::new_v4().to_string());

        listings.push(Listing {
            images: vec![format!("https://picsum.photos/seed/{id}/800/600")],
            description: format!("Well maintained {} {}. Full service history.", brand.name, model),
            id,
            brand: brand.name.to_owned(),
            model: (*model).to_owned(),
            year,
            odometer_km: km,
            fuel,
            transmission,
            horsepower: hp,
            displacement_ccm: ccm,
            price: Price::new(price),
            city: (*city).to_owned(),
            phone: Some(format!(
                "+36 30 {:03} {:04}",
                rng.random_range(100..1000),
                rng.random_range(0..10_000)
            )),
            email: None,
            status: ModerationStatus::Approved,
            created_at: now - Duration::minutes(rng.random_range(0..60 * 24 * 60)),
            owner_id: None,
            owner_email: None,
        });
    }

    listings
}

/// Insert `count` demo listings. Returns how many were stored.
///
/// # Errors
///
/// Returns `RepositoryError` if an insert fails.
pub async fn seed_demo(pool: &PgPool, count: usize) -> Result<usize, RepositoryError> {
    let listings = demo_listings(count, &mut rand::rng(), Utc::now());
    let ads = AdRepository::new(pool);
    for listing in &listings {
        ads.insert(listing).await?;
    }
    tracing::info!(count = listings.len(), "Seeded demo listings");
    Ok(listings.len())
}
