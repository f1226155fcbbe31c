//! Listing repository.
//!
//! Queries are built at runtime with `query_as` so the crate compiles without
//! a live database.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use lunnar_core::{
    Email, FuelType, Listing, ListingId, ModerationStatus, NewListing, Price, Transmission, UserId,
};

use super::RepositoryError;

const AD_COLUMNS: &str = "id, brand, model, year, km, fuel, transmission, hp, ccm, price, city, \
                          images, description, phone, email, status, owner_id, owner_email, \
                          created_at";

#[derive(Debug, sqlx::FromRow)]
struct AdRow {
    id: ListingId,
    brand: String,
    model: String,
    year: i32,
    km: i32,
    fuel: FuelType,
    transmission: Transmission,
    hp: i32,
    ccm: Option<i32>,
    price: Price,
    city: String,
    images: Vec<String>,
    description: String,
    phone: Option<String>,
    email: Option<String>,
    status: ModerationStatus,
    owner_id: Option<UserId>,
    owner_email: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<AdRow> for Listing {
    fn from(row: AdRow) -> Self {
        Self {
            id: row.id,
            brand: row.brand,
            model: row.model,
            year: row.year,
            odometer_km: row.km,
            fuel: row.fuel,
            transmission: row.transmission,
            horsepower: row.hp,
            displacement_ccm: row.ccm,
            price: row.price,
            city: row.city,
            images: row.images,
            description: row.description,
            phone: row.phone,
            email: row.email,
            status: row.status,
            owner_id: row.owner_id,
            owner_email: row.owner_email,
            created_at: row.created_at,
        }
    }
}

/// Repository for listing database operations.
pub struct AdRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AdRepository<'a> {
    /// Create a new listing repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Approved listings, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_approved(&self) -> Result<Vec<Listing>, RepositoryError> {
        let rows: Vec<AdRow> = sqlx::query_as(&format!(
            "SELECT {AD_COLUMNS} FROM ads WHERE status = 'approved' ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;
        Ok(rows.into_iter().map(Listing::from).collect())
    }

    /// Every listing regardless of status, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Listing>, RepositoryError> {
        let rows: Vec<AdRow> = sqlx::query_as(&format!(
            "SELECT {AD_COLUMNS} FROM ads ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;
        Ok(rows.into_iter().map(Listing::from).collect())
    }

    /// Listings submitted by `owner`, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Listing>, RepositoryError> {
        let rows: Vec<AdRow> = sqlx::query_as(&format!(
            "SELECT {AD_COLUMNS} FROM ads WHERE owner_id = $1 ORDER BY created_at DESC"
        ))
        .bind(owner)
        .fetch_all(self.pool)
        .await?;
        Ok(rows.into_iter().map(Listing::from).collect())
    }

    /// A single listing by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: &ListingId) -> Result<Option<Listing>, RepositoryError> {
        let row: Option<AdRow> =
            sqlx::query_as(&format!("SELECT {AD_COLUMNS} FROM ads WHERE id = $1"))
                .bind(id)
                .fetch_optional(self.pool)
                .await?;
        Ok(row.map(Listing::from))
    }

    /// Store a new submission as `pending`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    #[instrument(skip(self, new), fields(brand = %new.brand, model = %new.model))]
    pub async fn create(
        &self,
        new: NewListing,
        owner: Option<(&UserId, &Email)>,
    ) -> Result<Listing, RepositoryError> {
        let listing = new.into_listing(
            ListingId::new(uuid::Uuid::new_v4().to_string()),
            ModerationStatus::Pending,
            Utc::now(),
            owner.map(|(id, _)| id.clone()),
            owner.map(|(_, email)| email.as_str().to_owned()),
        );
        self.insert(&listing).await
    }

    /// Insert a fully formed listing, keeping its id, status and timestamp.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the id already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn insert(&self, listing: &Listing) -> Result<Listing, RepositoryError> {
        let row: AdRow = sqlx::query_as(&format!(
            "INSERT INTO ads (id, brand, model, year, km, fuel, transmission, hp, ccm, price, \
                              city, images, description, phone, email, status, owner_id, \
                              owner_email, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, \
                     $17, $18, $19) \
             RETURNING {AD_COLUMNS}"
        ))
        .bind(&listing.id)
        .bind(&listing.brand)
        .bind(&listing.model)
        .bind(listing.year)
        .bind(listing.odometer_km)
        .bind(listing.fuel)
        .bind(listing.transmission)
        .bind(listing.horsepower)
        .bind(listing.displacement_ccm)
        .bind(listing.price)
        .bind(&listing.city)
        .bind(&listing.images)
        .bind(&listing.description)
        .bind(&listing.phone)
        .bind(&listing.email)
        .bind(listing.status)
        .bind(&listing.owner_id)
        .bind(&listing.owner_email)
        .bind(listing.created_at)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_insert(e, "listing id already exists"))?;
        Ok(row.into())
    }

    /// Change a listing's moderation status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no listing has this id.
    /// Returns `RepositoryError::Database` if the update fails.
    #[instrument(skip(self), fields(listing_id = %id, status = %status))]
    pub async fn update_status(
        &self,
        id: &ListingId,
        status: ModerationStatus,
    ) -> Result<Listing, RepositoryError> {
        let row: Option<AdRow> = sqlx::query_as(&format!(
            "UPDATE ads SET status = $2 WHERE id = $1 RETURNING {AD_COLUMNS}"
        ))
        .bind(id)
        .bind(status)
        .fetch_optional(self.pool)
        .await?;
        row.map(Listing::from).ok_or(RepositoryError::NotFound)
    }

    /// Remove a listing.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no listing has this id.
    /// Returns `RepositoryError::Database` if the delete fails.
    #[instrument(skip(self), fields(listing_id = %id))]
    pub async fn delete(&self, id: &ListingId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM ads WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Number of stored listings.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM ads")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}
