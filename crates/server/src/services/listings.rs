//! Listing service.
//!
//! Wraps [`AdRepository`] with validation and a short-lived cache of the
//! public listing set. Moderation and deletion invalidate the cache; new
//! submissions are `pending` and never enter it.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Datelike, Utc};
use moka::future::Cache;
use sqlx::PgPool;
use thiserror::Error;
use tracing::debug;

use lunnar_core::{Email, Listing, ListingError, ListingId, ModerationStatus, NewListing, UserId};

use crate::db::{AdRepository, RepositoryError};

const APPROVED_KEY: &str = "approved";

/// Errors from listing operations.
#[derive(Debug, Error)]
pub enum ListingServiceError {
    #[error(transparent)]
    Invalid(#[from] ListingError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Cache of the approved listing set (60 second TTL).
#[derive(Clone)]
pub struct ListingCache {
    cache: Cache<&'static str, Arc<Vec<Listing>>>,
}

impl ListingCache {
    #[must_use]
    pub fn new() -> Self {
        Self {
            cache: Cache::builder()
                .max_capacity(1)
                .time_to_live(Duration::from_secs(60))
                .build(),
        }
    }

    async fn get(&self) -> Option<Arc<Vec<Listing>>> {
        self.cache.get(APPROVED_KEY).await
    }

    async fn put(&self, listings: Arc<Vec<Listing>>) {
        self.cache.insert(APPROVED_KEY, listings).await;
    }

    async fn invalidate(&self) {
        self.cache.invalidate(APPROVED_KEY).await;
    }
}

impl Default for ListingCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Listing operations used by the route handlers.
pub struct ListingService<'a> {
    ads: AdRepository<'a>,
    cache: &'a ListingCache,
}

impl<'a> ListingService<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool, cache: &'a ListingCache) -> Self {
        Self {
            ads: AdRepository::new(pool),
            cache,
        }
    }

    /// Approved listings, newest first. Served from cache when warm.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the database query fails.
    pub async fn approved(&self) -> Result<Arc<Vec<Listing>>, RepositoryError> {
        if let Some(listings) = self.cache.get().await {
            debug!("Cache hit for approved listings");
            return Ok(listings);
        }
        let listings = Arc::new(self.ads.list_approved().await?);
        self.cache.put(Arc::clone(&listings)).await;
        Ok(listings)
    }

    /// Every listing, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the database query fails.
    pub async fn all(&self) -> Result<Vec<Listing>, RepositoryError> {
        self.ads.list_all().await
    }

    /// A user's own listings of any status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the database query fails.
    pub async fn owned_by(&self, owner: &UserId) -> Result<Vec<Listing>, RepositoryError> {
        self.ads.list_by_owner(owner).await
    }

    /// Validate and store a submission. New listings always start `pending`.
    ///
    /// # Errors
    ///
    /// Returns `ListingServiceError::Invalid` for incomplete submissions.
    pub async fn submit(
        &self,
        new: NewListing,
        owner: Option<(&UserId, &Email)>,
    ) -> Result<Listing, ListingServiceError> {
        new.validate(Utc::now().year())?;
        let listing = self.ads.create(new, owner).await?;
        tracing::info!(listing_id = %listing.id, guest = owner.is_none(), "Listing submitted");
        Ok(listing)
    }

    /// Set the moderation status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` for unknown ids.
    pub async fn set_status(
        &self,
        id: &ListingId,
        status: ModerationStatus,
    ) -> Result<Listing, RepositoryError> {
        let listing = self.ads.update_status(id, status).await?;
        self.cache.invalidate().await;
        tracing::info!(listing_id = %id, status = %status, "Listing moderated");
        Ok(listing)
    }

    /// Delete a listing.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` for unknown ids.
    pub async fn delete(&self, id: &ListingId) -> Result<(), RepositoryError> {
        self.ads.delete(id).await?;
        self.cache.invalidate().await;
        tracing::info!(listing_id = %id, "Listing deleted");
        Ok(())
    }
}
