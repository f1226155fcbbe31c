//! Moderation actions.
//!
//! Listings that only exist in the local store are moderated there; anything
//! else goes through the admin endpoints.

use thiserror::Error;
use tracing::info;

use lunnar_core::{ListingId, ModerationStatus};

use crate::api::{ApiClient, ApiError};
use crate::storage::{LocalStore, StorageError};

#[derive(Debug, Error)]
pub enum ModerationError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Where a moderation action was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Local,
    Remote,
}

/// Approve or reject a listing.
///
/// # Errors
///
/// Returns `ModerationError` if the local write or the admin call fails.
pub async fn set_status(
    api: &ApiClient,
    store: &LocalStore,
    id: &ListingId,
    status: ModerationStatus,
) -> Result<Applied, ModerationError> {
    let mut local = store.local_ads().await;
    if let Some(listing) = local.iter_mut().find(|l| &l.id == id) {
        listing.status = status;
        store.save_local_ads(&local).await?;
        info!(listing_id = %id, %status, "Local listing moderated");
        return Ok(Applied::Local);
    }

    api.set_status(id, status).await?;
    info!(listing_id = %id, %status, "Listing moderated");
    Ok(Applied::Remote)
}

/// Delete a listing.
///
/// # Errors
///
/// Returns `ModerationError` if the local write or the admin call fails.
pub async fn delete(
    api: &ApiClient,
    store: &LocalStore,
    id: &ListingId,
) -> Result<Applied, ModerationError> {
    let mut local = store.local_ads().await;
    let before = local.len();
    local.retain(|l| &l.id != id);
    if local.len() != before {
        store.save_local_ads(&local).await?;
        info!(listing_id = %id, "Local listing deleted");
        return Ok(Applied::Local);
    }

    api.delete_ad(id).await?;
    info!(listing_id = %id, "Listing deleted");
    Ok(Applied::Remote)
}
