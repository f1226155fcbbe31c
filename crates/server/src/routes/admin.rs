//! Moderation routes.
//!
//! Every handler requires [`RequireAdmin`].

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};

use lunnar_core::{Listing, ListingId, ModerationStatus};

use crate::error::{Result, add_breadcrumb};
use crate::middleware::RequireAdmin;
use crate::services::ListingService;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: ModerationStatus,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// `GET /api/admin/ads` - every listing, newest first.
pub async fn list(
    _admin: RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<Listing>>> {
    let service = ListingService::new(state.pool(), state.listing_cache());
    Ok(Json(service.all().await?))
}

/// `PATCH /api/admin/ads/{id}` - change the moderation status.
///
/// Only `status` is read from the body.
pub async fn update_status(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<StatusUpdate>, JsonRejection>,
) -> Result<Json<Listing>> {
    let Json(update) = payload?;
    let id = ListingId::new(id);
    add_breadcrumb(
        "moderation",
        "status change",
        Some(&[("listing_id", id.as_str()), ("status", update.status.as_str())]),
    );

    let service = ListingService::new(state.pool(), state.listing_cache());
    Ok(Json(service.set_status(&id, update.status).await?))
}

/// `DELETE /api/admin/ads/{id}`
pub async fn delete(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let id = ListingId::new(id);
    let service = ListingService::new(state.pool(), state.listing_cache());
    service.delete(&id).await?;
    Ok(Json(MessageResponse {
        message: "Listing deleted".to_string(),
    }))
}
