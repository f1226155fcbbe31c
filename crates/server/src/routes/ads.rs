//! Public listing routes.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

use lunnar_core::{Listing, NewListing};

use crate::error::Result;
use crate::middleware::OptionalAuth;
use crate::services::ListingService;
use crate::state::AppState;

/// `GET /api/ads` - approved listings, newest first.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Listing>>> {
    let service = ListingService::new(state.pool(), state.listing_cache());
    let listings = service.approved().await?;
    Ok(Json(listings.to_vec()))
}

/// `POST /api/ads` - submit a listing for moderation.
///
/// A valid bearer token attaches the caller as owner. Anything else submits
/// as a guest. The stored status is always `pending`.
pub async fn create(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    payload: std::result::Result<Json<NewListing>, JsonRejection>,
) -> Result<(StatusCode, Json<Listing>)> {
    let Json(new) = payload?;
    let service = ListingService::new(state.pool(), state.listing_cache());
    let owner = user.as_ref().map(|u| (&u.id, &u.email));
    let listing = service.submit(new, owner).await?;
    Ok((StatusCode::CREATED, Json(listing)))
}
