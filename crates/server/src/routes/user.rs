//! Routes for the authenticated user.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};

use lunnar_core::{FavoriteSet, Listing, ListingId};

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::services::{AuthService, ListingService};
use crate::state::AppState;

#[derive(Debug, Deserialize, Serialize)]
pub struct FavoritesBody {
    pub favorites: Vec<ListingId>,
}

/// `GET /api/user/ads` - the caller's listings of any status.
pub async fn ads(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Listing>>> {
    let service = ListingService::new(state.pool(), state.listing_cache());
    Ok(Json(service.owned_by(&user.id).await?))
}

/// `POST /api/user/favorites` - replace the caller's favorites.
pub async fn set_favorites(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    payload: std::result::Result<Json<FavoritesBody>, JsonRejection>,
) -> Result<Json<FavoritesBody>> {
    let Json(body) = payload?;
    let favorites: FavoriteSet = body.favorites.into_iter().collect();
    let updated = AuthService::new(state.pool())
        .set_favorites(&user.id, &favorites)
        .await?;

    Ok(Json(FavoritesBody {
        favorites: updated.favorites.to_vec(),
    }))
}
