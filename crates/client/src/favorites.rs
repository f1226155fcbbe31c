//! Favorite toggling with best-effort server sync.

use tracing::{debug, warn};

use lunnar_core::{FavoriteSet, ListingId};

use crate::api::ApiClient;
use crate::session::Session;
use crate::storage::{LocalStore, StorageError};

/// Flip `id` in the stored favorites and persist the result.
///
/// When the session holds a server token the whole set is pushed to the
/// server afterwards. A failed push is logged and otherwise ignored; the
/// local change stands. Returns the set as saved.
///
/// # Errors
///
/// Returns `StorageError` if the local write fails. Nothing is sent then.
pub async fn toggle_favorite(
    api: &ApiClient,
    store: &LocalStore,
    session: Option<&Session>,
    id: &ListingId,
) -> Result<FavoriteSet, StorageError> {
    let mut favorites = store.favorites().await;
    let added = favorites.toggle(id);
    store.save_favorites(&favorites).await?;
    debug!(listing_id = %id, added, "Favorite toggled");

    sync(api, session, &favorites).await;
    Ok(favorites)
}

/// Push `favorites` to the server if the session allows it.
pub async fn sync(api: &ApiClient, session: Option<&Session>, favorites: &FavoriteSet) {
    let Some(token) = session.and_then(Session::server_token) else {
        return;
    };
    if let Err(e) = api.sync_favorites(token, favorites).await {
        warn!(error = %e, "Favorites sync failed, keeping local copy");
    }
}
