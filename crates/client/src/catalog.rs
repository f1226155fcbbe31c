//! Catalog assembly.
//!
//! Combines the server's listings with the local fallback store. A failed
//! remote fetch is logged and the local set is used on its own.

use tracing::warn;

use lunnar_core::catalog::{Visibility, merge};
use lunnar_core::Listing;

use crate::api::{ApiClient, ApiError};
use crate::session::Session;
use crate::storage::LocalStore;

/// Listings visible to the given audience.
///
/// For the owner view the server is only asked when the session holds a
/// server token; offline sessions see their local listings only.
pub async fn load_catalog(
    api: &ApiClient,
    store: &LocalStore,
    visibility: &Visibility,
    session: Option<&Session>,
) -> Vec<Listing> {
    let remote = match fetch_remote(api, visibility, session).await {
        Ok(listings) => listings,
        Err(e) => {
            warn!(error = %e, "Remote catalog unavailable, using local listings");
            Vec::new()
        }
    };
    let local = store.local_ads().await;
    merge(remote, local, visibility)
}

async fn fetch_remote(
    api: &ApiClient,
    visibility: &Visibility,
    session: Option<&Session>,
) -> Result<Vec<Listing>, ApiError> {
    match visibility {
        Visibility::Public => api.fetch_ads().await,
        Visibility::Admin => api.admin_ads().await,
        Visibility::Owner { .. } => match session.and_then(Session::server_token) {
            Some(token) => api.user_ads(token).await,
            None => Ok(Vec::new()),
        },
    }
}

/// Owner visibility for a session.
#[must_use]
pub fn owner_view(session: &Session) -> Visibility {
    Visibility::Owner {
        user_id: session.user_id.clone(),
        email: session.email.clone(),
    }
}
