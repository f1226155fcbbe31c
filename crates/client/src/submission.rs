//! Listing submission.
//!
//! Image files are embedded as `data:` URLs. The listing is sent to the
//! server; if that fails for any reason it is kept in the local store with a
//! `local-` id. Both outcomes count as a successful submission.

use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{Datelike, Utc};
use thiserror::Error;
use tracing::{info, warn};

use lunnar_core::{Listing, ListingError, ListingId, ModerationStatus, NewListing};

use crate::api::ApiClient;
use crate::session::Session;
use crate::storage::{LocalStore, StorageError};

/// Errors that stop a submission before it is stored anywhere.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Invalid(#[from] ListingError),

    #[error("failed to read image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Where a submitted listing ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Accepted by the server, awaiting moderation.
    Uploaded(Listing),
    /// Kept in the local fallback store.
    SavedLocally(Listing),
}

impl SubmissionOutcome {
    #[must_use]
    pub const fn listing(&self) -> &Listing {
        match self {
            Self::Uploaded(listing) | Self::SavedLocally(listing) => listing,
        }
    }
}

/// MIME type guessed from the file extension.
#[must_use]
pub fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "avif" => "image/avif",
        _ => "application/octet-stream",
    }
}

/// Read an image file into a `data:<mime>;base64,<payload>` URL.
///
/// # Errors
///
/// Returns `SubmissionError::Image` if the file cannot be read.
pub async fn data_url(path: &Path) -> Result<String, SubmissionError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| SubmissionError::Image {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(format!("data:{};base64,{}", mime_for(path), STANDARD.encode(bytes)))
}

/// Submit a listing for moderation.
///
/// `images` are appended to any image references already in `form`.
///
/// # Errors
///
/// Returns `SubmissionError` if the form is invalid, an image cannot be read
/// or the local fallback cannot be written.
pub async fn submit_listing(
    api: &ApiClient,
    store: &LocalStore,
    session: Option<&Session>,
    mut form: NewListing,
    images: &[PathBuf],
) -> Result<SubmissionOutcome, SubmissionError> {
    for path in images {
        form.images.push(data_url(path).await?);
    }

    let now = Utc::now();
    form.validate(now.year())?;

    let listing = form.into_listing(
        ListingId::local(now.timestamp_millis()),
        ModerationStatus::Pending,
        now,
        session.map(|s| s.user_id.clone()),
        session.map(|s| s.email.clone()),
    );

    let token = session.and_then(Session::server_token);
    match api.submit(&listing, token).await {
        Ok(stored) => {
            info!(listing_id = %stored.id, "Listing uploaded");
            Ok(SubmissionOutcome::Uploaded(stored))
        }
        Err(e) => {
            warn!(error = %e, listing_id = %listing.id, "Upload failed, keeping listing locally");
            let mut local = store.local_ads().await;
            local.push(listing.clone());
            store.save_local_ads(&local).await?;
            Ok(SubmissionOutcome::SavedLocally(listing))
        }
    }
}
