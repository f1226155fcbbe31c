//! Local fallback store.
//!
//! Each key is one JSON document under the data directory. Reads never fail:
//! a missing document is the empty default. A document that does not decode
//! is copied to `<key>.json.corrupt` before the default is used, so the next
//! write cannot destroy it. Local listings are decoded one record at a time
//! and only the records that fail are dropped. Writes go to a temporary file
//! first and are renamed into place.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

use lunnar_core::{FavoriteSet, Listing};

use crate::session::Session;

/// Errors writing the local store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode {key}: {source}")]
    Encode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Documents kept in the local store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKey {
    /// Favorited listing ids.
    Favorites,
    /// Listings that could not be uploaded.
    LocalAds,
    /// Locally registered accounts.
    Users,
    /// Outstanding verification and reset codes.
    PendingCodes,
    /// The signed-in user.
    Session,
}

impl StoreKey {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Favorites => "favorites",
            Self::LocalAds => "local_ads",
            Self::Users => "users",
            Self::PendingCodes => "pending_codes",
            Self::Session => "session",
        }
    }
}

/// JSON documents on disk.
#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: StoreKey) -> PathBuf {
        self.dir.join(format!("{}.json", key.as_str()))
    }

    /// Read a document, falling back to `T::default()`.
    pub async fn load<T>(&self, key: StoreKey) -> T
    where
        T: DeserializeOwned + Default,
    {
        let path = self.path(key);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(key = key.as_str(), "Local document missing, using default");
                return T::default();
            }
            Err(e) => {
                warn!(key = key.as_str(), error = %e, "Failed to read local document");
                return T::default();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(value) => value,
            Err(e) => {
                warn!(key = key.as_str(), error = %e, "Corrupt local document, using default");
                self.preserve(key).await;
                T::default()
            }
        }
    }

    /// Where an undecodable document is copied.
    #[must_use]
    pub fn backup_path(&self, key: StoreKey) -> PathBuf {
        self.path(key).with_extension("json.corrupt")
    }

    async fn preserve(&self, key: StoreKey) {
        let backup = self.backup_path(key);
        match tokio::fs::copy(self.path(key), &backup).await {
            Ok(_) => warn!(key = key.as_str(), backup = %backup.display(), "Corrupt document kept"),
            Err(e) => warn!(key = key.as_str(), error = %e, "Failed to keep corrupt document"),
        }
    }

    /// Write a document atomically.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the directory or file cannot be written.
    pub async fn save<T>(&self, key: StoreKey, value: &T) -> Result<(), StorageError>
    where
        T: Serialize + ?Sized,
    {
        let json = serde_json::to_vec_pretty(value).map_err(|source| StorageError::Encode {
            key: key.as_str(),
            source,
        })?;

        let write_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source| StorageError::Write { path, source }
        };

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(write_err(&self.dir))?;

        let path = self.path(key);
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &json).await.map_err(write_err(&tmp))?;
        tokio::fs::rename(&tmp, &path).await.map_err(write_err(&path))?;
        Ok(())
    }

    // =========================================================================
    // Typed accessors
    // =========================================================================

    pub async fn favorites(&self) -> FavoriteSet {
        self.load(StoreKey::Favorites).await
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    pub async fn save_favorites(&self, favorites: &FavoriteSet) -> Result<(), StorageError> {
        self.save(StoreKey::Favorites, favorites).await
    }

    /// Stored listings. Records that no longer decode are skipped and the
    /// document is preserved.
    pub async fn local_ads(&self) -> Vec<Listing> {
        let records: Vec<serde_json::Value> = self.load(StoreKey::LocalAds).await;
        let total = records.len();
        let ads: Vec<Listing> = records
            .into_iter()
            .filter_map(|record| {
                serde_json::from_value(record)
                    .map_err(|e| warn!(error = %e, "Skipping undecodable local listing"))
                    .ok()
            })
            .collect();

        if ads.len() < total {
            self.preserve(StoreKey::LocalAds).await;
        }
        ads
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    pub async fn save_local_ads(&self, ads: &[Listing]) -> Result<(), StorageError> {
        self.save(StoreKey::LocalAds, ads).await
    }

    pub async fn session(&self) -> Option<Session> {
        self.load(StoreKey::Session).await
    }

    /// Persist the session, or clear it with `None`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    pub async fn save_session(&self, session: Option<&Session>) -> Result<(), StorageError> {
        self.save(StoreKey::Session, &session).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use lunnar_core::ListingId;

    use super::*;
    use crate::testing::listing;

    #[tokio::test]
    async fn test_missing_documents_are_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path().join("nested"));
        assert!(store.favorites().await.is_empty());
        assert!(store.local_ads().await.is_empty());
        assert!(store.session().await.is_none());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path().join("nested"));

        let mut favorites = FavoriteSet::new();
        favorites.toggle(&ListingId::new("a"));
        favorites.toggle(&ListingId::new("b"));
        store.save_favorites(&favorites).await.unwrap();

        assert_eq!(store.favorites().await, favorites);
        assert!(!dir.path().join("nested/favorites.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_corrupt_document_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("local_ads.json"), b"{ not json").unwrap();
        let store = LocalStore::new(dir.path());
        assert!(store.local_ads().await.is_empty());

        let backup = std::fs::read(store.backup_path(StoreKey::LocalAds)).unwrap();
        assert_eq!(backup, b"{ not json");
    }

    #[tokio::test]
    async fn test_undecodable_listing_is_skipped_and_kept() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());
        store
            .save_local_ads(&[
                listing("local-1", "Toyota", "Corolla"),
                listing("local-2", "Opel", "Astra"),
            ])
            .await
            .unwrap();

        let path = dir.path().join("local_ads.json");
        let mut doc: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        doc[1]["fuel"] = serde_json::json!("Gáz");
        std::fs::write(&path, serde_json::to_vec(&doc).unwrap()).unwrap();

        let ids: Vec<String> = store
            .local_ads()
            .await
            .into_iter()
            .map(|l| l.id.as_str().to_string())
            .collect();
        assert_eq!(ids, ["local-1"]);

        let backup = std::fs::read_to_string(store.backup_path(StoreKey::LocalAds)).unwrap();
        assert!(backup.contains("Gáz"));
    }

    #[tokio::test]
    async fn test_clean_document_leaves_no_backup() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());
        store
            .save_local_ads(&[listing("local-1", "Toyota", "Corolla")])
            .await
            .unwrap();
        assert_eq!(store.local_ads().await.len(), 1);
        assert!(!store.backup_path(StoreKey::LocalAds).exists());
    }
}
