//! Application state.
//!
//! [`Marketplace`] owns everything a client session needs: the API client,
//! the local store, the loaded catalog, the active filter and sort key, the
//! favorites and the current session. It is driven from a single task and
//! mutated through `&mut self`.

use std::path::PathBuf;

use tracing::debug;

use lunnar_core::catalog::{self, FilterCriteria, SortKey, Visibility};
use lunnar_core::{FavoriteSet, Listing, ListingId, NewListing};

use crate::accounts::{AccountError, Accounts, CodeMailer};
use crate::api::ApiClient;
use crate::catalog::{load_catalog, owner_view};
use crate::config::ClientConfig;
use crate::favorites;
use crate::session::Session;
use crate::storage::{LocalStore, StorageError};
use crate::submission::{SubmissionError, SubmissionOutcome, submit_listing};

/// Profile summary for the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub username: String,
    pub email: String,
    pub own_listings: usize,
    pub favorites: usize,
}

pub struct Marketplace<M> {
    api: ApiClient,
    store: LocalStore,
    mailer: M,
    listings: Vec<Listing>,
    criteria: FilterCriteria,
    sort: SortKey,
    favorites: FavoriteSet,
    session: Option<Session>,
}

impl<M: CodeMailer> Marketplace<M> {
    /// Open the local store and restore favorites and the saved session.
    ///
    /// The catalog starts empty; call [`Marketplace::refresh`] to load it.
    pub async fn open(config: &ClientConfig, mailer: M) -> Self {
        let store = LocalStore::new(config.data_dir.clone());
        let favorites = store.favorites().await;
        let session = store.session().await;
        Self {
            api: ApiClient::new(config),
            store,
            mailer,
            listings: Vec::new(),
            criteria: FilterCriteria::default(),
            sort: SortKey::default(),
            favorites,
            session,
        }
    }

    #[must_use]
    pub const fn api(&self) -> &ApiClient {
        &self.api
    }

    #[must_use]
    pub const fn store(&self) -> &LocalStore {
        &self.store
    }

    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    #[must_use]
    pub const fn favorites(&self) -> &FavoriteSet {
        &self.favorites
    }

    #[must_use]
    pub fn accounts(&self) -> Accounts<'_, M> {
        Accounts::new(&self.api, &self.store, &self.mailer)
    }

    /// Reload the public catalog from the server and the local store.
    pub async fn refresh(&mut self) {
        self.listings = load_catalog(&self.api, &self.store, &Visibility::Public, None).await;
        debug!(count = self.listings.len(), "Catalog loaded");
    }

    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
    }

    pub const fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
    }

    #[must_use]
    pub const fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    #[must_use]
    pub const fn sort(&self) -> SortKey {
        self.sort
    }

    /// Every loaded listing, unfiltered.
    #[must_use]
    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    /// The catalog under the active filter and sort key.
    #[must_use]
    pub fn visible(&self) -> Vec<&Listing> {
        catalog::view(&self.listings, &self.criteria, self.sort)
    }

    /// A single listing from the loaded catalog.
    #[must_use]
    pub fn detail(&self, id: &ListingId) -> Option<&Listing> {
        self.listings.iter().find(|l| &l.id == id)
    }

    /// Loaded listings that are favorites, in catalog order.
    ///
    /// Favorite ids that no longer resolve are skipped.
    #[must_use]
    pub fn favorite_listings(&self) -> Vec<&Listing> {
        self.listings
            .iter()
            .filter(|l| self.favorites.contains(&l.id))
            .collect()
    }

    /// Flip a favorite. Returns `true` if it is now a favorite.
    ///
    /// The stored set is the one flipped; the in-memory copy is replaced by
    /// what was saved.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the favorites cannot be saved.
    pub async fn toggle_favorite(&mut self, id: &ListingId) -> Result<bool, StorageError> {
        self.favorites =
            favorites::toggle_favorite(&self.api, &self.store, self.session.as_ref(), id).await?;
        Ok(self.favorites.contains(id))
    }

    /// Listings submitted by the signed-in user, any status, newest first.
    pub async fn own_listings(&self) -> Vec<Listing> {
        let Some(session) = &self.session else {
            return Vec::new();
        };
        let view = owner_view(session);
        let mut own = load_catalog(&self.api, &self.store, &view, Some(session)).await;
        own.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        own
    }

    /// Submit a listing as the current user, or as a guest.
    ///
    /// # Errors
    ///
    /// Returns `SubmissionError` if the form is invalid or cannot be stored.
    pub async fn submit(
        &mut self,
        form: NewListing,
        images: &[PathBuf],
    ) -> Result<SubmissionOutcome, SubmissionError> {
        submit_listing(&self.api, &self.store, self.session.as_ref(), form, images).await
    }

    /// Sign in and pick up the merged favorites.
    ///
    /// # Errors
    ///
    /// Returns `AccountError` if neither the server nor a local account
    /// accepts the credentials.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<&Session, AccountError> {
        let session = self.accounts().login(email, password).await?;
        self.favorites = self.store.favorites().await;
        Ok(self.session.insert(session))
    }

    /// Sign out.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the session cannot be cleared.
    pub async fn logout(&mut self) -> Result<(), StorageError> {
        self.accounts().logout().await?;
        self.session = None;
        Ok(())
    }

    /// Profile of the signed-in user, if any.
    pub async fn profile(&self) -> Option<Profile> {
        let session = self.session.as_ref()?;
        let own_listings = self.own_listings().await.len();
        Some(Profile {
            username: session.username.clone(),
            email: session.email.clone(),
            own_listings,
            favorites: self.favorite_listings().len(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use lunnar_core::catalog::ModelSelector;
    use lunnar_core::{ModerationStatus, Price, UserId};

    use super::*;
    use crate::accounts::LogMailer;
    use crate::testing::{STUB_PASSWORD, listing, offline_config, stub_config};

    async fn offline_app(dir: &std::path::Path) -> Marketplace<LogMailer> {
        let mut config = offline_config();
        config.data_dir = dir.to_path_buf();
        Marketplace::open(&config, LogMailer).await
    }

    fn local_user_session() -> Session {
        Session {
            user_id: UserId::new("user_1"),
            username: "anna".to_string(),
            email: "anna@lunnar.hu".to_string(),
            token: "lt_user_1_10".to_string(),
        }
    }

    #[tokio::test]
    async fn test_offline_catalog_shows_approved_local_listings() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());
        let mut pending = listing("local-2", "Opel", "Astra");
        pending.status = ModerationStatus::Pending;
        store
            .save_local_ads(&[listing("local-1", "Toyota", "Corolla"), pending])
            .await
            .unwrap();

        let mut app = offline_app(dir.path()).await;
        app.refresh().await;
        let ids: Vec<&str> = app.visible().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, ["local-1"]);
    }

    #[tokio::test]
    async fn test_filter_and_sort_apply_to_visible() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());
        let toyota = listing("local-1", "Toyota", "Corolla");
        let mut bmw = listing("local-2", "BMW", "320");
        bmw.year = 2021;
        bmw.price = Price::new(15_000_000);
        store.save_local_ads(&[toyota, bmw]).await.unwrap();

        let mut app = offline_app(dir.path()).await;
        app.refresh().await;

        app.set_sort(SortKey::PriceDesc);
        assert_eq!(app.visible()[0].brand, "BMW");

        app.set_criteria(FilterCriteria {
            brand: Some("Toyota".to_string()),
            model: ModelSelector::parse("Corolla"),
            ..FilterCriteria::default()
        });
        let visible = app.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].brand, "Toyota");
    }

    #[tokio::test]
    async fn test_favorites_and_profile() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());
        let mut mine = listing("local-1", "Toyota", "Corolla");
        mine.owner_email = Some("Anna@Lunnar.hu".to_string());
        store
            .save_local_ads(&[mine, listing("local-2", "BMW", "320")])
            .await
            .unwrap();
        store.save_session(Some(&local_user_session())).await.unwrap();

        let mut app = offline_app(dir.path()).await;
        app.refresh().await;
        assert!(app.session().is_some());

        assert!(app.toggle_favorite(&ListingId::new("local-2")).await.unwrap());
        assert!(app.toggle_favorite(&ListingId::new("gone")).await.unwrap());
        assert_eq!(app.favorites().len(), 2);
        assert_eq!(app.favorite_listings().len(), 1);

        let profile = app.profile().await.unwrap();
        assert_eq!(profile.username, "anna");
        assert_eq!(profile.own_listings, 1);
        assert_eq!(profile.favorites, 1);

        app.logout().await.unwrap();
        assert!(app.profile().await.is_none());
        assert!(app.own_listings().await.is_empty());
    }

    #[tokio::test]
    async fn test_toggle_after_login_follows_stored_favorites() {
        let dir = tempfile::tempdir().unwrap();
        let (mut config, _log) = stub_config(Vec::new()).await;
        config.data_dir = dir.path().to_path_buf();
        let mut app = Marketplace::open(&config, LogMailer).await;
        assert!(app.favorites().is_empty());

        app.accounts()
            .login("anna@lunnar.hu", STUB_PASSWORD)
            .await
            .unwrap();
        let server_favorite = ListingId::new("r-9");
        assert!(app.store().favorites().await.contains(&server_favorite));

        assert!(!app.toggle_favorite(&server_favorite).await.unwrap());
        let stored = app.store().favorites().await;
        assert!(!stored.contains(&server_favorite));
        assert_eq!(*app.favorites(), stored);

        assert!(app.toggle_favorite(&server_favorite).await.unwrap());
        assert_eq!(*app.favorites(), app.store().favorites().await);
    }

    #[tokio::test]
    async fn test_detail_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());
        store
            .save_local_ads(&[listing("local-1", "Toyota", "Corolla")])
            .await
            .unwrap();

        let mut app = offline_app(dir.path()).await;
        app.refresh().await;
        assert!(app.detail(&ListingId::new("local-1")).is_some());
        assert!(app.detail(&ListingId::new("missing")).is_none());
    }
}
