//! REST API client.
//!
//! Thin typed wrapper over the marketplace endpoints. No timeouts and no
//! retries: callers fall back to the local store when a call fails.

use reqwest::{Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use lunnar_core::{FavoriteSet, Listing, ListingId, ModerationStatus, UserId};

use crate::config::ClientConfig;

/// Header carrying the moderation key.
const ADMIN_KEY_HEADER: &str = "x-admin-key";

/// Errors from REST calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server could not be reached.
    #[error("request failed: {0}")]
    Request(String),

    /// The server answered with an error status.
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("unexpected response: {0}")]
    Response(String),
}

impl ApiError {
    /// HTTP status, when the server answered.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Request(_) | Self::Response(_) => None,
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Body returned by `POST /auth/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    #[serde(default)]
    pub favorites: FavoriteSet,
    #[serde(default)]
    pub id: Option<UserId>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct Registration<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize, Deserialize)]
struct FavoritesBody {
    favorites: FavoriteSet,
}

#[derive(Serialize)]
struct StatusBody {
    status: ModerationStatus,
}

/// Marketplace REST client.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    admin_key: Option<SecretString>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("admin_key", &self.admin_key.as_ref().map(|_| "[REDACTED]"))
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.api_url.clone(),
            admin_key: config.admin_key.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn admin(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.admin_key {
            Some(key) => builder.header(ADMIN_KEY_HEADER, key.expose_secret()),
            None => builder,
        }
    }

    // =========================================================================
    // Listings
    // =========================================================================

    /// `GET /ads` - approved listings.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self))]
    pub async fn fetch_ads(&self) -> Result<Vec<Listing>, ApiError> {
        send(self.client.get(self.url("/ads"))).await
    }

    /// `GET /user/ads` - the token holder's listings.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip_all)]
    pub async fn user_ads(&self, token: &str) -> Result<Vec<Listing>, ApiError> {
        send(self.client.get(self.url("/user/ads")).bearer_auth(token)).await
    }

    /// `POST /ads` - submit a listing; the server stores it as pending.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip_all, fields(brand = %listing.brand, model = %listing.model))]
    pub async fn submit(
        &self,
        listing: &Listing,
        token: Option<&str>,
    ) -> Result<Listing, ApiError> {
        let mut builder = self.client.post(self.url("/ads")).json(listing);
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        send(builder).await
    }

    // =========================================================================
    // Moderation
    // =========================================================================

    /// `GET /admin/ads` - every listing.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self))]
    pub async fn admin_ads(&self) -> Result<Vec<Listing>, ApiError> {
        send(self.admin(self.client.get(self.url("/admin/ads")))).await
    }

    /// `PATCH /admin/ads/{id}`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self), fields(listing_id = %id))]
    pub async fn set_status(
        &self,
        id: &ListingId,
        status: ModerationStatus,
    ) -> Result<Listing, ApiError> {
        let builder = self
            .client
            .patch(self.url(&format!("/admin/ads/{id}")))
            .json(&StatusBody { status });
        send(self.admin(builder)).await
    }

    /// `DELETE /admin/ads/{id}`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self), fields(listing_id = %id))]
    pub async fn delete_ad(&self, id: &ListingId) -> Result<(), ApiError> {
        let builder = self.client.delete(self.url(&format!("/admin/ads/{id}")));
        let _: serde_json::Value = send(self.admin(builder)).await?;
        Ok(())
    }

    // =========================================================================
    // Accounts
    // =========================================================================

    /// `POST /auth/register`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the account exists.
    #[instrument(skip(self, password))]
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(), ApiError> {
        let body = Registration {
            username,
            email,
            password,
        };
        let builder = self.client.post(self.url("/auth/register")).json(&body);
        let _: serde_json::Value = send(builder).await?;
        Ok(())
    }

    /// `POST /auth/login`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the credentials are rejected.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let body = Credentials { email, password };
        send(self.client.post(self.url("/auth/login")).json(&body)).await
    }

    /// `POST /user/favorites` - replace the server-side favorites.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip_all, fields(count = favorites.len()))]
    pub async fn sync_favorites(
        &self,
        token: &str,
        favorites: &FavoriteSet,
    ) -> Result<FavoriteSet, ApiError> {
        let body = FavoritesBody {
            favorites: favorites.clone(),
        };
        let builder = self
            .client
            .post(self.url("/user/favorites"))
            .bearer_auth(token)
            .json(&body);
        let response: FavoritesBody = send(builder).await?;
        Ok(response.favorites)
    }
}

async fn send<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, ApiError> {
    let response = builder
        .send()
        .await
        .map_err(|e| ApiError::Request(e.to_string()))?;
    read(response).await
}

async fn read<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.message)
            .unwrap_or(text);
        debug!(status = status.as_u16(), %message, "API error response");
        return Err(ApiError::Status {
            status: status.as_u16(),
            message,
        });
    }

    response
        .json()
        .await
        .map_err(|e| ApiError::Response(e.to_string()))
}
