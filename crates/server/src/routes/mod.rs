//! HTTP route handlers for the marketplace API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                  - Liveness check
//! GET    /health/ready            - Readiness check (database ping)
//!
//! # Listings
//! GET    /api/ads                 - Approved listings, newest first
//! POST   /api/ads                 - Submit a listing (optional bearer token)
//!
//! # Moderation (x-admin-key when configured)
//! GET    /api/admin/ads           - Every listing
//! PATCH  /api/admin/ads/{id}      - Set moderation status
//! DELETE /api/admin/ads/{id}      - Remove a listing
//!
//! # Auth (rate limited)
//! POST   /api/auth/register       - Create an account
//! POST   /api/auth/login          - Exchange credentials for a token
//!
//! # User (bearer token)
//! GET    /api/user/ads            - Caller's listings of any status
//! POST   /api/user/favorites      - Replace the caller's favorites
//! ```

pub mod admin;
pub mod ads;
pub mod auth;
pub mod user;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::middleware::auth_rate_limiter;
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .layer(auth_rate_limiter())
}

/// Create the moderation routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new().route("/ads", get(admin::list)).route(
        "/ads/{id}",
        patch(admin::update_status).delete(admin::delete),
    )
}

/// Create the user routes router.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/ads", get(user::ads))
        .route("/favorites", post(user::set_favorites))
}

/// Create all API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/ads", get(ads::list).post(ads::create))
        .nest("/api/admin", admin_routes())
        .nest("/api/auth", auth_routes())
        .nest("/api/user", user_routes())
}
