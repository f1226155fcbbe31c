//! Registration and login routes.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use lunnar_core::{ListingId, UserId};

use crate::error::{Result, set_sentry_user};
use crate::routes::admin::MessageResponse;
use crate::services::AuthService;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body returned by a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    pub favorites: Vec<ListingId>,
    pub id: UserId,
    pub email: String,
}

/// `POST /api/auth/register`
pub async fn register(
    State(state): State<AppState>,
    payload: std::result::Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    let Json(req) = payload?;
    AuthService::new(state.pool())
        .register(&req.username, &req.email, &req.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Registration successful".to_string(),
        }),
    ))
}

/// `POST /api/auth/login`
pub async fn login(
    State(state): State<AppState>,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>> {
    let Json(req) = payload?;
    let user = AuthService::new(state.pool())
        .login(&req.email, &req.password)
        .await?;

    let token = state.tokens().issue(&user.id, &user.username, &user.email)?;
    set_sentry_user(&user.id, Some(&user.username));
    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(LoginResponse {
        token,
        username: user.username,
        favorites: user.favorites.to_vec(),
        id: user.id,
        email: user.email.into_inner(),
    }))
}
