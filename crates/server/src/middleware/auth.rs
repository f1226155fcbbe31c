//! Authentication extractors.
//!
//! Users authenticate with `Authorization: Bearer <token>`. Moderators present
//! the shared admin key in `x-admin-key`.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
};

use lunnar_core::{Email, UserId};

use crate::error::{AppError, set_sentry_user};
use crate::state::AppState;

/// Header carrying the moderation key.
pub const ADMIN_KEY_HEADER: &str = "x-admin-key";

/// Identity taken from a verified session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: UserId,
    pub username: String,
    pub email: Email,
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

fn authenticate(state: &AppState, token: &str) -> Result<AuthUser, AppError> {
    let claims = state.tokens().verify(token)?;
    let email = Email::parse(&claims.email)
        .map_err(|_| AppError::Forbidden("Invalid or expired token".to_string()))?;
    Ok(AuthUser {
        id: claims.user_id(),
        username: claims.username,
        email,
    })
}

/// Extractor that requires a valid session token.
///
/// A missing token is `401`; a malformed, expired or foreign token is `403`.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(RequireAuth(user): RequireAuth) -> String {
///     format!("Hello, {}!", user.username)
/// }
/// ```
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)
            .ok_or_else(|| AppError::Unauthorized("No token provided".to_string()))?;
        let user = authenticate(state, token)?;
        set_sentry_user(&user.id, Some(&user.username));
        Ok(Self(user))
    }
}

/// Extractor that identifies the user when a valid token is present.
///
/// Unlike `RequireAuth`, a missing or invalid token yields a guest.
pub struct OptionalAuth(pub Option<AuthUser>);

impl FromRequestParts<AppState> for OptionalAuth {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = bearer_token(&parts.headers).and_then(|token| authenticate(state, token).ok());
        Ok(Self(user))
    }
}

/// Extractor guarding moderation endpoints.
///
/// When no admin key is configured every request passes.
pub struct RequireAdmin;

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let presented = parts
            .headers
            .get(ADMIN_KEY_HEADER)
            .and_then(|v| v.to_str().ok());

        if state.config().admin_key_matches(presented) {
            return Ok(Self);
        }

        match presented {
            None => Err(AppError::Unauthorized("Admin key required".to_string())),
            Some(_) => {
                tracing::warn!("Rejected admin request with wrong key");
                Err(AppError::Forbidden("Invalid admin key".to_string()))
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::{Request, StatusCode};
    use axum::response::IntoResponse;

    use super::*;
    use crate::state::tests::test_state;

    fn parts(headers: &[(&str, &str)]) -> Parts {
        let mut builder = Request::builder().uri("/api/user/ads");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    fn token_for(state: &AppState) -> String {
        let email = Email::parse("anna@lunnar.hu").unwrap();
        state
            .tokens()
            .issue(&UserId::new("u-1"), "anna", &email)
            .unwrap()
    }

    #[test]
    fn test_bearer_token_parsing() {
        let p = parts(&[("authorization", "Bearer abc.def")]);
        assert_eq!(bearer_token(&p.headers), Some("abc.def"));

        let p = parts(&[("authorization", "Basic abc")]);
        assert_eq!(bearer_token(&p.headers), None);

        let p = parts(&[("authorization", "Bearer ")]);
        assert_eq!(bearer_token(&p.headers), None);
    }

    #[tokio::test]
    async fn test_require_auth_accepts_valid_token() {
        let state = test_state(None);
        let header = format!("Bearer {}", token_for(&state));
        let mut p = parts(&[("authorization", &header)]);

        let RequireAuth(user) = RequireAuth::from_request_parts(&mut p, &state)
            .await
            .unwrap();
        assert_eq!(user.id, UserId::new("u-1"));
        assert_eq!(user.username, "anna");
        assert_eq!(user.email.as_str(), "anna@lunnar.hu");
    }

    #[tokio::test]
    async fn test_require_auth_missing_token_is_unauthorized() {
        let state = test_state(None);
        let mut p = parts(&[]);
        let Err(err) = RequireAuth::from_request_parts(&mut p, &state).await else {
            panic!("expected rejection");
        };
        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_require_auth_bad_token_is_forbidden() {
        let state = test_state(None);
        let mut p = parts(&[("authorization", "Bearer nonsense")]);
        let Err(err) = RequireAuth::from_request_parts(&mut p, &state).await else {
            panic!("expected rejection");
        };
        assert_eq!(err.into_response().status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_optional_auth_treats_bad_token_as_guest() {
        let state = test_state(None);
        let mut p = parts(&[("authorization", "Bearer nonsense")]);
        let OptionalAuth(user) = OptionalAuth::from_request_parts(&mut p, &state)
            .await
            .unwrap();
        assert!(user.is_none());

        let header = format!("Bearer {}", token_for(&state));
        let mut p = parts(&[("authorization", &header)]);
        let OptionalAuth(user) = OptionalAuth::from_request_parts(&mut p, &state)
            .await
            .unwrap();
        assert_eq!(user.unwrap().username, "anna");
    }

    #[tokio::test]
    async fn test_require_admin() {
        let open = test_state(None);
        assert!(RequireAdmin::from_request_parts(&mut parts(&[]), &open).await.is_ok());

        let guarded = test_state(Some("moderator-key"));
        let missing = RequireAdmin::from_request_parts(&mut parts(&[]), &guarded).await;
        assert_eq!(
            missing.err().unwrap().into_response().status(),
            StatusCode::UNAUTHORIZED
        );

        let wrong =
            RequireAdmin::from_request_parts(&mut parts(&[(ADMIN_KEY_HEADER, "nope")]), &guarded)
                .await;
        assert_eq!(
            wrong.err().unwrap().into_response().status(),
            StatusCode::FORBIDDEN
        );

        let right = RequireAdmin::from_request_parts(
            &mut parts(&[(ADMIN_KEY_HEADER, "moderator-key")]),
            &guarded,
        )
        .await;
        assert!(right.is_ok());
    }
}
