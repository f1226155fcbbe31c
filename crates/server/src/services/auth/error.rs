//! Authentication error types.

use thiserror::Error;

use lunnar_core::CredentialError;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Username, email or password failed validation.
    #[error(transparent)]
    InvalidInput(#[from] CredentialError),

    /// Wrong password or unknown email.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The token referenced a user that no longer exists.
    #[error("user not found")]
    UserNotFound,

    /// Email or username already registered.
    #[error("{0}")]
    UserAlreadyExists(String),

    /// Token missing, malformed, expired or signed with another key.
    #[error("invalid token")]
    InvalidToken,

    /// Token could not be signed.
    #[error("token signing failed")]
    TokenSigning,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}

impl From<lunnar_core::EmailError> for AuthError {
    fn from(err: lunnar_core::EmailError) -> Self {
        Self::InvalidInput(CredentialError::InvalidEmail(err))
    }
}
