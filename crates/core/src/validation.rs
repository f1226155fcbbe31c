//! Account input validation shared by the server and the client.

use crate::types::{Email, EmailError};

/// Minimum username length in characters.
pub const MIN_USERNAME_LENGTH: usize = 3;

/// Minimum password length in characters.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Reasons account input is rejected.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    #[error("username must be at least {min} characters")]
    UsernameTooShort { min: usize },

    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("password must contain an uppercase letter")]
    PasswordMissingUppercase,

    #[error("password must contain a digit")]
    PasswordMissingDigit,

    #[error("passwords do not match")]
    PasswordMismatch,

    #[error("the terms of use must be accepted")]
    TermsNotAccepted,
}

/// Registration input that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub username: String,
    pub email: Email,
    pub password: String,
}

/// Check a username. Returns it trimmed.
///
/// # Errors
///
/// Returns `UsernameTooShort` for fewer than three characters.
pub fn validate_username(username: &str) -> Result<String, CredentialError> {
    let username = username.trim();
    if username.chars().count() < MIN_USERNAME_LENGTH {
        return Err(CredentialError::UsernameTooShort {
            min: MIN_USERNAME_LENGTH,
        });
    }
    Ok(username.to_owned())
}

/// Check a password against the policy: at least six characters, one
/// uppercase ASCII letter and one digit.
///
/// # Errors
///
/// Returns the first rule the password breaks.
pub fn validate_password(password: &str) -> Result<(), CredentialError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CredentialError::PasswordTooShort {
            min: MIN_PASSWORD_LENGTH,
        });
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(CredentialError::PasswordMissingUppercase);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(CredentialError::PasswordMissingDigit);
    }
    Ok(())
}

/// Check a password and its confirmation.
///
/// # Errors
///
/// Returns a policy error or `PasswordMismatch`.
pub fn validate_new_password(password: &str, confirmation: &str) -> Result<(), CredentialError> {
    validate_password(password)?;
    if password != confirmation {
        return Err(CredentialError::PasswordMismatch);
    }
    Ok(())
}

/// Validate a full registration form.
///
/// # Errors
///
/// Returns the first failing check, in form order.
pub fn validate_registration(
    username: &str,
    email: &str,
    password: &str,
    confirmation: &str,
    accepted_terms: bool,
) -> Result<Registration, CredentialError> {
    let username = validate_username(username)?;
    let email = Email::parse(email)?;
    validate_new_password(password, confirmation)?;
    if !accepted_terms {
        return Err(CredentialError::TermsNotAccepted);
    }
    Ok(Registration {
        username,
        email,
        password: password.to_owned(),
    })
}
