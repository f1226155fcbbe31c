//! Local accounts with emailed confirmation codes.
//!
//! Registration and password reset both go through a six-digit code sent by
//! a [`CodeMailer`]. Accounts live in the local store with argon2 hashes;
//! login prefers the server and falls back to the local record.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use lunnar_core::validation::{validate_new_password, validate_registration};
use lunnar_core::{CredentialError, Email, UserId};

use crate::api::ApiClient;
use crate::favorites;
use crate::session::{Session, local_token};
use crate::storage::{LocalStore, StorageError, StoreKey};

/// Errors from account operations.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error(transparent)]
    Invalid(#[from] CredentialError),

    #[error("this email address is already registered")]
    EmailTaken,

    #[error("this username is already taken")]
    UsernameTaken,

    #[error("no pending request for this email address")]
    NoPendingRequest,

    #[error("incorrect code")]
    WrongCode,

    #[error("no account with this email address")]
    UnknownEmail,

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("failed to hash password")]
    PasswordHash,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// An account registered on this device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalUser {
    pub id: UserId,
    pub username: String,
    pub email: Email,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// What a code confirms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodePurpose {
    Verification,
    PasswordReset,
}

/// Delivers confirmation codes.
pub trait CodeMailer {
    fn send_code(&self, to: &Email, code: &str, purpose: CodePurpose);
}

/// Mailer that writes codes to the log instead of sending email.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailer;

impl CodeMailer for LogMailer {
    fn send_code(&self, to: &Email, code: &str, purpose: CodePurpose) {
        info!(email = %to, code, ?purpose, "Confirmation code issued");
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PendingVerification {
    user: LocalUser,
    code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PendingReset {
    email: Email,
    code: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PendingCodes {
    #[serde(default)]
    verifications: Vec<PendingVerification>,
    #[serde(default)]
    resets: Vec<PendingReset>,
}

/// Account operations over the local store and the server.
pub struct Accounts<'a, M> {
    api: &'a ApiClient,
    store: &'a LocalStore,
    mailer: &'a M,
}

impl<'a, M: CodeMailer> Accounts<'a, M> {
    #[must_use]
    pub const fn new(api: &'a ApiClient, store: &'a LocalStore, mailer: &'a M) -> Self {
        Self { api, store, mailer }
    }

    async fn users(&self) -> Vec<LocalUser> {
        self.store.load(StoreKey::Users).await
    }

    async fn codes(&self) -> PendingCodes {
        self.store.load(StoreKey::PendingCodes).await
    }

    /// Start a registration and email a verification code.
    ///
    /// Returns the normalized email the code was sent to.
    ///
    /// # Errors
    ///
    /// Returns a validation error, `EmailTaken` or `UsernameTaken`.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        confirmation: &str,
        accepted_terms: bool,
    ) -> Result<Email, AccountError> {
        let form = validate_registration(username, email, password, confirmation, accepted_terms)?;

        let users = self.users().await;
        if users.iter().any(|u| u.email == form.email) {
            return Err(AccountError::EmailTaken);
        }
        if users
            .iter()
            .any(|u| u.username.to_lowercase() == form.username.to_lowercase())
        {
            return Err(AccountError::UsernameTaken);
        }

        let now = Utc::now();
        let user = LocalUser {
            id: UserId::new(format!("user_{}", now.timestamp_millis())),
            username: form.username,
            email: form.email.clone(),
            password_hash: hash_password(&form.password)?,
            created_at: now,
        };

        let code = generate_code();
        let mut codes = self.codes().await;
        codes.verifications.retain(|p| p.user.email != form.email);
        codes.verifications.push(PendingVerification {
            user,
            code: code.clone(),
        });
        self.store.save(StoreKey::PendingCodes, &codes).await?;

        self.mailer.send_code(&form.email, &code, CodePurpose::Verification);
        Ok(form.email)
    }

    /// Confirm a registration with its code and create the account.
    ///
    /// When `password` is given and matches the registration, the account is
    /// also registered on the server. That call is best effort.
    ///
    /// # Errors
    ///
    /// Returns `NoPendingRequest`, `WrongCode` or a storage error.
    pub async fn verify(
        &self,
        email: &str,
        code: &str,
        password: Option<&str>,
    ) -> Result<LocalUser, AccountError> {
        let email = Email::parse(email).map_err(|_| AccountError::NoPendingRequest)?;
        let mut codes = self.codes().await;
        let index = codes
            .verifications
            .iter()
            .position(|p| p.user.email == email)
            .ok_or(AccountError::NoPendingRequest)?;
        // Removed in memory only; nothing is saved on a wrong code.
        let pending = codes.verifications.remove(index);
        if pending.code != code.trim() {
            return Err(AccountError::WrongCode);
        }
        let user = pending.user;

        let mut users = self.users().await;
        if users.iter().any(|u| u.email == user.email) {
            return Err(AccountError::EmailTaken);
        }
        users.push(user.clone());
        self.store.save(StoreKey::Users, &users).await?;
        self.store.save(StoreKey::PendingCodes, &codes).await?;
        info!(user_id = %user.id, "Account verified");

        if let Some(password) = password.filter(|p| verify_password(p, &user.password_hash))
            && let Err(e) = self
                .api
                .register(&user.username, user.email.as_str(), password)
                .await
        {
            warn!(error = %e, "Server registration failed, account stays local");
        }
        Ok(user)
    }

    /// Replace the pending verification code and send it again.
    ///
    /// # Errors
    ///
    /// Returns `NoPendingRequest` if no registration is waiting.
    pub async fn resend(&self, email: &str) -> Result<(), AccountError> {
        let email = Email::parse(email).map_err(|_| AccountError::NoPendingRequest)?;
        let mut codes = self.codes().await;
        let pending = codes
            .verifications
            .iter_mut()
            .find(|p| p.user.email == email)
            .ok_or(AccountError::NoPendingRequest)?;

        let code = generate_code();
        pending.code.clone_from(&code);
        self.store.save(StoreKey::PendingCodes, &codes).await?;
        self.mailer.send_code(&email, &code, CodePurpose::Verification);
        Ok(())
    }

    /// Sign in and persist the session.
    ///
    /// Tries the server first. On success its favorites are merged into the
    /// local ones. Otherwise the local account is checked and a local token
    /// is issued.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCredentials` if neither the server nor a local account
    /// accepts the credentials.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AccountError> {
        let email = Email::parse(email).map_err(|_| AccountError::InvalidCredentials)?;
        let users = self.users().await;
        let local = users.iter().find(|u| u.email == email);

        let session = match self.api.login(email.as_str(), password).await {
            Ok(response) => {
                let mut merged = self.store.favorites().await;
                merged.extend_from(&response.favorites);
                self.store.save_favorites(&merged).await?;

                let session = Session {
                    user_id: response
                        .id
                        .or_else(|| local.map(|u| u.id.clone()))
                        .unwrap_or_else(|| UserId::new(email.as_str())),
                    username: response.username,
                    email: response.email.unwrap_or_else(|| email.as_str().to_owned()),
                    token: response.token,
                };
                favorites::sync(self.api, Some(&session), &merged).await;
                session
            }
            Err(e) => {
                debug!(error = %e, "Server login failed, checking local account");
                let user = local
                    .filter(|u| verify_password(password, &u.password_hash))
                    .ok_or(AccountError::InvalidCredentials)?;
                Session {
                    user_id: user.id.clone(),
                    username: user.username.clone(),
                    email: user.email.as_str().to_owned(),
                    token: local_token(&user.id, Utc::now().timestamp_millis()),
                }
            }
        };

        self.store.save_session(Some(&session)).await?;
        info!(user_id = %session.user_id, local = session.is_local(), "Logged in");
        Ok(session)
    }

    /// Clear the session.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    pub async fn logout(&self) -> Result<(), StorageError> {
        self.store.save_session(None).await
    }

    /// Email a password reset code to a known account.
    ///
    /// # Errors
    ///
    /// Returns `UnknownEmail` if no local account uses this address.
    pub async fn forgot_password(&self, email: &str) -> Result<(), AccountError> {
        let email = Email::parse(email).map_err(|_| AccountError::UnknownEmail)?;
        if !self.users().await.iter().any(|u| u.email == email) {
            return Err(AccountError::UnknownEmail);
        }

        let code = generate_code();
        let mut codes = self.codes().await;
        codes.resets.retain(|r| r.email != email);
        codes.resets.push(PendingReset {
            email: email.clone(),
            code: code.clone(),
        });
        self.store.save(StoreKey::PendingCodes, &codes).await?;
        self.mailer.send_code(&email, &code, CodePurpose::PasswordReset);
        Ok(())
    }

    /// Set a new password using a reset code.
    ///
    /// # Errors
    ///
    /// Returns `NoPendingRequest`, `WrongCode`, a policy error or
    /// `UnknownEmail`.
    pub async fn reset_password(
        &self,
        email: &str,
        code: &str,
        password: &str,
        confirmation: &str,
    ) -> Result<(), AccountError> {
        let email = Email::parse(email).map_err(|_| AccountError::NoPendingRequest)?;
        let mut codes = self.codes().await;
        let index = codes
            .resets
            .iter()
            .position(|r| r.email == email)
            .ok_or(AccountError::NoPendingRequest)?;
        let pending = codes.resets.remove(index);
        if pending.code != code.trim() {
            return Err(AccountError::WrongCode);
        }
        validate_new_password(password, confirmation)?;

        let mut users = self.users().await;
        let user = users
            .iter_mut()
            .find(|u| u.email == email)
            .ok_or(AccountError::UnknownEmail)?;
        user.password_hash = hash_password(password)?;
        let user_id = user.id.clone();

        self.store.save(StoreKey::Users, &users).await?;
        self.store.save(StoreKey::PendingCodes, &codes).await?;
        info!(user_id = %user_id, "Password reset");
        Ok(())
    }
}

fn generate_code() -> String {
    rand::rng().random_range(100_000..1_000_000).to_string()
}

fn hash_password(password: &str) -> Result<String, AccountError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AccountError::PasswordHash)
}

fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash).is_ok_and(|parsed| {
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use lunnar_core::ListingId;

    use super::*;
    use crate::testing::{STUB_PASSWORD, offline_api, stub_server};

    #[derive(Default)]
    struct RecordingMailer {
        sent: Mutex<Vec<(String, String, CodePurpose)>>,
    }

    impl RecordingMailer {
        fn last_code(&self) -> String {
            self.sent.lock().unwrap().last().unwrap().1.clone()
        }
    }

    impl CodeMailer for RecordingMailer {
        fn send_code(&self, to: &Email, code: &str, purpose: CodePurpose) {
            self.sent
                .lock()
                .unwrap()
                .push((to.as_str().to_owned(), code.to_owned(), purpose));
        }
    }

    async fn registered(
        api: &ApiClient,
        store: &LocalStore,
        mailer: &RecordingMailer,
    ) -> LocalUser {
        let accounts = Accounts::new(api, store, mailer);
        accounts
            .register("anna", "Anna@Lunnar.hu", "Secret1", "Secret1", true)
            .await
            .unwrap();
        accounts
            .verify("anna@lunnar.hu", &mailer.last_code(), Some("Secret1"))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_weak_password_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());
        let mailer = RecordingMailer::default();
        let api = offline_api();
        let accounts = Accounts::new(&api, &store, &mailer);

        let err = accounts
            .register("anna", "anna@lunnar.hu", "abc123", "abc123", true)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AccountError::Invalid(CredentialError::PasswordMissingUppercase)
        ));
        assert!(mailer.sent.lock().unwrap().is_empty());
        assert!(accounts.users().await.is_empty());
        assert!(accounts.codes().await.verifications.is_empty());
    }

    #[tokio::test]
    async fn test_register_verify_login_offline() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());
        let mailer = RecordingMailer::default();
        let api = offline_api();

        let user = registered(&api, &store, &mailer).await;
        assert_eq!(user.email.as_str(), "anna@lunnar.hu");
        assert!(user.password_hash.starts_with("$argon2id$"));
        let code = mailer.last_code();
        assert_eq!(code.len(), 6);

        let accounts = Accounts::new(&api, &store, &mailer);
        let session = accounts.login("anna@lunnar.hu", "Secret1").await.unwrap();
        assert!(session.is_local());
        assert!(session.token.starts_with(&format!("lt_{}_", user.id)));
        assert_eq!(store.session().await, Some(session));

        assert!(matches!(
            accounts.login("anna@lunnar.hu", "Wrong1").await,
            Err(AccountError::InvalidCredentials)
        ));

        accounts.logout().await.unwrap();
        assert!(store.session().await.is_none());
    }

    #[tokio::test]
    async fn test_duplicates_rejected_before_code() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());
        let mailer = RecordingMailer::default();
        let api = offline_api();
        registered(&api, &store, &mailer).await;
        let accounts = Accounts::new(&api, &store, &mailer);

        let sent_before = mailer.sent.lock().unwrap().len();
        assert!(matches!(
            accounts
                .register("other", "anna@lunnar.hu", "Secret1", "Secret1", true)
                .await,
            Err(AccountError::EmailTaken)
        ));
        assert!(matches!(
            accounts
                .register("ANNA", "new@lunnar.hu", "Secret1", "Secret1", true)
                .await,
            Err(AccountError::UsernameTaken)
        ));
        assert_eq!(mailer.sent.lock().unwrap().len(), sent_before);
    }

    #[tokio::test]
    async fn test_wrong_code_and_resend() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());
        let mailer = RecordingMailer::default();
        let api = offline_api();
        let accounts = Accounts::new(&api, &store, &mailer);

        accounts
            .register("anna", "anna@lunnar.hu", "Secret1", "Secret1", true)
            .await
            .unwrap();
        let first = mailer.last_code();
        let wrong = if first == "123456" { "654321" } else { "123456" };
        assert!(matches!(
            accounts.verify("anna@lunnar.hu", wrong, None).await,
            Err(AccountError::WrongCode)
        ));

        accounts.resend("anna@lunnar.hu").await.unwrap();
        assert_eq!(mailer.sent.lock().unwrap().len(), 2);
        let user = accounts
            .verify("anna@lunnar.hu", &mailer.last_code(), None)
            .await
            .unwrap();
        assert_eq!(user.username, "anna");

        assert!(matches!(
            accounts.resend("anna@lunnar.hu").await,
            Err(AccountError::NoPendingRequest)
        ));
    }

    #[tokio::test]
    async fn test_password_reset() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());
        let mailer = RecordingMailer::default();
        let api = offline_api();
        registered(&api, &store, &mailer).await;
        let accounts = Accounts::new(&api, &store, &mailer);

        assert!(matches!(
            accounts.forgot_password("nobody@lunnar.hu").await,
            Err(AccountError::UnknownEmail)
        ));

        accounts.forgot_password("anna@lunnar.hu").await.unwrap();
        let code = mailer.last_code();
        assert_eq!(mailer.sent.lock().unwrap().last().unwrap().2, CodePurpose::PasswordReset);

        assert!(matches!(
            accounts
                .reset_password("anna@lunnar.hu", &code, "weak", "weak")
                .await,
            Err(AccountError::Invalid(_))
        ));
        accounts
            .reset_password("anna@lunnar.hu", &code, "Newpass2", "Newpass2")
            .await
            .unwrap();

        assert!(accounts.login("anna@lunnar.hu", "Newpass2").await.is_ok());
        assert!(accounts.login("anna@lunnar.hu", "Secret1").await.is_err());
    }

    #[tokio::test]
    async fn test_server_login_merges_favorites() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());
        let mailer = RecordingMailer::default();
        let (api, log) = stub_server(Vec::new()).await;

        let mut local = store.favorites().await;
        local.toggle(&ListingId::new("local-1"));
        store.save_favorites(&local).await.unwrap();

        let accounts = Accounts::new(&api, &store, &mailer);
        let session = accounts.login("anna@lunnar.hu", STUB_PASSWORD).await.unwrap();
        assert_eq!(session.server_token(), Some("srv-token"));
        assert_eq!(session.user_id, UserId::new("srv-user"));

        let favorites = store.favorites().await;
        assert!(favorites.contains(&ListingId::new("local-1")));
        assert!(favorites.contains(&ListingId::new("r-9")));
        assert_eq!(log.synced.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_verify_registers_on_server() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());
        let mailer = RecordingMailer::default();
        let (api, log) = stub_server(Vec::new()).await;

        registered(&api, &store, &mailer).await;
        assert_eq!(*log.registered.lock().unwrap(), ["anna"]);
    }
}
