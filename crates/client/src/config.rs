//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! - `LUNNAR_API_URL` - REST base URL (default: `http://localhost:5000/api`)
//! - `LUNNAR_DATA_DIR` - Directory for the local store (default: `.lunnar`)
//! - `LUNNAR_ADMIN_KEY` - Moderation key sent as `x-admin-key`

use std::path::PathBuf;

use secrecy::SecretString;

/// Default REST base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Default local store directory.
pub const DEFAULT_DATA_DIR: &str = ".lunnar";

/// Client configuration.
///
/// Implements `Debug` manually to redact the admin key.
#[derive(Clone)]
pub struct ClientConfig {
    /// REST base URL without a trailing slash
    pub api_url: String,
    /// Directory holding the local JSON store
    pub data_dir: PathBuf,
    /// Moderation key for `/admin` endpoints
    pub admin_key: Option<SecretString>,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_url", &self.api_url)
            .field("data_dir", &self.data_dir)
            .field("admin_key", &self.admin_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present. Every
    /// variable has a default, so loading never fails.
    #[must_use]
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        let api_url =
            get_optional_env("LUNNAR_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let data_dir = get_optional_env("LUNNAR_DATA_DIR")
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);

        Self::new(
            api_url,
            data_dir,
            get_optional_env("LUNNAR_ADMIN_KEY").map(SecretString::from),
        )
    }

    /// Build a configuration from explicit values.
    #[must_use]
    pub fn new(
        api_url: impl Into<String>,
        data_dir: impl Into<PathBuf>,
        admin_key: Option<SecretString>,
    ) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            data_dir: data_dir.into(),
            admin_key,
        }
    }
}

/// Get an optional environment variable, treating empty as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.trim().is_empty())
}
