//! Integration tests for Lunnar.
//!
//! # Running Tests
//!
//! ```bash
//! # Start PostgreSQL, migrate and run the server
//! lunnar migrate
//! SERVER_ADMIN_KEY=test-admin-key cargo run -p lunnar-server
//!
//! # Run the ignored integration tests against it
//! LUNNAR_ADMIN_KEY=test-admin-key cargo test -p lunnar-integration-tests -- --ignored
//! ```
//!
//! # Environment Variables
//!
//! - `LUNNAR_SERVER_URL` - Server origin (default `http://localhost:5000`)
//! - `LUNNAR_ADMIN_KEY` - Admin key the server was started with, if any

#![cfg_attr(not(test), forbid(unsafe_code))]

use reqwest::{Client, RequestBuilder};
use serde_json::{Value, json};

/// Connection details for the server under test.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
    pub admin_key: Option<String>,
}

impl TestContext {
    #[must_use]
    pub fn new() -> Self {
        let base_url = std::env::var("LUNNAR_SERVER_URL")
            .unwrap_or_else(|_| "http://localhost:5000".to_string())
            .trim_end_matches('/')
            .to_string();
        Self {
            client: Client::new(),
            base_url,
            admin_key: std::env::var("LUNNAR_ADMIN_KEY").ok(),
        }
    }

    /// Absolute URL for an API path such as `/api/ads`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Attach the admin key header when one is configured.
    #[must_use]
    pub fn admin(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.admin_key {
            Some(key) => request.header("x-admin-key", key),
            None => request,
        }
    }

    /// Configuration for `lunnar-client` pointed at this server.
    #[must_use]
    pub fn client_config(&self, data_dir: &std::path::Path) -> lunnar_client::ClientConfig {
        lunnar_client::ClientConfig::new(
            format!("{}/api", self.base_url),
            data_dir,
            self.admin_key.clone().map(Into::into),
        )
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// A unique suffix so repeated runs do not collide on usernames or emails.
#[must_use]
pub fn unique() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// A valid listing body with one image.
#[must_use]
pub fn listing_body(brand: &str, model: &str) -> Value {
    json!({
        "brand": brand,
        "model": model,
        "year": 2019,
        "km": 80000,
        "fuel": "petrol",
        "transmission": "manual",
        "hp": 122,
        "ccm": 1600,
        "price": 8_000_000,
        "city": "Budapest",
        "images": ["https://picsum.photos/seed/lunnar/800/600"],
        "description": "Integration test listing",
    })
}
