//! Business logic layer.

pub mod auth;
pub mod listings;

pub use auth::{AuthError, AuthService, TokenService};
pub use listings::{ListingCache, ListingService, ListingServiceError};
