//! User domain types.
//!
//! These types represent validated domain objects separate from database row types.

use chrono::{DateTime, Utc};

use lunnar_core::{Email, FavoriteSet, UserId};

/// A marketplace account (domain type). Never carries the password hash.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Display name, unique case-insensitively.
    pub username: String,
    /// Login address, unique.
    pub email: Email,
    /// Favorited listing ids, replaced wholesale by the client.
    pub favorites: FavoriteSet,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
}
