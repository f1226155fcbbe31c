//! User repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use lunnar_core::{Email, FavoriteSet, ListingId, UserId};

use super::RepositoryError;
use crate::models::user::User;

const USER_COLUMNS: &str = "id, username, email, favorites, created_at";

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: UserId,
    username: String,
    email: Email,
    favorites: Vec<String>,
    created_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct UserWithHashRow {
    #[sqlx(flatten)]
    user: UserRow,
    password_hash: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            email: row.email,
            favorites: row.favorites.into_iter().map(ListingId::new).collect(),
            created_at: row.created_at,
        }
    }
}

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
                .bind(id)
                .fetch_optional(self.pool)
                .await?;
        Ok(row.map(User::from))
    }

    /// Create a user with a password hash.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email or username is taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create_with_password(
        &self,
        username: &str,
        email: &Email,
        password_hash: &str,
    ) -> Result<User, RepositoryError> {
        let row: UserRow = sqlx::query_as(&format!(
            "INSERT INTO users (username, email, password_hash) VALUES ($1, $2, $3) \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            let taken = match &e {
                sqlx::Error::Database(db_err)
                    if db_err.constraint() == Some("users_username_lower_idx") =>
                {
                    "username already taken"
                }
                _ => "email already registered",
            };
            RepositoryError::from_insert(e, taken)
        })?;
        Ok(row.into())
    }

    /// Get a user and their password hash by email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let row: Option<UserWithHashRow> = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS}, password_hash FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(self.pool)
        .await?;
        Ok(row.map(|r| (r.user.into(), r.password_hash)))
    }

    /// Replace a user's favorites.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user does not exist.
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn set_favorites(
        &self,
        id: &UserId,
        favorites: &FavoriteSet,
    ) -> Result<User, RepositoryError> {
        let ids: Vec<String> = favorites.iter().map(|id| id.as_str().to_owned()).collect();
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "UPDATE users SET favorites = $2 WHERE id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(&ids)
        .fetch_optional(self.pool)
        .await?;
        row.map(User::from).ok_or(RepositoryError::NotFound)
    }
}
