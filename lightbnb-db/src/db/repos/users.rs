//! User repository
//!
//! - lookups: at most one row, `None` when nothing matches
//! - create: plain INSERT ... RETURNING, duplicates surface as a unique
//!   constraint violation

use sqlx::PgPool;

use super::query_failed;
use crate::error::DbError;
use crate::models::{Email, NewUser, User};

/// User repository
pub struct UserRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a single user by email, matching case-insensitively.
    ///
    /// The address is lowercased before binding; stored addresses are
    /// lowercased on insert by [`Email`].
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>, DbError> {
        let email = Email::normalize(email);

        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password
            FROM users
            WHERE email = $1
            LIMIT 1
            "#,
        )
        .bind(&email)
        .fetch_optional(self.pool)
        .await
        .map_err(query_failed("get_user_with_email"))?;

        tracing::debug!(%email, found = user.is_some(), "user lookup by email");
        Ok(user)
    }

    /// Get a single user by id.
    pub async fn get_by_id(&self, id: i32) -> Result<Option<User>, DbError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password
            FROM users
            WHERE id = $1
            LIMIT 1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(query_failed("get_user_with_id"))?;

        tracing::debug!(id, found = user.is_some(), "user lookup by id");
        Ok(user)
    }

    /// Insert a new user and return the created row.
    pub async fn create(&self, user: &NewUser) -> Result<User, DbError> {
        let created = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, password
            "#,
        )
        .bind(&user.name)
        .bind(user.email.as_str())
        .bind(&user.password)
        .fetch_one(self.pool)
        .await
        .map_err(query_failed("add_user"))?;

        tracing::info!(id = created.id, email = %created.email, "created user");
        Ok(created)
    }
}
