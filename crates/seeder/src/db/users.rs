//! User repository for database operations.
//!
//! Queries are built at runtime with `sqlx::query` so the crate compiles
//! without a live database or an offline query cache.

use std::collections::BTreeSet;

use secrecy::ExposeSecret;
use sqlx::{MySql, MySqlPool};

use synthseed_core::{UserId, UserRole, ValidUser};

use super::RepositoryError;
use crate::password::hash_password;

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a MySqlPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a MySqlPool) -> Self {
        Self { pool }
    }

    /// Insert a validated user with the default role.
    ///
    /// The password is hashed before it is bound.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::PasswordHash` if hashing fails.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, user: &ValidUser<'_>) -> Result<UserId, RepositoryError> {
        let password_hash = hash_password(user.password.expose_secret())?;

        let result = sqlx::query(
            r"
            INSERT INTO users
                (first_name, last_name, address, city, state, country,
                 postcode, phone, dob, email, password, role)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.address)
        .bind(&user.city)
        .bind(&user.state)
        .bind(&user.country)
        .bind(&user.postcode)
        .bind(&user.phone)
        .bind(user.date_of_birth())
        .bind(user.email_address().as_str())
        .bind(password_hash)
        .bind(UserRole::default().as_str())
        .execute(self.pool)
        .await
        .map_err(|e| RepositoryError::from_insert(e, "email already exists"))?;

        Ok(UserId::new(result.last_insert_id()))
    }

    /// Emails of every stored user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn emails(&self) -> Result<BTreeSet<String>, RepositoryError> {
        let emails: Vec<String> = sqlx::query_scalar("SELECT email FROM users")
            .fetch_all(self.pool)
            .await?;
        Ok(emails.into_iter().collect())
    }

    /// Delete every user, returning the number of rows removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete_all<'e, E>(executor: E) -> Result<u64, RepositoryError>
    where
        E: sqlx::Executor<'e, Database = MySql>,
    {
        let result = sqlx::query("DELETE FROM users").execute(executor).await?;
        Ok(result.rows_affected())
    }
}
