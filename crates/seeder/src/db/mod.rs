//! Database operations for the seeded MySQL schema.
//!
//! ## Tables
//!
//! - `users` - Accounts, unique on `email`
//! - `contact_requests` - Contact form submissions, loosely linked to `users`
//!
//! # Migrations
//!
//! Migrations are stored in `crates/seeder/migrations/` and run via:
//! ```bash
//! cargo run -p synthseed-cli -- migrate
//! ```

pub mod contact_requests;
pub mod users;

use std::collections::BTreeSet;
use std::future::Future;
use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::MySqlPool;
use sqlx::migrate::{MigrateError, Migrator};
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use thiserror::Error;

use synthseed_core::{ContactRequestId, UserId, ValidContactRequest, ValidUser};

use crate::config::DatabaseConfig;

pub use contact_requests::ContactRequestRepository;
pub use users::UserRepository;

/// Embedded schema migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// Password could not be hashed.
    #[error("password hashing failed")]
    PasswordHash,
}

impl RepositoryError {
    /// Map an insert error, turning unique violations into `Conflict`.
    pub(crate) fn from_insert(e: sqlx::Error, conflict: &str) -> Self {
        if let sqlx::Error::Database(ref db_err) = e
            && db_err.is_unique_violation()
        {
            return Self::Conflict(conflict.to_owned());
        }
        Self::Database(e)
    }
}

/// Create a MySQL connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(config: &DatabaseConfig) -> Result<MySqlPool, sqlx::Error> {
    let options = MySqlConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.username)
        .password(config.password.expose_secret())
        .database(&config.database);

    MySqlPoolOptions::new()
        .max_connections(5)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

/// Apply any pending migrations.
///
/// # Errors
///
/// Returns `MigrateError` if a migration fails or the applied history does
/// not match the embedded migrations.
pub async fn run_migrations(pool: &MySqlPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await
}

/// Destination for validated records.
///
/// Only validated records can be passed in; a store never sees a record
/// that failed a field rule.
pub trait RecordStore {
    /// Insert a user, returning its new ID.
    ///
    /// Implementations return `RepositoryError::Conflict` when the email is
    /// already taken.
    fn insert_user(
        &self,
        user: &ValidUser<'_>,
    ) -> impl Future<Output = Result<UserId, RepositoryError>> + Send;

    /// Insert a contact request, returning its new ID.
    fn insert_contact_request(
        &self,
        request: &ValidContactRequest<'_>,
    ) -> impl Future<Output = Result<ContactRequestId, RepositoryError>> + Send;
}

/// [`RecordStore`] backed by a MySQL pool.
#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    /// Create a store over an existing pool.
    #[must_use]
    pub const fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// The underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Emails of every stored user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn user_emails(&self) -> Result<BTreeSet<String>, RepositoryError> {
        UserRepository::new(&self.pool).emails().await
    }

    /// Delete all contact requests and users.
    ///
    /// Returns `(users, contact_requests)` deleted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if either delete fails; nothing is
    /// deleted in that case.
    pub async fn clear(&self) -> Result<(u64, u64), RepositoryError> {
        let mut tx = self.pool.begin().await?;
        let contact_requests = ContactRequestRepository::delete_all(&mut *tx).await?;
        let users = UserRepository::delete_all(&mut *tx).await?;
        tx.commit().await?;
        Ok((users, contact_requests))
    }
}

impl RecordStore for MySqlStore {
    async fn insert_user(&self, user: &ValidUser<'_>) -> Result<UserId, RepositoryError> {
        UserRepository::new(&self.pool).create(user).await
    }

    async fn insert_contact_request(
        &self,
        request: &ValidContactRequest<'_>,
    ) -> Result<ContactRequestId, RepositoryError> {
        ContactRequestRepository::new(&self.pool)
            .create(request)
            .await
    }
}
