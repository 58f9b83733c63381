//! Contact request repository.

use sqlx::{MySql, MySqlPool};

use synthseed_core::{ContactRequestId, ContactStatus, ValidContactRequest};

use super::RepositoryError;

/// Repository for contact request database operations.
pub struct ContactRequestRepository<'a> {
    pool: &'a MySqlPool,
}

impl<'a> ContactRequestRepository<'a> {
    /// Create a new contact request repository.
    #[must_use]
    pub const fn new(pool: &'a MySqlPool) -> Self {
        Self { pool }
    }

    /// Insert a validated contact request with the default `NEW` status.
    ///
    /// `user_id` is stored as given, even if no such user exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        request: &ValidContactRequest<'_>,
    ) -> Result<ContactRequestId, RepositoryError> {
        let result = sqlx::query(
            r"
            INSERT INTO contact_requests (user_id, name, email, subject, message, status)
            VALUES (?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(request.user_id)
        .bind(&request.name)
        .bind(request.email_address().as_str())
        .bind(&request.subject)
        .bind(&request.message)
        .bind(ContactStatus::default().as_str())
        .execute(self.pool)
        .await
        .map_err(|e| RepositoryError::from_insert(e, "duplicate contact request"))?;

        Ok(ContactRequestId::new(result.last_insert_id()))
    }

    /// Delete every contact request, returning the number of rows removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete_all<'e, E>(executor: E) -> Result<u64, RepositoryError>
    where
        E: sqlx::Executor<'e, Database = MySql>,
    {
        let result = sqlx::query("DELETE FROM contact_requests")
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
