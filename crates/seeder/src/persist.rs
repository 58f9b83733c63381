//! Per-record persistence with skip-on-invalid.
//!
//! Each candidate is validated and saved on its own. A record that fails a
//! field rule, or whose email is already taken, is logged and skipped; any
//! other store error aborts the batch.

use std::ops::AddAssign;

use tracing::{info, instrument, warn};

use synthseed_core::{NewContactRequest, NewUser, ValidationErrors};

use crate::db::{RecordStore, RepositoryError};
use crate::generation::{GeneratedContactRequest, GeneratedUser};

/// Outcome of saving one or more batches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaveSummary {
    /// Candidates seen.
    pub attempted: usize,
    /// Rows written.
    pub saved: usize,
    /// Candidates that failed validation.
    pub rejected: usize,
    /// Candidates skipped on a unique-key conflict.
    pub conflicts: usize,
}

impl AddAssign for SaveSummary {
    fn add_assign(&mut self, rhs: Self) {
        self.attempted += rhs.attempted;
        self.saved += rhs.saved;
        self.rejected += rhs.rejected;
        self.conflicts += rhs.conflicts;
    }
}

/// Validate and save each generated user.
///
/// # Errors
///
/// Returns the first `RepositoryError` that is not a unique-key conflict.
/// Records saved before the error stay saved.
#[instrument(skip_all, fields(batch = users.len()))]
pub async fn save_users<S: RecordStore>(
    store: &S,
    users: Vec<GeneratedUser>,
) -> Result<SaveSummary, RepositoryError> {
    let mut summary = SaveSummary::default();

    for generated in users {
        summary.attempted += 1;
        let user = NewUser::from(generated);

        let valid = match user.validate() {
            Ok(valid) => valid,
            Err(errors) => {
                log_rejection("user", &user.email, &errors);
                summary.rejected += 1;
                continue;
            }
        };

        match store.insert_user(&valid).await {
            Ok(id) => {
                summary.saved += 1;
                tracing::debug!(%id, email = %valid.email_address(), "User saved");
            }
            Err(RepositoryError::Conflict(reason)) => {
                warn!(email = %user.email, %reason, "Skipping user");
                summary.conflicts += 1;
            }
            Err(e) => return Err(e),
        }
    }

    info!(
        saved = summary.saved,
        attempted = summary.attempted,
        "Saved {} users",
        summary.saved
    );
    Ok(summary)
}

/// Validate and save each generated contact request.
///
/// # Errors
///
/// Returns the first `RepositoryError` that is not a unique-key conflict.
#[instrument(skip_all, fields(batch = requests.len()))]
pub async fn save_contact_requests<S: RecordStore>(
    store: &S,
    requests: Vec<GeneratedContactRequest>,
) -> Result<SaveSummary, RepositoryError> {
    let mut summary = SaveSummary::default();

    for generated in requests {
        summary.attempted += 1;
        let request = NewContactRequest::from(generated);

        let valid = match request.validate() {
            Ok(valid) => valid,
            Err(errors) => {
                log_rejection("contact request", &request.email, &errors);
                summary.rejected += 1;
                continue;
            }
        };

        match store.insert_contact_request(&valid).await {
            Ok(id) => {
                summary.saved += 1;
                tracing::debug!(%id, email = %valid.email_address(), "Contact request saved");
            }
            Err(RepositoryError::Conflict(reason)) => {
                warn!(email = %request.email, %reason, "Skipping contact request");
                summary.conflicts += 1;
            }
            Err(e) => return Err(e),
        }
    }

    info!(
        saved = summary.saved,
        attempted = summary.attempted,
        "Saved {} contact requests",
        summary.saved
    );
    Ok(summary)
}

fn log_rejection(kind: &str, email: &str, errors: &ValidationErrors) {
    for error in errors {
        warn!(
            kind,
            email,
            field = error.field.label(),
            reason = %error.violation,
            "Validation failed, skipping record"
        );
    }
}
