//! Offline validation of generated records.
//!
//! Reads a JSON or YAML array in the shape the model returns and runs the
//! same field rules the seeder applies before inserting. Nothing is written.

use std::path::Path;

use clap::ValueEnum;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use synthseed::{GeneratedContactRequest, GeneratedUser};
use synthseed_core::{NewContactRequest, NewUser, ValidationErrors};

use super::CommandError;

/// Record type held by a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RecordKind {
    Users,
    ContactRequests,
}

/// A record that failed validation.
#[derive(Debug)]
pub struct Rejection {
    /// Zero-based position in the file.
    pub index: usize,
    pub email: String,
    pub errors: ValidationErrors,
}

/// Validation results for one file.
#[derive(Debug, Default)]
pub struct CheckReport {
    pub total: usize,
    pub rejections: Vec<Rejection>,
}

impl CheckReport {
    /// Records that would be inserted.
    #[must_use]
    pub fn valid(&self) -> usize {
        self.total - self.rejections.len()
    }
}

/// Validate every record in `file`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not an array of records.
pub async fn run(kind: RecordKind, file: &Path) -> Result<(), CommandError> {
    let content = tokio::fs::read_to_string(file)
        .await
        .map_err(|source| CommandError::Read {
            path: file.to_path_buf(),
            source,
        })?;

    info!(path = %file.display(), ?kind, "Checking records");
    let report = check_records(kind, &content)?;

    for rejection in &report.rejections {
        warn!(
            index = rejection.index,
            email = %rejection.email,
            "Rejected: {}",
            rejection.errors
        );
    }
    info!(
        total = report.total,
        valid = report.valid(),
        rejected = report.rejections.len(),
        "Check complete"
    );
    Ok(())
}

/// Validate records parsed from `content`.
///
/// # Errors
///
/// Returns `CommandError::Parse` if `content` is not a JSON or YAML array of
/// the given record kind.
pub fn check_records(kind: RecordKind, content: &str) -> Result<CheckReport, CommandError> {
    match kind {
        RecordKind::Users => check_all(content, |user: GeneratedUser| {
            let user = NewUser::from(user);
            let errors = user.validate().err();
            (user.email, errors)
        }),
        RecordKind::ContactRequests => check_all(content, |request: GeneratedContactRequest| {
            let request = NewContactRequest::from(request);
            let errors = request.validate().err();
            (request.email, errors)
        }),
    }
}

fn check_all<T, F>(content: &str, validate: F) -> Result<CheckReport, CommandError>
where
    T: DeserializeOwned,
    F: Fn(T) -> (String, Option<ValidationErrors>),
{
    let records: Vec<T> = serde_yaml::from_str(content)?;
    let total = records.len();

    let rejections = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match validate(record) {
            (email, Some(errors)) => Some(Rejection {
                index,
                email,
                errors,
            }),
            (_, None) => None,
        })
        .collect();

    Ok(CheckReport { total, rejections })
}
