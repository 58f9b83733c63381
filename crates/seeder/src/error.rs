//! Seeding run errors.

use thiserror::Error;

use crate::db::RepositoryError;
use crate::generation::GenerationError;

/// Errors that abort a seeding run.
#[derive(Debug, Error)]
pub enum SeedError {
    /// The generator failed or returned unparseable output.
    #[error("generation failed: {0}")]
    Generation(#[from] GenerationError),

    /// A store error other than a skipped conflict.
    #[error("persistence failed: {0}")]
    Repository(#[from] RepositoryError),

    /// The generator kept returning empty batches.
    #[error("generator returned {batches} empty {kind} batches in a row with {remaining} still to generate")]
    Stalled {
        kind: &'static str,
        batches: u32,
        remaining: usize,
    },
}
