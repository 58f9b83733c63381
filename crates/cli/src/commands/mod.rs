//! CLI subcommands.

pub mod check;
pub mod migrate;
pub mod seed;

use std::path::PathBuf;

use thiserror::Error;

use synthseed::gemini::GeminiError;
use synthseed::{ConfigError, RepositoryError, SeedError};

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Missing or invalid environment configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// A migration failed to apply.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Repository error outside the seeding loop.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// The Gemini client could not be built.
    #[error("Gemini client error: {0}")]
    Gemini(#[from] GeminiError),

    /// The seeding run aborted.
    #[error("Seeding failed: {0}")]
    Seed(#[from] SeedError),

    /// A records file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A records file is not a JSON or YAML array of records.
    #[error("Failed to parse records file: {0}")]
    Parse(#[from] serde_yaml::Error),
}
