//! Synthseed seeding library.
//!
//! Asks Gemini for batches of synthetic users and contact requests, validates
//! each record with [`synthseed_core`], and writes the ones that pass to MySQL.
//!
//! # Flow
//!
//! [`Seeder`] requests a batch from a [`RecordGenerator`], hands it to
//! [`persist`], which validates and inserts each record through a
//! [`RecordStore`], then decrements the remaining count by the number of
//! records the batch returned. Invalid records are logged and skipped.
//!
//! # Modules
//!
//! - [`config`] - Environment configuration
//! - [`gemini`] - Gemini `generateContent` client
//! - [`generation`] - Prompts, response parsing, and the generator trait
//! - [`db`] - MySQL pool, migrations, and repositories
//! - [`persist`] - Per-record skip-on-invalid saving
//! - [`seeder`] - The seeding loop

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod gemini;
pub mod generation;
pub mod password;
pub mod persist;
pub mod seeder;

pub use config::{ConfigError, DatabaseConfig, GeminiConfig, SeederConfig};
pub use db::{MySqlStore, RecordStore, RepositoryError};
pub use error::SeedError;
pub use generation::{
    GeminiGenerator, GeneratedContactRequest, GeneratedUser, GenerationError, RecordGenerator,
    UserBatch,
};
pub use persist::SaveSummary;
pub use seeder::{SeedPlan, SeedReport, Seeder};
