//! Synthseed Core - Record types and field validation.
//!
//! This crate provides the types shared by the seeder library and the CLI:
//! - `synthseed` - AI generation, persistence, and the seeding loop
//! - `synthseed-cli` - Command-line front end
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP clients. Validation here decides whether a record may be
//! written; the seeder library decides what to do with rejected records.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, email addresses, roles and statuses
//! - [`validation`] - Field-level rules (names, email, phone, address, ...)
//! - [`records`] - `NewUser` and `NewContactRequest` entities

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod records;
pub mod types;
pub mod validation;

pub use records::*;
pub use types::*;
pub use validation::{Field, FieldError, ValidationErrors, Violation};
