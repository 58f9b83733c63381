//! Password hashing for stored users.

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};

use crate::db::RepositoryError;

/// Hash a password using Argon2id with a fresh random salt.
///
/// # Errors
///
/// Returns `RepositoryError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, RepositoryError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| RepositoryError::PasswordHash)
}
