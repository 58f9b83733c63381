//! Seeder configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `DB_USER` - MySQL user name
//! - `DB_PASSWORD` - MySQL password
//! - `DB_NAME` - MySQL database (schema) name
//! - `GEMINI_API_KEY` - Google Gemini API key (`API_KEY` is accepted as a fallback)
//!
//! ## Optional
//! - `DB_HOST` - MySQL host (default: 127.0.0.1)
//! - `DB_PORT` - MySQL port (default: 3306)
//! - `GEMINI_MODEL` - Gemini model ID (default: gemini-2.5-flash)
//! - `GEMINI_BASE_URL` - API base URL (default: <https://generativelanguage.googleapis.com>)
//! - `SEED_USERS` - Number of users to generate (default: 500)
//! - `SEED_CONTACT_REQUESTS` - Number of contact requests to generate (default: 0)
//! - `SEED_BATCH_SIZE` - Records requested per API call (default: 50)

use std::str::FromStr;

use secrecy::SecretString;
use thiserror::Error;

use crate::seeder::SeedPlan;

pub const DEFAULT_DB_HOST: &str = "127.0.0.1";
pub const DEFAULT_DB_PORT: u16 = 3306;
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Full seeder configuration.
#[derive(Debug, Clone)]
pub struct SeederConfig {
    /// MySQL connection settings
    pub database: DatabaseConfig,
    /// Gemini API settings
    pub gemini: GeminiConfig,
    /// How many records to produce and in what batch size
    pub plan: SeedPlan,
}

/// MySQL connection settings.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: SecretString,
    pub database: String,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("database", &self.database)
            .finish()
    }
}

/// Gemini API configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct GeminiConfig {
    /// Google AI Studio API key
    pub api_key: SecretString,
    /// Model ID (e.g., gemini-2.5-flash)
    pub model: String,
    /// Base URL, without trailing slash
    pub base_url: String,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl SeederConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_vars<F>(vars: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(vars);
        Ok(Self {
            database: DatabaseConfig::from_env(&env)?,
            gemini: GeminiConfig::from_env(&env)?,
            plan: SeedPlan {
                users: env.parsed_or("SEED_USERS", SeedPlan::DEFAULT_USERS)?,
                contact_requests: env
                    .parsed_or("SEED_CONTACT_REQUESTS", SeedPlan::DEFAULT_CONTACT_REQUESTS)?,
                batch_size: env.parsed_or("SEED_BATCH_SIZE", SeedPlan::DEFAULT_BATCH_SIZE)?,
            },
        })
    }
}

impl DatabaseConfig {
    /// Load only the database settings from the environment.
    ///
    /// Used by commands that never talk to Gemini (e.g. `migrate`).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_env(&Env(|key: &str| std::env::var(key).ok()))
    }

    fn from_env<F: Fn(&str) -> Option<String>>(env: &Env<F>) -> Result<Self, ConfigError> {
        Ok(Self {
            host: env.or_default("DB_HOST", DEFAULT_DB_HOST),
            port: env.parsed_or("DB_PORT", DEFAULT_DB_PORT)?,
            username: env.required("DB_USER")?,
            password: SecretString::from(env.required("DB_PASSWORD")?),
            database: env.required("DB_NAME")?,
        })
    }
}

impl GeminiConfig {
    fn from_env<F: Fn(&str) -> Option<String>>(env: &Env<F>) -> Result<Self, ConfigError> {
        let api_key = env
            .optional("GEMINI_API_KEY")
            .or_else(|| env.optional("API_KEY"))
            .ok_or_else(|| ConfigError::MissingEnvVar("GEMINI_API_KEY".to_string()))?;

        Ok(Self {
            api_key: SecretString::from(api_key),
            model: env.or_default("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
            base_url: env
                .or_default("GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Variable lookup; empty values count as unset.
struct Env<F>(F);

impl<F: Fn(&str) -> Option<String>> Env<F> {
    /// Get an optional environment variable.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    /// Get a required environment variable.
    fn required(&self, key: &str) -> Result<String, ConfigError> {
        self.optional(key)
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    /// Get an environment variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    /// Parse an environment variable, falling back to `default` when unset.
    fn parsed_or<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.optional(key).map_or(Ok(default), |raw| {
            raw.trim()
                .parse()
                .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
    }
}
