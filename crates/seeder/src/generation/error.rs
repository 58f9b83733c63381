//! Error types for record generation.

use thiserror::Error;

use crate::gemini::GeminiError;

/// Errors that can occur while generating a batch of records.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The Gemini request failed.
    #[error("generation request failed: {0}")]
    Gemini(#[from] GeminiError),

    /// The model's reply was not a JSON array of the expected records.
    #[error("failed to parse generated records as JSON: {0}")]
    Json(#[from] serde_json::Error),
}
