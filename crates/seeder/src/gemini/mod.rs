//! Google Gemini API integration.
//!
//! Only the non-streaming `generateContent` endpoint is used: the seeder sends
//! one prompt per batch and needs the complete text before it can parse it.

mod client;
mod error;
pub mod types;

pub use client::GeminiClient;
pub use error::GeminiError;
