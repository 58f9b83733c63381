//! Gemini API client for text generation.

use std::sync::Arc;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use tracing::{debug, instrument};

use crate::config::GeminiConfig;

use super::error::{ApiErrorResponse, GeminiError};
use super::types::{GenerateContentRequest, GenerateContentResponse};

const API_KEY_HEADER: &str = "x-goog-api-key";
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Gemini API client.
///
/// Constructed explicitly from a [`GeminiConfig`] and passed to whatever needs
/// it; cloning shares the underlying connection pool.
#[derive(Clone)]
pub struct GeminiClient {
    inner: Arc<GeminiClientInner>,
}

struct GeminiClientInner {
    client: reqwest::Client,
    model: String,
    endpoint: String,
}

impl GeminiClient {
    /// Create a new Gemini client.
    ///
    /// # Errors
    ///
    /// Returns `GeminiError::InvalidApiKey` if the key is not a valid header
    /// value, or `GeminiError::Http` if the HTTP client cannot be built.
    pub fn new(config: &GeminiConfig) -> Result<Self, GeminiError> {
        let mut api_key = HeaderValue::from_str(config.api_key.expose_secret())
            .map_err(|_| GeminiError::InvalidApiKey)?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(API_KEY_HEADER, api_key);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            inner: Arc::new(GeminiClientInner {
                client,
                model: config.model.clone(),
                endpoint: format!(
                    "{}/v1beta/models/{}:generateContent",
                    config.base_url.trim_end_matches('/'),
                    config.model
                ),
            }),
        })
    }

    /// Model ID this client sends requests to.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.inner.model
    }

    /// Send a single prompt and return the generated text.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API returns an error
    /// response, or the response carries no text.
    #[instrument(skip(self, prompt), fields(model = %self.inner.model, prompt_len = prompt.len()))]
    pub async fn generate_text(&self, prompt: &str) -> Result<String, GeminiError> {
        let request = GenerateContentRequest::prompt(prompt);

        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::handle_error_status(status, response).await);
        }

        let body = response.text().await?;
        let parsed: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| GeminiError::Parse(format!("Failed to parse response: {e}")))?;

        let text = parsed
            .text()
            .ok_or_else(|| GeminiError::EmptyResponse(parsed.empty_reason()))?;
        debug!(text_len = text.len(), "Received generated text");
        Ok(text)
    }

    /// Handle an error status code.
    async fn handle_error_status(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> GeminiError {
        // Check for rate limiting
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
            return GeminiError::RateLimited(retry_after);
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return GeminiError::Http(e),
        };
        let api_error = serde_json::from_str::<ApiErrorResponse>(&body).ok();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            let message = api_error.map_or_else(|| "Invalid API key".to_string(), |e| e.error.message);
            return GeminiError::Unauthorized(message);
        }

        match api_error {
            Some(api_error) => GeminiError::Api {
                status: api_error.error.status,
                message: api_error.error.message,
            },
            None => GeminiError::Api {
                status: status.to_string(),
                message: body,
            },
        }
    }
}
