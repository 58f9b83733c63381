//! AI record generation.
//!
//! The orchestrator only depends on [`RecordGenerator`]; [`GeminiGenerator`]
//! is the production implementation. A generator may return fewer or more
//! records than requested; callers must cope with either.

mod error;
pub mod parse;
pub mod prompt;

use std::collections::BTreeSet;
use std::future::Future;

use serde::{Deserialize, Serialize};
use secrecy::SecretString;
use tracing::{info, instrument};

use synthseed_core::{NewContactRequest, NewUser, UserId};

use crate::gemini::GeminiClient;
use parse::{lenient_string, lenient_user_id};

pub use error::GenerationError;
pub use parse::{parse_batch, strip_code_fence};

/// A user as returned by the model.
///
/// Missing fields deserialize as empty strings and scalar fields are read
/// leniently, so one incomplete object is rejected by validation instead of
/// failing the whole batch.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneratedUser {
    #[serde(deserialize_with = "lenient_string")]
    pub first_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub last_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub password: String,
    #[serde(deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(deserialize_with = "lenient_string")]
    pub address: String,
    #[serde(deserialize_with = "lenient_string")]
    pub city: String,
    #[serde(deserialize_with = "lenient_string")]
    pub state: String,
    #[serde(deserialize_with = "lenient_string")]
    pub country: String,
    #[serde(deserialize_with = "lenient_string")]
    pub postcode: String,
    #[serde(deserialize_with = "lenient_string")]
    pub phone: String,
    #[serde(deserialize_with = "lenient_string")]
    pub dob: String,
}

impl std::fmt::Debug for GeneratedUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratedUser")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("password", &"[REDACTED]")
            .field("email", &self.email)
            .field("address", &self.address)
            .field("city", &self.city)
            .field("state", &self.state)
            .field("country", &self.country)
            .field("postcode", &self.postcode)
            .field("phone", &self.phone)
            .field("dob", &self.dob)
            .finish()
    }
}

impl From<GeneratedUser> for NewUser {
    fn from(user: GeneratedUser) -> Self {
        Self {
            first_name: user.first_name,
            last_name: user.last_name,
            address: user.address,
            city: user.city,
            state: user.state,
            country: user.country,
            postcode: user.postcode,
            phone: user.phone,
            dob: user.dob,
            email: user.email,
            password: SecretString::from(user.password),
        }
    }
}

/// A contact request as returned by the model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneratedContactRequest {
    #[serde(deserialize_with = "lenient_user_id")]
    pub user_id: Option<UserId>,
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(deserialize_with = "lenient_string")]
    pub subject: String,
    #[serde(deserialize_with = "lenient_string")]
    pub message: String,
}

impl From<GeneratedContactRequest> for NewContactRequest {
    fn from(request: GeneratedContactRequest) -> Self {
        Self {
            user_id: request.user_id,
            name: request.name,
            email: request.email,
            subject: request.subject,
            message: request.message,
        }
    }
}

/// One batch of generated users plus the emails used so far.
#[derive(Debug, Clone, Default)]
pub struct UserBatch {
    pub users: Vec<GeneratedUser>,
    /// Input set plus every non-empty email in `users`.
    pub used_emails: BTreeSet<String>,
}

impl UserBatch {
    /// Pair `users` with `previous` extended by their emails.
    #[must_use]
    pub fn new(users: Vec<GeneratedUser>, previous: &BTreeSet<String>) -> Self {
        let mut used_emails = previous.clone();
        used_emails.extend(
            users
                .iter()
                .filter(|u| !u.email.is_empty())
                .map(|u| u.email.clone()),
        );
        Self { users, used_emails }
    }
}

/// Source of candidate records.
pub trait RecordGenerator {
    /// Ask for `count` users whose emails are not in `used_emails`.
    fn generate_users(
        &self,
        count: usize,
        used_emails: &BTreeSet<String>,
    ) -> impl Future<Output = Result<UserBatch, GenerationError>> + Send;

    /// Ask for `count` contact requests.
    fn generate_contact_requests(
        &self,
        count: usize,
    ) -> impl Future<Output = Result<Vec<GeneratedContactRequest>, GenerationError>> + Send;
}

/// [`RecordGenerator`] backed by the Gemini API.
#[derive(Clone)]
pub struct GeminiGenerator {
    client: GeminiClient,
}

impl GeminiGenerator {
    /// Wrap a configured client.
    #[must_use]
    pub const fn new(client: GeminiClient) -> Self {
        Self { client }
    }
}

impl RecordGenerator for GeminiGenerator {
    #[instrument(skip(self, used_emails), fields(avoiding = used_emails.len()))]
    async fn generate_users(
        &self,
        count: usize,
        used_emails: &BTreeSet<String>,
    ) -> Result<UserBatch, GenerationError> {
        let raw = self
            .client
            .generate_text(&prompt::user_prompt(count, used_emails))
            .await?;
        let users: Vec<GeneratedUser> = parse_batch(&raw)?;
        info!(requested = count, returned = users.len(), "Generated users");
        Ok(UserBatch::new(users, used_emails))
    }

    #[instrument(skip(self))]
    async fn generate_contact_requests(
        &self,
        count: usize,
    ) -> Result<Vec<GeneratedContactRequest>, GenerationError> {
        let raw = self
            .client
            .generate_text(&prompt::contact_request_prompt(count))
            .await?;
        let requests: Vec<GeneratedContactRequest> = parse_batch(&raw)?;
        info!(
            requested = count,
            returned = requests.len(),
            "Generated contact requests"
        );
        Ok(requests)
    }
}
