//! Integration test support for Synthseed.
//!
//! # Running Tests
//!
//! ```bash
//! # In-memory scenarios and the fake Gemini server
//! cargo test -p synthseed-integration-tests
//!
//! # Include MySQL round trips (needs DB_USER, DB_PASSWORD, DB_NAME)
//! cargo test -p synthseed-integration-tests -- --ignored
//! ```
//!
//! # Fixtures
//!
//! - [`InMemoryStore`] - `RecordStore` with a unique email index
//! - [`ScriptedGenerator`] - `RecordGenerator` replaying raw model replies
//! - [`FakeGemini`] - Local HTTP server answering `generateContent`

use std::collections::{BTreeSet, VecDeque};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError};

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use synthseed::generation::parse_batch;
use synthseed::{
    GeneratedContactRequest, GeneratedUser, GenerationError, RecordGenerator, RecordStore,
    RepositoryError, UserBatch,
};
use synthseed_core::{
    ContactRequestId, ContactStatus, UserId, UserRole, ValidContactRequest, ValidUser,
};

// =============================================================================
// Store
// =============================================================================

/// A stored user row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUser {
    pub id: UserId,
    pub first_name: String,
    pub email: String,
    pub role: UserRole,
}

/// A stored contact request row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredContactRequest {
    pub id: ContactRequestId,
    pub user_id: Option<UserId>,
    pub email: String,
    pub message: String,
    pub status: ContactStatus,
}

/// In-memory [`RecordStore`] enforcing unique user emails.
///
/// Rows get the same default role and status the MySQL store writes.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    users: Mutex<Vec<StoredUser>>,
    contact_requests: Mutex<Vec<StoredContactRequest>>,
}

impl InMemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of stored users in insertion order.
    #[must_use]
    pub fn users(&self) -> Vec<StoredUser> {
        self.users
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Snapshot of stored contact requests in insertion order.
    #[must_use]
    pub fn contact_requests(&self) -> Vec<StoredContactRequest> {
        self.contact_requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl RecordStore for InMemoryStore {
    async fn insert_user(&self, user: &ValidUser<'_>) -> Result<UserId, RepositoryError> {
        let mut users = self.users.lock().unwrap_or_else(PoisonError::into_inner);
        let email = user.email_address().to_string();
        if users.iter().any(|u| u.email == email) {
            return Err(RepositoryError::Conflict("email already exists".to_owned()));
        }
        let id = UserId::new(users.len() as u64 + 1);
        users.push(StoredUser {
            id,
            first_name: user.first_name.clone(),
            email,
            role: UserRole::default(),
        });
        Ok(id)
    }

    async fn insert_contact_request(
        &self,
        request: &ValidContactRequest<'_>,
    ) -> Result<ContactRequestId, RepositoryError> {
        let mut requests = self
            .contact_requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let id = ContactRequestId::new(requests.len() as u64 + 1);
        requests.push(StoredContactRequest {
            id,
            user_id: request.user_id,
            email: request.email_address().to_string(),
            message: request.message.clone(),
            status: ContactStatus::default(),
        });
        Ok(id)
    }
}

// =============================================================================
// Generator
// =============================================================================

/// [`RecordGenerator`] that replays raw model replies in order.
///
/// Each call pops one reply and parses it exactly as the Gemini generator
/// does, so fencing and malformed JSON behave the same. An exhausted script
/// yields an empty batch.
#[derive(Debug, Default)]
pub struct ScriptedGenerator {
    user_replies: Mutex<VecDeque<String>>,
    contact_request_replies: Mutex<VecDeque<String>>,
    requested: Mutex<Vec<usize>>,
    avoided: Mutex<Vec<BTreeSet<String>>>,
}

impl ScriptedGenerator {
    /// Create an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw reply for the next user batch.
    #[must_use]
    pub fn user_reply(self, raw: impl Into<String>) -> Self {
        lock(&self.user_replies).push_back(raw.into());
        self
    }

    /// Queue a raw reply for the next contact request batch.
    #[must_use]
    pub fn contact_request_reply(self, raw: impl Into<String>) -> Self {
        lock(&self.contact_request_replies).push_back(raw.into());
        self
    }

    /// Counts passed to each generator call, in order.
    #[must_use]
    pub fn requested(&self) -> Vec<usize> {
        lock(&self.requested).clone()
    }

    /// Email sets passed to each user call, in order.
    #[must_use]
    pub fn avoided(&self) -> Vec<BTreeSet<String>> {
        lock(&self.avoided).clone()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl RecordGenerator for ScriptedGenerator {
    async fn generate_users(
        &self,
        count: usize,
        used_emails: &BTreeSet<String>,
    ) -> Result<UserBatch, GenerationError> {
        lock(&self.requested).push(count);
        lock(&self.avoided).push(used_emails.clone());
        let reply = lock(&self.user_replies).pop_front();
        let users: Vec<GeneratedUser> = match reply {
            Some(raw) => parse_batch(&raw)?,
            None => Vec::new(),
        };
        Ok(UserBatch::new(users, used_emails))
    }

    async fn generate_contact_requests(
        &self,
        count: usize,
    ) -> Result<Vec<GeneratedContactRequest>, GenerationError> {
        lock(&self.requested).push(count);
        let reply = lock(&self.contact_request_replies).pop_front();
        match reply {
            Some(raw) => parse_batch(&raw),
            None => Ok(Vec::new()),
        }
    }
}

// =============================================================================
// Record builders
// =============================================================================

/// A user that passes every field rule.
#[must_use]
pub fn valid_user(n: usize) -> GeneratedUser {
    GeneratedUser {
        first_name: "John".to_string(),
        last_name: "Doe".to_string(),
        password: "SecurePassword123!".to_string(),
        email: format!("user{n}@example.com"),
        address: format!("{n} Main St, Apt 4B"),
        city: "Springfield".to_string(),
        state: "IL".to_string(),
        country: "USA".to_string(),
        postcode: "62701".to_string(),
        phone: "1234567890".to_string(),
        dob: "1990-01-01".to_string(),
    }
}

/// A contact request that passes every field rule.
#[must_use]
pub fn valid_contact_request(n: usize) -> GeneratedContactRequest {
    GeneratedContactRequest {
        user_id: None,
        name: "Sarah Thompson".to_string(),
        email: format!("contact{n}@example.com"),
        subject: "Inquiry about services".to_string(),
        message: "Hi, I visited your website and would like to know more about the services you offer."
            .to_string(),
    }
}

/// Serialize records as the model would return them.
#[must_use]
pub fn to_reply<T: serde::Serialize>(records: &[T]) -> String {
    serde_json::to_string_pretty(records).unwrap_or_default()
}

// =============================================================================
// Fake Gemini server
// =============================================================================

/// Shared state of the fake `generateContent` endpoint.
#[derive(Clone, Default)]
struct FakeState {
    responses: Arc<Mutex<VecDeque<(StatusCode, Value)>>>,
    requests: Arc<Mutex<Vec<Value>>>,
}

/// Local `axum` server standing in for the Gemini API.
///
/// Answers each request with the next queued `(status, body)` pair and
/// records request bodies. Once the queue is empty every request gets a 500.
pub struct FakeGemini {
    addr: SocketAddr,
    state: FakeState,
    handle: JoinHandle<()>,
}

impl FakeGemini {
    /// Start serving `responses` on a random local port.
    ///
    /// # Errors
    ///
    /// Returns an error if no local port can be bound.
    pub async fn start(responses: Vec<(StatusCode, Value)>) -> std::io::Result<Self> {
        let state = FakeState {
            responses: Arc::new(Mutex::new(responses.into())),
            requests: Arc::default(),
        };
        let app = Router::new()
            .route("/v1beta/models/{*rest}", post(generate_content))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Ok(Self {
            addr,
            state,
            handle,
        })
    }

    /// Base URL to put in `GeminiConfig::base_url`.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Request bodies received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<Value> {
        lock(&self.state.requests).clone()
    }

    /// Wrap generated text in a successful `generateContent` response body.
    #[must_use]
    pub fn text_response(text: &str) -> Value {
        json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": text}]},
                "finishReason": "STOP"
            }]
        })
    }
}

impl Drop for FakeGemini {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// `POST /v1beta/models/{model}:generateContent`
async fn generate_content(
    State(state): State<FakeState>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    lock(&state.requests).push(body);
    let (status, reply) = lock(&state.responses).pop_front().unwrap_or_else(|| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({"error": {"code": 500, "message": "no response queued", "status": "INTERNAL"}}),
        )
    });
    (status, Json(reply))
}
