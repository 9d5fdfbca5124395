//! REST client for the flashcard and quiz backends.
//!
//! Each backend concern is a trait so orchestration services can be driven by
//! fakes; [`HttpApi`] implements all of them over `reqwest`.

mod auth;
mod cards;
mod progress;
mod quiz;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};

use quiz_core::model::{CardDraft, CardId, ProgressReport, Question, StudyCard, UserProfile};

use crate::config::ApiConfig;
use crate::error::ApiError;

//
// ─── WIRE TYPES ───────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginSession {
    pub token: String,
    pub user: UserProfile,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateCardsRequest {
    pub text: String,
    pub language: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SaveManyResponse {
    #[serde(default)]
    pub created: Vec<StudyCard>,
    #[serde(default, rename = "createdCount")]
    pub created_count: Option<usize>,
}

//
// ─── SEAMS ────────────────────────────────────────────────────────────────────
//

#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange credentials for a bearer token.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, rejection, or a response without a token.
    async fn login(&self, credentials: &Credentials) -> Result<LoginSession, ApiError>;

    /// Create an account.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or rejection.
    async fn register(&self, registration: &Registration) -> Result<(), ApiError>;
}

#[async_trait]
pub trait FlashcardApi: Send + Sync {
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or rejection.
    async fn list_cards(&self, token: &str) -> Result<Vec<StudyCard>, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or rejection.
    async fn generate_cards(
        &self,
        token: &str,
        request: &GenerateCardsRequest,
    ) -> Result<Vec<StudyCard>, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or rejection.
    async fn save_many(&self, token: &str, drafts: &[CardDraft])
    -> Result<SaveManyResponse, ApiError>;

    /// Flip the favorite flag and return its new value.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or rejection.
    async fn toggle_favorite(&self, token: &str, id: &CardId) -> Result<bool, ApiError>;
}

#[async_trait]
pub trait QuizGenerator: Send + Sync {
    /// Turn cards into up to `count` multiple-choice questions.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or rejection.
    async fn generate_quiz(
        &self,
        token: &str,
        cards: &[StudyCard],
        count: u32,
    ) -> Result<Vec<Question>, ApiError>;
}

#[async_trait]
pub trait ProgressApi: Send + Sync {
    /// Fetch the user's progress. `None` means the backend has nothing to report.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` or transport failures.
    async fn progress(&self, token: &str) -> Result<Option<ProgressReport>, ApiError>;
}

//
// ─── HTTP CLIENT ──────────────────────────────────────────────────────────────
//

#[derive(Clone)]
pub struct HttpApi {
    client: Client,
    config: ApiConfig,
}

impl HttpApi {
    /// Build a client with the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the TLS backend cannot be initialized.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{path}", self.config.api_base_url.trim_end_matches('/'))
    }

    fn quiz_url(&self, path: &str) -> String {
        format!("{}{path}", self.config.quiz_base_url.trim_end_matches('/'))
    }

    fn authorized(&self, request: RequestBuilder, token: &str) -> RequestBuilder {
        request.bearer_auth(token)
    }
}

/// Pass successful responses through; turn the rest into `ApiError`.
async fn check(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::UNAUTHORIZED {
        return Err(ApiError::Unauthorized);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status {
        status,
        message: error_message(status, &body),
    })
}

// Backend errors look like `{"msg": "..."}`; fall back to the raw body, then the reason phrase.
fn error_message(status: StatusCode, body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        msg: Option<String>,
        message: Option<String>,
    }

    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(msg) = parsed.msg.or(parsed.message) {
            return msg;
        }
    }
    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_owned();
    }
    status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_owned()
}
