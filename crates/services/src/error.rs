//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{CardError, CardSource, QuizError};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by the REST client.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("not authorized, sign in again")]
    Unauthorized,
    #[error("request failed with status {status}: {message}")]
    Status {
        status: reqwest::StatusCode,
        message: String,
    },
    #[error("response is missing `{0}`")]
    MalformedResponse(&'static str),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by `AuthService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    #[error("email and password are required")]
    MissingCredentials,
    #[error("you must be logged in")]
    NotLoggedIn,
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `CardLibraryService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CardLibraryError {
    #[error("enter some text to generate cards from")]
    EmptyText,
    #[error("no generated cards to save")]
    NothingToSave,
    #[error("card is already saved")]
    AlreadySaved,
    #[error("card must be saved before it can be favorited")]
    NotSaved,
    #[error("card {index} is out of range for {len} cards")]
    CardOutOfRange { index: usize, len: usize },
    #[error(transparent)]
    Card(#[from] CardError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `CardSourceService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CardSourceError {
    #[error("no cards found for source `{requested}`, generate or save some cards first")]
    NoCardsAvailable { requested: CardSource },
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while starting a quiz.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizServiceError {
    #[error(transparent)]
    Source(#[from] CardSourceError),
    #[error("quiz generation failed: {0}")]
    Generation(#[source] ApiError),
    #[error("generated quiz is unusable: {0}")]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Errors emitted by `ProgressService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Api(#[from] ApiError),
}
