#![forbid(unsafe_code)]

pub mod api;
pub mod app_services;
pub mod auth_service;
pub mod card_service;
pub mod card_source;
pub mod config;
pub mod error;
pub mod progress_service;
pub mod quiz_service;

pub use quiz_core::Clock;

pub use app_services::AppServices;
pub use auth_service::AuthService;
pub use card_service::CardLibraryService;
pub use card_source::{CardSourceService, LoadedCards};
pub use config::ApiConfig;
pub use error::{
    ApiError, AppServicesError, AuthError, CardLibraryError, CardSourceError, ProgressError,
    QuizServiceError,
};
pub use progress_service::ProgressService;
pub use quiz_service::{AttemptSummary, QuizRun, QuizService};
