use std::sync::Arc;

use storage::repository::Storage;

use crate::Clock;
use crate::api::HttpApi;
use crate::auth_service::AuthService;
use crate::card_service::CardLibraryService;
use crate::card_source::CardSourceService;
use crate::config::ApiConfig;
use crate::error::AppServicesError;
use crate::progress_service::ProgressService;
use crate::quiz_service::QuizService;

/// Assembles app-facing services over one HTTP client and one local cache.
#[derive(Clone)]
pub struct AppServices {
    auth: Arc<AuthService>,
    library: Arc<CardLibraryService>,
    quizzes: Arc<QuizService>,
    progress: Arc<ProgressService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage or the HTTP client cannot be initialized.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        config: ApiConfig,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Self::new(&storage, clock, config)
    }

    /// Build services over an existing storage bundle.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Api` if the HTTP client cannot be built.
    pub fn new(
        storage: &Storage,
        clock: Clock,
        config: ApiConfig,
    ) -> Result<Self, AppServicesError> {
        let default_count = config.default_question_count;
        let api = Arc::new(HttpApi::new(config)?);
        let cache = storage.cache.clone();

        let auth = Arc::new(AuthService::new(api.clone(), cache.clone()));
        let library = Arc::new(CardLibraryService::new(api.clone(), cache.clone()));
        let source = CardSourceService::new(api.clone(), cache.clone());
        let quizzes = Arc::new(QuizService::new(
            clock,
            source,
            api.clone(),
            cache.clone(),
            default_count,
        ));
        let progress = Arc::new(ProgressService::new(api, cache));

        Ok(Self {
            auth,
            library,
            quizzes,
            progress,
        })
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    #[must_use]
    pub fn library(&self) -> Arc<CardLibraryService> {
        Arc::clone(&self.library)
    }

    #[must_use]
    pub fn quizzes(&self) -> Arc<QuizService> {
        Arc::clone(&self.quizzes)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }
}
