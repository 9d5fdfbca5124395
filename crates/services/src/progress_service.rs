use std::sync::Arc;

use quiz_core::model::ProgressReport;
use storage::LocalCache;

use crate::api::ProgressApi;
use crate::auth_service::require_token;
use crate::error::ProgressError;

#[derive(Clone)]
pub struct ProgressService {
    api: Arc<dyn ProgressApi>,
    cache: LocalCache,
}

impl ProgressService {
    #[must_use]
    pub fn new(api: Arc<dyn ProgressApi>, cache: LocalCache) -> Self {
        Self { api, cache }
    }

    /// Load the signed-in user's progress; `None` when there is none yet.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Auth` without a login, and API errors.
    pub async fn load(&self) -> Result<Option<ProgressReport>, ProgressError> {
        let token = require_token(&self.cache).await?;
        Ok(self.api.progress(&token).await?)
    }
}
