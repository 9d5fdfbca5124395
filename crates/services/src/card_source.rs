use std::sync::Arc;

use quiz_core::model::{CardSource, SourcePlan, StudyCard};
use storage::LocalCache;
use tracing::{info, instrument};

use crate::api::FlashcardApi;
use crate::auth_service::require_token;
use crate::error::CardSourceError;

/// Cards chosen for a quiz, with the plan that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedCards {
    pub cards: Vec<StudyCard>,
    pub plan: SourcePlan,
}

/// Supplies source cards for quiz generation from the cache or the saved library.
#[derive(Clone)]
pub struct CardSourceService {
    api: Arc<dyn FlashcardApi>,
    cache: LocalCache,
}

impl CardSourceService {
    #[must_use]
    pub fn new(api: Arc<dyn FlashcardApi>, cache: LocalCache) -> Self {
        Self { api, cache }
    }

    /// Resolve `source` with [`SourcePlan::resolve`] and load the cards.
    ///
    /// # Errors
    ///
    /// Returns `CardSourceError::NoCardsAvailable` when the chosen source is empty,
    /// `CardSourceError::Auth` when a remote fetch is needed without a login,
    /// and API or storage errors otherwise.
    #[instrument(skip(self))]
    pub async fn load(&self, source: CardSource) -> Result<LoadedCards, CardSourceError> {
        let cached = self.cache.generated_cards().await?;
        let plan = SourcePlan::resolve(source, cached.len());

        let cards = match plan {
            SourcePlan::UseCache => cached,
            SourcePlan::FetchRemote { fallback } => {
                if fallback {
                    info!("no generated cards cached, using saved library");
                }
                let token = require_token(&self.cache).await?;
                self.api.list_cards(&token).await?
            }
        };

        if cards.is_empty() {
            return Err(CardSourceError::NoCardsAvailable { requested: source });
        }
        info!(count = cards.len(), ?plan, "cards loaded");
        Ok(LoadedCards { cards, plan })
    }
}
