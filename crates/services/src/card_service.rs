use std::sync::Arc;

use quiz_core::model::{CardDraft, StudyCard};
use storage::LocalCache;
use tracing::{info, instrument};

use crate::api::{FlashcardApi, GenerateCardsRequest};
use crate::auth_service::require_token;
use crate::error::{ApiError, CardLibraryError};

pub const DEFAULT_LANGUAGE: &str = "en";

/// Generates cards from text, browses them, and saves them to the library.
#[derive(Clone)]
pub struct CardLibraryService {
    api: Arc<dyn FlashcardApi>,
    cache: LocalCache,
}

impl CardLibraryService {
    #[must_use]
    pub fn new(api: Arc<dyn FlashcardApi>, cache: LocalCache) -> Self {
        Self { api, cache }
    }

    /// Generate cards from study text and cache them as the current generated set.
    ///
    /// # Errors
    ///
    /// Returns `CardLibraryError::EmptyText` for blank input, `Auth` without a login,
    /// and API or storage errors otherwise.
    #[instrument(skip(self, text), fields(chars = text.len()))]
    pub async fn generate(
        &self,
        text: &str,
        language: Option<&str>,
    ) -> Result<Vec<StudyCard>, CardLibraryError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(CardLibraryError::EmptyText);
        }
        let token = require_token(&self.cache).await?;
        let request = GenerateCardsRequest {
            text: text.to_owned(),
            language: language
                .map(str::trim)
                .filter(|lang| !lang.is_empty())
                .unwrap_or(DEFAULT_LANGUAGE)
                .to_owned(),
        };

        let cards = self.api.generate_cards(&token, &request).await?;
        self.cache.store_generated_cards(&cards).await?;
        info!(count = cards.len(), "generated cards cached");
        Ok(cards)
    }

    /// Cards to browse: the cached generated set, else the saved library.
    ///
    /// # Errors
    ///
    /// Returns `Auth` when the library is needed without a login, and API or storage errors.
    pub async fn browse(&self) -> Result<Vec<StudyCard>, CardLibraryError> {
        let cached = self.cache.generated_cards().await?;
        if !cached.is_empty() {
            return Ok(cached);
        }
        let token = require_token(&self.cache).await?;
        Ok(self.api.list_cards(&token).await?)
    }

    /// Save every cached generated card and return how many the backend created.
    ///
    /// # Errors
    ///
    /// Returns `CardLibraryError::NothingToSave` when nothing is cached, `Card` for
    /// a blank card, and auth, API, or storage errors.
    #[instrument(skip(self))]
    pub async fn save_all(&self) -> Result<usize, CardLibraryError> {
        let cards = self.cache.generated_cards().await?;
        if cards.is_empty() {
            return Err(CardLibraryError::NothingToSave);
        }
        let drafts = cards
            .iter()
            .map(CardDraft::from_card)
            .collect::<Result<Vec<_>, _>>()?;
        let token = require_token(&self.cache).await?;

        let response = self.api.save_many(&token, &drafts).await?;
        let count = response
            .created_count
            .or_else(|| (!response.created.is_empty()).then_some(response.created.len()))
            .unwrap_or(drafts.len());
        info!(count, "saved generated cards");
        Ok(count)
    }

    /// Save one cached generated card; the cached entry is replaced by the saved record.
    ///
    /// # Errors
    ///
    /// Returns `CardOutOfRange`, `AlreadySaved`, `Card`, and auth, API, or storage errors.
    #[instrument(skip(self))]
    pub async fn save_one(&self, index: usize) -> Result<StudyCard, CardLibraryError> {
        let mut cards = self.cache.generated_cards().await?;
        let len = cards.len();
        let card = cards
            .get(index)
            .ok_or(CardLibraryError::CardOutOfRange { index, len })?;
        if card.is_saved() {
            return Err(CardLibraryError::AlreadySaved);
        }
        let draft = CardDraft::from_card(card)?;
        let token = require_token(&self.cache).await?;

        let response = self.api.save_many(&token, &[draft]).await?;
        let saved = response
            .created
            .into_iter()
            .next()
            .ok_or(ApiError::MalformedResponse("created"))?;
        cards[index] = saved.clone();
        self.cache.store_generated_cards(&cards).await?;
        info!(id = ?saved.id, "card saved");
        Ok(saved)
    }

    /// Toggle the favorite flag on a saved card, updating `card` and any cached copy.
    ///
    /// # Errors
    ///
    /// Returns `CardLibraryError::NotSaved` for cards without an id, and auth, API,
    /// or storage errors.
    #[instrument(skip_all, fields(id = ?card.id))]
    pub async fn toggle_favorite(&self, card: &mut StudyCard) -> Result<bool, CardLibraryError> {
        let id = card.id.clone().ok_or(CardLibraryError::NotSaved)?;
        let token = require_token(&self.cache).await?;
        let favorited = self.api.toggle_favorite(&token, &id).await?;
        card.favorited = favorited;

        let mut cached = self.cache.generated_cards().await?;
        let mut touched = false;
        for entry in cached.iter_mut().filter(|entry| entry.id.as_ref() == Some(&id)) {
            entry.favorited = favorited;
            touched = true;
        }
        if touched {
            self.cache.store_generated_cards(&cached).await?;
        }
        Ok(favorited)
    }
}
