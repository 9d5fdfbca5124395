use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use quiz_core::model::{CardDraft, CardId, StudyCard};

use super::{FlashcardApi, GenerateCardsRequest, HttpApi, SaveManyResponse, check};
use crate::error::ApiError;

#[derive(Serialize)]
struct SaveManyRequest<'a> {
    cards: &'a [CardDraft],
}

#[derive(Deserialize)]
struct FavoriteResponse {
    favorited: bool,
}

#[async_trait]
impl FlashcardApi for HttpApi {
    #[instrument(skip_all)]
    async fn list_cards(&self, token: &str) -> Result<Vec<StudyCard>, ApiError> {
        let request = self.client.get(self.api_url("/api/flashcards"));
        let response = self.authorized(request, token).send().await?;
        let cards: Vec<StudyCard> = check(response).await?.json().await?;
        debug!(count = cards.len(), "fetched saved cards");
        Ok(cards)
    }

    #[instrument(skip_all, fields(language = %request.language))]
    async fn generate_cards(
        &self,
        token: &str,
        request: &GenerateCardsRequest,
    ) -> Result<Vec<StudyCard>, ApiError> {
        let builder = self
            .client
            .post(self.api_url("/api/flashcards/generate"))
            .json(request);
        let response = self.authorized(builder, token).send().await?;
        Ok(check(response).await?.json().await?)
    }

    #[instrument(skip_all, fields(count = drafts.len()))]
    async fn save_many(
        &self,
        token: &str,
        drafts: &[CardDraft],
    ) -> Result<SaveManyResponse, ApiError> {
        let builder = self
            .client
            .post(self.api_url("/api/flashcards/saveMany"))
            .json(&SaveManyRequest { cards: drafts });
        let response = self.authorized(builder, token).send().await?;
        Ok(check(response).await?.json().await?)
    }

    #[instrument(skip_all, fields(card = %id))]
    async fn toggle_favorite(&self, token: &str, id: &CardId) -> Result<bool, ApiError> {
        let url = self.api_url(&format!("/api/flashcards/{id}/favorite"));
        let response = self.authorized(self.client.patch(url), token).send().await?;
        let body: FavoriteResponse = check(response).await?.json().await?;
        Ok(body.favorited)
    }
}
