use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::CardId;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CardError {
    #[error("card prompt is empty")]
    EmptyPrompt,
    #[error("card answer is empty")]
    EmptyAnswer,
}

//
// ─── STUDY CARD ───────────────────────────────────────────────────────────────
//

/// Front/back study item as exchanged with the backend and the local cache.
///
/// Freshly generated cards use `question`/`answer`; cards saved to the library
/// come back as `frontText`/`backText`, sometimes alongside the generated
/// names. Any mix deserializes and the card always
/// serializes in the generated shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CardWire")]
pub struct StudyCard {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<CardId>,
    #[serde(rename = "question")]
    pub prompt: String,
    pub answer: String,
    pub favorited: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Every card shape the backends send. A missing side becomes an empty string,
/// which [`CardDraft::from_card`] refuses to save.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CardWire {
    #[serde(rename = "_id")]
    mongo_id: Option<CardId>,
    id: Option<CardId>,
    question: Option<String>,
    answer: Option<String>,
    front_text: Option<String>,
    back_text: Option<String>,
    favorited: Option<bool>,
    tags: Option<Vec<String>>,
}

fn first_non_empty(preferred: Option<String>, fallback: Option<String>) -> String {
    preferred
        .filter(|text| !text.is_empty())
        .or(fallback)
        .unwrap_or_default()
}

impl From<CardWire> for StudyCard {
    fn from(wire: CardWire) -> Self {
        Self {
            id: wire.mongo_id.or(wire.id),
            prompt: first_non_empty(wire.question, wire.front_text),
            answer: first_non_empty(wire.answer, wire.back_text),
            favorited: wire.favorited.unwrap_or(false),
            tags: wire.tags.unwrap_or_default(),
        }
    }
}

impl StudyCard {
    #[must_use]
    pub fn new(prompt: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            id: None,
            prompt: prompt.into(),
            answer: answer.into(),
            favorited: false,
            tags: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: CardId) -> Self {
        self.id = Some(id);
        self
    }

    /// True once the backend has assigned an id.
    #[must_use]
    pub fn is_saved(&self) -> bool {
        self.id.is_some()
    }
}

//
// ─── SAVE PAYLOAD ─────────────────────────────────────────────────────────────
//

/// Payload for saving a card into the user's library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDraft {
    pub front_text: String,
    pub back_text: String,
    pub tags: Vec<String>,
}

impl CardDraft {
    /// Build a save payload from a card, trimming both sides.
    ///
    /// # Errors
    ///
    /// Returns `CardError::EmptyPrompt` or `CardError::EmptyAnswer` for blank text.
    pub fn from_card(card: &StudyCard) -> Result<Self, CardError> {
        let front_text = card.prompt.trim();
        if front_text.is_empty() {
            return Err(CardError::EmptyPrompt);
        }
        let back_text = card.answer.trim();
        if back_text.is_empty() {
            return Err(CardError::EmptyAnswer);
        }
        Ok(Self {
            front_text: front_text.to_owned(),
            back_text: back_text.to_owned(),
            tags: card.tags.clone(),
        })
    }
}
