use std::sync::Arc;

use quiz_core::model::{StudyCard, UserProfile};
use tracing::warn;

use crate::repository::{KeyValueStore, StorageError};

pub const GENERATED_CARDS_KEY: &str = "generated_cards";
pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

/// Typed view over the key/value store: the generated card set and the login.
#[derive(Clone)]
pub struct LocalCache {
    store: Arc<dyn KeyValueStore>,
}

impl LocalCache {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Cards from the latest generation run.
    ///
    /// A missing or unreadable entry yields an empty list rather than an error,
    /// so a corrupt cache never blocks falling back to the library.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` only if the store itself fails.
    pub async fn generated_cards(&self) -> Result<Vec<StudyCard>, StorageError> {
        let Some(raw) = self.store.get(GENERATED_CARDS_KEY).await? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&raw) {
            Ok(cards) => Ok(cards),
            Err(err) => {
                warn!(%err, "ignoring unreadable generated card cache");
                Ok(Vec::new())
            }
        }
    }

    /// Replace the cached generated cards.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if serialization or the write fails.
    pub async fn store_generated_cards(&self, cards: &[StudyCard]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(cards)
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        self.store.set(GENERATED_CARDS_KEY, &raw).await
    }

    /// Bearer token of the signed-in user. Blank tokens count as absent.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store fails.
    pub async fn token(&self) -> Result<Option<String>, StorageError> {
        Ok(self
            .store
            .get(TOKEN_KEY)
            .await?
            .filter(|token| !token.trim().is_empty()))
    }

    /// Persist a successful login.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if serialization or a write fails.
    pub async fn store_login(&self, token: &str, user: &UserProfile) -> Result<(), StorageError> {
        let raw = serde_json::to_string(user)
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        self.store.set(TOKEN_KEY, token).await?;
        self.store.set(USER_KEY, &raw).await
    }

    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the stored profile is corrupt.
    pub async fn user(&self) -> Result<Option<UserProfile>, StorageError> {
        let Some(raw) = self.store.get(USER_KEY).await? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|err| StorageError::Serialization(err.to_string()))
    }

    /// Forget the token and profile. Cached cards are kept.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store fails.
    pub async fn clear_login(&self) -> Result<(), StorageError> {
        self.store.remove(TOKEN_KEY).await?;
        self.store.remove(USER_KEY).await
    }
}
