use std::sync::Arc;

use quiz_core::model::UserProfile;
use storage::LocalCache;
use tracing::{info, instrument};

use crate::api::{AuthApi, Credentials, Registration};
use crate::error::AuthError;

/// Sign-in state: exchanges credentials for a token and keeps it in the local cache.
#[derive(Clone)]
pub struct AuthService {
    api: Arc<dyn AuthApi>,
    cache: LocalCache,
}

impl AuthService {
    #[must_use]
    pub fn new(api: Arc<dyn AuthApi>, cache: LocalCache) -> Self {
        Self { api, cache }
    }

    /// Sign in and remember the token and profile.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingCredentials` for blank input, otherwise API or storage errors.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<UserProfile, AuthError> {
        let credentials = Credentials {
            email: required(email)?,
            password: required(password)?,
        };
        let session = self.api.login(&credentials).await?;
        self.cache.store_login(&session.token, &session.user).await?;
        info!("signed in");
        Ok(session.user)
    }

    /// Create an account. Does not sign in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingCredentials` for blank input, otherwise API errors.
    #[instrument(skip(self, password))]
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<(), AuthError> {
        let registration = Registration {
            name: name.trim().to_owned(),
            email: required(email)?,
            password: required(password)?,
        };
        self.api.register(&registration).await?;
        info!("account created");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the cache cannot be cleared.
    pub async fn logout(&self) -> Result<(), AuthError> {
        self.cache.clear_login().await?;
        info!("signed out");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the cached profile is unreadable.
    pub async fn current_user(&self) -> Result<Option<UserProfile>, AuthError> {
        Ok(self.cache.user().await?)
    }

    /// # Errors
    ///
    /// Returns `AuthError::NotLoggedIn` when no token is cached.
    pub async fn require_token(&self) -> Result<String, AuthError> {
        require_token(&self.cache).await
    }
}

pub(crate) async fn require_token(cache: &LocalCache) -> Result<String, AuthError> {
    cache.token().await?.ok_or(AuthError::NotLoggedIn)
}

fn required(value: &str) -> Result<String, AuthError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AuthError::MissingCredentials);
    }
    Ok(trimmed.to_owned())
}
