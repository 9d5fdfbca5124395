use std::env;
use std::time::Duration;

use quiz_core::model::{ClientSettings, ClientSettingsDraft, ClientSettingsError};
use tracing::warn;

pub const API_URL_ENV: &str = "FLASHQUIZ_API_URL";
pub const QUIZ_API_URL_ENV: &str = "FLASHQUIZ_QUIZ_API_URL";
pub const QUESTIONS_ENV: &str = "FLASHQUIZ_QUESTIONS";
pub const TIMEOUT_ENV: &str = "FLASHQUIZ_HTTP_TIMEOUT_SECS";

const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Endpoints and knobs for the REST client.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub api_base_url: String,
    pub quiz_base_url: String,
    pub default_question_count: u32,
    pub timeout: Duration,
}

impl ApiConfig {
    #[must_use]
    pub fn from_settings(settings: &ClientSettings) -> Self {
        Self {
            api_base_url: settings.api_base_url().to_owned(),
            quiz_base_url: settings.quiz_base_url().to_owned(),
            default_question_count: settings.default_question_count(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Point both backends at one base URL. Used by tests against a mock server.
    #[must_use]
    pub fn single_host(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self {
            api_base_url: base_url.clone(),
            quiz_base_url: base_url,
            ..Self::from_settings(&ClientSettings::default())
        }
    }

    /// Read configuration from the environment, falling back to defaults.
    ///
    /// Unparsable numbers are logged and ignored.
    ///
    /// # Errors
    ///
    /// Returns `ClientSettingsError` if a URL is invalid or the question count is out of range.
    pub fn from_env() -> Result<Self, ClientSettingsError> {
        let draft = ClientSettingsDraft {
            api_base_url: env::var(API_URL_ENV).ok(),
            quiz_base_url: env::var(QUIZ_API_URL_ENV).ok(),
            default_question_count: parse_env(QUESTIONS_ENV),
        };
        let mut config = Self::from_settings(&draft.validate()?);
        if let Some(secs) = parse_env::<u64>(TIMEOUT_ENV) {
            config.timeout = Duration::from_secs(secs.max(1));
        }
        Ok(config)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from_settings(&ClientSettings::default())
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "ignoring unparsable environment value");
            None
        }
    }
}
