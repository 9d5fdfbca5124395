use thiserror::Error;
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "https://flashcard-backend-cllv.onrender.com";
pub const DEFAULT_QUIZ_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_QUESTION_COUNT: u32 = 5;
pub const MAX_QUESTION_COUNT: u32 = 50;

/// Validated client configuration: where the backends live and how long a quiz is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientSettings {
    api_base_url: String,
    quiz_base_url: String,
    default_question_count: u32,
}

#[derive(Clone, Debug, Default)]
pub struct ClientSettingsDraft {
    pub api_base_url: Option<String>,
    pub quiz_base_url: Option<String>,
    pub default_question_count: Option<u32>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ClientSettingsError {
    #[error("invalid base URL for {field}")]
    InvalidBaseUrl { field: &'static str },
    #[error("question count must be between 1 and 50, got {0}")]
    InvalidQuestionCount(u32),
}

impl ClientSettingsDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and normalize the draft, filling defaults for missing values.
    ///
    /// # Errors
    ///
    /// Returns `ClientSettingsError` if a base URL does not parse or the
    /// question count is outside `1..=MAX_QUESTION_COUNT`.
    pub fn validate(self) -> Result<ClientSettings, ClientSettingsError> {
        let api_base_url = normalize_url(self.api_base_url, "api_base_url")?
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_owned());
        let quiz_base_url = normalize_url(self.quiz_base_url, "quiz_base_url")?
            .unwrap_or_else(|| DEFAULT_QUIZ_BASE_URL.to_owned());

        let default_question_count = self.default_question_count.unwrap_or(DEFAULT_QUESTION_COUNT);
        if default_question_count == 0 || default_question_count > MAX_QUESTION_COUNT {
            return Err(ClientSettingsError::InvalidQuestionCount(
                default_question_count,
            ));
        }

        Ok(ClientSettings {
            api_base_url,
            quiz_base_url,
            default_question_count,
        })
    }
}

impl ClientSettings {
    #[must_use]
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    #[must_use]
    pub fn quiz_base_url(&self) -> &str {
        &self.quiz_base_url
    }

    #[must_use]
    pub fn default_question_count(&self) -> u32 {
        self.default_question_count
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            quiz_base_url: DEFAULT_QUIZ_BASE_URL.to_owned(),
            default_question_count: DEFAULT_QUESTION_COUNT,
        }
    }
}

// Trailing slashes are dropped so endpoint paths can be appended directly.
fn normalize_url(
    value: Option<String>,
    field: &'static str,
) -> Result<Option<String>, ClientSettingsError> {
    let Some(value) = value
        .map(|val| val.trim().trim_end_matches('/').to_string())
        .filter(|val| !val.is_empty())
    else {
        return Ok(None);
    };
    if Url::parse(&value).is_err() {
        return Err(ClientSettingsError::InvalidBaseUrl { field });
    }
    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_draft_uses_defaults() {
        let settings = ClientSettingsDraft::new().validate().unwrap();
        assert_eq!(settings, ClientSettings::default());
    }

    #[test]
    fn blank_values_are_treated_as_missing() {
        let settings = ClientSettingsDraft {
            api_base_url: Some("   ".into()),
            ..ClientSettingsDraft::default()
        }
        .validate()
        .unwrap();
        assert_eq!(settings.api_base_url(), DEFAULT_API_BASE_URL);
    }

    #[test]
    fn trailing_slashes_are_trimmed() {
        let settings = ClientSettingsDraft {
            quiz_base_url: Some("http://127.0.0.1:5000//".into()),
            ..ClientSettingsDraft::default()
        }
        .validate()
        .unwrap();
        assert_eq!(settings.quiz_base_url(), "http://127.0.0.1:5000");
    }

    #[test]
    fn rejects_bad_url_and_count() {
        let err = ClientSettingsDraft {
            api_base_url: Some("not a url".into()),
            ..ClientSettingsDraft::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(
            err,
            ClientSettingsError::InvalidBaseUrl {
                field: "api_base_url"
            }
        );

        let err = ClientSettingsDraft {
            default_question_count: Some(0),
            ..ClientSettingsDraft::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err, ClientSettingsError::InvalidQuestionCount(0));
    }
}
