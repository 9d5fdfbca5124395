use serde::{Deserialize, Serialize};

use crate::model::ids::QuestionId;
use crate::model::session::QuizError;

/// Smallest option set a multiple-choice question may carry.
pub const MIN_OPTIONS: usize = 2;

/// A multiple-choice item produced by the quiz generator.
///
/// The wire shape follows the generator's JSON (`question`, `options`,
/// `answerIndex`). Structural validity is checked when a [`QuizSession`]
/// is built, not on deserialization.
///
/// [`QuizSession`]: crate::model::QuizSession
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<QuestionId>,
    #[serde(rename = "question")]
    pub prompt: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(rename = "answerIndex")]
    pub correct_index: usize,
}

impl Question {
    #[must_use]
    pub fn new<I, S>(prompt: impl Into<String>, options: I, correct_index: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: None,
            prompt: prompt.into(),
            options: options.into_iter().map(Into::into).collect(),
            correct_index,
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: QuestionId) -> Self {
        self.id = Some(id);
        self
    }

    /// Check the option set and correct index.
    ///
    /// `position` is the question's index in its quiz and is only used to
    /// label the error.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::TooFewOptions` when fewer than [`MIN_OPTIONS`] options exist,
    /// or `QuizError::CorrectIndexOutOfRange` when `correct_index` does not point at one.
    pub fn validate(&self, position: usize) -> Result<(), QuizError> {
        let len = self.options.len();
        if len < MIN_OPTIONS {
            return Err(QuizError::TooFewOptions {
                question: position,
                len,
            });
        }
        if self.correct_index >= len {
            return Err(QuizError::CorrectIndexOutOfRange {
                question: position,
                index: self.correct_index,
                len,
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn option(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn correct_option(&self) -> Option<&str> {
        self.option(self.correct_index)
    }

    /// Correctness is positional: identical option text at another index does not count.
    #[must_use]
    pub fn is_correct(&self, option_index: usize) -> bool {
        option_index == self.correct_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_generator_shape() {
        let json = r#"{"id":"q-1","question":"2+2?","options":["3","4","5"],"answerIndex":1}"#;
        let question: Question = serde_json::from_str(json).unwrap();
        assert_eq!(question.id, Some(QuestionId::new("q-1")));
        assert_eq!(question.prompt, "2+2?");
        assert_eq!(question.correct_option(), Some("4"));
    }

    #[test]
    fn id_is_optional_on_the_wire() {
        let json = r#"{"question":"x","options":["a","b"],"answerIndex":0}"#;
        let question: Question = serde_json::from_str(json).unwrap();
        assert!(question.id.is_none());
        let back = serde_json::to_value(&question).unwrap();
        assert!(back.get("id").is_none());
        assert_eq!(back["answerIndex"], 0);
    }

    #[test]
    fn rejects_single_option() {
        let err = Question::new("x", ["a"], 0).validate(3).unwrap_err();
        assert_eq!(err, QuizError::TooFewOptions { question: 3, len: 1 });
    }

    #[test]
    fn rejects_missing_options() {
        let err = Question::new("x", Vec::<String>::new(), 0)
            .validate(0)
            .unwrap_err();
        assert!(matches!(err, QuizError::TooFewOptions { len: 0, .. }));
    }

    #[test]
    fn payload_without_options_fails_validation_not_decoding() {
        let json = r#"{"question":"x","answerIndex":0}"#;
        let question: Question = serde_json::from_str(json).unwrap();
        assert!(question.options.is_empty());
        assert!(matches!(
            question.validate(0),
            Err(QuizError::TooFewOptions { len: 0, .. })
        ));
    }

    #[test]
    fn rejects_correct_index_past_end() {
        let err = Question::new("x", ["a", "b"], 2).validate(0).unwrap_err();
        assert_eq!(
            err,
            QuizError::CorrectIndexOutOfRange {
                question: 0,
                index: 2,
                len: 2
            }
        );
    }

    #[test]
    fn duplicate_option_text_is_distinguished_by_position() {
        let question = Question::new("pick", ["same", "same"], 1);
        assert!(question.validate(0).is_ok());
        assert!(question.is_correct(1));
        assert!(!question.is_correct(0));
    }
}
