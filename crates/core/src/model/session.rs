use std::collections::BTreeMap;

use thiserror::Error;

use crate::model::question::Question;
use crate::model::score::ScoredResult;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// Invalid input handed to a quiz session.
///
/// Every variant is deterministic and correctable by the caller; the session
/// performs no I/O and has no transient failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("a quiz needs at least one question")]
    NoQuestions,

    #[error("question {question} has {len} options, at least two are required")]
    TooFewOptions { question: usize, len: usize },

    #[error("question {question} marks option {index} correct but has {len} options")]
    CorrectIndexOutOfRange {
        question: usize,
        index: usize,
        len: usize,
    },

    #[error("question {index} is out of range for a quiz of {len}")]
    QuestionOutOfRange { index: usize, len: usize },

    #[error("option {index} is out of range for question {question} with {len} options")]
    OptionOutOfRange {
        question: usize,
        index: usize,
        len: usize,
    },
}

//
// ─── PROGRESS ─────────────────────────────────────────────────────────────────
//

/// Snapshot of where the user is in a quiz, for "Question i / n" labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    /// 1-based position of the cursor.
    pub position: usize,
    pub total: usize,
    pub answered: usize,
}

//
// ─── SESSION ──────────────────────────────────────────────────────────────────
//

/// In-memory state of one quiz attempt.
///
/// The question list is fixed at construction. Navigation clamps at both ends
/// and answers may be overwritten until the session is dropped or reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSession {
    questions: Vec<Question>,
    cursor: usize,
    answers: BTreeMap<usize, usize>,
}

impl QuizSession {
    /// Start a session over a generated question list.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoQuestions` for an empty list, and the first
    /// structural error found by [`Question::validate`] otherwise.
    pub fn new(questions: Vec<Question>) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::NoQuestions);
        }
        for (position, question) in questions.iter().enumerate() {
            question.validate(position)?;
        }

        Ok(Self {
            questions,
            cursor: 0,
            answers: BTreeMap::new(),
        })
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false; an empty quiz cannot be constructed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn current_question(&self) -> &Question {
        &self.questions[self.cursor]
    }

    #[must_use]
    pub fn answers(&self) -> &BTreeMap<usize, usize> {
        &self.answers
    }

    #[must_use]
    pub fn answer_for(&self, question_index: usize) -> Option<usize> {
        self.answers.get(&question_index).copied()
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn is_first(&self) -> bool {
        self.cursor == 0
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.cursor + 1 == self.questions.len()
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        QuizProgress {
            position: self.cursor + 1,
            total: self.questions.len(),
            answered: self.answers.len(),
        }
    }

    /// Record (or replace) the selection for a question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::QuestionOutOfRange` or `QuizError::OptionOutOfRange`;
    /// the stored answers are untouched on error.
    pub fn record_answer(
        &mut self,
        question_index: usize,
        option_index: usize,
    ) -> Result<(), QuizError> {
        let question = self.question_at(question_index)?;
        let len = question.options.len();
        if option_index >= len {
            return Err(QuizError::OptionOutOfRange {
                question: question_index,
                index: option_index,
                len,
            });
        }
        self.answers.insert(question_index, option_index);
        Ok(())
    }

    /// Record a selection for the question under the cursor.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::OptionOutOfRange` for an unknown option.
    pub fn record_current(&mut self, option_index: usize) -> Result<(), QuizError> {
        self.record_answer(self.cursor, option_index)
    }

    /// Move the cursor to `index`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::QuestionOutOfRange` if `index` is past the end.
    pub fn go_to(&mut self, index: usize) -> Result<(), QuizError> {
        self.question_at(index)?;
        self.cursor = index;
        Ok(())
    }

    /// Advance one question. Returns false at the last question.
    pub fn next(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Step back one question. Returns false at the first question.
    pub fn previous(&mut self) -> bool {
        if self.is_first() {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Score the attempt as it stands. Does not mutate the session.
    #[must_use]
    pub fn score(&self) -> ScoredResult {
        ScoredResult::tally(&self.questions, |index| self.answer_for(index))
    }

    /// Forget all answers and return to the first question.
    pub fn reset(&mut self) {
        self.answers.clear();
        self.cursor = 0;
    }

    fn question_at(&self, index: usize) -> Result<&Question, QuizError> {
        self.questions.get(index).ok_or(QuizError::QuestionOutOfRange {
            index,
            len: self.questions.len(),
        })
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
