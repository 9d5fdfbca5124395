use serde::Serialize;

use crate::model::question::Question;

/// Per-question line of a scored attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOutcome {
    pub prompt: String,
    pub selected_option_text: Option<String>,
    pub correct_option_text: String,
    pub is_correct: bool,
}

/// Derived result of scoring a quiz. Never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredResult {
    pub total: usize,
    pub correct: usize,
    pub per_question: Vec<QuestionOutcome>,
}

impl ScoredResult {
    /// Score `questions` against the selections reported by `selected`.
    ///
    /// Unanswered questions count as incorrect and carry no selected text.
    pub fn tally<F>(questions: &[Question], selected: F) -> Self
    where
        F: Fn(usize) -> Option<usize>,
    {
        let mut correct = 0_usize;
        let per_question = questions
            .iter()
            .enumerate()
            .map(|(index, question)| {
                let choice = selected(index);
                let is_correct = choice.is_some_and(|option| question.is_correct(option));
                if is_correct {
                    correct += 1;
                }
                QuestionOutcome {
                    prompt: question.prompt.clone(),
                    selected_option_text: choice
                        .and_then(|option| question.option(option))
                        .map(str::to_owned),
                    correct_option_text: question
                        .correct_option()
                        .map(str::to_owned)
                        .unwrap_or_default(),
                    is_correct,
                }
            })
            .collect();

        Self {
            total: questions.len(),
            correct,
            per_question,
        }
    }

    /// Whole-number percentage, rounded down. Zero for an empty result.
    #[must_use]
    pub fn percent(&self) -> usize {
        if self.total == 0 {
            return 0;
        }
        self.correct * 100 / self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn questions() -> Vec<Question> {
        vec![
            Question::new("2+2?", ["3", "4", "5"], 1),
            Question::new("Capital of France?", ["Berlin", "Paris", "Rome"], 1),
            Question::new("Largest planet?", ["Jupiter", "Mars"], 0),
        ]
    }

    #[test]
    fn unanswered_counts_as_wrong_with_no_selection() {
        let result = ScoredResult::tally(&questions(), |_| None);
        assert_eq!(result.total, 3);
        assert_eq!(result.correct, 0);
        assert!(result
            .per_question
            .iter()
            .all(|line| line.selected_option_text.is_none() && !line.is_correct));
        assert_eq!(result.per_question[1].correct_option_text, "Paris");
    }

    #[test]
    fn mixed_answers_are_tallied() {
        let result = ScoredResult::tally(&questions(), |i| match i {
            0 => Some(1),
            1 => Some(2),
            _ => None,
        });
        assert_eq!(result.correct, 1);
        assert_eq!(result.percent(), 33);
        assert_eq!(result.per_question[1].selected_option_text.as_deref(), Some("Rome"));
    }

    #[test]
    fn serializes_camel_case_for_display_layers() {
        let result = ScoredResult::tally(&questions()[..1], |_| Some(1));
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["perQuestion"][0]["isCorrect"], true);
        assert_eq!(json["perQuestion"][0]["selectedOptionText"], "4");
        assert_eq!(result.percent(), 100);
    }
}
