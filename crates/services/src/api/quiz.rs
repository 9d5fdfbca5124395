use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use quiz_core::model::{Question, StudyCard};

use super::{HttpApi, QuizGenerator, check};
use crate::error::ApiError;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateQuizRequest<'a> {
    cards: &'a [StudyCard],
    num_questions: u32,
}

#[derive(Deserialize)]
struct GenerateQuizResponse {
    #[serde(default)]
    quiz: Vec<Question>,
}

#[async_trait]
impl QuizGenerator for HttpApi {
    #[instrument(skip_all, fields(cards = cards.len(), count = count))]
    async fn generate_quiz(
        &self,
        token: &str,
        cards: &[StudyCard],
        count: u32,
    ) -> Result<Vec<Question>, ApiError> {
        let builder = self
            .client
            .post(self.quiz_url("/api/quiz/generate"))
            .json(&GenerateQuizRequest {
                cards,
                num_questions: count,
            });
        let response = self.authorized(builder, token).send().await?;
        let body: GenerateQuizResponse = check(response).await?.json().await?;
        debug!(questions = body.quiz.len(), "quiz generated");
        Ok(body.quiz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use quiz_core::model::{QuizError, QuizSession};
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn posts_cards_and_count() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/quiz/generate"))
            .and(body_json(serde_json::json!({
                "cards": [{"question": "2+2?", "answer": "4", "favorited": false}],
                "numQuestions": 3
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "quiz": [
                    {"id": "q1", "question": "2+2?", "options": ["3", "4", "5"], "answerIndex": 1}
                ]
            })))
            .mount(&server)
            .await;

        let api = HttpApi::new(ApiConfig::single_host(server.uri())).unwrap();
        let quiz = api
            .generate_quiz("tok", &[StudyCard::new("2+2?", "4")], 3)
            .await
            .unwrap();
        assert_eq!(quiz.len(), 1);
        assert_eq!(quiz[0].correct_option(), Some("4"));
    }

    #[tokio::test]
    async fn missing_quiz_field_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/quiz/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let api = HttpApi::new(ApiConfig::single_host(server.uri())).unwrap();
        let quiz = api.generate_quiz("tok", &[], 5).await.unwrap();
        assert!(quiz.is_empty());
    }

    #[tokio::test]
    async fn question_without_options_reaches_session_validation() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/quiz/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "quiz": [{"question": "2+2?", "answerIndex": 0}]
            })))
            .mount(&server)
            .await;

        let api = HttpApi::new(ApiConfig::single_host(server.uri())).unwrap();
        let quiz = api.generate_quiz("tok", &[], 5).await.unwrap();
        assert_eq!(
            QuizSession::new(quiz).unwrap_err(),
            QuizError::TooFewOptions { question: 0, len: 0 }
        );
    }

    #[tokio::test]
    async fn generation_failure_carries_body_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/quiz/generate"))
            .respond_with(ResponseTemplate::new(500).set_body_string("model overloaded"))
            .mount(&server)
            .await;

        let api = HttpApi::new(ApiConfig::single_host(server.uri())).unwrap();
        let err = api.generate_quiz("tok", &[], 5).await.unwrap_err();
        assert!(err.to_string().contains("model overloaded"));
    }
}
