use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, instrument};

use quiz_core::model::ProgressReport;

use super::{HttpApi, ProgressApi};
use crate::error::ApiError;

#[async_trait]
impl ProgressApi for HttpApi {
    #[instrument(skip_all)]
    async fn progress(&self, token: &str) -> Result<Option<ProgressReport>, ApiError> {
        let request = self.client.get(self.quiz_url("/api/progress"));
        let response = self.authorized(request, token).send().await?;
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            debug!(%status, "no progress available");
            return Ok(None);
        }
        Ok(Some(response.json().await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn reads_progress_report() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/progress"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "totalReviewed": 4,
                "correctAnswers": 3,
                "byDate": [{"date": "2024-05-01T08:30:00Z", "correct": 3, "total": 4}]
            })))
            .mount(&server)
            .await;

        let api = HttpApi::new(ApiConfig::single_host(server.uri())).unwrap();
        let report = api.progress("tok").await.unwrap().unwrap();
        assert_eq!(report.correct_answers, 3);
        assert_eq!(report.by_date.len(), 1);
    }

    #[tokio::test]
    async fn date_only_entries_do_not_fail_the_report() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/progress"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "totalReviewed": 4,
                "correctAnswers": 3,
                "byDate": [{"date": "2024-05-01", "correct": 3, "total": 4}]
            })))
            .mount(&server)
            .await;

        let api = HttpApi::new(ApiConfig::single_host(server.uri())).unwrap();
        let report = api.progress("tok").await.unwrap().unwrap();
        assert_eq!(report.total_reviewed, 4);
        assert!(report.by_date[0].date.is_some());
    }

    #[tokio::test]
    async fn not_found_means_no_progress_yet() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/progress"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let api = HttpApi::new(ApiConfig::single_host(server.uri())).unwrap();
        assert_eq!(api.progress("tok").await.unwrap(), None);
    }
}
