use async_trait::async_trait;
use serde::Deserialize;
use tracing::instrument;

use quiz_core::model::UserProfile;

use super::{AuthApi, Credentials, HttpApi, LoginSession, Registration, check};
use crate::error::ApiError;

#[derive(Deserialize)]
struct LoginResponse {
    token: Option<String>,
    #[serde(default)]
    user: Option<UserProfile>,
}

#[async_trait]
impl AuthApi for HttpApi {
    #[instrument(skip_all, fields(email = %credentials.email))]
    async fn login(&self, credentials: &Credentials) -> Result<LoginSession, ApiError> {
        let response = self
            .client
            .post(self.api_url("/api/auth/login"))
            .json(credentials)
            .send()
            .await?;
        let body: LoginResponse = check(response).await?.json().await?;
        let token = body
            .token
            .filter(|token| !token.is_empty())
            .ok_or(ApiError::MalformedResponse("token"))?;
        Ok(LoginSession {
            token,
            user: body.user.unwrap_or_default(),
        })
    }

    #[instrument(skip_all, fields(email = %registration.email))]
    async fn register(&self, registration: &Registration) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.api_url("/api/auth/register"))
            .json(registration)
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn credentials() -> Credentials {
        Credentials {
            email: "ada@example.com".into(),
            password: "hunter2".into(),
        }
    }

    #[tokio::test]
    async fn login_returns_token_and_user() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .and(body_json(serde_json::json!({
                "email": "ada@example.com",
                "password": "hunter2"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "token": "jwt",
                "user": {"_id": "u1", "name": "Ada"}
            })))
            .mount(&server)
            .await;

        let api = HttpApi::new(ApiConfig::single_host(server.uri())).unwrap();
        let session = api.login(&credentials()).await.unwrap();
        assert_eq!(session.token, "jwt");
        assert_eq!(session.user.name.as_deref(), Some("Ada"));
    }

    #[tokio::test]
    async fn login_without_token_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let api = HttpApi::new(ApiConfig::single_host(server.uri())).unwrap();
        let err = api.login(&credentials()).await.unwrap_err();
        assert!(matches!(err, ApiError::MalformedResponse("token")));
    }

    #[tokio::test]
    async fn rejected_login_surfaces_backend_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(serde_json::json!({"msg": "Invalid credentials"})),
            )
            .mount(&server)
            .await;

        let api = HttpApi::new(ApiConfig::single_host(server.uri())).unwrap();
        let err = api.login(&credentials()).await.unwrap_err();
        match err {
            ApiError::Status { status, message } => {
                assert_eq!(status.as_u16(), 400);
                assert_eq!(message, "Invalid credentials");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn register_accepts_created() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/register"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({"msg": "ok"})))
            .expect(1)
            .mount(&server)
            .await;

        let api = HttpApi::new(ApiConfig::single_host(server.uri())).unwrap();
        api.register(&Registration {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password: "hunter2".into(),
        })
        .await
        .unwrap();
    }
}
