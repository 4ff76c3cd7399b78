//! OpenAI client tests against a mock HTTP server.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use mediainfod::domain::repositories::{OpenAiUsageRepository, TokenUsage};
use mediainfod::infrastructure::external::OpenAiClient;
use mediainfod::interfaces::external_services::LlmClassifier;
use mediainfod::shared::config::OpenAiConfig;
use mediainfod::shared::error::RepositoryError;

/// Records every usage row it is handed
#[derive(Default)]
struct RecordingUsageRepo {
    rows: Mutex<Vec<(Option<Uuid>, TokenUsage)>>,
}

#[async_trait]
impl OpenAiUsageRepository for RecordingUsageRepo {
    async fn log_usage(
        &self,
        request_id: Option<Uuid>,
        usage: TokenUsage,
    ) -> Result<(), RepositoryError> {
        self.rows.lock().unwrap().push((request_id, usage));
        Ok(())
    }
}

fn config() -> OpenAiConfig {
    OpenAiConfig {
        api_key: "test-key".to_string(),
        organization: None,
        model: "gpt-4o-mini".to_string(),
    }
}

fn success_body(text: &str) -> serde_json::Value {
    json!({
        "id": "resp_123",
        "output": [
            {
                "type": "message",
                "content": [
                    { "type": "output_text", "text": text }
                ]
            }
        ],
        "usage": {
            "input_tokens": 150,
            "input_tokens_details": { "cached_tokens": 20 },
            "output_tokens": 3,
            "output_tokens_details": { "reasoning_tokens": 0 },
            "total_tokens": 153
        }
    })
}

#[tokio::test]
async fn classify_media_type_returns_the_token() {
    let server = MockServer::start().await;
    let usage_repo = Arc::new(RecordingUsageRepo::default());

    Mock::given(method("POST"))
        .and(path("/v1/responses"))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body("tv")))
        .mount(&server)
        .await;

    let client = OpenAiClient::new(&config(), usage_repo.clone())
        .unwrap()
        .with_base_url(&server.uri());

    let request_id = Uuid::new_v4();
    let result = client
        .classify_media_type("Breaking.Bad.S05E14.mkv", Some(request_id))
        .await;

    assert_eq!(result.as_deref(), Some("tv"));

    // Usage was captured under the request id
    let rows = usage_repo.rows.lock().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].0, Some(request_id));
    assert_eq!(rows[0].1.input_tokens, 150);
    assert_eq!(rows[0].1.cached_tokens, 20);
    assert_eq!(rows[0].1.total_tokens, 153);
}

#[tokio::test]
async fn rate_limit_returns_none_without_retry() {
    let server = MockServer::start().await;
    let usage_repo = Arc::new(RecordingUsageRepo::default());

    Mock::given(method("POST"))
        .and(path("/v1/responses"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": { "message": "Rate limit reached", "type": "rate_limit_error" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = OpenAiClient::new(&config(), usage_repo.clone())
        .unwrap()
        .with_base_url(&server.uri());

    let result = client.extract_movie_title("Some.Movie.2020.mkv", None).await;
    assert!(result.is_none());
    assert!(usage_repo.rows.lock().unwrap().is_empty());
}

#[tokio::test]
async fn server_error_returns_none() {
    let server = MockServer::start().await;
    let usage_repo = Arc::new(RecordingUsageRepo::default());

    Mock::given(method("POST"))
        .and(path("/v1/responses"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = OpenAiClient::new(&config(), usage_repo)
        .unwrap()
        .with_base_url(&server.uri());

    assert!(client.extract_series_title("Show.S01E01.mkv", None).await.is_none());
}

#[tokio::test]
async fn blank_output_returns_none() {
    let server = MockServer::start().await;
    let usage_repo = Arc::new(RecordingUsageRepo::default());

    Mock::given(method("POST"))
        .and(path("/v1/responses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body("   ")))
        .mount(&server)
        .await;

    let client = OpenAiClient::new(&config(), usage_repo)
        .unwrap()
        .with_base_url(&server.uri());

    assert!(client.extract_season_episode("Show.S01E01.mkv", None).await.is_none());
}
