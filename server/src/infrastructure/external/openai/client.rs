//! OpenAI Client Implementation
//!
//! Drives the four narrow extraction operations against the Responses API.
//! A rate-limit response returns `None` with no retry; every other failure
//! is logged and also returns `None`. Token usage is captured per call and
//! handed to the usage repository under the current request id.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::domain::repositories::{OpenAiUsageRepository, TokenUsage};
use crate::infrastructure::external::openai::prompts;
use crate::interfaces::external_services::LlmClassifier;
use crate::shared::config::OpenAiConfig;
use crate::shared::error::OpenAiError;

const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
const TEMPERATURE: f32 = 0.1;

/// Request body for the Responses API
#[derive(Debug, Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    instructions: &'a str,
    input: String,
    temperature: f32,
}

/// Response body of the Responses API (the parts we read)
#[derive(Debug, Deserialize)]
struct ResponsesResponse {
    #[serde(default)]
    output: Vec<OutputItem>,
    usage: Option<UsageBlock>,
}

#[derive(Debug, Deserialize)]
struct OutputItem {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    content: Vec<ContentItem>,
}

#[derive(Debug, Deserialize)]
struct ContentItem {
    #[serde(rename = "type")]
    kind: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct UsageBlock {
    #[serde(default)]
    input_tokens: i64,
    input_tokens_details: Option<InputTokensDetails>,
    #[serde(default)]
    output_tokens: i64,
    output_tokens_details: Option<OutputTokensDetails>,
    #[serde(default)]
    total_tokens: i64,
}

#[derive(Debug, Deserialize, Default)]
struct InputTokensDetails {
    #[serde(default)]
    cached_tokens: i64,
}

#[derive(Debug, Deserialize, Default)]
struct OutputTokensDetails {
    #[serde(default)]
    reasoning_tokens: i64,
}

impl UsageBlock {
    fn to_token_usage(&self) -> TokenUsage {
        TokenUsage {
            input_tokens: self.input_tokens,
            cached_tokens: self
                .input_tokens_details
                .as_ref()
                .map(|d| d.cached_tokens)
                .unwrap_or(0),
            output_tokens: self.output_tokens,
            reasoning_tokens: self
                .output_tokens_details
                .as_ref()
                .map(|d| d.reasoning_tokens)
                .unwrap_or(0),
            total_tokens: self.total_tokens,
        }
    }
}

/// OpenAI client for the extraction operations
pub struct OpenAiClient {
    api_key: String,
    organization: Option<String>,
    model: String,
    http_client: Client,
    base_url: String,
    usage_repository: Arc<dyn OpenAiUsageRepository>,
}

impl OpenAiClient {
    /// Creates a new OpenAI client
    ///
    /// # Errors
    /// Returns an error for an empty API key or if the HTTP client cannot
    /// be built
    pub fn new(
        config: &OpenAiConfig,
        usage_repository: Arc<dyn OpenAiUsageRepository>,
    ) -> Result<Self, OpenAiError> {
        if config.api_key.trim().is_empty() {
            return Err(OpenAiError::MissingApiKey);
        }

        Ok(Self {
            api_key: config.api_key.clone(),
            organization: config.organization.clone(),
            model: config.model.clone(),
            http_client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .map_err(|e| OpenAiError::Network(e.to_string()))?,
            base_url: DEFAULT_BASE_URL.to_string(),
            usage_repository,
        })
    }

    /// Points the client at a different base URL (used by tests)
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Sends one prompt; returns the raw output token or `None` on any
    /// failure. Rate limits are terminal for the call - no retry.
    async fn ask(&self, input: String, request_id: Option<Uuid>) -> Option<String> {
        let body = ResponsesRequest {
            model: &self.model,
            instructions: prompts::SYSTEM_INSTRUCTIONS,
            input,
            temperature: TEMPERATURE,
        };

        let url = format!("{}/v1/responses", self.base_url);
        let mut request = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body);

        if let Some(organization) = &self.organization {
            request = request.header("OpenAI-Organization", organization);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                error!("Error communicating with OpenAI: {}", err);
                return None;
            }
        };

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            error!("OpenAI rate limit exceeded; giving up on this call");
            return None;
        }

        if !response.status().is_success() {
            error!("OpenAI returned status {}", response.status().as_u16());
            return None;
        }

        let payload: ResponsesResponse = match response.json().await {
            Ok(payload) => payload,
            Err(err) => {
                error!("Failed to parse OpenAI response: {}", err);
                return None;
            }
        };

        if let Some(usage) = &payload.usage {
            let usage = usage.to_token_usage();
            if let Err(err) = self.usage_repository.log_usage(request_id, usage).await {
                warn!("Failed to record OpenAI usage: {}", err);
            }
        }

        let text = extract_output_text(&payload)?;
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }

        debug!("OpenAI returned: {}", trimmed);
        Some(trimmed.to_string())
    }
}

/// Pulls the first `output_text` fragment out of the response envelope
fn extract_output_text(payload: &ResponsesResponse) -> Option<String> {
    payload
        .output
        .iter()
        .filter(|item| item.kind == "message")
        .flat_map(|item| item.content.iter())
        .find(|content| content.kind == "output_text")
        .and_then(|content| content.text.clone())
}

#[async_trait]
impl LlmClassifier for OpenAiClient {
    async fn classify_media_type(
        &self,
        file_path: &str,
        request_id: Option<Uuid>,
    ) -> Option<String> {
        self.ask(prompts::media_type_prompt(file_path), request_id).await
    }

    async fn extract_movie_title(
        &self,
        file_path: &str,
        request_id: Option<Uuid>,
    ) -> Option<String> {
        self.ask(prompts::movie_title_prompt(file_path), request_id).await
    }

    async fn extract_series_title(
        &self,
        file_path: &str,
        request_id: Option<Uuid>,
    ) -> Option<String> {
        self.ask(prompts::series_title_prompt(file_path), request_id).await
    }

    async fn extract_season_episode(
        &self,
        file_path: &str,
        request_id: Option<Uuid>,
    ) -> Option<String> {
        self.ask(prompts::season_episode_prompt(file_path), request_id).await
    }
}
