//! OpenAiUsageRepository trait
//!
//! Token accounting for language-model calls, correlated to the request
//! that triggered them.

use async_trait::async_trait;
use uuid::Uuid;

use crate::shared::error::RepositoryError;

/// Token counters reported by the language-model provider for one call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: i64,
    pub cached_tokens: i64,
    pub output_tokens: i64,
    pub reasoning_tokens: i64,
    pub total_tokens: i64,
}

/// Repository for the `openai_history` table
#[async_trait]
pub trait OpenAiUsageRepository: Send + Sync {
    /// Records the usage of one model call under the current request id
    async fn log_usage(
        &self,
        request_id: Option<Uuid>,
        usage: TokenUsage,
    ) -> Result<(), RepositoryError>;
}
