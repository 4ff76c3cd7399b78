//! Postgres OpenAI Usage Repository
//!
//! Records the token counters of every language-model call under the
//! request that triggered it.

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use tracing::debug;
use uuid::Uuid;

use crate::domain::repositories::{OpenAiUsageRepository, TokenUsage};
use crate::shared::error::RepositoryError;

/// Postgres implementation of [`OpenAiUsageRepository`]
pub struct PgOpenAiUsageRepository {
    pool: Pool<Postgres>,
}

impl PgOpenAiUsageRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OpenAiUsageRepository for PgOpenAiUsageRepository {
    async fn log_usage(
        &self,
        request_id: Option<Uuid>,
        usage: TokenUsage,
    ) -> Result<(), RepositoryError> {
        let request_id = match request_id {
            Some(id) => id,
            None => {
                // Calls made outside an HTTP request have nothing to audit
                debug!("No request id in scope; skipping usage row");
                return Ok(());
            }
        };

        debug!("Logging OpenAI usage for request ID {}", request_id);

        sqlx::query(
            r#"
            INSERT INTO openai_history
                (request_id, input_tokens, cached_tokens, output_tokens, reasoning_tokens,
                 total_tokens, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, CURRENT_TIMESTAMP)
            "#,
        )
        .bind(request_id)
        .bind(usage.input_tokens)
        .bind(usage.cached_tokens)
        .bind(usage.output_tokens)
        .bind(usage.reasoning_tokens)
        .bind(usage.total_tokens)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
