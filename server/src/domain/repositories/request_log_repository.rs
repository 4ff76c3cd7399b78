//! RequestLogRepository trait
//!
//! Audit trail for every HTTP identification request: one row at request
//! start, completed with status and outcome when the response is sent.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::shared::error::RepositoryError;

/// One completed or in-flight request-history row
#[derive(Debug, Clone, Serialize)]
pub struct RequestHistoryEntry {
    pub id: Uuid,
    pub endpoint: String,
    pub filename: String,
    pub requester_ip: String,
    pub result_status: Option<i32>,
    pub result_media_id: Option<Uuid>,
    pub received_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
    pub error_message: Option<String>,
    /// Elapsed seconds between receipt and response
    pub elapsed_seconds: Option<f64>,
}

/// Aggregate view served by the statistics endpoint
#[derive(Debug, Clone, Serialize)]
pub struct RequestStatistics {
    pub total: i64,
    pub total_24h: i64,
    pub recent_requests: Vec<RequestHistoryEntry>,
}

/// Repository for the `request_history` table
#[async_trait]
pub trait RequestLogRepository: Send + Sync {
    /// Records the arrival of a request and returns its id
    async fn log_start(
        &self,
        endpoint: &str,
        filename: &str,
        requester_ip: &str,
    ) -> Result<Uuid, RepositoryError>;

    /// Completes a request row with its outcome
    async fn log_completed(
        &self,
        request_id: Uuid,
        status_code: i32,
        result_media_id: Option<Uuid>,
        error_message: Option<&str>,
    ) -> Result<(), RepositoryError>;

    /// Returns totals and the most recent `limit` requests
    async fn get_statistics(&self, limit: i64) -> Result<RequestStatistics, RepositoryError>;
}
