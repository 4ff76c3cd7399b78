//! Postgres Request Log Repository
//!
//! One row per HTTP request: inserted at arrival, completed with the
//! outcome when the response goes out.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{Pool, Postgres, Row};
use tracing::debug;
use uuid::Uuid;

use crate::domain::repositories::{RequestHistoryEntry, RequestLogRepository, RequestStatistics};
use crate::shared::error::RepositoryError;

/// Postgres implementation of [`RequestLogRepository`]
pub struct PgRequestLogRepository {
    pool: Pool<Postgres>,
}

impl PgRequestLogRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    fn row_to_entry(row: &PgRow) -> Result<RequestHistoryEntry, RepositoryError> {
        Ok(RequestHistoryEntry {
            id: row.try_get("id").map_err(RepositoryError::from)?,
            endpoint: row.try_get("endpoint").map_err(RepositoryError::from)?,
            filename: row.try_get("filename").map_err(RepositoryError::from)?,
            requester_ip: row.try_get("requester_ip").map_err(RepositoryError::from)?,
            result_status: row.try_get("result_status").map_err(RepositoryError::from)?,
            result_media_id: row.try_get("result_media_id").map_err(RepositoryError::from)?,
            received_at: row.try_get("received_at").map_err(RepositoryError::from)?,
            responded_at: row.try_get("responded_at").map_err(RepositoryError::from)?,
            error_message: row.try_get("error_message").map_err(RepositoryError::from)?,
            elapsed_seconds: row.try_get("elapsed_seconds").map_err(RepositoryError::from)?,
        })
    }
}

#[async_trait]
impl RequestLogRepository for PgRequestLogRepository {
    async fn log_start(
        &self,
        endpoint: &str,
        filename: &str,
        requester_ip: &str,
    ) -> Result<Uuid, RepositoryError> {
        debug!("Logging request start for {} from {}", filename, requester_ip);

        let row = sqlx::query(
            r#"
            INSERT INTO request_history (endpoint, filename, requester_ip, received_at)
            VALUES ($1, $2, $3, CURRENT_TIMESTAMP)
            RETURNING id
            "#,
        )
        .bind(endpoint)
        .bind(filename)
        .bind(requester_ip)
        .fetch_one(&self.pool)
        .await?;

        let request_id: Uuid = row.try_get("id").map_err(RepositoryError::from)?;
        debug!("Request logged with ID: {}", request_id);
        Ok(request_id)
    }

    async fn log_completed(
        &self,
        request_id: Uuid,
        status_code: i32,
        result_media_id: Option<Uuid>,
        error_message: Option<&str>,
    ) -> Result<(), RepositoryError> {
        debug!(
            "Logging request completion for ID {} with status {}",
            request_id, status_code
        );

        sqlx::query(
            r#"
            UPDATE request_history
            SET responded_at = CURRENT_TIMESTAMP,
                result_status = $1,
                result_media_id = $2,
                error_message = $3
            WHERE id = $4
            "#,
        )
        .bind(status_code)
        .bind(result_media_id)
        .bind(error_message)
        .bind(request_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_statistics(&self, limit: i64) -> Result<RequestStatistics, RepositoryError> {
        let total_row = sqlx::query("SELECT COUNT(*) AS count FROM request_history")
            .fetch_one(&self.pool)
            .await?;
        let total: i64 = total_row.try_get("count").map_err(RepositoryError::from)?;

        let total_24h_row = sqlx::query(
            "SELECT COUNT(*) AS count FROM request_history \
             WHERE received_at >= CURRENT_TIMESTAMP - INTERVAL '24 hours'",
        )
        .fetch_one(&self.pool)
        .await?;
        let total_24h: i64 = total_24h_row.try_get("count").map_err(RepositoryError::from)?;

        let rows = sqlx::query(
            r#"
            SELECT id, endpoint, filename, requester_ip, result_status, result_media_id,
                   received_at, responded_at, error_message,
                   EXTRACT(EPOCH FROM elapsed_time)::float8 AS elapsed_seconds
            FROM request_history
            ORDER BY received_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        let recent_requests = rows
            .iter()
            .map(Self::row_to_entry)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RequestStatistics { total, total_24h, recent_requests })
    }
}
