//! LlmClassifier trait
//!
//! Narrow language-model extraction operations, each a pure function of
//! the input path. Implementations return `None` on any failure, including
//! rate limiting — there is no retry at this level.

use async_trait::async_trait;
use uuid::Uuid;

/// Language-model fallback extractor
#[async_trait]
pub trait LlmClassifier: Send + Sync {
    /// Classify the path as "movie", "tv", or "unknown"
    async fn classify_media_type(&self, file_path: &str, request_id: Option<Uuid>)
        -> Option<String>;

    /// Extract a movie title from the path
    async fn extract_movie_title(&self, file_path: &str, request_id: Option<Uuid>)
        -> Option<String>;

    /// Extract a series title from the path
    async fn extract_series_title(&self, file_path: &str, request_id: Option<Uuid>)
        -> Option<String>;

    /// Extract "season:N, episode:M" from the path
    async fn extract_season_episode(
        &self,
        file_path: &str,
        request_id: Option<Uuid>,
    ) -> Option<String>;
}

/// Parses the "season:N, episode:M" wire form into two integers.
///
/// Any deviation from the exact shape — wrong part count, missing colon,
/// non-numeric values — yields `(None, None)`.
pub fn parse_season_episode(value: &str) -> (Option<i32>, Option<i32>) {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return (None, None);
    }

    let parts: Vec<&str> = trimmed.split(',').map(str::trim).collect();
    if parts.len() != 2 {
        tracing::error!("Invalid season/episode format: {}", value);
        return (None, None);
    }

    let season = extract_number(parts[0]);
    let episode = extract_number(parts[1]);

    match (season, episode) {
        (Some(s), Some(e)) => (Some(s), Some(e)),
        _ => {
            tracing::error!("Invalid season/episode value: {}", value);
            (None, None)
        }
    }
}

fn extract_number(segment: &str) -> Option<i32> {
    let tokens: Vec<&str> = segment.split(':').map(str::trim).collect();
    if tokens.len() != 2 {
        return None;
    }
    if tokens[1].is_empty() || !tokens[1].chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    tokens[1].parse().ok()
}
