//! CatalogService trait
//!
//! Typed surface over the remote metadata catalog. Every operation returns
//! `None` on any recoverable failure (rate-limit exhaustion, timeout, HTTP
//! error, malformed payload) — the implementation logs, the pipeline stage
//! decides whether the absence is fatal.

use async_trait::async_trait;

use crate::domain::entities::media_info::MediaInfo;
use crate::domain::value_objects::MediaType;

/// Remote metadata catalog operations consumed by the pipeline
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Search for a movie by title (and year, when plausible).
    /// The returned record carries the best match's `tmdb_id`.
    async fn search_movie(&self, title: &str, year: Option<i32>) -> Option<MediaInfo>;

    /// Search for a series by title. The returned record carries both
    /// `tmdb_id` and `tmdb_series_id` set to the series id.
    async fn search_series(&self, title: &str, year: Option<i32>) -> Option<MediaInfo>;

    /// Full movie details by catalog id
    async fn get_movie_details(&self, tmdb_id: i64) -> Option<MediaInfo>;

    /// Full series details by catalog id; sets `tmdb_series_id`
    async fn get_series_details(&self, tmdb_id: i64) -> Option<MediaInfo>;

    /// Episode details; the returned `tmdb_id` is the episode's id, not the
    /// series'
    async fn get_episode_details(&self, series_id: i64, season: i32, episode: i32)
        -> Option<MediaInfo>;

    /// Cross-catalog ids for a movie or series (or a specific episode when
    /// season and episode are given). The returned record echoes the
    /// requested `tmdb_id` and never invents a different one.
    async fn get_external_ids(
        &self,
        tmdb_id: i64,
        media_type: MediaType,
        season: Option<i32>,
        episode: Option<i32>,
    ) -> Option<MediaInfo>;
}
