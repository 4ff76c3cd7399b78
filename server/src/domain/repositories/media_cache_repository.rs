//! MediaCacheRepository trait
//!
//! Persistent mapping from identification evidence to canonical records.
//! The cache deduplicates catalog and LLM work across requests.

use async_trait::async_trait;

use crate::domain::entities::media_info::MediaInfo;
use crate::domain::value_objects::MediaType;
use crate::shared::error::RepositoryError;

/// Columns a point lookup may target. A closed set keeps column names out
/// of caller-supplied strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheLookupKey {
    Id,
    SearchableReference,
    Title,
    TmdbId,
    ImdbId,
}

impl CacheLookupKey {
    pub fn column_name(&self) -> &'static str {
        match self {
            CacheLookupKey::Id => "id",
            CacheLookupKey::SearchableReference => "searchable_reference",
            CacheLookupKey::Title => "title",
            CacheLookupKey::TmdbId => "tmdb_id",
            CacheLookupKey::ImdbId => "imdb_id",
        }
    }
}

/// Repository for the `cached_media` table
#[async_trait]
pub trait MediaCacheRepository: Send + Sync {
    /// Inserts a record. The required columns (`searchable_reference`,
    /// `tmdb_id`, `title`, `original_title`, `media_type`, `year`) must be
    /// present. Returns the record with its assigned surrogate id and
    /// timestamps.
    async fn cache_data(&self, record: &MediaInfo) -> Result<MediaInfo, RepositoryError>;

    /// Updates a record by id, refreshing `modified_at`
    async fn update_cache(&self, record: &MediaInfo) -> Result<(), RepositoryError>;

    /// Point lookup on a single column, optionally constrained by media type
    async fn get_cached(
        &self,
        search_term: &str,
        media_type: Option<MediaType>,
        key: CacheLookupKey,
    ) -> Result<Option<MediaInfo>, RepositoryError>;

    /// Compound lookup used mid-pipeline. Matches on title or searchable
    /// reference (case-insensitively, via the normalized form), constrained
    /// by media type, by year when plausible, and by season/episode for TV.
    async fn get_cached_by_obj(&self, obj: &MediaInfo) -> Result<Option<MediaInfo>, RepositoryError>;

    /// Fast path: lookup by the unique TMDB id
    async fn get_cached_by_tmdb_id(&self, tmdb_id: i64) -> Result<Option<MediaInfo>, RepositoryError>;

    /// Fast path: lookup of a TV episode by series id, season, and episode
    async fn get_cached_tv_episode(
        &self,
        series_id: i64,
        season: i32,
        episode: i32,
    ) -> Result<Option<MediaInfo>, RepositoryError>;
}
