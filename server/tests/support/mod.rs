//! Shared test doubles: an in-memory cache, a scripted catalog, and a
//! scripted language model. Call counters let tests assert which
//! collaborators a pipeline run actually touched.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use mediainfod::domain::entities::media_info::MediaInfo;
use mediainfod::domain::repositories::{CacheLookupKey, MediaCacheRepository};
use mediainfod::domain::services::FilenameScanner;
use mediainfod::domain::value_objects::MediaType;
use mediainfod::interfaces::external_services::{CatalogService, LlmClassifier};
use mediainfod::shared::error::RepositoryError;
use mediainfod::shared::text::create_searchable_reference;

/// Fixed timestamp so repeated identifications produce byte-equal records
pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

/// In-memory stand-in for the Postgres cache
#[derive(Default)]
pub struct InMemoryMediaCache {
    rows: Mutex<Vec<MediaInfo>>,
}

impl InMemoryMediaCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row_count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    fn matches_obj(row: &MediaInfo, obj: &MediaInfo) -> bool {
        let title = obj.title.as_deref().unwrap_or_default();
        let normalized = create_searchable_reference(title);
        let reference = obj.searchable_reference.as_deref().unwrap_or_default();

        let title_hit = row
            .title
            .as_deref()
            .map(|t| t.eq_ignore_ascii_case(title))
            .unwrap_or(false)
            || row
                .searchable_reference
                .as_deref()
                .map(|r| r.eq_ignore_ascii_case(&normalized) || r.eq_ignore_ascii_case(reference))
                .unwrap_or(false);
        if !title_hit {
            return false;
        }

        if row.media_type != obj.media_type {
            return false;
        }

        if let Some(year) = obj.year.filter(|y| (1888..=2100).contains(y)) {
            if row.year != Some(year) {
                return false;
            }
        }

        if obj.media_type == Some(MediaType::Tv)
            && (row.season != obj.season || row.episode != obj.episode)
        {
            return false;
        }

        true
    }
}

#[async_trait]
impl MediaCacheRepository for InMemoryMediaCache {
    async fn cache_data(&self, record: &MediaInfo) -> Result<MediaInfo, RepositoryError> {
        if record.searchable_reference.is_none()
            || record.tmdb_id.is_none()
            || record.title.is_none()
            || record.original_title.is_none()
            || record.media_type.is_none()
            || record.year.is_none()
        {
            return Err(RepositoryError::InvalidInput(
                "Missing required fields in the record".to_string(),
            ));
        }

        let mut stored = record.clone();
        stored.id = Some(Uuid::new_v4());
        stored.created_at = Some(fixed_time());
        stored.modified_at = Some(fixed_time());

        self.rows.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn update_cache(&self, record: &MediaInfo) -> Result<(), RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(row) = rows.iter_mut().find(|r| r.id == record.id) {
            *row = record.clone();
            Ok(())
        } else {
            Err(RepositoryError::NotFound("no such row".to_string()))
        }
    }

    async fn get_cached(
        &self,
        search_term: &str,
        media_type: Option<MediaType>,
        key: CacheLookupKey,
    ) -> Result<Option<MediaInfo>, RepositoryError> {
        let rows = self.rows.lock().unwrap();
        let hit = rows.iter().find(|row| {
            let field_matches = match key {
                CacheLookupKey::Id => row.id.map(|id| id.to_string()) == Some(search_term.to_string()),
                CacheLookupKey::SearchableReference => {
                    row.searchable_reference.as_deref() == Some(search_term)
                }
                CacheLookupKey::Title => row.title.as_deref() == Some(search_term),
                CacheLookupKey::TmdbId => {
                    row.tmdb_id.map(|id| id.to_string()) == Some(search_term.to_string())
                }
                CacheLookupKey::ImdbId => row.imdb_id.as_deref() == Some(search_term),
            };
            field_matches && media_type.map(|t| row.media_type == Some(t)).unwrap_or(true)
        });
        Ok(hit.cloned())
    }

    async fn get_cached_by_obj(&self, obj: &MediaInfo) -> Result<Option<MediaInfo>, RepositoryError> {
        if obj.title.is_none() || obj.media_type.is_none() {
            return Ok(None);
        }
        if obj.media_type == Some(MediaType::Tv) && (obj.season.is_none() || obj.episode.is_none()) {
            return Ok(None);
        }

        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|row| Self::matches_obj(row, obj)).cloned())
    }

    async fn get_cached_by_tmdb_id(&self, tmdb_id: i64) -> Result<Option<MediaInfo>, RepositoryError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|row| row.tmdb_id == Some(tmdb_id)).cloned())
    }

    async fn get_cached_tv_episode(
        &self,
        series_id: i64,
        season: i32,
        episode: i32,
    ) -> Result<Option<MediaInfo>, RepositoryError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .find(|row| {
                row.media_type == Some(MediaType::Tv)
                    && row.tmdb_series_id == Some(series_id)
                    && row.season == Some(season)
                    && row.episode == Some(episode)
            })
            .cloned())
    }
}

/// Scripted catalog: fixed answers keyed by title or id, with call counters
#[derive(Default)]
pub struct StubCatalog {
    pub movie_search: HashMap<String, MediaInfo>,
    pub series_search: HashMap<String, MediaInfo>,
    pub movie_details: HashMap<i64, MediaInfo>,
    pub series_details: HashMap<i64, MediaInfo>,
    pub episode_details: HashMap<(i64, i32, i32), MediaInfo>,
    pub external_ids: HashMap<i64, MediaInfo>,
    pub search_calls: AtomicUsize,
    pub detail_calls: AtomicUsize,
}

impl StubCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst) + self.detail_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogService for StubCatalog {
    async fn search_movie(&self, title: &str, _year: Option<i32>) -> Option<MediaInfo> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.movie_search.get(title).cloned()
    }

    async fn search_series(&self, title: &str, _year: Option<i32>) -> Option<MediaInfo> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.series_search.get(title).cloned()
    }

    async fn get_movie_details(&self, tmdb_id: i64) -> Option<MediaInfo> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        self.movie_details.get(&tmdb_id).cloned()
    }

    async fn get_series_details(&self, tmdb_id: i64) -> Option<MediaInfo> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        self.series_details.get(&tmdb_id).cloned()
    }

    async fn get_episode_details(
        &self,
        series_id: i64,
        season: i32,
        episode: i32,
    ) -> Option<MediaInfo> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        self.episode_details.get(&(series_id, season, episode)).cloned()
    }

    async fn get_external_ids(
        &self,
        tmdb_id: i64,
        _media_type: MediaType,
        _season: Option<i32>,
        _episode: Option<i32>,
    ) -> Option<MediaInfo> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        self.external_ids.get(&tmdb_id).cloned()
    }
}

/// Scripted language model with a call counter
#[derive(Default)]
pub struct StubLlm {
    pub media_type: Option<String>,
    pub movie_title: Option<String>,
    pub series_title: Option<String>,
    pub season_episode: Option<String>,
    pub calls: AtomicUsize,
}

impl StubLlm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmClassifier for StubLlm {
    async fn classify_media_type(&self, _file_path: &str, _request_id: Option<Uuid>) -> Option<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.media_type.clone()
    }

    async fn extract_movie_title(&self, _file_path: &str, _request_id: Option<Uuid>) -> Option<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.movie_title.clone()
    }

    async fn extract_series_title(&self, _file_path: &str, _request_id: Option<Uuid>) -> Option<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.series_title.clone()
    }

    async fn extract_season_episode(
        &self,
        _file_path: &str,
        _request_id: Option<Uuid>,
    ) -> Option<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.season_episode.clone()
    }
}

/// A scanner that never finds anything, for exercising the model fallback
pub struct BlindScanner;

impl FilenameScanner for BlindScanner {
    fn scan(&self, _file_path: &str) -> Option<MediaInfo> {
        None
    }
}
