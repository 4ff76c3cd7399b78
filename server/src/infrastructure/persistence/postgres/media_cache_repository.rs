//! Postgres Media Cache Repository
//!
//! Implements the cache contract over the `cached_media` table. Lookups by
//! title go through the normalized searchable reference so punctuation and
//! numeral-style differences still hit.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{Pool, Postgres, Row};
use tracing::debug;
use uuid::Uuid;

use crate::domain::entities::media_info::MediaInfo;
use crate::domain::repositories::{CacheLookupKey, MediaCacheRepository};
use crate::domain::value_objects::MediaType;
use crate::shared::error::RepositoryError;
use crate::shared::text::create_searchable_reference;

const SELECT_COLUMNS: &str = "id, searchable_reference, tmdb_id, tmdb_series_id, imdb_id, \
     tvdb_id, tvrage_id, wikidata_id, facebook_id, instagram_id, twitter_id, genres, title, \
     original_title, overview, episode_title, season, episode, original_language, media_type, \
     year, tagline, used_guessit, used_tmdb, used_openai, created_at, modified_at";

/// Postgres implementation of [`MediaCacheRepository`]
pub struct PgMediaCacheRepository {
    pool: Pool<Postgres>,
}

impl PgMediaCacheRepository {
    /// Creates a new repository over the shared pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    fn row_to_media_info(row: &PgRow) -> Result<MediaInfo, RepositoryError> {
        let media_type: Option<String> = row.try_get("media_type").map_err(RepositoryError::from)?;

        Ok(MediaInfo {
            id: row.try_get("id").map_err(RepositoryError::from)?,
            searchable_reference: row.try_get("searchable_reference").map_err(RepositoryError::from)?,
            tmdb_id: row.try_get("tmdb_id").map_err(RepositoryError::from)?,
            tmdb_series_id: row.try_get("tmdb_series_id").map_err(RepositoryError::from)?,
            imdb_id: row.try_get("imdb_id").map_err(RepositoryError::from)?,
            tvdb_id: row.try_get("tvdb_id").map_err(RepositoryError::from)?,
            tvrage_id: row.try_get("tvrage_id").map_err(RepositoryError::from)?,
            wikidata_id: row.try_get("wikidata_id").map_err(RepositoryError::from)?,
            facebook_id: row.try_get("facebook_id").map_err(RepositoryError::from)?,
            instagram_id: row.try_get("instagram_id").map_err(RepositoryError::from)?,
            twitter_id: row.try_get("twitter_id").map_err(RepositoryError::from)?,
            genres: row.try_get("genres").map_err(RepositoryError::from)?,
            title: row.try_get("title").map_err(RepositoryError::from)?,
            original_title: row.try_get("original_title").map_err(RepositoryError::from)?,
            overview: row.try_get("overview").map_err(RepositoryError::from)?,
            episode_title: row.try_get("episode_title").map_err(RepositoryError::from)?,
            season: row.try_get("season").map_err(RepositoryError::from)?,
            episode: row.try_get("episode").map_err(RepositoryError::from)?,
            original_language: row.try_get("original_language").map_err(RepositoryError::from)?,
            media_type: media_type.as_deref().and_then(MediaType::normalize),
            year: row.try_get("year").map_err(RepositoryError::from)?,
            tagline: row.try_get("tagline").map_err(RepositoryError::from)?,
            used_guessit: row.try_get("used_guessit").map_err(RepositoryError::from)?,
            used_tmdb: row.try_get("used_tmdb").map_err(RepositoryError::from)?,
            used_openai: row.try_get("used_openai").map_err(RepositoryError::from)?,
            created_at: row.try_get("created_at").map_err(RepositoryError::from)?,
            modified_at: row.try_get("modified_at").map_err(RepositoryError::from)?,
        })
    }

    fn require_columns(record: &MediaInfo) -> Result<(), RepositoryError> {
        let missing: Vec<&str> = [
            ("searchable_reference", record.searchable_reference.is_some()),
            ("tmdb_id", record.tmdb_id.is_some()),
            ("title", record.title.is_some()),
            ("original_title", record.original_title.is_some()),
            ("media_type", record.media_type.is_some()),
            ("year", record.year.is_some()),
        ]
        .iter()
        .filter(|(_, present)| !present)
        .map(|(name, _)| *name)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(RepositoryError::InvalidInput(format!(
                "Missing required fields in the record: {}",
                missing.join(", ")
            )))
        }
    }
}

#[async_trait]
impl MediaCacheRepository for PgMediaCacheRepository {
    async fn cache_data(&self, record: &MediaInfo) -> Result<MediaInfo, RepositoryError> {
        Self::require_columns(record)?;

        debug!(
            "Caching record with title: {}",
            record.title.as_deref().unwrap_or("[Unknown]")
        );

        let query = format!(
            r#"
            INSERT INTO cached_media (
                searchable_reference, tmdb_id, tmdb_series_id, imdb_id, tvdb_id, tvrage_id,
                wikidata_id, facebook_id, instagram_id, twitter_id, genres, title,
                original_title, overview, episode_title, season, episode, original_language,
                media_type, year, tagline, used_guessit, used_tmdb, used_openai
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16,
                    $17, $18, $19, $20, $21, $22, $23, $24)
            RETURNING {}
            "#,
            SELECT_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(&record.searchable_reference)
            .bind(record.tmdb_id)
            .bind(record.tmdb_series_id)
            .bind(&record.imdb_id)
            .bind(record.tvdb_id)
            .bind(record.tvrage_id)
            .bind(&record.wikidata_id)
            .bind(&record.facebook_id)
            .bind(&record.instagram_id)
            .bind(&record.twitter_id)
            .bind(&record.genres)
            .bind(&record.title)
            .bind(&record.original_title)
            .bind(&record.overview)
            .bind(&record.episode_title)
            .bind(record.season)
            .bind(record.episode)
            .bind(&record.original_language)
            .bind(record.media_type.map(|t| t.as_str()))
            .bind(record.year)
            .bind(&record.tagline)
            .bind(record.used_guessit)
            .bind(record.used_tmdb)
            .bind(record.used_openai)
            .fetch_one(&self.pool)
            .await?;

        Self::row_to_media_info(&row)
    }

    async fn update_cache(&self, record: &MediaInfo) -> Result<(), RepositoryError> {
        let id = record.id.ok_or_else(|| {
            RepositoryError::InvalidInput("Record must have an 'id' field to update".to_string())
        })?;

        debug!(
            "Updating cache for record with title: {}",
            record.title.as_deref().unwrap_or("[Unknown]")
        );

        sqlx::query(
            r#"
            UPDATE cached_media SET
                searchable_reference = $1, tmdb_id = $2, tmdb_series_id = $3, imdb_id = $4,
                tvdb_id = $5, tvrage_id = $6, wikidata_id = $7, facebook_id = $8,
                instagram_id = $9, twitter_id = $10, genres = $11, title = $12,
                original_title = $13, overview = $14, episode_title = $15, season = $16,
                episode = $17, original_language = $18, media_type = $19, year = $20,
                tagline = $21, used_guessit = $22, used_tmdb = $23, used_openai = $24,
                modified_at = CURRENT_TIMESTAMP
            WHERE id = $25
            "#,
        )
        .bind(&record.searchable_reference)
        .bind(record.tmdb_id)
        .bind(record.tmdb_series_id)
        .bind(&record.imdb_id)
        .bind(record.tvdb_id)
        .bind(record.tvrage_id)
        .bind(&record.wikidata_id)
        .bind(&record.facebook_id)
        .bind(&record.instagram_id)
        .bind(&record.twitter_id)
        .bind(&record.genres)
        .bind(&record.title)
        .bind(&record.original_title)
        .bind(&record.overview)
        .bind(&record.episode_title)
        .bind(record.season)
        .bind(record.episode)
        .bind(&record.original_language)
        .bind(record.media_type.map(|t| t.as_str()))
        .bind(record.year)
        .bind(&record.tagline)
        .bind(record.used_guessit)
        .bind(record.used_tmdb)
        .bind(record.used_openai)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_cached(
        &self,
        search_term: &str,
        media_type: Option<MediaType>,
        key: CacheLookupKey,
    ) -> Result<Option<MediaInfo>, RepositoryError> {
        debug!("Getting cached data for {}: {}", key.column_name(), search_term);

        // The id and tmdb_id columns are not text; bind them typed
        let row = match key {
            CacheLookupKey::Id => {
                let id = Uuid::parse_str(search_term).map_err(|_| {
                    RepositoryError::InvalidInput(format!("'{}' is not a valid id", search_term))
                })?;
                let query = format!("SELECT {} FROM cached_media WHERE id = $1", SELECT_COLUMNS);
                sqlx::query(&query).bind(id).fetch_optional(&self.pool).await?
            }
            CacheLookupKey::TmdbId => {
                let tmdb_id: i64 = search_term.parse().map_err(|_| {
                    RepositoryError::InvalidInput(format!("'{}' is not a valid tmdb id", search_term))
                })?;
                let query =
                    format!("SELECT {} FROM cached_media WHERE tmdb_id = $1", SELECT_COLUMNS);
                sqlx::query(&query).bind(tmdb_id).fetch_optional(&self.pool).await?
            }
            _ => {
                let (query, bind_type) = match media_type {
                    Some(media_type) => (
                        format!(
                            "SELECT {} FROM cached_media WHERE {} = $1 AND media_type = $2",
                            SELECT_COLUMNS,
                            key.column_name()
                        ),
                        Some(media_type.as_str()),
                    ),
                    None => (
                        format!(
                            "SELECT {} FROM cached_media WHERE {} = $1",
                            SELECT_COLUMNS,
                            key.column_name()
                        ),
                        None,
                    ),
                };

                let mut q = sqlx::query(&query).bind(search_term);
                if let Some(media_type) = bind_type {
                    q = q.bind(media_type);
                }
                q.fetch_optional(&self.pool).await?
            }
        };

        row.as_ref().map(Self::row_to_media_info).transpose()
    }

    async fn get_cached_by_obj(&self, obj: &MediaInfo) -> Result<Option<MediaInfo>, RepositoryError> {
        let title = match obj.title.as_deref() {
            Some(title) => title,
            None => return Ok(None),
        };
        let media_type = match obj.media_type {
            Some(media_type) => media_type,
            None => return Ok(None),
        };

        let normalized_title = create_searchable_reference(title);
        let reference = obj.searchable_reference.clone().unwrap_or_default();

        let mut query = format!(
            "SELECT {} FROM cached_media \
             WHERE (title ILIKE $1 OR searchable_reference ILIKE $2 OR searchable_reference ILIKE $3) \
             AND media_type ILIKE $4",
            SELECT_COLUMNS
        );

        let year = obj.year.filter(|y| (1888..=2100).contains(y));
        let tv_episode = if media_type.is_tv() {
            match (obj.season, obj.episode) {
                (Some(season), Some(episode)) => Some((season, episode)),
                // A TV lookup without season/episode can never name one row
                _ => return Ok(None),
            }
        } else {
            None
        };

        let mut next_param = 5;
        if year.is_some() {
            query.push_str(&format!(" AND year = ${}", next_param));
            next_param += 1;
        }
        if tv_episode.is_some() {
            query.push_str(&format!(
                " AND season = ${} AND episode = ${}",
                next_param,
                next_param + 1
            ));
        }
        query.push_str(" LIMIT 1");

        let mut q = sqlx::query(&query)
            .bind(title)
            .bind(&normalized_title)
            .bind(&reference)
            .bind(media_type.as_str());

        if let Some(year) = year {
            q = q.bind(year);
        }
        if let Some((season, episode)) = tv_episode {
            q = q.bind(season).bind(episode);
        }

        let row = q.fetch_optional(&self.pool).await?;
        row.as_ref().map(Self::row_to_media_info).transpose()
    }

    async fn get_cached_by_tmdb_id(&self, tmdb_id: i64) -> Result<Option<MediaInfo>, RepositoryError> {
        let query = format!("SELECT {} FROM cached_media WHERE tmdb_id = $1", SELECT_COLUMNS);
        let row = sqlx::query(&query).bind(tmdb_id).fetch_optional(&self.pool).await?;
        row.as_ref().map(Self::row_to_media_info).transpose()
    }

    async fn get_cached_tv_episode(
        &self,
        series_id: i64,
        season: i32,
        episode: i32,
    ) -> Result<Option<MediaInfo>, RepositoryError> {
        let query = format!(
            "SELECT {} FROM cached_media \
             WHERE tmdb_series_id = $1 AND season = $2 AND episode = $3 AND media_type = 'tv'",
            SELECT_COLUMNS
        );
        let row = sqlx::query(&query)
            .bind(series_id)
            .bind(season)
            .bind(episode)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(Self::row_to_media_info).transpose()
    }
}
