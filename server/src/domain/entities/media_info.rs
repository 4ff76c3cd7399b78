//! MediaInfo - the canonical identification record
//!
//! Every pipeline stage reads and contributes to one of these. Fields stay
//! optional while evidence accumulates; the cache layer enforces which of
//! them must be present before a record persists.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::MediaType;
use crate::shared::text::create_searchable_reference;

/// The canonical in-memory media record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaInfo {
    pub id: Option<Uuid>,
    pub searchable_reference: Option<String>,
    pub tmdb_id: Option<i64>,
    pub tmdb_series_id: Option<i64>,
    pub imdb_id: Option<String>,
    pub tvdb_id: Option<i64>,
    pub tvrage_id: Option<i64>,
    pub wikidata_id: Option<String>,
    pub facebook_id: Option<String>,
    pub instagram_id: Option<String>,
    pub twitter_id: Option<String>,
    pub genres: Option<Vec<String>>,
    pub title: Option<String>,
    pub original_title: Option<String>,
    pub overview: Option<String>,
    pub episode_title: Option<String>,
    pub season: Option<i32>,
    pub episode: Option<i32>,
    pub original_language: Option<String>,
    pub media_type: Option<MediaType>,
    pub year: Option<i32>,
    pub tagline: Option<String>,
    pub used_guessit: bool,
    pub used_tmdb: bool,
    pub used_openai: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl MediaInfo {
    pub fn builder() -> MediaInfoBuilder {
        MediaInfoBuilder::new()
    }

    /// True when the record names a valid media type
    pub fn has_valid_media_type(&self) -> bool {
        self.media_type.is_some()
    }

    pub fn is_movie(&self) -> bool {
        matches!(self.media_type, Some(MediaType::Movie))
    }

    pub fn is_tv(&self) -> bool {
        matches!(self.media_type, Some(MediaType::Tv))
    }
}

/// Merge two records, right-biased for data, left-protected for provenance.
///
/// Every populated field of `new` overwrites the corresponding field of
/// `existing`, except the `used_*` provenance flags which only ever turn on.
pub fn merge_media_info(existing: &MediaInfo, new: &MediaInfo) -> MediaInfo {
    let mut merged = existing.clone();

    merge_field(&mut merged.id, &new.id);
    merge_field(&mut merged.searchable_reference, &new.searchable_reference);
    merge_field(&mut merged.tmdb_id, &new.tmdb_id);
    merge_field(&mut merged.tmdb_series_id, &new.tmdb_series_id);
    merge_field(&mut merged.imdb_id, &new.imdb_id);
    merge_field(&mut merged.tvdb_id, &new.tvdb_id);
    merge_field(&mut merged.tvrage_id, &new.tvrage_id);
    merge_field(&mut merged.wikidata_id, &new.wikidata_id);
    merge_field(&mut merged.facebook_id, &new.facebook_id);
    merge_field(&mut merged.instagram_id, &new.instagram_id);
    merge_field(&mut merged.twitter_id, &new.twitter_id);
    merge_field(&mut merged.genres, &new.genres);
    merge_field(&mut merged.title, &new.title);
    merge_field(&mut merged.original_title, &new.original_title);
    merge_field(&mut merged.overview, &new.overview);
    merge_field(&mut merged.episode_title, &new.episode_title);
    merge_field(&mut merged.season, &new.season);
    merge_field(&mut merged.episode, &new.episode);
    merge_field(&mut merged.original_language, &new.original_language);
    merge_field(&mut merged.media_type, &new.media_type);
    merge_field(&mut merged.year, &new.year);
    merge_field(&mut merged.tagline, &new.tagline);
    merge_field(&mut merged.created_at, &new.created_at);
    merge_field(&mut merged.modified_at, &new.modified_at);

    // Provenance flags are OR-monotonic: once a resolver contributed, the
    // fact is never un-learned.
    merged.used_guessit = existing.used_guessit || new.used_guessit;
    merged.used_tmdb = existing.used_tmdb || new.used_tmdb;
    merged.used_openai = existing.used_openai || new.used_openai;

    merged
}

fn merge_field<T: Clone>(target: &mut Option<T>, new: &Option<T>) {
    if let Some(value) = new {
        *target = Some(value.clone());
    }
}

/// Fluent builder for [`MediaInfo`]
///
/// Setters that accept raw outside data normalize on the way in: the
/// searchable reference runs through the text normalizer and the media type
/// through the vocabulary.
#[derive(Debug, Default)]
pub struct MediaInfoBuilder {
    record: MediaInfo,
}

impl MediaInfoBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.record.id = Some(id);
        self
    }

    /// Derives the searchable reference from the given title form.
    /// Blank input leaves the reference unset.
    pub fn with_searchable_reference(mut self, reference: &str) -> Self {
        if reference.trim().is_empty() {
            return self;
        }
        self.record.searchable_reference = Some(create_searchable_reference(reference));
        self
    }

    pub fn with_tmdb_id(mut self, tmdb_id: i64) -> Self {
        self.record.tmdb_id = Some(tmdb_id);
        self
    }

    pub fn with_tmdb_series_id(mut self, tmdb_series_id: i64) -> Self {
        self.record.tmdb_series_id = Some(tmdb_series_id);
        self
    }

    pub fn with_imdb_id(mut self, imdb_id: impl Into<String>) -> Self {
        self.record.imdb_id = Some(imdb_id.into());
        self
    }

    pub fn with_tvdb_id(mut self, tvdb_id: i64) -> Self {
        self.record.tvdb_id = Some(tvdb_id);
        self
    }

    pub fn with_tvrage_id(mut self, tvrage_id: i64) -> Self {
        self.record.tvrage_id = Some(tvrage_id);
        self
    }

    pub fn with_wikidata_id(mut self, wikidata_id: impl Into<String>) -> Self {
        self.record.wikidata_id = Some(wikidata_id.into());
        self
    }

    pub fn with_facebook_id(mut self, facebook_id: impl Into<String>) -> Self {
        self.record.facebook_id = Some(facebook_id.into());
        self
    }

    pub fn with_instagram_id(mut self, instagram_id: impl Into<String>) -> Self {
        self.record.instagram_id = Some(instagram_id.into());
        self
    }

    pub fn with_twitter_id(mut self, twitter_id: impl Into<String>) -> Self {
        self.record.twitter_id = Some(twitter_id.into());
        self
    }

    pub fn with_genres(mut self, genres: Vec<String>) -> Self {
        if genres.is_empty() {
            self.record.genres = None;
        } else {
            self.record.genres = Some(genres);
        }
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.record.title = Some(title.into());
        self
    }

    pub fn with_original_title(mut self, original_title: impl Into<String>) -> Self {
        self.record.original_title = Some(original_title.into());
        self
    }

    pub fn with_overview(mut self, overview: impl Into<String>) -> Self {
        self.record.overview = Some(overview.into());
        self
    }

    pub fn with_episode_title(mut self, episode_title: impl Into<String>) -> Self {
        self.record.episode_title = Some(episode_title.into());
        self
    }

    pub fn with_season(mut self, season: i32) -> Self {
        self.record.season = Some(season);
        self
    }

    pub fn with_episode(mut self, episode: i32) -> Self {
        self.record.episode = Some(episode);
        self
    }

    pub fn with_original_language(mut self, original_language: impl Into<String>) -> Self {
        self.record.original_language = Some(original_language.into());
        self
    }

    /// Sets the media type through the vocabulary; unrecognized tokens
    /// leave the field unset.
    pub fn with_media_type_token(mut self, media_type: &str) -> Self {
        self.record.media_type = MediaType::normalize(media_type);
        self
    }

    pub fn with_media_type(mut self, media_type: MediaType) -> Self {
        self.record.media_type = Some(media_type);
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.record.year = Some(year);
        self
    }

    pub fn with_tagline(mut self, tagline: impl Into<String>) -> Self {
        self.record.tagline = Some(tagline.into());
        self
    }

    pub fn with_used_guessit(mut self, used_guessit: bool) -> Self {
        self.record.used_guessit = used_guessit;
        self
    }

    pub fn with_used_tmdb(mut self, used_tmdb: bool) -> Self {
        self.record.used_tmdb = used_tmdb;
        self
    }

    pub fn with_used_openai(mut self, used_openai: bool) -> Self {
        self.record.used_openai = used_openai;
        self
    }

    pub fn build(self) -> MediaInfo {
        self.record
    }
}

/// Applies the title/type/year/season/episode attributes shared by every
/// resolver's output, deriving the searchable reference from the title.
pub fn apply_basic_media_attributes(
    mut builder: MediaInfoBuilder,
    title: Option<&str>,
    media_type: Option<&str>,
    year: Option<i32>,
    season: Option<i32>,
    episode: Option<i32>,
) -> MediaInfoBuilder {
    if let Some(title) = title.map(str::trim).filter(|t| !t.is_empty()) {
        builder = builder
            .with_title(title)
            .with_original_title(title)
            .with_searchable_reference(title);
    }

    if let Some(media_type) = media_type {
        builder = builder.with_media_type_token(media_type);
    }

    if let Some(year) = year {
        builder = builder.with_year(year);
    }

    if let Some(season) = season {
        builder = builder.with_season(season);
    }

    if let Some(episode) = episode {
        builder = builder.with_episode(episode);
    }

    builder
}
