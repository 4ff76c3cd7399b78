//! Mapping from TMDB payloads to the domain record
//!
//! Centralizes year extraction, the genre lookup table, and the
//! field-naming differences between movie and series payloads.

use crate::domain::entities::media_info::{MediaInfo, MediaInfoBuilder};
use crate::domain::value_objects::MediaType;
use crate::infrastructure::external::tmdb::dto::{TmdbEntity, TmdbEpisode, TmdbExternalIds, TmdbGenre};

/// The fixed TMDB genre id table (movie and TV lists combined)
const GENRE_TABLE: &[(i64, &str)] = &[
    (28, "Action"),
    (12, "Adventure"),
    (16, "Animation"),
    (35, "Comedy"),
    (80, "Crime"),
    (99, "Documentary"),
    (18, "Drama"),
    (10751, "Family"),
    (14, "Fantasy"),
    (36, "History"),
    (27, "Horror"),
    (10402, "Music"),
    (9648, "Mystery"),
    (10749, "Romance"),
    (878, "Science Fiction"),
    (10770, "TV Movie"),
    (53, "Thriller"),
    (10752, "War"),
    (37, "Western"),
    (10759, "Action & Adventure"),
    (10762, "Kids"),
    (10763, "News"),
    (10764, "Reality"),
    (10765, "Sci-Fi & Fantasy"),
    (10766, "Soap"),
    (10767, "Talk"),
    (10768, "War & Politics"),
];

/// Resolve a genre id against the fixed table
pub fn genre_name(id: i64) -> Option<&'static str> {
    GENRE_TABLE.iter().find(|(gid, _)| *gid == id).map(|(_, name)| *name)
}

/// Build the genre name set from either representation TMDB uses.
/// Unknown ids and nameless objects are dropped.
pub fn map_genres(genre_ids: Option<&[i64]>, genres: Option<&[TmdbGenre]>) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();

    if let Some(ids) = genre_ids {
        for id in ids {
            if let Some(name) = genre_name(*id) {
                if !names.iter().any(|n| n == name) {
                    names.push(name.to_string());
                }
            }
        }
    }

    if let Some(objects) = genres {
        for genre in objects {
            if let Some(name) = &genre.name {
                if !names.iter().any(|n| n == name) {
                    names.push(name.clone());
                }
            } else if let Some(id) = genre.id {
                if let Some(name) = genre_name(id) {
                    if !names.iter().any(|n| n == name) {
                        names.push(name.to_string());
                    }
                }
            }
        }
    }

    names
}

/// The year is the first four characters of the first populated date field,
/// in preference order `release_date`, `first_air_date`, `air_date`.
pub fn extract_year(entity: &TmdbEntity) -> Option<i32> {
    for date in [&entity.release_date, &entity.first_air_date, &entity.air_date] {
        if let Some(value) = date.as_deref().filter(|d| !d.is_empty()) {
            return value.get(..4).and_then(|y| y.parse().ok());
        }
    }
    None
}

fn base_builder(entity: &TmdbEntity) -> MediaInfoBuilder {
    let title = entity.title.as_deref().or(entity.name.as_deref());
    let original_title = entity
        .original_title
        .as_deref()
        .or(entity.original_name.as_deref());

    let mut builder = MediaInfoBuilder::new().with_tmdb_id(entity.id).with_used_tmdb(true);

    if let Some(title) = title.map(str::trim).filter(|t| !t.is_empty()) {
        builder = builder.with_title(title).with_searchable_reference(title);
    }

    if let Some(original_title) = original_title.map(str::trim).filter(|t| !t.is_empty()) {
        builder = builder.with_original_title(original_title);
    }

    if let Some(overview) = entity.overview.as_deref().filter(|o| !o.is_empty()) {
        builder = builder.with_overview(overview);
    }

    if let Some(tagline) = entity.tagline.as_deref().filter(|t| !t.is_empty()) {
        builder = builder.with_tagline(tagline);
    }

    if let Some(language) = entity.original_language.as_deref().filter(|l| !l.is_empty()) {
        builder = builder.with_original_language(language);
    }

    if let Some(year) = extract_year(entity) {
        builder = builder.with_year(year);
    }

    let genres = map_genres(entity.genre_ids.as_deref(), entity.genres.as_deref());
    if !genres.is_empty() {
        builder = builder.with_genres(genres);
    }

    builder
}

/// A movie search hit or movie details payload
pub fn map_movie(entity: &TmdbEntity) -> MediaInfo {
    base_builder(entity).with_media_type(MediaType::Movie).build()
}

/// A series search hit or series details payload. The catalog id names the
/// series itself, so it lands in both `tmdb_id` and `tmdb_series_id`.
pub fn map_series(entity: &TmdbEntity) -> MediaInfo {
    base_builder(entity)
        .with_media_type(MediaType::Tv)
        .with_tmdb_series_id(entity.id)
        .build()
}

/// An episode payload. Here `tmdb_id` is the episode's own id.
pub fn map_episode(episode: &TmdbEpisode, series_id: i64, season: i32, episode_number: i32) -> MediaInfo {
    let mut builder = MediaInfoBuilder::new()
        .with_media_type(MediaType::Tv)
        .with_tmdb_id(episode.id)
        .with_tmdb_series_id(series_id)
        .with_season(episode.season_number.unwrap_or(season))
        .with_episode(episode.episode_number.unwrap_or(episode_number))
        .with_used_tmdb(true);

    if let Some(name) = episode.name.as_deref().filter(|n| !n.is_empty()) {
        builder = builder.with_episode_title(name);
    }

    if let Some(overview) = episode.overview.as_deref().filter(|o| !o.is_empty()) {
        builder = builder.with_overview(overview);
    }

    if let Some(year) = episode
        .air_date
        .as_deref()
        .filter(|d| !d.is_empty())
        .and_then(|d| d.get(..4))
        .and_then(|y| y.parse().ok())
    {
        builder = builder.with_year(year);
    }

    builder.build()
}

/// An external-ids payload. The requested `tmdb_id` is echoed back so the
/// merge never invents a different catalog id.
pub fn map_external_ids(ids: &TmdbExternalIds, tmdb_id: i64) -> MediaInfo {
    let mut builder = MediaInfoBuilder::new().with_tmdb_id(tmdb_id).with_used_tmdb(true);

    if let Some(imdb_id) = ids.imdb_id.as_deref().filter(|v| !v.is_empty()) {
        builder = builder.with_imdb_id(imdb_id);
    }
    if let Some(tvdb_id) = ids.tvdb_id {
        builder = builder.with_tvdb_id(tvdb_id);
    }
    if let Some(tvrage_id) = ids.tvrage_id {
        builder = builder.with_tvrage_id(tvrage_id);
    }
    if let Some(wikidata_id) = ids.wikidata_id.as_deref().filter(|v| !v.is_empty()) {
        builder = builder.with_wikidata_id(wikidata_id);
    }
    if let Some(facebook_id) = ids.facebook_id.as_deref().filter(|v| !v.is_empty()) {
        builder = builder.with_facebook_id(facebook_id);
    }
    if let Some(instagram_id) = ids.instagram_id.as_deref().filter(|v| !v.is_empty()) {
        builder = builder.with_instagram_id(instagram_id);
    }
    if let Some(twitter_id) = ids.twitter_id.as_deref().filter(|v| !v.is_empty()) {
        builder = builder.with_twitter_id(twitter_id);
    }

    builder.build()
}
