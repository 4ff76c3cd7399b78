//! TMDB API response DTOs
//!
//! Only the fields the resolver consumes are modeled; everything else in
//! the payloads is ignored during deserialization.

use serde::Deserialize;

/// Envelope of `/search/movie` and `/search/tv`
#[derive(Debug, Deserialize)]
pub struct TmdbSearchResponse {
    #[serde(default)]
    pub results: Vec<TmdbEntity>,
}

/// A movie or series, as returned by search and details endpoints.
/// Movies use `title`/`original_title`/`release_date`; series use
/// `name`/`original_name`/`first_air_date`.
#[derive(Debug, Deserialize)]
pub struct TmdbEntity {
    pub id: i64,
    pub title: Option<String>,
    pub name: Option<String>,
    pub original_title: Option<String>,
    pub original_name: Option<String>,
    pub overview: Option<String>,
    pub tagline: Option<String>,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    pub air_date: Option<String>,
    pub original_language: Option<String>,
    pub genre_ids: Option<Vec<i64>>,
    pub genres: Option<Vec<TmdbGenre>>,
}

/// Genres appear either as bare ids (search) or as id/name objects (details)
#[derive(Debug, Deserialize)]
pub struct TmdbGenre {
    pub id: Option<i64>,
    pub name: Option<String>,
}

/// `/tv/{id}/season/{s}/episode/{e}`
#[derive(Debug, Deserialize)]
pub struct TmdbEpisode {
    pub id: i64,
    pub name: Option<String>,
    pub overview: Option<String>,
    pub season_number: Option<i32>,
    pub episode_number: Option<i32>,
    pub air_date: Option<String>,
}

/// `/{movie|tv}/{id}/external_ids`
#[derive(Debug, Deserialize)]
pub struct TmdbExternalIds {
    pub imdb_id: Option<String>,
    pub tvdb_id: Option<i64>,
    pub tvrage_id: Option<i64>,
    pub wikidata_id: Option<String>,
    pub facebook_id: Option<String>,
    pub instagram_id: Option<String>,
    pub twitter_id: Option<String>,
}
