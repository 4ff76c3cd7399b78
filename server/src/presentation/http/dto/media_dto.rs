//! HTTP response shape for media records
//!
//! Everything serializes to JSON-safe primitives: uuids and timestamps
//! become strings, the media type becomes its token, absent fields become
//! null.

use serde::Serialize;

use crate::domain::entities::media_info::MediaInfo;

/// JSON representation of an identified media record
#[derive(Debug, Serialize)]
pub struct MediaInfoResponse {
    pub id: Option<String>,
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
    pub media_type: Option<String>,
    pub year: Option<i32>,
    pub tagline: Option<String>,
    pub used_guessit: bool,
    pub used_tmdb: bool,
    pub used_openai: bool,
    pub created_at: Option<String>,
    pub modified_at: Option<String>,
}

impl From<&MediaInfo> for MediaInfoResponse {
    fn from(media: &MediaInfo) -> Self {
        Self {
            id: media.id.map(|id| id.to_string()),
            searchable_reference: media.searchable_reference.clone(),
            tmdb_id: media.tmdb_id,
            tmdb_series_id: media.tmdb_series_id,
            imdb_id: media.imdb_id.clone(),
            tvdb_id: media.tvdb_id,
            tvrage_id: media.tvrage_id,
            wikidata_id: media.wikidata_id.clone(),
            facebook_id: media.facebook_id.clone(),
            instagram_id: media.instagram_id.clone(),
            twitter_id: media.twitter_id.clone(),
            genres: media.genres.clone(),
            title: media.title.clone(),
            original_title: media.original_title.clone(),
            overview: media.overview.clone(),
            episode_title: media.episode_title.clone(),
            season: media.season,
            episode: media.episode,
            original_language: media.original_language.clone(),
            media_type: media.media_type.map(|t| t.as_str().to_string()),
            year: media.year,
            tagline: media.tagline.clone(),
            used_guessit: media.used_guessit,
            used_tmdb: media.used_tmdb,
            used_openai: media.used_openai,
            created_at: media.created_at.map(|t| t.to_rfc3339()),
            modified_at: media.modified_at.map(|t| t.to_rfc3339()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::MediaType;

    #[test]
    fn test_serialization_is_json_safe() {
        let media = MediaInfo::builder()
            .with_title("The Matrix")
            .with_media_type(MediaType::Movie)
            .with_tmdb_id(603)
            .with_year(1999)
            .build();

        let response = MediaInfoResponse::from(&media);
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["title"], "The Matrix");
        assert_eq!(value["media_type"], "movie");
        assert_eq!(value["tmdb_id"], 603);
        assert_eq!(value["id"], serde_json::Value::Null);
        assert_eq!(value["used_tmdb"], false);
    }
}
