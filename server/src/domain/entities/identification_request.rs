//! MediaIdentificationRequest - validated request construction
//!
//! A request arrives in one of two shapes: a raw file path, or an explicit
//! metadata tuple. Validation happens at construction so that no pipeline
//! stage ever sees an ill-formed request.

use chrono::{Datelike, Utc};

use crate::domain::entities::media_info::{MediaInfo, MediaInfoBuilder};
use crate::domain::value_objects::MediaType;
use crate::shared::error::DomainError;

/// How the request was expressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMode {
    Filename,
    Metadata,
}

/// A validated identification request
#[derive(Debug, Clone)]
pub struct MediaIdentificationRequest {
    pub mode: RequestMode,
    pub file_path: Option<String>,
    pub media_type: Option<MediaType>,
    pub title: Option<String>,
    pub year: Option<i32>,
    pub season: Option<i32>,
    pub episode: Option<i32>,
    pub tmdb_id: Option<i64>,
    pub tmdb_series_id: Option<i64>,
    pub imdb_id: Option<String>,
}

/// Optional catalog-id seeds for metadata requests
#[derive(Debug, Clone, Default)]
pub struct CatalogSeeds {
    pub tmdb_id: Option<i64>,
    pub tmdb_series_id: Option<i64>,
    pub imdb_id: Option<String>,
}

impl MediaIdentificationRequest {
    /// Builds a filename-mode request. Fails on blank paths.
    pub fn from_filename(file_path: &str) -> Result<Self, DomainError> {
        let trimmed = file_path.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidInput(
                "file_path must be provided for filename requests".to_string(),
            ));
        }

        Ok(Self {
            mode: RequestMode::Filename,
            file_path: Some(trimmed.to_string()),
            media_type: None,
            title: None,
            year: None,
            season: None,
            episode: None,
            tmdb_id: None,
            tmdb_series_id: None,
            imdb_id: None,
        })
    }

    /// Builds a metadata-mode request.
    ///
    /// Requires a recognized media type, a non-blank title, and a year
    /// inside the plausible range. TV requests additionally require season
    /// and episode numbers.
    pub fn from_metadata(
        media_type: &str,
        year: i32,
        title: &str,
        season: Option<i32>,
        episode: Option<i32>,
        seeds: CatalogSeeds,
    ) -> Result<Self, DomainError> {
        let media_type = MediaType::normalize(media_type).ok_or_else(|| {
            DomainError::InvalidInput(format!(
                "Invalid media_type '{}'. Supported types are 'movie' and 'tv'",
                media_type
            ))
        })?;

        let title = title.trim();
        if title.is_empty() {
            return Err(DomainError::InvalidInput(
                "title must be provided for metadata requests".to_string(),
            ));
        }

        let current_year = Utc::now().year();
        if !(1888..=current_year + 1).contains(&year) {
            return Err(DomainError::InvalidInput(format!(
                "year must be between 1888 and {}",
                current_year + 1
            )));
        }

        if media_type.is_tv() && (season.is_none() || episode.is_none()) {
            return Err(DomainError::InvalidInput(
                "season and episode must be provided for TV metadata requests".to_string(),
            ));
        }

        Ok(Self {
            mode: RequestMode::Metadata,
            file_path: None,
            media_type: Some(media_type),
            title: Some(title.to_string()),
            year: Some(year),
            season,
            episode,
            tmdb_id: seeds.tmdb_id,
            tmdb_series_id: seeds.tmdb_series_id,
            imdb_id: seeds.imdb_id,
        })
    }

    pub fn is_filename_mode(&self) -> bool {
        self.mode == RequestMode::Filename
    }

    pub fn is_metadata_mode(&self) -> bool {
        self.mode == RequestMode::Metadata
    }

    pub fn has_file_path(&self) -> bool {
        self.file_path
            .as_deref()
            .map(|p| !p.trim().is_empty())
            .unwrap_or(false)
    }

    /// Seeds the pipeline's starting record from the request fields
    pub fn seed_media_info(&self) -> MediaInfo {
        let mut builder = MediaInfoBuilder::new();

        if let Some(title) = self.title.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            builder = builder
                .with_title(title)
                .with_original_title(title)
                .with_searchable_reference(title);
        }

        if let Some(media_type) = self.media_type {
            builder = builder.with_media_type(media_type);
        }

        if let Some(year) = self.year {
            builder = builder.with_year(year);
        }

        if let Some(season) = self.season {
            builder = builder.with_season(season);
        }

        if let Some(episode) = self.episode {
            builder = builder.with_episode(episode);
        }

        if let Some(tmdb_id) = self.tmdb_id {
            builder = builder.with_tmdb_id(tmdb_id);
        }

        if let Some(tmdb_series_id) = self.tmdb_series_id {
            builder = builder.with_tmdb_series_id(tmdb_series_id);
        }

        if let Some(imdb_id) = &self.imdb_id {
            builder = builder.with_imdb_id(imdb_id.clone());
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_filename_request() {
        let request = MediaIdentificationRequest::from_filename("  some/path.mkv ").unwrap();
        assert_eq!(request.mode, RequestMode::Filename);
        assert_eq!(request.file_path.as_deref(), Some("some/path.mkv"));
        assert!(request.has_file_path());
    }

    #[test]
    fn test_blank_filename_rejected() {
        assert_matches!(
            MediaIdentificationRequest::from_filename("   "),
            Err(DomainError::InvalidInput(_))
        );
    }

    #[test]
    fn test_metadata_movie_request() {
        let request = MediaIdentificationRequest::from_metadata(
            "movie",
            1999,
            "The Matrix",
            None,
            None,
            CatalogSeeds::default(),
        )
        .unwrap();

        assert_eq!(request.media_type, Some(MediaType::Movie));
        assert_eq!(request.year, Some(1999));

        let seed = request.seed_media_info();
        assert_eq!(seed.title.as_deref(), Some("The Matrix"));
        assert_eq!(seed.searchable_reference.as_deref(), Some("The Matrix"));
    }

    #[test]
    fn test_tv_requires_season_and_episode() {
        let missing_season = MediaIdentificationRequest::from_metadata(
            "tv",
            2024,
            "Example",
            None,
            Some(1),
            CatalogSeeds::default(),
        );
        assert_matches!(missing_season, Err(DomainError::InvalidInput(_)));

        let missing_episode = MediaIdentificationRequest::from_metadata(
            "tv",
            2024,
            "Example",
            Some(1),
            None,
            CatalogSeeds::default(),
        );
        assert_matches!(missing_episode, Err(DomainError::InvalidInput(_)));

        let complete = MediaIdentificationRequest::from_metadata(
            "tv",
            2024,
            "Example",
            Some(1),
            Some(1),
            CatalogSeeds::default(),
        );
        assert!(complete.is_ok());
    }

    #[test]
    fn test_year_bounds() {
        let too_old = MediaIdentificationRequest::from_metadata(
            "movie",
            1800,
            "Ancient",
            None,
            None,
            CatalogSeeds::default(),
        );
        assert_matches!(too_old, Err(DomainError::InvalidInput(_)));

        let far_future = MediaIdentificationRequest::from_metadata(
            "movie",
            3000,
            "Distant",
            None,
            None,
            CatalogSeeds::default(),
        );
        assert_matches!(far_future, Err(DomainError::InvalidInput(_)));
    }

    #[test]
    fn test_invalid_media_type() {
        let request = MediaIdentificationRequest::from_metadata(
            "podcast",
            2020,
            "Talk",
            None,
            None,
            CatalogSeeds::default(),
        );
        assert_matches!(request, Err(DomainError::InvalidInput(_)));
    }
}
