//! FilenameScanner - deterministic identification from file paths
//!
//! Wraps the filename-parser crate behind a seam the pipeline can stub in
//! tests, and maps its parse result into the domain record shape.

use filename_parser::{scan_path, ParsedMedia};

use crate::domain::entities::media_info::{apply_basic_media_attributes, MediaInfo, MediaInfoBuilder};

/// Deterministic extraction of media attributes from a path
pub trait FilenameScanner: Send + Sync {
    /// Returns the best parse of the path, or `None` when nothing in the
    /// path looks like a media name. Absence is not an error.
    fn scan(&self, file_path: &str) -> Option<MediaInfo>;
}

/// Default implementation backed by the filename-parser crate
pub struct GuessItScanner;

impl GuessItScanner {
    pub fn new() -> Self {
        Self
    }

    fn record_from_parse(parsed: &ParsedMedia) -> MediaInfo {
        let mut builder = apply_basic_media_attributes(
            MediaInfoBuilder::new(),
            parsed.title.as_deref(),
            Some(parsed.media_type.as_str()),
            parsed.year,
            parsed.season,
            parsed.episode,
        );

        if let Some(episode_title) = parsed.episode_title.as_deref() {
            builder = builder.with_episode_title(episode_title);
        }

        builder.with_used_guessit(true).build()
    }
}

impl Default for GuessItScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl FilenameScanner for GuessItScanner {
    fn scan(&self, file_path: &str) -> Option<MediaInfo> {
        let parsed = scan_path(file_path)?;
        Some(Self::record_from_parse(&parsed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::MediaType;

    #[test]
    fn test_scan_movie_path() {
        let record = GuessItScanner::new()
            .scan("The.Matrix.1999.1080p.BluRay.x264.mkv")
            .unwrap();

        assert_eq!(record.title.as_deref(), Some("The Matrix"));
        assert_eq!(record.year, Some(1999));
        assert_eq!(record.media_type, Some(MediaType::Movie));
        assert!(record.used_guessit);
        assert!(!record.used_tmdb);
    }

    #[test]
    fn test_scan_episode_path_maps_to_tv() {
        let record = GuessItScanner::new().scan("Friends.2x11.480p.DVD.x264-SAiNTS.mkv").unwrap();

        // The parser reports "episode"; the vocabulary folds it into tv
        assert_eq!(record.media_type, Some(MediaType::Tv));
        assert_eq!(record.season, Some(2));
        assert_eq!(record.episode, Some(11));
    }

    #[test]
    fn test_scan_useless_path() {
        assert!(GuessItScanner::new().scan("tmp/subs/01.srt").is_none());
    }
}
