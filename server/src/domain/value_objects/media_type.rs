//! MediaType value object
//!
//! The closed vocabulary of media kinds the pipeline can identify. Any
//! user- or model-supplied token is normalized through [`MediaType::normalize`];
//! unrecognized tokens stay unrecognized rather than defaulting.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::shared::error::DomainError;

/// Media type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    /// Full-length movie
    Movie,
    /// TV series episode
    Tv,
}

impl MediaType {
    /// Returns the string representation of the media type
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
        }
    }

    /// Checks if this is a movie
    pub fn is_movie(&self) -> bool {
        matches!(self, MediaType::Movie)
    }

    /// Checks if this is a TV episode
    pub fn is_tv(&self) -> bool {
        matches!(self, MediaType::Tv)
    }

    /// Normalizes an arbitrary token to a media type.
    ///
    /// Accepts the alias vocabulary ("series", "episode", "film", ...) with
    /// `-`/`_` treated as spaces. Returns `None` for anything else.
    pub fn normalize(value: &str) -> Option<MediaType> {
        let normalized = value.trim().to_lowercase();
        if normalized.is_empty() {
            return None;
        }

        let spaced = normalized.replace(['-', '_'], " ").trim().to_string();
        let squeezed = spaced.replace(' ', "");

        match squeezed.as_str() {
            "tv" | "tvshow" | "tvshows" | "series" | "episode" | "scripted" => Some(MediaType::Tv),
            "film" | "movie" | "movies" => Some(MediaType::Movie),
            _ => None,
        }
    }

    /// True when the token normalizes to a recognized media type
    pub fn is_valid(value: &str) -> bool {
        Self::normalize(value).is_some()
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MediaType::normalize(s)
            .ok_or_else(|| DomainError::InvalidInput(format!("Invalid media type: {}", s)))
    }
}
