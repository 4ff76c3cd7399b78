use serde::{Deserialize, Serialize};
use std::fmt;

/// The type of media detected from a filename
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Episode,
    Unknown,
}

impl Default for MediaType {
    fn default() -> Self {
        MediaType::Unknown
    }
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Episode => "episode",
            MediaType::Unknown => "unknown",
        }
    }
}

/// Categories of matched patterns within a filename segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub enum MatchCategory {
    Year,
    Episode,
    Quality,
    Source,
    Codec,
    Audio,
    ReleaseGroup,
    Noise,
    Container,
}

impl MatchCategory {
    /// Priority for conflict resolution (higher wins)
    pub fn priority(&self) -> u8 {
        match self {
            MatchCategory::Episode => 100,
            MatchCategory::Container => 100,
            MatchCategory::ReleaseGroup => 95,
            MatchCategory::Year => 90,
            MatchCategory::Quality => 80,
            MatchCategory::Source => 75,
            MatchCategory::Codec => 70,
            MatchCategory::Audio => 65,
            MatchCategory::Noise => 50,
        }
    }
}

/// A match found in the input string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// Start byte position in original string
    pub start: usize,
    /// End byte position (exclusive) in original string
    pub end: usize,
    /// The matched text
    pub value: String,
    /// Normalized value (e.g. "S01E05" -> "1|5")
    pub raw: String,
    /// Category of this match
    pub category: MatchCategory,
}

impl Match {
    pub fn new(start: usize, end: usize, value: impl Into<String>, category: MatchCategory) -> Self {
        let value = value.into();
        Self {
            start,
            end,
            raw: value.clone(),
            value,
            category,
        }
    }

    pub fn with_raw(mut self, raw: impl Into<String>) -> Self {
        self.raw = raw.into();
        self
    }

    /// Check if this match overlaps with another
    pub fn overlaps(&self, other: &Match) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}[{}..{}]='{}'", self.category, self.start, self.end, self.value)
    }
}

/// The structured result of parsing a single filename segment or a full path
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedMedia {
    /// Original input string
    pub original: String,

    /// Detected media type
    pub media_type: MediaType,

    /// Extracted title
    pub title: Option<String>,

    /// Release year
    pub year: Option<i32>,

    /// Season number (TV only)
    pub season: Option<i32>,

    /// Episode number (TV only)
    pub episode: Option<i32>,

    /// Episode title, when one is recognizable after the episode marker
    pub episode_title: Option<String>,

    /// File container/extension
    pub container: Option<String>,
}

impl ParsedMedia {
    /// True when the parse produced at least a usable title
    pub fn has_title(&self) -> bool {
        self.title.as_deref().map(|t| !t.trim().is_empty()).unwrap_or(false)
    }
}

