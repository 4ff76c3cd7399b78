//! # Filename Parser
//!
//! A guessit-inspired media filename parser in pure Rust, extended with a
//! path scanner that decides *which* part of a path is worth parsing.
//!
//! ## Quick Start
//!
//! ```rust
//! use filename_parser::scan_path;
//!
//! let result = scan_path("Breaking.Bad.S05E14.720p.HDTV.x264-IMMERSE.mkv").unwrap();
//!
//! assert_eq!(result.title.as_deref(), Some("Breaking Bad"));
//! assert_eq!(result.season, Some(5));
//! assert_eq!(result.episode, Some(14));
//! ```
//!
//! ## Architecture
//!
//! 1. **Candidate generation**: split the path into segments, drop mount
//!    points, asset sidecars and scene-shorthand files, and walk from the
//!    deepest segment outward.
//! 2. **Pattern matching**: find season/episode markers, years, and the
//!    release-tag vocabulary in each candidate.
//! 3. **Conflict resolution**: overlapping matches resolved by priority.
//! 4. **Title extraction**: the title is read from the unmatched regions.
//! 5. **Scoring**: candidates are ranked by title substance, structure
//!    found, and path noise; the best parse wins.

pub mod parser;
pub mod patterns;
pub mod scan;
pub mod types;
pub mod vocab;

pub use parser::SegmentParser;
pub use scan::scan_path;
pub use types::{Match, MatchCategory, MediaType, ParsedMedia};
