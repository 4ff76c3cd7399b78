use lazy_static::lazy_static;
use regex::Regex;

use crate::patterns::{ConflictResolver, PatternRegistry};
use crate::types::{Match, MatchCategory, MediaType, ParsedMedia};
use crate::vocab;

lazy_static! {
    // A title that drags a release year along at its end, e.g.
    // "The Matrix 1999" or "Parasite (2019)"
    static ref TRAILING_YEAR_PATTERN: Regex =
        Regex::new(r"^(?P<title>.*?)[\s\[\(\-]+(?P<year>(?:18|19|20)\d{2})[\]\)\s]*$").unwrap();
    static ref MULTI_SPACE: Regex = Regex::new(r"\s{2,}").unwrap();
}

/// The deterministic per-segment parser.
///
/// Runs pattern matching over one filename segment, resolves overlapping
/// matches by priority, and reads the title out of the unmatched regions.
pub struct SegmentParser;

impl SegmentParser {
    /// Parse a single filename segment (no path separators expected)
    pub fn parse(input: &str) -> ParsedMedia {
        let (name, container) = Self::strip_extension(input);

        let all_matches = PatternRegistry::find_all_matches(&name);
        let resolved = ConflictResolver::resolve(all_matches);

        let title = Self::extract_title(&name, &resolved);
        let episode_title = Self::extract_episode_title(&name, &resolved);
        let (season, episode) = Self::extract_season_episode(&resolved);
        let year = Self::extract_year(&resolved);
        let media_type = Self::detect_media_type(&resolved);

        let mut parsed = ParsedMedia {
            original: input.to_string(),
            media_type,
            title,
            year,
            season,
            episode,
            episode_title,
            container,
        };

        Self::strip_trailing_title_year(&mut parsed);
        Self::drop_implausible_year(&mut parsed);

        parsed
    }

    fn strip_extension(input: &str) -> (String, Option<String>) {
        let (stem, extension) = vocab::split_stem_and_extension(input);
        (stem.to_string(), extension)
    }

    /// The title lives in the first unmatched region of the segment
    fn extract_title(input: &str, matches: &[Match]) -> Option<String> {
        for hole in Self::find_holes(input, matches) {
            let cleaned = Self::clean_title(&hole);
            if !cleaned.is_empty() {
                return Some(cleaned);
            }
        }
        None
    }

    /// Text between the episode marker and the next match is usually the
    /// episode title ("Lost.S01E01.Pilot.1080p..." -> "Pilot")
    fn extract_episode_title(input: &str, matches: &[Match]) -> Option<String> {
        let episode_end = matches
            .iter()
            .find(|m| m.category == MatchCategory::Episode)
            .map(|m| m.end)?;

        let next_start = matches
            .iter()
            .filter(|m| m.start >= episode_end)
            .map(|m| m.start)
            .min()
            .unwrap_or(input.len());

        let candidate = Self::clean_title(&input[episode_end..next_start]);
        if candidate.is_empty() {
            None
        } else {
            Some(candidate)
        }
    }

    fn find_holes(input: &str, matches: &[Match]) -> Vec<String> {
        let mut holes = Vec::new();
        let mut cursor = 0;

        for m in matches {
            if m.start > cursor {
                holes.push(input[cursor..m.start].to_string());
            }
            cursor = cursor.max(m.end);
        }
        if cursor < input.len() {
            holes.push(input[cursor..].to_string());
        }

        holes
    }

    fn clean_title(raw: &str) -> String {
        let spaced: String = raw
            .chars()
            .map(|c| if c == '.' || c == '_' { ' ' } else { c })
            .collect();
        let trimmed = spaced.trim_matches(|c: char| c.is_whitespace() || "-([".contains(c));
        MULTI_SPACE.replace_all(trimmed, " ").trim().to_string()
    }

    fn extract_season_episode(matches: &[Match]) -> (Option<i32>, Option<i32>) {
        let raw = match matches.iter().find(|m| m.category == MatchCategory::Episode) {
            Some(m) => &m.raw,
            None => return (None, None),
        };

        let mut parts = raw.split('|');
        let season = parts.next().and_then(|s| s.parse().ok());
        let episode = parts.next().and_then(|e| e.parse().ok());
        (season, episode)
    }

    /// Years after an episode marker are usually episode titles ("1969",
    /// "2010"); only a year before the marker identifies the release.
    fn extract_year(matches: &[Match]) -> Option<i32> {
        let episode_pos = matches
            .iter()
            .find(|m| m.category == MatchCategory::Episode)
            .map(|m| m.start);

        matches
            .iter()
            .find(|m| {
                m.category == MatchCategory::Year
                    && episode_pos.map(|pos| m.start < pos).unwrap_or(true)
            })
            .and_then(|m| m.value.parse().ok())
    }

    fn detect_media_type(matches: &[Match]) -> MediaType {
        if matches.iter().any(|m| m.category == MatchCategory::Episode) {
            MediaType::Episode
        } else if matches.iter().any(|m| m.category == MatchCategory::Year) {
            MediaType::Movie
        } else {
            MediaType::Unknown
        }
    }

    /// When the extracted title still carries a trailing release year, strip
    /// it and promote it to the year field if the parse found none.
    fn strip_trailing_title_year(parsed: &mut ParsedMedia) {
        let title = match parsed.title.as_deref() {
            Some(t) => t.trim().to_string(),
            None => return,
        };

        let caps = match TRAILING_YEAR_PATTERN.captures(&title) {
            Some(c) => c,
            None => return,
        };

        let cleaned = caps["title"]
            .trim_matches(|c: char| c.is_whitespace() || "-_.([".contains(c))
            .to_string();
        let cleaned = MULTI_SPACE.replace_all(&cleaned, " ").trim().to_string();
        if cleaned.is_empty() {
            return;
        }

        let year: Option<i32> = caps["year"].parse().ok();

        parsed.title = Some(cleaned);
        if parsed.year.is_none() {
            parsed.year = year;
        }
    }

    fn drop_implausible_year(parsed: &mut ParsedMedia) {
        if let Some(year) = parsed.year {
            if !vocab::is_plausible_year(year) {
                parsed.year = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_movie_basic() {
        let result = SegmentParser::parse("The.Matrix.1999.1080p.BluRay.x264.DTS-FGT.mkv");

        assert_eq!(result.media_type, MediaType::Movie);
        assert_eq!(result.title.as_deref(), Some("The Matrix"));
        assert_eq!(result.year, Some(1999));
        assert_eq!(result.container.as_deref(), Some("mkv"));
    }

    #[test]
    fn test_tv_show_basic() {
        let result = SegmentParser::parse("Breaking.Bad.S05E14.720p.HDTV.x264-IMMERSE.mkv");

        assert_eq!(result.media_type, MediaType::Episode);
        assert_eq!(result.title.as_deref(), Some("Breaking Bad"));
        assert_eq!(result.season, Some(5));
        assert_eq!(result.episode, Some(14));
    }

    #[test]
    fn test_cross_notation() {
        let result = SegmentParser::parse("Friends.2x11.480p.DVD.x264-SAiNTS.mkv");

        assert_eq!(result.media_type, MediaType::Episode);
        assert_eq!(result.title.as_deref(), Some("Friends"));
        assert_eq!(result.season, Some(2));
        assert_eq!(result.episode, Some(11));
    }

    #[test]
    fn test_episode_title() {
        let result = SegmentParser::parse("Lost.S01E01.Pilot.1080p.BluRay.x264-ROVERS.mkv");

        assert_eq!(result.title.as_deref(), Some("Lost"));
        assert_eq!(result.episode_title.as_deref(), Some("Pilot"));
    }

    #[test]
    fn test_trailing_year_in_title() {
        let result = SegmentParser::parse("The Shawshank Redemption 1994");

        assert_eq!(result.title.as_deref(), Some("The Shawshank Redemption"));
        assert_eq!(result.year, Some(1994));
        assert_eq!(result.media_type, MediaType::Movie);
    }

    #[test]
    fn test_year_after_episode_marker_ignored() {
        let result = SegmentParser::parse("Show.S02E05.1969.720p.mkv");

        assert_eq!(result.season, Some(2));
        assert_eq!(result.episode, Some(5));
        assert_eq!(result.year, None);
    }

    #[test]
    fn test_year_before_episode_marker_kept() {
        let result = SegmentParser::parse("Chernobyl.2019.S01E03.720p.WEB-DL.x264-MEMENTO.mkv");

        assert_eq!(result.title.as_deref(), Some("Chernobyl"));
        assert_eq!(result.year, Some(2019));
        assert_eq!(result.season, Some(1));
        assert_eq!(result.episode, Some(3));
    }

    #[test]
    fn test_plain_words_have_no_type() {
        let result = SegmentParser::parse("Some Random Words");

        assert_eq!(result.media_type, MediaType::Unknown);
        assert_eq!(result.title.as_deref(), Some("Some Random Words"));
        assert_eq!(result.year, None);
    }

    #[test]
    fn test_no_title_when_all_tags() {
        let result = SegmentParser::parse("1080p.BluRay.x264");
        assert!(result.title.is_none() || !result.has_title());
    }
}
