use crate::types::{Match, MatchCategory};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Season/episode patterns, most specific first
    static ref SEASON_EPISODE_PATTERNS: Vec<Regex> = vec![
        // S01E01, S1E5, S01E01E02, S01.E03, S01 E03
        Regex::new(r"(?i)\bS(\d{1,2})[.\s]?E(\d{1,3})(?:E(\d{1,3}))?\b").unwrap(),
        // S01E01-E02
        Regex::new(r"(?i)\bS(\d{1,2})E(\d{1,3})-E?(\d{1,3})\b").unwrap(),
        // 1x01 format
        Regex::new(r"(?i)\b(\d{1,2})x(\d{1,3})\b").unwrap(),
    ];

    // Year pattern (4 digits, era of recorded film)
    static ref YEAR_PATTERN: Regex = Regex::new(r"\b((?:18|19|20)\d{2})\b").unwrap();

    // Release tags, grouped by category
    static ref QUALITY_PATTERN: Regex =
        Regex::new(r"(?i)\b(2160p|1080[pi]|720p|576p|480p|4K|UHD|10bit|HDR10\+?|HDR)\b").unwrap();
    static ref SOURCE_PATTERN: Regex = Regex::new(
        r"(?i)\b(BluRay|Blu-Ray|BDRip|BRRip|WEB-?DL|WEBRip|WEB|HDTV|PDTV|DVDRip|DVDR|DVD|HDRip|REMUX)\b"
    )
    .unwrap();
    static ref CODEC_PATTERN: Regex =
        Regex::new(r"(?i)\b([Hx]\.?26[45]|HEVC|XviD|DivX|AV1|VP9)\b").unwrap();
    static ref AUDIO_PATTERN: Regex = Regex::new(
        r"(?i)\b(DTS-?HD(?:[.\s]?MA)?|DTS|TrueHD|Atmos|DDP?5\.1|DD\+?|AC3|AAC|FLAC|MP3|5\.1|7\.1|2\.0)\b"
    )
    .unwrap();
    static ref NOISE_PATTERN: Regex = Regex::new(
        r"(?i)\b(REMASTERED|PROPER|REPACK|RERIP|INTERNAL|LIMITED|READ\.?NFO|HYBRID|COMPLETE|UNRATED|EXTENDED|IMAX|MULTi|DUAL)\b"
    )
    .unwrap();

    // Release group: trailing "-GROUP", optionally before an extension
    static ref RELEASE_GROUP_PATTERN: Regex =
        Regex::new(r"-([A-Za-z0-9]+)(?:\.[a-z0-9]{2,4})?$").unwrap();
}

/// Registry that runs every pattern over a filename segment
pub struct PatternRegistry;

impl PatternRegistry {
    /// Find all pattern matches in the input string
    pub fn find_all_matches(input: &str) -> Vec<Match> {
        let mut matches = Vec::new();

        Self::find_season_episode(input, &mut matches);
        Self::find_years(input, &mut matches);
        Self::find_tag(input, &QUALITY_PATTERN, MatchCategory::Quality, &mut matches);
        Self::find_tag(input, &SOURCE_PATTERN, MatchCategory::Source, &mut matches);
        Self::find_tag(input, &CODEC_PATTERN, MatchCategory::Codec, &mut matches);
        Self::find_tag(input, &AUDIO_PATTERN, MatchCategory::Audio, &mut matches);
        Self::find_tag(input, &NOISE_PATTERN, MatchCategory::Noise, &mut matches);
        Self::find_release_group(input, &mut matches);

        matches
    }

    fn find_season_episode(input: &str, matches: &mut Vec<Match>) {
        for (idx, pattern) in SEASON_EPISODE_PATTERNS.iter().enumerate() {
            for cap in pattern.captures_iter(input) {
                let full = cap.get(0).unwrap();

                // The 1x01 form is ambiguous with resolutions like 10x264;
                // require a plain numeric episode below 200 to accept it.
                let season: i32 = match cap.get(1).and_then(|m| m.as_str().parse().ok()) {
                    Some(s) => s,
                    None => continue,
                };
                let episode: i32 = match cap.get(2).and_then(|m| m.as_str().parse().ok()) {
                    Some(e) => e,
                    None => continue,
                };
                if idx == 2 && episode >= 200 {
                    continue;
                }

                matches.push(
                    Match::new(full.start(), full.end(), full.as_str(), MatchCategory::Episode)
                        .with_raw(format!("{}|{}", season, episode)),
                );
            }
        }
    }

    fn find_years(input: &str, matches: &mut Vec<Match>) {
        for cap in YEAR_PATTERN.captures_iter(input) {
            let full = cap.get(0).unwrap();
            matches.push(Match::new(
                full.start(),
                full.end(),
                full.as_str(),
                MatchCategory::Year,
            ));
        }
    }

    fn find_tag(input: &str, pattern: &Regex, category: MatchCategory, matches: &mut Vec<Match>) {
        for cap in pattern.captures_iter(input) {
            let full = cap.get(0).unwrap();
            matches.push(Match::new(full.start(), full.end(), full.as_str(), category));
        }
    }

    fn find_release_group(input: &str, matches: &mut Vec<Match>) {
        if let Some(cap) = RELEASE_GROUP_PATTERN.captures(input) {
            let group = cap.get(1).unwrap();
            matches.push(Match::new(
                group.start(),
                group.end(),
                group.as_str(),
                MatchCategory::ReleaseGroup,
            ));
        }
    }
}

/// Conflict resolver for overlapping matches.
///
/// Higher category priority wins; for equal priority the longer match wins.
pub struct ConflictResolver;

impl ConflictResolver {
    pub fn resolve(mut matches: Vec<Match>) -> Vec<Match> {
        if matches.is_empty() {
            return matches;
        }

        matches.sort_by(|a, b| {
            b.category
                .priority()
                .cmp(&a.category.priority())
                .then_with(|| b.len().cmp(&a.len()))
                .then_with(|| a.start.cmp(&b.start))
        });

        let mut resolved: Vec<Match> = Vec::new();
        for current in matches {
            if !resolved.iter().any(|existing| current.overlaps(existing)) {
                resolved.push(current);
            }
        }

        resolved.sort_by_key(|m| m.start);
        resolved
    }
}
