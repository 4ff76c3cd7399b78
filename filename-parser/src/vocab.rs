//! Token vocabularies shared by the segment scanner and the candidate scorer.
//!
//! These closed sets decide what counts as release-tag noise, which path
//! segments are generic mount points, and which file extensions carry little
//! identifying information.

/// Path segments that never contribute identification value (mount points,
/// download staging directories and the like). Compared lowercased.
pub const PATH_SEGMENT_FILTER: &[&str] = &[
    "tmp",
    "watch",
    "mnt",
    "media",
    "data",
    "apps",
    "downloads",
    "download",
];

/// Directory/file stems that mark auxiliary content rather than media
pub const SEGMENT_NOISE_TOKENS: &[&str] = &[
    "proof", "poster", "posters", "sample", "samples", "subs", "subtitle",
    "subtitles", "nfo", "info", "readme", "extras", "extra", "bonus",
    "screen", "screens", "screenshot", "screenshots", "cover", "covers",
    "completed", "complete", "incoming", "incomplete",
];

/// Known file extensions, media and sidecar alike
pub const EXTENSION_TOKENS: &[&str] = &[
    "mkv", "mp4", "avi", "mov", "wmv", "flv", "ts", "m2ts", "rar", "zip",
    "7z", "r00", "r01", "r02", "sfv", "md5", "srr", "idx", "srt", "sub",
    "sup", "nfo", "txt", "jpg", "jpeg", "png", "gif", "bmp", "webp", "mp3",
    "flac", "wav", "ogg", "m4a", "iso",
];

/// Image extensions that may be asset sidecars (posters, proofs, screens)
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "webp"];

/// Stem tokens that mark an image file as an asset rather than media
pub const VISUAL_ASSET_TOKENS: &[&str] = &[
    "art", "artwork", "cover", "covers", "poster", "posters", "proof",
    "sample", "samples", "screen", "screens", "screenshot", "screenshots",
];

/// Archive-style extensions whose stems are usually scene shorthand
pub const LOW_INFORMATION_EXTENSIONS: &[&str] = &[
    "rar", "zip", "7z", "r00", "r01", "r02", "sfv", "md5", "srr", "txt",
];

/// Generic release-tag vocabulary: tokens that never belong to a title
pub const GENERIC_TITLE_TOKENS: &[&str] = &[
    "the", "and", "or", "a", "an", "movie", "pack", "collection",
    "anthology", "complete", "edition", "cut", "version", "remastered",
    "extended", "imax", "uhd", "hdr", "remux", "web", "webdl", "webrip",
    "bluray", "bdrip", "hdrip", "brrip", "dvdrip", "dvdr", "digital", "rip",
    "x264", "x265", "h264", "h265", "hevc", "xvid", "divx", "ddp", "dd",
    "dts", "atmos", "ac3", "aac", "truehd", "flac", "proper", "repack",
    "rerip", "internal", "limited", "subs", "subtitles", "dub", "multi",
    "1080p", "1080i", "720p", "480p", "576p", "2160p", "4k", "10bit",
    "hdr10", "hdr10plus", "dolby", "vision", "hdtv", "pdtv", "hun", "eng",
    "ger", "fre", "spa", "ita", "rus", "jpn", "kor",
];

/// Returns true when `extension` (lowercased, no dot) is a known extension
pub fn is_known_extension(extension: &str) -> bool {
    EXTENSION_TOKENS.contains(&extension)
}

/// Splits `segment` into (stem, extension) when the suffix is a known
/// extension, otherwise returns the segment unchanged with no extension.
pub fn split_stem_and_extension(segment: &str) -> (&str, Option<String>) {
    match segment.rsplit_once('.') {
        Some((stem, ext)) => {
            let ext_lower = ext.to_lowercase();
            if is_known_extension(&ext_lower) {
                (stem, Some(ext_lower))
            } else {
                (segment, None)
            }
        }
        None => (segment, None),
    }
}

/// Splits on any non-word character, dropping empties
pub fn tokenize_rough(text: &str) -> Vec<&str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .collect()
}

/// A token is meaningful when it carries at least two letters and is not a
/// known release tag, noise word, or bare number.
pub fn is_meaningful_segment_token(token: &str) -> bool {
    let lower = token.to_lowercase();

    if SEGMENT_NOISE_TOKENS.contains(&lower.as_str()) || EXTENSION_TOKENS.contains(&lower.as_str()) {
        return false;
    }

    if lower.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }

    let letters = token.chars().filter(|c| c.is_alphabetic()).count();
    if letters < 2 {
        return false;
    }

    // Mixed alphanumerics like "x264" need a longer alphabetic run to count
    if token.chars().any(|c| c.is_ascii_digit()) && letters < 3 {
        return false;
    }

    true
}

/// Like [`is_meaningful_segment_token`] but against the release-tag
/// vocabulary used for title scoring.
pub fn is_meaningful_title_token(token: &str) -> bool {
    let lower = token.to_lowercase();

    if GENERIC_TITLE_TOKENS.contains(&lower.as_str()) || EXTENSION_TOKENS.contains(&lower.as_str()) {
        return false;
    }

    let letters = token.chars().filter(|c| c.is_alphabetic()).count();
    if letters < 2 {
        return false;
    }

    if token.chars().any(|c| c.is_ascii_digit()) && letters < 3 {
        return false;
    }

    true
}

/// Counts meaningful tokens in a segment's stem
pub fn count_meaningful_tokens(segment: &str) -> usize {
    let (stem, _) = split_stem_and_extension(segment);
    tokenize_rough(stem)
        .iter()
        .filter(|t| is_meaningful_segment_token(t))
        .count()
}

/// A year is plausible when it falls in the era of recorded film
pub fn is_plausible_year(year: i32) -> bool {
    (1888..=2100).contains(&year)
}
