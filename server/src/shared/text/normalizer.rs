//! Searchable-reference normalization
//!
//! Titles reach the cache from several sources (filename parsing, the
//! language model, the catalog) with inconsistent punctuation and numeral
//! styles. The searchable reference is the canonical comparison form:
//! roman numerals become arabic, special characters become spaces, and
//! whitespace collapses. The transformation is idempotent.

use once_cell::sync::Lazy;
use regex::Regex;

use super::roman_numerals::replace_roman_numerals;

static SPECIAL_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z0-9\s]").unwrap());
static MULTI_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Replace everything that is not alphanumeric or whitespace with a space
pub fn replace_special_chars(text: &str) -> String {
    SPECIAL_CHARS.replace_all(text, " ").to_string()
}

/// Collapse runs of whitespace into single spaces
pub fn normalize_spaces(text: &str) -> String {
    MULTI_SPACE.replace_all(text, " ").to_string()
}

/// Build the canonical cache-key form of a title.
///
/// Blank input is returned unchanged so that callers can distinguish
/// "no title" from "empty after normalization".
pub fn create_searchable_reference(text: &str) -> String {
    if text.trim().is_empty() {
        return text.to_string();
    }

    let replaced = replace_roman_numerals(text, false);
    let scrubbed = replace_special_chars(&replaced);
    normalize_spaces(&scrubbed).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_reference() {
        assert_eq!(create_searchable_reference("The Matrix"), "The Matrix");
        assert_eq!(create_searchable_reference("Spider-Man: Homecoming"), "Spider Man Homecoming");
        assert_eq!(create_searchable_reference("Ocean's  Eleven"), "Ocean s Eleven");
    }

    #[test]
    fn test_roman_numerals_in_titles() {
        assert_eq!(create_searchable_reference("Rocky III"), "Rocky 3");
        assert_eq!(create_searchable_reference("Star Wars: Episode IX"), "Star Wars Episode 9");
        // Isolated I survives
        assert_eq!(create_searchable_reference("Rocky I"), "Rocky I");
    }

    #[test]
    fn test_blank_preserved() {
        assert_eq!(create_searchable_reference(""), "");
        assert_eq!(create_searchable_reference("   "), "   ");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "The Matrix",
            "Rocky III",
            "Spider-Man: Into the Spider-Verse",
            "Mission: Impossible - Fallout (2018)",
            "Se7en",
        ];

        for sample in samples {
            let once = create_searchable_reference(sample);
            let twice = create_searchable_reference(&once);
            assert_eq!(once, twice, "not idempotent for {:?}", sample);
        }
    }
}
