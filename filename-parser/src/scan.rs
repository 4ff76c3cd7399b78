//! Path scanning: choosing which part of a file path to parse.
//!
//! A media path usually carries the same information several times with
//! different fidelity ("Show.S01E05.720p/show-105.mkv"). The scanner
//! generates candidate strings from the deepest segment outward, scores a
//! deterministic parse of each, and keeps the best one.

use lazy_static::lazy_static;
use regex::Regex;

use crate::parser::SegmentParser;
use crate::types::{MediaType, ParsedMedia};
use crate::vocab;

lazy_static! {
    static ref MULTI_SPACE: Regex = Regex::new(r"\s+").unwrap();
}

const MAX_FALLBACK_SEGMENTS: usize = 2;

/// Extra noise words that only appear as path scaffolding
const SCAFFOLD_TOKENS: &[&str] = &["tmp", "watch", "mnt", "files", "file", "disc", "disk", "part"];

/// Scan a file path and return the best-scoring parse, if any segment of the
/// path yields a usable title. Returns `None` when nothing parses — that is
/// an absence of evidence, not an error.
pub fn scan_path(path: &str) -> Option<ParsedMedia> {
    let candidates = generate_candidates(path);

    let mut best: Option<(f64, ParsedMedia)> = None;

    for (index, candidate) in candidates.iter().enumerate() {
        let parsed = SegmentParser::parse(candidate);
        let quality = match candidate_quality(&parsed) {
            Some(q) => q,
            None => continue,
        };

        let depth_bonus = 3.0_f64 - index as f64;
        let score = quality - noise_penalty(candidate) + depth_bonus.max(0.0);

        // Strict comparison keeps the deepest candidate on ties
        if best.as_ref().map(|(s, _)| score > *s).unwrap_or(true) {
            best = Some((score, parsed));
        }
    }

    if let Some((_, parsed)) = best {
        return Some(parsed);
    }

    // No segment parsed on its own; try the joined fallback form once
    let fallback = build_fallback_input(path);
    if fallback.is_empty() {
        return None;
    }

    let parsed = SegmentParser::parse(&fallback);
    candidate_quality(&parsed).map(|_| parsed)
}

/// Candidate strings from the deepest path segment outward
fn generate_candidates(path: &str) -> Vec<String> {
    let parts = clean_parts(path);

    let mut candidates: Vec<String> = Vec::new();

    collect_candidates(&parts, true, &mut candidates);
    if candidates.is_empty() {
        collect_candidates(&parts, false, &mut candidates);
    }

    candidates
}

fn clean_parts(path: &str) -> Vec<String> {
    let parts: Vec<&str> = path
        .split(|c| c == '/' || c == '\\')
        .filter(|p| !p.trim().is_empty())
        .collect();

    let cleaned: Vec<&str> = parts
        .iter()
        .copied()
        .filter(|p| !vocab::PATH_SEGMENT_FILTER.contains(&p.to_lowercase().as_str()))
        .collect();

    let chosen = if cleaned.is_empty() { parts } else { cleaned };
    chosen.into_iter().map(normalize_segment).collect()
}

fn collect_candidates(parts: &[String], skip_visual_assets: bool, out: &mut Vec<String>) {
    for (reversed_index, segment) in parts.iter().rev().enumerate() {
        if segment.is_empty() {
            continue;
        }

        if skip_visual_assets && segment_is_visual_asset(segment) {
            continue;
        }

        if segment_is_weak_file_candidate(segment, parts, reversed_index) {
            continue;
        }

        if vocab::count_meaningful_tokens(segment) < 1 {
            continue;
        }

        if !out.contains(segment) {
            out.push(segment.clone());
        }
    }
}

fn normalize_segment(segment: &str) -> String {
    let replaced = segment.trim().replace('_', " ");
    MULTI_SPACE.replace_all(&replaced, " ").trim().to_string()
}

/// Image sidecars named after artwork assets carry no identification value
fn segment_is_visual_asset(segment: &str) -> bool {
    let (stem, extension) = vocab::split_stem_and_extension(segment);
    let extension = match extension {
        Some(e) => e,
        None => return false,
    };

    if !vocab::IMAGE_EXTENSIONS.contains(&extension.as_str()) {
        return false;
    }

    vocab::tokenize_rough(stem)
        .iter()
        .any(|t| vocab::VISUAL_ASSET_TOKENS.contains(&t.to_lowercase().as_str()))
}

/// A file whose stem says less than its parent directory is scene shorthand
/// ("gladiator-yify.mkv" under "Gladiator.2000.720p.BluRay.x264-YIFY/")
fn segment_is_weak_file_candidate(segment: &str, parts: &[String], reversed_index: usize) -> bool {
    let (_, extension) = vocab::split_stem_and_extension(segment);
    if extension.is_none() {
        return false;
    }

    let parent_index = match parts.len().checked_sub(2 + reversed_index) {
        Some(i) => i,
        None => return false,
    };

    let parent = &parts[parent_index];
    if parent.is_empty() {
        return false;
    }

    let parent_tokens = vocab::count_meaningful_tokens(parent);
    if parent_tokens == 0 {
        return false;
    }

    vocab::count_meaningful_tokens(segment) < parent_tokens
}

/// The spec §4.3 quality term; `None` when the parse yields no usable title
fn candidate_quality(parsed: &ParsedMedia) -> Option<f64> {
    let title = parsed.title.as_deref()?;

    let tokens = vocab::tokenize_rough(title);
    let meaningful = tokens
        .iter()
        .filter(|t| vocab::is_meaningful_title_token(t))
        .count();
    if meaningful == 0 {
        return None;
    }

    let extension_hits = tokens
        .iter()
        .filter(|t| vocab::EXTENSION_TOKENS.contains(&t.to_lowercase().as_str()))
        .count();

    let mut score = meaningful as f64 * 10.0;
    score -= extension_hits as f64 * 10.0;

    if parsed.media_type != MediaType::Unknown {
        score += 3.0;
    }

    if parsed.year.map(vocab::is_plausible_year).unwrap_or(false) {
        score += 2.0;
    }

    if parsed.season.is_some() {
        score += 1.0;
    }

    if parsed.episode.is_some() {
        score += 1.0;
    }

    Some(score)
}

fn noise_penalty(candidate: &str) -> f64 {
    let mut penalty = 0.0;

    for token in vocab::tokenize_rough(candidate) {
        let lower = token.to_lowercase();
        if vocab::GENERIC_TITLE_TOKENS.contains(&lower.as_str())
            || vocab::SEGMENT_NOISE_TOKENS.contains(&lower.as_str())
            || vocab::EXTENSION_TOKENS.contains(&lower.as_str())
            || SCAFFOLD_TOKENS.contains(&lower.as_str())
        {
            penalty += 1.0;
        } else if lower.chars().all(|c| c.is_ascii_digit()) {
            penalty += 0.5;
        }
    }

    penalty
}

/// Join the last couple of informative segments when nothing parses alone
fn build_fallback_input(path: &str) -> String {
    let parts = clean_parts(path);
    if parts.is_empty() {
        return String::new();
    }

    let mut meaningful: Vec<&String> = Vec::new();
    for part in &parts {
        if part.is_empty() || segment_is_visual_asset(part) {
            continue;
        }
        if vocab::count_meaningful_tokens(part) >= 1 {
            meaningful.push(part);
        }
    }

    let chosen: Vec<&String> = if meaningful.is_empty() {
        parts.iter().rev().take(MAX_FALLBACK_SEGMENTS).collect::<Vec<_>>().into_iter().rev().collect()
    } else {
        meaningful.iter().rev().take(MAX_FALLBACK_SEGMENTS).copied().collect::<Vec<_>>().into_iter().rev().collect()
    };

    let joined = chosen
        .iter()
        .map(|p| p.replace('-', " "))
        .collect::<Vec<_>>()
        .join(" ");

    MULTI_SPACE.replace_all(&joined, " ").trim().to_string()
}
