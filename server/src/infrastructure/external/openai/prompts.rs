//! Prompt templates for the narrow extraction operations
//!
//! Each operation sends the same system instruction plus a prompt that
//! carries the full specification of the extraction and the literal input
//! path. The model is required to answer with exactly the specified token
//! and nothing else.

/// System instruction shared by every extraction call
pub const SYSTEM_INSTRUCTIONS: &str = "\
You are an AI that performs narrowly specified text-extraction functions. \
Only respond by executing the function described in the user's message, \
strictly following the output format it specifies. \
You are forbidden from adding explanations, rephrasing, adding context, \
adding code blocks, or adding any extra text - output only the function \
result, as defined. \
Think step by step and double-check your answer before responding, \
especially when the input is ambiguous or tricky. \
You are forbidden from guessing, inferring, or deducing information that \
is not explicitly present in the user input or the function description.";

const MEDIA_TYPE_SPEC: &str = r#"Function: classify a media filename as a movie or a TV show episode.
Input: the filename or path the user wants analyzed.
Rules:
- Use filename conventions (SxxEyy markers, 1x02 patterns, year tags) to make an informed decision.
- Ignore the file extension and letter case.
- "unknown" must be your last resort - classify as "movie" or "tv" whenever reasonably possible.
- The output must be exactly one of: "movie", "tv", or "unknown". A single token, no leading or trailing whitespace, no other value.
Examples:
- "The.Matrix.1999.1080p.BluRay.x264.DTS-FGT.mkv" -> movie
- "Breaking.Bad.S05E14.720p.HDTV.x264-IMMERSE.mkv" -> tv
- "Friends.2x11.480p.DVD.x264-SAiNTS.mkv" -> tv
- "1917.2019.2160p.UHD.BluRay.X265-IAMABLE.mkv" -> movie
- "The.Walking.Dead.1001.1080p.WEB.H264-STRiFE.mkv" -> tv
- "Se7en.1995.avi" -> movie
- "ER.101.avi" -> tv
- "2012.2009.BluRay.avi" -> movie
- "Sherlock.S02.E03.1080p.BluRay.x264-SHORTCUT.mkv" -> tv
- "Gladiator.2000.720p.BluRay.x264-YIFY\CD2\glad-yify.mkv" -> movie
- "shows/Game.of.Thrones.S08E03.1080p.WEB.H264-MEMENTO\DISC1\got-s08e03.mkv" -> tv
- "Dune.Part.One.2021.1080p.BluRay.x264-GROUP.mkv" -> movie
- "readme.md" -> unknown"#;

const MOVIE_TITLE_SPEC: &str = r#"Function: extract the movie title from a filename known to represent a movie.
Input: the filename or path the user wants analyzed.
Rules:
- Ignore resolution, codecs, year, quality, group tags, scene group name, file extension, and any extra descriptors.
- Return only the movie title - no year, no quality, no tags, no extension, no explanation.
- Format the title with spaces and proper capitalization; remove dots, dashes, and underscores that separate title words.
- If you cannot reasonably extract a movie title, as your last resort, return "unknown".
- The output must be a single line with no extra spaces at the start or end.
Examples:
- "The.Matrix.1999.1080p.BluRay.x264.DTS-FGT.mkv" -> The Matrix
- "Inception.2010.720p.BluRay.x264.YIFY.mp4" -> Inception
- "Mad.Max.Fury.Road.2015.720p.BluRay.x264.YIFY.mp4" -> Mad Max Fury Road
- "1917.2019.2160p.UHD.BluRay.X265-IAMABLE.mkv" -> 1917
- "10.Things.I.Hate.About.You.1999.mkv" -> 10 Things I Hate About You
- "Se7en.1995.avi" -> Se7en
- "Blade.Runner.2049.2017.2160p.UHD.BluRay.x265\CD1\blade2049-gp.avi" -> Blade Runner 2049
- "Pulp.Fiction.1994.DVDRip.XviD.AC3\DISC2\pulpfict-ac3.r03" -> Pulp Fiction
- "The Shawshank Redemption 1994 1080p BluRay x264 YIFY.mp4" -> The Shawshank Redemption"#;

const SERIES_TITLE_SPEC: &str = r#"Function: extract the series title from a filename known to represent a TV show episode.
Input: the filename or path the user wants analyzed.
Rules:
- Ignore season/episode markers, episode titles, resolution, codecs, quality, group tags, file extension, and any extra descriptors.
- Return only the series title - no season, no episode, no year, no explanation.
- Format the title with spaces and proper capitalization; remove dots, dashes, and underscores that separate title words.
- If you cannot reasonably extract a series title, as your last resort, return "unknown".
- The output must be a single line with no extra spaces at the start or end.
Examples:
- "Breaking.Bad.S05E14.720p.HDTV.x264-IMMERSE.mkv" -> Breaking Bad
- "Game.of.Thrones.S08E03.1080p.WEB.H264-MEMENTO.mkv" -> Game of Thrones
- "Friends.2x11.480p.DVD.x264-SAiNTS.mkv" -> Friends
- "The.Office.US.S07E17.720p.NF.WEB-DL.DDP5.1.x264-NTb.mkv" -> The Office US
- "Stranger.Things.S04E01.Chapter.One.720p.NF.WEB-DL.DDP5.1.x264-NTb.mkv" -> Stranger Things
- "13.Reasons.Why.S02E01.mkv" -> 13 Reasons Why
- "favs/Friends.2x11.480p.DVD.x264-SAiNTS\CD1\friends-2x11.r06" -> Friends
- "ShowName_S06_E12_HDTV.mp4" -> Show Name"#;

const SEASON_EPISODE_SPEC: &str = r#"Function: extract the season and episode number from a filename known to represent a TV show episode.
Input: the filename or path the user wants analyzed.
Rules:
- Detect SxxEyy, 1x02, or similar patterns.
- Only return the season and episode numbers, not titles, quality, or any other info.
- For double-episode files, return the first episode (e.g. S01E01E02 is episode 1).
- If you cannot reasonably extract both season and episode, return "unknown" (this must be your last resort).
- Output must match exactly: "season:X, episode:Y" (no leading zeros, no explanation).
Examples:
- "Breaking.Bad.S05E14.720p.HDTV.x264-IMMERSE.mkv" -> season:5, episode:14
- "Game.of.Thrones.S08E03.1080p.WEB.H264-MEMENTO.mkv" -> season:8, episode:3
- "Friends.2x11.480p.DVD.x264-SAiNTS.mkv" -> season:2, episode:11
- "Rick.and.Morty.S05E01E02.720p.WEBRip.x264-ION10.mkv" -> season:5, episode:1
- "Seinfeld.821.720p.HDTV.x264-GROUP.mkv" -> season:8, episode:21
- "ER.101.avi" -> season:1, episode:1
- "ShowName_S06_E12_HDTV.mp4" -> season:6, episode:12
- "Sherlock S02 E03 1080p BluRay x264-SHORTCUT.mkv" -> season:2, episode:3
- "favs/Friends.2x11.480p.DVD.x264-SAiNTS\CD1\friends-2x11.rar" -> season:2, episode:11
- "README.txt" -> unknown"#;

fn build_prompt(spec: &str, file_path: &str) -> String {
    format!(
        "Output only the result as specified below.\n\n{}\n\nInput:\n```plaintext\n{}\n```",
        spec, file_path
    )
}

pub fn media_type_prompt(file_path: &str) -> String {
    build_prompt(MEDIA_TYPE_SPEC, file_path)
}

pub fn movie_title_prompt(file_path: &str) -> String {
    build_prompt(MOVIE_TITLE_SPEC, file_path)
}

pub fn series_title_prompt(file_path: &str) -> String {
    build_prompt(SERIES_TITLE_SPEC, file_path)
}

pub fn season_episode_prompt(file_path: &str) -> String {
    build_prompt(SEASON_EPISODE_SPEC, file_path)
}
