use std::{collections::BTreeSet, time::Duration};

use any_ascii::any_ascii;
use indicatif::{ProgressBar, ProgressStyle};
use similar::TextDiff;

use crate::types::{Album, Track};

/// Similarity of two strings in `[0, 1]`: twice the matched characters over the
/// total length of both. `1.0` only for identical strings.
///
/// Insertions cost less than with an edit distance, so "Zero/No" and "Zero / No"
/// still score 0.96.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    TextDiff::from_chars(a, b).ratio() as f64
}

pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn to_ascii(text: &str) -> String {
    any_ascii(text)
}

/// Song titles as they are stored in the tracks table.
pub fn clean_song_title(title: &str) -> String {
    to_ascii(&title.replace('’', "'"))
}

/// Lowercased alphanumerics only; used to compare search hits with the query.
pub fn simplify_title(title: &str) -> String {
    to_ascii(title)
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Single-line ASCII lyrics without apostrophes, as stored in the lyrics tables.
pub fn normalize_lyrics(raw: &str) -> String {
    let single_line = raw.replace('\n', " ");
    to_ascii(&single_line).trim().replace('\'', "")
}

pub fn strip_braces(text: &str) -> String {
    text.chars().filter(|c| *c != '{' && *c != '}').collect()
}

/// File name prefix for an artist: the last word of the name ("Bob Dylan" -> "Dylan").
pub fn file_stem(artist_name: &str) -> String {
    artist_name
        .split_whitespace()
        .last()
        .map(to_ascii)
        .map(|w| w.replace(['/', '\\'], "-"))
        .filter(|w| !w.is_empty())
        .unwrap_or_else(|| "artist".to_string())
}

/// Parses a comma separated list of alternate songwriter credits.
///
/// Entries are trimmed, empty entries are ignored and duplicates collapse.
pub fn parse_band_members(input: &str) -> Result<BTreeSet<String>, String> {
    let members: BTreeSet<String> = input
        .split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .collect();

    if members.is_empty() {
        return Err("band members cannot be empty".to_string());
    }
    Ok(members)
}

/// Sorts by year string. "N/A" is compared as a plain string, so it lands after
/// numeric years rather than being treated specially.
pub fn sort_albums_by_year(albums: &mut Vec<Album>) {
    albums.sort_by(|a, b| a.year.cmp(&b.year));
}

pub fn sort_tracks_by_title(tracks: &mut Vec<Track>) {
    tracks.sort_by(|a, b| a.song_title.cmp(&b.song_title));
}

pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}
