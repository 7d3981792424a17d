//! Splitting "Artist - Title" text into cleaned fields

use crate::text::{clean_artist_name, clean_track_name};
use once_cell::sync::Lazy;
use regex::Regex;

/// Row number at the start of a line: "01 ..."
static LEADING_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(\d+)\s+").unwrap());

/// Cue time following the row number: "01 02:30 ..."
static LEADING_TIME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\d+\s+(\d+:\d+(?::\d+)?)\s+").unwrap());

/// Label group trailing a suggestion: "Title [Label]"
static TRAILING_BRACKET: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\[.*?\]\s*$").unwrap());

pub(super) const ARTIST_TITLE_SEPARATOR: &str = " - ";
const TITLE_BY_ARTIST_SEPARATOR: &str = " by ";

/// Split on the first " - " into cleaned (artist, name)
///
/// Both fields must be longer than one character after cleaning.
pub(super) fn split_artist_title(text: &str) -> Option<(String, String)> {
    let (artist, name) = text.split_once(ARTIST_TITLE_SEPARATOR)?;
    cleaned_pair(artist, name)
}

/// As [`split_artist_title`], falling back to "Title by Artist"
pub(super) fn split_with_by_fallback(text: &str) -> Option<(String, String)> {
    if text.contains(ARTIST_TITLE_SEPARATOR) {
        return split_artist_title(text);
    }
    let (name, artist) = text.split_once(TITLE_BY_ARTIST_SEPARATOR)?;
    cleaned_pair(artist, name)
}

/// Suggested identification for an ID track: "Artist - Title [Label]"
pub(super) fn split_suggestion(text: &str) -> Option<(String, String)> {
    let (artist, rest) = text.split_once(ARTIST_TITLE_SEPARATOR)?;
    let name = TRAILING_BRACKET.replace(rest.trim(), "");
    cleaned_pair(artist, &name)
}

/// Row number and cue time prefixing a free-text line
pub(super) fn leading_number_and_time(text: &str) -> (Option<u32>, Option<String>) {
    let number = LEADING_NUMBER
        .captures(text)
        .and_then(|caps| caps[1].parse().ok());
    let time = LEADING_TIME
        .captures(text)
        .map(|caps| caps[1].to_string());
    (number, time)
}

fn cleaned_pair(artist: &str, name: &str) -> Option<(String, String)> {
    let artist = clean_artist_name(artist);
    let name = clean_track_name(name);

    if artist.chars().count() > 1 && name.chars().count() > 1 {
        Some((artist, name))
    } else {
        None
    }
}
