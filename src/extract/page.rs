//! Page-level facts: total mix length and descriptive metadata
//!
//! Both are heuristics over the whole document. A miss is never an error.

use super::document::{has_class_matching, visible_text, DIV, SPAN, TIME_TEXT};
use super::Document;
use crate::model::MixMetadata;
use crate::timing::Timecode;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Selector};

/// Shortest plausible mix
const MIN_TOTAL: Timecode = Timecode::from_secs(30 * 60);

/// Longest plausible mix
const MAX_TOTAL: Timecode = Timecode::from_secs(8 * 60 * 60);

/// Text patterns for the total length, most specific first
static DURATION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"Player\s+\d+\s*\[(\d+:\d+(?::\d+)?)\]",
        r"Duration:?\s*(\d+:\d+(?::\d+)?)",
        r"Length:?\s*(\d+:\d+(?::\d+)?)",
        r"Time:?\s*(\d+:\d+(?::\d+)?)",
        r"Total:?\s*(\d+:\d+(?::\d+)?)",
        r"(\d+:\d+(?::\d+)?)\s*set",
        r"(\d+:\d+(?::\d+)?)\s*mix",
        r"(\d+:\d+(?::\d+)?)\s*show",
        r"(\d+:\d+(?::\d+)?)\s*episode",
        r"(\d+:\d+(?::\d+)?)\s*(?:total|complete|full)",
        r"(?:total|complete|full)\s*(\d+:\d+(?::\d+)?)",
        r"(\d+:\d{2}:\d{2})",
        r"(\d+:\d+(?::\d+)?)\s*(?:min|hour|hr|h|m)",
        r"(\d+:\d+(?::\d+)?)\s*duration",
        r"(\d+:\d+(?::\d+)?)\s*length",
        r"(\d{2}:\d{2})",
    ]
    .iter()
    .map(|pattern| Regex::new(&format!("(?i){}", pattern)).unwrap())
    .collect()
});

static DURATION_CLASS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)duration|length|time").unwrap());
static INFO_CLASS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)tracklist.*info|info.*tracklist").unwrap());
static HEADER_CLASS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)header|info|meta").unwrap());
static TITLE_CLASS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)title|header|name").unwrap());

static H1: Lazy<Selector> = Lazy::new(|| Selector::parse("h1").unwrap());
static H2: Lazy<Selector> = Lazy::new(|| Selector::parse("h2").unwrap());
static H3: Lazy<Selector> = Lazy::new(|| Selector::parse("h3").unwrap());
static P: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());
static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("title").unwrap());

/// Site and format suffixes trailing a page title
static TITLE_SUFFIXES: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)\s*-\s*1001tracklists\.com.*$").unwrap(),
        Regex::new(r"(?i)\s*-\s*tracklist.*$").unwrap(),
        Regex::new(r"(?i)\s*-\s*mix.*$").unwrap(),
        Regex::new(r"(?i)\s*-\s*set.*$").unwrap(),
    ]
});

/// Which capture holds the artist in a title shape
#[derive(Clone, Copy)]
enum ArtistGroup {
    First,
    Second,
}

static TITLE_SHAPES: Lazy<Vec<(Regex, ArtistGroup)>> = Lazy::new(|| {
    vec![
        // "Artist - Set"
        (Regex::new(r"^([^-]+?)\s*-\s*(.+)$").unwrap(), ArtistGroup::First),
        // "Set by Artist"
        (Regex::new(r"(?i)^(.+?)\s+by\s+(.+)$").unwrap(), ArtistGroup::Second),
        // "Artist: Set"
        (Regex::new(r"^([^:]+?):\s*(.+)$").unwrap(), ArtistGroup::First),
        // "Set (Artist)"
        (Regex::new(r"^(.+?)\s*\(([^)]+)\)$").unwrap(), ArtistGroup::Second),
    ]
});

static YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(19[9]\d|20[0-2]\d)\b").unwrap());

/// Genre keywords recognised in page text
pub const GENRES: [&str; 28] = [
    "techno",
    "house",
    "trance",
    "progressive",
    "deep house",
    "tech house",
    "minimal",
    "ambient",
    "dubstep",
    "drum and bass",
    "dnb",
    "breakbeat",
    "electro",
    "electronic",
    "edm",
    "progressive house",
    "melodic techno",
    "dark techno",
    "industrial",
    "experimental",
    "psytrance",
    "goa",
    "hardstyle",
    "hardcore",
    "garage",
    "bass",
    "future bass",
    "trap",
];

/// Genre matchers, longest keyword first
static GENRE_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    let mut genres = GENRES.to_vec();
    genres.sort_by_key(|genre| std::cmp::Reverse(genre.len()));
    genres
        .into_iter()
        .map(|genre| {
            let pattern = format!(r"(?i)\b{}\b", regex::escape(genre));
            (genre, Regex::new(&pattern).unwrap())
        })
        .collect()
});

/// Find the overall length of the mix
///
/// Text patterns run first, then a few likely elements. A match only counts
/// if it parses and lies between 30 minutes and 8 hours.
pub fn detect_total_duration(document: &Document) -> Option<Timecode> {
    let text = document.plain_text();

    for pattern in DURATION_PATTERNS.iter() {
        for caps in pattern.captures_iter(&text) {
            if let Some(total) = plausible_total(&caps[1]) {
                log::info!("Found total duration in text: {}", total);
                return Some(total);
            }
        }
    }

    let html = document.html();
    let has_time = |el: &ElementRef<'_>| TIME_TEXT.is_match(&visible_text(el));
    let elements = [
        html.select(&SPAN).find(|el| has_class_matching(el, &DURATION_CLASS)),
        html.select(&DIV).find(|el| has_class_matching(el, &INFO_CLASS)),
        html.select(&DIV).find(|el| has_class_matching(el, &HEADER_CLASS)),
        html.select(&H1).find(|el| has_time(el)),
        html.select(&H2).find(|el| has_time(el)),
        html.select(&H3).find(|el| has_time(el)),
        html.select(&P).find(|el| has_time(el)),
        html.select(&DIV).find(|el| has_time(el)),
    ];

    for element in elements.iter().flatten() {
        let text = visible_text(element);
        if let Some(total) = TIME_TEXT.find(&text).and_then(|m| plausible_total(m.as_str())) {
            log::info!("Found total duration in element: {}", total);
            return Some(total);
        }
    }

    log::warn!("Could not find a total duration in the document");
    None
}

fn plausible_total(text: &str) -> Option<Timecode> {
    Timecode::parse(text)
        .ok()
        .filter(|total| (MIN_TOTAL..=MAX_TOTAL).contains(total))
}

/// Title, artist, year and genre of the mix, as far as the page tells
pub fn extract_metadata(document: &Document) -> MixMetadata {
    let mut metadata = MixMetadata::default();
    let html = document.html();

    let headings = [
        html.select(&H1).next(),
        html.select(&H2).next(),
        html.select(&H3).next(),
        html.select(&TITLE).next(),
        html.select(&DIV).find(|el| has_class_matching(el, &TITLE_CLASS)),
        html.select(&SPAN).find(|el| has_class_matching(el, &TITLE_CLASS)),
    ];

    for heading in headings.iter().flatten() {
        let text = visible_text(heading);
        if text.chars().count() <= 3 {
            continue;
        }
        if let Some((title, artist)) = parse_set_title(&clean_title_text(&text)) {
            metadata.title = Some(title);
            metadata.artist = Some(artist);
            break;
        }
    }

    let text = document.plain_text();
    metadata.year = YEAR.captures(&text).and_then(|caps| caps[1].parse().ok());
    metadata.genre = GENRE_PATTERNS
        .iter()
        .find(|(_, pattern)| pattern.is_match(&text))
        .map(|(genre, _)| title_case(genre));

    log::info!(
        "Mix metadata: title={:?} artist={:?} year={:?} genre={:?}",
        metadata.title,
        metadata.artist,
        metadata.year,
        metadata.genre
    );
    metadata
}

/// Strip site suffixes and collapse whitespace
fn clean_title_text(text: &str) -> String {
    let mut cleaned = text.to_string();
    for suffix in TITLE_SUFFIXES.iter() {
        let stripped = suffix.replace(&cleaned, "").to_string();
        cleaned = stripped;
    }
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split a mix title into (title, artist)
fn parse_set_title(text: &str) -> Option<(String, String)> {
    if text.chars().count() < 3 {
        return None;
    }

    for (shape, artist_group) in TITLE_SHAPES.iter() {
        let Some(caps) = shape.captures(text) else {
            continue;
        };
        let (artist, title) = match artist_group {
            ArtistGroup::First => (caps[1].trim(), caps[2].trim()),
            ArtistGroup::Second => (caps[2].trim(), caps[1].trim()),
        };

        let artist_len = artist.chars().count();
        let title_len = title.chars().count();
        if (2..100).contains(&artist_len) && (2..200).contains(&title_len) {
            return Some((title.to_string(), artist.to_string()));
        }
    }

    None
}

fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
