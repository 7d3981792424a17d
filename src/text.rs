//! Cleanup of raw artist and title strings
//!
//! Tracklist pages glue uploader names, label tags, catalog numbers and
//! "Save" buttons onto titles, and prefix artists with row numbers and cue
//! times. Each rule here only removes text; rules are applied in order and
//! the whole sequence is repeated until nothing changes, so cleaning is
//! idempotent.

use once_cell::sync::Lazy;
use regex::Regex;

/// Words that mark boilerplate lines rather than tracks
pub const SKIP_WORDS: [&str; 5] = ["copyright", "rights", "reserved", "tracklist", "playlist"];

/// Trailing removals for titles, applied in order
static TITLE_RULES: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        // Label name in capitals followed by a number: "Song DEFECTED RECORDS 12 ..."
        Regex::new(r"\s+[A-Z\s]{4,}\s+\d+.*$").unwrap(),
        // Capitalised edit marker before a bracket: "Song EDIT [xyz] ..."
        Regex::new(r"\s+[A-Z]+\s+\[.*?\].*$").unwrap(),
        // Uploader block ending in a Save button: "Song 3 user (12k) Save 7"
        Regex::new(r"\s+\d+\s+[a-zA-Z0-9()\s]+\s+Save.*$").unwrap(),
        // Catalog tag: "Song [EDIT123]", "Song [DFTD-456]"
        Regex::new(r"\s*\[[A-Z][A-Z0-9._-]*\d[A-Z0-9._-]*\]\s*$").unwrap(),
    ]
});

/// Leading removals for artists, applied in order
static ARTIST_RULES: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        // Row number then cue time: "01 02:30 Artist"
        Regex::new(r"^\d+\s+\d+:\d+(?::\d+)?\s+").unwrap(),
        // Row number: "01 Artist"
        Regex::new(r"^\d+\s+").unwrap(),
        // Cue time: "02:30 Artist", "1:02:30Artist"
        Regex::new(r"^\d+:\d+(?::\d+)?\s*").unwrap(),
    ]
});

/// Balanced "(...)" or "[...]" group
static BRACKET_GROUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"\([^()\[\]]*\)|\[[^()\[\]]*\]").unwrap());

/// Remove uploader, label and edit annotations from the end of a title
///
/// Bracketed version info such as "(Original Mix)" or "(Artist Remix)" is
/// kept.
pub fn clean_track_name(raw: &str) -> String {
    apply_until_stable(raw, &TITLE_RULES)
}

/// Remove leading row numbers and cue times from an artist
pub fn clean_artist_name(raw: &str) -> String {
    apply_until_stable(raw, &ARTIST_RULES)
}

/// Whether a line is page boilerplate rather than a track
pub fn should_skip(text: &str) -> bool {
    let lower = text.to_lowercase();
    SKIP_WORDS.iter().any(|word| lower.contains(word))
}

/// Number of balanced bracket or parenthesis groups in `text`
pub fn bracket_group_count(text: &str) -> usize {
    BRACKET_GROUP.find_iter(text).count()
}

fn apply_until_stable(raw: &str, rules: &[Regex]) -> String {
    let mut current = raw.trim().to_string();

    loop {
        let mut next = current.clone();
        for rule in rules {
            let stripped = rule.replace(&next, "").trim().to_string();
            next = stripped;
        }

        // Every rule only removes text, so this terminates
        if next == current {
            return current;
        }
        current = next;
    }
}
