//! Generic track-ish elements: `div`, `li` or `tr` tagged with a class
//! mentioning track, song or item

use super::document::{has_class_matching, visible_text};
use super::split::split_with_by_fallback;
use super::{Document, ExtractionStrategy};
use crate::model::Candidate;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Selector;

static ROWS: Lazy<Selector> = Lazy::new(|| Selector::parse("div, li, tr").unwrap());
static TRACK_CLASS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)track|song|item").unwrap());

const MIN_TEXT_CHARS: usize = 5;

/// Split the visible text of tagged elements; no number or cue is read
pub struct GenericElements;

impl ExtractionStrategy for GenericElements {
    fn name(&self) -> &'static str {
        "generic elements"
    }

    fn extract(&self, document: &Document) -> Vec<Candidate> {
        document
            .html()
            .select(&ROWS)
            .filter(|el| has_class_matching(el, &TRACK_CLASS))
            .filter_map(|el| {
                let text = visible_text(&el);
                if text.chars().count() < MIN_TEXT_CHARS {
                    return None;
                }
                split_with_by_fallback(&text).map(|(artist, name)| Candidate::new(artist, name))
            })
            .collect()
    }
}
