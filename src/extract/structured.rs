//! Structured tracklist rows and bare ID-marker containers
//!
//! Rows look like:
//!
//! ```html
//! <div class="tlpItem" data-id="42" data-isid="false">
//!   <span id="tlp42_tracknumber_value">03</span>
//!   <div class="cueValueField">12:30</div>
//!   <span class="trackValue">Artist - Title (Original Mix)</span>
//! </div>
//! ```
//!
//! Unidentified rows carry `data-isid="true"` or read "ID - ID"; the
//! community's best guess sits in a companion `tlp_<data-id>` container or
//! in a `sug<N>_value` element further down.

use super::document::{has_class_matching, visible_text, DIV, SPAN, TIME_TEXT};
use super::split::{split_artist_title, split_suggestion, ARTIST_TITLE_SEPARATOR};
use super::{Document, ExtractionStrategy};
use crate::model::{Candidate, ID_PLACEHOLDER};
use crate::text::bracket_group_count;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Selector};

static TLP_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)tlpItem").unwrap());
static TLP_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)tlp_\d+").unwrap());
static ID_ID_TEXT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bid - id\b").unwrap());
static SUGGESTION_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"sug\d+_value").unwrap());

static TRACK_NUMBER: Lazy<Selector> =
    Lazy::new(|| Selector::parse("span[id*='tracknumber_value']").unwrap());
static DIV_WITH_ID: Lazy<Selector> = Lazy::new(|| Selector::parse("div[id]").unwrap());

/// Titles longer than this are assumed to have swallowed page furniture
const MAX_TITLE_CHARS: usize = 100;
const MAX_BRACKET_GROUPS: usize = 2;

/// `div.tlpItem` rows with track number, cue and ID suggestion lookup
pub struct StructuredItems;

impl ExtractionStrategy for StructuredItems {
    fn name(&self) -> &'static str {
        "structured items"
    }

    fn extract(&self, document: &Document) -> Vec<Candidate> {
        document
            .html()
            .select(&DIV)
            .filter(|el| has_class_matching(el, &TLP_ITEM))
            .filter_map(|el| parse_item(&el, Some(document)))
            .collect()
    }
}

/// `div.tlp_<n>` containers; ID rows stay ID since no suggestion lookup is done
pub struct IdMarkerContainers;

impl ExtractionStrategy for IdMarkerContainers {
    fn name(&self) -> &'static str {
        "ID marker containers"
    }

    fn extract(&self, document: &Document) -> Vec<Candidate> {
        document
            .html()
            .select(&DIV)
            .filter(|el| has_class_matching(el, &TLP_ID))
            .filter_map(|el| parse_item(&el, None))
            .collect()
    }
}

/// Read one row; `lookup` enables suggestion resolution for ID rows
fn parse_item(element: &ElementRef<'_>, lookup: Option<&Document>) -> Option<Candidate> {
    let track_number = element
        .select(&TRACK_NUMBER)
        .next()
        .and_then(|span| visible_text(&span).parse::<u32>().ok());

    let start_time = element
        .select(&DIV)
        .find(|div| {
            div.value()
                .classes()
                .any(|class| class.to_lowercase().contains("cue"))
        })
        .and_then(|cue| {
            TIME_TEXT
                .find(&visible_text(&cue))
                .map(|m| m.as_str().to_string())
        });

    let text = visible_text(element);

    let (artist, name) = if is_id_row(element, &text) {
        lookup
            .and_then(|document| find_suggestion(element, document))
            .unwrap_or_else(|| (ID_PLACEHOLDER.to_string(), ID_PLACEHOLDER.to_string()))
    } else {
        structured_pair(element, &text)?
    };

    Some(
        Candidate::new(artist, name)
            .with_number(track_number)
            .with_start(start_time),
    )
}

fn is_id_row(element: &ElementRef<'_>, text: &str) -> bool {
    element.value().attr("data-isid") == Some("true") || ID_ID_TEXT.is_match(text)
}

/// Prefer a single span holding "Artist - Title", else the row text
fn structured_pair(element: &ElementRef<'_>, row_text: &str) -> Option<(String, String)> {
    for span in element.select(&SPAN) {
        let text = visible_text(&span);
        let len = text.chars().count();
        if !text.contains(ARTIST_TITLE_SEPARATOR) || len <= 5 || len >= 200 {
            continue;
        }
        if let Some(pair) = split_artist_title(&text) {
            if plausible_title(&pair.1) {
                return Some(pair);
            }
        }
    }

    split_artist_title(row_text).filter(|(_, name)| plausible_title(name))
}

fn plausible_title(name: &str) -> bool {
    name.chars().count() <= MAX_TITLE_CHARS && bracket_group_count(name) <= MAX_BRACKET_GROUPS
}

/// Resolve an ID row via its companion container, then following siblings
fn find_suggestion(element: &ElementRef<'_>, document: &Document) -> Option<(String, String)> {
    let row_id = element.value().attr("data-id")?;
    let marker = format!("tlp_{}", row_id);

    let companion = document.html().select(&DIV).find(|div| {
        *div != *element && div.value().classes().any(|class| class == marker)
    });
    if let Some(pair) = companion.and_then(|div| split_suggestion(&visible_text(&div))) {
        log::debug!("Resolved ID row {} from companion container", row_id);
        return Some(pair);
    }

    for sibling in element.next_siblings().filter_map(ElementRef::wrap) {
        let suggestion = sibling.select(&DIV_WITH_ID).find(|div| {
            div.value()
                .id()
                .map(|id| SUGGESTION_ID.is_match(id))
                .unwrap_or(false)
        });
        if let Some(pair) = suggestion.and_then(|div| split_suggestion(&visible_text(&div))) {
            log::debug!("Resolved ID row {} from suggestion list", row_id);
            return Some(pair);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(artist: &str, name: &str, number: Option<u32>, start: Option<&str>) -> Candidate {
        Candidate::new(artist, name)
            .with_number(number)
            .with_start(start.map(str::to_string))
    }

    #[test]
    fn test_reads_number_cue_and_title() {
        let doc = Document::parse(
            r#"<div class="tlpTog tlpItem" data-id="1">
                 <span id="tlp1_tracknumber_value">01</span>
                 <div class="cueValueField">0:45</div>
                 <span class="trackValue">Adam Beyer - Your Mind (Original Mix)</span>
               </div>
               <div class="tlpItem" data-id="2">
                 <span id="tlp2_tracknumber_value">02</span>
                 <div class="cue">1:04:10</div>
                 <span>Charlotte de Witte - Overdrive</span>
               </div>"#,
        );

        let found = StructuredItems.extract(&doc);

        assert_eq!(
            found,
            vec![
                candidate("Adam Beyer", "Your Mind (Original Mix)", Some(1), Some("0:45")),
                candidate("Charlotte de Witte", "Overdrive", Some(2), Some("1:04:10")),
            ]
        );
    }

    #[test]
    fn test_id_row_resolved_from_companion() {
        let doc = Document::parse(
            r#"<div class="tlpItem" data-id="7" data-isid="true">
                 <div class="cueValueField">10:00</div>
                 <span>ID - ID</span>
               </div>
               <div class="tlp_7 suggestions">Enrico Sangiuliano - Hidden T [DRUMCODE]</div>"#,
        );

        let found = StructuredItems.extract(&doc);

        assert_eq!(found, vec![candidate("Enrico Sangiuliano", "Hidden T", None, Some("10:00"))]);
    }

    #[test]
    fn test_companion_class_must_match_exactly() {
        let doc = Document::parse(
            r#"<div class="tlpItem" data-id="1" data-isid="true">
                 <span id="tlp1_tracknumber_value">1</span>
                 <div class="cueValueField">0:00</div>
               </div>
               <div class="tlpItem" data-id="12" data-isid="true">
                 <span id="tlp12_tracknumber_value">12</span>
                 <div class="cueValueField">30:00</div>
               </div>
               <div class="tlp_12 suggestion">Late Artist - Row Twelve Tune</div>"#,
        );

        let found = StructuredItems.extract(&doc);

        assert_eq!(
            found,
            vec![
                candidate("ID", "ID", Some(1), Some("0:00")),
                candidate("Late Artist", "Row Twelve Tune", Some(12), Some("30:00")),
            ]
        );
    }

    #[test]
    fn test_id_text_needs_word_boundaries() {
        let doc = Document::parse(
            r#"<div class="tlpItem" data-id="5"><span>Astrid - Identity</span></div>"#,
        );

        let found = StructuredItems.extract(&doc);

        assert_eq!(found, vec![candidate("Astrid", "Identity", None, None)]);
    }

    #[test]
    fn test_id_row_resolved_from_following_sibling() {
        let doc = Document::parse(
            r#"<div id="list">
                 <div class="tlpItem" data-id="9"><span>id - id</span></div>
                 <div class="sugBlock"><div id="sug3_value">Amelie Lens - Contradiction</div></div>
               </div>"#,
        );

        let found = StructuredItems.extract(&doc);

        assert_eq!(found, vec![candidate("Amelie Lens", "Contradiction", None, None)]);
    }

    #[test]
    fn test_unresolved_id_row_stays_id() {
        let doc = Document::parse(
            r#"<div class="tlpItem" data-id="4" data-isid="true">
                 <span id="x_tracknumber_value">4</span><span>ID - ID</span>
               </div>"#,
        );

        let found = StructuredItems.extract(&doc);

        assert_eq!(found, vec![candidate("ID", "ID", Some(4), None)]);
    }

    #[test]
    fn test_id_marker_containers_skip_suggestions() {
        let doc = Document::parse(
            r#"<div class="tlp_11" data-id="11" data-isid="true"><span>ID - ID</span></div>
               <div class="tlp_11x">Someone - Something</div>
               <div class="tlp_12"><span>Artist - Tune</span></div>"#,
        );

        let found = IdMarkerContainers.extract(&doc);

        assert_eq!(found[0], candidate("ID", "ID", None, None));
        assert!(found.contains(&candidate("Artist", "Tune", None, None)));
    }

    #[test]
    fn test_row_with_too_many_bracket_groups_is_dropped() {
        let doc = Document::parse(
            r#"<div class="tlpItem">
                 <span>Noise - A (b) (c) [d]</span>
               </div>"#,
        );

        assert!(StructuredItems.extract(&doc).is_empty());
    }

    #[test]
    fn test_no_rows_yields_nothing() {
        let doc = Document::parse("<p>Artist - Title</p>");
        assert!(StructuredItems.extract(&doc).is_empty());
        assert!(IdMarkerContainers.extract(&doc).is_empty());
    }
}
