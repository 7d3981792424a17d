//! Last resort: scan the document text line by line

use super::split::{leading_number_and_time, split_with_by_fallback, ARTIST_TITLE_SEPARATOR};
use super::{Document, ExtractionStrategy};
use crate::model::Candidate;
use crate::text::should_skip;

const MIN_LINE_CHARS: usize = 10;
const MAX_LINE_CHARS: usize = 200;

/// Lines shaped like "[NN] [cue] Artist - Title"
pub struct FreeTextLines;

impl ExtractionStrategy for FreeTextLines {
    fn name(&self) -> &'static str {
        "free-text lines"
    }

    fn extract(&self, document: &Document) -> Vec<Candidate> {
        document
            .plain_text()
            .lines()
            .map(str::trim)
            .filter(|line| {
                let len = line.chars().count();
                line.contains(ARTIST_TITLE_SEPARATOR) && len > MIN_LINE_CHARS && len < MAX_LINE_CHARS
            })
            .filter_map(parse_line)
            .collect()
    }
}

fn parse_line(line: &str) -> Option<Candidate> {
    if should_skip(line) {
        log::debug!("Skipping boilerplate line: {}", line);
        return None;
    }

    let (number, start) = leading_number_and_time(line);
    let (artist, name) = split_with_by_fallback(line)?;

    Some(Candidate::new(artist, name).with_number(number).with_start(start))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_line_with_uploader_noise() {
        let doc = Document::parse("01 02:30 Artist Name - Track Title [EDIT123] 3 userxyz (12k) Save 7");

        let found = FreeTextLines.extract(&doc);

        assert_eq!(
            found,
            vec![Candidate::new("Artist Name", "Track Title")
                .with_number(Some(1))
                .with_start(Some("02:30".to_string()))]
        );
    }

    #[test]
    fn test_line_filters() {
        let payload = "\
            Tracklist - Copyright 2024 Some Site\n\
            A - B\n\
            no separator in this line at all\n\
            02 Ben Klock - Subzero (Original Mix)\n\
            03 1:02:30 Len Faki - Dust\n";
        let doc = Document::parse(payload);

        let found = FreeTextLines.extract(&doc);

        assert_eq!(
            found,
            vec![
                Candidate::new("Ben Klock", "Subzero (Original Mix)").with_number(Some(2)),
                Candidate::new("Len Faki", "Dust")
                    .with_number(Some(3))
                    .with_start(Some("1:02:30".to_string())),
            ]
        );
    }

    #[test]
    fn test_markup_lines_are_scanned() {
        let doc = Document::parse(
            "<html><body><p>Intro text</p>\n<p>Charlotte de Witte - Overdrive</p>\n</body></html>",
        );

        let found = FreeTextLines.extract(&doc);

        assert_eq!(found, vec![Candidate::new("Charlotte de Witte", "Overdrive")]);
    }
}
