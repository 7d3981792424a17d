//! Parsed source document and markup helpers shared by the strategies

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};

/// Any `div`
pub(super) static DIV: Lazy<Selector> = Lazy::new(|| Selector::parse("div").unwrap());

/// Any `span`
pub(super) static SPAN: Lazy<Selector> = Lazy::new(|| Selector::parse("span").unwrap());

/// First "H:MM:SS" or "MM:SS" looking run in a string
pub(super) static TIME_TEXT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+:\d+(?::\d+)?").unwrap());

/// A fetched tracklist page (HTML or plain text), parsed once
pub struct Document {
    html: Html,
}

impl Document {
    /// Parse a payload; plain text is wrapped into a document body
    pub fn parse(payload: &str) -> Self {
        Self {
            html: Html::parse_document(payload),
        }
    }

    pub fn html(&self) -> &Html {
        &self.html
    }

    /// All text outside `script`/`style`, with the source line breaks kept
    pub fn plain_text(&self) -> String {
        let mut text = String::new();

        for node in self.html.tree.root().descendants() {
            if let Node::Text(fragment) = node.value() {
                let hidden = node
                    .parent()
                    .and_then(|parent| parent.value().as_element())
                    .map(|element| matches!(element.name(), "script" | "style"))
                    .unwrap_or(false);
                if !hidden {
                    text.push_str(fragment);
                }
            }
        }

        text
    }
}

/// Text content of an element with runs of whitespace collapsed
pub(super) fn visible_text(element: &ElementRef<'_>) -> String {
    let raw: String = element.text().collect();
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whether any class of `element` matches `pattern`
pub(super) fn has_class_matching(element: &ElementRef<'_>, pattern: &Regex) -> bool {
    element.value().classes().any(|class| pattern.is_match(class))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_skips_scripts_and_keeps_lines() {
        let doc = Document::parse(
            "<html><head><script>var a = 'x - y';</script><style>p{}</style></head>\
             <body><p>First - Line</p>\n<p>Second - Line</p></body></html>",
        );
        let text = doc.plain_text();
        assert!(!text.contains("var a"));
        assert!(text.contains("First - Line"));
        assert!(text.lines().any(|l| l.trim() == "Second - Line"));
    }

    #[test]
    fn test_plain_payload_is_readable() {
        let doc = Document::parse("01 Artist - Title\n02 Other - Tune\n");
        let text = doc.plain_text();
        assert!(text.contains("01 Artist - Title"));
        assert!(text.contains("02 Other - Tune"));
    }

    #[test]
    fn test_visible_text_collapses_whitespace() {
        let doc = Document::parse("<div class='x'>\n  <span>Artist</span>\n - \n<span>Title</span></div>");
        let div = doc.html().select(&DIV).next().unwrap();
        assert_eq!(visible_text(&div), "Artist - Title");
        assert!(has_class_matching(&div, &Regex::new("^x$").unwrap()));
    }
}
