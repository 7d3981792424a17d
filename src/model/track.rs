use crate::timing::Timecode;
use serde::{Deserialize, Serialize};

/// Placeholder text for an unidentified segment
pub const ID_PLACEHOLDER: &str = "ID";

/// One segment of a continuous mix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Track title
    pub name: String,

    /// Artist name
    pub artist: String,

    /// Offset into the mix where this track starts (unknown before reconciliation)
    pub start_time: Option<Timecode>,

    /// Offset into the mix where this track ends (unknown before reconciliation)
    pub end_time: Option<Timecode>,

    /// Position in the mix, 1-based and dense after reconciliation
    pub track_number: Option<u32>,
}

impl Track {
    /// Create an untimed, unnumbered track
    pub fn new(artist: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            artist: artist.into(),
            start_time: None,
            end_time: None,
            track_number: None,
        }
    }

    /// Create an "ID - ID" placeholder spanning `[start, end]`
    pub fn placeholder(start: Timecode, end: Timecode) -> Self {
        Self {
            name: ID_PLACEHOLDER.to_string(),
            artist: ID_PLACEHOLDER.to_string(),
            start_time: Some(start),
            end_time: Some(end),
            track_number: None,
        }
    }

    pub fn with_start(mut self, start: Timecode) -> Self {
        self.start_time = Some(start);
        self
    }

    pub fn with_end(mut self, end: Timecode) -> Self {
        self.end_time = Some(end);
        self
    }

    pub fn with_number(mut self, number: u32) -> Self {
        self.track_number = Some(number);
        self
    }

    /// Whether both artist and name are the "ID" placeholder
    pub fn is_placeholder(&self) -> bool {
        self.name.eq_ignore_ascii_case(ID_PLACEHOLDER)
            && self.artist.eq_ignore_ascii_case(ID_PLACEHOLDER)
    }

    /// Case and whitespace insensitive identity used to merge duplicates
    pub fn identity_key(&self) -> (String, String) {
        (fold(&self.artist), fold(&self.name))
    }

    /// "Artist - Name"
    pub fn label(&self) -> String {
        format!("{} - {}", self.artist, self.name)
    }
}

fn fold(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Raw extraction result, before cleaning and validation
///
/// Several candidates may describe the same logical track with
/// differing boundaries; the reconciler merges them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub artist: Option<String>,
    pub name: Option<String>,
    pub track_number: Option<u32>,
    /// Cue text as found in the document, e.g. "02:30" or "1:04:10"
    pub start_time: Option<String>,
}

impl Candidate {
    pub fn new(artist: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            artist: Some(artist.into()),
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_number(mut self, number: Option<u32>) -> Self {
        self.track_number = number;
        self
    }

    pub fn with_start(mut self, start: Option<String>) -> Self {
        self.start_time = start;
        self
    }
}
