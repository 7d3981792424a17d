use super::Track;
use crate::timing::Timecode;
use serde::{Deserialize, Serialize};

/// Number of tracks at which a source is considered fully trustworthy
const CONFIDENT_TRACK_COUNT: f64 = 10.0;

/// Descriptive data about the mix itself
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MixMetadata {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub year: Option<u32>,
    pub genre: Option<String>,
}

impl MixMetadata {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.artist.is_none() && self.year.is_none() && self.genre.is_none()
    }
}

/// Two adjacent tracks whose boundaries cross; left as found
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overlap {
    /// "Artist - Name" of the earlier track
    pub earlier: String,

    /// "Artist - Name" of the later track
    pub later: String,

    /// Where the later track starts
    pub at: Timecode,

    /// How far the earlier track runs past that point, in seconds
    pub seconds: u64,
}

/// Reconstructed timeline of one mix
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tracklist {
    /// Tracks in temporal order
    pub tracks: Vec<Track>,

    /// Trust in this source, in [0, 1]
    pub confidence: f64,

    /// Overall length of the mix, when known
    pub total_duration: Option<Timecode>,

    #[serde(default, skip_serializing_if = "MixMetadata::is_empty")]
    pub metadata: MixMetadata,

    /// Boundaries left crossing during reconciliation
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub overlaps: Vec<Overlap>,
}

impl Tracklist {
    /// Empty result: nothing was found, confidence 0
    pub fn empty() -> Self {
        Self::default()
    }

    /// Confidence for a source that yielded `track_count` usable tracks
    pub fn confidence_for(track_count: usize) -> f64 {
        (track_count as f64 / CONFIDENT_TRACK_COUNT).min(1.0)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
