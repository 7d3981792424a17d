//! Error types for tracklist reconstruction
//!
//! Error strategy:
//! - Malformed durations: fatal, surfaced to the caller
//! - Empty extraction, overlaps, rejected candidates: not errors, the
//!   pipeline degrades to fewer (or no) tracks

use thiserror::Error;

/// Why a duration string was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationFault {
    Empty,
    ComponentCount(usize),
    NotANumber,
    OutOfRange,
    Overflow,
}

impl std::fmt::Display for DurationFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DurationFault::Empty => write!(f, "empty input"),
            DurationFault::ComponentCount(n) => {
                write!(f, "expected MM:SS or HH:MM:SS, found {} component(s)", n)
            }
            DurationFault::NotANumber => write!(f, "component is not a number"),
            DurationFault::OutOfRange => write!(f, "minutes and seconds must be below 60"),
            DurationFault::Overflow => write!(f, "value too large"),
        }
    }
}

/// Top-level error type for the extraction and reconciliation engine
#[derive(Debug, Error)]
pub enum TracklistError {
    #[error("Malformed duration '{value}': {reason}")]
    MalformedDuration { value: String, reason: DurationFault },
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, TracklistError>;

impl TracklistError {
    pub(crate) fn malformed(value: &str, reason: DurationFault) -> Self {
        TracklistError::MalformedDuration {
            value: value.to_string(),
            reason,
        }
    }

    /// Whether the error must abort processing of the document
    pub fn is_fatal(&self) -> bool {
        matches!(self, TracklistError::MalformedDuration { .. })
    }

    /// The offending input text, when the error carries one
    pub fn offending_value(&self) -> &str {
        match self {
            TracklistError::MalformedDuration { value, .. } => value,
        }
    }
}
