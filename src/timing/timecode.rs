//! Mix offsets and their textual HH:MM:SS form

use crate::error::{DurationFault, Result, TracklistError};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// An offset into a mix (or a length), at whole-second resolution
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timecode(u64);

impl Timecode {
    pub const ZERO: Timecode = Timecode(0);

    pub const fn from_secs(secs: u64) -> Self {
        Timecode(secs)
    }

    pub const fn as_secs(&self) -> u64 {
        self.0
    }

    /// Signed distance from `self` to `later`, in seconds
    pub fn seconds_until(&self, later: Timecode) -> i64 {
        later.0 as i64 - self.0 as i64
    }

    /// Point halfway between `self` and `later`, rounded down
    pub fn midpoint(&self, later: Timecode) -> Timecode {
        let (lo, hi) = if self.0 <= later.0 {
            (self.0, later.0)
        } else {
            (later.0, self.0)
        };
        Timecode(lo + (hi - lo) / 2)
    }

    /// Parse `MM:SS`, `H:MM:SS` or `HH:MM:SS`
    ///
    /// A fractional suffix on the seconds component (`01:01:00.9`) is
    /// truncated. Minutes and seconds following the leading component must be
    /// two digits below 60; the leading component may be any width, so a
    /// `75:30` cue is 75 minutes 30 seconds.
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(TracklistError::malformed(text, DurationFault::Empty));
        }

        let parts: Vec<&str> = trimmed.split(':').collect();
        if parts.len() != 2 && parts.len() != 3 {
            return Err(TracklistError::malformed(
                text,
                DurationFault::ComponentCount(parts.len()),
            ));
        }

        let last = parts.len() - 1;
        let mut total: u64 = 0;

        for (i, raw) in parts.iter().enumerate() {
            let digits = if i == last {
                strip_fraction(raw).ok_or_else(|| {
                    TracklistError::malformed(text, DurationFault::NotANumber)
                })?
            } else {
                raw
            };

            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(TracklistError::malformed(text, DurationFault::NotANumber));
            }

            let value: u64 = digits
                .parse()
                .map_err(|_| TracklistError::malformed(text, DurationFault::Overflow))?;

            if i > 0 && (digits.len() != 2 || value >= 60) {
                return Err(TracklistError::malformed(text, DurationFault::OutOfRange));
            }

            total = total
                .checked_mul(60)
                .and_then(|t| t.checked_add(value))
                .ok_or_else(|| TracklistError::malformed(text, DurationFault::Overflow))?;
        }

        Ok(Timecode(total))
    }

    /// Canonical `HH:MM:SS` text
    pub fn format(&self) -> String {
        self.to_string()
    }
}

/// Drop a `.fff` suffix; `None` if the suffix is not all digits
fn strip_fraction(component: &str) -> Option<&str> {
    match component.split_once('.') {
        Some((whole, frac)) => {
            if frac.is_empty() || !frac.bytes().all(|b| b.is_ascii_digit()) {
                None
            } else {
                Some(whole)
            }
        }
        None => Some(component),
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.0 / 3600;
        let minutes = (self.0 % 3600) / 60;
        let seconds = self.0 % 60;
        write!(f, "{:02}:{:02}:{:02}", hours, minutes, seconds)
    }
}

impl FromStr for Timecode {
    type Err = TracklistError;

    fn from_str(s: &str) -> Result<Self> {
        Timecode::parse(s)
    }
}

impl Serialize for Timecode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timecode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Timecode::parse(&text).map_err(serde::de::Error::custom)
    }
}
