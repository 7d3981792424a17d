//! Timeline reconciliation
//!
//! Turns an unordered, possibly duplicated set of timed tracks into one
//! gapless sequence covering the mix from 00:00:00 to its total duration:
//!
//! 1. sort by start time
//! 2. merge duplicates of the same (artist, name)
//! 3. snap the first track to 0, or put an ID track in front of it
//! 4. close small gaps at their midpoint, fill large ones with ID tracks
//! 5. stretch the last track to the total duration, or append an ID track
//! 6. renumber 1..N
//! 7. normalise every boundary through its HH:MM:SS form

use super::Timecode;
use crate::error::Result;
use crate::model::{Overlap, Track};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Thresholds steering gap and edge handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileConfig {
    /// Gaps longer than this between two tracks get an ID track
    pub min_gap_threshold: Timecode,

    /// Distance from the start (or end) of the mix within which the first
    /// (or last) track is stretched to the edge instead of padded with ID
    pub intro_outro_threshold: Timecode,
}

impl ReconcileConfig {
    pub fn new() -> Self {
        Self {
            min_gap_threshold: Timecode::from_secs(60),
            intro_outro_threshold: Timecode::from_secs(30),
        }
    }

    pub fn with_min_gap(mut self, threshold: Timecode) -> Self {
        self.min_gap_threshold = threshold;
        self
    }

    pub fn with_intro_outro(mut self, threshold: Timecode) -> Self {
        self.intro_outro_threshold = threshold;
        self
    }
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Output of a reconciliation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// Tracks in temporal order, numbered 1..N
    pub tracks: Vec<Track>,

    /// Adjacent pairs whose boundaries were left crossing
    pub overlaps: Vec<Overlap>,
}

/// Builds a consistent timeline from timed tracks
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    config: ReconcileConfig,
}

impl Reconciler {
    pub fn new(config: ReconcileConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReconcileConfig {
        &self.config
    }

    /// Reconcile `tracks` against an optional total mix duration
    ///
    /// Tracks without a start time are dropped; callers are expected to
    /// filter them out beforehand.
    pub fn reconcile(
        &self,
        tracks: Vec<Track>,
        total_duration: Option<Timecode>,
    ) -> Result<Reconciliation> {
        log::info!(
            "Reconciling {} tracks, total duration: {}",
            tracks.len(),
            total_duration
                .map(|t| t.to_string())
                .unwrap_or_else(|| "unknown".to_string())
        );

        let sorted = sort_by_start(tracks);
        if sorted.is_empty() {
            return Ok(Reconciliation::default());
        }

        let mut merged = deduplicate(sorted);
        self.synthesize_intro(&mut merged);
        let (mut timeline, overlaps) = self.process_gaps(merged);
        self.synthesize_outro(&mut timeline, total_duration);
        renumber(&mut timeline);
        let tracks = canonicalize(timeline)?;

        log::info!(
            "Reconciled timeline: {} tracks, {} overlap(s)",
            tracks.len(),
            overlaps.len()
        );

        Ok(Reconciliation { tracks, overlaps })
    }

    fn synthesize_intro(&self, tracks: &mut Vec<Track>) {
        let Some(first_start) = tracks.first().and_then(|t| t.start_time) else {
            return;
        };

        if first_start == Timecode::ZERO {
            return;
        }

        if first_start < self.config.intro_outro_threshold {
            log::debug!("Snapping first track from {} to 00:00:00", first_start);
            tracks[0].start_time = Some(Timecode::ZERO);
        } else {
            log::debug!("Inserting intro ID track up to {}", first_start);
            tracks.insert(0, Track::placeholder(Timecode::ZERO, first_start));
        }
    }

    fn process_gaps(&self, tracks: Vec<Track>) -> (Vec<Track>, Vec<Overlap>) {
        let threshold = self.config.min_gap_threshold.as_secs() as i64;
        let mut timeline = Vec::with_capacity(tracks.len());
        let mut overlaps = Vec::new();

        let mut remaining = tracks.into_iter();
        let mut current = remaining.next();

        while let Some(mut track) = current.take() {
            let Some(mut next) = remaining.next() else {
                timeline.push(track);
                break;
            };

            // Start times are guaranteed by sort_by_start
            let next_start = next.start_time.unwrap_or_default();
            let end = *track.end_time.get_or_insert(next_start);
            let gap = end.seconds_until(next_start);

            let mut filler = None;
            match gap.cmp(&0) {
                Ordering::Less => {
                    log::warn!(
                        "Overlap of {}s between '{}' and '{}' at {}",
                        -gap,
                        track.label(),
                        next.label(),
                        next_start
                    );
                    overlaps.push(Overlap {
                        earlier: track.label(),
                        later: next.label(),
                        at: next_start,
                        seconds: gap.unsigned_abs(),
                    });
                }
                Ordering::Greater if gap > threshold => {
                    log::debug!("Filling {}s gap at {} with ID track", gap, end);
                    filler = Some(Track::placeholder(end, next_start));
                }
                Ordering::Greater => {
                    let midpoint = end.midpoint(next_start);
                    track.end_time = Some(midpoint);
                    next.start_time = Some(midpoint);
                }
                Ordering::Equal => {}
            }

            timeline.push(track);
            timeline.extend(filler);
            current = Some(next);
        }

        (timeline, overlaps)
    }

    fn synthesize_outro(&self, tracks: &mut Vec<Track>, total_duration: Option<Timecode>) {
        let Some(last) = tracks.last_mut() else {
            return;
        };
        let start = last.start_time.unwrap_or_default();

        let Some(total) = total_duration else {
            if last.end_time.is_none() {
                log::warn!("No total duration available for last track; end left unknown");
            }
            return;
        };

        if total < start {
            log::warn!(
                "Last track '{}' starts at {}, past the total duration {}",
                last.label(),
                start,
                total
            );
            return;
        }

        match last.end_time {
            None => last.end_time = Some(total),
            Some(end) => {
                let remaining = end.seconds_until(total);
                if remaining <= self.config.intro_outro_threshold.as_secs() as i64 {
                    last.end_time = Some(total);
                } else {
                    log::debug!("Appending outro ID track from {} to {}", end, total);
                    tracks.push(Track::placeholder(end, total));
                }
            }
        }
    }
}

/// Drop untimed tracks and order the rest deterministically
fn sort_by_start(tracks: Vec<Track>) -> Vec<Track> {
    let before = tracks.len();
    let mut timed: Vec<Track> = tracks.into_iter().filter(|t| t.start_time.is_some()).collect();
    if timed.len() < before {
        log::warn!("Dropped {} track(s) without a start time", before - timed.len());
    }

    timed.sort_by(|a, b| {
        a.start_time
            .cmp(&b.start_time)
            .then_with(|| a.end_time.cmp(&b.end_time))
            .then_with(|| a.identity_key().cmp(&b.identity_key()))
    });
    timed
}

/// Merge tracks sharing an identity into one spanning all of them
///
/// ID placeholders are distinct unknown segments and are never merged.
fn deduplicate(sorted: Vec<Track>) -> Vec<Track> {
    let mut merged: Vec<Track> = Vec::with_capacity(sorted.len());
    let mut seen: HashMap<(String, String), usize> = HashMap::new();

    for track in sorted {
        if track.is_placeholder() {
            merged.push(track);
            continue;
        }

        let key = track.identity_key();
        match seen.get(&key) {
            Some(&index) => {
                log::debug!("Merging duplicate '{}'", track.label());
                merge_into(&mut merged[index], track);
            }
            None => {
                seen.insert(key, merged.len());
                merged.push(track);
            }
        }
    }

    merged
}

fn merge_into(kept: &mut Track, other: Track) {
    let kept_reach = kept.end_time.or(kept.start_time);
    let other_reach = other.end_time.or(other.start_time);

    kept.start_time = kept.start_time.min(other.start_time);
    kept.end_time = kept_reach.max(other_reach);
    kept.track_number = match (kept.track_number, other.track_number) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    };
}

fn renumber(tracks: &mut [Track]) {
    for (i, track) in tracks.iter_mut().enumerate() {
        track.track_number = Some(i as u32 + 1);
    }
}

fn canonicalize(tracks: Vec<Track>) -> Result<Vec<Track>> {
    tracks
        .into_iter()
        .map(|mut track| {
            if let Some(start) = track.start_time {
                track.start_time = Some(Timecode::parse(&start.format())?);
            }
            if let Some(end) = track.end_time {
                track.end_time = Some(Timecode::parse(&end.format())?);
            }
            Ok(track)
        })
        .collect()
}
