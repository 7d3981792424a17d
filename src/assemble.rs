//! Turning raw candidates into validated tracks

use crate::error::Result;
use crate::model::{Candidate, Track};
use crate::text::{bracket_group_count, clean_artist_name, clean_track_name, should_skip};
use crate::timing::Timecode;

/// Names with more bracket groups than this are page furniture, not titles
const MAX_BRACKET_GROUPS: usize = 2;

/// Clean, validate and order candidates
///
/// Candidates missing a field, with a field of one character or less,
/// flagged as boilerplate or carrying too many bracket groups are dropped.
/// The rest are sorted by track number, unnumbered ones last, keeping
/// document order otherwise.
///
/// A cue that is present but cannot be parsed fails the whole call.
pub fn assemble(candidates: Vec<Candidate>) -> Result<Vec<Track>> {
    let total = candidates.len();
    let mut tracks = Vec::with_capacity(total);

    for candidate in candidates {
        if let Some(track) = build_track(candidate)? {
            tracks.push(track);
        }
    }

    tracks.sort_by_key(|track| (track.track_number.is_none(), track.track_number));

    log::info!("Assembled {} of {} candidates", tracks.len(), total);
    Ok(tracks)
}

fn build_track(candidate: Candidate) -> Result<Option<Track>> {
    let (Some(raw_artist), Some(raw_name)) = (&candidate.artist, &candidate.name) else {
        log::debug!("Dropping candidate without artist or name: {:?}", candidate);
        return Ok(None);
    };

    let artist = clean_artist_name(raw_artist);
    let name = clean_track_name(raw_name);

    if artist.chars().count() <= 1 || name.chars().count() <= 1 {
        log::debug!("Dropping candidate with short field: '{} - {}'", artist, name);
        return Ok(None);
    }
    if should_skip(&artist) || should_skip(&name) {
        log::debug!("Dropping boilerplate: '{} - {}'", artist, name);
        return Ok(None);
    }
    if bracket_group_count(&name) > MAX_BRACKET_GROUPS {
        log::debug!("Dropping over-annotated title: '{}'", name);
        return Ok(None);
    }

    let mut track = Track::new(artist, name);
    if let Some(number) = candidate.track_number {
        track = track.with_number(number);
    }
    if let Some(cue) = &candidate.start_time {
        track = track.with_start(Timecode::parse(cue)?);
    }

    Ok(Some(track))
}
