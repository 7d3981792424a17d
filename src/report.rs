//! Rendering tracklists for the command line

use crate::model::{Track, Tracklist};
use crate::timing::Timecode;
use std::fmt::{self, Write};

const UNKNOWN_TIME: &str = "??:??:??";

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    Text,
    Json,
}

/// Render `tracklist` read from `source` in the requested format
pub fn render(source: &str, tracklist: &Tracklist, format: Format) -> anyhow::Result<String> {
    match format {
        Format::Text => Ok(render_text(source, tracklist)?),
        Format::Json => Ok(serde_json::to_string_pretty(tracklist)?),
    }
}

/// Human-readable listing, one track per line
pub fn render_text(source: &str, tracklist: &Tracklist) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_text(&mut out, source, tracklist)?;
    Ok(out)
}

/// Write the text listing into any formatter sink
pub fn write_text<W: Write>(out: &mut W, source: &str, tracklist: &Tracklist) -> fmt::Result {
    writeln!(
        out,
        "{}: {} tracks (confidence {:.2})",
        source,
        tracklist.len(),
        tracklist.confidence
    )?;

    let metadata = &tracklist.metadata;
    if let (Some(title), Some(artist)) = (&metadata.title, &metadata.artist) {
        writeln!(out, "Mix: {} - {}", artist, title)?;
    }
    if let Some(year) = metadata.year {
        writeln!(out, "Year: {}", year)?;
    }
    if let Some(ref genre) = metadata.genre {
        writeln!(out, "Genre: {}", genre)?;
    }
    if let Some(total) = tracklist.total_duration {
        writeln!(out, "Length: {}", total)?;
    }

    for (i, track) in tracklist.tracks.iter().enumerate() {
        let number = track.track_number.unwrap_or(i as u32 + 1);
        writeln!(out, "{:02}. {}", number, track_line(track))?;
    }

    for overlap in &tracklist.overlaps {
        writeln!(
            out,
            "Warning: '{}' overlaps '{}' by {}s at {}",
            overlap.earlier, overlap.later, overlap.seconds, overlap.at
        )?;
    }

    Ok(())
}

fn track_line(track: &Track) -> String {
    format!(
        "[{} - {}] {}",
        time_or_unknown(track.start_time),
        time_or_unknown(track.end_time),
        track.label()
    )
}

fn time_or_unknown(time: Option<Timecode>) -> String {
    time.map(|t| t.to_string())
        .unwrap_or_else(|| UNKNOWN_TIME.to_string())
}
