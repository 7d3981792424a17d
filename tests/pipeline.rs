use mixtrack::input::Source;
use mixtrack::{PipelineConfig, Timecode, Track, TracklistError, Tracklist, TracklistPipeline};
use std::fs;
use tempfile::TempDir;

/// A tracklist page with structured rows, one ID row with a suggestion
const FESTIVAL_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>Amelie Lens - Live at Awakenings Festival 2023</title>
  <script>var tracks = "Fake Artist - Fake Track";</script>
</head>
<body>
  <h1>Amelie Lens - Live at Awakenings Festival 2023</h1>
  <div class="player">Player 1 [1:30:00]</div>
  <p>Peak-time techno at Spaarnwoude.</p>
  <div class="tlpItem" data-id="1">
    <span id="tlp1_tracknumber_value">01</span>
    <div class="cueValueField">0:10</div>
    <span class="trackValue">Amelie Lens - Contradiction</span>
  </div>
  <div class="tlpItem" data-id="2">
    <span id="tlp2_tracknumber_value">02</span>
    <div class="cueValueField">5:00</div>
    <span class="trackValue">Charlotte de Witte - Overdrive (Original Mix)</span>
  </div>
  <div class="tlpItem" data-id="3" data-isid="true">
    <span id="tlp3_tracknumber_value">03</span>
    <div class="cueValueField">10:40</div>
    <span class="trackValue">ID - ID</span>
  </div>
  <div class="tlp_3 suggestion">Enrico Sangiuliano - Hidden T [DRUMCODE]</div>
  <div class="tlpItem" data-id="4">
    <span id="tlp4_tracknumber_value">04</span>
    <div class="cueValueField">20:00</div>
    <span class="trackValue">Adam Beyer - Your Mind</span>
  </div>
</body>
</html>"#;

fn tc(text: &str) -> Timecode {
    Timecode::parse(text).unwrap()
}

fn quiet_pipeline() -> TracklistPipeline {
    TracklistPipeline::new(
        PipelineConfig::new()
            .with_duration_detection(false)
            .with_metadata(false),
    )
}

/// (start, end, artist, name) per track, with "?" for unknown boundaries
fn spans(tracklist: &Tracklist) -> Vec<(String, String, String, String)> {
    tracklist
        .tracks
        .iter()
        .map(|t| {
            (
                t.start_time.map(|x| x.to_string()).unwrap_or_else(|| "?".to_string()),
                t.end_time.map(|x| x.to_string()).unwrap_or_else(|| "?".to_string()),
                t.artist.clone(),
                t.name.clone(),
            )
        })
        .collect()
}

fn span(start: &str, end: &str, artist: &str, name: &str) -> (String, String, String, String) {
    (start.to_string(), end.to_string(), artist.to_string(), name.to_string())
}

fn assert_dense_numbers(tracks: &[Track]) {
    for (i, track) in tracks.iter().enumerate() {
        assert_eq!(track.track_number, Some(i as u32 + 1));
    }
}

#[test]
fn test_structured_page_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("awakenings.html");
    fs::write(&path, FESTIVAL_PAGE).unwrap();

    let payload = Source::from_arg(path.to_str().unwrap()).read().unwrap();
    let tracklist = TracklistPipeline::new(PipelineConfig::new()).run(&payload).unwrap();

    assert_eq!(
        spans(&tracklist),
        vec![
            span("00:00:00", "00:05:00", "Amelie Lens", "Contradiction"),
            span("00:05:00", "00:10:40", "Charlotte de Witte", "Overdrive (Original Mix)"),
            span("00:10:40", "00:20:00", "Enrico Sangiuliano", "Hidden T"),
            span("00:20:00", "01:30:00", "Adam Beyer", "Your Mind"),
        ]
    );
    assert_dense_numbers(&tracklist.tracks);
    assert_eq!(tracklist.total_duration, Some(tc("01:30:00")));
    assert_eq!(tracklist.confidence, 0.4);
    assert!(tracklist.overlaps.is_empty());

    let metadata = &tracklist.metadata;
    assert_eq!(metadata.artist.as_deref(), Some("Amelie Lens"));
    assert_eq!(metadata.title.as_deref(), Some("Live at Awakenings Festival 2023"));
    assert_eq!(metadata.year, Some(2023));
    assert_eq!(metadata.genre.as_deref(), Some("Techno"));
}

#[test]
fn test_json_round_trip() {
    let tracklist = TracklistPipeline::new(PipelineConfig::new()).run(FESTIVAL_PAGE).unwrap();

    let json = serde_json::to_string(&tracklist).unwrap();
    let back: Tracklist = serde_json::from_str(&json).unwrap();

    assert!(json.contains("\"start_time\":\"00:10:40\""));
    assert_eq!(back, tracklist);
}

#[test]
fn test_intro_id_and_outro_from_hint() {
    let payload = "01 00:30 Xavier Artist - First Track\n02 05:00 Yvonne Artist - Second Track\n";
    let pipeline = TracklistPipeline::new(
        PipelineConfig::new()
            .with_total_duration("00:10:00")
            .with_metadata(false),
    );

    let tracklist = pipeline.run(payload).unwrap();

    assert_eq!(
        spans(&tracklist),
        vec![
            span("00:00:00", "00:00:30", "ID", "ID"),
            span("00:00:30", "00:05:00", "Xavier Artist", "First Track"),
            span("00:05:00", "00:10:00", "Yvonne Artist", "Second Track"),
        ]
    );
    assert_dense_numbers(&tracklist.tracks);
}

#[test]
fn test_noisy_free_text_line() {
    let payload = "01 02:30 Artist Name - Track Title [EDIT123] 3 userxyz (12k) Save 7\n";

    let tracklist = quiet_pipeline().run(payload).unwrap();

    assert_eq!(
        spans(&tracklist),
        vec![
            span("00:00:00", "00:02:30", "ID", "ID"),
            span("00:02:30", "?", "Artist Name", "Track Title"),
        ]
    );
}

#[test]
fn test_duplicates_merge_then_small_gap_closes() {
    let payload = "\
01 00:00 Artist One - Song\n\
02 01:00 artist  one - SONG\n\
03 02:00 Other Artist - Tune\n";

    let tracklist = quiet_pipeline().run(payload).unwrap();

    assert_eq!(
        spans(&tracklist),
        vec![
            span("00:00:00", "00:01:30", "Artist One", "Song"),
            span("00:01:30", "?", "Other Artist", "Tune"),
        ]
    );
}

#[test]
fn test_overlap_is_reported() {
    let payload = "\
01 00:00 Artist One - Song\n\
02 02:00 Other Artist - Tune\n\
03 05:00 Artist One - Song\n";

    let tracklist = quiet_pipeline().run(payload).unwrap();

    assert_eq!(tracklist.overlaps.len(), 1);
    let overlap = &tracklist.overlaps[0];
    assert_eq!(overlap.earlier, "Artist One - Song");
    assert_eq!(overlap.later, "Other Artist - Tune");
    assert_eq!(overlap.at, tc("00:02:00"));
    assert_eq!(overlap.seconds, 180);
}

#[test]
fn test_malformed_cue_aborts() {
    let payload = r#"<div class="tlpItem"><div class="cue">1:5</div><span>Artist - Title</span></div>"#;

    let err = quiet_pipeline().run(payload).unwrap_err();

    assert!(matches!(err, TracklistError::MalformedDuration { .. }));
    assert_eq!(err.offending_value(), "1:5");
}

#[test]
fn test_page_without_tracks() {
    let tracklist = quiet_pipeline()
        .run("<html><body><p>This mix has no tracklist yet.</p></body></html>")
        .unwrap();

    assert!(tracklist.is_empty());
    assert_eq!(tracklist.confidence, 0.0);
}

#[test]
fn test_batch_matches_single_runs() {
    let payloads = vec![
        FESTIVAL_PAGE.to_string(),
        "01 00:00 Artist One - Song\n".to_string(),
    ];
    let pipeline = quiet_pipeline();

    let batch = pipeline.run_all(&payloads);

    for (payload, result) in payloads.iter().zip(batch) {
        assert_eq!(result.unwrap(), pipeline.run(payload).unwrap());
    }
}
