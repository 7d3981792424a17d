//! Document to tracklist orchestration

use super::config::PipelineConfig;
use crate::assemble::assemble;
use crate::error::Result;
use crate::extract::{detect_total_duration, extract_metadata, CandidateExtractor, Document};
use crate::model::{MixMetadata, Track, Tracklist};
use crate::timing::{Reconciler, Timecode};
use rayon::prelude::*;

/// Extraction, assembly and reconciliation for one document at a time
pub struct TracklistPipeline {
    config: PipelineConfig,
    extractor: CandidateExtractor,
    reconciler: Reconciler,
}

impl TracklistPipeline {
    /// Create a pipeline with the default extraction chain
    pub fn new(config: PipelineConfig) -> Self {
        let reconciler = Reconciler::new(config.reconcile);
        Self {
            config,
            extractor: CandidateExtractor::new(),
            reconciler,
        }
    }

    /// Replace the extraction chain
    pub fn with_extractor(mut self, extractor: CandidateExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Build the tracklist for one fetched page or text payload
    ///
    /// Finding nothing is not an error: the result is an empty tracklist
    /// with confidence 0. A malformed duration, in the hint or in a cue,
    /// fails the run.
    pub fn run(&self, payload: &str) -> Result<Tracklist> {
        let document = Document::parse(payload);

        // Step 1: Candidates and tracks
        let candidates = self.extractor.extract(&document);
        let tracks = assemble(candidates)?;

        // Step 2: Page-level facts
        let total_duration = self.total_duration(&document, &tracks)?;
        let metadata = if self.config.extract_metadata {
            extract_metadata(&document)
        } else {
            MixMetadata::default()
        };

        let mut tracklist = Tracklist {
            confidence: Tracklist::confidence_for(tracks.len()),
            total_duration,
            metadata,
            ..Tracklist::empty()
        };

        if tracks.is_empty() {
            log::info!("No tracks found in document");
            return Ok(tracklist);
        }

        // Step 3: Timeline
        if tracks.iter().all(|track| track.start_time.is_none()) {
            log::info!("No cue times found; returning {} tracks in page order", tracks.len());
            tracklist.tracks = number_in_order(tracks);
            return Ok(tracklist);
        }

        let reconciled = self.reconciler.reconcile(tracks, total_duration)?;
        tracklist.tracks = reconciled.tracks;
        tracklist.overlaps = reconciled.overlaps;

        log::info!(
            "Tracklist ready: {} tracks, confidence {:.2}",
            tracklist.len(),
            tracklist.confidence
        );
        Ok(tracklist)
    }

    /// Run every payload independently, in parallel; results keep input order
    pub fn run_all<S: AsRef<str> + Sync>(&self, payloads: &[S]) -> Vec<Result<Tracklist>> {
        payloads
            .par_iter()
            .map(|payload| self.run(payload.as_ref()))
            .collect()
    }

    /// The given total, else a detected one that ends after the last cue
    fn total_duration(&self, document: &Document, tracks: &[Track]) -> Result<Option<Timecode>> {
        if let Some(ref hint) = self.config.total_duration_hint {
            let total = Timecode::parse(hint)?;
            log::info!("Using given total duration: {}", total);
            return Ok(Some(total));
        }

        if !self.config.detect_total_duration {
            return Ok(None);
        }

        let detected = detect_total_duration(document);
        let last_start = tracks.iter().filter_map(|track| track.start_time).max();
        match (detected, last_start) {
            (Some(total), Some(last)) if total <= last => {
                log::warn!(
                    "Ignoring detected total duration {}: last track starts at {}",
                    total,
                    last
                );
                Ok(None)
            }
            _ => Ok(detected),
        }
    }
}

fn number_in_order(tracks: Vec<Track>) -> Vec<Track> {
    tracks
        .into_iter()
        .zip(1u32..)
        .map(|(track, number)| track.with_number(number))
        .collect()
}
