//! Mixtrack - DJ mix tracklist extraction and reconciliation
//!
//! This library reads a fetched tracklist page (HTML or plain text),
//! extracts track candidates, cleans them, and reconciles their cue times
//! into one gapless timeline covering the whole mix.

pub mod assemble;
pub mod error;
pub mod extract;
pub mod input;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod text;
pub mod timing;

pub use error::{Result, TracklistError};
pub use model::{Candidate, MixMetadata, Overlap, Track, Tracklist};
pub use pipeline::{PipelineConfig, TracklistPipeline};
pub use timing::{ReconcileConfig, Timecode};
