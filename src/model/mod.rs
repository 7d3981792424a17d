//! Data model for reconstructed mix timelines
//!
//! Candidates are raw extraction output; Tracks are cleaned and validated;
//! a Tracklist is the reconciled, ordered result for one mix.

mod track;
mod tracklist;

pub use track::{Candidate, Track, ID_PLACEHOLDER};
pub use tracklist::{MixMetadata, Overlap, Tracklist};
