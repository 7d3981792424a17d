//! Extraction strategy trait

use super::Document;
use crate::model::Candidate;

/// One way of reading track candidates out of a document
///
/// Strategies are tried in a fixed order; the first one that yields any
/// candidate wins.
pub trait ExtractionStrategy: Send + Sync {
    /// Short human-readable name, used in logs
    fn name(&self) -> &'static str;

    /// All candidates this strategy can find; empty if the markup it looks
    /// for is absent
    fn extract(&self, document: &Document) -> Vec<Candidate>;
}
