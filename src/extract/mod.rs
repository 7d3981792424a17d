//! Candidate extraction from tracklist pages
//!
//! Strategies are tried from most to least specific. The first one that
//! yields anything wins; results from different strategies are never
//! merged.

mod document;
mod free_text;
mod generic;
mod page;
mod split;
mod structured;
mod traits;

pub use document::Document;
pub use free_text::FreeTextLines;
pub use generic::GenericElements;
pub use page::{detect_total_duration, extract_metadata, GENRES};
pub use structured::{IdMarkerContainers, StructuredItems};
pub use traits::ExtractionStrategy;

use crate::model::Candidate;

/// Ordered chain of extraction strategies
pub struct CandidateExtractor {
    strategies: Vec<Box<dyn ExtractionStrategy>>,
}

impl CandidateExtractor {
    /// The default chain: structured rows, generic elements, ID-marker
    /// containers, free text
    pub fn new() -> Self {
        Self {
            strategies: vec![
                Box::new(StructuredItems),
                Box::new(GenericElements),
                Box::new(IdMarkerContainers),
                Box::new(FreeTextLines),
            ],
        }
    }

    /// Use a custom chain, tried in the given order
    pub fn with_strategies(strategies: Vec<Box<dyn ExtractionStrategy>>) -> Self {
        Self { strategies }
    }

    /// Names of the strategies in the order they are tried
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Candidates from the first strategy that finds any
    pub fn extract(&self, document: &Document) -> Vec<Candidate> {
        for strategy in &self.strategies {
            let candidates = strategy.extract(document);
            if candidates.is_empty() {
                log::debug!("No candidates from {}", strategy.name());
                continue;
            }

            log::info!(
                "Found {} candidates using {}",
                candidates.len(),
                strategy.name()
            );
            return candidates;
        }

        log::info!("No extraction strategy found any tracks");
        Vec::new()
    }
}

impl Default for CandidateExtractor {
    fn default() -> Self {
        Self::new()
    }
}
