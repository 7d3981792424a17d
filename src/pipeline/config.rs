//! Pipeline configuration

use crate::timing::ReconcileConfig;

/// Configuration for turning one document into a tracklist
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Gap and edge thresholds for reconciliation
    pub reconcile: ReconcileConfig,

    /// Known total mix length ("1:58:12"); takes precedence over detection
    pub total_duration_hint: Option<String>,

    /// Look for the total length in the document when no hint is given
    pub detect_total_duration: bool,

    /// Look for mix title, artist, year and genre
    pub extract_metadata: bool,
}

impl PipelineConfig {
    /// Create a configuration with default thresholds and all detection on
    pub fn new() -> Self {
        Self {
            reconcile: ReconcileConfig::default(),
            total_duration_hint: None,
            detect_total_duration: true,
            extract_metadata: true,
        }
    }

    /// Set reconciliation thresholds
    pub fn with_reconcile(mut self, reconcile: ReconcileConfig) -> Self {
        self.reconcile = reconcile;
        self
    }

    /// Set the total mix length
    pub fn with_total_duration(mut self, hint: impl Into<String>) -> Self {
        self.total_duration_hint = Some(hint.into());
        self
    }

    /// Enable or disable total-length detection
    pub fn with_duration_detection(mut self, enabled: bool) -> Self {
        self.detect_total_duration = enabled;
        self
    }

    /// Enable or disable metadata extraction
    pub fn with_metadata(mut self, enabled: bool) -> Self {
        self.extract_metadata = enabled;
        self
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new()
    }
}
