//! Transformation statistics across messages and subsets

use crate::app::services::record_emitter::EmitterStats;

/// Statistics for a transformation run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformStats {
    /// Messages read (including failed ones)
    pub messages: usize,
    /// Messages that could not be decoded at all
    pub failed_messages: usize,
    /// Subsets scanned
    pub subsets: usize,
    /// Subsets whose scan failed and produced no features
    pub failed_subsets: usize,
    /// Features produced
    pub features: usize,
    /// Element-level counts merged over all successful subsets
    pub elements: EmitterStats,
    /// Error messages for reporting
    pub error_messages: Vec<String>,
}

impl TransformStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure message
    pub fn add_error(&mut self, message: String) {
        self.error_messages.push(message);
    }

    /// Percentage of subsets scanned without error
    pub fn success_rate(&self) -> f64 {
        if self.subsets == 0 {
            100.0
        } else {
            ((self.subsets - self.failed_subsets) as f64 / self.subsets as f64) * 100.0
        }
    }

    /// Whether every message and subset succeeded
    pub fn is_clean(&self) -> bool {
        self.failed_messages == 0 && self.failed_subsets == 0
    }

    /// Merge another run's statistics into this one
    pub fn merge(&mut self, other: &TransformStats) {
        self.messages += other.messages;
        self.failed_messages += other.failed_messages;
        self.subsets += other.subsets;
        self.failed_subsets += other.failed_subsets;
        self.features += other.features;
        self.elements.merge(&other.elements);
        self.error_messages
            .extend(other.error_messages.iter().cloned());
    }

    /// Human-readable summary
    pub fn summary(&self) -> String {
        format!(
            "Transformed {} messages ({} failed), {} subsets ({} failed, {:.1}% success), {} features, {} missing values dropped",
            self.messages,
            self.failed_messages,
            self.subsets,
            self.failed_subsets,
            self.success_rate(),
            self.features,
            self.elements.dropped_missing
        )
    }
}
