//! Scan statistics for one subset

/// Counts of how each scanned element was handled
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmitterStats {
    /// Elements scanned
    pub elements: usize,
    /// Scope qualifiers stored or cleared
    pub qualifiers: usize,
    /// Auxiliary qualifiers stored
    pub auxiliary: usize,
    /// Structural elements skipped
    pub structural: usize,
    /// Observations emitted
    pub observations: usize,
    /// Data elements dropped for a missing value
    pub dropped_missing: usize,
    /// Preferred-unit conversions applied
    pub conversions: usize,
}

impl EmitterStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Percentage of data elements that produced an observation
    pub fn emission_rate(&self) -> f64 {
        let data = self.observations + self.dropped_missing;
        if data == 0 {
            100.0
        } else {
            (self.observations as f64 / data as f64) * 100.0
        }
    }

    /// Merge counts from another scan
    pub fn merge(&mut self, other: &EmitterStats) {
        self.elements += other.elements;
        self.qualifiers += other.qualifiers;
        self.auxiliary += other.auxiliary;
        self.structural += other.structural;
        self.observations += other.observations;
        self.dropped_missing += other.dropped_missing;
        self.conversions += other.conversions;
    }

    /// One-line summary
    pub fn summary(&self) -> String {
        format!(
            "Scanned {} elements: {} observations, {} qualifiers, {} auxiliary, {} structural, {} missing values dropped",
            self.elements,
            self.observations,
            self.qualifiers,
            self.auxiliary,
            self.structural,
            self.dropped_missing
        )
    }
}
