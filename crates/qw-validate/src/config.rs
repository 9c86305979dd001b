/// Policy knobs for a validation run.
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// A graph is export-ready only with fewer warnings than this.
    pub max_warnings_for_export: usize,
    /// Allowed deviation of a quest's outcome probabilities from 100.
    pub probability_tolerance: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_warnings_for_export: 5,
            probability_tolerance: 0.01,
        }
    }
}

impl ValidationConfig {
    /// Set the warning threshold for export readiness.
    pub fn with_max_warnings(mut self, max: usize) -> Self {
        self.max_warnings_for_export = max;
        self
    }

    /// Set the tolerance for outcome probability sums.
    pub fn with_probability_tolerance(mut self, tolerance: f64) -> Self {
        self.probability_tolerance = tolerance.abs();
        self
    }
}
