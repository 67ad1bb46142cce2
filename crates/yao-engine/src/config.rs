//! Configuration for an analysis run.

use yao_core::SixRelation;

/// Tunables applied by the enricher and the useful-god selector.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Score at which a line counts as strong (0-100).
    pub strong_threshold: i32,
    /// Useful-god relation when no question keyword matches.
    pub default_relation: SixRelation,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            strong_threshold: 50,
            default_relation: SixRelation::Wealth,
        }
    }
}

impl AnalysisConfig {
    /// Set the strong threshold (clamped to 0-100).
    pub fn with_strong_threshold(mut self, threshold: i32) -> Self {
        self.strong_threshold = threshold.clamp(0, 100);
        self
    }

    /// Set the fallback useful-god relation.
    pub fn with_default_relation(mut self, relation: SixRelation) -> Self {
        self.default_relation = relation;
        self
    }
}
