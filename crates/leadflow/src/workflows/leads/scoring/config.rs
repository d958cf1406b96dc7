use serde::{Deserialize, Serialize};

/// Triage dials applied on top of the fixed factor tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Weighted sums at or above this value classify as hot.
    pub hot_threshold: u8,
    /// Weighted sums at or above this value (but below hot) classify as warm.
    pub warm_threshold: u8,
    /// Goals text must exceed this many characters to count as a clear brief.
    pub clear_goals_min_chars: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            hot_threshold: 70,
            warm_threshold: 40,
            clear_goals_min_chars: 10,
        }
    }
}
