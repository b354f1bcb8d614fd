//! Bounds for the exploration driver.

use serde::{Deserialize, Serialize};

/// Limits on how far the driver explores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum total path cost (minutes). Relationships that would exceed
    /// it are not followed.
    pub max_cost: u32,

    /// Maximum number of transitions in a path.
    pub max_depth: usize,

    /// Stop once this many paths have reached a destination.
    pub max_results: usize,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(max_cost: u32, max_depth: usize, max_results: usize) -> Self {
        Self {
            max_cost,
            max_depth,
            max_results,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_cost: 240, // 4 hours
            max_depth: 64,
            max_results: 10,
        }
    }
}
