//! Planner configuration file.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{LatLong, StationId};
use crate::search::SearchConfig;
use crate::traversal::TraversalConfig;

/// Error loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything the binary needs besides the graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub traversal: TraversalConfig,
    pub search: SearchConfig,

    /// Known station positions, used to order services by closeness to the
    /// destinations. Empty disables the ordering.
    pub station_positions: HashMap<StationId, LatLong>,
}

impl PlannerConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}
