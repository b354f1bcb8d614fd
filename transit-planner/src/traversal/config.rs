//! Per-query traversal configuration.

use std::collections::BTreeSet;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::domain::StationId;
use crate::graph::NodeId;

/// Configuration read by every state in a query. Never mutated once the
/// search has started.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraversalConfig {
    /// Stations the traveller wants to reach.
    pub destination_stations: BTreeSet<StationId>,

    /// Nodes whose arrival ends a path, whatever their label.
    pub destination_nodes: BTreeSet<NodeId>,

    /// Only alight mid-trip where the route station is an interchange.
    pub interchange_only: bool,

    /// Whether bus stations may be entered.
    pub bus_enabled: bool,

    /// Time the journey starts.
    pub query_time: NaiveTime,
}

impl TraversalConfig {
    /// Create a configuration for the given destinations.
    pub fn new(
        destination_stations: BTreeSet<StationId>,
        destination_nodes: BTreeSet<NodeId>,
        interchange_only: bool,
        bus_enabled: bool,
        query_time: NaiveTime,
    ) -> Self {
        Self {
            destination_stations,
            destination_nodes,
            interchange_only,
            bus_enabled,
            query_time,
        }
    }

    pub fn is_destination_node(&self, node: NodeId) -> bool {
        self.destination_nodes.contains(&node)
    }

    pub fn is_destination_station(&self, station: &StationId) -> bool {
        self.destination_stations.contains(station)
    }

    /// The destination station, when there is exactly one.
    pub fn single_destination(&self) -> Option<&StationId> {
        if self.destination_stations.len() == 1 {
            self.destination_stations.iter().next()
        } else {
            None
        }
    }
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            destination_stations: BTreeSet::new(),
            destination_nodes: BTreeSet::new(),
            interchange_only: false,
            bus_enabled: true,
            query_time: NaiveTime::default(),
        }
    }
}
