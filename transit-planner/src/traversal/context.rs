//! Read-only search context shared by every state of a query.

use std::fmt;
use std::sync::Arc;

use crate::domain::StationId;
use crate::graph::{GraphStore, NodeId};

use super::config::TraversalConfig;
use super::proximity::SortsPositions;
use super::registry::BuilderRegistry;
use super::state::TraversalState;
use super::trips::TripRepository;

/// Everything a state needs besides its own payload. Shared freely across
/// concurrently explored branches.
pub struct TraversalContext {
    config: TraversalConfig,
    graph: Arc<dyn GraphStore>,
    trips: Arc<dyn TripRepository>,
    sorter: Arc<dyn SortsPositions>,
    registry: &'static BuilderRegistry,
}

impl TraversalContext {
    pub fn new(
        config: TraversalConfig,
        graph: Arc<dyn GraphStore>,
        trips: Arc<dyn TripRepository>,
        sorter: Arc<dyn SortsPositions>,
    ) -> Arc<Self> {
        Arc::new(Self {
            config,
            graph,
            trips,
            sorter,
            registry: BuilderRegistry::standard(),
        })
    }

    /// The initial state of a path in this query.
    pub fn start(self: &Arc<Self>) -> Arc<TraversalState> {
        TraversalState::not_started(Arc::clone(self))
    }

    pub fn config(&self) -> &TraversalConfig {
        &self.config
    }

    pub fn graph(&self) -> &dyn GraphStore {
        self.graph.as_ref()
    }

    pub fn trips(&self) -> &dyn TripRepository {
        self.trips.as_ref()
    }

    pub fn sorter(&self) -> &dyn SortsPositions {
        self.sorter.as_ref()
    }

    pub fn registry(&self) -> &'static BuilderRegistry {
        self.registry
    }

    pub fn is_destination_node(&self, node: NodeId) -> bool {
        self.config.is_destination_node(node)
    }

    pub fn is_destination_station(&self, station: &StationId) -> bool {
        self.config.is_destination_station(station)
    }
}

impl fmt::Debug for TraversalContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TraversalContext")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
