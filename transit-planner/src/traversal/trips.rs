//! Trip to service resolution.

use std::collections::HashMap;

use crate::domain::{ServiceId, TripId};
use crate::graph::Node;

/// Resolves the service a trip belongs to.
pub trait TripRepository: Send + Sync {
    fn service_for_trip(&self, trip: &TripId) -> Option<ServiceId>;
}

/// Trip to service lookup held in memory.
#[derive(Debug, Clone, Default)]
pub struct TripServiceIndex {
    services: HashMap<TripId, ServiceId>,
}

impl TripServiceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, trip: TripId, service: ServiceId) {
        self.services.insert(trip, service);
    }

    /// Index every node that carries both a trip id and a service id
    /// (minute nodes, in a time-expanded graph).
    pub fn from_nodes<'a>(nodes: impl IntoIterator<Item = &'a Node>) -> Self {
        let services = nodes
            .into_iter()
            .filter_map(|node| {
                let trip = node.properties.trip_id.clone()?;
                let service = node.properties.service_id.clone()?;
                Some((trip, service))
            })
            .collect();
        Self { services }
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl TripRepository for TripServiceIndex {
    fn service_for_trip(&self, trip: &TripId) -> Option<ServiceId> {
        self.services.get(trip).cloned()
    }
}
