//! Graph nodes.

use std::fmt;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use super::label::{Label, LabelSet};
use crate::domain::{PlatformId, RouteId, ServiceId, StationId, TransportMode, TripId};

/// Identity of a node in the externally owned graph store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Label-specific node properties. Which fields are present depends on the
/// node's labels; the traversal reads only those relevant to the variant it
/// builds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub station_id: Option<StationId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform_id: Option<PlatformId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_id: Option<RouteId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trip_id: Option<TripId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_id: Option<ServiceId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<NaiveTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hour: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub towards_station_id: Option<StationId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transport_mode: Option<TransportMode>,
}

/// An immutable, labelled graph node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub labels: LabelSet,
    #[serde(default)]
    pub properties: NodeProperties,
}

impl Node {
    /// Create a node carrying a single label and no properties.
    pub fn new(id: NodeId, label: Label) -> Self {
        Self {
            id,
            labels: LabelSet::from([label]),
            properties: NodeProperties::default(),
        }
    }

    pub fn with_label(mut self, label: Label) -> Self {
        self.labels.insert(label);
        self
    }

    pub fn with_properties(mut self, properties: NodeProperties) -> Self {
        self.properties = properties;
        self
    }

    pub fn has_label(&self, label: Label) -> bool {
        self.labels.contains(&label)
    }

    pub fn station_id(&self) -> Option<&StationId> {
        self.properties.station_id.as_ref()
    }

    pub fn trip_id(&self) -> Option<&TripId> {
        self.properties.trip_id.as_ref()
    }

    /// Full diagnostic rendering: id, every label and every property.
    ///
    /// Used in fatal traversal errors, where the node is evidence of a graph
    /// construction defect.
    pub fn describe(&self) -> String {
        let labels: Vec<String> = self.labels.iter().map(|l| l.to_string()).collect();
        let properties = serde_json::to_string(&self.properties)
            .unwrap_or_else(|e| format!("<unrenderable properties: {e}>"));
        format!(
            "node {} labels [{}] properties {}",
            self.id,
            labels.join(", "),
            properties
        )
    }
}
