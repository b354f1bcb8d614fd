//! Node labels.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::TransportMode;

/// The type tags a graph node can carry.
///
/// A node may carry several labels at once: a multi-modal hub is both a
/// `TramStation` and a `BusStation`, and interchange route stations also
/// carry the `Interchange` marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    TramStation,
    BusStation,
    TrainStation,
    FerryStation,
    SubwayStation,
    Platform,
    RouteStation,
    Service,
    Hour,
    Minute,
    Grouped,
    QueryNode,
    Interchange,
}

/// The full label set of a node.
pub type LabelSet = BTreeSet<Label>;

impl Label {
    /// Transport mode served by a station label, `None` for other labels.
    pub fn station_mode(self) -> Option<TransportMode> {
        match self {
            Label::TramStation => Some(TransportMode::Tram),
            Label::BusStation => Some(TransportMode::Bus),
            Label::TrainStation => Some(TransportMode::Train),
            Label::FerryStation => Some(TransportMode::Ferry),
            Label::SubwayStation => Some(TransportMode::Subway),
            _ => None,
        }
    }

    /// Returns true for labels naming a physical station.
    pub fn is_station(self) -> bool {
        self.station_mode().is_some()
    }

    /// Marker labels qualify a node but never select a transition.
    pub fn is_marker(self) -> bool {
        matches!(self, Label::Interchange)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
