//! Graph relationships (edges).

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::node::NodeId;
use crate::domain::{InvalidId, ServiceId, StationId, TripId};

/// Identity of a relationship in the graph store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelationshipId(pub u64);

/// The type of a relationship. The graph schema fixes which types leave
/// which kinds of node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipType {
    /// Platform or station to route station.
    Board,
    InterchangeBoard,
    /// Route station to platform or station.
    Depart,
    InterchangeDepart,
    /// Route station to service.
    ToService,
    ToHour,
    ToMinute,
    /// Minute to the next route station on the run.
    TramGoesTo,
    BusGoesTo,
    TrainGoesTo,
    EnterPlatform,
    LeavePlatform,
    /// Query node to station.
    WalksTo,
    /// Station to query node.
    WalksFrom,
    Neighbour,
    TramNeighbour,
    BusNeighbour,
    GroupedToParent,
    GroupedToChild,
}

impl RelationshipType {
    pub fn is_goes_to(self) -> bool {
        matches!(
            self,
            RelationshipType::TramGoesTo | RelationshipType::BusGoesTo | RelationshipType::TrainGoesTo
        )
    }

    pub fn is_neighbour(self) -> bool {
        matches!(
            self,
            RelationshipType::Neighbour | RelationshipType::TramNeighbour | RelationshipType::BusNeighbour
        )
    }

    pub fn is_board(self) -> bool {
        matches!(self, RelationshipType::Board | RelationshipType::InterchangeBoard)
    }

    pub fn is_depart(self) -> bool {
        matches!(self, RelationshipType::Depart | RelationshipType::InterchangeDepart)
    }

    /// Edges that carry a rider along a vehicle run. These are never
    /// suppressed as back edges.
    pub fn is_trip_continuation(self) -> bool {
        matches!(
            self,
            RelationshipType::ToService | RelationshipType::ToHour | RelationshipType::ToMinute
        ) || self.is_goes_to()
    }
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// The set of trips using a `ToService` edge.
///
/// Graph construction serialises this as a comma-separated list. Membership
/// is always exact: `T1` is not a member of `T10,T2`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TripIdSet(BTreeSet<TripId>);

impl TripIdSet {
    /// Parse the serialised comma-separated form. Blank entries are skipped.
    ///
    /// # Examples
    ///
    /// ```
    /// use transit_planner::domain::TripId;
    /// use transit_planner::graph::TripIdSet;
    ///
    /// let trips = TripIdSet::parse("T10, T2").unwrap();
    /// assert!(trips.contains(&TripId::new("T10").unwrap()));
    /// assert!(!trips.contains(&TripId::new("T1").unwrap()));
    /// ```
    pub fn parse(serialized: &str) -> Result<Self, InvalidId> {
        serialized
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(TripId::new)
            .collect::<Result<BTreeSet<_>, _>>()
            .map(TripIdSet)
    }

    pub fn contains(&self, trip: &TripId) -> bool {
        self.0.contains(trip)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TripId> {
        self.0.iter()
    }
}

impl FromIterator<TripId> for TripIdSet {
    fn from_iter<I: IntoIterator<Item = TripId>>(iter: I) -> Self {
        TripIdSet(iter.into_iter().collect())
    }
}

/// An immutable, typed, cost-bearing edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    pub id: RelationshipId,
    #[serde(rename = "type")]
    pub kind: RelationshipType,
    pub start: NodeId,
    pub end: NodeId,
    /// Cost in minutes.
    pub cost: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trip_id: Option<TripId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trip_ids: Option<TripIdSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_id: Option<ServiceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub station_id: Option<StationId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub towards_station_id: Option<StationId>,
}

impl Relationship {
    pub fn new(id: RelationshipId, kind: RelationshipType, start: NodeId, end: NodeId, cost: u32) -> Self {
        Self {
            id,
            kind,
            start,
            end,
            cost,
            trip_id: None,
            trip_ids: None,
            service_id: None,
            station_id: None,
            towards_station_id: None,
        }
    }
}
