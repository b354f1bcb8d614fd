//! Trip-continuity filtering.
//!
//! Once a rider is committed to a trip, every further step until they alight
//! must stay on that trip. These filters narrow candidate relationships to
//! the ones consistent with the bound trip id.

use crate::domain::TripId;
use crate::graph::{GraphStore, Relationship};

use super::error::TraversalError;
use super::trips::TripRepository;

/// `ToMinute` relationships whose minute node runs `trip`.
pub fn minutes_for_trip(
    graph: &dyn GraphStore,
    relationships: Vec<Relationship>,
    trip: &TripId,
) -> Result<Vec<Relationship>, TraversalError> {
    let mut kept = Vec::with_capacity(relationships.len());
    for rel in relationships {
        let minute = graph.node(rel.end).ok_or(TraversalError::UnknownNode(rel.end))?;
        if minute.trip_id() == Some(trip) {
            kept.push(rel);
        }
    }
    Ok(kept)
}

/// Vehicle-goes-to relationships annotated with exactly `trip`.
/// Relationships without a trip annotation cannot be shown to continue the
/// trip and are dropped.
pub fn goes_to_for_trip(relationships: Vec<Relationship>, trip: &TripId) -> Vec<Relationship> {
    relationships
        .into_iter()
        .filter(|rel| rel.trip_id.as_ref() == Some(trip))
        .collect()
}

/// `ToService` relationships that carry `trip` onwards from a route station.
///
/// Membership in the relationship's trip set is exact. A relationship with
/// no trip set matches when its service owns the trip.
pub fn services_for_trip(
    relationships: Vec<Relationship>,
    trip: &TripId,
    trips: &dyn TripRepository,
) -> Vec<Relationship> {
    let mut owning_service = None;
    relationships
        .into_iter()
        .filter(|rel| match (&rel.trip_ids, &rel.service_id) {
            (Some(members), _) => members.contains(trip),
            (None, Some(service)) => {
                let owner = owning_service.get_or_insert_with(|| trips.service_for_trip(trip));
                owner.as_ref() == Some(service)
            }
            (None, None) => false,
        })
        .collect()
}
