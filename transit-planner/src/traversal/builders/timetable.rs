//! The time-expanded levels of a run: service, hour, minute.
//!
//! The trip a rider is bound to rides along through all three, narrowing the
//! hour's minutes and the minute's onward runs.

use crate::graph::RelationshipType;
use crate::traversal::edges;
use crate::traversal::error::TraversalError;
use crate::traversal::existing_trip::ExistingTrip;
use crate::traversal::registry::{BuildArgs, Built, BuilderRegistry};
use crate::traversal::state::{StateKind, StateType};
use crate::traversal::trip_filter::{goes_to_for_trip, minutes_for_trip};

/// Still on the trip ridden into the route station, or free to pick any.
fn service(args: &BuildArgs<'_>) -> Result<Built, TraversalError> {
    let trip = args.source.kind().existing_trip();
    let outbounds = edges::outgoing_of(args.ctx, args.node, &[RelationshipType::ToHour]);
    Ok(Built::new(StateKind::Service { trip }, outbounds))
}

fn hour(args: &BuildArgs<'_>) -> Result<Built, TraversalError> {
    let trip = args.source.kind().existing_trip();
    let minutes = edges::outgoing_of(args.ctx, args.node, &[RelationshipType::ToMinute]);
    let outbounds = match trip.trip_id() {
        Some(bound) => minutes_for_trip(args.ctx.graph(), minutes, bound)?,
        None => minutes,
    };
    Ok(Built::new(StateKind::Hour { trip }, outbounds))
}

/// A concrete scheduled departure. An unbound rider commits to the run of
/// the minute node arrived at.
fn minute(args: &BuildArgs<'_>) -> Result<Built, TraversalError> {
    let runs = edges::outgoing_where(args.ctx, args.node, RelationshipType::is_goes_to);

    let (trip, outbounds) = match args.source.kind().existing_trip() {
        ExistingTrip::Bound(trip) => {
            let outbounds = goes_to_for_trip(runs, &trip);
            (ExistingTrip::Bound(trip), outbounds)
        }
        ExistingTrip::Unbound => (ExistingTrip::from(args.node.trip_id().cloned()), runs),
    };

    Ok(Built::new(StateKind::Minute { trip }, outbounds))
}

pub(super) fn register(registry: &mut BuilderRegistry) {
    use StateType as S;

    registry.towards(S::Service).from_each(
        &[
            S::RouteStationJustBoarded,
            S::RouteStationOnTrip,
            S::RouteStationEndTrip,
        ],
        service,
    );
    registry.towards(S::Hour).from(S::Service, hour);
    registry.towards(S::Minute).from(S::Hour, minute);
}
