//! Route stations: a station paired with one route.
//!
//! A rider reaches a route station either by boarding (and then picks a
//! service) or by riding into it on a trip (and then continues, or alights).
//! Which of the two on-trip variants results depends on whether the bound
//! trip carries on from here.

use crate::graph::{Relationship, RelationshipType};
use crate::traversal::edges;
use crate::traversal::error::TraversalError;
use crate::traversal::proximity::sort_by_towards_station;
use crate::traversal::registry::{BuildArgs, Built, BuilderRegistry};
use crate::traversal::state::{StateKind, StateType};
use crate::traversal::trip_filter::services_for_trip;

fn services(args: &BuildArgs<'_>) -> Vec<Relationship> {
    edges::outgoing_of(args.ctx, args.node, &[RelationshipType::ToService])
}

/// Boarded from a platform, a station without platforms or the non-tram
/// side of a hub. Services heading for a destination
/// are offered alone when there are any, otherwise every service is offered
/// nearest-first.
fn just_boarded(args: &BuildArgs<'_>) -> Result<Built, TraversalError> {
    let mode = edges::route_station_mode(args.node)?;
    let ctx = args.ctx;
    let candidates = services(args);

    let (towards_destination, others): (Vec<_>, Vec<_>) = candidates.into_iter().partition(|rel| {
        rel.towards_station_id
            .as_ref()
            .is_some_and(|station| ctx.is_destination_station(station))
    });

    let outbounds = if towards_destination.is_empty() {
        sort_by_towards_station(ctx.sorter(), &ctx.config().destination_stations, others)
    } else {
        towards_destination
    };

    let kind = StateKind::RouteStationJustBoarded {
        station: args.node.station_id().cloned(),
        mode,
    };
    Ok(Built::new(kind, outbounds))
}

/// Ridden into from a minute node. Stays on the trip when a service here
/// carries it on, otherwise the trip ends here.
fn from_minute(args: &BuildArgs<'_>) -> Result<Built, TraversalError> {
    let mode = edges::route_station_mode(args.node)?;
    let ctx = args.ctx;
    let station = args.node.station_id().cloned();

    let continuing = match args.source.kind().existing_trip().trip_id() {
        Some(trip) => {
            let carried = services_for_trip(services(args), trip, ctx.trips());
            (!carried.is_empty()).then(|| (trip.clone(), carried))
        }
        None => None,
    };

    let (kind, outbounds) = match continuing {
        Some((trip, mut outbounds)) => {
            outbounds.extend(edges::depart_edges(ctx, args.node, true));
            (StateKind::RouteStationOnTrip { station, mode, trip }, outbounds)
        }
        None => {
            let mut outbounds = services(args);
            outbounds.extend(edges::depart_edges(ctx, args.node, false));
            (StateKind::RouteStationEndTrip { station, mode }, outbounds)
        }
    };

    let outbounds = edges::prefer_direct(ctx, outbounds)?;
    Ok(Built::new(kind, outbounds))
}

pub(super) fn register(registry: &mut BuilderRegistry) {
    use StateType as S;

    registry
        .towards(S::RouteStationJustBoarded)
        .from_each(&[S::Platform, S::TramStation, S::NoPlatformStation], just_boarded);

    registry.towards(S::RouteStationOnTrip).from(S::Minute, from_minute);
}
