//! Tram platforms: between a tram station and its route stations.

use crate::graph::{Relationship, RelationshipType};
use crate::traversal::edges;
use crate::traversal::error::TraversalError;
use crate::traversal::registry::{BuildArgs, Built, BuilderRegistry};
use crate::traversal::state::{StateKind, StateType};

fn platform_kind(args: &BuildArgs<'_>) -> StateKind {
    StateKind::Platform {
        station: args.node.station_id().cloned(),
        platform: args.node.properties.platform_id.clone(),
    }
}

fn boardings(args: &BuildArgs<'_>) -> Vec<Relationship> {
    edges::outgoing_where(args.ctx, args.node, RelationshipType::is_board)
}

/// Entered from the station: the rider is here to board.
fn from_station(args: &BuildArgs<'_>) -> Result<Built, TraversalError> {
    Ok(Built::new(platform_kind(args), boardings(args)))
}

/// Stepped off a tram: leave the platform or change to another route.
fn from_vehicle(args: &BuildArgs<'_>) -> Result<Built, TraversalError> {
    let outbounds = edges::outgoing_where(args.ctx, args.node, |kind| {
        kind == RelationshipType::LeavePlatform || kind.is_board()
    });
    let outbounds = edges::prefer_direct(args.ctx, outbounds)?;
    Ok(Built::new(platform_kind(args), outbounds))
}

pub(super) fn register(registry: &mut BuilderRegistry) {
    use StateType as S;

    registry
        .towards(S::Platform)
        .from(S::TramStation, from_station)
        .from_each(&[S::RouteStationOnTrip, S::RouteStationEndTrip], from_vehicle);
}
