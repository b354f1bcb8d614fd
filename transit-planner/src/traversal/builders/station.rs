//! Station states: tram stations, stations without platforms and grouped
//! hubs.

use std::collections::BTreeSet;

use crate::domain::TransportMode;
use crate::graph::{Relationship, RelationshipType};
use crate::traversal::edges;
use crate::traversal::error::TraversalError;
use crate::traversal::registry::{BuildArgs, Built, BuilderRegistry};
use crate::traversal::state::{StateKind, StateType};

/// How the rider came to be at the station. Decides which kinds of onward
/// relationship make sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Arrival {
    /// First node of the path, or stepping off a tram platform.
    Start,
    /// From a walk point.
    Walked,
    /// From a neighbouring station.
    Neighbour,
    /// Down from a grouped hub.
    Grouped,
    /// Off a vehicle.
    Alighted,
}

impl Arrival {
    fn offers(self, kind: RelationshipType) -> bool {
        match kind {
            RelationshipType::WalksFrom => self != Arrival::Walked,
            k if k.is_neighbour() => self != Arrival::Neighbour,
            RelationshipType::GroupedToParent => self != Arrival::Grouped,
            _ => true,
        }
    }
}

/// `platforms` is set only for the tram station reading of a node. A hub
/// entered as a station without platforms never offers its tram platforms.
fn station_outbounds(args: &BuildArgs<'_>, arrival: Arrival, platforms: bool) -> Vec<Relationship> {
    let node = args.node;
    let has_other = node
        .labels
        .iter()
        .filter_map(|l| l.station_mode())
        .any(|mode| !mode.has_platforms());

    edges::outgoing_where(args.ctx, node, |kind| {
        let boarding = match kind {
            RelationshipType::EnterPlatform => platforms,
            k if k.is_board() => has_other,
            _ => false,
        };
        let moving_on = matches!(kind, RelationshipType::WalksFrom | RelationshipType::GroupedToParent)
            || kind.is_neighbour();

        boarding || (moving_on && arrival.offers(kind))
    })
}

fn tram_station(args: &BuildArgs<'_>, arrival: Arrival) -> Result<Built, TraversalError> {
    let kind = StateKind::TramStation {
        station: args.node.station_id().cloned(),
    };
    Ok(Built::new(kind, station_outbounds(args, arrival, true)))
}

fn no_platform_station(args: &BuildArgs<'_>, arrival: Arrival) -> Result<Built, TraversalError> {
    let modes: BTreeSet<TransportMode> = args.node.labels.iter().filter_map(|l| l.station_mode()).collect();
    let kind = StateKind::NoPlatformStation {
        station: args.node.station_id().cloned(),
        modes,
    };
    Ok(Built::new(kind, station_outbounds(args, arrival, false)))
}

fn tram_from_start(args: &BuildArgs<'_>) -> Result<Built, TraversalError> {
    tram_station(args, Arrival::Start)
}

fn tram_from_walk(args: &BuildArgs<'_>) -> Result<Built, TraversalError> {
    tram_station(args, Arrival::Walked)
}

fn tram_from_neighbour(args: &BuildArgs<'_>) -> Result<Built, TraversalError> {
    tram_station(args, Arrival::Neighbour)
}

fn tram_from_group(args: &BuildArgs<'_>) -> Result<Built, TraversalError> {
    tram_station(args, Arrival::Grouped)
}

fn no_platform_from_start(args: &BuildArgs<'_>) -> Result<Built, TraversalError> {
    no_platform_station(args, Arrival::Start)
}

fn no_platform_from_walk(args: &BuildArgs<'_>) -> Result<Built, TraversalError> {
    no_platform_station(args, Arrival::Walked)
}

fn no_platform_from_neighbour(args: &BuildArgs<'_>) -> Result<Built, TraversalError> {
    no_platform_station(args, Arrival::Neighbour)
}

fn no_platform_from_group(args: &BuildArgs<'_>) -> Result<Built, TraversalError> {
    no_platform_station(args, Arrival::Grouped)
}

fn no_platform_from_vehicle(args: &BuildArgs<'_>) -> Result<Built, TraversalError> {
    no_platform_station(args, Arrival::Alighted)
}

fn grouped(args: &BuildArgs<'_>) -> Result<Built, TraversalError> {
    let kind = StateKind::GroupedStation {
        station: args.node.station_id().cloned(),
    };
    let outbounds = edges::outgoing_of(args.ctx, args.node, &[RelationshipType::GroupedToChild]);
    Ok(Built::new(kind, outbounds))
}

pub(super) fn register(registry: &mut BuilderRegistry) {
    use StateType as S;

    registry
        .towards(S::TramStation)
        .from_each(&[S::NotStarted, S::Platform], tram_from_start)
        .from(S::Walking, tram_from_walk)
        .from_each(&[S::TramStation, S::NoPlatformStation], tram_from_neighbour)
        .from(S::GroupedStation, tram_from_group);

    registry
        .towards(S::NoPlatformStation)
        .from(S::NotStarted, no_platform_from_start)
        .from(S::Walking, no_platform_from_walk)
        .from_each(&[S::TramStation, S::NoPlatformStation], no_platform_from_neighbour)
        .from(S::GroupedStation, no_platform_from_group)
        .from_each(
            &[S::RouteStationOnTrip, S::RouteStationEndTrip],
            no_platform_from_vehicle,
        );

    registry
        .towards(S::GroupedStation)
        .from_each(&[S::NotStarted, S::TramStation, S::NoPlatformStation], grouped);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walk_arrival_hides_walk_back() {
        assert!(!Arrival::Walked.offers(RelationshipType::WalksFrom));
        assert!(Arrival::Walked.offers(RelationshipType::TramNeighbour));
        assert!(Arrival::Start.offers(RelationshipType::WalksFrom));
    }

    #[test]
    fn neighbour_arrival_hides_further_neighbours() {
        for kind in [
            RelationshipType::Neighbour,
            RelationshipType::TramNeighbour,
            RelationshipType::BusNeighbour,
        ] {
            assert!(!Arrival::Neighbour.offers(kind));
            assert!(Arrival::Alighted.offers(kind));
        }
    }

    #[test]
    fn grouped_arrival_hides_parent() {
        assert!(!Arrival::Grouped.offers(RelationshipType::GroupedToParent));
        assert!(Arrival::Neighbour.offers(RelationshipType::GroupedToParent));
    }
}
