//! Outbound relationship selection shared by the state builders.

use crate::domain::TransportMode;
use crate::graph::{Label, Node, NodeId, Relationship, RelationshipType};

use super::context::TraversalContext;
use super::error::TraversalError;

/// Outgoing relationships of `node` whose type is one of `types`, in store
/// order.
pub(crate) fn outgoing_of(ctx: &TraversalContext, node: &Node, types: &[RelationshipType]) -> Vec<Relationship> {
    ctx.graph()
        .outgoing(node.id)
        .iter()
        .filter(|rel| types.contains(&rel.kind))
        .cloned()
        .collect()
}

/// Outgoing relationships of `node` matching `keep`.
pub(crate) fn outgoing_where(
    ctx: &TraversalContext,
    node: &Node,
    keep: impl Fn(RelationshipType) -> bool,
) -> Vec<Relationship> {
    ctx.graph()
        .outgoing(node.id)
        .iter()
        .filter(|rel| keep(rel.kind))
        .cloned()
        .collect()
}

/// Final pass over a new state's outbound set.
///
/// Drops the edge straight back to `came_from` unless it continues a
/// vehicle run, and drops edges into bus-only stations when bus is
/// disabled.
pub(crate) fn finish(
    outbounds: Vec<Relationship>,
    came_from: Option<NodeId>,
    ctx: &TraversalContext,
) -> Result<Vec<Relationship>, TraversalError> {
    let bus_enabled = ctx.config().bus_enabled;
    let mut kept = Vec::with_capacity(outbounds.len());

    for rel in outbounds {
        if came_from == Some(rel.end) && !rel.kind.is_trip_continuation() {
            continue;
        }
        if !bus_enabled {
            let end = ctx.graph().node(rel.end).ok_or(TraversalError::UnknownNode(rel.end))?;
            if is_bus_only(end) {
                continue;
            }
        }
        kept.push(rel);
    }

    Ok(kept)
}

/// A station whose only mode is bus, or a bus route station.
fn is_bus_only(node: &Node) -> bool {
    if node.has_label(Label::RouteStation) {
        return node.properties.transport_mode == Some(TransportMode::Bus);
    }
    node.has_label(Label::BusStation)
        && !node
            .labels
            .iter()
            .any(|l| l.is_station() && *l != Label::BusStation)
}

/// Transport mode of a route station node.
pub(crate) fn route_station_mode(node: &Node) -> Result<TransportMode, TraversalError> {
    node.properties
        .transport_mode
        .ok_or_else(|| TraversalError::MissingProperty {
            property: "transport_mode",
            node: node.describe(),
        })
}

/// Depart relationships offered by a route station.
///
/// With the interchange-only policy, a rider still on their trip may only
/// alight over `InterchangeDepart`, unless this route station is at a
/// destination station.
pub(crate) fn depart_edges(ctx: &TraversalContext, node: &Node, mid_trip: bool) -> Vec<Relationship> {
    let at_destination = node
        .station_id()
        .is_some_and(|station| ctx.is_destination_station(station));

    if mid_trip && ctx.config().interchange_only && !at_destination {
        outgoing_of(ctx, node, &[RelationshipType::InterchangeDepart])
    } else {
        outgoing_where(ctx, node, RelationshipType::is_depart)
    }
}

/// With exactly one destination station, narrow `relationships` to those
/// leading straight to it. Returns the input unchanged when none does.
pub(crate) fn prefer_direct(
    ctx: &TraversalContext,
    relationships: Vec<Relationship>,
) -> Result<Vec<Relationship>, TraversalError> {
    let Some(destination) = ctx.config().single_destination() else {
        return Ok(relationships);
    };

    let mut direct = Vec::new();
    for rel in &relationships {
        let end = ctx.graph().node(rel.end).ok_or(TraversalError::UnknownNode(rel.end))?;
        let leads_there = end.station_id() == Some(destination)
            && (end.has_label(Label::Platform) || end.labels.iter().any(|l| l.is_station()));
        if leads_there {
            direct.push(rel.clone());
        }
    }

    if direct.is_empty() {
        Ok(relationships)
    } else {
        Ok(direct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::sync::Arc;

    use crate::domain::StationId;
    use crate::graph::{GraphBuilder, NodeProperties};
    use crate::traversal::config::TraversalConfig;
    use crate::traversal::proximity::NoSorting;
    use crate::traversal::trips::TripServiceIndex;

    fn at(station: &str) -> NodeProperties {
        NodeProperties {
            station_id: Some(StationId::new(station).unwrap()),
            ..Default::default()
        }
    }

    fn context(config: TraversalConfig) -> Arc<TraversalContext> {
        let graph = GraphBuilder::new()
            .node(1, Label::RouteStation, at("PIC"))
            .node(2, Label::Platform, at("PIC"))
            .node(3, Label::BusStation, at("PIC"))
            .node(4, Label::TramStation, at("VIC"))
            .add_node(crate::graph::Node::new(NodeId(5), Label::BusStation).with_label(Label::TrainStation))
            .node(
                6,
                Label::RouteStation,
                NodeProperties {
                    transport_mode: Some(TransportMode::Bus),
                    ..Default::default()
                },
            )
            .edge(RelationshipType::Depart, 1, 3, 1)
            .edge(RelationshipType::InterchangeDepart, 1, 2, 1)
            .edge(RelationshipType::ToService, 1, 2, 0)
            .build()
            .unwrap();
        TraversalContext::new(
            config,
            Arc::new(graph),
            Arc::new(TripServiceIndex::new()),
            Arc::new(NoSorting),
        )
    }

    fn rel(id: u64, kind: RelationshipType, end: u64) -> Relationship {
        Relationship::new(crate::graph::RelationshipId(id), kind, NodeId(1), NodeId(end), 1)
    }

    #[test]
    fn back_edge_dropped_unless_continuation() {
        let ctx = context(TraversalConfig::default());
        let rels = vec![
            rel(0, RelationshipType::Depart, 2),
            rel(1, RelationshipType::ToService, 2),
            rel(2, RelationshipType::Depart, 3),
        ];

        let kept = finish(rels, Some(NodeId(2)), &ctx).unwrap();
        let ids: Vec<u64> = kept.iter().map(|r| r.id.0).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn bus_only_ends_dropped_when_disabled() {
        let ctx = context(TraversalConfig {
            bus_enabled: false,
            ..Default::default()
        });
        let rels = vec![
            rel(0, RelationshipType::Depart, 3),
            rel(1, RelationshipType::Depart, 5),
            rel(2, RelationshipType::Depart, 4),
            rel(3, RelationshipType::Board, 6),
        ];

        let kept = finish(rels, None, &ctx).unwrap();
        let ids: Vec<u64> = kept.iter().map(|r| r.id.0).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn finish_reports_unknown_end_when_checking_modes() {
        let ctx = context(TraversalConfig {
            bus_enabled: false,
            ..Default::default()
        });
        let result = finish(vec![rel(0, RelationshipType::Depart, 99)], None, &ctx);
        assert_eq!(result, Err(TraversalError::UnknownNode(NodeId(99))));
    }

    #[test]
    fn interchange_only_mid_trip() {
        let ctx = context(TraversalConfig {
            interchange_only: true,
            ..Default::default()
        });
        let node = ctx.graph().node(NodeId(1)).unwrap().clone();

        let mid = depart_edges(&ctx, &node, true);
        assert_eq!(mid.len(), 1);
        assert_eq!(mid[0].kind, RelationshipType::InterchangeDepart);

        assert_eq!(depart_edges(&ctx, &node, false).len(), 2);
    }

    #[test]
    fn interchange_only_relaxed_at_destination() {
        let ctx = context(TraversalConfig {
            interchange_only: true,
            destination_stations: BTreeSet::from([StationId::new("PIC").unwrap()]),
            ..Default::default()
        });
        let node = ctx.graph().node(NodeId(1)).unwrap().clone();
        assert_eq!(depart_edges(&ctx, &node, true).len(), 2);
    }

    #[test]
    fn prefer_direct_with_single_destination() {
        let ctx = context(TraversalConfig {
            destination_stations: BTreeSet::from([StationId::new("VIC").unwrap()]),
            ..Default::default()
        });
        let rels = vec![rel(0, RelationshipType::Depart, 3), rel(1, RelationshipType::Depart, 4)];

        let kept = prefer_direct(&ctx, rels.clone()).unwrap();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].end, NodeId(4));

        let none_direct = vec![rels[0].clone()];
        assert_eq!(prefer_direct(&ctx, none_direct.clone()).unwrap(), none_direct);
    }

    #[test]
    fn prefer_direct_needs_single_destination() {
        let ctx = context(TraversalConfig {
            destination_stations: BTreeSet::from([
                StationId::new("VIC").unwrap(),
                StationId::new("PIC").unwrap(),
            ]),
            ..Default::default()
        });
        let rels = vec![rel(0, RelationshipType::Depart, 3), rel(1, RelationshipType::Depart, 4)];
        assert_eq!(prefer_direct(&ctx, rels.clone()).unwrap(), rels);
    }

    #[test]
    fn route_station_mode_required() {
        let node = crate::graph::Node::new(NodeId(8), Label::RouteStation);
        assert!(matches!(
            route_station_mode(&node),
            Err(TraversalError::MissingProperty {
                property: "transport_mode",
                ..
            })
        ));
    }
}
