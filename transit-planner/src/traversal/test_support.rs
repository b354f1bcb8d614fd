//! A small time-expanded network for exercising the state machine.
//!
//! One tram line runs ALT -> PIC -> BUR. Trip T1 runs the whole line, T2
//! terminates at PIC. PIC has a bus stop next door, ALT has a train
//! station next door and both ALT stations sit under a grouped hub. SHU is a
//! tram and bus hub, reached by bus trip B1 from the PIC bus stop.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveTime;

use crate::domain::{LatLong, PlatformId, ServiceId, StationId, TransportMode, TripId};
use crate::graph::{
    GraphBuilder, GraphStore, InMemoryGraph, Label, Node, NodeId, NodeProperties, Relationship,
    RelationshipType as R, TripIdSet,
};
use crate::journey::JourneyState;

use super::{
    NoSorting, SortsPositions, StationPositions, TraversalConfig, TraversalContext, TraversalError,
    TraversalState, TripServiceIndex,
};

pub const QUERY: u64 = 1;
pub const ALT: u64 = 10;
pub const ALT_PLATFORM: u64 = 11;
pub const ALT_ROUTE: u64 = 12;
pub const ALT_SERVICE: u64 = 13;
pub const ALT_HOUR: u64 = 14;
pub const MINUTE_T1: u64 = 15;
pub const MINUTE_T2: u64 = 16;
pub const ALT_SERVICE_BUR: u64 = 17;
pub const MINUTE_NO_TRIP: u64 = 18;
pub const PIC_ROUTE: u64 = 20;
pub const PIC_SERVICE: u64 = 21;
pub const PIC_PLATFORM: u64 = 22;
pub const PIC_HOUR: u64 = 23;
pub const PIC_MINUTE_T1: u64 = 24;
pub const PIC_MINUTE_T3: u64 = 25;
pub const PIC: u64 = 26;
pub const PIC_SERVICE_T3: u64 = 27;
pub const BUR_ROUTE: u64 = 30;
pub const BUR_PLATFORM: u64 = 31;
pub const BUR: u64 = 32;
pub const ALR: u64 = 40;
pub const ALR_ROUTE: u64 = 41;
pub const PIC_BUS: u64 = 50;
pub const PIC_BUS_ROUTE: u64 = 51;
pub const QUERY_PIC: u64 = 52;
pub const PIC_BUS_SERVICE: u64 = 53;
pub const PIC_BUS_HOUR: u64 = 54;
pub const PIC_BUS_MINUTE: u64 = 55;
pub const HUB: u64 = 60;
pub const SHU: u64 = 70;
pub const SHU_PLATFORM: u64 = 71;
pub const SHU_BUS_ROUTE: u64 = 72;

pub fn station(s: &str) -> StationId {
    StationId::new(s).unwrap()
}

pub fn trip(s: &str) -> TripId {
    TripId::new(s).unwrap()
}

fn at(s: &str) -> NodeProperties {
    NodeProperties {
        station_id: Some(station(s)),
        ..Default::default()
    }
}

fn platform(s: &str, p: &str) -> NodeProperties {
    NodeProperties {
        platform_id: Some(PlatformId::new(p).unwrap()),
        ..at(s)
    }
}

fn route(s: &str, mode: TransportMode) -> NodeProperties {
    NodeProperties {
        transport_mode: Some(mode),
        ..at(s)
    }
}

fn minute(t: Option<&str>, hh: u32, mm: u32) -> NodeProperties {
    NodeProperties {
        trip_id: t.map(trip),
        service_id: Some(ServiceId::new("S1").unwrap()),
        departure_time: NaiveTime::from_hms_opt(hh, mm, 0),
        ..Default::default()
    }
}

fn hour(h: u8) -> NodeProperties {
    NodeProperties {
        hour: Some(h),
        ..Default::default()
    }
}

fn towards(s: &'static str, trips: &'static str) -> impl FnOnce(&mut Relationship) {
    move |rel: &mut Relationship| {
        rel.towards_station_id = Some(station(s));
        rel.trip_ids = Some(TripIdSet::parse(trips).unwrap());
    }
}

fn run(t: &'static str) -> impl FnOnce(&mut Relationship) {
    move |rel: &mut Relationship| rel.trip_id = Some(trip(t))
}

pub fn network() -> InMemoryGraph {
    GraphBuilder::new()
        .node(QUERY, Label::QueryNode, NodeProperties::default())
        .node(ALT, Label::TramStation, at("ALT"))
        .node(ALT_PLATFORM, Label::Platform, platform("ALT", "ALT1"))
        .node(ALT_ROUTE, Label::RouteStation, route("ALT", TransportMode::Tram))
        .node(ALT_SERVICE, Label::Service, NodeProperties::default())
        .node(ALT_HOUR, Label::Hour, hour(8))
        .node(MINUTE_T1, Label::Minute, minute(Some("T1"), 8, 5))
        .node(MINUTE_T2, Label::Minute, minute(Some("T2"), 8, 20))
        .node(ALT_SERVICE_BUR, Label::Service, NodeProperties::default())
        .node(MINUTE_NO_TRIP, Label::Minute, minute(None, 8, 40))
        .add_node(
            Node::new(NodeId(PIC_ROUTE), Label::RouteStation)
                .with_label(Label::Interchange)
                .with_properties(route("PIC", TransportMode::Tram)),
        )
        .node(PIC_SERVICE, Label::Service, NodeProperties::default())
        .node(PIC_PLATFORM, Label::Platform, platform("PIC", "PIC1"))
        .node(PIC_HOUR, Label::Hour, hour(8))
        .node(PIC_MINUTE_T1, Label::Minute, minute(Some("T1"), 8, 15))
        .node(PIC_MINUTE_T3, Label::Minute, minute(Some("T3"), 8, 30))
        .node(PIC, Label::TramStation, at("PIC"))
        .node(PIC_SERVICE_T3, Label::Service, NodeProperties::default())
        .node(BUR_ROUTE, Label::RouteStation, route("BUR", TransportMode::Tram))
        .node(BUR_PLATFORM, Label::Platform, platform("BUR", "BUR1"))
        .node(BUR, Label::TramStation, at("BUR"))
        .node(ALR, Label::TrainStation, at("ALR"))
        .node(ALR_ROUTE, Label::RouteStation, route("ALR", TransportMode::Train))
        .node(PIC_BUS, Label::BusStation, at("PIB"))
        .node(PIC_BUS_ROUTE, Label::RouteStation, route("PIB", TransportMode::Bus))
        .node(QUERY_PIC, Label::QueryNode, NodeProperties::default())
        .node(HUB, Label::Grouped, at("MAN"))
        .add_node(
            Node::new(NodeId(SHU), Label::TramStation)
                .with_label(Label::BusStation)
                .with_label(Label::Interchange)
                .with_properties(at("SHU")),
        )
        .node(SHU_PLATFORM, Label::Platform, platform("SHU", "SHU1"))
        .node(PIC_BUS_SERVICE, Label::Service, NodeProperties::default())
        .node(PIC_BUS_HOUR, Label::Hour, hour(8))
        .node(PIC_BUS_MINUTE, Label::Minute, minute(Some("B1"), 8, 30))
        .node(SHU_BUS_ROUTE, Label::RouteStation, route("SHU", TransportMode::Bus))
        // walks
        .edge(R::WalksTo, QUERY, ALT, 5)
        .edge(R::WalksTo, QUERY, SHU, 7)
        .edge(R::WalksFrom, ALT, QUERY, 5)
        .edge(R::WalksFrom, PIC_BUS, QUERY_PIC, 3)
        // ALT
        .edge(R::EnterPlatform, ALT, ALT_PLATFORM, 1)
        .edge(R::Neighbour, ALT, ALR, 3)
        .edge(R::GroupedToParent, ALT, HUB, 0)
        .edge(R::LeavePlatform, ALT_PLATFORM, ALT, 1)
        .edge(R::Board, ALT_PLATFORM, ALT_ROUTE, 1)
        .edge_with(R::ToService, ALT_ROUTE, ALT_SERVICE, 0, towards("PIC", "T1,T2"))
        .edge_with(R::ToService, ALT_ROUTE, ALT_SERVICE_BUR, 0, towards("BUR", "T5"))
        .edge(R::Depart, ALT_ROUTE, ALT_PLATFORM, 1)
        .edge(R::ToHour, ALT_SERVICE, ALT_HOUR, 0)
        .edge(R::ToMinute, ALT_HOUR, MINUTE_T1, 5)
        .edge(R::ToMinute, ALT_HOUR, MINUTE_T2, 20)
        .edge(R::ToMinute, ALT_HOUR, MINUTE_NO_TRIP, 40)
        .edge_with(R::TramGoesTo, MINUTE_T1, PIC_ROUTE, 10, run("T1"))
        .edge_with(R::TramGoesTo, MINUTE_T2, PIC_ROUTE, 10, run("T2"))
        .edge(R::TramGoesTo, MINUTE_NO_TRIP, PIC_ROUTE, 10)
        // PIC
        .edge_with(R::ToService, PIC_ROUTE, PIC_SERVICE, 0, towards("BUR", "T1,T3"))
        .edge_with(R::ToService, PIC_ROUTE, PIC_SERVICE_T3, 0, towards("ALT", "T3"))
        .edge(R::Depart, PIC_ROUTE, PIC_PLATFORM, 1)
        .edge(R::InterchangeDepart, PIC_ROUTE, PIC_BUS, 2)
        .edge(R::ToHour, PIC_SERVICE, PIC_HOUR, 0)
        .edge(R::ToMinute, PIC_HOUR, PIC_MINUTE_T1, 0)
        .edge(R::ToMinute, PIC_HOUR, PIC_MINUTE_T3, 15)
        .edge_with(R::TramGoesTo, PIC_MINUTE_T1, BUR_ROUTE, 8, run("T1"))
        .edge_with(R::TramGoesTo, PIC_MINUTE_T3, BUR_ROUTE, 8, run("T3"))
        .edge(R::LeavePlatform, PIC_PLATFORM, PIC, 1)
        .edge(R::Board, PIC_PLATFORM, PIC_ROUTE, 1)
        .edge(R::EnterPlatform, PIC, PIC_PLATFORM, 1)
        .edge(R::BusNeighbour, PIC, PIC_BUS, 2)
        .edge(R::Board, PIC_BUS, PIC_BUS_ROUTE, 1)
        // BUR
        .edge(R::Depart, BUR_ROUTE, BUR_PLATFORM, 1)
        .edge(R::LeavePlatform, BUR_PLATFORM, BUR, 1)
        // ALR and the hub
        .edge(R::Neighbour, ALR, ALT, 3)
        .edge(R::Board, ALR, ALR_ROUTE, 1)
        .edge(R::GroupedToChild, HUB, ALT, 0)
        .edge(R::GroupedToChild, HUB, ALR, 0)
        // bus B1 from PIC to SHU
        .edge_with(R::ToService, PIC_BUS_ROUTE, PIC_BUS_SERVICE, 0, towards("SHU", "B1"))
        .edge(R::ToHour, PIC_BUS_SERVICE, PIC_BUS_HOUR, 0)
        .edge(R::ToMinute, PIC_BUS_HOUR, PIC_BUS_MINUTE, 30)
        .edge_with(R::BusGoesTo, PIC_BUS_MINUTE, SHU_BUS_ROUTE, 12, run("B1"))
        .edge(R::Depart, SHU_BUS_ROUTE, SHU, 1)
        // SHU
        .edge(R::EnterPlatform, SHU, SHU_PLATFORM, 1)
        .edge(R::Board, SHU, PIC_BUS_ROUTE, 1)
        .build()
        .unwrap()
}

pub fn positions() -> StationPositions {
    StationPositions::new(HashMap::from([
        (station("ALT"), LatLong::new(53.3874, -2.3476)),
        (station("PIC"), LatLong::new(53.4774, -2.2309)),
        (station("BUR"), LatLong::new(53.5910, -2.2969)),
        (station("RAD"), LatLong::new(53.5612, -2.3268)),
    ]))
}

pub fn context(config: TraversalConfig) -> Arc<TraversalContext> {
    context_with_sorter(config, Arc::new(NoSorting))
}

pub fn context_with_sorter(config: TraversalConfig, sorter: Arc<dyn SortsPositions>) -> Arc<TraversalContext> {
    let graph = network();
    let trips = TripServiceIndex::from_nodes(graph.nodes());
    TraversalContext::new(config, Arc::new(graph), Arc::new(trips), sorter)
}

pub fn morning() -> NaiveTime {
    NaiveTime::from_hms_opt(8, 0, 0).unwrap()
}

/// One path through the network, with its own journey.
pub struct Rider {
    pub ctx: Arc<TraversalContext>,
    pub journey: JourneyState,
    pub state: Arc<TraversalState>,
}

impl Rider {
    pub fn new(config: TraversalConfig) -> Self {
        Self::on(context(config))
    }

    pub fn on(ctx: Arc<TraversalContext>) -> Self {
        Self {
            journey: JourneyState::new(ctx.config().query_time),
            state: ctx.start(),
            ctx,
        }
    }

    /// Follow the offered relationship to `node`; from `NotStarted`, enter
    /// `node` at no cost.
    pub fn enter(&mut self, node: u64) -> Result<(), TraversalError> {
        let cost = if self.state.node_id().is_none() {
            0
        } else {
            self.state
                .outbounds()
                .iter()
                .find(|rel| rel.end == NodeId(node))
                .unwrap_or_else(|| panic!("{:?} offers nothing to #{node}", self.state))
                .cost
        };
        self.force(node, cost)
    }

    /// Enter `node` whether or not it is offered.
    pub fn force(&mut self, node: u64, cost: u32) -> Result<(), TraversalError> {
        let ctx = Arc::clone(&self.ctx);
        let node = ctx.graph().node(NodeId(node)).unwrap();
        self.state = self
            .state
            .next_state_for_labels(&node.labels, node, &mut self.journey, cost)?;
        Ok(())
    }

    pub fn ride(&mut self, nodes: &[u64]) -> Result<(), TraversalError> {
        nodes.iter().try_for_each(|n| self.enter(*n))
    }

    /// End nodes of the current outbound set, in offer order.
    pub fn offered(&self) -> Vec<u64> {
        self.state.outbounds().iter().map(|rel| rel.end.0).collect()
    }
}
