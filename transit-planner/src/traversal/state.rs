//! Traversal states.
//!
//! A [`TraversalState`] is the logical position of a traveller on one path:
//! where they are, how they got there and which relationships they may take
//! next. States form an immutable chain through `Arc` parents. Dropping the
//! last handle to a branch releases it.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::domain::{PlatformId, StationId, TransportMode, TripId};
use crate::graph::{Label, LabelSet, Node, NodeId, Relationship};
use crate::journey::JourneyState;

use super::context::TraversalContext;
use super::edges;
use super::error::TraversalError;
use super::existing_trip::ExistingTrip;
use super::registry::BuildArgs;
use super::transitions::{self, Event};

/// Discriminant of a traversal state variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StateType {
    NotStarted,
    Walking,
    TramStation,
    NoPlatformStation,
    GroupedStation,
    Platform,
    RouteStationJustBoarded,
    RouteStationOnTrip,
    RouteStationEndTrip,
    Service,
    Hour,
    Minute,
    Destination,
}

impl StateType {
    pub const ALL: [StateType; 13] = [
        StateType::NotStarted,
        StateType::Walking,
        StateType::TramStation,
        StateType::NoPlatformStation,
        StateType::GroupedStation,
        StateType::Platform,
        StateType::RouteStationJustBoarded,
        StateType::RouteStationOnTrip,
        StateType::RouteStationEndTrip,
        StateType::Service,
        StateType::Hour,
        StateType::Minute,
        StateType::Destination,
    ];
}

impl fmt::Display for StateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Per-variant payload. Each variant carries only what it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateKind {
    NotStarted,
    Walking,
    TramStation {
        station: Option<StationId>,
    },
    NoPlatformStation {
        station: Option<StationId>,
        modes: BTreeSet<TransportMode>,
    },
    GroupedStation {
        station: Option<StationId>,
    },
    Platform {
        station: Option<StationId>,
        platform: Option<PlatformId>,
    },
    RouteStationJustBoarded {
        station: Option<StationId>,
        mode: TransportMode,
    },
    RouteStationOnTrip {
        station: Option<StationId>,
        mode: TransportMode,
        trip: TripId,
    },
    RouteStationEndTrip {
        station: Option<StationId>,
        mode: TransportMode,
    },
    Service {
        trip: ExistingTrip,
    },
    Hour {
        trip: ExistingTrip,
    },
    Minute {
        trip: ExistingTrip,
    },
    Destination {
        station: Option<StationId>,
    },
}

impl StateKind {
    pub fn state_type(&self) -> StateType {
        match self {
            StateKind::NotStarted => StateType::NotStarted,
            StateKind::Walking => StateType::Walking,
            StateKind::TramStation { .. } => StateType::TramStation,
            StateKind::NoPlatformStation { .. } => StateType::NoPlatformStation,
            StateKind::GroupedStation { .. } => StateType::GroupedStation,
            StateKind::Platform { .. } => StateType::Platform,
            StateKind::RouteStationJustBoarded { .. } => StateType::RouteStationJustBoarded,
            StateKind::RouteStationOnTrip { .. } => StateType::RouteStationOnTrip,
            StateKind::RouteStationEndTrip { .. } => StateType::RouteStationEndTrip,
            StateKind::Service { .. } => StateType::Service,
            StateKind::Hour { .. } => StateType::Hour,
            StateKind::Minute { .. } => StateType::Minute,
            StateKind::Destination { .. } => StateType::Destination,
        }
    }

    /// The trip carried through the service/hour/minute levels, or the trip
    /// still being ridden at a route station.
    pub fn existing_trip(&self) -> ExistingTrip {
        match self {
            StateKind::Service { trip } | StateKind::Hour { trip } | StateKind::Minute { trip } => trip.clone(),
            StateKind::RouteStationOnTrip { trip, .. } => ExistingTrip::bound(trip.clone()),
            _ => ExistingTrip::unbound(),
        }
    }

    /// Mode to leave when alighting from this state.
    pub fn alighting_mode(&self) -> Option<TransportMode> {
        match self {
            StateKind::RouteStationOnTrip { mode, .. } | StateKind::RouteStationEndTrip { mode, .. } => Some(*mode),
            _ => None,
        }
    }

    pub fn station(&self) -> Option<&StationId> {
        match self {
            StateKind::TramStation { station }
            | StateKind::NoPlatformStation { station, .. }
            | StateKind::GroupedStation { station }
            | StateKind::Platform { station, .. }
            | StateKind::RouteStationJustBoarded { station, .. }
            | StateKind::RouteStationOnTrip { station, .. }
            | StateKind::RouteStationEndTrip { station, .. }
            | StateKind::Destination { station } => station.as_ref(),
            _ => None,
        }
    }
}

/// One step of one path in the search.
pub struct TraversalState {
    kind: StateKind,
    node: Option<NodeId>,
    cost: u32,
    total_cost: u32,
    parent: Option<Arc<TraversalState>>,
    outbounds: Vec<Relationship>,
    ctx: Arc<TraversalContext>,
}

impl TraversalState {
    /// The state before the first node of a path. It offers no relationships
    /// of its own; the driver feeds it the start node.
    pub fn not_started(ctx: Arc<TraversalContext>) -> Arc<Self> {
        Arc::new(Self {
            kind: StateKind::NotStarted,
            node: None,
            cost: 0,
            total_cost: 0,
            parent: None,
            outbounds: Vec::new(),
            ctx,
        })
    }

    /// Advance to `node`, reached over a relationship of `cost`, treating the
    /// node as carrying `label`.
    ///
    /// Records the travel event implied by the transition on `journey`.
    /// Arriving at a destination node always yields a `Destination` state.
    pub fn next_state(
        self: &Arc<Self>,
        label: Label,
        node: &Node,
        journey: &mut JourneyState,
        cost: u32,
    ) -> Result<Arc<TraversalState>, TraversalError> {
        self.guard_not_terminal()?;
        if self.ctx.is_destination_node(node.id) {
            return self.arrive_at_destination(node, journey, cost);
        }
        if label == Label::BusStation && !self.ctx.config().bus_enabled {
            return Err(TraversalError::ModeDisabled {
                mode: TransportMode::Bus,
                node: node.id,
            });
        }

        let state_type = self.state_type();
        let step = transitions::resolve(state_type, label).ok_or_else(|| TraversalError::UnexpectedLabel {
            state: state_type,
            label,
            node: node.describe(),
        })?;

        self.apply(step.target, step.event, node, journey, cost)
    }

    /// Advance to a node carrying several labels, such as a multi-modal hub.
    pub fn next_state_for_labels(
        self: &Arc<Self>,
        labels: &LabelSet,
        node: &Node,
        journey: &mut JourneyState,
        cost: u32,
    ) -> Result<Arc<TraversalState>, TraversalError> {
        self.guard_not_terminal()?;
        if self.ctx.is_destination_node(node.id) {
            return self.arrive_at_destination(node, journey, cost);
        }

        let label = transitions::select_label(self.state_type(), labels, self.ctx.config().bus_enabled)
            .ok_or_else(|| TraversalError::UnexpectedLabels {
                state: self.state_type(),
                labels: labels.iter().map(Label::to_string).collect::<Vec<_>>().join(", "),
                node: node.describe(),
            })?;

        self.next_state(label, node, journey, cost)
    }

    fn guard_not_terminal(&self) -> Result<(), TraversalError> {
        match (&self.kind, self.node) {
            (StateKind::Destination { .. }, Some(node)) => Err(TraversalError::TerminalState(node)),
            _ => Ok(()),
        }
    }

    fn apply(
        self: &Arc<Self>,
        target: StateType,
        event: Event,
        node: &Node,
        journey: &mut JourneyState,
        cost: u32,
    ) -> Result<Arc<TraversalState>, TraversalError> {
        let build = self.ctx.registry().builder(self.state_type(), target)?;
        let built = build(&BuildArgs {
            source: self,
            node,
            ctx: &self.ctx,
        })?;

        let total_cost = self.total_after(cost, node)?;
        // Everything fallible about the new state is settled before the
        // journey is touched
        let outbounds = edges::finish(built.outbounds, self.node, &self.ctx)?;
        let board_mode = match event {
            Event::Board => Some(edges::route_station_mode(node)?),
            _ => None,
        };

        match event {
            Event::None => {}
            Event::Board => {
                if let Some(mode) = board_mode {
                    journey.board(mode, total_cost)?;
                }
            }
            Event::Leave => {
                if let Some(mode) = self.kind.alighting_mode() {
                    journey.leave(mode, self.total_cost)?;
                }
            }
            Event::WalkingConnection => journey.walking_connection(self.total_cost)?,
            Event::Connection => journey.connection(self.total_cost)?,
            Event::Departure => {
                if let Some(time) = node.properties.departure_time {
                    journey.record_departure(time, total_cost)?;
                }
            }
        }

        trace!(
            from = %self.state_type(),
            to = %built.kind.state_type(),
            node = %node.id,
            cost,
            total_cost,
            outbounds = outbounds.len(),
            "transition"
        );

        Ok(Arc::new(TraversalState {
            kind: built.kind,
            node: Some(node.id),
            cost,
            total_cost,
            parent: Some(Arc::clone(self)),
            outbounds,
            ctx: Arc::clone(&self.ctx),
        }))
    }

    fn total_after(&self, cost: u32, node: &Node) -> Result<u32, TraversalError> {
        self.total_cost
            .checked_add(cost)
            .ok_or(TraversalError::CostOverflow {
                total: self.total_cost,
                cost,
                node: node.id,
            })
    }

    fn arrive_at_destination(
        self: &Arc<Self>,
        node: &Node,
        journey: &mut JourneyState,
        cost: u32,
    ) -> Result<Arc<TraversalState>, TraversalError> {
        let total_cost = self.total_after(cost, node)?;
        if let Some(mode) = self.kind.alighting_mode() {
            journey.leave(mode, self.total_cost)?;
        }

        trace!(
            from = %self.state_type(),
            node = %node.id,
            total_cost,
            "reached destination"
        );

        Ok(Arc::new(TraversalState {
            kind: StateKind::Destination {
                station: node.station_id().cloned(),
            },
            node: Some(node.id),
            cost,
            total_cost,
            parent: Some(Arc::clone(self)),
            outbounds: Vec::new(),
            ctx: Arc::clone(&self.ctx),
        }))
    }

    pub fn kind(&self) -> &StateKind {
        &self.kind
    }

    pub fn state_type(&self) -> StateType {
        self.kind.state_type()
    }

    /// Node this state stands at; `None` before the path has started.
    pub fn node_id(&self) -> Option<NodeId> {
        self.node
    }

    /// Cost of the relationship that led here.
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Cost of the whole path up to and including this state.
    pub fn total_cost(&self) -> u32 {
        self.total_cost
    }

    /// Relationships the path may take next.
    pub fn outbounds(&self) -> &[Relationship] {
        &self.outbounds
    }

    pub fn parent(&self) -> Option<&Arc<TraversalState>> {
        self.parent.as_ref()
    }

    pub fn is_destination(&self) -> bool {
        matches!(self.kind, StateKind::Destination { .. })
    }

    /// This state followed by its ancestors back to `NotStarted`.
    pub fn path(&self) -> impl Iterator<Item = &TraversalState> {
        std::iter::successors(Some(self), |state| state.parent.as_deref())
    }

    /// Number of transitions since `NotStarted`.
    pub fn depth(&self) -> usize {
        self.path().count() - 1
    }
}

impl fmt::Debug for TraversalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TraversalState")
            .field("kind", &self.kind)
            .field("node", &self.node)
            .field("cost", &self.cost)
            .field("total_cost", &self.total_cost)
            .field("outbounds", &self.outbounds.len())
            .finish()
    }
}
