//! Which labels may follow which state, and what each step means for the
//! journey.
//!
//! The table is exhaustive over state types. Any pair it does not list is a
//! graph construction defect.

use crate::domain::TransportMode;
use crate::graph::{Label, LabelSet};

use super::state::StateType;

/// Journey event implied by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Event {
    None,
    /// Board the vehicle serving the route station arrived at.
    Board,
    /// Alight from the vehicle ridden into the current route station.
    Leave,
    WalkingConnection,
    /// Move to a neighbouring station.
    Connection,
    /// Commit to a scheduled departure.
    Departure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Step {
    pub target: StateType,
    pub event: Event,
}

const fn step(target: StateType, event: Event) -> Option<Step> {
    Some(Step { target, event })
}

/// Resolve the transition from a state of type `source` to a node labelled
/// `label`. `None` when the pair is illegal.
pub(crate) fn resolve(source: StateType, label: Label) -> Option<Step> {
    use StateType as S;

    // Stations whose mode uses platforms are entered as tram stations
    let platformed = label.station_mode().is_some_and(TransportMode::has_platforms);
    let other_station = label.is_station() && !platformed;

    match source {
        S::NotStarted => match label {
            Label::QueryNode => step(S::Walking, Event::WalkingConnection),
            _ if platformed => step(S::TramStation, Event::None),
            Label::Grouped => step(S::GroupedStation, Event::None),
            _ if other_station => step(S::NoPlatformStation, Event::None),
            _ => None,
        },
        S::Walking => match label {
            _ if platformed => step(S::TramStation, Event::None),
            _ if other_station => step(S::NoPlatformStation, Event::None),
            _ => None,
        },
        S::TramStation | S::NoPlatformStation => match label {
            Label::Platform if source == S::TramStation => step(S::Platform, Event::None),
            Label::RouteStation => step(S::RouteStationJustBoarded, Event::Board),
            Label::QueryNode => step(S::Walking, Event::WalkingConnection),
            _ if platformed => step(S::TramStation, Event::Connection),
            Label::Grouped => step(S::GroupedStation, Event::None),
            _ if other_station => step(S::NoPlatformStation, Event::Connection),
            _ => None,
        },
        S::GroupedStation => match label {
            _ if platformed => step(S::TramStation, Event::None),
            _ if other_station => step(S::NoPlatformStation, Event::None),
            _ => None,
        },
        S::Platform => match label {
            Label::RouteStation => step(S::RouteStationJustBoarded, Event::Board),
            _ if platformed => step(S::TramStation, Event::None),
            _ => None,
        },
        S::RouteStationJustBoarded => match label {
            Label::Service => step(S::Service, Event::None),
            _ => None,
        },
        S::RouteStationOnTrip | S::RouteStationEndTrip => match label {
            Label::Service => step(S::Service, Event::None),
            Label::Platform => step(S::Platform, Event::Leave),
            _ if other_station => step(S::NoPlatformStation, Event::Leave),
            _ => None,
        },
        S::Service => match label {
            Label::Hour => step(S::Hour, Event::None),
            _ => None,
        },
        S::Hour => match label {
            Label::Minute => step(S::Minute, Event::Departure),
            _ => None,
        },
        S::Minute => match label {
            Label::RouteStation => step(S::RouteStationOnTrip, Event::None),
            _ => None,
        },
        S::Destination => None,
    }
}

/// Pick the label that drives the transition into a multi-labelled node.
///
/// Marker labels are ignored. A station carrying a tram label is entered as a
/// tram station so its platforms stay reachable; otherwise the first legal
/// station label wins, skipping bus when bus is disabled and another mode is
/// available. A bus-only node is still selected so entering it reports the
/// disabled mode.
pub(crate) fn select_label(source: StateType, labels: &LabelSet, bus_enabled: bool) -> Option<Label> {
    let mut candidates: Vec<Label> = labels
        .iter()
        .copied()
        .filter(|label| !label.is_marker())
        .filter(|label| resolve(source, *label).is_some())
        .collect();
    if !bus_enabled && candidates.iter().any(|l| *l != Label::BusStation) {
        candidates.retain(|l| *l != Label::BusStation);
    }

    match candidates.as_slice() {
        [] => None,
        [only] => Some(*only),
        many if many.iter().all(|l| l.is_station()) => {
            if many.contains(&Label::TramStation) {
                Some(Label::TramStation)
            } else {
                many.first().copied()
            }
        }
        _ => None,
    }
}
