//! Commitment to a specific vehicle run.

use std::fmt;

use crate::domain::TripId;

/// Either no vehicle run committed yet, or bound to one trip.
///
/// Reaching a minute node whose trip id property is absent leaves the trip
/// `Unbound`; there is no empty-string sentinel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum ExistingTrip {
    #[default]
    Unbound,
    Bound(TripId),
}

impl ExistingTrip {
    pub fn unbound() -> Self {
        ExistingTrip::Unbound
    }

    pub fn bound(trip: TripId) -> Self {
        ExistingTrip::Bound(trip)
    }

    pub fn is_bound(&self) -> bool {
        matches!(self, ExistingTrip::Bound(_))
    }

    pub fn trip_id(&self) -> Option<&TripId> {
        match self {
            ExistingTrip::Bound(trip) => Some(trip),
            ExistingTrip::Unbound => None,
        }
    }
}

impl From<Option<TripId>> for ExistingTrip {
    fn from(trip: Option<TripId>) -> Self {
        trip.map_or(ExistingTrip::Unbound, ExistingTrip::Bound)
    }
}

impl fmt::Display for ExistingTrip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExistingTrip::Unbound => f.write_str("unbound"),
            ExistingTrip::Bound(trip) => write!(f, "trip {trip}"),
        }
    }
}
