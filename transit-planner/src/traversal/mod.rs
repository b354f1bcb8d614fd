//! The traversal state machine.
//!
//! Given the state at the end of a path and a candidate next node, decides
//! whether the step is legal and which state results. A search driver feeds
//! it nodes taken from [`TraversalState::outbounds`], one path at a time,
//! threading a [`crate::journey::JourneyState`] per path.

mod builders;
mod config;
mod context;
mod edges;
mod error;
mod existing_trip;
pub mod proximity;
mod registry;
mod state;
pub mod trip_filter;
mod transitions;
mod trips;


#[cfg(test)]
pub(crate) mod test_support;

pub use config::TraversalConfig;
pub use context::TraversalContext;
pub use error::TraversalError;
pub use existing_trip::ExistingTrip;
pub use proximity::{NoSorting, SortsPositions, StationPositions};
pub use registry::BuilderRegistry;
pub use state::{StateKind, StateType, TraversalState};
pub use trips::{TripRepository, TripServiceIndex};
