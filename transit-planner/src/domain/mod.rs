//! Domain types for the transit planner.
//!
//! Identifiers, transport modes and positions shared by the graph model,
//! the journey accumulator and the traversal state machine.

mod ids;
mod mode;
mod position;

pub use ids::{InvalidId, PlatformId, RouteId, ServiceId, StationId, TripId};
pub use mode::TransportMode;
pub use position::LatLong;
