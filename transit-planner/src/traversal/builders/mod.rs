//! State builders, one module per family of target states.
//!
//! Each module registers, for its targets, one construction routine per
//! legal source type.

mod platform;
mod route_station;
mod station;
mod timetable;
mod walking;

use super::registry::BuilderRegistry;

pub(crate) fn register_all(registry: &mut BuilderRegistry) {
    station::register(registry);
    walking::register(registry);
    platform::register(registry);
    route_station::register(registry);
    timetable::register(registry);
}
