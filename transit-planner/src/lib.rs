//! Transit journey planner traversal core.
//!
//! A state machine that walks a time-expanded transit graph one
//! relationship at a time, deciding at each node which relationships a
//! path may follow next and recording boardings, alightings and
//! connections as it goes.

pub mod config;
pub mod domain;
pub mod graph;
pub mod journey;
pub mod search;
pub mod traversal;
