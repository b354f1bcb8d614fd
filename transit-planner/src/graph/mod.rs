//! Labelled property graph model.
//!
//! The time-expanded transit graph is produced elsewhere (timetable
//! ingestion). This module defines the shapes the traversal consumes: typed
//! nodes with label sets, typed cost-bearing relationships, and a read-only
//! store.

mod label;
mod node;
mod relationship;
mod store;

pub use label::{Label, LabelSet};
pub use node::{Node, NodeId, NodeProperties};
pub use relationship::{Relationship, RelationshipId, RelationshipType, TripIdSet};
pub use store::{GraphBuilder, GraphError, GraphFile, GraphStore, InMemoryGraph};
