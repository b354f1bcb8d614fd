//! Traversal errors.
//!
//! The graph schema fixes which node types can follow which, so every error
//! here points at a graph construction defect or at the journey accumulator
//! falling out of step. All of them are fatal to the branch being extended.

use crate::domain::TransportMode;
use crate::graph::{Label, NodeId};
use crate::journey::JourneyError;

use super::state::StateType;

/// Fatal failure to extend a path.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TraversalError {
    /// Node carried a label the current state cannot be followed by.
    #[error("{state} cannot be followed by {label}: {node}")]
    UnexpectedLabel {
        state: StateType,
        label: Label,
        node: String,
    },

    /// A multi-labelled node whose labels select no single transition.
    #[error("{state} cannot be followed by labels [{labels}]: {node}")]
    UnexpectedLabels {
        state: StateType,
        labels: String,
        node: String,
    },

    /// The transport mode of the node is switched off in configuration.
    #[error("{mode} is disabled, cannot enter {node}")]
    ModeDisabled { mode: TransportMode, node: NodeId },

    /// `next_state` was called on a destination.
    #[error("destination reached at {0}, no further transitions")]
    TerminalState(NodeId),

    /// No builder registered for this source/target pair.
    #[error("no builder from {from} to {to}")]
    NoBuilder { from: StateType, to: StateType },

    /// A node is missing a property its state needs.
    #[error("missing property {property}: {node}")]
    MissingProperty { property: &'static str, node: String },

    /// A relationship leads to a node the graph store does not hold.
    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    /// The path's total cost no longer fits in a `u32`.
    #[error("cost {cost} into {node} overflows total {total}")]
    CostOverflow { total: u32, cost: u32, node: NodeId },

    #[error("journey state out of step: {0}")]
    Journey(#[from] JourneyError),
}
