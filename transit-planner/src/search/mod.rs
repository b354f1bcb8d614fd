//! Reference exploration driver.
//!
//! Enumerates paths depth-first from a start node, stepping the traversal
//! state machine over every offered relationship. It exists to exercise the
//! state machine end to end; it is not a shortest-path planner and ranks
//! nothing beyond total cost.

mod config;

pub use config::SearchConfig;

use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::graph::NodeId;
use crate::journey::JourneyState;
use crate::traversal::{TraversalContext, TraversalError, TraversalState};

/// Error starting an exploration. Failures after the first node only
/// abandon the branch they occur on.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("start node {0} is not in the graph")]
    UnknownStart(NodeId),

    #[error("cannot start at {node}: {source}")]
    Start {
        node: NodeId,
        #[source]
        source: TraversalError,
    },
}

/// A path that reached a destination, with the journey recorded along it.
#[derive(Debug, Clone)]
pub struct Itinerary {
    pub state: Arc<TraversalState>,
    pub journey: JourneyState,
}

impl Itinerary {
    pub fn total_cost(&self) -> u32 {
        self.state.total_cost()
    }

    /// Nodes visited, start first.
    pub fn nodes(&self) -> Vec<NodeId> {
        let mut nodes: Vec<NodeId> = self.state.path().filter_map(TraversalState::node_id).collect();
        nodes.reverse();
        nodes
    }
}

/// What an exploration found.
#[derive(Debug, Default)]
pub struct SearchOutcome {
    /// Itineraries in ascending cost order.
    pub itineraries: Vec<Itinerary>,
    /// States created.
    pub expanded: usize,
    /// Branches dropped because a transition failed.
    pub abandoned: usize,
}

/// Explore every path from `start` within the bounds of `config`.
///
/// Each fork gets its own copy of the journey so sibling branches never
/// share one.
pub fn explore(
    ctx: &Arc<TraversalContext>,
    start: NodeId,
    config: &SearchConfig,
) -> Result<SearchOutcome, SearchError> {
    let node = ctx.graph().node(start).ok_or(SearchError::UnknownStart(start))?;
    let mut journey = JourneyState::new(ctx.config().query_time);
    let first = ctx
        .start()
        .next_state_for_labels(&node.labels, node, &mut journey, 0)
        .map_err(|source| SearchError::Start { node: start, source })?;

    let mut outcome = SearchOutcome {
        expanded: 1,
        ..Default::default()
    };
    let mut stack = vec![(first, journey)];

    while let Some((state, journey)) = stack.pop() {
        if state.is_destination() {
            debug!(cost = state.total_cost(), depth = state.depth(), "reached destination");
            outcome.itineraries.push(Itinerary { state, journey });
            if outcome.itineraries.len() >= config.max_results {
                break;
            }
            continue;
        }
        if state.depth() >= config.max_depth {
            trace!(node = ?state.node_id(), "depth limit");
            continue;
        }

        // Reverse so the first offered relationship is explored first
        for rel in state.outbounds().iter().rev() {
            let total = state.total_cost().saturating_add(rel.cost);
            if total > config.max_cost {
                continue;
            }
            let Some(next) = ctx.graph().node(rel.end) else {
                warn!(relationship = ?rel.id, node = %rel.end, "relationship to unknown node");
                outcome.abandoned += 1;
                continue;
            };

            let mut branch = journey.clone();
            match state.next_state_for_labels(&next.labels, next, &mut branch, rel.cost) {
                Ok(child) => {
                    outcome.expanded += 1;
                    stack.push((child, branch));
                }
                Err(err) => {
                    warn!(from = %state.state_type(), node = %next.id, error = %err, "abandoning branch");
                    outcome.abandoned += 1;
                }
            }
        }
    }

    outcome.itineraries.sort_by_key(Itinerary::total_cost);
    debug!(
        start = %start,
        found = outcome.itineraries.len(),
        expanded = outcome.expanded,
        abandoned = outcome.abandoned,
        "exploration finished"
    );
    Ok(outcome)
}
