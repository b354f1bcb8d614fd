use crate::graph::RelationshipType;
use crate::traversal::edges;
use crate::traversal::error::TraversalError;
use crate::traversal::registry::{BuildArgs, Built, BuilderRegistry};
use crate::traversal::state::{StateKind, StateType};

fn walking(args: &BuildArgs<'_>) -> Result<Built, TraversalError> {
    let outbounds = edges::outgoing_of(args.ctx, args.node, &[RelationshipType::WalksTo]);
    Ok(Built::new(StateKind::Walking, outbounds))
}

pub(super) fn register(registry: &mut BuilderRegistry) {
    use StateType as S;

    registry
        .towards(S::Walking)
        .from_each(&[S::NotStarted, S::TramStation, S::NoPlatformStation], walking);
}
