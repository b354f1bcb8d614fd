//! Dispatch from (source state type, target state type) to the routine that
//! builds the target.
//!
//! Builders register per target, listing every source they accept. The
//! table is assembled once and shared by every query.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::OnceLock;

use crate::graph::{Node, Relationship};

use super::builders;
use super::context::TraversalContext;
use super::error::TraversalError;
use super::state::{StateKind, StateType, TraversalState};

/// Inputs to a builder.
pub(crate) struct BuildArgs<'a> {
    /// The state being left.
    pub source: &'a TraversalState,
    /// The node being entered.
    pub node: &'a Node,
    pub ctx: &'a TraversalContext,
}

/// What a builder produces: the new payload and its raw outbound set, before
/// back-edge and mode filtering.
pub(crate) struct Built {
    pub kind: StateKind,
    pub outbounds: Vec<Relationship>,
}

impl Built {
    pub fn new(kind: StateKind, outbounds: Vec<Relationship>) -> Self {
        Self { kind, outbounds }
    }
}

pub(crate) type BuildFn = fn(&BuildArgs<'_>) -> Result<Built, TraversalError>;

pub struct BuilderRegistry {
    builders: HashMap<(StateType, StateType), BuildFn>,
}

impl BuilderRegistry {
    fn empty() -> Self {
        Self {
            builders: HashMap::new(),
        }
    }

    /// The registry with every builder in this crate.
    pub fn standard() -> &'static BuilderRegistry {
        static STANDARD: OnceLock<BuilderRegistry> = OnceLock::new();
        STANDARD.get_or_init(|| {
            let mut registry = BuilderRegistry::empty();
            builders::register_all(&mut registry);
            registry
        })
    }

    /// Start registering builders for `target`.
    pub(crate) fn towards(&mut self, target: StateType) -> Registration<'_> {
        Registration { registry: self, target }
    }

    pub(crate) fn builder(&self, source: StateType, target: StateType) -> Result<BuildFn, TraversalError> {
        self.builders
            .get(&(source, target))
            .copied()
            .ok_or(TraversalError::NoBuilder { from: source, to: target })
    }

    pub fn contains(&self, source: StateType, target: StateType) -> bool {
        self.builders.contains_key(&(source, target))
    }

    /// Source types with a builder for `target`.
    pub fn sources_for(&self, target: StateType) -> BTreeSet<StateType> {
        self.builders
            .keys()
            .filter(|(_, to)| *to == target)
            .map(|(from, _)| *from)
            .collect()
    }
}

impl fmt::Debug for BuilderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuilderRegistry")
            .field("pairs", &self.builders.len())
            .finish()
    }
}

/// Registration of builders for one target type.
pub(crate) struct Registration<'a> {
    registry: &'a mut BuilderRegistry,
    target: StateType,
}

impl Registration<'_> {
    pub fn from(self, source: StateType, build: BuildFn) -> Self {
        self.registry.builders.insert((source, self.target), build);
        self
    }

    pub fn from_each(self, sources: &[StateType], build: BuildFn) -> Self {
        sources.iter().fold(self, |reg, source| reg.from(*source, build))
    }
}
