//! Graph storage.
//!
//! The traversal never owns the graph: it reads nodes and outgoing
//! relationships through [`GraphStore`]. [`InMemoryGraph`] is the indexed
//! implementation used by the binary and by tests.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::label::Label;
use super::node::{Node, NodeId, NodeProperties};
use super::relationship::{Relationship, RelationshipId, RelationshipType};

/// Error loading or assembling a graph.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("failed to read graph file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse graph file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate node {0}")]
    DuplicateNode(NodeId),

    #[error("relationship {id:?} references unknown node {node}")]
    DanglingRelationship { id: RelationshipId, node: NodeId },
}

/// Read access to a labelled property graph.
///
/// Lookups are expected to be O(1). Implementations are shared across
/// concurrently explored branches, hence `Send + Sync`.
pub trait GraphStore: Send + Sync {
    fn node(&self, id: NodeId) -> Option<&Node>;

    /// Outgoing relationships of a node, in a stable order.
    fn outgoing(&self, id: NodeId) -> &[Relationship];
}

/// Serialised form of a graph.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphFile {
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

/// A graph held in memory, indexed by node id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGraph {
    nodes: HashMap<NodeId, Node>,
    outgoing: HashMap<NodeId, Vec<Relationship>>,
}

impl InMemoryGraph {
    /// Build an indexed graph, validating node uniqueness and edge ends.
    pub fn from_file(file: GraphFile) -> Result<Self, GraphError> {
        let mut nodes = HashMap::with_capacity(file.nodes.len());
        for node in file.nodes {
            let id = node.id;
            if nodes.insert(id, node).is_some() {
                return Err(GraphError::DuplicateNode(id));
            }
        }

        let mut outgoing: HashMap<NodeId, Vec<Relationship>> = HashMap::new();
        for rel in file.relationships {
            for end in [rel.start, rel.end] {
                if !nodes.contains_key(&end) {
                    return Err(GraphError::DanglingRelationship { id: rel.id, node: end });
                }
            }
            outgoing.entry(rel.start).or_default().push(rel);
        }

        Ok(Self { nodes, outgoing })
    }

    /// Load a graph from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, GraphError> {
        let text = std::fs::read_to_string(path)?;
        let file: GraphFile = serde_json::from_str(&text)?;
        Self::from_file(file)
    }

    /// Every node, in no particular order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn relationship_count(&self) -> usize {
        self.outgoing.values().map(Vec::len).sum()
    }
}

impl GraphStore for InMemoryGraph {
    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    fn outgoing(&self, id: NodeId) -> &[Relationship] {
        self.outgoing.get(&id).map(|v| v.as_slice()).unwrap_or(&[])
    }
}

/// Fluent builder for small graphs.
///
/// Node ids are caller-chosen; relationship ids are assigned in insertion
/// order.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    file: GraphFile,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single-labelled node.
    pub fn node(self, id: u64, label: Label, properties: NodeProperties) -> Self {
        self.add_node(Node::new(NodeId(id), label).with_properties(properties))
    }

    pub fn add_node(mut self, node: Node) -> Self {
        self.file.nodes.push(node);
        self
    }

    /// Add a plain relationship.
    pub fn edge(self, kind: RelationshipType, start: u64, end: u64, cost: u32) -> Self {
        self.edge_with(kind, start, end, cost, |_| {})
    }

    /// Add a relationship, letting `annotate` fill in optional annotations.
    pub fn edge_with(
        mut self,
        kind: RelationshipType,
        start: u64,
        end: u64,
        cost: u32,
        annotate: impl FnOnce(&mut Relationship),
    ) -> Self {
        let id = RelationshipId(self.file.relationships.len() as u64);
        let mut rel = Relationship::new(id, kind, NodeId(start), NodeId(end), cost);
        annotate(&mut rel);
        self.file.relationships.push(rel);
        self
    }

    pub fn build(self) -> Result<InMemoryGraph, GraphError> {
        InMemoryGraph::from_file(self.file)
    }
}
