//! Partial order graph of a single sequence.

use crate::pog::edge::{Edge, Position};
use std::collections::HashMap;

// =#========================================================================#=
// SEQUENCE NODE
// =#========================================================================#=
/// One position of a sequence: its most likely symbol and outgoing edges.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceNode {
    pub(crate) position: Position,
    pub(crate) symbol: String,
    pub(crate) edges: Vec<Edge>,
}

impl SequenceNode {
    pub fn position(&self) -> Position {
        self.position
    }

    /// Most likely symbol at this position.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Outgoing edges.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
}

// =#========================================================================#=
// PARTIAL ORDER GRAPH
// =#========================================================================#=
/// Representation of a sequence as a partial order graph (POG).
///
/// Each position is a [SequenceNode]; nodes keep the order of the serialized
/// position array. Extants form a simple chain, ancestors may have several
/// alternative successors per position.
///
/// Built by [assemble](crate::pog::assemble), immutable afterwards.
#[derive(Debug, Clone)]
pub struct PartialOrderGraph {
    pub(crate) version: Option<String>,
    pub(crate) name: String,
    pub(crate) is_ancestor: bool,
    pub(crate) nodes: Vec<SequenceNode>,
    pub(crate) node_lookup: HashMap<Position, usize>,
    pub(crate) start: Option<i64>,
    pub(crate) end: Option<i64>,
    pub(crate) size: Option<usize>,
    pub(crate) terminated: Option<bool>,
    pub(crate) directed: Option<bool>,
}

impl PartialOrderGraph {
    /// Canonical sequence name (numeric names prefixed with `N`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Version of the reconstruction tool that produced the record.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn is_ancestor(&self) -> bool {
        self.is_ancestor
    }

    /// Nodes in position-array order.
    pub fn nodes(&self) -> &[SequenceNode] {
        &self.nodes
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Total number of edges over all nodes.
    pub fn num_edges(&self) -> usize {
        self.nodes.iter().map(|node| node.edges.len()).sum()
    }

    /// Positions in stored order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.nodes.iter().map(|node| node.position)
    }

    /// Returns the node at the given position.
    pub fn node_at(&self, position: Position) -> Option<&SequenceNode> {
        self.node_lookup.get(&position).map(|&i| &self.nodes[i])
    }

    /// Returns the outgoing edges of the given position, empty if unknown.
    pub fn edges_from(&self, position: Position) -> &[Edge] {
        match self.node_at(position) {
            Some(node) => node.edges(),
            None => &[],
        }
    }

    /// Concatenated symbols of all nodes in stored order.
    pub fn sequence(&self) -> String {
        self.nodes.iter().map(|node| node.symbol.as_str()).collect()
    }

    /// Start marker of the sequence, as serialized.
    pub fn start(&self) -> Option<i64> {
        self.start
    }

    /// End marker of the sequence, as serialized.
    pub fn end(&self) -> Option<i64> {
        self.end
    }

    /// Declared size, falling back to the number of nodes.
    pub fn size(&self) -> usize {
        self.size.unwrap_or(self.nodes.len())
    }

    pub fn is_terminated(&self) -> Option<bool> {
        self.terminated
    }

    pub fn is_directed(&self) -> Option<bool> {
        self.directed
    }
}
