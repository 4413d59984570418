//! Assembly of [PartialOrderGraph]s from serialized records.
//!
//! Assembly runs in two steps:
//! 1. Base graph: one node per position with plain edges to its successors,
//!    or a single terminator edge where the sequence ends.
//! 2. Ancestors only: annotated edges are grouped by their start node and
//!    merged into the plain edges with [merge_edges], so that an annotated
//!    edge replaces a plain edge with the same `(start, end)` pair instead of
//!    duplicating it. Virtual-start edges belong to the first node.

use crate::error::{FormatError, LookupError, PogTreeError};
use crate::model::label::canonical_name;
use crate::pog::edge::{Edge, EdgeAnnotation, EdgeEnd, EdgeStart, Position};
use crate::pog::graph::{PartialOrderGraph, SequenceNode};
use crate::record::PogRecord;
use std::collections::HashMap;
use tracing::{debug, trace};

/// Builds the partial order graph of one sequence.
///
/// # Arguments
/// * `record` - The serialized graph
/// * `is_ancestor` - Whether the record is ancestral and carries annotated edges
///
/// # Returns
/// * `Ok(PartialOrderGraph)` - with canonical name and nodes in record order
/// * `Err(PogTreeError::Format)` - if arrays disagree in length, positions
///   repeat, an extant branches, or ancestral edge data is missing or invalid
/// * `Err(PogTreeError::Lookup)` - if an annotated edge starts at a position
///   that is not a node of the graph
///
/// # Example
/// ```
/// use pogtree::pog::assemble;
/// use pogtree::record::PogRecord;
///
/// let json = r#"{"Name":"A","Indices":[0,1,2],"Adjacent":[[1],[2],[]],
///                "Nodes":[{"Value":"M"},{"Value":"K"},{"Value":"V"}]}"#;
/// let graph = assemble(&PogRecord::from_json(json)?, false)?;
/// assert_eq!(graph.sequence(), "MKV");
/// assert!(graph.edges_from(2)[0].is_terminator());
/// # Ok::<(), pogtree::PogTreeError>(())
/// ```
pub fn assemble(record: &PogRecord, is_ancestor: bool) -> Result<PartialOrderGraph, PogTreeError> {
    let name = canonical_name(&record.name);
    let n = record.indices.len();
    FormatError::check_len("Adjacent", n, record.adjacent.len())?;
    FormatError::check_len("Nodes", n, record.nodes.len())?;

    let mut node_lookup: HashMap<Position, usize> = HashMap::with_capacity(n);
    for (i, &position) in record.indices.iter().enumerate() {
        if node_lookup.insert(position, i).is_some() {
            return Err(FormatError::DuplicatePosition(position).into());
        }
    }

    // Step 1: base graph
    let mut plain_edges = Vec::with_capacity(n);
    for (&position, successors) in record.indices.iter().zip(&record.adjacent) {
        if !is_ancestor && successors.len() > 1 {
            return Err(FormatError::BranchingExtant {
                name,
                position,
                successors: successors.len(),
            }
            .into());
        }
        plain_edges.push(base_edges(position, successors));
    }

    // Step 2: annotated edges, grouped by node
    let mut annotated_edges: Vec<Vec<Edge>> = vec![Vec::new(); n];
    if is_ancestor {
        for edge in read_annotated_edges(record, &name)? {
            let node = match edge.start() {
                EdgeStart::VirtualStart if n == 0 => {
                    return Err(LookupError::EmptyGraph(name).into());
                }
                EdgeStart::VirtualStart => 0,
                EdgeStart::Position(position) => {
                    *node_lookup
                        .get(&position)
                        .ok_or_else(|| LookupError::UnknownPosition {
                            graph: name.clone(),
                            position,
                        })?
                }
            };
            annotated_edges[node].push(edge);
        }
    }

    let nodes: Vec<SequenceNode> = record
        .indices
        .iter()
        .zip(&record.nodes)
        .zip(plain_edges.iter().zip(&annotated_edges))
        .map(|((&position, node), (plain, annotated))| SequenceNode {
            position,
            symbol: node.value.clone(),
            edges: merge_edges(plain, annotated),
        })
        .collect();

    let graph = PartialOrderGraph {
        version: record.version.clone(),
        name,
        is_ancestor,
        nodes,
        node_lookup,
        start: record.starts,
        end: record.ends,
        size: record.size,
        terminated: record.terminated,
        directed: record.directed,
    };
    debug!(
        name = graph.name(),
        nodes = graph.num_nodes(),
        edges = graph.num_edges(),
        is_ancestor,
        "assembled partial order graph"
    );
    Ok(graph)
}

/// Merges annotated edges into a list of plain edges.
///
/// Every annotated edge replaces any edge already in the list with the same
/// `(start, end)` pair and is then appended, so the result never holds two
/// edges with the same pair as long as `plain` does not. Neither input is
/// modified.
///
/// # Example
/// ```
/// use pogtree::pog::{Edge, EdgeAnnotation, EdgeEnd, EdgeStart, merge_edges};
///
/// let plain = vec![Edge::plain(0, 1)];
/// let annotation = EdgeAnnotation { reciprocated: Some(true), ..Default::default() };
/// let annotated = vec![Edge::annotated(EdgeStart::Position(0), EdgeEnd::Position(1), annotation)];
///
/// let merged = merge_edges(&plain, &annotated);
/// assert_eq!(merged.len(), 1);
/// assert!(merged[0].is_annotated());
/// ```
pub fn merge_edges(plain: &[Edge], annotated: &[Edge]) -> Vec<Edge> {
    let mut merged = plain.to_vec();
    for edge in annotated {
        let before = merged.len();
        merged.retain(|existing| existing.key() != edge.key());
        if merged.len() != before {
            trace!(edge = %edge, "annotated edge replaces existing edge");
        }
        merged.push(edge.clone());
    }
    merged
}

/// Plain edges of one position: one per distinct successor,
/// or a terminator edge if there is none.
fn base_edges(position: Position, successors: &[Position]) -> Vec<Edge> {
    if successors.is_empty() {
        return vec![Edge::terminator(position)];
    }
    let mut edges: Vec<Edge> = Vec::with_capacity(successors.len());
    for &successor in successors {
        let edge = Edge::plain(position, successor);
        if !edges.contains(&edge) {
            edges.push(edge);
        }
    }
    edges
}

/// Reads the annotated edges of an ancestral record in input order.
fn read_annotated_edges(record: &PogRecord, name: &str) -> Result<Vec<Edge>, FormatError> {
    let missing = |field| FormatError::MissingField {
        record: name.to_string(),
        field,
    };
    let edge_indices = record
        .edge_indices
        .as_ref()
        .ok_or_else(|| missing("Edgeindices"))?;
    let edges = record.edges.as_ref().ok_or_else(|| missing("Edges"))?;
    let edge_type = record.edge_type.as_ref().ok_or_else(|| missing("Edgetype"))?;
    FormatError::check_len("Edges", edge_indices.len(), edges.len())?;

    edge_indices
        .iter()
        .zip(edges)
        .map(|(&(start, end), info)| -> Result<Edge, FormatError> {
            let annotation = EdgeAnnotation {
                edge_type: Some(edge_type.clone()),
                reciprocated: info.recip,
                backward: info.backward,
                forward: info.forward,
                weight: info.weight,
            };
            Ok(Edge::annotated(
                EdgeStart::from_raw(start, end)?,
                EdgeEnd::from_raw(start, end)?,
                annotation,
            ))
        })
        .collect()
}

impl PartialOrderGraph {
    /// Builds a graph from a serialized record, see [assemble].
    pub fn from_record(record: &PogRecord, is_ancestor: bool) -> Result<Self, PogTreeError> {
        assemble(record, is_ancestor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn annotated(start: EdgeStart, end: EdgeEnd, weight: f64) -> Edge {
        let annotation = EdgeAnnotation {
            weight: Some(weight),
            ..Default::default()
        };
        Edge::annotated(start, end, annotation)
    }

    #[test]
    fn merge_keeps_plain_edges_without_annotation() {
        let plain = vec![Edge::plain(3, 4), Edge::plain(3, 7)];
        let merged = merge_edges(&plain, &[]);
        assert_eq!(merged, plain);
    }

    #[test]
    fn merge_replaces_matching_plain_edge() {
        let plain = vec![Edge::plain(3, 4), Edge::plain(3, 7)];
        let extra = annotated(EdgeStart::Position(3), EdgeEnd::Position(7), 0.5);
        let merged = merge_edges(&plain, std::slice::from_ref(&extra));

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0], Edge::plain(3, 4));
        assert_eq!(merged[1], extra);
    }

    #[test]
    fn merge_appends_new_annotated_edge() {
        let plain = vec![Edge::plain(3, 4)];
        let extra = annotated(EdgeStart::Position(3), EdgeEnd::Position(9), 1.0);
        let merged = merge_edges(&plain, &[extra]);
        assert_eq!(merged.len(), 2);
        assert!(!merged[0].is_annotated());
        assert!(merged[1].is_annotated());
    }

    #[test]
    fn merge_later_annotation_wins() {
        let first = annotated(EdgeStart::Position(0), EdgeEnd::Position(1), 0.1);
        let second = annotated(EdgeStart::Position(0), EdgeEnd::Position(1), 0.9);
        let merged = merge_edges(&[Edge::plain(0, 1)], &[first, second.clone()]);
        assert_eq!(merged, vec![second]);
    }

    #[test]
    fn base_edges_terminate_empty_adjacency() {
        assert_eq!(base_edges(5, &[]), vec![Edge::terminator(5)]);
        assert_eq!(base_edges(5, &[6, 6]), vec![Edge::plain(5, 6)]);
    }
}
