//! Serialized form of a partial order graph.

use crate::error::PogTreeError;
use serde::{Deserialize, Serialize};

/// Most likely symbol at one position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    #[serde(rename = "Value")]
    pub value: String,
}

/// Reconstruction support of one ancestral edge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    #[serde(rename = "Recip", default)]
    pub recip: Option<bool>,
    #[serde(rename = "Backward", default)]
    pub backward: Option<bool>,
    #[serde(rename = "Forward", default)]
    pub forward: Option<bool>,
    #[serde(rename = "Weight", default)]
    pub weight: Option<f64>,
}

/// Partial order graph of one sequence, as serialized.
///
/// `indices`, `adjacent` and `nodes` are aligned by node: `adjacent[i]` lists
/// the successor positions of position `indices[i]`, an empty list marking the
/// end of the sequence. Ancestral records additionally carry annotated edges
/// as `edge_indices` (start, end) pairs with parallel `edges` annotations, and
/// one `edge_type` for the whole record. A start of `-1` denotes the virtual
/// start of the sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PogRecord {
    #[serde(rename = "GRASP_version", default)]
    pub version: Option<String>,
    #[serde(rename = "Indices")]
    pub indices: Vec<usize>,
    #[serde(rename = "Adjacent")]
    pub adjacent: Vec<Vec<usize>>,
    #[serde(rename = "Nodes")]
    pub nodes: Vec<NodeRecord>,
    #[serde(rename = "Edgeindices", default)]
    pub edge_indices: Option<Vec<(i64, i64)>>,
    #[serde(rename = "Edges", default)]
    pub edges: Option<Vec<EdgeRecord>>,
    #[serde(rename = "Edgetype", default)]
    pub edge_type: Option<String>,
    #[serde(rename = "Starts", default)]
    pub starts: Option<i64>,
    #[serde(rename = "Ends", default)]
    pub ends: Option<i64>,
    #[serde(rename = "Size", default)]
    pub size: Option<usize>,
    #[serde(rename = "Terminated", default)]
    pub terminated: Option<bool>,
    #[serde(rename = "Directed", default)]
    pub directed: Option<bool>,
    #[serde(rename = "Name")]
    pub name: String,
}

impl PogRecord {
    /// Decodes a record from JSON text.
    pub fn from_json(json: &str) -> Result<Self, PogTreeError> {
        Ok(serde_json::from_str(json)?)
    }
}
