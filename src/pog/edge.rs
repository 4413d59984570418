//! Edges of a partial order graph.

use crate::error::FormatError;
use std::fmt;

/// Raw start value denoting the virtual start of a sequence.
pub const VIRTUAL_START: i64 = -1;

/// Raw end value denoting the end of a sequence.
pub const TERMINATOR_SENTINEL: i64 = -999;

/// Sequence position (alignment column) of a node.
pub type Position = usize;

/// Where an edge starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeStart {
    /// The conventional predecessor of the first real position
    VirtualStart,
    Position(Position),
}

/// Where an edge ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeEnd {
    Position(Position),
    /// The sequence ends after the edge's start
    Terminator,
}

impl EdgeStart {
    /// Interprets a raw start value (`-1` is the virtual start).
    pub fn from_raw(start: i64, end: i64) -> Result<Self, FormatError> {
        match start {
            VIRTUAL_START => Ok(EdgeStart::VirtualStart),
            s if s >= 0 => Ok(EdgeStart::Position(s as Position)),
            _ => Err(FormatError::InvalidEdge { start, end }),
        }
    }

    /// Returns the raw value, as serialized.
    pub fn raw(&self) -> i64 {
        match self {
            EdgeStart::VirtualStart => VIRTUAL_START,
            EdgeStart::Position(p) => *p as i64,
        }
    }
}

impl EdgeEnd {
    /// Interprets a raw end value (`-999` is the terminator).
    pub fn from_raw(start: i64, end: i64) -> Result<Self, FormatError> {
        match end {
            TERMINATOR_SENTINEL => Ok(EdgeEnd::Terminator),
            e if e >= 0 => Ok(EdgeEnd::Position(e as Position)),
            _ => Err(FormatError::InvalidEdge { start, end }),
        }
    }

    /// Returns the raw value, as serialized.
    pub fn raw(&self) -> i64 {
        match self {
            EdgeEnd::Position(p) => *p as i64,
            EdgeEnd::Terminator => TERMINATOR_SENTINEL,
        }
    }
}

/// Reconstruction support attached to an ancestral edge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeAnnotation {
    /// Edge type of the whole graph, e.g. `"Bidirectional"`
    pub edge_type: Option<String>,
    pub reciprocated: Option<bool>,
    pub backward: Option<bool>,
    pub forward: Option<bool>,
    /// Support of the edge
    pub weight: Option<f64>,
}

// =#========================================================================#=
// EDGE
// =#========================================================================#=
/// Directed edge between two positions.
///
/// Plain edges come from the adjacency of the base graph; annotated edges
/// carry an [EdgeAnnotation] and exist only in ancestors.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    start: EdgeStart,
    end: EdgeEnd,
    annotation: Option<EdgeAnnotation>,
}

impl Edge {
    /// Creates a plain adjacency edge.
    pub fn plain(start: Position, end: Position) -> Self {
        Edge {
            start: EdgeStart::Position(start),
            end: EdgeEnd::Position(end),
            annotation: None,
        }
    }

    /// Creates the edge ending a sequence at `start`.
    pub fn terminator(start: Position) -> Self {
        Edge {
            start: EdgeStart::Position(start),
            end: EdgeEnd::Terminator,
            annotation: None,
        }
    }

    /// Creates an annotated edge.
    pub fn annotated(start: EdgeStart, end: EdgeEnd, annotation: EdgeAnnotation) -> Self {
        Edge {
            start,
            end,
            annotation: Some(annotation),
        }
    }

    pub fn start(&self) -> EdgeStart {
        self.start
    }

    pub fn end(&self) -> EdgeEnd {
        self.end
    }

    /// The `(start, end)` pair identifying this edge within a graph.
    pub fn key(&self) -> (EdgeStart, EdgeEnd) {
        (self.start, self.end)
    }

    pub fn annotation(&self) -> Option<&EdgeAnnotation> {
        self.annotation.as_ref()
    }

    pub fn is_annotated(&self) -> bool {
        self.annotation.is_some()
    }

    pub fn is_terminator(&self) -> bool {
        self.end == EdgeEnd::Terminator
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.start.raw(), self.end.raw())?;
        if let Some(annotation) = &self.annotation {
            if let Some(weight) = annotation.weight {
                write!(f, " (weight {weight})")?;
            }
        }
        Ok(())
    }
}
