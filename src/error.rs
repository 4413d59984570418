//! Error types for parsing trees and assembling partial order graphs.
//!
//! Two failure categories exist, both fatal for the call that raised them:
//! * [FormatError] - malformed bracket text or inconsistent serialized records
//! * [LookupError] - a referenced name or position is absent, i.e. tree and
//!   graph inputs disagree with each other
//!
//! Both are wrapped by the crate-level [PogTreeError], which additionally
//! carries I/O failures (writing exports, reading tree files) and JSON
//! decoding failures of serialized records.

use thiserror::Error;

// =#========================================================================#=
// FORMAT ERROR
// =#========================================================================#=
/// Input text or record does not have the expected shape.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    #[error("tree text must end with ';'")]
    MissingTerminator,
    #[error("tree text contains no parenthesis group: '{0}'")]
    MissingGroup(String),
    #[error("unmatched parenthesis at byte {position}")]
    UnmatchedParenthesis { position: usize },
    #[error("unrecognized text after outermost group: '{0}'")]
    UnrecognizedVariant(String),
    #[error("unexpected text around group: '{0}'")]
    UnexpectedText(String),
    #[error("empty child in group '{0}'")]
    EmptyChild(String),
    #[error("leaf without label: '{0}'")]
    MissingLeafLabel(String),
    #[error("internal node without label in labelled tree: '{0}'")]
    MissingInternalLabel(String),
    #[error("invalid distance '{0}'")]
    InvalidDistance(String),
    #[error("duplicate branchpoint name '{0}'")]
    DuplicateName(String),
    #[error("{field} has {actual} entries, expected {expected}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("parent index {parent} of branchpoint {child} is out of range")]
    InvalidParent { child: usize, parent: i64 },
    #[error("tree has no root")]
    MissingRoot,
    #[error("tree has more than one root (indices {first} and {second})")]
    MultipleRoots { first: usize, second: usize },
    #[error("{unreachable} branchpoints are not reachable from the root")]
    Disconnected { unreachable: usize },
    #[error("record '{record}' lacks field {field}")]
    MissingField { record: String, field: &'static str },
    #[error("position {0} appears more than once")]
    DuplicatePosition(usize),
    #[error("extant '{name}' has {successors} successors at position {position}")]
    BranchingExtant {
        name: String,
        position: usize,
        successors: usize,
    },
    #[error("invalid edge ({start}, {end})")]
    InvalidEdge { start: i64, end: i64 },
    #[error("graph '{0}' is bound more than once")]
    DuplicateGraph(String),
}

impl FormatError {
    /// Fails with [FormatError::LengthMismatch] unless `actual == expected`.
    pub(crate) fn check_len(
        field: &'static str,
        expected: usize,
        actual: usize,
    ) -> Result<(), FormatError> {
        if expected != actual {
            return Err(FormatError::LengthMismatch {
                field,
                expected,
                actual,
            });
        }
        Ok(())
    }
}

// =#========================================================================#=
// LOOKUP ERROR
// =#========================================================================#=
/// A name or position referenced by one structure is missing from another.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LookupError {
    #[error("unknown branchpoint '{0}'")]
    UnknownBranchpoint(String),
    #[error("parent '{parent}' of '{child}' is not a branchpoint")]
    UnknownParent { child: String, parent: String },
    #[error("branchpoint '{0}' has no parent entry")]
    MissingParent(String),
    #[error("graph '{graph}' has no node at position {position}")]
    UnknownPosition { graph: String, position: usize },
    #[error("graph '{0}' has no nodes to attach a virtual start edge to")]
    EmptyGraph(String),
}

// =#========================================================================#=
// POG TREE ERROR
// =#========================================================================#=
/// Crate-level error returned by every fallible operation.
#[derive(Error, Debug)]
pub enum PogTreeError {
    #[error("Format error - {0}")]
    Format(#[from] FormatError),
    #[error("Lookup error - {0}")]
    Lookup(#[from] LookupError),
    #[error("IO error - {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error - {0}")]
    Json(#[from] serde_json::Error),
}

impl PogTreeError {
    /// Returns the wrapped [FormatError], if this is one.
    ///
    /// Records that cannot be decoded at all, e.g. lacking a required field
    /// such as `Indices`, `Name` or `Parents`, are [PogTreeError::Json] and
    /// return `None` here; use [is_format](Self::is_format) to cover both.
    pub fn as_format(&self) -> Option<&FormatError> {
        match self {
            PogTreeError::Format(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the wrapped [LookupError], if this is one.
    pub fn as_lookup(&self) -> Option<&LookupError> {
        match self {
            PogTreeError::Lookup(e) => Some(e),
            _ => None,
        }
    }

    /// Whether the input was malformed, including undecodable JSON records
    /// (missing required fields, wrong types).
    pub fn is_format(&self) -> bool {
        matches!(self, PogTreeError::Format(_) | PogTreeError::Json(_))
    }
}
