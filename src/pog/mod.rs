//! Partial order graphs (POGs) of sequences.
//!
//! Every alignment position of a sequence is a [SequenceNode] holding its
//! most likely symbol and outgoing [Edge]s. Extant sequences form a simple
//! chain; ancestors may branch and carry annotated edges with reconstruction
//! support, merged into the plain adjacency by [merge_edges].
//!
//! Graphs are built from serialized [PogRecord](crate::record::PogRecord)s
//! with [assemble].

pub mod assembler;
pub mod edge;
pub mod graph;

pub use assembler::{assemble, merge_edges};
pub use edge::{
    Edge, EdgeAnnotation, EdgeEnd, EdgeStart, Position, TERMINATOR_SENTINEL, VIRTUAL_START,
};
pub use graph::{PartialOrderGraph, SequenceNode};
