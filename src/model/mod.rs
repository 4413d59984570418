//! Tree models.
//!
//! * [IndexedTree] - a rooted tree whose branchpoints are addressed by stable
//!   indices, with parallel arrays for parents, children, labels, and
//!   distances plus a name-to-index map
//! * [Branchpoint] - the per-vertex view (name, parent, children, distance,
//!   bound sequence)
//! * [BranchpointLabel] - tagged label deciding leaf / numbered ancestor /
//!   named ancestor once, at construction
//! * [BoundTree] - an indexed tree plus the partial order graphs of (a subset
//!   of) its branchpoints
//!
//! Trees are built either from bracket text via
//! [IndexedTree::from_parsed] or from a serialized record via
//! [IndexedTree::from_record].

pub mod label;
pub mod pog_tree;
pub mod tree;
pub mod tree_builder;

pub use label::BranchpointLabel;
pub use pog_tree::BoundTree;
pub use tree::{Branchpoint, BranchpointIndex, Children, IndexedTree, PostOrderIter, PreOrderIter};
