//! Pogtree is a library to read reconstructed phylogenies and bind them to
//! the partial order graphs (POGs) of their sequences.
//!
//! Core functionality provided:
//! - Newick: Parse bracket tree text in three legacy variants (unlabelled,
//!   distance-only root, labelled) into an [IndexedTree].
//! - Records: Read indexed trees and POGs from the JSON records of a
//!   reconstruction service, see [crate::record].
//! - POG assembly: Build a [PartialOrderGraph] per sequence, merging the
//!   annotated edges of ancestors into their plain adjacency.
//! - Binding: Attach POG sequences to the branchpoints of a tree
//!   ([BoundTree]) and export subtrees as bracket text or sequences as FASTA.
//! - Tree model:
//!   - Arena pattern, branchpoints are addressed by stable indices.
//!   - Labels are tagged once as leaf, numbered ancestor (`N<k>`), or named
//!     ancestor. See [crate::model] for more details.
//!
//! Limitations:
//! - Labels must not contain `:` (split from distances at the first colon)
//! - One tree per bracket text
//!
//! # Usage patterns
//! 1. Quick functions below parse with default settings.
//! 2. Configure a [NewickParser](crate::newick::NewickParser) to require a
//!    specific variant, or use [assemble](crate::pog::assemble) and
//!    [BoundTree::from_graphs] for full control over binding.
//!
//! ## Example
//!
//! Parse a tree and export a subtree:
//! ```
//! use pogtree::parse_newick_str;
//! use pogtree::newick::{NewickStyle, to_newick};
//!
//! let tree = parse_newick_str("(A:1,(B:2,C:2)D:3)E:4;")?;
//! assert_eq!(tree.num_branchpoints(), 5);
//! assert_eq!(tree.root().id(), "E");
//! assert_eq!(to_newick(&tree, NewickStyle::Labelled), "(A:1,(B:2,C:2)D:3)E:4;");
//! # Ok::<(), pogtree::PogTreeError>(())
//! ```
//!
//! Bind service output:
//! ```no_run
//! use pogtree::bound_tree_from_job_outputs;
//! use pogtree::fasta::FastaStyle;
//!
//! let tree_json = std::fs::read_to_string("tree_job.json")?;
//! let ancestors_json = std::fs::read_to_string("joint_job.json")?;
//! let bound = bound_tree_from_job_outputs(&tree_json, &ancestors_json)?;
//! bound.write_fasta_file("ancestors.fa", FastaStyle::default())?;
//! # Ok::<(), pogtree::PogTreeError>(())
//! ```

pub mod error;
pub mod fasta;
pub mod model;
pub mod newick;
pub mod pog;
pub mod record;

pub use error::{FormatError, LookupError, PogTreeError};
pub use model::{BoundTree, IndexedTree};
pub use pog::PartialOrderGraph;

use crate::record::{PogRecord, TreeRecord};
use std::path::Path;

// ============================================================================
// Quick Newick API
// ============================================================================
/// Parses a bracket tree string using default settings.
///
/// See [`newick::parse_str`] for full documentation of this convenience function.
pub fn parse_newick_str<S: AsRef<str>>(newick: S) -> Result<IndexedTree, PogTreeError> {
    newick::parse_str(newick)
}

/// Parses a file holding one bracket tree string using default settings.
///
/// See [`newick::parse_file`] for full documentation of this convenience function.
pub fn parse_newick_file<P: AsRef<Path>>(path: P) -> Result<IndexedTree, PogTreeError> {
    newick::parse_file(path)
}

// ============================================================================
// Quick Record API
// ============================================================================
/// Builds an [IndexedTree] from a JSON tree record.
pub fn tree_from_json(json: &str) -> Result<IndexedTree, PogTreeError> {
    IndexedTree::from_record(&TreeRecord::from_json(json)?)
}

/// Builds a [PartialOrderGraph] from a JSON POG record.
///
/// # Arguments
/// * `json` - The serialized graph
/// * `is_ancestor` - Whether annotated edges are read and merged
pub fn pog_from_json(json: &str, is_ancestor: bool) -> Result<PartialOrderGraph, PogTreeError> {
    pog::assemble(&PogRecord::from_json(json)?, is_ancestor)
}

/// Builds a [BoundTree] from the JSON outputs of a tree job and a joint
/// reconstruction job.
///
/// See [BoundTree::from_job_outputs].
pub fn bound_tree_from_job_outputs(
    tree_output: &str,
    ancestors_output: &str,
) -> Result<BoundTree, PogTreeError> {
    BoundTree::from_job_outputs(tree_output, ancestors_output)
}
