//! Bracket (Newick-style) tree text parser and writer.
//!
//! This module provides [NewickParser] to parse tree strings into
//! [ParsedNewick] tokens, which [IndexedTree::from_parsed] turns into an
//! indexed tree, and the writer functions to serialize a tree back.
//!
//! # Quick API
//! * [`parse_str`] - parses a single string, returns an [IndexedTree]
//! * [`parse_file`] - parses a file holding one tree, returns an [IndexedTree]
//!
//! # Format
//! * `tree ::= '(' child (',' child)* ')' [label] [':' distance] ';'`
//! * `child ::= '(' child (',' child)* ')' [label] [':' distance] | label [':' distance]`
//!
//! Three legacy variants are accepted, distinguished by the root's trailing text:
//! * `(...);` - no labels on ancestors, root distance 0
//! * `(...):0.5;` - no labels on ancestors, root distance given
//! * `(...)N0:0.5;` - all ancestors labelled, labels are kept
//!
//! In the first two, ancestors are numbered in pre-order starting with the
//! root at 0 and named `N0`, `N1`, ... .
//!
//! Labels are split from distances at the first `:`; a label containing a
//! colon is therefore not supported.

mod defs;
pub mod parser;
pub mod writer;

pub use parser::{NewickParser, NewickVariant, NodeToken, ParsedNewick};
pub use writer::{NewickStyle, subtree_to_newick, to_newick, write_newick_file};

use crate::error::PogTreeError;
use crate::model::IndexedTree;
use std::path::Path;

// ============================================================================
// QUICK PARSING API (pub)
// ============================================================================
/// Parses a single tree string into an [IndexedTree].
///
/// This is a convenience function using a default [NewickParser].
///
/// # Arguments
/// * `newick` - The tree string to parse, terminated by `;`
///
/// # Returns
/// * [IndexedTree] - Tree parsed from the string, root at index 0
/// * [PogTreeError] - If the string is malformed
///
/// # Example
/// ```
/// use pogtree::newick::parse_str;
///
/// let tree = parse_str("((Kea:0.1,Kaka:0.1):0.2,Kakapo:0.3);")?;
/// assert_eq!(tree.num_branchpoints(), 5);
/// assert_eq!(tree.root().id(), "N0");
/// assert_eq!(tree.branchpoint("Kea").unwrap().parent(), Some("N1"));
/// # Ok::<(), pogtree::PogTreeError>(())
/// ```
pub fn parse_str<S: AsRef<str>>(newick: S) -> Result<IndexedTree, PogTreeError> {
    let parsed = NewickParser::new().parse_str(newick.as_ref())?;
    IndexedTree::from_parsed(parsed)
}

/// Parses a file holding one tree string into an [IndexedTree].
///
/// The tree may be spread over several lines.
///
/// # Arguments
/// * `path` - Path to the file (accepting `&str`, `String`, `Path`, or `PathBuf`)
///
/// # Returns
/// * [IndexedTree] - Tree parsed from the file
/// * [PogTreeError] - If reading fails or the tree is malformed
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<IndexedTree, PogTreeError> {
    let parsed = NewickParser::new().parse_file(path)?;
    IndexedTree::from_parsed(parsed)
}
