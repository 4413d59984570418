//! Bracket text writing for indexed trees.

use crate::error::PogTreeError;
use crate::model::tree::{BranchpointIndex, Children, IndexedTree};
use crate::newick::defs::{
    CHILD_SEPARATOR, DISTANCE_SEPARATOR, GROUP_CLOSE, GROUP_OPEN, TREE_TERMINATOR,
};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Extra buffer in bracket string length/capacity estimate
const BUFFER_CHARS: usize = 10;

/// Style for serializing a tree to bracket text,
/// controlling whether ancestor labels are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NewickStyle {
    /// Every branchpoint as `label:distance`, e.g. `(A:1,B:2)N0:0;`
    #[default]
    Labelled,
    /// Ancestors as `:distance` only, e.g. `(A:1,B:2):0;`
    Unlabelled,
}

/// Returns the bracket text of the whole tree with closing semicolon.
///
/// # Example
/// ```
/// use pogtree::newick::{NewickStyle, parse_str, to_newick};
///
/// let tree = parse_str("(A:1,(B:2,C:2)D:3)E:4;")?;
/// assert_eq!(to_newick(&tree, NewickStyle::Labelled), "(A:1,(B:2,C:2)D:3)E:4;");
/// assert_eq!(to_newick(&tree, NewickStyle::Unlabelled), "(A:1,(B:2,C:2):3):4;");
/// # Ok::<(), pogtree::PogTreeError>(())
/// ```
pub fn to_newick(tree: &IndexedTree, style: NewickStyle) -> String {
    let mut newick = subtree_to_newick(tree, tree.root_index(), style);
    newick.push(TREE_TERMINATOR);
    newick
}

/// Returns the bracket text of the subtree rooted at `index`, without
/// closing semicolon.
///
/// A leaf renders as `label:distance`, an internal branchpoint as
/// `(child1,child2,...)label:distance` with children in stored order.
///
/// # Panics
/// Panics if `index` is out of bounds.
pub fn subtree_to_newick(tree: &IndexedTree, index: BranchpointIndex, style: NewickStyle) -> String {
    enum Step {
        Enter(BranchpointIndex),
        Separator,
        Close(BranchpointIndex),
    }

    // Helper for adding `label:distance`
    fn push_branchpoint(
        tree: &IndexedTree,
        newick: &mut String,
        index: BranchpointIndex,
        style: NewickStyle,
    ) {
        let is_ancestor = !tree.children_of(index).is_leaf();
        if !(is_ancestor && style == NewickStyle::Unlabelled) {
            newick.push_str(tree.name(index));
        }
        newick.push(DISTANCE_SEPARATOR);
        newick.push_str(&tree.distance(index).to_string());
    }

    let mut newick = String::with_capacity(estimate_newick_len(tree));
    let mut stack = vec![Step::Enter(index)];

    while let Some(step) = stack.pop() {
        match step {
            Step::Enter(current) => match tree.children_of(current) {
                Children::Leaf => push_branchpoint(tree, &mut newick, current, style),
                Children::Internal(children) => {
                    newick.push(GROUP_OPEN);
                    stack.push(Step::Close(current));
                    // Reverse, so that the first child is popped first
                    for (position, &child) in children.iter().enumerate().rev() {
                        stack.push(Step::Enter(child));
                        if position > 0 {
                            stack.push(Step::Separator);
                        }
                    }
                }
            },
            Step::Separator => newick.push(CHILD_SEPARATOR),
            Step::Close(current) => {
                newick.push(GROUP_CLOSE);
                push_branchpoint(tree, &mut newick, current, style);
            }
        }
    }

    newick
}

/// Writes the bracket text of the subtree rooted at `root` (with closing
/// semicolon) to a file, creating or truncating it.
///
/// # Returns
/// * `Ok(String)` - The text that was written
/// * `Err(PogTreeError::Lookup)` - if `root` is not a branchpoint
/// * `Err(PogTreeError::Io)` - if writing fails; the file may then be truncated
pub fn write_newick_file<P: AsRef<Path>>(
    path: P,
    tree: &IndexedTree,
    root: &str,
    style: NewickStyle,
) -> Result<String, PogTreeError> {
    let index = tree.require_index(root)?;
    let mut newick = subtree_to_newick(tree, index, style);
    newick.push(TREE_TERMINATOR);

    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(newick.as_bytes())?;
    writer.flush()?;
    Ok(newick)
}

/// Estimates the length of the bracket text for a given tree.
fn estimate_newick_len(tree: &IndexedTree) -> usize {
    // Structural "(,)" and ":" per branchpoint
    const STRUCTURE_CHARS: usize = 3;
    // Distances: ~20 chars each (e.g. "0.009529961339106089")
    const DISTANCE_CHARS: usize = 20;

    let label_capacity: usize = tree.branchpoints().iter().map(|b| b.id().len()).sum();
    label_capacity + tree.num_branchpoints() * (STRUCTURE_CHARS + DISTANCE_CHARS) + BUFFER_CHARS
}
