//! Provides the indexed tree representation.
//!
//! Provides core data structures for representing phylogenetic trees:
//! * [IndexedTree] - topology as parallel arrays addressed by [BranchpointIndex]
//! * [Branchpoint] - name-based view of one vertex, optionally carrying
//!   the sequence bound to it
//! * [Children] - children of a vertex, distinguishing leaves explicitly
//!
//! Trees are constructed by the builder functions in
//! [tree_builder](crate::model::tree_builder).

use crate::error::{LookupError, PogTreeError};
use crate::model::label::BranchpointLabel;
use std::collections::HashMap;

/// Index of a branchpoint in a tree.
pub type BranchpointIndex = usize;

// =#========================================================================#=
// CHILDREN
// =#========================================================================#=
/// Children of a branchpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum Children {
    /// Branchpoint has no children
    Leaf,
    /// Indices of the children, in index order
    Internal(Vec<BranchpointIndex>),
}

impl Children {
    /// Returns the child indices; empty for a leaf.
    pub fn as_slice(&self) -> &[BranchpointIndex] {
        match self {
            Children::Leaf => &[],
            Children::Internal(children) => children,
        }
    }

    /// Whether this marks a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Children::Leaf)
    }
}

// =#========================================================================#=
// BRANCHPOINT
// =#========================================================================#=
/// A vertex of the tree described by names rather than indices.
#[derive(Debug, Clone, PartialEq)]
pub struct Branchpoint {
    pub(crate) id: String,
    pub(crate) label: BranchpointLabel,
    pub(crate) parent: Option<String>,
    pub(crate) distance: f64,
    pub(crate) children: Vec<String>,
    pub(crate) sequence: Option<String>,
}

impl Branchpoint {
    /// Canonical name of this branchpoint.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &BranchpointLabel {
        &self.label
    }

    /// Name of the parent, `None` for the root.
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    /// Distance to the parent.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Names of the children, empty for leaves.
    pub fn children(&self) -> &[String] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Sequence bound to this branchpoint, if a graph was bound to it.
    pub fn sequence(&self) -> Option<&str> {
        self.sequence.as_deref()
    }
}

// =$========================================================================$=
// INDEXED TREE
// =$========================================================================$=
/// A rooted phylogenetic tree with stable integer indices.
///
/// # Structure
/// - Branchpoints are addressed by [BranchpointIndex] in `[0, num_branchpoints)`.
/// - Names map bijectively onto indices.
/// - Exactly one root (parent `None`); every other index has one parent.
/// - Children arrays partition the non-root indices.
/// - Every branchpoint is reachable from the root.
///
/// A tree is read-only once built, except for binding sequences,
/// which happens once in [BoundTree](crate::model::BoundTree).
#[derive(Debug, Clone)]
pub struct IndexedTree {
    pub(crate) labels: Vec<BranchpointLabel>,
    pub(crate) indices: HashMap<String, BranchpointIndex>,
    pub(crate) parents: Vec<Option<BranchpointIndex>>,
    pub(crate) children: Vec<Children>,
    pub(crate) distances: Vec<f64>,
    pub(crate) root: BranchpointIndex,
    pub(crate) branchpoints: Vec<Branchpoint>,
}

// ============================================================================
// Getters / Accessors (pub)
// ============================================================================
impl IndexedTree {
    /// Returns the number of branchpoints in this tree.
    pub fn num_branchpoints(&self) -> usize {
        self.labels.len()
    }

    /// Returns the number of leaves in this tree.
    pub fn num_leaves(&self) -> usize {
        self.children.iter().filter(|c| c.is_leaf()).count()
    }

    /// Returns the index of the root.
    pub fn root_index(&self) -> BranchpointIndex {
        self.root
    }

    /// Returns the root branchpoint.
    pub fn root(&self) -> &Branchpoint {
        &self.branchpoints[self.root]
    }

    /// Returns the index of the branchpoint with the given canonical name.
    pub fn index_of(&self, name: &str) -> Option<BranchpointIndex> {
        self.indices.get(name).copied()
    }

    /// Like [index_of](Self::index_of), but failing with a [LookupError].
    pub fn require_index(&self, name: &str) -> Result<BranchpointIndex, PogTreeError> {
        self.index_of(name)
            .ok_or_else(|| LookupError::UnknownBranchpoint(name.to_string()).into())
    }

    /// Returns the branchpoint with the given canonical name.
    pub fn branchpoint(&self, name: &str) -> Option<&Branchpoint> {
        self.index_of(name).map(|index| &self.branchpoints[index])
    }

    /// Returns the branchpoint at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn branchpoint_at(&self, index: BranchpointIndex) -> &Branchpoint {
        &self.branchpoints[index]
    }

    /// Returns all branchpoints in index order.
    pub fn branchpoints(&self) -> &[Branchpoint] {
        &self.branchpoints
    }

    /// Returns the label at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn label(&self, index: BranchpointIndex) -> &BranchpointLabel {
        &self.labels[index]
    }

    /// Returns the canonical name at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn name(&self, index: BranchpointIndex) -> &str {
        &self.branchpoints[index].id
    }

    /// Returns the parent index of `index`, `None` for the root.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn parent_of(&self, index: BranchpointIndex) -> Option<BranchpointIndex> {
        self.parents[index]
    }

    /// Returns the children of `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn children_of(&self, index: BranchpointIndex) -> &Children {
        &self.children[index]
    }

    /// Returns the distance of `index` to its parent.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn distance(&self, index: BranchpointIndex) -> f64 {
        self.distances[index]
    }

    /// Returns the parent array (`None` for the root).
    pub fn parents(&self) -> &[Option<BranchpointIndex>] {
        &self.parents
    }

    /// Returns the distance array, aligned by index.
    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    /// Returns the mapping from canonical name to index.
    pub fn name_indices(&self) -> &HashMap<String, BranchpointIndex> {
        &self.indices
    }

    /// Returns the indices of the subtree rooted at `index` in pre-order.
    pub fn subtree_indices(&self, index: BranchpointIndex) -> Vec<BranchpointIndex> {
        self.pre_order_iter_from(index).collect()
    }

    /// Validates the tree structure and all index references.
    ///
    /// Checks:
    /// - All arrays have the same length and name map is a bijection
    /// - Root index is valid and the only vertex without parent
    /// - All parent indices are valid and list this vertex as a child
    /// - All children point back to their parent, no child appears twice
    /// - All vertices are reachable from the root
    ///
    /// # Returns
    /// `true` if tree is valid, `false` otherwise
    pub fn is_valid(&self) -> bool {
        let n = self.labels.len();
        if self.parents.len() != n
            || self.children.len() != n
            || self.distances.len() != n
            || self.branchpoints.len() != n
            || self.indices.len() != n
        {
            return false;
        }

        // Name map is a bijection onto [0, n)
        for (name, &index) in &self.indices {
            if index >= n || self.branchpoints[index].id != *name {
                return false;
            }
        }

        // Exactly one root
        if self.root >= n || self.parents[self.root].is_some() {
            return false;
        }
        if self.parents.iter().filter(|p| p.is_none()).count() != 1 {
            return false;
        }

        // Children partition the non-root vertices
        let mut seen = vec![false; n];
        for (parent, children) in self.children.iter().enumerate() {
            if let Children::Internal(list) = children {
                if list.is_empty() {
                    return false;
                }
                for &child in list {
                    if child >= n || seen[child] || self.parents[child] != Some(parent) {
                        return false;
                    }
                    seen[child] = true;
                }
            }
        }
        if seen.iter().enumerate().any(|(index, &s)| s == (index == self.root)) {
            return false;
        }

        self.pre_order_iter().count() == n
    }
}

impl std::ops::Index<BranchpointIndex> for IndexedTree {
    type Output = Branchpoint;

    fn index(&self, index: BranchpointIndex) -> &Self::Output {
        &self.branchpoints[index]
    }
}

// =$========================================================================$=
// ITERATORS
// =$========================================================================$=
impl IndexedTree {
    /// Returns an iterator over the indices in pre-order (parents before children),
    /// children in stored order.
    pub fn pre_order_iter(&self) -> PreOrderIter<'_> {
        PreOrderIter::new(self, self.root)
    }

    /// Returns a pre-order iterator over the subtree rooted at `index`.
    pub fn pre_order_iter_from(&self, index: BranchpointIndex) -> PreOrderIter<'_> {
        PreOrderIter::new(self, index)
    }

    /// Returns an iterator over the indices in post-order (children before parents).
    pub fn post_order_iter(&self) -> PostOrderIter<'_> {
        PostOrderIter::new(self, self.root)
    }
}

/// Iterator for pre-order traversal (parents before children).
///
/// Uses an explicit stack, so deep trees do not exhaust the call stack.
pub struct PreOrderIter<'a> {
    tree: &'a IndexedTree,
    stack: Vec<BranchpointIndex>,
}

impl<'a> PreOrderIter<'a> {
    fn new(tree: &'a IndexedTree, start: BranchpointIndex) -> Self {
        let mut stack = Vec::new();
        if start < tree.num_branchpoints() {
            stack.push(start);
        }
        PreOrderIter { tree, stack }
    }
}

impl Iterator for PreOrderIter<'_> {
    type Item = BranchpointIndex;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;
        // Push in reverse so the first child is visited first
        self.stack
            .extend(self.tree.children[index].as_slice().iter().rev());
        Some(index)
    }
}

/// Iterator for post-order traversal (children before parents).
pub struct PostOrderIter<'a> {
    tree: &'a IndexedTree,
    stack: Vec<(BranchpointIndex, bool)>, // (index, children_visited)
}

impl<'a> PostOrderIter<'a> {
    fn new(tree: &'a IndexedTree, start: BranchpointIndex) -> Self {
        let mut stack = Vec::new();
        if start < tree.num_branchpoints() {
            stack.push((start, false));
        }
        PostOrderIter { tree, stack }
    }
}

impl Iterator for PostOrderIter<'_> {
    type Item = BranchpointIndex;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((index, children_visited)) = self.stack.pop() {
            let children = self.tree.children[index].as_slice();
            if children_visited || children.is_empty() {
                return Some(index);
            }
            self.stack.push((index, true));
            for &child in children.iter().rev() {
                self.stack.push((child, false));
            }
        }
        None
    }
}
