//! Construction of [IndexedTree]s.
//!
//! Two inputs lead to the same validated structure:
//! * [IndexedTree::from_parsed] - pre-order tokens and parent names from the
//!   [NewickParser](crate::newick::NewickParser); index = visit order
//! * [IndexedTree::from_record] - an already indexed [TreeRecord]
//!
//! Both resolve parents to indices first and then derive children arrays and
//! branchpoints from the parent array in one shared step, which also checks
//! the structural invariants. Construction is all-or-nothing.

use crate::error::{FormatError, LookupError, PogTreeError};
use crate::model::label::BranchpointLabel;
use crate::model::tree::{Branchpoint, BranchpointIndex, Children, IndexedTree};
use crate::newick::ParsedNewick;
use crate::record::TreeRecord;
use crate::record::tree_record::ROOT_PARENT;
use std::collections::HashMap;
use tracing::debug;

impl IndexedTree {
    /// Builds a tree from parsed bracket text.
    ///
    /// # Returns
    /// * `Ok(IndexedTree)` - with the root at index 0
    /// * `Err(PogTreeError::Format)` - on duplicate names
    /// * `Err(PogTreeError::Lookup)` - if a parent name is unknown
    ///   or a non-root node has no parent
    pub fn from_parsed(parsed: ParsedNewick) -> Result<Self, PogTreeError> {
        let (tokens, parent_names) = parsed.into_parts();

        let mut labels = Vec::with_capacity(tokens.len());
        let mut distances = Vec::with_capacity(tokens.len());
        for token in tokens {
            labels.push(token.label);
            distances.push(token.distance);
        }
        let indices = index_names(&labels)?;

        let mut parents = Vec::with_capacity(labels.len());
        for (index, label) in labels.iter().enumerate() {
            if index == 0 {
                parents.push(None);
                continue;
            }
            let name = label.name();
            let parent_name = parent_names
                .get(&name)
                .ok_or_else(|| LookupError::MissingParent(name.clone()))?;
            let parent = indices
                .get(parent_name)
                .ok_or_else(|| LookupError::UnknownParent {
                    child: name.clone(),
                    parent: parent_name.clone(),
                })?;
            parents.push(Some(*parent));
        }

        assemble(labels, indices, parents, distances)
    }

    /// Builds a tree from a serialized record.
    ///
    /// Purely numeric labels become [BranchpointLabel::AutoAncestor]s, named
    /// `N<digits>` with the digits as written.
    ///
    /// # Returns
    /// * `Ok(IndexedTree)`
    /// * `Err(PogTreeError::Format)` - if array lengths disagree with the
    ///   declared count, a parent index is out of range, names are duplicated,
    ///   or the arrays do not describe a single rooted tree
    pub fn from_record(record: &TreeRecord) -> Result<Self, PogTreeError> {
        let n = record.branchpoints;
        FormatError::check_len("Parents", n, record.parents.len())?;
        FormatError::check_len("Labels", n, record.labels.len())?;
        FormatError::check_len("Distances", n, record.distances.len())?;

        let mut parents = Vec::with_capacity(n);
        for (child, &parent) in record.parents.iter().enumerate() {
            if parent == ROOT_PARENT {
                parents.push(None);
            } else if parent >= 0 && (parent as usize) < n {
                parents.push(Some(parent as usize));
            } else {
                return Err(FormatError::InvalidParent { child, parent }.into());
            }
        }

        let mut has_children = vec![false; n];
        for parent in parents.iter().flatten() {
            has_children[*parent] = true;
        }
        let labels: Vec<BranchpointLabel> = record
            .labels
            .iter()
            .zip(has_children)
            .map(|(raw, internal)| BranchpointLabel::from_input(raw, internal))
            .collect();
        let indices = index_names(&labels)?;

        assemble(labels, indices, parents, record.distances.clone())
    }

    /// Returns the serialized record of this tree.
    ///
    /// Auto ancestors are written as bare numbers, the root's parent as `-1`.
    pub fn to_record(&self) -> TreeRecord {
        TreeRecord {
            parents: self
                .parents
                .iter()
                .map(|parent| parent.map_or(ROOT_PARENT, |p| p as i64))
                .collect(),
            labels: self.labels.iter().map(BranchpointLabel::record_label).collect(),
            distances: self.distances.clone(),
            branchpoints: self.num_branchpoints(),
        }
    }
}

/// Maps canonical names to indices, rejecting duplicates.
fn index_names(labels: &[BranchpointLabel]) -> Result<HashMap<String, BranchpointIndex>, FormatError> {
    let mut indices = HashMap::with_capacity(labels.len());
    for (index, label) in labels.iter().enumerate() {
        let name = label.name();
        if indices.insert(name.clone(), index).is_some() {
            return Err(FormatError::DuplicateName(name));
        }
    }
    Ok(indices)
}

/// Derives children and branchpoints from resolved parents and checks that
/// the result is a single tree.
fn assemble(
    labels: Vec<BranchpointLabel>,
    indices: HashMap<String, BranchpointIndex>,
    parents: Vec<Option<BranchpointIndex>>,
    distances: Vec<f64>,
) -> Result<IndexedTree, PogTreeError> {
    let n = labels.len();

    let mut root = None;
    for (index, parent) in parents.iter().enumerate() {
        if parent.is_none() {
            if let Some(first) = root {
                return Err(FormatError::MultipleRoots {
                    first,
                    second: index,
                }
                .into());
            }
            root = Some(index);
        }
    }
    let root = root.ok_or(FormatError::MissingRoot)?;

    // Children in index order
    let mut child_lists: Vec<Vec<BranchpointIndex>> = vec![Vec::new(); n];
    for (child, parent) in parents.iter().enumerate() {
        if let Some(parent) = parent {
            child_lists[*parent].push(child);
        }
    }
    let children: Vec<Children> = child_lists
        .into_iter()
        .map(|list| {
            if list.is_empty() {
                Children::Leaf
            } else {
                Children::Internal(list)
            }
        })
        .collect();

    let names: Vec<String> = labels.iter().map(BranchpointLabel::name).collect();
    let branchpoints = (0..n)
        .map(|index| Branchpoint {
            id: names[index].clone(),
            label: labels[index].clone(),
            parent: parents[index].map(|p| names[p].clone()),
            distance: distances[index],
            children: children[index]
                .as_slice()
                .iter()
                .map(|&c| names[c].clone())
                .collect(),
            sequence: None,
        })
        .collect();

    let tree = IndexedTree {
        labels,
        indices,
        parents,
        children,
        distances,
        root,
        branchpoints,
    };

    // Cycles detached from the root leave branchpoints unreachable
    let reachable = tree.pre_order_iter().count();
    if reachable != n {
        return Err(FormatError::Disconnected {
            unreachable: n - reachable,
        }
        .into());
    }

    debug!(branchpoints = n, root = tree.name(root), "built indexed tree");
    Ok(tree)
}
