//! An indexed tree bound to the partial order graphs of its sequences.

use crate::error::{FormatError, LookupError, PogTreeError};
use crate::fasta::{self, FastaStyle, NamedSequence};
use crate::model::tree::{BranchpointIndex, IndexedTree};
use crate::newick::{self, NewickStyle};
use crate::pog::PartialOrderGraph;
use crate::record::{AncestorsOutput, PogRecord, TreeOutput};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

// =$========================================================================$=
// BOUND TREE
// =$========================================================================$=
/// An [IndexedTree] whose branchpoints carry the sequences of their
/// [PartialOrderGraph]s.
///
/// Graphs may cover any subset of the branchpoints; each bound graph is keyed
/// by the canonical name of its branchpoint. Binding happens once, on
/// construction.
///
/// # Example
/// ```
/// use pogtree::model::BoundTree;
/// use pogtree::newick::parse_str;
/// use pogtree::pog::assemble;
/// use pogtree::record::PogRecord;
///
/// let tree = parse_str("(A:1,B:2);")?;
/// let record = PogRecord::from_json(
///     r#"{"Name":"A","Indices":[0,1],"Adjacent":[[1],[]],"Nodes":[{"Value":"M"},{"Value":"K"}]}"#,
/// )?;
/// let bound = BoundTree::from_graphs(tree, [assemble(&record, false)?])?;
/// assert_eq!(bound.tree().branchpoint("A").unwrap().sequence(), Some("MK"));
/// assert_eq!(bound.newick_of("N0")?, "(A:1,B:2)N0:0");
/// # Ok::<(), pogtree::PogTreeError>(())
/// ```
#[derive(Debug, Clone)]
pub struct BoundTree {
    tree: IndexedTree,
    graphs: HashMap<String, PartialOrderGraph>,
}

impl BoundTree {
    /// Binds name-keyed graphs to a tree.
    ///
    /// # Returns
    /// * `Ok(BoundTree)`
    /// * `Err(PogTreeError::Lookup)` - if a graph's name is not a branchpoint
    pub fn new(
        mut tree: IndexedTree,
        graphs: HashMap<String, PartialOrderGraph>,
    ) -> Result<Self, PogTreeError> {
        let mut bindings = Vec::with_capacity(graphs.len());
        for graph in graphs.values() {
            let index = tree.index_of(graph.name()).ok_or_else(|| {
                LookupError::UnknownBranchpoint(graph.name().to_string())
            })?;
            bindings.push((index, graph.sequence()));
        }
        // Only mutate once every graph is known to fit
        for (index, sequence) in bindings {
            tree.branchpoints[index].sequence = Some(sequence);
        }

        debug!(
            branchpoints = tree.num_branchpoints(),
            graphs = graphs.len(),
            "bound graphs to tree"
        );
        Ok(BoundTree { tree, graphs })
    }

    /// Binds a collection of graphs to a tree, keyed by their names.
    ///
    /// # Returns
    /// * `Ok(BoundTree)`
    /// * `Err(PogTreeError::Format)` - if two graphs share a name
    /// * `Err(PogTreeError::Lookup)` - if a graph's name is not a branchpoint
    pub fn from_graphs<I>(tree: IndexedTree, graphs: I) -> Result<Self, PogTreeError>
    where
        I: IntoIterator<Item = PartialOrderGraph>,
    {
        let mut keyed = HashMap::new();
        for graph in graphs {
            let name = graph.name().to_string();
            if keyed.contains_key(&name) {
                return Err(FormatError::DuplicateGraph(name).into());
            }
            keyed.insert(name, graph);
        }
        Self::new(tree, keyed)
    }

    /// Builds a bound tree from the JSON outputs of a tree job and a joint
    /// reconstruction job.
    ///
    /// Extant graphs come from the tree job, ancestor graphs (with annotated
    /// edges) from the reconstruction.
    pub fn from_job_outputs(
        tree_output: &str,
        ancestors_output: &str,
    ) -> Result<Self, PogTreeError> {
        let tree_output = TreeOutput::from_json(tree_output)?;
        let ancestors_output = AncestorsOutput::from_json(ancestors_output)?;

        let tree = IndexedTree::from_record(&tree_output.result.tree)?;
        let graphs = assemble_all(
            &tree_output.result.extants,
            &ancestors_output.result.ancestors,
        )?;
        Self::from_graphs(tree, graphs)
    }

    /// Builds a bound tree from a bracket tree file and the JSON output of a
    /// joint reconstruction job. Only ancestors are bound.
    pub fn from_newick_file<P: AsRef<Path>>(
        path: P,
        ancestors_output: &str,
    ) -> Result<Self, PogTreeError> {
        let tree = newick::parse_file(path)?;
        let ancestors_output = AncestorsOutput::from_json(ancestors_output)?;
        let graphs = assemble_all(&[], &ancestors_output.result.ancestors)?;
        Self::from_graphs(tree, graphs)
    }
}

/// Assembles extant and ancestral graphs, extants first.
fn assemble_all(
    extants: &[PogRecord],
    ancestors: &[PogRecord],
) -> Result<Vec<PartialOrderGraph>, PogTreeError> {
    let extants = extants
        .iter()
        .map(|record| PartialOrderGraph::from_record(record, false));
    let ancestors = ancestors
        .iter()
        .map(|record| PartialOrderGraph::from_record(record, true));
    extants.chain(ancestors).collect()
}

// ============================================================================
// Getters / Accessors (pub)
// ============================================================================
impl BoundTree {
    pub fn tree(&self) -> &IndexedTree {
        &self.tree
    }

    /// Returns the graph bound to the given branchpoint, if any.
    pub fn graph(&self, name: &str) -> Option<&PartialOrderGraph> {
        self.graphs.get(name)
    }

    pub fn graphs(&self) -> &HashMap<String, PartialOrderGraph> {
        &self.graphs
    }

    pub fn num_graphs(&self) -> usize {
        self.graphs.len()
    }

    /// Consumes the bound tree, returning tree and graphs.
    pub fn into_parts(self) -> (IndexedTree, HashMap<String, PartialOrderGraph>) {
        (self.tree, self.graphs)
    }
}

// ============================================================================
// Export (pub)
// ============================================================================
impl BoundTree {
    /// Returns the labelled bracket text of the subtree rooted at `name`,
    /// without closing semicolon.
    pub fn newick_of(&self, name: &str) -> Result<String, PogTreeError> {
        let index = self.tree.require_index(name)?;
        Ok(newick::subtree_to_newick(&self.tree, index, NewickStyle::Labelled))
    }

    /// Returns the bracket text of the whole tree, with closing semicolon.
    pub fn to_newick(&self, style: NewickStyle) -> String {
        newick::to_newick(&self.tree, style)
    }

    /// Writes the bracket text of the subtree rooted at `root` to a file.
    ///
    /// See [write_newick_file](crate::newick::write_newick_file).
    pub fn write_newick_file<P: AsRef<Path>>(
        &self,
        path: P,
        root: &str,
        style: NewickStyle,
    ) -> Result<String, PogTreeError> {
        newick::write_newick_file(path, &self.tree, root, style)
    }

    /// Returns the bound sequences in branchpoint index order.
    pub fn sequences(&self) -> Vec<NamedSequence> {
        self.collect_sequences(0..self.tree.num_branchpoints())
    }

    /// Returns the bound sequences of the subtree rooted at `name`,
    /// in branchpoint index order.
    pub fn subtree_sequences(&self, name: &str) -> Result<Vec<NamedSequence>, PogTreeError> {
        let index = self.tree.require_index(name)?;
        let mut indices = self.tree.subtree_indices(index);
        indices.sort_unstable();
        Ok(self.collect_sequences(indices))
    }

    /// Writes all bound sequences to a FASTA file.
    pub fn write_fasta_file<P: AsRef<Path>>(
        &self,
        path: P,
        style: FastaStyle,
    ) -> Result<(), PogTreeError> {
        fasta::write_fasta_file(path, &self.sequences(), style)
    }

    fn collect_sequences<I>(&self, indices: I) -> Vec<NamedSequence>
    where
        I: IntoIterator<Item = BranchpointIndex>,
    {
        indices
            .into_iter()
            .filter_map(|index| {
                let branchpoint = self.tree.branchpoint_at(index);
                branchpoint
                    .sequence()
                    .map(|sequence| NamedSequence::new(branchpoint.id(), sequence))
            })
            .collect()
    }
}
