//! Serialized records as delivered by the reconstruction service.
//!
//! * [TreeRecord] - an indexed tree (`Parents`, `Labels`, `Distances`, `Branchpoints`)
//! * [PogRecord] - a partial order graph for one sequence
//! * [TreeOutput] / [AncestorsOutput] - job-output envelopes wrapping the above
//!
//! These are plain serde models; turning them into validated structures is the
//! job of [IndexedTree::from_record](crate::model::IndexedTree::from_record)
//! and [assemble](crate::pog::assemble).

pub mod envelope;
pub mod pog_record;
pub mod tree_record;

pub use envelope::{AncestorsOutput, TreeOutput};
pub use pog_record::{EdgeRecord, NodeRecord, PogRecord};
pub use tree_record::TreeRecord;
