//! Job-output envelopes of the reconstruction service.
//!
//! A tree job answers `{"Result": {"Tree": {..}, "Extants": [..]}}`,
//! a joint reconstruction answers `{"Result": {"Ancestors": [..]}}`.
//! Additional fields (e.g. the job number) are ignored.

use crate::error::PogTreeError;
use crate::record::{PogRecord, TreeRecord};
use serde::Deserialize;

/// Output of a tree job: the tree and the graphs of its extant sequences.
#[derive(Debug, Clone, Deserialize)]
pub struct TreeOutput {
    #[serde(rename = "Result")]
    pub result: TreeResult,
}

/// Body of a [TreeOutput].
#[derive(Debug, Clone, Deserialize)]
pub struct TreeResult {
    #[serde(rename = "Tree")]
    pub tree: TreeRecord,
    #[serde(rename = "Extants", default)]
    pub extants: Vec<PogRecord>,
}

/// Output of a joint reconstruction: the graphs of all ancestors.
#[derive(Debug, Clone, Deserialize)]
pub struct AncestorsOutput {
    #[serde(rename = "Result")]
    pub result: AncestorsResult,
}

/// Body of an [AncestorsOutput].
#[derive(Debug, Clone, Deserialize)]
pub struct AncestorsResult {
    #[serde(rename = "Ancestors")]
    pub ancestors: Vec<PogRecord>,
}

impl TreeOutput {
    /// Decodes a tree job output from JSON text.
    pub fn from_json(json: &str) -> Result<Self, PogTreeError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl AncestorsOutput {
    /// Decodes a joint reconstruction output from JSON text.
    pub fn from_json(json: &str) -> Result<Self, PogTreeError> {
        Ok(serde_json::from_str(json)?)
    }
}
