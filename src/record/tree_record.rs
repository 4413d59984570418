//! Serialized form of an indexed tree.

use crate::error::PogTreeError;
use serde::{Deserialize, Serialize};

/// Parent value of the root in a serialized tree record.
pub const ROOT_PARENT: i64 = -1;

/// Indexed tree as parallel arrays.
///
/// All arrays are aligned by branchpoint index and must have exactly
/// `branchpoints` entries. Purely numeric labels denote automatically
/// numbered ancestors.
///
/// # Example
/// ```
/// use pogtree::record::TreeRecord;
///
/// let json = r#"{"Parents":[-1,0,0],"Labels":["0","A","B"],"Distances":[0.0,1.0,2.0],"Branchpoints":3}"#;
/// let record = TreeRecord::from_json(json)?;
/// assert_eq!(record.branchpoints, 3);
/// # Ok::<(), pogtree::PogTreeError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TreeRecord {
    /// Parent index per branchpoint, [ROOT_PARENT] for the root
    pub parents: Vec<i64>,
    /// Label per branchpoint
    pub labels: Vec<String>,
    /// Distance to parent per branchpoint
    pub distances: Vec<f64>,
    /// Declared number of branchpoints
    pub branchpoints: usize,
}

impl TreeRecord {
    /// Decodes a record from JSON text.
    pub fn from_json(json: &str) -> Result<Self, PogTreeError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encodes this record as JSON text.
    pub fn to_json(&self) -> Result<String, PogTreeError> {
        Ok(serde_json::to_string(self)?)
    }
}
