//! Branchpoint labels.
//!
//! A [BranchpointLabel] is decided once, when the tree is parsed or read from
//! a record, and consumed thereafter without re-inspecting the string shape:
//! * `Leaf` - an observed (extant) sequence
//! * `AutoAncestor` - a purely numeric label, either numbered during parsing
//!   or given as digits in the input, canonically named `N<digits>`
//! * `NamedAncestor` - an ancestor whose label was given in the input

use std::fmt;

/// Marker prefixed to numeric labels to form their canonical name.
pub const ANCESTOR_PREFIX: char = 'N';

// =#========================================================================#=
// BRANCHPOINT LABEL
// =#========================================================================#=
/// Label of a branchpoint (vertex) in an indexed tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BranchpointLabel {
    /// Label of an observed sequence
    Leaf(String),
    /// Numeric label, digits kept as written (e.g. `"007"`)
    AutoAncestor(String),
    /// Ancestor with a label taken verbatim from the input
    NamedAncestor(String),
}

impl BranchpointLabel {
    /// Creates the label of an ancestor numbered during parsing.
    pub fn auto(number: usize) -> Self {
        BranchpointLabel::AutoAncestor(number.to_string())
    }

    /// Interprets a label given in bracket text or a serialized record.
    ///
    /// Purely numeric labels become [AutoAncestor](Self::AutoAncestor)s,
    /// whether or not the branchpoint has children; any other label is a
    /// named ancestor if the branchpoint has children, and a leaf otherwise.
    ///
    /// # Arguments
    /// * `raw` - Label as written in the input
    /// * `has_children` - Whether the branchpoint has any children
    pub fn from_input(raw: &str, has_children: bool) -> Self {
        if is_numeric(raw) {
            BranchpointLabel::AutoAncestor(raw.to_string())
        } else if has_children {
            BranchpointLabel::NamedAncestor(raw.to_string())
        } else {
            BranchpointLabel::Leaf(raw.to_string())
        }
    }

    /// Returns the canonical name, under which the branchpoint is looked up.
    pub fn name(&self) -> String {
        match self {
            BranchpointLabel::Leaf(label) | BranchpointLabel::NamedAncestor(label) => {
                label.clone()
            }
            BranchpointLabel::AutoAncestor(digits) => format!("{ANCESTOR_PREFIX}{digits}"),
        }
    }

    /// Returns the label as written into a serialized tree record,
    /// i.e. numeric labels as their bare digits.
    pub fn record_label(&self) -> String {
        match self {
            BranchpointLabel::AutoAncestor(digits) => digits.clone(),
            other => other.name(),
        }
    }

    /// Whether the label has the shape of an ancestor label (numeric or named).
    pub fn is_ancestor(&self) -> bool {
        !matches!(self, BranchpointLabel::Leaf(_))
    }
}

impl fmt::Display for BranchpointLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BranchpointLabel::Leaf(label) | BranchpointLabel::NamedAncestor(label) => {
                write!(f, "{label}")
            }
            BranchpointLabel::AutoAncestor(digits) => write!(f, "{ANCESTOR_PREFIX}{digits}"),
        }
    }
}

/// Canonicalizes a sequence name: purely numeric names get the
/// [ANCESTOR_PREFIX], anything else is returned unchanged.
///
/// # Examples
/// ```
/// use pogtree::model::label::canonical_name;
///
/// assert_eq!(canonical_name("12"), "N12");
/// assert_eq!(canonical_name("007"), "N007");
/// assert_eq!(canonical_name("XP_006629927.2"), "XP_006629927.2");
/// ```
pub fn canonical_name(raw: &str) -> String {
    if is_numeric(raw) {
        format!("{ANCESTOR_PREFIX}{raw}")
    } else {
        raw.to_string()
    }
}

/// Whether a label consists only of ASCII digits.
fn is_numeric(raw: &str) -> bool {
    !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_labels_become_auto_ancestors() {
        assert_eq!(
            BranchpointLabel::from_input("3", true),
            BranchpointLabel::auto(3)
        );
        assert_eq!(BranchpointLabel::auto(3).name(), "N3");
        assert_eq!(BranchpointLabel::auto(3).record_label(), "3");

        // Leaves too
        assert_eq!(
            BranchpointLabel::from_input("12", false).name(),
            "N12"
        );
    }

    #[test]
    fn numeric_labels_keep_leading_zeros() {
        let label = BranchpointLabel::from_input("007", true);
        assert_eq!(label.name(), "N007");
        assert_eq!(label.record_label(), "007");
        assert_ne!(label.name(), BranchpointLabel::from_input("7", true).name());
    }

    #[test]
    fn numeric_labels_beyond_integer_range() {
        let digits = "123456789012345678901234567890";
        assert_eq!(
            BranchpointLabel::from_input(digits, true).name(),
            format!("N{digits}")
        );
        assert_eq!(canonical_name(digits), format!("N{digits}"));
    }

    #[test]
    fn non_numeric_labels_depend_on_children() {
        assert_eq!(
            BranchpointLabel::from_input("N3", true),
            BranchpointLabel::NamedAncestor("N3".to_string())
        );
        assert_eq!(
            BranchpointLabel::from_input("Kea", false),
            BranchpointLabel::Leaf("Kea".to_string())
        );
        assert!(!BranchpointLabel::Leaf("Kea".to_string()).is_ancestor());
    }

    #[test]
    fn canonical_name_leaves_mixed_labels_alone() {
        assert_eq!(canonical_name("0"), "N0");
        assert_eq!(canonical_name("N0"), "N0");
        assert_eq!(canonical_name("1a"), "1a");
        assert_eq!(canonical_name(""), "");
    }
}
