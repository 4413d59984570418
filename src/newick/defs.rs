//! Constants and definitions for bracket tree text.

/// Terminates a tree string.
pub(crate) const TREE_TERMINATOR: char = ';';

/// Separates a label from its distance.
pub(crate) const DISTANCE_SEPARATOR: char = ':';

/// Separates siblings inside a group.
pub(crate) const CHILD_SEPARATOR: char = ',';

/// Opens a group of children.
pub(crate) const GROUP_OPEN: char = '(';

/// Closes a group of children.
pub(crate) const GROUP_CLOSE: char = ')';

/// Distance used when a node has none, including the root of unlabelled trees.
pub(crate) const DEFAULT_DISTANCE: f64 = 0.0;

/// Number given to the root in trees with generated ancestor labels.
pub(crate) const ROOT_ANCESTOR_NUMBER: usize = 0;
