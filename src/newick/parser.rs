//! Structs and logic to parse bracket tree strings.
//!
//! This module provides the [NewickParser], which turns a tree string into
//! [ParsedNewick]: the visited nodes as [NodeToken]s in pre-order together
//! with a map from each node name to the name of its parent.

use crate::error::{FormatError, PogTreeError};
use crate::model::label::BranchpointLabel;
use crate::newick::defs::{
    CHILD_SEPARATOR, DEFAULT_DISTANCE, DISTANCE_SEPARATOR, GROUP_CLOSE, GROUP_OPEN,
    ROOT_ANCESTOR_NUMBER, TREE_TERMINATOR,
};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

// =#========================================================================#=
// VARIANT & TOKENS
// =#========================================================================#=
/// Legacy shapes of bracket tree text, told apart by the text following the
/// outermost closing parenthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewickVariant {
    /// `(...);` - no root label or distance; ancestors get generated labels
    Unlabelled,
    /// `(...):0.5;` - root distance only; ancestors get generated labels
    DistanceOnly,
    /// `(...)N0:0.5;` - every ancestor carries its label, which is kept
    Labelled,
}

impl NewickVariant {
    /// Whether ancestors are numbered during parsing.
    pub fn generates_labels(&self) -> bool {
        !matches!(self, NewickVariant::Labelled)
    }
}

/// A visited node: its label and the distance to its parent.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeToken {
    pub label: BranchpointLabel,
    pub distance: f64,
}

impl NodeToken {
    /// Canonical name of the node.
    pub fn name(&self) -> String {
        self.label.name()
    }
}

/// Result of parsing a tree string.
///
/// Tokens are in pre-order (root first, children in textual order);
/// `parents` maps every non-root node name to the name of its parent.
#[derive(Debug, Clone)]
pub struct ParsedNewick {
    variant: NewickVariant,
    tokens: Vec<NodeToken>,
    parents: HashMap<String, String>,
}

impl ParsedNewick {
    /// Detected text variant.
    pub fn variant(&self) -> NewickVariant {
        self.variant
    }

    /// Visited nodes in pre-order.
    pub fn tokens(&self) -> &[NodeToken] {
        &self.tokens
    }

    /// Map from node name to parent name.
    pub fn parents(&self) -> &HashMap<String, String> {
        &self.parents
    }

    /// Returns the parent name of the given node, `None` for the root or unknown names.
    pub fn parent_of(&self, name: &str) -> Option<&str> {
        self.parents.get(name).map(String::as_str)
    }

    /// Number of visited nodes.
    pub fn num_tokens(&self) -> usize {
        self.tokens.len()
    }

    /// Consumes the result and returns tokens and parent map.
    pub fn into_parts(self) -> (Vec<NodeToken>, HashMap<String, String>) {
        (self.tokens, self.parents)
    }
}

// =#========================================================================#=
// NEWICK PARSER
// =#========================================================================$=
/// Parser (configuration) for bracket tree strings.
///
/// # Format
/// * `tree ::= group [label] [':' distance] ';'`
/// * `group ::= '(' child (',' child)* ')'`
/// * `child ::= group [label] [':' distance] | label [':' distance]`
///
/// Which of the [NewickVariant]s applies is decided from the root's trailing
/// text. In the generating variants the root is numbered `0` and every other
/// ancestor gets the next number in pre-order.
///
/// Labels must not contain `:`, `,`, `(`, `)` or `;`.
///
/// # Example
/// ```
/// use pogtree::newick::{NewickParser, NewickVariant};
///
/// let parsed = NewickParser::new().parse_str("(A:1,(B:2,C:2)D:3)E:4;")?;
/// assert_eq!(parsed.variant(), NewickVariant::Labelled);
/// assert_eq!(parsed.num_tokens(), 5);
/// assert_eq!(parsed.parent_of("B"), Some("D"));
/// # Ok::<(), pogtree::PogTreeError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct NewickParser {
    expected_variant: Option<NewickVariant>,
}

// ============================================================================
// Construction & Configuration (pub)
// ============================================================================
impl NewickParser {
    /// Creates a new parser accepting any of the [NewickVariant]s.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the parser to one variant; text of another variant
    /// is rejected with [FormatError::UnrecognizedVariant].
    pub fn with_expected_variant(mut self, variant: NewickVariant) -> Self {
        self.expected_variant = Some(variant);
        self
    }
}

// ============================================================================
// API Parsing (pub)
// ============================================================================
impl NewickParser {
    /// Parses a single tree string.
    ///
    /// Every character is visited a bounded number of times: parentheses are
    /// matched once up front, and splitting a group skips over its nested
    /// groups.
    ///
    /// # Arguments
    /// * `text` - Tree string terminated by `;`, surrounding whitespace is ignored
    ///
    /// # Returns
    /// * `Ok(ParsedNewick)` - Nodes in pre-order and their parents
    /// * `Err(PogTreeError::Format)` - If the text is malformed
    pub fn parse_str(&self, text: &str) -> Result<ParsedNewick, PogTreeError> {
        let text = text.trim();
        let body = text
            .strip_suffix(TREE_TERMINATOR)
            .ok_or(FormatError::MissingTerminator)?;
        let closing = match_groups(body)?;
        if closing.is_empty() {
            return Err(FormatError::MissingGroup(body.to_string()).into());
        }

        // The whole body must be a single group with its trailer
        let segments = split_segments(body, 0, body.len(), &closing)?;
        let [root] = segments.as_slice() else {
            return Err(FormatError::UnexpectedText(body.to_string()).into());
        };
        let (open, close) = match root.group {
            Some((open, close)) if open == root.start => (open, close),
            Some(_) => return Err(FormatError::UnexpectedText(body.to_string()).into()),
            None => return Err(FormatError::MissingGroup(body.to_string()).into()),
        };

        let trailer = &body[close + 1..root.end];
        let (variant, root_label, root_distance) = detect_variant(trailer)?;
        if let Some(expected) = self.expected_variant {
            if expected != variant {
                return Err(FormatError::UnrecognizedVariant(trailer.to_string()).into());
            }
        }

        let mut state = ParseState {
            variant,
            next_ancestor: ROOT_ANCESTOR_NUMBER + 1,
            tokens: Vec::new(),
            parents: HashMap::new(),
        };
        let root_name = root_label.name();
        state.tokens.push(NodeToken {
            label: root_label,
            distance: root_distance,
        });

        // Explicit stack of (child segment, parent name); popped in textual order
        let mut stack: Vec<(Segment, String)> = Vec::new();
        push_children(&mut stack, body, (open, close), &closing, &root_name)?;

        while let Some((segment, parent)) = stack.pop() {
            let child = &body[segment.start..segment.end];
            match segment.group {
                Some((open, close)) => {
                    if open != segment.start {
                        return Err(FormatError::UnexpectedText(child.to_string()).into());
                    }
                    let token = state.internal_token(child, &body[close + 1..segment.end])?;
                    let name = token.name();
                    state.record(token, parent);
                    push_children(&mut stack, body, (open, close), &closing, &name)?;
                }
                None => {
                    let token = leaf_token(child)?;
                    state.record(token, parent);
                }
            }
        }

        debug!(
            ?variant,
            branchpoints = state.tokens.len(),
            "parsed bracket tree"
        );

        Ok(ParsedNewick {
            variant,
            tokens: state.tokens,
            parents: state.parents,
        })
    }

    /// Parses a file holding one tree string, possibly spread over several lines.
    ///
    /// Lines are trimmed and concatenated before parsing.
    ///
    /// # Arguments
    /// * `path` - Path to the file (accepting `&str`, `String`, `Path`, or `PathBuf`)
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<ParsedNewick, PogTreeError> {
        let content = fs::read_to_string(path)?;
        let joined: String = content.lines().map(str::trim).collect();
        self.parse_str(&joined)
    }
}

// ============================================================================
// Parsing
// ============================================================================
/// Mutable state while visiting the nodes of one tree.
struct ParseState {
    variant: NewickVariant,
    next_ancestor: usize,
    tokens: Vec<NodeToken>,
    parents: HashMap<String, String>,
}

impl ParseState {
    /// Appends a visited node and records its parent.
    fn record(&mut self, token: NodeToken, parent: String) {
        self.parents.insert(token.name(), parent);
        self.tokens.push(token);
    }

    /// Creates the token of an internal (non-root) node from the text
    /// following its group.
    fn internal_token(&mut self, child: &str, trailer: &str) -> Result<NodeToken, FormatError> {
        let (label, distance) = split_label_distance(trailer)?;

        let label = if self.variant.generates_labels() {
            if !label.is_empty() {
                debug!(label, "ignoring ancestor label in tree with generated labels");
            }
            let number = self.next_ancestor;
            self.next_ancestor += 1;
            BranchpointLabel::auto(number)
        } else if label.is_empty() {
            return Err(FormatError::MissingInternalLabel(child.to_string()));
        } else {
            BranchpointLabel::from_input(label, true)
        };

        Ok(NodeToken {
            label,
            distance: distance.unwrap_or(DEFAULT_DISTANCE),
        })
    }
}

/// Creates the token of a leaf from `label[:distance]`.
fn leaf_token(child: &str) -> Result<NodeToken, FormatError> {
    let (label, distance) = split_label_distance(child)?;
    if label.is_empty() {
        return Err(FormatError::MissingLeafLabel(child.to_string()));
    }
    Ok(NodeToken {
        label: BranchpointLabel::from_input(label, false),
        distance: distance.unwrap_or(DEFAULT_DISTANCE),
    })
}

/// A comma-separated piece of text: its trimmed byte range and the byte
/// positions of the parenthesis group it contains, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Segment {
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) group: Option<(usize, usize)>,
}

/// Splits the interior of a group and pushes its children onto the stack in
/// reverse, so that they are popped in textual order.
fn push_children(
    stack: &mut Vec<(Segment, String)>,
    text: &str,
    (open, close): (usize, usize),
    closing: &HashMap<usize, usize>,
    parent: &str,
) -> Result<(), FormatError> {
    let children = split_segments(text, open + 1, close, closing)?;
    for child in children.into_iter().rev() {
        stack.push((child, parent.to_string()));
    }
    Ok(())
}

/// Maps the byte position of every `(` to the position of its matching `)`.
///
/// # Returns
/// The mapping; [FormatError::UnmatchedParenthesis] if any parenthesis is unmatched.
pub(crate) fn match_groups(text: &str) -> Result<HashMap<usize, usize>, FormatError> {
    let mut closing = HashMap::new();
    let mut open_positions = Vec::new();
    for (i, c) in text.char_indices() {
        match c {
            GROUP_OPEN => open_positions.push(i),
            GROUP_CLOSE => {
                let open = open_positions
                    .pop()
                    .ok_or(FormatError::UnmatchedParenthesis { position: i })?;
                closing.insert(open, i);
            }
            _ => {}
        }
    }
    match open_positions.pop() {
        Some(position) => Err(FormatError::UnmatchedParenthesis { position }),
        None => Ok(closing),
    }
}

/// Splits `text[start..end]` on commas at nesting depth 0, jumping over
/// nested groups with the positions from [match_groups].
///
/// # Returns
/// Trimmed segments; [FormatError::EmptyChild] if any is empty,
/// [FormatError::UnexpectedText] if one holds more than one group.
pub(crate) fn split_segments(
    text: &str,
    start: usize,
    end: usize,
    closing: &HashMap<usize, usize>,
) -> Result<Vec<Segment>, FormatError> {
    let bytes = text.as_bytes();
    let mut segments = Vec::new();
    let mut segment_start = start;
    let mut group = None;

    // Delimiters are ASCII, so byte positions are char boundaries
    let mut i = start;
    while i < end {
        let byte = bytes[i];
        if byte == GROUP_OPEN as u8 {
            let close = closing
                .get(&i)
                .copied()
                .ok_or(FormatError::UnmatchedParenthesis { position: i })?;
            if group.is_some() {
                return Err(FormatError::UnexpectedText(text[segment_start..end].to_string()));
            }
            group = Some((i, close));
            i = close + 1;
            continue;
        }
        if byte == CHILD_SEPARATOR as u8 {
            segments.push(trimmed_segment(text, segment_start, i, group));
            segment_start = i + 1;
            group = None;
        }
        i += 1;
    }
    segments.push(trimmed_segment(text, segment_start, end, group));

    if segments.iter().any(|s| s.start == s.end) {
        return Err(FormatError::EmptyChild(text[start..end].to_string()));
    }
    Ok(segments)
}

/// Creates a segment of `text[start..end]` without surrounding whitespace.
fn trimmed_segment(
    text: &str,
    start: usize,
    end: usize,
    group: Option<(usize, usize)>,
) -> Segment {
    let piece = &text[start..end];
    let trimmed = piece.trim_start();
    let start = start + (piece.len() - trimmed.len());
    let end = start + trimmed.trim_end().len();
    Segment { start, end, group }
}

/// Decides the variant from the text after the outermost group and returns
/// it together with the root's label and distance.
fn detect_variant(trailer: &str) -> Result<(NewickVariant, BranchpointLabel, f64), FormatError> {
    let trailer = trailer.trim();
    let auto_root = BranchpointLabel::auto(ROOT_ANCESTOR_NUMBER);
    if trailer.is_empty() {
        return Ok((NewickVariant::Unlabelled, auto_root, DEFAULT_DISTANCE));
    }

    match trailer.matches(DISTANCE_SEPARATOR).count() {
        // Root label only, as written by reconstruction jobs: `...)N0;`
        0 => Ok((
            NewickVariant::Labelled,
            BranchpointLabel::from_input(trailer, true),
            DEFAULT_DISTANCE,
        )),
        1 => {
            let (label, distance) = split_label_distance(trailer)?;
            let distance = distance.unwrap_or(DEFAULT_DISTANCE);
            if label.is_empty() {
                Ok((NewickVariant::DistanceOnly, auto_root, distance))
            } else {
                Ok((
                    NewickVariant::Labelled,
                    BranchpointLabel::from_input(label, true),
                    distance,
                ))
            }
        }
        _ => Err(FormatError::UnrecognizedVariant(trailer.to_string())),
    }
}

/// Splits `label[:distance]` at the first colon.
///
/// # Returns
/// The trimmed label (possibly empty) and the parsed distance, if present.
fn split_label_distance(text: &str) -> Result<(&str, Option<f64>), FormatError> {
    match text.split_once(DISTANCE_SEPARATOR) {
        None => Ok((text.trim(), None)),
        Some((label, distance)) => {
            let distance = distance.trim();
            let value: f64 = distance
                .parse()
                .map_err(|_| FormatError::InvalidDistance(distance.to_string()))?;
            Ok((label.trim(), Some(value)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(text: &str) -> Result<Vec<&str>, FormatError> {
        let closing = match_groups(text)?;
        let segments = split_segments(text, 0, text.len(), &closing)?;
        Ok(segments.iter().map(|s| &text[s.start..s.end]).collect())
    }

    #[test]
    fn split_segments_respects_nesting() {
        assert_eq!(split("A:1,(B:2,C:2)D:3").unwrap(), vec!["A:1", "(B:2,C:2)D:3"]);
        assert_eq!(split(" A:1 , B:2 ").unwrap(), vec!["A:1", "B:2"]);
    }

    #[test]
    fn split_segments_single_child() {
        assert_eq!(split("A:1").unwrap(), vec!["A:1"]);
    }

    #[test]
    fn split_segments_rejects_empty() {
        assert!(matches!(split("A:1,,B:2"), Err(FormatError::EmptyChild(_))));
        assert!(matches!(split(""), Err(FormatError::EmptyChild(_))));
        assert!(matches!(split("A:1, "), Err(FormatError::EmptyChild(_))));
    }

    #[test]
    fn split_segments_records_groups() {
        let text = "A:1,(B:2,(C:1,D:1)E:1)F:3";
        let closing = match_groups(text).unwrap();
        let segments = split_segments(text, 0, text.len(), &closing).unwrap();
        assert_eq!(segments[0].group, None);
        assert_eq!(segments[1].group, Some((4, 21)));

        let text = "(A)(B)";
        let closing = match_groups(text).unwrap();
        assert!(matches!(
            split_segments(text, 0, text.len(), &closing),
            Err(FormatError::UnexpectedText(_))
        ));
    }

    #[test]
    fn match_groups_pairs_parentheses() {
        let closing = match_groups("(A:1,(B:2)C:3)D:4").unwrap();
        assert_eq!(closing.get(&0), Some(&13));
        assert_eq!(closing.get(&5), Some(&9));
        assert_eq!(
            match_groups("(A,B))"),
            Err(FormatError::UnmatchedParenthesis { position: 5 })
        );
        assert_eq!(
            match_groups("((A,B)"),
            Err(FormatError::UnmatchedParenthesis { position: 0 })
        );
    }

    #[test]
    fn detect_variant_shapes() {
        assert_eq!(detect_variant("").unwrap().0, NewickVariant::Unlabelled);
        let (variant, label, distance) = detect_variant(":0.5").unwrap();
        assert_eq!(variant, NewickVariant::DistanceOnly);
        assert_eq!(label, BranchpointLabel::auto(0));
        assert_eq!(distance, 0.5);
        let (variant, label, _) = detect_variant("N0:0.0").unwrap();
        assert_eq!(variant, NewickVariant::Labelled);
        assert_eq!(label, BranchpointLabel::NamedAncestor("N0".to_string()));
        let (_, label, _) = detect_variant("0:0.0").unwrap();
        assert_eq!(label.name(), "N0");
        assert!(detect_variant("N0:1:2").is_err());
    }
}
