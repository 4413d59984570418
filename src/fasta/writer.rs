//! FASTA file writing.

use crate::error::PogTreeError;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Default number of symbols per sequence line.
pub const DEFAULT_LINE_WIDTH: usize = 60;

/// A sequence tagged with the name of its branchpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedSequence {
    pub name: String,
    pub sequence: String,
}

impl NamedSequence {
    pub fn new(name: impl Into<String>, sequence: impl Into<String>) -> Self {
        NamedSequence {
            name: name.into(),
            sequence: sequence.into(),
        }
    }
}

/// Style for writing FASTA text.
///
/// # Configuration
/// * [`with_line_width(width)`](Self::with_line_width) - symbols per line,
///   `0` writes each sequence on a single line (default: 60)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FastaStyle {
    line_width: usize,
}

impl Default for FastaStyle {
    fn default() -> Self {
        FastaStyle {
            line_width: DEFAULT_LINE_WIDTH,
        }
    }
}

impl FastaStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of symbols per line; `0` disables wrapping.
    pub fn with_line_width(mut self, line_width: usize) -> Self {
        self.line_width = line_width;
        self
    }

    pub fn line_width(&self) -> usize {
        self.line_width
    }
}

/// Returns the FASTA text of the given sequences, in the given order.
///
/// # Example
/// ```
/// use pogtree::fasta::{FastaStyle, NamedSequence, to_fasta};
///
/// let seqs = vec![NamedSequence::new("N0", "MKVLA"), NamedSequence::new("A", "MKV")];
/// let text = to_fasta(&seqs, FastaStyle::new().with_line_width(3));
/// assert_eq!(text, ">N0\nMKV\nLA\n>A\nMKV\n");
/// ```
pub fn to_fasta(sequences: &[NamedSequence], style: FastaStyle) -> String {
    let capacity: usize = sequences
        .iter()
        .map(|s| s.name.len() + s.sequence.len() + 2)
        .sum();
    let mut fasta = String::with_capacity(capacity);

    for seq in sequences {
        fasta.push('>');
        fasta.push_str(&seq.name);
        fasta.push('\n');

        let symbols: Vec<char> = seq.sequence.chars().collect();
        if symbols.is_empty() || style.line_width == 0 {
            fasta.push_str(&seq.sequence);
            fasta.push('\n');
            continue;
        }
        for line in symbols.chunks(style.line_width) {
            fasta.extend(line);
            fasta.push('\n');
        }
    }

    fasta
}

/// Writes the given sequences to a FASTA file, creating or truncating it.
///
/// # Errors
/// Returns [PogTreeError::Io] if writing fails; the file may then be truncated.
pub fn write_fasta_file<P: AsRef<Path>>(
    path: P,
    sequences: &[NamedSequence],
    style: FastaStyle,
) -> Result<(), PogTreeError> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(to_fasta(sequences, style).as_bytes())?;
    writer.flush()?;
    Ok(())
}
