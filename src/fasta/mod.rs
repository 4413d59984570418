//! FASTA export of bound sequences.
//!
//! Sequences are written as `>name` header lines followed by the sequence,
//! wrapped at the line width of a [FastaStyle].

pub mod writer;

pub use writer::{FastaStyle, NamedSequence, to_fasta, write_fasta_file};
