// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier
// Modifications (c) 2026 Peter Carlton

// A record for sequences, consisting of a name and raw residues. Line wrapping is a property of
// the file, not of the record: `sequence` never contains line breaks.

use serde::{Deserialize, Serialize};

/// Anything that can be written as a FASTA record.
pub trait Sequence {
    fn name(&self) -> &str;
    fn data(&self) -> &[u8];
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeqRecord {
    pub header: String,
    pub sequence: Vec<u8>,
}

// A whole sequence file, read at once: records in file order.
pub type SeqFile = Vec<SeqRecord>;

impl SeqRecord {
    pub fn new<H: Into<String>, S: Into<Vec<u8>>>(header: H, sequence: S) -> Self {
        SeqRecord {
            header: header.into(),
            sequence: sequence.into(),
        }
    }

    /// Number of residues.
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

impl Sequence for SeqRecord {
    fn name(&self) -> &str {
        &self.header
    }

    fn data(&self) -> &[u8] {
        &self.sequence
    }
}

impl<T: Sequence + ?Sized> Sequence for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn data(&self) -> &[u8] {
        (**self).data()
    }
}

// (name, residues) pairs, e.g. ("seq1", "ACGT") or (String, Vec<u8>).
impl<N: AsRef<str>, D: AsRef<[u8]>> Sequence for (N, D) {
    fn name(&self) -> &str {
        self.0.as_ref()
    }

    fn data(&self) -> &[u8] {
        self.1.as_ref()
    }
}
