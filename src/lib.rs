// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier
// Modifications (c) 2026 Peter Carlton

//! Streaming FASTA reading and line-wrapped FASTA writing.
//!
//! [`seq::fasta::FastaReader`] turns any [`std::io::BufRead`] into records, one per call;
//! [`seq::writer::FastaWriter`] writes anything implementing [`seq::record::Sequence`].

mod runner;
pub mod errors;
pub mod seq;

use crate::errors::FastaError;

pub fn run() -> Result<(), FastaError> {
    runner::run()
}
