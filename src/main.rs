// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier
// Modifications (c) 2026 Peter Carlton

use fasta_stream::errors::FastaError;

fn main() -> Result<(), FastaError> {
    fasta_stream::run()
}
