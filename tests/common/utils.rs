// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

use fasta_stream::{
    errors::FastaError,
    seq::{
        fasta::FastaReader,
        record::{SeqFile, Sequence},
        writer::FastaWriter,
    },
};

#[allow(dead_code)]
pub fn decode(input: &[u8]) -> Result<SeqFile, FastaError> {
    FastaReader::new(input).collect()
}

#[allow(dead_code)]
pub fn encode<S: Sequence>(records: &[S], width: usize) -> (String, usize) {
    let mut writer = FastaWriter::new(Vec::new(), width);
    let mut total = 0;
    for rec in records {
        total += writer.write_record(rec).expect("write to Vec");
    }
    let out = String::from_utf8(writer.into_inner()).expect("FASTA output is UTF-8");
    (out, total)
}

// A temporary file path, unique to this process and `tag`.
#[allow(dead_code)]
pub fn temp_path(tag: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("fasta-stream-{}-{}.fas", std::process::id(), tag))
}
