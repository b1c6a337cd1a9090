// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier
// Modifications (c) 2026 Peter Carlton

//! Streaming FASTA reader.
//!
//! Records are produced one at a time. A record starts at a `>` header line and collects every
//! following non-blank line (whitespace-trimmed) until the next header or the end of input.
//!
//! ```
//! use fasta_stream::seq::fasta::FastaReader;
//!
//! let mut reader = FastaReader::new(&b">Seq1\nAAA\nBBB\n"[..]);
//! let rec = reader.read()?.expect("one record");
//! assert_eq!(rec.header, "Seq1");
//! assert_eq!(rec.sequence, b"AAABBB");
//! assert!(reader.read()?.is_none());
//! # Ok::<(), fasta_stream::errors::FastaError>(())
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::iter::FusedIterator;
use std::mem;
use std::path::Path;

use log::{debug, trace};

use crate::errors::FastaError;
use crate::seq::record::{SeqFile, SeqRecord};

const SEQUENCE_BEFORE_HEADER: &str = "sequence before header";

// Strips Unicode white space (\v, U+0085 and U+00A0 included) from both ends. Bytes that are not
// valid UTF-8 are never white space.
fn trim_space(line: &[u8]) -> &[u8] {
    let lead = match line.utf8_chunks().next() {
        Some(chunk) => chunk.valid().len() - chunk.valid().trim_start().len(),
        None => 0,
    };
    let line = &line[lead..];
    let trail = match line.utf8_chunks().last() {
        Some(chunk) if chunk.invalid().is_empty() => {
            chunk.valid().len() - chunk.valid().trim_end().len()
        }
        _ => 0,
    };
    &line[..line.len() - trail]
}

enum State {
    /// No header seen yet.
    Start,
    /// Collecting residues for this record.
    InRecord(SeqRecord),
    /// Input exhausted, every record handed out.
    Ended,
    /// Residues found before any header, at this line.
    Failed(usize),
}

pub struct FastaReader<R> {
    reader: R,
    line_buf: Vec<u8>,
    line_number: usize,
    state: State,
    // Only used by the Iterator impl, so that it stops after the first error.
    errored: bool,
}

impl<R: BufRead> FastaReader<R> {
    pub fn new(reader: R) -> Self {
        FastaReader {
            reader,
            line_buf: Vec::with_capacity(256),
            line_number: 0,
            state: State::Start,
            errored: false,
        }
    }

    /// Returns the next record, `Ok(None)` once the input is exhausted (and on every call after
    /// that), or an error. Never both a record and an error.
    ///
    /// Residues before the first header are a format error, and the reader stays failed: every
    /// later call returns the same error.
    pub fn read(&mut self) -> Result<Option<SeqRecord>, FastaError> {
        loop {
            match self.state {
                State::Ended => return Ok(None),
                State::Failed(line) => return Err(FastaError::format(line, SEQUENCE_BEFORE_HEADER)),
                State::Start | State::InRecord(_) => {}
            }

            self.line_buf.clear();
            // A last line without '\n' comes back like any other line; 0 means end of input.
            if self.reader.read_until(b'\n', &mut self.line_buf)? == 0 {
                return Ok(self.finish());
            }
            self.line_number += 1;

            let line = trim_space(&self.line_buf);
            if line.is_empty() {
                continue;
            }

            if let Some(hdr) = line.strip_prefix(b">") {
                let next = SeqRecord {
                    header: String::from_utf8_lossy(hdr).into_owned(),
                    sequence: Vec::new(),
                };
                trace!("line {}: header {:?}", self.line_number, next.header);
                if let State::InRecord(done) = mem::replace(&mut self.state, State::InRecord(next)) {
                    return Ok(Some(done));
                }
                continue;
            }

            match &mut self.state {
                State::InRecord(rec) => rec.sequence.extend_from_slice(line),
                _ => {
                    self.state = State::Failed(self.line_number);
                    return Err(FastaError::format(self.line_number, SEQUENCE_BEFORE_HEADER));
                }
            }
        }
    }

    /// Number of lines consumed so far (blank ones included).
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    fn finish(&mut self) -> Option<SeqRecord> {
        trace!("end of input after {} lines", self.line_number);
        match mem::replace(&mut self.state, State::Ended) {
            State::InRecord(rec) => Some(rec),
            _ => None,
        }
    }
}

impl<T: Read> FastaReader<BufReader<T>> {
    /// Wraps an unbuffered reader.
    pub fn from_read(inner: T) -> Self {
        FastaReader::new(BufReader::new(inner))
    }
}

impl FastaReader<BufReader<File>> {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, FastaError> {
        let file = File::open(path.as_ref())?;
        debug!("reading FASTA from {}", path.as_ref().display());
        Ok(FastaReader::from_read(file))
    }
}

impl<R: BufRead> Iterator for FastaReader<R> {
    type Item = Result<SeqRecord, FastaError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.errored {
            return None;
        }
        match self.read() {
            Ok(Some(rec)) => Some(Ok(rec)),
            Ok(None) => None,
            Err(e) => {
                self.errored = true;
                Some(Err(e))
            }
        }
    }
}

impl<R: BufRead> FusedIterator for FastaReader<R> {}

pub fn read_fasta_file<P: AsRef<Path>>(path: P) -> Result<SeqFile, FastaError> {
    let records = FastaReader::from_path(&path)?.collect::<Result<SeqFile, _>>()?;
    debug!(
        "read {} records from {}",
        records.len(),
        path.as_ref().display()
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn read_all(input: &str) -> Result<SeqFile, FastaError> {
        FastaReader::new(input.as_bytes()).collect()
    }

    // Hands out `data`, then fails instead of reporting end of input.
    struct FailingReader {
        data: &'static [u8],
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.data.is_empty() {
                return Err(io::Error::new(io::ErrorKind::ConnectionReset, "boom"));
            }
            let n = self.data.len().min(buf.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    #[test]
    fn test_read_one_record() {
        let fasta = read_all(">Seq1\nAAA\nBBB\n").unwrap();
        assert_eq!(fasta, vec![SeqRecord::new("Seq1", "AAABBB")]);
    }

    #[test]
    fn test_read_two_records() {
        let fasta = read_all(">Seq1\nAAA\nBBB\n>Seq2\nCCC\nDDD\n").unwrap();
        assert_eq!(fasta.len(), 2);
        assert_eq!(fasta[0], SeqRecord::new("Seq1", "AAABBB"));
        assert_eq!(fasta[1], SeqRecord::new("Seq2", "CCCDDD"));
    }

    #[test]
    fn test_no_final_newline() {
        let terminated = read_all(">Seq1\nAAA\nBBB\n>Seq2\nCCC\nDDD\n").unwrap();
        let unterminated = read_all(">Seq1\nAAA\nBBB\n>Seq2\nCCC\nDDD").unwrap();
        assert_eq!(terminated, unterminated);
    }

    #[test]
    fn test_unterminated_header_starts_record() {
        let fasta = read_all(">Seq1\nAAA\n>Seq2").unwrap();
        assert_eq!(fasta[0], SeqRecord::new("Seq1", "AAA"));
        assert_eq!(fasta[1], SeqRecord::new("Seq2", ""));
    }

    #[test]
    fn test_blank_lines_and_whitespace() {
        let fasta = read_all("\n\n  >Seq1 some description  \r\n  AAA \n\n\t\nBBB\r\n\n").unwrap();
        assert_eq!(fasta, vec![SeqRecord::new("Seq1 some description", "AAABBB")]);
    }

    #[test]
    fn test_vertical_tab_and_unicode_space() {
        let fasta = read_all(">a\x0B\nAC\x0B\n\u{a0}GT\u{85}\n\x0B\n").unwrap();
        assert_eq!(fasta, vec![SeqRecord::new("a", "ACGT")]);
    }

    #[test]
    fn test_trim_space() {
        assert_eq!(trim_space(b" \t\x0B\x0C AC \r\n"), b"AC");
        assert_eq!(trim_space("\u{85}>x\u{a0}".as_bytes()), b">x");
        assert_eq!(trim_space(b"\xff A \xfe "), b"\xff A \xfe");
        assert_eq!(trim_space(b"  \n"), b"");
        assert_eq!(trim_space(b""), b"");
    }

    #[test]
    fn test_empty_header_and_empty_sequence() {
        let fasta = read_all(">\nACGT\n>Seq2\n>Seq3\nT\n").unwrap();
        assert_eq!(fasta.len(), 3);
        assert_eq!(fasta[0], SeqRecord::new("", "ACGT"));
        assert!(fasta[1].is_empty());
        assert_eq!(fasta[2].sequence, b"T");
    }

    #[test]
    fn test_empty_input() {
        let mut reader = FastaReader::new(&b""[..]);
        assert!(reader.read().unwrap().is_none());
        assert!(reader.read().unwrap().is_none());
        assert!(read_all("\n \n").unwrap().is_empty());
    }

    #[test]
    fn test_end_is_sticky() {
        let mut reader = FastaReader::new(&b">Seq1\nAAA"[..]);
        let rec = reader.read().unwrap().unwrap();
        assert_eq!(rec.sequence, b"AAA");
        for _ in 0..3 {
            assert!(reader.read().unwrap().is_none());
        }
    }

    #[test]
    fn test_sequence_before_header() {
        let mut reader = FastaReader::new(&b"\nAAA\n>Seq1\nBBB\n"[..]);
        let err = reader.read().unwrap_err();
        assert!(err.to_string().contains("sequence before header"));
        match err {
            FastaError::Format { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {:?}", other),
        }
        // No resync on the following header.
        assert!(reader.read().unwrap_err().is_format());
    }

    #[test]
    fn test_iterator_stops_after_error() {
        let mut reader = FastaReader::new(&b"AAA\n>Seq1\nBBB\n"[..]);
        assert!(reader.next().unwrap().is_err());
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_io_error_propagates() {
        let mut reader = FastaReader::from_read(FailingReader {
            data: b">Seq1\nAAA\n",
        });
        let err = reader.read().unwrap_err();
        let kind = err.io_error().map(|e| e.kind());
        assert_eq!(kind, Some(io::ErrorKind::ConnectionReset));
    }

    #[test]
    fn test_line_number() {
        let mut reader = FastaReader::new(&b">a\nAC\n\n>b\nGT\n"[..]);
        reader.read().unwrap();
        assert_eq!(reader.line_number(), 4);
    }

    #[test]
    fn test_read_fasta_file_1() {
        let path = "tests/data/test1.fas";
        let fasta: SeqFile = read_fasta_file(path).expect("Test file not found");
        assert_eq!(fasta[0].header, "seq1");
        assert_eq!(fasta[0].sequence, b"GAATTC");
    }

    #[test]
    fn test_read_fasta_file_missing() {
        let err = read_fasta_file("tests/data/no-such-file.fas").unwrap_err();
        assert_eq!(
            err.io_error().map(|e| e.kind()),
            Some(io::ErrorKind::NotFound)
        );
    }
}
