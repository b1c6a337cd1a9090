// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier
// Modifications (c) 2026 Peter Carlton

//! Line-wrapping FASTA writer.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use log::{debug, trace};

use crate::errors::FastaError;
use crate::seq::record::Sequence;

pub struct FastaWriter<W: Write> {
    writer: W,
    width: usize,
}

impl<W: Write> FastaWriter<W> {
    /// `width` is the number of residues per line. A width of 0 is taken as 1, not as "no
    /// wrapping".
    pub fn new(writer: W, width: usize) -> Self {
        FastaWriter {
            writer,
            width: width.max(1),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Writes one record and returns the number of bytes written.
    ///
    /// A line break goes before every `width`-th residue, counting from the first one, so the
    /// header is always followed by a line break, and there is one more after the last residue:
    /// `>Seq1\nAA\nAB\nBB\n` for "AAABBB" at width 2. A record without residues comes out as
    /// `>name\n\n`.
    ///
    /// On failure nothing is retried; the error carries the bytes already written.
    pub fn write_record<S: Sequence + ?Sized>(&mut self, seq: &S) -> Result<usize, FastaError> {
        let mut written = 0;
        self.put(b">", &mut written)?;
        self.put(seq.name().as_bytes(), &mut written)?;

        let data = seq.data();
        if data.is_empty() {
            self.put(b"\n", &mut written)?;
        }
        for line in data.chunks(self.width) {
            self.put(b"\n", &mut written)?;
            self.put(line, &mut written)?;
        }
        self.put(b"\n", &mut written)?;

        trace!("wrote {:?}: {} bytes", seq.name(), written);
        Ok(written)
    }

    /// Writes records in order, returning the total number of bytes written. Stops at the first
    /// failure, whose byte count covers everything written by this call.
    pub fn write_all_records<I>(&mut self, records: I) -> Result<usize, FastaError>
    where
        I: IntoIterator,
        I::Item: Sequence,
    {
        let mut total = 0;
        for rec in records {
            match self.write_record(&rec) {
                Ok(n) => total += n,
                Err(FastaError::Write { written, source }) => {
                    return Err(FastaError::Write {
                        written: total + written,
                        source,
                    })
                }
                Err(e) => return Err(e),
            }
        }
        Ok(total)
    }

    /// Bytes are counted when handed to the sink, so a flush failure reports `written: 0`; see
    /// `write_fasta()` for a count covering everything handed over.
    pub fn flush(&mut self) -> Result<(), FastaError> {
        self.writer.flush().map_err(|source| FastaError::Write {
            written: 0,
            source,
        })
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    // Raw bytes, outside any record (e.g. a report in place of FASTA).
    pub(crate) fn write_raw(&mut self, buf: &[u8]) -> Result<usize, FastaError> {
        let mut written = 0;
        self.put(buf, &mut written)?;
        Ok(written)
    }

    // Like write_all(), but keeps count of what made it out before a failure.
    fn put(&mut self, mut buf: &[u8], written: &mut usize) -> Result<(), FastaError> {
        while !buf.is_empty() {
            match self.writer.write(buf) {
                Ok(0) => {
                    return Err(FastaError::Write {
                        written: *written,
                        source: io::Error::from(io::ErrorKind::WriteZero),
                    })
                }
                Ok(n) => {
                    *written += n;
                    buf = &buf[n..];
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(source) => {
                    return Err(FastaError::Write {
                        written: *written,
                        source,
                    })
                }
            }
        }
        Ok(())
    }
}

/// Writes all records to `sink` and flushes it. If the flush fails, the error counts every byte
/// handed to the sink before it.
pub fn write_fasta<W, I>(sink: W, records: I, width: usize) -> Result<usize, FastaError>
where
    W: Write,
    I: IntoIterator,
    I::Item: Sequence,
{
    let mut writer = FastaWriter::new(sink, width);
    let total = writer.write_all_records(records)?;
    writer.flush().map_err(|e| match e {
        FastaError::Write { source, .. } => FastaError::Write {
            written: total,
            source,
        },
        other => other,
    })?;
    Ok(total)
}

pub fn write_fasta_file<P, I>(path: P, records: I, width: usize) -> Result<usize, FastaError>
where
    P: AsRef<Path>,
    I: IntoIterator,
    I::Item: Sequence,
{
    let file = File::create(path.as_ref())?;
    let total = write_fasta(BufWriter::new(file), records, width)?;
    debug!("wrote {} bytes to {}", total, path.as_ref().display());
    Ok(total)
}
