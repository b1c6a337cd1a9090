// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier
// Modifications (c) 2026 Peter Carlton

use std::{error, fmt, io};

#[derive(Debug)]
pub enum FastaError {
    /// Failure of the underlying reader (end of stream is not an error).
    Io(io::Error),
    /// Input that is not structurally FASTA. `line` is 1-based.
    Format { line: usize, msg: String },
    /// Failure of the underlying writer, after `written` bytes went out.
    Write { written: usize, source: io::Error },
    /// Unusable record-name pattern (command line).
    Pattern(regex::Error),
    /// Summary report that could not be serialized.
    Report(serde_json::Error),
}

impl FastaError {
    pub(crate) fn format<S: Into<String>>(line: usize, msg: S) -> Self {
        FastaError::Format {
            line,
            msg: msg.into(),
        }
    }

    /// Number of bytes that reached the sink before a write failed. Zero for
    /// read-side errors.
    pub fn written(&self) -> usize {
        match self {
            FastaError::Write { written, .. } => *written,
            _ => 0,
        }
    }

    pub fn is_format(&self) -> bool {
        matches!(self, FastaError::Format { .. })
    }

    /// The I/O error behind this one, if any, whether it came from reading or writing.
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            FastaError::Io(e) => Some(e),
            FastaError::Write { source, .. } => Some(source),
            _ => None,
        }
    }
}

// These allow conversion to FastaError, required for main() to return Result<()> and for '?' to
// work.

impl From<io::Error> for FastaError {
    fn from(e: io::Error) -> Self {
        FastaError::Io(e)
    }
}

impl From<regex::Error> for FastaError {
    fn from(e: regex::Error) -> Self {
        FastaError::Pattern(e)
    }
}

impl From<serde_json::Error> for FastaError {
    fn from(e: serde_json::Error) -> Self {
        FastaError::Report(e)
    }
}

impl fmt::Display for FastaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FastaError::Io(e) => write!(f, "I/O error: {}", e),
            FastaError::Format { line, msg } => {
                write!(f, "fasta: format error at line {}: {}", line, msg)
            }
            FastaError::Write { written, source } => {
                write!(f, "I/O error after {} bytes written: {}", written, source)
            }
            FastaError::Pattern(e) => write!(f, "Invalid name pattern: {}", e),
            FastaError::Report(e) => write!(f, "Cannot build report: {}", e),
        }
    }
}

impl error::Error for FastaError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            FastaError::Io(e) => Some(e),
            FastaError::Write { source, .. } => Some(source),
            FastaError::Pattern(e) => Some(e),
            FastaError::Report(e) => Some(e),
            FastaError::Format { .. } => None,
        }
    }
}
