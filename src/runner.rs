// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier
// Modifications (c) 2026 Peter Carlton

use std::{
    fs::File,
    io::{stdin, stdout, BufRead, BufReader, BufWriter, Write},
};

use log::{debug, info};

use clap::Parser;
use regex::Regex;
use serde::Serialize;

use crate::errors::FastaError;
use crate::seq::fasta::FastaReader;
use crate::seq::writer::FastaWriter;

#[derive(Debug, Parser)]
#[command(version, about, long_about = None) ]
struct Cli {
    /// FASTA file ("-" or none: standard input)
    input: Option<String>,

    /// Output file (default: standard output)
    #[arg(short, long)]
    output: Option<String>,

    /// Residues per output line (0 is taken as 1)
    #[arg(short, long, default_value_t = 60)]
    width: usize,

    /// Only keep records whose name matches this regex
    #[arg(short, long)]
    grep: Option<String>,

    /// Info mode: print a JSON summary of the records instead of FASTA
    #[arg(short, long)]
    info: bool,
}

struct RunOptions {
    width: usize,
    name_filter: Option<Regex>,
    info: bool,
}

#[derive(Debug, Serialize)]
struct RecordInfo {
    name: String,
    length: usize,
}

#[derive(Debug, Default, Serialize)]
struct InfoReport {
    nb_sequences: usize,
    total_length: usize,
    records: Vec<RecordInfo>,
}

// Streams records from `input` to `output`, one at a time. Returns the number of records kept.
fn process<R: BufRead, W: Write>(
    input: R,
    output: W,
    opts: &RunOptions,
) -> Result<usize, FastaError> {
    let mut reader = FastaReader::new(input);
    let mut writer = FastaWriter::new(output, opts.width);
    let mut report = InfoReport::default();
    let mut kept = 0;

    while let Some(rec) = reader.read()? {
        if let Some(re) = &opts.name_filter {
            if !re.is_match(&rec.header) {
                continue;
            }
        }
        kept += 1;
        if opts.info {
            report.nb_sequences += 1;
            report.total_length += rec.len();
            report.records.push(RecordInfo {
                name: rec.header,
                length: rec.sequence.len(),
            });
        } else {
            writer.write_record(&rec)?;
        }
    }
    debug!("{} lines read, {} records kept", reader.line_number(), kept);

    if opts.info {
        let mut json = serde_json::to_string_pretty(&report)?;
        json.push('\n');
        writer.write_raw(json.as_bytes())?;
    }
    writer.flush()?;
    Ok(kept)
}

pub fn run() -> Result<(), FastaError> {
    env_logger::init();
    info!("Starting log");

    let cli = Cli::parse();
    let opts = RunOptions {
        width: cli.width,
        name_filter: cli.grep.as_deref().map(Regex::new).transpose()?,
        info: cli.info,
    };

    let input: Box<dyn BufRead> = match cli.input.as_deref() {
        None | Some("-") => Box::new(stdin().lock()),
        Some(path) => {
            info!("Reading {}", path);
            Box::new(BufReader::new(File::open(path)?))
        }
    };
    let output: Box<dyn Write> = match cli.output.as_deref() {
        None | Some("-") => Box::new(BufWriter::new(stdout().lock())),
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
    };

    let kept = process(input, output, &opts)?;
    info!("{} records written", kept);
    Ok(())
}
