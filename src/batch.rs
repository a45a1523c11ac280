//! Batch processing over files and directories.
//!
//! Each input goes through its own load → extract → report cycle. A failure
//! is logged, recorded against the file, and processing moves on to the
//! next input.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{error, info, warn};
use walkdir::WalkDir;

use crate::document::AltoDocument;
use crate::error::{AltoError, Result};
use crate::extract::{write_confidence, write_metadata, write_text};

/// File name endings picked up when scanning a directory.
pub const ALTO_EXTENSIONS: [&str; 2] = [".xml", ".alto"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Text,
    Confidence,
    Metadata,
}

impl Operation {
    /// Appended to the input's file stem in directory output mode.
    pub fn output_suffix(self) -> &'static str {
        match self {
            Operation::Text => ".txt",
            Operation::Confidence => ".conf.txt",
            Operation::Metadata => ".md.txt",
        }
    }

    pub fn run<W: Write>(self, doc: &AltoDocument, out: &mut W) -> Result<()> {
        match self {
            Operation::Text => write_text(doc, out)?,
            Operation::Confidence => write_confidence(doc, out)?,
            Operation::Metadata => write_metadata(doc, out)?,
        }
        Ok(())
    }
}

/// Where operation output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputSink {
    /// Everything, errors included, goes to the batch writer
    Stdout,
    /// One file per input, named `<stem><suffix>`
    Directory(PathBuf),
}

impl OutputSink {
    pub fn output_path(&self, input: &Path, operation: Operation) -> Option<PathBuf> {
        match self {
            OutputSink::Stdout => None,
            OutputSink::Directory(dir) => {
                let stem = input.file_stem().unwrap_or(input.as_os_str());
                let mut name = stem.to_os_string();
                name.push(operation.output_suffix());
                Some(dir.join(name))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    pub operation: Operation,
    pub sink: OutputSink,
}

/// Result of processing one input.
#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    /// The written output file in directory mode, `None` for stdout
    pub result: Result<Option<PathBuf>>,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    /// One entry per input, in input order
    pub outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }
}

/// Resolve the input argument into the list of files to process.
///
/// A file is taken as given. A directory is walked recursively for names
/// ending in `.xml` or `.alto` (case-sensitive), sorted by path.
pub fn discover_inputs(path: &Path) -> Result<Vec<PathBuf>> {
    if !path.exists() {
        return Err(AltoError::NotFound(path.to_path_buf()));
    }

    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if ALTO_EXTENSIONS.iter().any(|ext| name.ends_with(ext)) {
            files.push(entry.into_path());
        }
    }

    info!("Found {} ALTO file(s) under {}", files.len(), path.display());
    Ok(files)
}

/// Load one file and render the operation output into memory.
pub fn process_file(path: &Path, operation: Operation) -> Result<Vec<u8>> {
    let doc = AltoDocument::open(path)?;
    let mut buf = Vec::new();
    operation.run(&doc, &mut buf)?;
    Ok(buf)
}

/// Run `config.operation` over every input.
///
/// In stdout mode both results and error lines are written to `out`, so
/// the combined stream covers every input.
pub fn run_batch<W: Write>(inputs: &[PathBuf], config: &BatchConfig, out: &mut W) -> BatchReport {
    let mut report = BatchReport::default();

    if let OutputSink::Directory(dir) = &config.sink {
        if let Err(e) = fs::create_dir_all(dir) {
            error!("Cannot create output directory {}: {}", dir.display(), e);
        }
    }

    for path in inputs {
        let result = process_file(path, config.operation)
            .and_then(|output| deliver(path, &output, config, out));

        if let Err(e) = &result {
            error!("Failed processing \"{}\" - {}", path.display(), e);
            if config.sink == OutputSink::Stdout {
                if let Err(write_err) =
                    write!(out, "\nERROR: Failed processing \"{}\" - {}", path.display(), e)
                {
                    warn!("Cannot write error entry: {}", write_err);
                }
            }
        }

        report.outcomes.push(FileOutcome {
            path: path.clone(),
            result,
        });
    }

    info!(
        "Processed {} file(s): {} succeeded, {} failed",
        report.outcomes.len(),
        report.succeeded(),
        report.failed()
    );

    report
}

fn deliver<W: Write>(
    input: &Path,
    output: &[u8],
    config: &BatchConfig,
    out: &mut W,
) -> Result<Option<PathBuf>> {
    match config.sink.output_path(input, config.operation) {
        None => {
            out.write_all(output)?;
            Ok(None)
        }
        Some(target) => {
            fs::write(&target, output)?;
            info!("{} -> {}", input.display(), target.display());
            Ok(Some(target))
        }
    }
}
