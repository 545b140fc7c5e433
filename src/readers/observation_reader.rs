use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use memmap2::Mmap;
use tracing::warn;

use crate::error::{ProcessingError, Result};
use crate::models::Observation;
use crate::parsers::ObservationParser;
use crate::utils::constants::DEFAULT_BUFFER_SIZE;

/// Reads tab-delimited observation files.
///
/// Records that fail to parse are logged with file and line context and
/// skipped; a bad record never aborts a file. Blank lines are ignored.
pub struct ObservationReader {
    parser: ObservationParser,
    use_mmap: bool,
}

impl ObservationReader {
    pub fn new() -> Self {
        Self {
            parser: ObservationParser::new(),
            use_mmap: false,
        }
    }

    pub fn with_mmap(use_mmap: bool) -> Self {
        Self {
            parser: ObservationParser::new(),
            use_mmap,
        }
    }

    /// Read all observations from a file eagerly.
    pub fn read_observations(&self, path: &Path) -> Result<Vec<Observation>> {
        if self.use_mmap {
            self.read_observations_mmap(path)
        } else {
            self.read_observations_buffered(path)
        }
    }

    /// Stream observations lazily. The stream owns the file handle and
    /// closes it when dropped, on every exit path.
    pub fn stream_observations(&self, path: &Path) -> Result<ObservationStream> {
        ObservationStream::open(path)
    }

    /// Parse-only pass over a file: counts line categories and keeps the
    /// first `max_issues` failures with their line numbers.
    pub fn scan(&self, path: &Path, max_issues: usize) -> Result<ScanReport> {
        let file = Self::open(path)?;
        let reader = BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file);
        let mut report = ScanReport::new(path);

        for line_result in reader.lines() {
            let line = line_result?;
            report.total_lines += 1;

            if line.trim().is_empty() {
                report.blank_lines += 1;
                continue;
            }

            match self.parser.parse_line(&line) {
                Ok(_) => report.valid_records += 1,
                Err(e) => {
                    report.malformed_records += 1;
                    if report.issues.len() < max_issues {
                        report.issues.push(ScanIssue {
                            line_number: report.total_lines,
                            reason: e.to_string(),
                        });
                    }
                }
            }
        }

        Ok(report)
    }

    fn open(path: &Path) -> Result<File> {
        File::open(path).map_err(|source| ProcessingError::FileUnavailable {
            path: path.to_path_buf(),
            source,
        })
    }

    fn read_observations_buffered(&self, path: &Path) -> Result<Vec<Observation>> {
        let file = Self::open(path)?;
        let reader = BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file);
        let mut observations = Vec::new();
        let mut line_number = 0u64;

        for line_result in reader.lines() {
            let line = line_result?;
            line_number += 1;

            if line.trim().is_empty() {
                continue;
            }

            match self.parser.parse_line(&line) {
                Ok(observation) => observations.push(observation),
                Err(e) if e.is_recoverable() => {
                    warn!("{}:{}: skipping record: {}", path.display(), line_number, e)
                }
                Err(e) => return Err(e),
            }
        }

        Ok(observations)
    }

    fn read_observations_mmap(&self, path: &Path) -> Result<Vec<Observation>> {
        let file = Self::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };
        let content = std::str::from_utf8(&mmap)
            .map_err(|e| ProcessingError::InvalidFormat(format!("Invalid UTF-8: {}", e)))?;

        let mut observations = Vec::new();

        for (index, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            match self.parser.parse_line(line) {
                Ok(observation) => observations.push(observation),
                Err(e) if e.is_recoverable() => {
                    warn!("{}:{}: skipping record: {}", path.display(), index + 1, e)
                }
                Err(e) => return Err(e),
            }
        }

        Ok(observations)
    }
}

impl Default for ObservationReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Lazy observation stream over a single file.
///
/// Yields parsed observations; malformed records are logged and skipped
/// inside the stream, so the only errors surfaced are I/O failures.
pub struct ObservationStream {
    reader: BufReader<File>,
    parser: ObservationParser,
    path: PathBuf,
    line_number: u64,
}

impl ObservationStream {
    fn open(path: &Path) -> Result<Self> {
        let file = ObservationReader::open(path)?;

        Ok(Self {
            reader: BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file),
            parser: ObservationParser::new(),
            path: path.to_path_buf(),
            line_number: 0,
        })
    }
}

impl Iterator for ObservationStream {
    type Item = Result<Observation>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut line = String::new();

        loop {
            line.clear();

            match self.reader.read_line(&mut line) {
                Ok(0) => return None, // EOF
                Ok(_) => {
                    self.line_number += 1;

                    if line.trim().is_empty() {
                        continue;
                    }

                    match self.parser.parse_line(&line) {
                        Ok(observation) => return Some(Ok(observation)),
                        Err(e) if e.is_recoverable() => {
                            warn!(
                                "{}:{}: skipping record: {}",
                                self.path.display(),
                                self.line_number,
                                e
                            );
                            continue;
                        }
                        Err(e) => return Some(Err(e)),
                    }
                }
                Err(e) => return Some(Err(e.into())),
            }
        }
    }
}

/// Line accounting from a validation scan of one file.
#[derive(Debug, Clone)]
pub struct ScanReport {
    pub path: PathBuf,
    pub total_lines: u64,
    pub valid_records: u64,
    pub malformed_records: u64,
    pub blank_lines: u64,
    pub issues: Vec<ScanIssue>,
}

#[derive(Debug, Clone)]
pub struct ScanIssue {
    pub line_number: u64,
    pub reason: String,
}

impl ScanReport {
    fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            total_lines: 0,
            valid_records: 0,
            malformed_records: 0,
            blank_lines: 0,
            issues: Vec::new(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.malformed_records == 0
    }
}
