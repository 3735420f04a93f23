use std::fs::File;
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::errors::ParserError;

/// First and last timestamps recorded in one raw channel log.
#[derive(Debug, Clone, PartialEq)]
pub struct LogBounds {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

/// Access to the raw dataset files, keyed by dataset-relative locations such
/// as `house_1/channel_2.dat`. The location strings double as the
/// `data_location` values recorded in the output documents.
pub trait DataSource {
    fn exists(&self, location: &str) -> bool;

    /// Full text of a small raw file (label tables).
    fn read_text(&self, location: &str) -> Result<String, ParserError>;

    /// First/last timestamps of a channel log, without reading the whole file.
    fn log_bounds(&self, location: &str) -> Result<LogBounds, ParserError>;
}

/// Production [`DataSource`] rooted at the raw data directory. Timestamps are
/// unix epoch seconds interpreted in the dataset's fixed civil timezone.
pub struct FsDataSource {
    root: PathBuf,
    tz: Tz,
}

impl FsDataSource {
    pub fn new(root: impl Into<PathBuf>, tz: Tz) -> Self {
        Self {
            root: root.into(),
            tz,
        }
    }

    fn resolve(&self, location: &str) -> PathBuf {
        self.root.join(location)
    }
}

impl DataSource for FsDataSource {
    fn exists(&self, location: &str) -> bool {
        self.resolve(location).is_file()
    }

    fn read_text(&self, location: &str) -> Result<String, ParserError> {
        std::fs::read_to_string(self.resolve(location))
            .map_err(|source| ParserError::io(location, source))
    }

    fn log_bounds(&self, location: &str) -> Result<LogBounds, ParserError> {
        read_log_bounds(&self.resolve(location), location, self.tz)
    }
}

/// Tail window scanned backwards for the final line. Doubles until a full
/// line is covered, so oversized lines still resolve.
const TAIL_WINDOW: u64 = 8 * 1024;

/// Reads the first and last data line of a channel log and parses their
/// leading epoch-seconds field. Only the two boundary lines are ever
/// examined; the body of the file is skipped.
pub fn read_log_bounds(path: &Path, location: &str, tz: Tz) -> Result<LogBounds, ParserError> {
    let file = File::open(path).map_err(|source| ParserError::io(location, source))?;

    let first = first_line(&file, location)?;
    let last = last_line(&file, location)?;

    let start = parse_epoch_line(&first, location, tz)?;
    let end = parse_epoch_line(&last, location, tz)?;
    if end < start {
        return Err(ParserError::InvertedTimeframe {
            location: location.to_string(),
        });
    }

    Ok(LogBounds { start, end })
}

fn first_line(mut file: &File, location: &str) -> Result<String, ParserError> {
    file.seek(SeekFrom::Start(0))
        .map_err(|source| ParserError::io(location, source))?;
    let mut reader = BufReader::new(file);
    let mut line = String::new();
    loop {
        line.clear();
        let read = reader
            .read_line(&mut line)
            .map_err(|source| ParserError::io(location, source))?;
        if read == 0 {
            return Err(ParserError::EmptyLog {
                location: location.to_string(),
            });
        }
        if !line.trim().is_empty() {
            return Ok(line.trim().to_string());
        }
    }
}

fn last_line(mut file: &File, location: &str) -> Result<String, ParserError> {
    let len = file
        .seek(SeekFrom::End(0))
        .map_err(|source| ParserError::io(location, source))?;
    if len == 0 {
        return Err(ParserError::EmptyLog {
            location: location.to_string(),
        });
    }

    let mut window = TAIL_WINDOW.min(len);
    loop {
        file.seek(SeekFrom::End(-(window as i64)))
            .map_err(|source| ParserError::io(location, source))?;
        let mut buf = Vec::with_capacity(window as usize);
        file.take(window)
            .read_to_end(&mut buf)
            .map_err(|source| ParserError::io(location, source))?;
        let text = String::from_utf8_lossy(&buf);

        if window == len {
            return text
                .lines()
                .rev()
                .map(str::trim)
                .find(|line| !line.is_empty())
                .map(str::to_string)
                .ok_or_else(|| ParserError::EmptyLog {
                    location: location.to_string(),
                });
        }

        // The window may begin mid-line; only lines after the first newline
        // are known to be complete.
        if let Some(pos) = text.find('\n') {
            if let Some(line) = text[pos + 1..]
                .lines()
                .rev()
                .map(str::trim)
                .find(|line| !line.is_empty())
            {
                return Ok(line.to_string());
            }
        }

        window = (window * 2).min(len);
    }
}

fn parse_epoch_line(line: &str, location: &str, tz: Tz) -> Result<DateTime<Tz>, ParserError> {
    let token = line.split_whitespace().next().ok_or_else(|| {
        ParserError::InvalidTimestamp {
            location: location.to_string(),
            value: line.to_string(),
            message: "line has no timestamp field".to_string(),
        }
    })?;

    let epoch = token
        .parse::<f64>()
        .map_err(|err| ParserError::InvalidTimestamp {
            location: location.to_string(),
            value: token.to_string(),
            message: err.to_string(),
        })?;

    let mut secs = epoch.floor() as i64;
    let mut nanos = ((epoch - epoch.floor()) * 1e9).round() as u32;
    if nanos >= 1_000_000_000 {
        secs += 1;
        nanos = 0;
    }

    let utc = DateTime::<Utc>::from_timestamp(secs, nanos).ok_or_else(|| {
        ParserError::InvalidTimestamp {
            location: location.to_string(),
            value: token.to_string(),
            message: "epoch out of range".to_string(),
        }
    })?;

    Ok(utc.with_timezone(&tz))
}
