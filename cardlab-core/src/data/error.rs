//! Structured error types for data operations.
//!
//! Every variant names the file, rank or lengths that triggered it so the
//! CLI can report an aborted run precisely.

use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{path}: value for '{key}' is not a number")]
    InvalidValue { path: PathBuf, key: String },

    #[error("{path}: file name is not a date in format '{format}'")]
    UndatedFile { path: PathBuf, format: String },

    #[error("two snapshot files resolve to the same date {date}")]
    DuplicateDate { date: NaiveDate },

    #[error("rank {rank} out of range: snapshot retains {len} entries")]
    RankOutOfRange { rank: usize, len: usize },

    #[error("rank {rank} out of range on day {day}: snapshot retains {len} entries")]
    DayRank { day: usize, rank: usize, len: usize },

    #[error("calendar has {actual} dates but dataset has {expected} days")]
    CalendarMismatch { expected: usize, actual: usize },

    #[error("series '{label}' is dated {actual} at row {row}, table expects {expected}")]
    DateMismatch {
        label: String,
        row: usize,
        expected: NaiveDate,
        actual: NaiveDate,
    },

    #[error("table already has a column labelled '{label}'")]
    DuplicateColumn { label: String },

    #[error("snapshot for day {day} was filtered at {actual}, dataset threshold is {expected}")]
    ThresholdMismatch {
        day: usize,
        expected: f64,
        actual: f64,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize dataset: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl DataError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }

    /// True for the load-time failures that abort a dataset build.
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            Self::Io { .. }
                | Self::Parse { .. }
                | Self::InvalidValue { .. }
                | Self::UndatedFile { .. }
                | Self::DuplicateDate { .. }
        )
    }
}
