//! Source index — which daily file belongs to which date.
//!
//! Daily files named by date (`2024-01-02.json`) are indexed into a sorted
//! date → path map, so day order never depends on how the platform lists
//! a directory. Undated directories fall back to file-name order.

use super::calendar::Calendar;
use super::error::DataError;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Default)]
pub struct SourceIndex {
    files: BTreeMap<NaiveDate, PathBuf>,
}

impl SourceIndex {
    /// Index every file in `dir` by the date encoded in its file stem.
    pub fn from_dir(dir: &Path, date_format: &str) -> Result<Self, DataError> {
        let mut files = BTreeMap::new();
        for path in listing(dir)? {
            let date = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|stem| NaiveDate::parse_from_str(stem, date_format).ok())
                .ok_or_else(|| DataError::UndatedFile {
                    path: path.clone(),
                    format: date_format.to_string(),
                })?;
            if files.insert(date, path).is_some() {
                return Err(DataError::DuplicateDate { date });
            }
        }
        Ok(Self { files })
    }

    pub fn from_map(files: BTreeMap<NaiveDate, PathBuf>) -> Self {
        Self { files }
    }

    /// Dates in ascending order.
    pub fn dates(&self) -> Calendar {
        Calendar::from_dates(self.files.keys().copied().collect())
    }

    pub fn paths(&self) -> impl ExactSizeIterator<Item = &Path> {
        self.files.values().map(PathBuf::as_path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &Path)> {
        self.files.iter().map(|(d, p)| (*d, p.as_path()))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Regular files in `dir`, sorted by file name.
pub fn listing(dir: &Path) -> Result<Vec<PathBuf>, DataError> {
    let entries = std::fs::read_dir(dir).map_err(|e| DataError::io(dir, e))?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| DataError::io(dir, e))?;
        let path = entry.path();
        if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}
