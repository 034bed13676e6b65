//! Dataset — one daily snapshot per source file, queried as aligned series.
//!
//! Two views are supported:
//! - rank series: the value at a fixed rank on every day
//! - identifier series: a fixed item's value on every day, zero where absent
//!
//! Both are labelled by a caller-supplied calendar whose length must equal
//! the number of days. A dataset is built once and never mutated.

use super::calendar::Calendar;
use super::catalog::ItemCatalog;
use super::error::DataError;
use super::progress::LoadProgress;
use super::series::Series;
use super::snapshot::DailySnapshot;
use super::source::{listing, SourceIndex};
use crate::domain::PriceRecord;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Persisted form of the ranked-value matrix: `{"main": [[v, ...], ...]}`.
///
/// Identifiers are not stored, so a dataset cannot be rebuilt from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueMatrix {
    pub main: Vec<Vec<f64>>,
}

/// Identifier-preserving counterpart of [`ValueMatrix`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordMatrix {
    pub main: Vec<Vec<PriceRecord>>,
}

#[derive(Debug, Clone)]
pub struct Dataset {
    snapshots: Vec<DailySnapshot>,
    catalog: Arc<ItemCatalog>,
    threshold: f64,
    /// Present when built from dated files.
    calendar: Option<Calendar>,
}

impl Dataset {
    /// Load every file in `dir`, in file-name order.
    ///
    /// The first file that fails to load aborts the build.
    pub fn build(
        dir: &Path,
        threshold: f64,
        catalog: Arc<ItemCatalog>,
        progress: Option<&dyn LoadProgress>,
    ) -> Result<Self, DataError> {
        let paths = listing(dir)?;
        let snapshots = load_all(paths.iter().map(PathBuf::as_path), threshold, progress)?;
        Ok(Self {
            snapshots,
            catalog,
            threshold,
            calendar: None,
        })
    }

    /// Load every file of a date index; the dataset keeps the index's dates.
    pub fn build_indexed(
        index: &SourceIndex,
        threshold: f64,
        catalog: Arc<ItemCatalog>,
        progress: Option<&dyn LoadProgress>,
    ) -> Result<Self, DataError> {
        let snapshots = load_all(index.paths(), threshold, progress)?;
        Ok(Self {
            snapshots,
            catalog,
            threshold,
            calendar: Some(index.dates()),
        })
    }

    /// Assemble a dataset from snapshots already in memory.
    ///
    /// Every snapshot must have been filtered at `threshold`.
    pub fn from_snapshots(
        snapshots: Vec<DailySnapshot>,
        threshold: f64,
        catalog: Arc<ItemCatalog>,
    ) -> Result<Self, DataError> {
        if let Some((day, snap)) = snapshots
            .iter()
            .enumerate()
            .find(|(_, s)| s.threshold() != threshold)
        {
            return Err(DataError::ThresholdMismatch {
                day,
                expected: threshold,
                actual: snap.threshold(),
            });
        }
        Ok(Self {
            snapshots,
            catalog,
            threshold,
            calendar: None,
        })
    }

    /// Value at rank `n` on every day.
    ///
    /// Fails if any day retains fewer than `n + 1` entries.
    pub fn rank_series(&self, n: usize, calendar: &Calendar) -> Result<Series, DataError> {
        self.check_calendar(calendar)?;
        let values = self
            .snapshots
            .iter()
            .enumerate()
            .map(|(day, snap)| {
                snap.by_rank(n).map_err(|_| DataError::DayRank {
                    day,
                    rank: n,
                    len: snap.len(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Series::aligned(format!("#{n}"), calendar, values)
    }

    /// Value of item `id` on every day, `0.0` on days it is absent.
    pub fn identifier_series(&self, id: &str, calendar: &Calendar) -> Result<Series, DataError> {
        self.check_calendar(calendar)?;
        let values = self
            .snapshots
            .iter()
            .map(|snap| snap.by_identifier(id))
            .collect();
        Series::aligned(id, calendar, values)
    }

    fn check_calendar(&self, calendar: &Calendar) -> Result<(), DataError> {
        if calendar.len() != self.snapshots.len() {
            return Err(DataError::CalendarMismatch {
                expected: self.snapshots.len(),
                actual: calendar.len(),
            });
        }
        Ok(())
    }

    /// Retained values per day, in rank order.
    pub fn matrix(&self) -> ValueMatrix {
        ValueMatrix {
            main: self.snapshots.iter().map(DailySnapshot::values).collect(),
        }
    }

    /// Retained records per day, identifiers included.
    pub fn record_matrix(&self) -> RecordMatrix {
        RecordMatrix {
            main: self
                .snapshots
                .iter()
                .map(|s| s.records().to_vec())
                .collect(),
        }
    }

    /// Write the default value matrix. Overwrites `destination`.
    pub fn save(&self, destination: &Path) -> Result<(), DataError> {
        self.save_with(destination, &self.matrix())
    }

    /// Write the identifier-preserving record matrix. Overwrites `destination`.
    pub fn save_records(&self, destination: &Path) -> Result<(), DataError> {
        self.save_with(destination, &self.record_matrix())
    }

    /// Write any serializable payload in place of the default matrix.
    pub fn save_with<T: Serialize>(&self, destination: &Path, payload: &T) -> Result<(), DataError> {
        let json = serde_json::to_vec(payload).map_err(DataError::Serialize)?;
        write_atomic(destination, &json)?;
        tracing::info!(
            path = %destination.display(),
            days = self.snapshots.len(),
            "dataset saved"
        );
        Ok(())
    }

    /// Read a matrix written by [`save`](Self::save).
    pub fn load_matrix(path: &Path) -> Result<ValueMatrix, DataError> {
        let content = fs::read_to_string(path).map_err(|e| DataError::io(path, e))?;
        serde_json::from_str(&content).map_err(|e| DataError::parse(path, e))
    }

    /// BLAKE3 hash of the serialized value matrix.
    pub fn fingerprint(&self) -> Result<String, DataError> {
        let json = serde_json::to_vec(&self.matrix()).map_err(DataError::Serialize)?;
        Ok(blake3::hash(&json).to_hex().to_string())
    }

    pub fn snapshot(&self, day: usize) -> Option<&DailySnapshot> {
        self.snapshots.get(day)
    }

    pub fn snapshots(&self) -> &[DailySnapshot] {
        &self.snapshots
    }

    pub fn catalog(&self) -> &ItemCatalog {
        &self.catalog
    }

    /// Dates of the source index, if the dataset was built from one.
    pub fn calendar(&self) -> Option<&Calendar> {
        self.calendar.as_ref()
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Retained count of the sparsest day; ranks below it are safe.
    pub fn min_len(&self) -> usize {
        self.snapshots.iter().map(DailySnapshot::len).min().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

fn load_all<'a, I>(
    paths: I,
    threshold: f64,
    progress: Option<&dyn LoadProgress>,
) -> Result<Vec<DailySnapshot>, DataError>
where
    I: ExactSizeIterator<Item = &'a Path>,
{
    let total = paths.len();
    let mut snapshots = Vec::with_capacity(total);

    for (i, path) in paths.enumerate() {
        let snap = DailySnapshot::load(path, threshold)?;
        tracing::debug!(path = %path.display(), retained = snap.len(), "snapshot loaded");
        if let Some(p) = progress {
            p.on_loaded(path, i, total);
        }
        snapshots.push(snap);
    }

    if let Some(p) = progress {
        p.on_complete(total);
    }
    tracing::info!(days = total, threshold, "dataset built");
    Ok(snapshots)
}

/// Write to `{path}.tmp` then rename into place.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), DataError> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, bytes).map_err(|source| DataError::Write {
        path: tmp.clone(),
        source,
    })?;
    fs::rename(&tmp, path).map_err(|source| {
        let _ = fs::remove_file(&tmp);
        DataError::Write {
            path: path.to_path_buf(),
            source,
        }
    })
}
