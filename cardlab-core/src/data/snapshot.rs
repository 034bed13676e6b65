//! Daily snapshot — one day's sparse price observations, sorted by value.
//!
//! A snapshot file is a flat JSON object mapping item id to price:
//!
//! ```json
//! { "a": 5, "b": 12, "c": 1 }
//! ```
//!
//! Entries at or below the threshold are dropped, the rest are sorted
//! descending by value. Ties keep file order. Two accessors address the
//! result: `by_rank` (0 = most expensive) and `by_identifier`.

use super::error::DataError;
use crate::domain::PriceRecord;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct DailySnapshot {
    records: Vec<PriceRecord>,
    /// id → position in `records`
    index: HashMap<String, usize>,
    threshold: f64,
}

impl DailySnapshot {
    /// Load one day's snapshot, keeping entries with `value > threshold`.
    pub fn load(path: &Path, threshold: f64) -> Result<Self, DataError> {
        let content = std::fs::read_to_string(path).map_err(|e| DataError::io(path, e))?;
        let map: Map<String, Value> =
            serde_json::from_str(&content).map_err(|e| DataError::parse(path, e))?;

        let mut entries = Vec::with_capacity(map.len());
        for (key, value) in map {
            let price = value.as_f64().ok_or_else(|| DataError::InvalidValue {
                path: path.to_path_buf(),
                key: key.clone(),
            })?;
            entries.push((key, price));
        }

        Ok(Self::from_entries(entries, threshold))
    }

    /// Build a snapshot from in-memory pairs. Input order decides ties.
    pub fn from_entries<I, K>(entries: I, threshold: f64) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let mut records: Vec<PriceRecord> = entries
            .into_iter()
            .filter(|(_, value)| *value > threshold)
            .map(|(id, value)| PriceRecord::new(id, value))
            .collect();

        // sort_by is stable, so equal prices stay in input order
        records.sort_by(|a, b| b.value().total_cmp(&a.value()));

        let index = records
            .iter()
            .enumerate()
            .map(|(pos, r)| (r.id().to_string(), pos))
            .collect();

        Self {
            records,
            index,
            threshold,
        }
    }

    /// Value at sorted rank `n` (0 = largest).
    pub fn by_rank(&self, n: usize) -> Result<f64, DataError> {
        self.records
            .get(n)
            .map(PriceRecord::value)
            .ok_or(DataError::RankOutOfRange {
                rank: n,
                len: self.records.len(),
            })
    }

    /// Value for `id`, or `0.0` when the item was not retained that day.
    ///
    /// Absent and observed-at-zero are indistinguishable here; use
    /// [`contains`](Self::contains) or [`get`](Self::get) when that matters.
    pub fn by_identifier(&self, id: &str) -> f64 {
        self.get(id).unwrap_or(0.0)
    }

    /// Value for `id` if it was retained.
    pub fn get(&self, id: &str) -> Option<f64> {
        self.index.get(id).map(|&pos| self.records[pos].value())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Record at sorted rank `n`.
    pub fn record(&self, n: usize) -> Option<&PriceRecord> {
        self.records.get(n)
    }

    pub fn records(&self) -> &[PriceRecord] {
        &self.records
    }

    /// Retained values in rank order.
    pub fn values(&self) -> Vec<f64> {
        self.records.iter().map(PriceRecord::value).collect()
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
