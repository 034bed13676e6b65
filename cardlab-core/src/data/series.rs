//! Date-aligned series and the merged table built from them.

use super::calendar::Calendar;
use super::error::DataError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One value per calendar date, in calendar order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub label: String,
    pub points: Vec<(NaiveDate, f64)>,
}

impl Series {
    /// Pair `values` with `calendar` dates. Lengths must match.
    pub fn aligned(
        label: impl Into<String>,
        calendar: &Calendar,
        values: Vec<f64>,
    ) -> Result<Self, DataError> {
        check_len(calendar.len(), values.len())?;
        let points = calendar.dates().iter().copied().zip(values).collect();
        Ok(Self {
            label: label.into(),
            points,
        })
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|(_, v)| *v).collect()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|(d, _)| *d).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub label: String,
    pub values: Vec<f64>,
}

/// Columns of values sharing one date index.
///
/// Every column holds exactly one value per date and labels are unique.
/// Deserialization checks both, so `rows` never indexes past a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TableParts")]
pub struct AlignedTable {
    dates: Vec<NaiveDate>,
    columns: Vec<Column>,
}

#[derive(Deserialize)]
struct TableParts {
    dates: Vec<NaiveDate>,
    columns: Vec<Column>,
}

impl TryFrom<TableParts> for AlignedTable {
    type Error = DataError;

    fn try_from(parts: TableParts) -> Result<Self, Self::Error> {
        let mut table = Self {
            dates: parts.dates,
            columns: Vec::with_capacity(parts.columns.len()),
        };
        for column in parts.columns {
            table.insert_column(table.columns.len(), column.label, column.values)?;
        }
        Ok(table)
    }
}

impl AlignedTable {
    pub fn new(calendar: &Calendar) -> Self {
        Self {
            dates: calendar.dates().to_vec(),
            columns: Vec::new(),
        }
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Insert a column at `index` (clamped to the current column count).
    pub fn insert_column(
        &mut self,
        index: usize,
        label: impl Into<String>,
        values: Vec<f64>,
    ) -> Result<(), DataError> {
        let label = label.into();
        check_len(self.dates.len(), values.len())?;
        if self.column(&label).is_some() {
            return Err(DataError::DuplicateColumn { label });
        }
        let index = index.min(self.columns.len());
        self.columns.insert(index, Column { label, values });
        Ok(())
    }

    /// Append a series as the last column. Its dates must match the table's.
    pub fn push_series(&mut self, series: Series) -> Result<(), DataError> {
        check_len(self.dates.len(), series.len())?;
        let skew = self
            .dates
            .iter()
            .zip(&series.points)
            .enumerate()
            .find(|(_, (expected, (actual, _)))| *expected != actual);
        if let Some((row, (expected, (actual, _)))) = skew {
            return Err(DataError::DateMismatch {
                label: series.label,
                row,
                expected: *expected,
                actual: *actual,
            });
        }
        let values = series.values();
        self.insert_column(self.columns.len(), series.label, values)
    }

    pub fn column(&self, label: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.label == label)
    }

    pub fn labels(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.label.as_str()).collect()
    }

    /// Row-major view: one `(date, values)` per calendar date.
    pub fn rows(&self) -> impl Iterator<Item = (NaiveDate, Vec<f64>)> + '_ {
        self.dates.iter().enumerate().map(move |(i, date)| {
            let row = self.columns.iter().map(|c| c.values[i]).collect();
            (*date, row)
        })
    }

    pub fn row_count(&self) -> usize {
        self.dates.len()
    }
}

fn check_len(expected: usize, actual: usize) -> Result<(), DataError> {
    if expected != actual {
        return Err(DataError::CalendarMismatch { expected, actual });
    }
    Ok(())
}
