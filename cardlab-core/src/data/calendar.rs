//! Calendar — the ordered dates that label dataset rows.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Calendar {
    dates: Vec<NaiveDate>,
}

impl Calendar {
    pub fn from_dates(dates: Vec<NaiveDate>) -> Self {
        Self { dates }
    }

    /// Every day from `start` to `end`, both inclusive. Empty if `end < start`.
    pub fn daily(start: NaiveDate, end: NaiveDate) -> Self {
        let dates = start.iter_days().take_while(|d| *d <= end).collect();
        Self { dates }
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn get(&self, i: usize) -> Option<NaiveDate> {
        self.dates.get(i).copied()
    }

    pub fn first(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    pub fn last(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}
