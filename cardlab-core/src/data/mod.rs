//! Daily snapshots, item catalog and the assembled dataset

pub mod calendar;
pub mod catalog;
pub mod dataset;
pub mod error;
pub mod progress;
pub mod series;
pub mod snapshot;
pub mod source;

pub use calendar::Calendar;
pub use catalog::{CardDefinition, ItemCatalog};
pub use dataset::{Dataset, RecordMatrix, ValueMatrix};
pub use error::DataError;
pub use progress::{LoadProgress, StdoutProgress};
pub use series::{AlignedTable, Column, Series};
pub use snapshot::DailySnapshot;
pub use source::{listing, SourceIndex, DEFAULT_DATE_FORMAT};
