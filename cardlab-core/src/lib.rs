//! CardLab Core — the data model behind daily card price histories.
//!
//! This crate contains:
//! - `PriceRecord`, the (item id, price) unit
//! - `DailySnapshot`, one day's observations sorted by price with rank and id lookup
//! - `ItemCatalog`, card metadata with case-insensitive name resolution
//! - `Dataset`, every day of a source directory queried as calendar-aligned series
//! - `AlignedTable`, several series merged on one date index

pub mod data;
pub mod domain;

pub use data::{
    AlignedTable, Calendar, DailySnapshot, DataError, Dataset, ItemCatalog, Series, SourceIndex,
};
pub use domain::PriceRecord;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: the catalog and dataset can be shared across threads.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<PriceRecord>();
        require_sync::<PriceRecord>();
        require_send::<DailySnapshot>();
        require_sync::<DailySnapshot>();
        require_send::<ItemCatalog>();
        require_sync::<ItemCatalog>();
        require_send::<Dataset>();
        require_sync::<Dataset>();
        require_send::<DataError>();
        require_sync::<DataError>();
    }
}
