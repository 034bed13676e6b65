//! Domain types for CardLab

pub mod record;

pub use record::PriceRecord;

/// Item identifier type alias
pub type ItemId = String;
