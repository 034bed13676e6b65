//! PriceRecord — one observed price for one item on one day.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An immutable (identifier, value) pair.
///
/// Records are created by a `DailySnapshot` and never modified afterwards,
/// so fields are private and only exposed through accessors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    id: String,
    value: f64,
}

impl PriceRecord {
    pub fn new(id: impl Into<String>, value: f64) -> Self {
        Self {
            id: id.into(),
            value,
        }
    }

    /// Item identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Observed price.
    pub fn value(&self) -> f64 {
        self.value
    }
}

impl fmt::Display for PriceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[key: {}, val: {}]", self.id, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_return_constructed_fields() {
        let r = PriceRecord::new("abc", 12.5);
        assert_eq!(r.id(), "abc");
        assert_eq!(r.value(), 12.5);
    }

    #[test]
    fn display_matches_debug_listing_format() {
        let r = PriceRecord::new("b", 12.0);
        assert_eq!(r.to_string(), "[key: b, val: 12]");
    }
}
