//! Table assembly — rank and card series merged on one calendar.
//!
//! Column order follows the price-overview chart:
//! 1. the first configured rank is the base column
//! 2. each card is inserted right after the leftmost column
//! 3. each remaining rank is inserted at the front

use cardlab_core::data::{AlignedTable, Calendar, DataError, Dataset};
use serde::{Deserialize, Serialize};

use crate::config::ViewConfig;

/// A merged table plus how each card name was resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssembledTable {
    pub table: AlignedTable,
    /// (card name, item id) for every card that made it into the table.
    pub resolved: Vec<(String, String)>,
    /// Card names with no catalog match.
    pub skipped: Vec<String>,
}

/// Column label for a rank series.
pub fn rank_label(rank: usize) -> String {
    format!("#{rank}")
}

pub fn assemble_table(
    dataset: &Dataset,
    calendar: &Calendar,
    view: &ViewConfig,
) -> Result<AssembledTable, DataError> {
    let mut table = AlignedTable::new(calendar);
    let mut resolved = Vec::new();
    let mut skipped = Vec::new();

    let mut ranks = view.ranks.iter();
    if let Some(&base) = ranks.next() {
        let series = dataset.rank_series(base, calendar)?;
        table.insert_column(0, rank_label(base), series.values())?;
    }

    for card in &view.cards {
        let Some(id) = dataset.catalog().last_id_for_name(card) else {
            tracing::warn!(card = %card, "card not found in catalog, skipping");
            skipped.push(card.clone());
            continue;
        };
        let series = dataset.identifier_series(id, calendar)?;
        table.insert_column(1, card.clone(), series.values())?;
        resolved.push((card.clone(), id.to_string()));
    }

    for &rank in ranks {
        let series = dataset.rank_series(rank, calendar)?;
        table.insert_column(0, rank_label(rank), series.values())?;
    }

    Ok(AssembledTable {
        table,
        resolved,
        skipped,
    })
}
