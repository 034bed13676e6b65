//! Dataset loading for a run.
//!
//! Loads the item catalog once, then builds the dataset from the configured
//! source directory. Returns the calendar the views are aligned to: the
//! file dates when files are indexed by date, the configured range otherwise.

use cardlab_core::data::{Calendar, DataError, Dataset, ItemCatalog, LoadProgress, SourceIndex};
use std::sync::Arc;

use crate::config::RunConfig;

/// A built dataset and the calendar its rows are labelled with.
#[derive(Debug)]
pub struct LoadedData {
    pub dataset: Dataset,
    pub calendar: Calendar,
    /// BLAKE3 over the ranked-value matrix.
    pub dataset_hash: String,
}

pub fn load_dataset(
    config: &RunConfig,
    progress: Option<&dyn LoadProgress>,
) -> Result<LoadedData, DataError> {
    let catalog = Arc::new(ItemCatalog::load(&config.data.catalog)?);
    tracing::info!(
        path = %config.data.catalog.display(),
        items = catalog.len(),
        "catalog loaded"
    );

    let threshold = config.data.threshold;
    let (dataset, calendar) = match &config.data.date_format {
        Some(format) => {
            let index = SourceIndex::from_dir(&config.data.source_dir, format)?;
            let dataset = Dataset::build_indexed(&index, threshold, catalog, progress)?;
            (dataset, index.dates())
        }
        None => {
            let dataset = Dataset::build(&config.data.source_dir, threshold, catalog, progress)?;
            (dataset, config.calendar.to_calendar())
        }
    };

    let dataset_hash = dataset.fingerprint()?;
    Ok(LoadedData {
        dataset,
        calendar,
        dataset_hash,
    })
}
