//! Run orchestration — load, assemble, render, persist.

use cardlab_core::data::{DataError, LoadProgress};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::assemble::assemble_table;
use crate::config::{ConfigError, RunConfig};
use crate::data_loader::load_dataset;
use crate::render::renderer_for;

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("data error: {0}")]
    Data(#[from] DataError),
    #[error("render failed: {0:#}")]
    Render(anyhow::Error),
}

/// What a finished run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub days: usize,
    pub threshold: f64,
    /// Retained count of the sparsest day.
    pub min_retained: usize,
    pub dataset_hash: String,
    pub columns: Vec<String>,
    pub skipped_cards: Vec<String>,
    pub table_path: PathBuf,
    pub matrix_path: Option<PathBuf>,
}

/// Build the dataset, assemble the configured view and render it.
pub fn run(config: &RunConfig, progress: Option<&dyn LoadProgress>) -> Result<RunSummary, RunError> {
    config.validate()?;
    let loaded = load_dataset(config, progress)?;
    let dataset = &loaded.dataset;

    let assembled = assemble_table(dataset, &loaded.calendar, &config.view)?;

    renderer_for(config.output.format, &config.output.table)
        .render(&assembled)
        .map_err(RunError::Render)?;
    tracing::info!(path = %config.output.table.display(), "table rendered");

    if let Some(path) = &config.output.matrix {
        dataset.save(path)?;
    }

    Ok(RunSummary {
        days: dataset.len(),
        threshold: dataset.threshold(),
        min_retained: dataset.min_len(),
        dataset_hash: loaded.dataset_hash.clone(),
        columns: assembled
            .table
            .labels()
            .into_iter()
            .map(String::from)
            .collect(),
        skipped_cards: assembled.skipped,
        table_path: config.output.table.clone(),
        matrix_path: config.output.matrix.clone(),
    })
}
