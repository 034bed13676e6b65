//! CardLab Runner — turns a run config into a rendered price table.
//!
//! This crate builds on `cardlab-core` to provide:
//! - TOML run configuration with defaults
//! - Catalog and dataset loading with progress reporting
//! - Rank and card series merged into one aligned table
//! - CSV/JSON renderers for the downstream plotting step

pub mod assemble;
pub mod config;
pub mod data_loader;
pub mod render;
pub mod runner;

pub use assemble::{assemble_table, rank_label, AssembledTable};
pub use config::{
    CalendarConfig, ConfigError, DataConfig, OutputConfig, RunConfig, TableFormat, ViewConfig,
};
pub use data_loader::{load_dataset, LoadedData};
pub use render::{renderer_for, CsvRenderer, JsonRenderer, Renderer};
pub use runner::{run, RunError, RunSummary};
