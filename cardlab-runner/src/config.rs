//! Serializable run configuration.
//!
//! ```toml
//! [data]
//! source_dir = "data"
//! catalog = "card-definitions.txt"
//! threshold = 10.0
//! # date_format = "%Y-%m-%d"   # index files by the date in their name
//!
//! [calendar]
//! start = "2022-01-01"
//! end = "2024-12-31"
//!
//! [view]
//! ranks = [50, 10]
//! cards = ["wasteland", "force of will"]
//!
//! [output]
//! table = "prices.csv"
//! format = "csv"
//! matrix = "dataset.json"
//! ```

use cardlab_core::data::Calendar;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RunConfig {
    pub data: DataConfig,
    pub calendar: CalendarConfig,
    pub view: ViewConfig,
    pub output: OutputConfig,
}

impl RunConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.data.threshold.is_finite() {
            return Err(ConfigError::Invalid("data.threshold must be finite".into()));
        }
        if self.view.ranks.is_empty() {
            return Err(ConfigError::Invalid("view.ranks must not be empty".into()));
        }
        let mut ranks = HashSet::new();
        if let Some(rank) = self.view.ranks.iter().find(|r| !ranks.insert(**r)) {
            return Err(ConfigError::Invalid(format!(
                "view.ranks lists rank {rank} more than once"
            )));
        }
        // Card names resolve case-insensitively, so "Wasteland" and
        // "wasteland" would become two identical columns.
        let mut cards = HashSet::new();
        if let Some(card) = self
            .view
            .cards
            .iter()
            .find(|c| !cards.insert(c.to_lowercase()))
        {
            return Err(ConfigError::Invalid(format!(
                "view.cards lists '{card}' more than once"
            )));
        }
        if self.data.date_format.is_none() && self.calendar.end < self.calendar.start {
            return Err(ConfigError::Invalid(format!(
                "calendar.end {} is before calendar.start {}",
                self.calendar.end, self.calendar.start
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DataConfig {
    /// Directory of daily snapshot files.
    pub source_dir: PathBuf,
    /// Item catalog file.
    pub catalog: PathBuf,
    /// Entries at or below this price are dropped.
    pub threshold: f64,
    /// When set, files are indexed by the date in their name and the
    /// `[calendar]` section is ignored.
    pub date_format: Option<String>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("data"),
            catalog: PathBuf::from("card-definitions.txt"),
            threshold: 10.0,
            date_format: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CalendarConfig {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl CalendarConfig {
    pub fn to_calendar(&self) -> Calendar {
        Calendar::daily(self.start, self.end)
    }
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2022, 1, 1).unwrap_or_default(),
            end: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewConfig {
    /// The first rank is the base column; the rest are prepended.
    pub ranks: Vec<usize>,
    /// Card names resolved through the catalog.
    pub cards: Vec<String>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            ranks: vec![50, 10],
            cards: vec![
                "wasteland".into(),
                "force of will".into(),
                "mox diamond".into(),
                "sheoldred, the apocalypse".into(),
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TableFormat {
    #[default]
    Csv,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub table: PathBuf,
    pub format: TableFormat,
    /// Also persist the ranked-value matrix here.
    pub matrix: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            table: PathBuf::from("prices.csv"),
            format: TableFormat::Csv,
            matrix: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let config = RunConfig::from_toml("").unwrap();
        assert_eq!(config, RunConfig::default());
        assert_eq!(config.data.threshold, 10.0);
        assert_eq!(config.view.ranks, vec![50, 10]);
        assert_eq!(config.calendar.to_calendar().len(), 1096);
    }

    #[test]
    fn parses_full_config() {
        let config = RunConfig::from_toml(
            r#"
[data]
source_dir = "prices"
catalog = "cards.json"
threshold = 2.5
date_format = "%Y%m%d"

[view]
ranks = [0]
cards = ["Wasteland"]

[output]
table = "out.json"
format = "json"
matrix = "matrix.json"
"#,
        )
        .unwrap();
        assert_eq!(config.data.source_dir, PathBuf::from("prices"));
        assert_eq!(config.data.date_format.as_deref(), Some("%Y%m%d"));
        assert_eq!(config.output.format, TableFormat::Json);
        assert_eq!(config.output.matrix, Some(PathBuf::from("matrix.json")));
        assert_eq!(config.view.cards, vec!["Wasteland".to_string()]);
    }

    #[test]
    fn empty_ranks_rejected() {
        let err = RunConfig::from_toml("[view]\nranks = []\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn duplicate_ranks_rejected() {
        let err = RunConfig::from_toml("[view]\nranks = [10, 50, 10]\n").unwrap_err();
        match err {
            ConfigError::Invalid(msg) => assert!(msg.contains("rank 10")),
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_cards_rejected_ignoring_case() {
        let err = RunConfig::from_toml(
            "[view]\nranks = [0]\ncards = [\"Wasteland\", \"force of will\", \"wasteland\"]\n",
        )
        .unwrap_err();
        match err {
            ConfigError::Invalid(msg) => assert!(msg.contains("'wasteland'")),
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn distinct_view_accepted() {
        let config =
            RunConfig::from_toml("[view]\nranks = [0, 1]\ncards = [\"Wasteland\", \"Mox Diamond\"]\n")
                .unwrap();
        assert_eq!(config.view.ranks, vec![0, 1]);
    }

    #[test]
    fn reversed_calendar_rejected() {
        let err = RunConfig::from_toml("[calendar]\nstart = \"2024-01-02\"\nend = \"2024-01-01\"\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn unknown_format_rejected() {
        assert!(matches!(
            RunConfig::from_toml("[output]\nformat = \"png\"\n"),
            Err(ConfigError::Parse(_))
        ));
    }
}
