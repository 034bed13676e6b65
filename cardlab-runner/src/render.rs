//! Rendering — hand the assembled table to whatever draws it.
//!
//! Plotting happens outside this workspace; the renderers here write the
//! table to a file the plotting step reads.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::assemble::AssembledTable;
use crate::config::TableFormat;

pub trait Renderer {
    fn render(&self, table: &AssembledTable) -> Result<()>;
}

/// Writes `date,<column>...` rows.
pub struct CsvRenderer {
    path: PathBuf,
}

impl CsvRenderer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Renderer for CsvRenderer {
    fn render(&self, assembled: &AssembledTable) -> Result<()> {
        let file = File::create(&self.path)
            .with_context(|| format!("Failed to create table CSV {}", self.path.display()))?;
        let mut wtr = csv::Writer::from_writer(BufWriter::new(file));

        let table = &assembled.table;
        let mut header = vec!["date".to_string()];
        header.extend(table.labels().into_iter().map(String::from));
        wtr.write_record(&header)?;

        for (date, row) in table.rows() {
            let mut record = vec![date.to_string()];
            record.extend(row.iter().map(|v| v.to_string()));
            wtr.write_record(&record)?;
        }
        wtr.flush()
            .with_context(|| format!("Failed to write table CSV {}", self.path.display()))?;
        Ok(())
    }
}

/// Writes the assembled table as pretty JSON.
pub struct JsonRenderer {
    path: PathBuf,
}

impl JsonRenderer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Renderer for JsonRenderer {
    fn render(&self, assembled: &AssembledTable) -> Result<()> {
        let json = serde_json::to_string_pretty(assembled)
            .context("failed to serialize assembled table to JSON")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write table JSON {}", self.path.display()))?;
        Ok(())
    }
}

pub fn renderer_for(format: TableFormat, path: &Path) -> Box<dyn Renderer> {
    match format {
        TableFormat::Csv => Box::new(CsvRenderer::new(path)),
        TableFormat::Json => Box::new(JsonRenderer::new(path)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardlab_core::data::{AlignedTable, Calendar};
    use chrono::NaiveDate;

    fn assembled() -> AssembledTable {
        let start = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
        let cal = Calendar::from_dates(start.iter_days().take(2).collect());
        let mut table = AlignedTable::new(&cal);
        table.insert_column(0, "#0", vec![12.0, 7.5]).unwrap();
        table.insert_column(1, "wasteland", vec![0.0, 3.0]).unwrap();
        AssembledTable {
            table,
            resolved: vec![("wasteland".into(), "w1".into())],
            skipped: vec![],
        }
    }

    #[test]
    fn csv_has_header_and_one_row_per_date() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prices.csv");
        CsvRenderer::new(&path).render(&assembled()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "date,#0,wasteland");
        assert_eq!(lines[1], "2022-01-01,12,0");
        assert_eq!(lines[2], "2022-01-02,7.5,3");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn json_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prices.json");
        renderer_for(TableFormat::Json, &path)
            .render(&assembled())
            .unwrap();

        let back: AssembledTable =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, assembled());
    }
}
