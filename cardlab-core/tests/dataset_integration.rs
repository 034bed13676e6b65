//! Integration tests for dataset assembly from a directory of daily files.

use cardlab_core::data::{
    Calendar, DataError, Dataset, ItemCatalog, LoadProgress, SourceIndex, DEFAULT_DATE_FORMAT,
};
use chrono::NaiveDate;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

fn write_days(days: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (name, body) in days {
        std::fs::write(dir.path().join(name), body).unwrap();
    }
    dir
}

fn scenario_dir() -> TempDir {
    write_days(&[
        ("2022-01-01.json", r#"{"a":5,"b":12,"c":1}"#),
        ("2022-01-02.json", r#"{"a":7,"b":2}"#),
        ("2022-01-03.json", r#"{"b":20,"c":9}"#),
    ])
}

fn catalog() -> Arc<ItemCatalog> {
    Arc::new(ItemCatalog::from_names([
        ("a", "Wasteland"),
        ("b", "Force of Will"),
        ("c", "Mox Diamond"),
    ]))
}

fn calendar(n: usize) -> Calendar {
    let start = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
    Calendar::from_dates(start.iter_days().take(n).collect())
}

#[derive(Default)]
struct Recorder {
    seen: RefCell<Vec<(PathBuf, usize, usize)>>,
    completed: RefCell<Option<usize>>,
}

impl LoadProgress for Recorder {
    fn on_loaded(&self, path: &Path, index: usize, total: usize) {
        self.seen.borrow_mut().push((path.to_path_buf(), index, total));
    }

    fn on_complete(&self, total: usize) {
        *self.completed.borrow_mut() = Some(total);
    }
}

#[test]
fn three_day_scenario_rank_and_identifier_series() {
    let dir = scenario_dir();
    let ds = Dataset::build(dir.path(), 0.0, catalog(), None).unwrap();
    assert_eq!(ds.len(), 3);

    let day1: Vec<(&str, f64)> = ds
        .snapshot(0)
        .unwrap()
        .records()
        .iter()
        .map(|r| (r.id(), r.value()))
        .collect();
    assert_eq!(day1, vec![("b", 12.0), ("a", 5.0), ("c", 1.0)]);

    let cal = calendar(3);
    assert_eq!(ds.rank_series(0, &cal).unwrap().values(), vec![12.0, 7.0, 20.0]);
    assert_eq!(
        ds.identifier_series("c", &cal).unwrap().values(),
        vec![1.0, 0.0, 9.0]
    );
}

#[test]
fn threshold_five_leaves_one_entry_on_day_one() {
    let dir = scenario_dir();
    let ds = Dataset::build(dir.path(), 5.0, catalog(), None).unwrap();
    let day1 = ds.snapshot(0).unwrap();
    assert_eq!(day1.len(), 1);
    assert_eq!(day1.by_rank(0).unwrap(), 12.0);
    assert!(matches!(
        day1.by_rank(1),
        Err(DataError::RankOutOfRange { rank: 1, len: 1 })
    ));
}

#[test]
fn series_dates_follow_the_calendar() {
    let dir = scenario_dir();
    let ds = Dataset::build(dir.path(), 0.0, catalog(), None).unwrap();
    let cal = calendar(3);
    let series = ds.identifier_series("a", &cal).unwrap();
    assert_eq!(series.len(), cal.len());
    for (i, (date, _)) in series.points.iter().enumerate() {
        assert_eq!(Some(*date), cal.get(i));
    }
}

#[test]
fn corrupt_file_aborts_build() {
    let dir = write_days(&[
        ("2022-01-01.json", r#"{"a":5}"#),
        ("2022-01-02.json", r#"{"a":"#),
        ("2022-01-03.json", r#"{"a":6}"#),
    ]);
    let progress = Recorder::default();
    let err = Dataset::build(dir.path(), 0.0, catalog(), Some(&progress)).unwrap_err();

    match err {
        DataError::Parse { path, .. } => assert!(path.ends_with("2022-01-02.json")),
        other => panic!("expected Parse error, got {other:?}"),
    }
    assert_eq!(progress.seen.borrow().len(), 1);
    assert!(progress.completed.borrow().is_none());
}

#[test]
fn missing_directory_is_a_load_error() {
    let err = Dataset::build(Path::new("/nonexistent/cardlab-data"), 0.0, catalog(), None)
        .unwrap_err();
    assert!(err.is_load_error());
}

#[test]
fn progress_reports_every_file_in_order() {
    let dir = scenario_dir();
    let progress = Recorder::default();
    Dataset::build(dir.path(), 0.0, catalog(), Some(&progress)).unwrap();

    let seen = progress.seen.borrow();
    let indices: Vec<usize> = seen.iter().map(|(_, i, _)| *i).collect();
    assert_eq!(indices, vec![0, 1, 2]);
    assert!(seen.iter().all(|(_, _, total)| *total == 3));
    assert!(seen[2].0.ends_with("2022-01-03.json"));
    assert_eq!(*progress.completed.borrow(), Some(3));
}

#[test]
fn indexed_build_carries_its_own_calendar() {
    let dir = write_days(&[
        ("2022-01-03.json", r#"{"b":20,"c":9}"#),
        ("2022-01-01.json", r#"{"a":5,"b":12,"c":1}"#),
        ("2022-01-02.json", r#"{"a":7,"b":2}"#),
    ]);
    let index = SourceIndex::from_dir(dir.path(), DEFAULT_DATE_FORMAT).unwrap();
    let ds = Dataset::build_indexed(&index, 0.0, catalog(), None).unwrap();

    let cal = ds.calendar().unwrap().clone();
    assert_eq!(cal, calendar(3));
    assert_eq!(ds.rank_series(0, &cal).unwrap().values(), vec![12.0, 7.0, 20.0]);
}

#[test]
fn saved_matrix_round_trips_values_but_not_identifiers() {
    let dir = scenario_dir();
    let ds = Dataset::build(dir.path(), 0.0, catalog(), None).unwrap();

    let out = tempfile::tempdir().unwrap();
    let path = out.path().join("dataset.json");
    std::fs::write(&path, "stale").unwrap();
    ds.save(&path).unwrap();

    let matrix = Dataset::load_matrix(&path).unwrap();
    assert_eq!(matrix, ds.matrix());
    assert_eq!(matrix.main[0], vec![12.0, 5.0, 1.0]);

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(!raw.contains("\"b\""));
}

#[test]
fn catalog_names_resolve_to_series() {
    let dir = scenario_dir();
    let ds = Dataset::build(dir.path(), 0.0, catalog(), None).unwrap();
    let id = ds.catalog().last_id_for_name("mox diamond").unwrap().to_string();
    let series = ds.identifier_series(&id, &calendar(3)).unwrap();
    assert_eq!(series.values(), vec![1.0, 0.0, 9.0]);
}
