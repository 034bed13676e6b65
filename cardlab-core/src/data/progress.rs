//! Progress callbacks for dataset builds.

use std::path::Path;

/// Progress callback for multi-file loads.
pub trait LoadProgress {
    /// Called after a daily file has been loaded.
    fn on_loaded(&self, path: &Path, index: usize, total: usize);

    /// Called once every file has loaded.
    fn on_complete(&self, _total: usize) {}
}

/// Simple progress reporter that prints `i / n` to stdout.
pub struct StdoutProgress;

impl LoadProgress for StdoutProgress {
    fn on_loaded(&self, _path: &Path, index: usize, total: usize) {
        println!("{} / {}", index + 1, total);
    }

    fn on_complete(&self, total: usize) {
        println!("Loaded {total} daily snapshots");
    }
}
