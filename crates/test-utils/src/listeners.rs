use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use autoview::watch::DirectoryListener;

/// A listener that records every path it is notified about.
///
/// Clones share the same record, so tests can keep one clone and hand the
/// other to the monitor.
#[derive(Clone, Default)]
pub struct RecordingListener {
    paths: Arc<Mutex<Vec<PathBuf>>>,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded paths, in notification order.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.paths.lock().unwrap().clone()
    }
}

impl DirectoryListener for RecordingListener {
    fn created(&self, path: &Path) {
        self.paths.lock().unwrap().push(path.to_path_buf());
    }
}

/// A listener that always panics, for isolation tests.
#[derive(Clone, Copy, Default)]
pub struct PanickingListener;

impl DirectoryListener for PanickingListener {
    fn created(&self, _path: &Path) {
        panic!("listener failure");
    }
}
