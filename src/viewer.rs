// src/viewer.rs

//! The shipped listener: open created files with the platform default
//! application.

use std::path::Path;

use tracing::error;

use crate::watch::DirectoryListener;

/// Opens every created file with whatever the OS considers its default
/// handler. Failures (no handler registered, I/O errors) are logged here and
/// never reach the monitor.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewerLauncher;

impl ViewerLauncher {
    pub fn new() -> Self {
        Self
    }
}

impl DirectoryListener for ViewerLauncher {
    fn created(&self, path: &Path) {
        if let Err(err) = opener::open(path) {
            error!(path = %path.display(), error = %err, "unable to launch viewer");
        }
    }
}
