// src/watch/monitor.rs

//! The directory-monitoring engine.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, error, info};

use crate::errors::Result;
use crate::watch::facility::{CancelHandle, RawEvent, Wait, WatchFacility, WatchToken};
use crate::watch::listener::{DirectoryListener, ListenerRegistry};
use crate::watch::watcher::NotifyFacility;

/// Watches one directory for newly created files and fans each creation out
/// to the registered listeners.
///
/// The monitor owns the watch facility and the token -> directory table;
/// both are touched only from the thread running
/// [`process_events`](DirectoryMonitor::process_events). Listener
/// registration and cancellation go through cloneable cross-thread handles.
///
/// Lifecycle: construct, add listeners, run `process_events`. The loop runs
/// until it is cancelled or until no watched directory remains accessible;
/// after that the monitor is done and a new one must be constructed to watch
/// again.
pub struct DirectoryMonitor {
    facility: Box<dyn WatchFacility>,
    watched: HashMap<WatchToken, PathBuf>,
    listeners: ListenerRegistry,
}

impl DirectoryMonitor {
    /// Create a monitor watching `dir` with the platform watch facility.
    ///
    /// Fails when the facility cannot be created or `dir` cannot be
    /// registered; both are unrecoverable setup errors, not retried.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let facility = NotifyFacility::new()?;
        Self::with_facility(dir, Box::new(facility))
    }

    /// Create a monitor on an explicit facility implementation.
    pub fn with_facility(
        dir: impl Into<PathBuf>,
        facility: Box<dyn WatchFacility>,
    ) -> Result<Self> {
        let dir = dir.into();
        // Canonicalize once so event paths and the table agree on a prefix.
        let dir = dir.canonicalize().unwrap_or(dir);

        let mut monitor = Self {
            facility,
            watched: HashMap::new(),
            listeners: ListenerRegistry::new(),
        };
        monitor.register(&dir)?;
        info!("monitoring {}", dir.display());
        Ok(monitor)
    }

    /// Append `listener` to the fan-out list.
    pub fn add_listener(&self, listener: Arc<dyn DirectoryListener>) {
        self.listeners.add(listener);
    }

    /// Cloneable handle to the listener list, for adding listeners while the
    /// loop runs on another thread.
    pub fn listeners(&self) -> ListenerRegistry {
        self.listeners.clone()
    }

    /// Handle that makes a blocked
    /// [`process_events`](DirectoryMonitor::process_events) return promptly.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.facility.cancel_handle()
    }

    /// Run the event loop on the calling thread.
    ///
    /// Blocks until cancelled or until no watched directory remains
    /// accessible; both are normal returns. Per batch: creations are joined
    /// with the registered directory and fanned out to all listeners in
    /// order, other event kinds are skipped, and the signalled registration
    /// is re-armed (or dropped from the table when its directory is gone).
    pub fn process_events(&mut self) {
        loop {
            let batch = match self.facility.wait() {
                Wait::Batch(batch) => batch,
                Wait::Cancelled => {
                    info!("cancellation requested, monitor stopping");
                    return;
                }
            };

            let Some(dir) = self.watched.get(&batch.token).cloned() else {
                error!(token = ?batch.token, "signalled token has no registered directory");
                continue;
            };

            for event in batch.events {
                match event {
                    RawEvent::Created { name } => {
                        let child = dir.join(name);
                        info!(path = %child.display(), "file created");
                        self.listeners.notify_created(&child);
                    }
                    RawEvent::Other => {}
                    RawEvent::Overflow => {
                        // Events were dropped by the facility; nothing is
                        // delivered for the gap.
                        debug!(dir = %dir.display(), "event overflow, some events were lost");
                    }
                }
            }

            if !self.facility.rearm(batch.token) {
                debug!(dir = %dir.display(), "directory no longer accessible, dropping watch");
                self.watched.remove(&batch.token);
                if self.watched.is_empty() {
                    info!("no watched directories remain, monitor stopping");
                    return;
                }
            }
        }
    }

    /// Register `dir` with the facility and record the token -> directory
    /// mapping. Registering an already-watched directory refreshes its entry
    /// instead of duplicating it.
    fn register(&mut self, dir: &Path) -> Result<()> {
        let token = self.facility.register(dir)?;
        match self.watched.insert(token, dir.to_path_buf()) {
            None => debug!(dir = %dir.display(), "registered directory"),
            Some(prev) if prev != *dir => {
                debug!(prev = %prev.display(), dir = %dir.display(), "registration updated");
            }
            Some(_) => {}
        }
        Ok(())
    }
}
