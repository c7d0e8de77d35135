// src/watch/facility.rs

//! The seam between the monitor loop and the platform watch facility.
//!
//! Everything the monitor needs from the OS is expressed through
//! [`WatchFacility`]: register a directory, block for the next batch of
//! events, re-arm a registration after consuming its events. One
//! implementation wraps the platform watcher (see `watcher`); tests
//! substitute a scripted fake.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;

/// Opaque handle identifying one directory's active registration with the
/// underlying filesystem-event facility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WatchToken(u64);

impl WatchToken {
    /// Construct a token from a raw id. Facility implementations own id
    /// allocation; the monitor never inspects the value.
    pub fn from_raw(id: u64) -> Self {
        Self(id)
    }
}

/// One raw filesystem event as reported by the facility.
///
/// Only creations carry a payload: the entry name relative to the watched
/// directory. The other kinds are delivered so the loop can keep its
/// bookkeeping current, then discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawEvent {
    /// A new entry appeared in the watched directory.
    Created { name: PathBuf },
    /// Some other change (modify, remove, rename). Never acted on.
    Other,
    /// The facility dropped events; the gap is not recovered.
    Overflow,
}

/// The events delivered together for one signalled token on one wait.
#[derive(Debug, Clone)]
pub struct EventBatch {
    pub token: WatchToken,
    pub events: Vec<RawEvent>,
}

/// Outcome of one blocking wait on the facility.
#[derive(Debug)]
pub enum Wait {
    Batch(EventBatch),
    Cancelled,
}

/// Cross-thread request to unblock a pending [`WatchFacility::wait`].
///
/// Cheap to clone; calling [`cancel`](CancelHandle::cancel) more than once is
/// harmless.
#[derive(Clone)]
pub struct CancelHandle {
    inner: Arc<dyn Fn() + Send + Sync>,
}

impl CancelHandle {
    pub fn new(f: impl Fn() + Send + Sync + 'static) -> Self {
        Self { inner: Arc::new(f) }
    }

    /// Make the facility's current (or next) wait return [`Wait::Cancelled`].
    /// Takes effect without requiring a filesystem event to occur.
    pub fn cancel(&self) {
        (self.inner)()
    }
}

impl fmt::Debug for CancelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancelHandle").finish()
    }
}

/// Abstract filesystem-watch facility.
pub trait WatchFacility: Send {
    /// Request creation-event monitoring for `path`, returning the token the
    /// facility will signal events for it under. Registering a directory
    /// that is already registered returns its existing token.
    fn register(&mut self, path: &Path) -> Result<WatchToken>;

    /// Block until the next batch of events is available, or until a
    /// [`CancelHandle`] fires.
    fn wait(&mut self) -> Wait;

    /// Continue monitoring the directory behind `token` after its pending
    /// events have been consumed. Returns `false` when the directory is no
    /// longer accessible, in which case the registration is gone.
    fn rearm(&mut self, token: WatchToken) -> bool;

    /// A handle that can interrupt [`wait`](WatchFacility::wait) from another
    /// thread.
    fn cancel_handle(&self) -> CancelHandle;
}
