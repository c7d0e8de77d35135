use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Condvar, Mutex};

use anyhow::Result;
use autoview::watch::{CancelHandle, EventBatch, RawEvent, Wait, WatchFacility, WatchToken};

/// A scripted watch facility for driving the monitor loop deterministically:
///
/// - `register` hands out sequential tokens (starting at 0) and records the
///   registered paths
/// - `wait` pops pre-loaded batches in order; once the script is exhausted it
///   blocks until a cancel handle fires
/// - `rearm` answers from a per-token script, defaulting to `true`
pub struct FakeFacility {
    script: VecDeque<EventBatch>,
    rearm: HashMap<WatchToken, VecDeque<bool>>,
    registered: Vec<PathBuf>,
    next_token: u64,
    cancelled: Arc<(Mutex<bool>, Condvar)>,
}

impl Default for FakeFacility {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeFacility {
    pub fn new() -> Self {
        Self {
            script: VecDeque::new(),
            rearm: HashMap::new(),
            registered: Vec::new(),
            next_token: 0,
            cancelled: Arc::new((Mutex::new(false), Condvar::new())),
        }
    }

    /// Queue a batch for a later `wait` call.
    pub fn push_batch(&mut self, token: WatchToken, events: Vec<RawEvent>) {
        self.script.push_back(EventBatch { token, events });
    }

    /// Queue the answer for a later `rearm(token)` call.
    pub fn push_rearm(&mut self, token: WatchToken, valid: bool) {
        self.rearm.entry(token).or_default().push_back(valid);
    }

    pub fn registered_paths(&self) -> &[PathBuf] {
        &self.registered
    }
}

impl WatchFacility for FakeFacility {
    fn register(&mut self, path: &Path) -> Result<WatchToken> {
        if let Some(pos) = self.registered.iter().position(|p| p == path) {
            return Ok(WatchToken::from_raw(pos as u64));
        }
        let token = WatchToken::from_raw(self.next_token);
        self.next_token += 1;
        self.registered.push(path.to_path_buf());
        Ok(token)
    }

    fn wait(&mut self) -> Wait {
        let (flag, cvar) = &*self.cancelled;
        let mut done = flag.lock().unwrap();
        if *done {
            return Wait::Cancelled;
        }
        if let Some(batch) = self.script.pop_front() {
            return Wait::Batch(batch);
        }
        // Script exhausted: behave like a quiet directory until cancelled.
        while !*done {
            done = cvar.wait(done).unwrap();
        }
        Wait::Cancelled
    }

    fn rearm(&mut self, token: WatchToken) -> bool {
        self.rearm
            .get_mut(&token)
            .and_then(|answers| answers.pop_front())
            .unwrap_or(true)
    }

    fn cancel_handle(&self) -> CancelHandle {
        let cancelled = Arc::clone(&self.cancelled);
        CancelHandle::new(move || {
            let (flag, cvar) = &*cancelled;
            *flag.lock().unwrap() = true;
            cvar.notify_all();
        })
    }
}
