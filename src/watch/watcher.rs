// src/watch/watcher.rs

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{Context, Result};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::watch::facility::{CancelHandle, EventBatch, RawEvent, Wait, WatchFacility, WatchToken};

/// Message from the notify callback (or a cancel handle) into `wait`.
enum Signal {
    Batch(EventBatch),
    Cancelled,
}

/// Watch facility backed by the cross-platform `notify` watcher.
///
/// The underlying `RecommendedWatcher` is kept alive for as long as events
/// are wanted; dropping this facility stops file watching.
///
/// notify reports absolute paths, while the monitor works in (token,
/// relative name) terms. The callback attributes each event path to the
/// registration that owns it and forwards per-token batches over a channel;
/// [`wait`](WatchFacility::wait) is a blocking receive on that channel, and a
/// [`CancelHandle`] unblocks it by injecting a sentinel through the same
/// channel.
pub struct NotifyFacility {
    watcher: RecommendedWatcher,
    rx: Receiver<Signal>,
    tx: Sender<Signal>,
    /// Directory -> token, shared with the notify callback for attribution.
    registrations: Arc<Mutex<HashMap<PathBuf, WatchToken>>>,
    /// Token -> directory, used by `rearm` to probe accessibility.
    paths: HashMap<WatchToken, PathBuf>,
    next_token: u64,
    cancelled: Arc<AtomicBool>,
}

impl std::fmt::Debug for NotifyFacility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotifyFacility")
            .field("paths", &self.paths)
            .finish_non_exhaustive()
    }
}

impl NotifyFacility {
    pub fn new() -> Result<Self> {
        let (tx, rx) = mpsc::channel::<Signal>();
        let registrations: Arc<Mutex<HashMap<PathBuf, WatchToken>>> =
            Arc::new(Mutex::new(HashMap::new()));

        // Closure called synchronously by notify whenever an event arrives.
        let watcher = RecommendedWatcher::new(
            {
                let tx = tx.clone();
                let registrations = Arc::clone(&registrations);
                move |res: notify::Result<Event>| match res {
                    Ok(event) => {
                        for batch in translate(&registrations, event) {
                            if tx.send(Signal::Batch(batch)).is_err() {
                                // Receiver gone; the monitor has stopped.
                                return;
                            }
                        }
                    }
                    Err(err) => {
                        // We can't log via tracing here easily, so fallback to stderr.
                        eprintln!("autoview: file watch error: {err}");
                    }
                }
            },
            Config::default(),
        )
        .context("creating filesystem watcher")?;

        Ok(Self {
            watcher,
            rx,
            tx,
            registrations,
            paths: HashMap::new(),
            next_token: 0,
            cancelled: Arc::new(AtomicBool::new(false)),
        })
    }

    fn lock_registrations(&self) -> MutexGuard<'_, HashMap<PathBuf, WatchToken>> {
        match self.registrations.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl WatchFacility for NotifyFacility {
    fn register(&mut self, path: &Path) -> Result<WatchToken> {
        self.watcher
            .watch(path, RecursiveMode::NonRecursive)
            .with_context(|| format!("registering {:?} with the filesystem watcher", path))?;

        let candidate = WatchToken::from_raw(self.next_token);
        let token = {
            let mut regs = self.lock_registrations();
            match regs.get(path) {
                Some(&existing) => existing,
                None => {
                    regs.insert(path.to_path_buf(), candidate);
                    candidate
                }
            }
        };
        if token == candidate {
            self.next_token += 1;
        }

        self.paths.insert(token, path.to_path_buf());
        Ok(token)
    }

    fn wait(&mut self) -> Wait {
        // The sentinel unblocks the receive; the flag also covers batches
        // that were already queued ahead of it, so nothing is delivered
        // after a cancel.
        if self.cancelled.load(Ordering::SeqCst) {
            return Wait::Cancelled;
        }
        match self.rx.recv() {
            Ok(Signal::Batch(batch)) => {
                if self.cancelled.load(Ordering::SeqCst) {
                    return Wait::Cancelled;
                }
                Wait::Batch(batch)
            }
            Ok(Signal::Cancelled) => Wait::Cancelled,
            // No senders left; nothing further can arrive.
            Err(_) => Wait::Cancelled,
        }
    }

    fn rearm(&mut self, token: WatchToken) -> bool {
        let Some(path) = self.paths.get(&token) else {
            return false;
        };
        if path.is_dir() {
            return true;
        }

        // Directory gone: drop the registration so no further events are
        // attributed to it.
        let path = path.clone();
        let _ = self.watcher.unwatch(&path);
        self.lock_registrations().remove(&path);
        self.paths.remove(&token);
        false
    }

    fn cancel_handle(&self) -> CancelHandle {
        let tx = self.tx.clone();
        let cancelled = Arc::clone(&self.cancelled);
        CancelHandle::new(move || {
            cancelled.store(true, Ordering::SeqCst);
            let _ = tx.send(Signal::Cancelled);
        })
    }
}

/// Map one notify event onto per-token batches.
fn translate(
    registrations: &Arc<Mutex<HashMap<PathBuf, WatchToken>>>,
    event: Event,
) -> Vec<EventBatch> {
    let regs = match registrations.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };

    if event.need_rescan() {
        // The facility lost events and cannot say for which directory; every
        // registration gets the overflow marker.
        return regs
            .values()
            .map(|&token| EventBatch {
                token,
                events: vec![RawEvent::Overflow],
            })
            .collect();
    }

    let created = matches!(event.kind, EventKind::Create(_));

    let mut per_token: HashMap<WatchToken, Vec<RawEvent>> = HashMap::new();
    for path in &event.paths {
        let Some((token, name)) = attribute(&regs, path) else {
            // Path nothing is registered for (e.g. already unwatched).
            continue;
        };
        let raw = match name {
            Some(name) if created => RawEvent::Created { name },
            _ => RawEvent::Other,
        };
        per_token.entry(token).or_default().push(raw);
    }

    per_token
        .into_iter()
        .map(|(token, events)| EventBatch { token, events })
        .collect()
}

/// Find the registration a path belongs to.
///
/// A child entry resolves through its parent directory and yields the entry
/// name; an event on a registered directory itself yields no name, so the
/// loop still wakes for it and the rearm check can observe inaccessibility.
fn attribute(
    regs: &HashMap<PathBuf, WatchToken>,
    path: &Path,
) -> Option<(WatchToken, Option<PathBuf>)> {
    if let Some(parent) = path.parent() {
        if let Some(&token) = regs.get(parent) {
            let name = path.file_name().map(PathBuf::from);
            return Some((token, name));
        }
    }
    regs.get(path).map(|&token| (token, None))
}
