// src/watch/mod.rs

//! Directory monitoring.
//!
//! This module is responsible for:
//! - The seam to the platform filesystem-event facility (`facility`).
//! - The `notify`-backed implementation of that seam (`watcher`).
//! - Listener registration and ordered fan-out (`listener`).
//! - The blocking monitor loop tying those together (`monitor`).
//!
//! It does **not** know how the monitored directory is chosen or what a
//! listener does with a created file.

pub mod facility;
pub mod listener;
pub mod monitor;
pub mod watcher;

pub use facility::{CancelHandle, EventBatch, RawEvent, Wait, WatchFacility, WatchToken};
pub use listener::{DirectoryListener, ListenerRegistry};
pub use monitor::DirectoryMonitor;
pub use watcher::NotifyFacility;
