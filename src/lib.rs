// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod logging;
pub mod viewer;
pub mod watch;

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Local;
use tracing::info;

use crate::cli::CliArgs;
use crate::config::{load_and_validate, monitored_dir};
use crate::viewer::ViewerLauncher;
use crate::watch::DirectoryMonitor;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (or the `--dir` override)
/// - monitored-directory resolution and creation
/// - the directory monitor with the viewer-launcher listener
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let dir = resolve_dir(&args)?;

    if args.dry_run {
        println!("{}", dir.display());
        return Ok(());
    }

    fs::create_dir_all(&dir)
        .with_context(|| format!("creating monitored directory {:?}", dir))?;

    let mut monitor = DirectoryMonitor::new(&dir)?;
    monitor.add_listener(Arc::new(ViewerLauncher::new()));

    // Ctrl-C → graceful stop of the blocking loop.
    {
        let cancel = monitor.cancel_handle();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            cancel.cancel();
        });
    }

    // The monitor loop is blocking; host it off the async runtime.
    tokio::task::spawn_blocking(move || monitor.process_events())
        .await
        .context("monitor thread panicked")?;

    info!("autoview exiting");
    Ok(())
}

/// The directory to monitor: `--dir` wins, otherwise config plus today's
/// date-formatted subdirectory.
fn resolve_dir(args: &CliArgs) -> Result<PathBuf> {
    if let Some(dir) = &args.dir {
        return Ok(PathBuf::from(dir));
    }
    let cfg = load_and_validate(&args.config)?;
    Ok(monitored_dir(&cfg, Local::now()))
}
