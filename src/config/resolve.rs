// src/config/resolve.rs

use std::path::PathBuf;

use chrono::{DateTime, Local};

use crate::config::model::ConfigFile;

/// Compute the directory to monitor for the given point in time.
///
/// With `sub_dir_format` set, the monitored directory is
/// `base_dir/<formatted date>`; otherwise it is `base_dir` itself. The
/// format must have passed [`validate_config`](crate::config::validate::validate_config).
/// The directory is not created here; that is up to the caller.
pub fn monitored_dir(cfg: &ConfigFile, now: DateTime<Local>) -> PathBuf {
    let base = PathBuf::from(&cfg.monitor.base_dir);
    match &cfg.monitor.sub_dir_format {
        Some(format) => base.join(now.format(format).to_string()),
        None => base,
    }
}
