// src/config/model.rs

use serde::Deserialize;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [monitor]
/// base_dir = "/var/spool/scans"
/// sub_dir_format = "%Y-%m-%d"
/// ```
///
/// With `sub_dir_format` set, the monitored directory is a per-date
/// subdirectory of `base_dir` (here `/var/spool/scans/2026-08-07`); without
/// it, `base_dir` itself is monitored.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    /// Settings for the monitored location from `[monitor]`.
    pub monitor: MonitorSection,
}

/// `[monitor]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct MonitorSection {
    /// Directory under which new files arrive.
    pub base_dir: String,

    /// Optional `strftime` format for a per-date subdirectory of `base_dir`,
    /// e.g. `"%Y-%m-%d"` or `"%Y/%m/%d"`.
    #[serde(default)]
    pub sub_dir_format: Option<String>,
}
