// src/config/validate.rs

use anyhow::{Result, anyhow};
use chrono::format::{Item, StrftimeItems};

use crate::config::model::ConfigFile;

/// Run semantic validation against a loaded configuration.
///
/// This checks:
/// - `base_dir` is non-empty
/// - `sub_dir_format`, when present, is a well-formed strftime string
pub fn validate_config(cfg: &ConfigFile) -> Result<()> {
    validate_base_dir(cfg)?;
    validate_sub_dir_format(cfg)?;
    Ok(())
}

fn validate_base_dir(cfg: &ConfigFile) -> Result<()> {
    if cfg.monitor.base_dir.trim().is_empty() {
        return Err(anyhow!("[monitor].base_dir must not be empty"));
    }
    Ok(())
}

fn validate_sub_dir_format(cfg: &ConfigFile) -> Result<()> {
    let Some(format) = &cfg.monitor.sub_dir_format else {
        return Ok(());
    };

    // chrono reports bad specifiers as `Item::Error` while parsing the
    // format string; rejecting them here keeps formatting at resolve time
    // infallible.
    let invalid = StrftimeItems::new(format).any(|item| matches!(item, Item::Error));
    if invalid {
        return Err(anyhow!(
            "[monitor].sub_dir_format {:?} is not a valid strftime format",
            format
        ));
    }
    Ok(())
}
