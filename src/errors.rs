// src/errors.rs

//! Crate-wide error type.
//!
//! Only unrecoverable setup failures surface through this type: config
//! loading, watch-facility creation and the initial directory registration.
//! Everything the monitor loop hits at runtime is absorbed and logged.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AutoviewError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("filesystem watch error: {0}")]
    Watch(#[from] notify::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, AutoviewError>;
