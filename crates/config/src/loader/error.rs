//! Error types for configuration loading.
//!
//! Responsibilities:
//! - Define error variants for every failure a load can surface.
//! - Attach the stage and field name to coercion failures.
//!
//! Does NOT handle:
//! - Coercion error details (see `coerce/error.rs`).
//!
//! Invariants:
//! - Every `LoadError` message starts with `layercfg: cannot load config`.
//! - Wrapped errors are reachable through `source()` only and are not repeated
//!   in the message; print the whole chain with `{:#}` on `anyhow::Error`.
//! - Values read from the environment or flags are never echoed by the
//!   loader itself; only the coercer quotes the offending input.

use std::path::PathBuf;
use thiserror::Error;

use super::builder::Stage;
use crate::coerce::CoerceError;

/// Errors that can occur while loading a configuration record.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("layercfg: cannot load config: {stage} value for field {field}")]
    Field {
        stage: Stage,
        field: String,
        #[source]
        source: CoerceError,
    },

    #[error("layercfg: cannot load config")]
    File(#[from] FileError),
}

impl LoadError {
    /// Stage that failed.
    pub fn stage(&self) -> Stage {
        match self {
            LoadError::Field { stage, .. } => *stage,
            LoadError::File(_) => Stage::File,
        }
    }
}

/// Errors raised by the file step.
#[derive(Error, Debug)]
pub enum FileError {
    #[error("cannot open config file at {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("file format {extension:?} of {path} isn't supported")]
    UnsupportedFormat { path: PathBuf, extension: String },

    #[error("file parsing error in {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("cannot apply config file at {path}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}
