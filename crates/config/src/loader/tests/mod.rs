//! Tests for the layered loader.
//!
//! Responsibilities:
//! - Test stage precedence and disabled stages.
//! - Test environment and flag naming and lookup.
//! - Test file decoding, merging and failure modes.
//!
//! Invariants:
//! - Tests touching the process environment use `serial_test` and
//!   `env_lock()`; the rest inject a `HashMap` environment.
//! - Temporary files are created with `tempfile`.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub mod file_tests;

/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tls {
    pub enabled: bool,
    pub cert: String,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Common {
    pub verbose: bool,
    pub tags: Vec<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Server {
    pub host: String,
    pub port: u16,
    #[serde(with = "crate::serde_duration")]
    pub timeout: Duration,
    pub ratio: f64,
    pub limits: BTreeMap<String, u32>,
    pub tls: Tls,
    #[serde(flatten)]
    pub common: Common,
    pub runtime_id: u64,
}

crate::impl_settings!(Tls { enabled = "false", cert });
crate::impl_settings!(Common { verbose, tags = "a, b" });
crate::impl_settings!(Server {
    host = "localhost",
    port = "8080",
    timeout = "5s",
    ratio = "0.5",
    limits,
    tls: nested,
    common: embedded,
    runtime_id: skip,
});

/// Map-backed environment or flag set.
pub fn vars<const N: usize>(pairs: [(&str, &str); N]) -> HashMap<String, String> {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Render `err` and its sources the way `{:#}` does on `anyhow::Error`.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    std::iter::successors(Some(err), |e| e.source())
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(": ")
}

/// Write `contents` to `dir/name` and return the path.
pub fn write_config(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}
