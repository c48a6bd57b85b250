//! Environment variable source.
//!
//! Responsibilities:
//! - Look up environment values by name through the [`EnvSource`] seam.
//! - Derive the variable name of a field from its dotted name.
//!
//! Does NOT handle:
//! - Coercing values (see `coerce`).
//! - `.env` files; callers that want them load them into the process first.
//!
//! Invariants:
//! - Variable name = uppercase(prefix + name with `.` replaced by `_`).
//! - Unset variables yield `None`; a variable set to the empty string is
//!   present and is coerced like any other value.

use std::collections::HashMap;
use std::hash::BuildHasher;

use crate::constants::{ENV_SEPARATOR, PATH_SEPARATOR};

/// Lookup of environment values by variable name.
pub trait EnvSource {
    /// Value of `name`, or `None` when unset.
    fn lookup(&self, name: &str) -> Option<String>;
}

/// Reads the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn lookup(&self, name: &str) -> Option<String> {
        std::env::var_os(name).map(|value| value.to_string_lossy().into_owned())
    }
}

impl<S: BuildHasher> EnvSource for HashMap<String, String, S> {
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Environment variable name for `field` under an already-normalized prefix.
pub(crate) fn env_name(prefix: &str, field: &str) -> String {
    let mut name = String::with_capacity(prefix.len() + field.len());
    name.push_str(prefix);
    name.extend(field.chars().map(|c| {
        if c == PATH_SEPARATOR {
            ENV_SEPARATOR
        } else {
            c
        }
    }));
    name.to_uppercase()
}
