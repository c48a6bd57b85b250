//! Command-line flag source.
//!
//! Responsibilities:
//! - Look up supplied flag values through the [`FlagSource`] seam.
//! - Derive the flag name of a field from its dotted name.
//! - Build the clap argument registered for a field.
//!
//! Does NOT handle:
//! - Parsing the command line; callers hand the loader an already-parsed
//!   flag set, so no process-wide parse state is involved.
//!
//! Invariants:
//! - Flag name = lowercase(prefix + dotted name).
//! - Only values the user supplied count; clap defaults are ignored because
//!   defaults are owned by the defaults step.

use std::collections::HashMap;
use std::hash::BuildHasher;

use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches};

use crate::coerce::Kind;
use crate::schema::FieldInfo;

/// Lookup of supplied flag values by flag name.
pub trait FlagSource {
    /// Value supplied for `name`, or `None` when the flag is unknown or was
    /// not given.
    fn lookup(&self, name: &str) -> Option<String>;
}

impl FlagSource for ArgMatches {
    fn lookup(&self, name: &str) -> Option<String> {
        // Unknown ids are an error from `try_get_raw`, not a panic.
        let raw = self.try_get_raw(name).ok()??;
        if self.value_source(name) == Some(ValueSource::DefaultValue) {
            return None;
        }
        raw.last().map(|value| value.to_string_lossy().into_owned())
    }
}

impl<S: BuildHasher> FlagSource for HashMap<String, String, S> {
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Flag name for `field` under an already-normalized prefix.
pub(crate) fn flag_name(prefix: &str, field: &str) -> String {
    format!("{prefix}{field}").to_lowercase()
}

/// Long option taking one value, named after the field's flag.
pub(crate) fn field_arg(info: &FieldInfo) -> Arg {
    let mut help = format!("{} (env {})", info.kind, info.env);
    if !info.default.is_empty() {
        help.push_str(&format!(" [default: {}]", info.default));
    }
    Arg::new(info.flag.clone())
        .long(info.flag.clone())
        .value_name(value_name(&info.kind))
        .action(ArgAction::Set)
        .allow_hyphen_values(true)
        .help(help)
}

fn value_name(kind: &Kind) -> &'static str {
    match kind {
        Kind::Bool => "BOOL",
        Kind::String => "STRING",
        Kind::Int(_) | Kind::Uint(_) => "INT",
        Kind::Float(_) => "FLOAT",
        Kind::Duration => "DURATION",
        Kind::Sequence(_) => "LIST",
        Kind::Mapping(..) => "MAP",
        Kind::Unsupported(_) => "VALUE",
    }
}
