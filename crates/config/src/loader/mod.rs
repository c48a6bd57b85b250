//! Layered configuration loader.
//!
//! Responsibilities:
//! - Hydrate a [`Settings`](crate::Settings) record from defaults, a structured
//!   file, environment variables and flags, in that order.
//! - Derive environment variable and flag names from dotted field names.
//! - Register one clap long option per field for callers building a command.
//!
//! Does NOT handle:
//! - Parsing individual values (see `coerce`).
//! - Semantic validation of the resulting record.
//! - Watching files or reloading.
//!
//! Invariants / Assumptions:
//! - Later sources overwrite earlier ones field by field; absent values leave
//!   the field untouched.
//! - The first failing step aborts the load; fields already written stay
//!   written.
//! - No state from one `load` call is kept on the `Loader`.

mod builder;
mod defaults;
mod env;
mod error;
mod file;
mod flag;

#[cfg(test)]
mod tests;

pub use builder::{Loader, LoaderConfig, Stage};
pub use env::{EnvSource, ProcessEnv};
pub use error::{FileError, LoadError};
pub use file::Format;
pub use flag::FlagSource;
