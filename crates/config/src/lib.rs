//! Layered configuration loading for typed records.
//!
//! This crate hydrates a strongly-typed configuration record from built-in
//! defaults, a structured file, environment variables and command-line flags,
//! applied in that order so later sources override earlier ones field by
//! field.

pub mod coerce;
mod constants;
mod loader;
mod schema;
pub mod serde_duration;

pub use coerce::{
    CoerceError, DurationError, FloatWidth, IntWidth, Kind, Setting, Slot, UintWidth, Value,
    format_duration, parse_duration,
};
pub use loader::{
    EnvSource, FileError, FlagSource, Format, LoadError, Loader, LoaderConfig, ProcessEnv, Stage,
};
pub use schema::{Field, FieldInfo, FieldSet, Settings};

#[cfg(test)]
pub(crate) mod test_util {
    use std::sync::{Mutex, OnceLock};

    pub fn global_test_lock() -> &'static Mutex<()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
    }
}
