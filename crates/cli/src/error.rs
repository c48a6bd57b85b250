//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map `LoadError` variants to exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by the error's Display).
//!
//! Invariants:
//! - Exit code 2 means the configuration file could not be used.
//! - Exit code 3 means a field value could not be coerced.

use layercfg::LoadError;

/// Structured exit codes for `layercfg`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - configuration resolved.
    #[allow(dead_code)]
    Success = 0,

    /// General error - unhandled or generic failure.
    GeneralError = 1,

    /// Configuration file missing, unreadable or malformed.
    FileError = 2,

    /// A default, environment variable or flag held an invalid value.
    InvalidValue = 3,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&LoadError> for ExitCode {
    fn from(err: &LoadError) -> Self {
        match err {
            LoadError::File(_) => ExitCode::FileError,
            LoadError::Field { .. } => ExitCode::InvalidValue,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Extract the appropriate exit code from this error.
    ///
    /// Returns ExitCode::GeneralError if no `LoadError` is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        self.chain()
            .find_map(|cause| cause.downcast_ref::<LoadError>())
            .map(ExitCode::from)
            .unwrap_or(ExitCode::GeneralError)
    }
}
