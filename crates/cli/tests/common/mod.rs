//! Shared test utilities for layercfg integration tests.
//!
//! Invariants / Assumptions:
//! - Every command uses the `LAYERCFG_TEST` variable prefix so host
//!   variables such as `APP_SERVER_PORT` cannot leak into a test.
//! - Logging is left at its default (errors only) so stdout stays parseable.

use assert_cmd::Command;

/// Variable prefix used by every hermetic command.
pub const PREFIX: &str = "LAYERCFG_TEST";

/// Returns a hermetic `layercfg` command for integration testing.
pub fn layercfg_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("layercfg");
    cmd.env("LAYERCFG_ENV_PREFIX", PREFIX)
        .env_remove("RUST_LOG")
        .env_remove("LAYERCFG_LOG_FORMAT");
    cmd
}
