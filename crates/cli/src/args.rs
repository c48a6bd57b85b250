//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the fixed options using clap derive macros.
//! - Translate them into a [`LoaderConfig`].
//!
//! Non-responsibilities:
//! - Does not define the per-field flags; those are registered at runtime
//!   from the configuration record (see `main.rs`).

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use layercfg::{LoaderConfig, Stage};

/// Environment variable selecting the prefix of configuration variables.
pub const ENV_PREFIX_VAR: &str = "LAYERCFG_ENV_PREFIX";

/// Prefix used when neither `--env-prefix` nor the variable is set.
pub const DEFAULT_ENV_PREFIX: &str = "APP";

#[derive(Parser, Debug)]
#[command(name = "layercfg")]
#[command(about = "Resolve layered configuration from defaults, a file, the environment and flags", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  layercfg --config app.yaml\n  APP_SERVER_PORT=9000 layercfg --format yaml\n  layercfg --server.port 9100 --no-env\n  layercfg --list-fields\n"
)]
pub struct Cli {
    /// Configuration file (JSON, YAML or TOML). Only the first one is read.
    #[arg(short, long = "config", value_name = "FILE")]
    pub config: Vec<PathBuf>,

    /// Prefix of configuration environment variables
    #[arg(long, env = ENV_PREFIX_VAR, default_value = DEFAULT_ENV_PREFIX)]
    pub env_prefix: String,

    /// Output format of the resolved configuration
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// List configurable fields with their variable and flag names instead of loading
    #[arg(long)]
    pub list_fields: bool,

    /// Do not apply built-in defaults
    #[arg(long)]
    pub no_defaults: bool,

    /// Do not read configuration files
    #[arg(long)]
    pub no_file: bool,

    /// Do not read environment variables
    #[arg(long)]
    pub no_env: bool,

    /// Do not apply field flags
    #[arg(long)]
    pub no_flags: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
}

impl Cli {
    /// Loader options selected on the command line.
    pub fn loader_config(&self) -> LoaderConfig {
        let mut config = LoaderConfig::default().with_env_prefix(self.env_prefix.clone());
        for path in &self.config {
            config = config.with_file(path);
        }

        let disabled = [
            (self.no_defaults, Stage::Defaults),
            (self.no_file, Stage::File),
            (self.no_env, Stage::Environment),
            (self.no_flags, Stage::Flag),
        ];
        for (skip, stage) in disabled {
            if skip {
                config = config.skip(stage);
            }
        }
        config
    }
}

/// Prefix used to name variables in `--help`, before arguments are parsed.
pub fn env_prefix_hint() -> String {
    std::env::var(ENV_PREFIX_VAR).unwrap_or_else(|_| DEFAULT_ENV_PREFIX.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loader_config_from_flags() {
        let cli = Cli::try_parse_from([
            "layercfg",
            "--env-prefix",
            "SVC",
            "-c",
            "a.yaml",
            "--config",
            "b.json",
            "--no-env",
        ])
        .unwrap();
        let config = cli.loader_config();

        assert_eq!(config.env_prefix, "SVC");
        assert_eq!(config.files, [PathBuf::from("a.yaml"), PathBuf::from("b.json")]);
        assert!(config.is_skipped(Stage::Environment));
        assert!(!config.is_skipped(Stage::Defaults));
        assert!(!config.is_skipped(Stage::File));
        assert!(!config.is_skipped(Stage::Flag));
    }

    #[test]
    fn test_format_values() {
        let cli = Cli::try_parse_from(["layercfg", "--format", "yaml"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Yaml);
        assert!(Cli::try_parse_from(["layercfg", "--format", "xml"]).is_err());
    }
}
