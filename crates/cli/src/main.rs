//! layercfg - resolve a layered configuration and print it.
//!
//! Responsibilities:
//! - Parse the fixed options plus one flag per configuration field.
//! - Run the loader over defaults, file, environment and flags.
//! - Print the resolved record (JSON or YAML) or the field listing.
//!
//! Does NOT handle:
//! - Loading logic (see the `layercfg` library).
//!
//! Invariants:
//! - Logs go to stderr; stdout carries only the requested output.
//! - Field flags are registered before parsing so `--help` lists them.

mod args;
mod error;
mod settings;

use anyhow::Result;
use clap::{CommandFactory, FromArgMatches};
use layercfg::{FieldInfo, Loader, LoaderConfig};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use args::{Cli, OutputFormat, env_prefix_hint};
use error::ExitCodeExt;
use settings::AppConfig;

/// Selects JSON log lines when set to `json`.
const LOG_FORMAT_VAR: &str = "LAYERCFG_LOG_FORMAT";

fn main() {
    init_logging();

    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(e.exit_code().as_i32());
    }
}

fn init_logging() {
    let json = std::env::var(LOG_FORMAT_VAR).is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    let registry = tracing_subscriber::registry().with(EnvFilter::from_default_env());
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }
}

fn run() -> Result<()> {
    // Flag names do not depend on the env prefix; only the help text does.
    let naming = Loader::new(LoaderConfig::default().with_env_prefix(env_prefix_hint()));
    let matches = naming
        .register_flags::<AppConfig>(Cli::command())
        .get_matches();
    let cli = Cli::from_arg_matches(&matches)?;

    let loader = Loader::new(cli.loader_config()).with_flags(matches);
    tracing::debug!(?loader, "loader configured");

    if cli.list_fields {
        print_fields(&loader.fields::<AppConfig>());
        return Ok(());
    }

    let mut config = AppConfig::default();
    loader.load(&mut config)?;
    tracing::info!(files = cli.config.len(), "configuration resolved");

    let rendered = match cli.format {
        OutputFormat::Json => serde_json::to_string_pretty(&config)?,
        OutputFormat::Yaml => serde_yaml::to_string(&config)?,
    };
    println!("{}", rendered.trim_end());
    Ok(())
}

fn print_fields(fields: &[FieldInfo]) {
    let rows: Vec<[String; 5]> = fields
        .iter()
        .map(|f| {
            [
                f.name.clone(),
                f.env.clone(),
                format!("--{}", f.flag),
                f.kind.to_string(),
                f.default.clone(),
            ]
        })
        .collect();
    let header = ["FIELD", "ENV", "FLAG", "KIND", "DEFAULT"].map(String::from);

    let mut widths = header.each_ref().map(String::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    for row in std::iter::once(&header).chain(&rows) {
        let line = row
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:width$}"))
            .collect::<Vec<_>>()
            .join("  ");
        println!("{}", line.trim_end());
    }
}
