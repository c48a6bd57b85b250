//! Configuration record resolved by the CLI.
//!
//! Field flags, environment variables and file keys are all derived from this
//! record: `server.port` is `--server.port`, `APP_SERVER_PORT` and
//! `server: { port: ... }` in a file.

use std::collections::BTreeMap;
use std::time::Duration;

use layercfg::impl_settings;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(flatten)]
    pub logging: LoggingConfig,
    /// Feature switches enabled for this deployment.
    pub features: Vec<String>,
    /// Per-tenant request limits.
    pub limits: BTreeMap<String, u32>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(with = "layercfg::serde_duration")]
    pub read_timeout: Duration,
    pub tls: TlsConfig,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TlsConfig {
    pub enabled: bool,
    pub cert_file: String,
    pub key_file: String,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    #[serde(with = "layercfg::serde_duration")]
    pub idle_timeout: Duration,
}

/// Logging options, configured at the top level of the record.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub log_level: String,
    pub log_sample_rate: f64,
}

impl_settings!(AppConfig {
    server: nested,
    database: nested,
    logging: embedded,
    features,
    limits,
});

impl_settings!(ServerConfig {
    host = "127.0.0.1",
    port = "8080",
    read_timeout = "30s",
    tls: nested,
});

impl_settings!(TlsConfig {
    enabled = "false",
    cert_file,
    key_file,
});

impl_settings!(DatabaseConfig {
    url = "postgres://localhost:5432/app",
    max_connections = "10",
    idle_timeout = "5m",
});

impl_settings!(LoggingConfig {
    log_level = "info",
    log_sample_rate = "1.0",
});
