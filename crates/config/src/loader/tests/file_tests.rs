//! File stage tests.
//!
//! Responsibilities:
//! - Test JSON, YAML and TOML decoding selected by extension.
//! - Test partial overlays on top of defaults.
//! - Test open, format, parse and decode failures.

use std::collections::BTreeMap;
use std::time::Duration;

use tempfile::TempDir;

use super::{Server, error_chain, vars, write_config};
use crate::loader::builder::{Loader, LoaderConfig, Stage};
use crate::loader::error::{FileError, LoadError};

fn load_file(path: impl Into<std::path::PathBuf>) -> (Server, Result<(), LoadError>) {
    let mut server = Server::default();
    let result = Loader::new(LoaderConfig::default().with_file(path))
        .with_env(vars([]))
        .load(&mut server);
    (server, result)
}

#[test]
fn test_json_overlay_keeps_unlisted_fields() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        dir.path(),
        "server.json",
        r#"{"port": 9000, "timeout": "10s", "tls": {"cert": "c.pem"}, "limits": {"read": 3}}"#,
    );

    let (server, result) = load_file(path);
    result.unwrap();
    assert_eq!(server.port, 9000);
    assert_eq!(server.timeout, Duration::from_secs(10));
    assert_eq!(server.tls.cert, "c.pem");
    assert!(!server.tls.enabled);
    assert_eq!(server.limits, BTreeMap::from([("read".to_string(), 3)]));
    assert_eq!(server.host, "localhost");
    assert_eq!(server.common.tags, vec!["a", "b"]);
}

#[test]
fn test_yaml_with_embedded_keys_at_top_level() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        dir.path(),
        "server.yaml",
        "host: yaml.example\nverbose: true\ntags: [x, y]\ntls:\n  enabled: true\n",
    );

    let (server, result) = load_file(path);
    result.unwrap();
    assert_eq!(server.host, "yaml.example");
    assert!(server.common.verbose);
    assert_eq!(server.common.tags, vec!["x", "y"]);
    assert!(server.tls.enabled);
}

#[test]
fn test_toml_with_integer_seconds() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        dir.path(),
        "server.toml",
        "port = 7000\ntimeout = 30\nratio = 0.25\n\n[tls]\ncert = \"t.pem\"\n",
    );

    let (server, result) = load_file(path);
    result.unwrap();
    assert_eq!(server.port, 7000);
    assert_eq!(server.timeout, Duration::from_secs(30));
    assert_eq!(server.ratio, 0.25);
    assert_eq!(server.tls.cert, "t.pem");
}

#[test]
fn test_extension_is_case_insensitive() {
    let dir = TempDir::new().unwrap();
    let path = write_config(dir.path(), "SERVER.YML", "port: 6000\n");
    let (server, result) = load_file(path);
    result.unwrap();
    assert_eq!(server.port, 6000);
}

#[test]
fn test_null_leaves_value_untouched() {
    let dir = TempDir::new().unwrap();
    let path = write_config(dir.path(), "server.json", r#"{"host": null}"#);
    let (server, result) = load_file(path);
    result.unwrap();
    assert_eq!(server.host, "localhost");
}

#[test]
fn test_only_first_file_is_read() {
    let dir = TempDir::new().unwrap();
    let first = write_config(dir.path(), "first.json", r#"{"port": 1111}"#);
    let second = write_config(dir.path(), "second.json", r#"{"port": 2222, "host": "second"}"#);

    let mut server = Server::default();
    Loader::new(LoaderConfig::default().with_file(first).with_file(second))
        .with_env(vars([]))
        .load(&mut server)
        .unwrap();
    assert_eq!(server.port, 1111);
    assert_eq!(server.host, "localhost");
}

#[test]
fn test_missing_first_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let present = write_config(dir.path(), "present.json", r#"{"port": 2222}"#);

    let mut server = Server::default();
    let err = Loader::new(
        LoaderConfig::default()
            .with_file(dir.path().join("missing.json"))
            .with_file(present),
    )
    .with_env(vars([]))
    .load(&mut server)
    .unwrap_err();

    assert_eq!(err.stage(), Stage::File);
    assert!(matches!(err, LoadError::File(FileError::Open { .. })));
    assert!(error_chain(&err).starts_with("layercfg: cannot load config: cannot open config file"));
    // defaults already ran
    assert_eq!(server.port, 8080);
}

#[test]
fn test_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let path = write_config(dir.path(), "server.ini", "port=1\n");
    let (_, result) = load_file(path);

    match result.unwrap_err() {
        LoadError::File(FileError::UnsupportedFormat { extension, .. }) => {
            assert_eq!(extension, ".ini");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_malformed_document_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = write_config(dir.path(), "server.json", r#"{"port": "#);
    let (_, result) = load_file(path);
    assert!(matches!(
        result.unwrap_err(),
        LoadError::File(FileError::Parse { .. })
    ));
}

#[test]
fn test_type_mismatch_is_a_decode_error() {
    let dir = TempDir::new().unwrap();
    let path = write_config(dir.path(), "server.yaml", "port: eighty\n");
    let (server, result) = load_file(path);
    assert!(matches!(
        result.unwrap_err(),
        LoadError::File(FileError::Decode { .. })
    ));
    assert_eq!(server.port, 8080);
}

#[test]
fn test_env_overrides_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(dir.path(), "server.json", r#"{"port": 9000, "host": "file"}"#);

    let mut server = Server::default();
    Loader::new(LoaderConfig::default().with_env_prefix("APP").with_file(path))
        .with_env(vars([("APP_PORT", "9001")]))
        .load(&mut server)
        .unwrap();
    assert_eq!(server.port, 9001);
    assert_eq!(server.host, "file");
}

#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
struct Gauge {
    name: String,
    ratio: f64,
    floor: f32,
}

crate::impl_settings!(Gauge {
    name = "x",
    ratio = "inf",
    floor = "NaN",
});

#[test]
fn test_non_finite_defaults_survive_file_overlay() {
    let dir = TempDir::new().unwrap();
    let path = write_config(dir.path(), "gauge.json", r#"{"name": "fromfile"}"#);

    let mut gauge = Gauge::default();
    Loader::new(LoaderConfig::default().with_file(path))
        .with_env(vars([]))
        .load(&mut gauge)
        .unwrap();
    assert_eq!(gauge.name, "fromfile");
    assert_eq!(gauge.ratio, f64::INFINITY);
    assert!(gauge.floor.is_nan());
}

#[test]
fn test_file_can_set_non_finite_float() {
    let dir = TempDir::new().unwrap();
    let path = write_config(dir.path(), "gauge.yaml", "ratio: -.inf\n");

    let mut gauge = Gauge::default();
    Loader::new(LoaderConfig::default().with_file(path))
        .with_env(vars([]))
        .load(&mut gauge)
        .unwrap();
    assert_eq!(gauge.name, "x");
    assert_eq!(gauge.ratio, f64::NEG_INFINITY);
}
