//! Structured file source.
//!
//! Responsibilities:
//! - Pick a decoder from the file extension (case-insensitive).
//! - Decode the file and overlay it onto the record as a whole.
//!
//! Does NOT handle:
//! - Per-field coercion; the decoder's own type mapping applies, so duration
//!   fields need a serde adapter such as [`crate::serde_duration`].
//!
//! Invariants:
//! - Only the first configured file is consulted. Failing to open it is an
//!   error; once it decodes, later entries are ignored.
//! - Keys absent from the file keep the record's current values; mappings are
//!   merged key by key and `null` leaves a value untouched.
//! - The merge document is a YAML value, which keeps non-finite floats that a
//!   JSON document would turn into `null`.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_yaml::Value;

use super::error::FileError;
use crate::constants::{JSON_EXTENSIONS, TOML_EXTENSIONS, YAML_EXTENSIONS};

/// Structured file formats the loader can decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
    Toml,
}

impl Format {
    /// Format selected by the extension of `path`.
    pub fn from_path(path: &Path) -> Result<Self, FileError> {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        if JSON_EXTENSIONS.contains(&extension.as_str()) {
            Ok(Format::Json)
        } else if YAML_EXTENSIONS.contains(&extension.as_str()) {
            Ok(Format::Yaml)
        } else if TOML_EXTENSIONS.contains(&extension.as_str()) {
            Ok(Format::Toml)
        } else {
            Err(FileError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension: format!(".{extension}"),
            })
        }
    }

    /// Decode `bytes` into a format-neutral document.
    pub fn decode(self, bytes: &[u8]) -> Result<Value, String> {
        match self {
            Format::Json => serde_json::from_slice::<Value>(bytes).map_err(|e| e.to_string()),
            Format::Yaml => serde_yaml::from_slice(bytes).map_err(|e| e.to_string()),
            Format::Toml => {
                let text = std::str::from_utf8(bytes).map_err(|e| e.to_string())?;
                toml::from_str::<Value>(text).map_err(|e| e.to_string())
            }
        }
    }
}

/// Overlay the first file in `files` onto `into`.
///
/// Returns the path that was applied, or `None` when no files are configured.
pub(crate) fn apply_file<T>(files: &[PathBuf], into: &mut T) -> Result<Option<PathBuf>, FileError>
where
    T: Serialize + DeserializeOwned,
{
    let Some(path) = files.first() else {
        return Ok(None);
    };

    let bytes = std::fs::read(path).map_err(|source| FileError::Open {
        path: path.clone(),
        source,
    })?;
    let format = Format::from_path(path)?;
    let overlay = format.decode(&bytes).map_err(|message| FileError::Parse {
        path: path.clone(),
        message,
    })?;

    let decode_error = |source| FileError::Decode {
        path: path.clone(),
        source,
    };
    let mut current = serde_yaml::to_value(&*into).map_err(decode_error)?;
    merge(&mut current, overlay);
    *into = serde_yaml::from_value(current).map_err(decode_error)?;

    if files.len() > 1 {
        tracing::debug!(
            path = %path.display(),
            ignored = files.len() - 1,
            "config file applied; remaining files ignored"
        );
    }
    Ok(Some(path.clone()))
}

/// Deep-merge `overlay` into `base`.
fn merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (_, Value::Null) => {}
        (Value::Mapping(base), Value::Mapping(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn doc(yaml: &str) -> Value {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_format_from_extension_is_case_insensitive() {
        assert_eq!(Format::from_path(Path::new("a.json")).unwrap(), Format::Json);
        assert_eq!(Format::from_path(Path::new("a.YAML")).unwrap(), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("a.Yml")).unwrap(), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("dir/a.toml")).unwrap(), Format::Toml);
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let err = Format::from_path(Path::new("config.ini")).unwrap_err();
        assert!(matches!(
            err,
            FileError::UnsupportedFormat { ref extension, .. } if extension == ".ini"
        ));
        assert!(Format::from_path(Path::new("config")).is_err());
    }

    #[test]
    fn test_decode_each_format_to_same_document() {
        let expected = doc("server: {host: example.com, port: 8080}");
        assert_eq!(
            Format::Json
                .decode(br#"{"server": {"host": "example.com", "port": 8080}}"#)
                .unwrap(),
            expected
        );
        assert_eq!(
            Format::Yaml
                .decode(b"server:\n  host: example.com\n  port: 8080\n")
                .unwrap(),
            expected
        );
        assert_eq!(
            Format::Toml
                .decode(b"[server]\nhost = \"example.com\"\nport = 8080\n")
                .unwrap(),
            expected
        );
    }

    #[test]
    fn test_decode_reports_syntax_errors() {
        assert!(Format::Json.decode(b"{not json").is_err());
        assert!(Format::Toml.decode(b"= broken").is_err());
        assert!(Format::Toml.decode(&[0xff, 0xfe]).is_err());
    }

    #[test]
    fn test_merge_keeps_absent_keys_and_ignores_null() {
        let mut base = doc(
            "name: demo\n\
             server: {host: localhost, port: 80}\n\
             tags: [a, b]\n\
             labels: {team: core}\n",
        );
        merge(
            &mut base,
            doc(
                "server: {port: 8080}\n\
                 tags: [c]\n\
                 labels: {tier: gold}\n\
                 name: null\n",
            ),
        );
        assert_eq!(
            base,
            doc(
                "name: demo\n\
                 server: {host: localhost, port: 8080}\n\
                 tags: [c]\n\
                 labels: {team: core, tier: gold}\n",
            )
        );
    }

    #[test]
    fn test_merge_keeps_non_finite_floats() {
        let mut base = serde_yaml::to_value(BTreeMap::from([
            ("ratio", f64::INFINITY),
            ("floor", f64::NEG_INFINITY),
        ]))
        .unwrap();
        merge(&mut base, doc("floor: -1.5\n"));

        let merged: BTreeMap<String, f64> = serde_yaml::from_value(base).unwrap();
        assert_eq!(merged["ratio"], f64::INFINITY);
        assert_eq!(merged["floor"], -1.5);
    }
}
