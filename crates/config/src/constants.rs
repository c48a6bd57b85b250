//! Centralized constants for the layercfg workspace.
//!
//! Separators, delimiters and file extensions that the naming rules and the
//! coercer share live here so they stay in one place.

// =============================================================================
// Naming
// =============================================================================

/// Joins path segments of nested fields (`server.tls.cert`).
pub const PATH_SEPARATOR: char = '.';

/// Appended once to a non-empty environment prefix, and used in place of
/// [`PATH_SEPARATOR`] inside environment variable names.
pub const ENV_SEPARATOR: char = '_';

/// Appended once to a non-empty flag prefix.
pub const FLAG_SEPARATOR: char = '.';

// =============================================================================
// Aggregate Syntax
// =============================================================================

/// Separates sequence items and mapping entries.
pub const ITEM_DELIMITER: char = ',';

/// Separates a mapping key from its value (first occurrence only).
pub const ENTRY_DELIMITER: char = ':';

// =============================================================================
// File Formats
// =============================================================================

/// Extensions (lowercase, without the dot) decoded as JSON.
pub const JSON_EXTENSIONS: &[&str] = &["json"];

/// Extensions (lowercase, without the dot) decoded as YAML.
pub const YAML_EXTENSIONS: &[&str] = &["yaml", "yml"];

/// Extensions (lowercase, without the dot) decoded as TOML.
pub const TOML_EXTENSIONS: &[&str] = &["toml"];
