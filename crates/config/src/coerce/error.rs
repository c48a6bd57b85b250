//! Error types for value coercion.
//!
//! Invariants:
//! - Aggregate variants box the inner error and expose it only as `source()`;
//!   the message names the element, key or value and leaves the cause to the
//!   chain.
//! - Messages quote the offending input; the orchestrator decides whether the
//!   field name or variable name is attached.

use thiserror::Error;

use super::kind::Kind;

/// Errors produced while converting a source string into a field value.
#[derive(Error, Debug)]
pub enum CoerceError {
    #[error("type kind {0:?} isn't supported")]
    Unsupported(&'static str),

    #[error("invalid {kind} value {value:?}: {reason}")]
    Malformed {
        kind: String,
        value: String,
        reason: String,
    },

    #[error("incorrect slice item {item:?} at index {index}")]
    SequenceItem {
        index: usize,
        item: String,
        #[source]
        source: Box<CoerceError>,
    },

    #[error("incorrect map item {0:?}: expected key{sep}value", sep = crate::constants::ENTRY_DELIMITER)]
    MapEntry(String),

    #[error("incorrect map key {key:?}")]
    MapKey {
        key: String,
        #[source]
        source: Box<CoerceError>,
    },

    #[error("incorrect map value {value:?} for key {key:?}")]
    MapValue {
        key: String,
        value: String,
        #[source]
        source: Box<CoerceError>,
    },

    #[error("cannot store {found} value into {expected} field")]
    Mismatch { expected: String, found: String },
}

impl CoerceError {
    pub(crate) fn malformed(kind: &Kind, value: &str, reason: impl ToString) -> Self {
        CoerceError::Malformed {
            kind: kind.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn mismatch(expected: &Kind, found: impl ToString) -> Self {
        CoerceError::Mismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }
}
