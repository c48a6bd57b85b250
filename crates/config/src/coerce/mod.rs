//! Value coercion: turning source strings into typed field values.
//!
//! Responsibilities:
//! - Dispatch on the declared [`Kind`] of a leaf and parse the source string.
//! - Handle delimited aggregates (`a, b, c` sequences and `k:v, k2:v2` mappings)
//!   by re-entering [`coerce`] for every element, key and value.
//! - Write the result into a [`Slot`].
//!
//! Does NOT handle:
//! - Deciding which string applies to which field (see `loader`).
//! - Decoding structured files; those bypass the coercer entirely.
//!
//! Invariants:
//! - Strings are assigned verbatim; every other scalar is parsed base-10.
//! - Integers are range-checked against the declared width.
//! - Aggregate items are trimmed before coercion; the top-level string is not.

mod duration;
mod error;
mod kind;
mod setting;
mod value;

pub use duration::{DurationError, format_duration, parse_duration};
pub use error::CoerceError;
pub use kind::{FloatWidth, IntWidth, Kind, UintWidth};
pub use setting::{Setting, Slot};
pub use value::Value;

use crate::constants::{ENTRY_DELIMITER, ITEM_DELIMITER};

/// Coerce `raw` and store the result into `slot`.
pub fn set_from_str(slot: &mut dyn Slot, raw: &str) -> Result<(), CoerceError> {
    let value = coerce(&slot.kind(), raw)?;
    slot.assign(value)
}

/// Convert `raw` into a [`Value`] of the given kind.
pub fn coerce(kind: &Kind, raw: &str) -> Result<Value, CoerceError> {
    match kind {
        Kind::Bool => parse_bool(raw)
            .map(Value::Bool)
            .ok_or_else(|| CoerceError::malformed(kind, raw, "expected true or false")),
        Kind::String => Ok(Value::String(raw.to_string())),
        Kind::Int(width) => parse_int(*width, raw).map(Value::Int),
        Kind::Uint(width) => parse_uint(*width, raw).map(Value::Uint),
        Kind::Float(width) => parse_float(*width, raw).map(Value::Float),
        Kind::Duration => parse_duration(raw)
            .map(Value::Duration)
            .map_err(|e| CoerceError::malformed(kind, raw, e)),
        Kind::Sequence(element) => coerce_sequence(element, raw),
        Kind::Mapping(key, value) => coerce_mapping(key, value, raw),
        Kind::Unsupported(name) => Err(CoerceError::Unsupported(name)),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

fn parse_int(width: IntWidth, raw: &str) -> Result<i64, CoerceError> {
    let kind = Kind::Int(width);
    let value: i64 = raw
        .parse()
        .map_err(|e| CoerceError::malformed(&kind, raw, e))?;
    let fits = match width {
        IntWidth::I8 => i8::try_from(value).is_ok(),
        IntWidth::I16 => i16::try_from(value).is_ok(),
        IntWidth::I32 => i32::try_from(value).is_ok(),
        IntWidth::I64 => true,
        IntWidth::Isize => isize::try_from(value).is_ok(),
    };
    if !fits {
        return Err(CoerceError::malformed(&kind, raw, "value out of range"));
    }
    Ok(value)
}

fn parse_uint(width: UintWidth, raw: &str) -> Result<u64, CoerceError> {
    let kind = Kind::Uint(width);
    let value: u64 = raw
        .parse()
        .map_err(|e| CoerceError::malformed(&kind, raw, e))?;
    let fits = match width {
        UintWidth::U8 => u8::try_from(value).is_ok(),
        UintWidth::U16 => u16::try_from(value).is_ok(),
        UintWidth::U32 => u32::try_from(value).is_ok(),
        UintWidth::U64 => true,
        UintWidth::Usize => usize::try_from(value).is_ok(),
    };
    if !fits {
        return Err(CoerceError::malformed(&kind, raw, "value out of range"));
    }
    Ok(value)
}

fn parse_float(width: FloatWidth, raw: &str) -> Result<f64, CoerceError> {
    let kind = Kind::Float(width);
    match width {
        FloatWidth::F32 => raw.parse::<f32>().map(f64::from),
        FloatWidth::F64 => raw.parse::<f64>(),
    }
    .map_err(|e| CoerceError::malformed(&kind, raw, e))
}

fn coerce_sequence(element: &Kind, raw: &str) -> Result<Value, CoerceError> {
    raw.split(ITEM_DELIMITER)
        .map(str::trim)
        .enumerate()
        .map(|(index, item)| {
            coerce(element, item).map_err(|source| CoerceError::SequenceItem {
                index,
                item: item.to_string(),
                source: Box::new(source),
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Value::Sequence)
}

fn coerce_mapping(key_kind: &Kind, value_kind: &Kind, raw: &str) -> Result<Value, CoerceError> {
    let mut entries = Vec::new();
    for entry in raw.split(ITEM_DELIMITER) {
        let Some((key, value)) = entry.split_once(ENTRY_DELIMITER) else {
            return Err(CoerceError::MapEntry(entry.to_string()));
        };
        let (key, value) = (key.trim(), value.trim());

        let coerced_key = coerce(key_kind, key).map_err(|source| CoerceError::MapKey {
            key: key.to_string(),
            source: Box::new(source),
        })?;
        let coerced_value = coerce(value_kind, value).map_err(|source| CoerceError::MapValue {
            key: key.to_string(),
            value: value.to_string(),
            source: Box::new(source),
        })?;
        entries.push((coerced_key, coerced_value));
    }
    Ok(Value::Mapping(entries))
}
