//! Dynamic values produced by the coercer.

use std::time::Duration;

use super::error::CoerceError;
use super::kind::Kind;

/// A coerced value, not yet stored into a typed field.
///
/// Integers are widened to 64 bits; the width declared by the target
/// [`Kind`] has already been checked by the coercer. Mappings keep their
/// entries in input order so keys of any kind (floats included) are allowed.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    String(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Duration(Duration),
    Sequence(Vec<Value>),
    Mapping(Vec<(Value, Value)>),
}

impl Value {
    /// The zero value of `kind`: `false`, `""`, `0`, an empty aggregate.
    pub fn zero(kind: &Kind) -> Result<Self, CoerceError> {
        Ok(match kind {
            Kind::Bool => Value::Bool(false),
            Kind::String => Value::String(String::new()),
            Kind::Int(_) => Value::Int(0),
            Kind::Uint(_) => Value::Uint(0),
            Kind::Float(_) => Value::Float(0.0),
            Kind::Duration => Value::Duration(Duration::ZERO),
            Kind::Sequence(_) => Value::Sequence(Vec::new()),
            Kind::Mapping(..) => Value::Mapping(Vec::new()),
            Kind::Unsupported(name) => return Err(CoerceError::Unsupported(name)),
        })
    }

    /// Short name of the variant, used in mismatch errors.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::String(_) => "string",
            Value::Int(_) => "signed integer",
            Value::Uint(_) => "unsigned integer",
            Value::Float(_) => "float",
            Value::Duration(_) => "duration",
            Value::Sequence(_) => "sequence",
            Value::Mapping(_) => "mapping",
        }
    }
}
