//! Type kinds understood by the coercer.
//!
//! Responsibilities:
//! - Describe the declared type of a leaf field as a closed set of variants.
//! - Render kinds for error messages and field listings.
//!
//! Does NOT handle:
//! - Parsing strings (see `coerce/mod.rs`).
//! - Storing values into fields (see `coerce/setting.rs`).

use std::fmt;

/// Width of a signed integer field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntWidth {
    I8,
    I16,
    I32,
    I64,
    Isize,
}

/// Width of an unsigned integer field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UintWidth {
    U8,
    U16,
    U32,
    U64,
    Usize,
}

/// Width of a floating point field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatWidth {
    F32,
    F64,
}

/// Declared kind of a leaf field.
///
/// Aggregates carry the kinds of their elements so the coercer can recurse
/// into them with the same entry point it uses for scalars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Kind {
    Bool,
    String,
    Int(IntWidth),
    Uint(UintWidth),
    Float(FloatWidth),
    Duration,
    Sequence(Box<Kind>),
    Mapping(Box<Kind>, Box<Kind>),
    /// A kind with no coercion rule; the name is reported in errors.
    Unsupported(&'static str),
}

impl Kind {
    /// Shorthand for `Kind::Sequence(Box::new(element))`.
    pub fn sequence(element: Kind) -> Self {
        Kind::Sequence(Box::new(element))
    }

    /// Shorthand for `Kind::Mapping(Box::new(key), Box::new(value))`.
    pub fn mapping(key: Kind, value: Kind) -> Self {
        Kind::Mapping(Box::new(key), Box::new(value))
    }

    /// Whether values of this kind are delimited aggregates.
    pub fn is_aggregate(&self) -> bool {
        matches!(self, Kind::Sequence(_) | Kind::Mapping(..))
    }
}

impl fmt::Display for IntWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IntWidth::I8 => "i8",
            IntWidth::I16 => "i16",
            IntWidth::I32 => "i32",
            IntWidth::I64 => "i64",
            IntWidth::Isize => "isize",
        })
    }
}

impl fmt::Display for UintWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UintWidth::U8 => "u8",
            UintWidth::U16 => "u16",
            UintWidth::U32 => "u32",
            UintWidth::U64 => "u64",
            UintWidth::Usize => "usize",
        })
    }
}

impl fmt::Display for FloatWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FloatWidth::F32 => "f32",
            FloatWidth::F64 => "f64",
        })
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Bool => f.write_str("bool"),
            Kind::String => f.write_str("string"),
            Kind::Int(width) => width.fmt(f),
            Kind::Uint(width) => width.fmt(f),
            Kind::Float(width) => width.fmt(f),
            Kind::Duration => f.write_str("duration"),
            Kind::Sequence(element) => write!(f, "[{element}]"),
            Kind::Mapping(key, value) => write!(f, "{{{key}: {value}}}"),
            Kind::Unsupported(name) => f.write_str(name),
        }
    }
}
