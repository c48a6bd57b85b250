//! Typed storage for coerced values.
//!
//! Responsibilities:
//! - Map Rust field types onto a [`Kind`] (`Setting::kind`).
//! - Convert a coerced [`Value`] back into the concrete field type.
//! - Provide the object-safe [`Slot`] stored by field descriptors.
//!
//! Invariants:
//! - `from_value(coerce(&T::kind(), s)?)` succeeds for every `s` the coercer
//!   accepts; a `Mismatch` error means a hand-written impl disagrees with its
//!   own `kind()`.

use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};
use std::time::Duration;

use super::error::CoerceError;
use super::kind::{FloatWidth, IntWidth, Kind, UintWidth};
use super::value::Value;

/// A type that can be the target of a leaf field.
pub trait Setting: Sized {
    /// Declared kind used to pick the coercion rule.
    fn kind() -> Kind;

    /// Build `Self` from a value coerced for [`Setting::kind`].
    fn from_value(value: Value) -> Result<Self, CoerceError>;
}

/// Object-safe storage location of one leaf field.
pub trait Slot {
    /// Declared kind of the slot.
    fn kind(&self) -> Kind;

    /// Overwrite the slot with `value`.
    fn assign(&mut self, value: Value) -> Result<(), CoerceError>;
}

impl<T: Setting> Slot for T {
    fn kind(&self) -> Kind {
        T::kind()
    }

    fn assign(&mut self, value: Value) -> Result<(), CoerceError> {
        *self = T::from_value(value)?;
        Ok(())
    }
}

impl Setting for bool {
    fn kind() -> Kind {
        Kind::Bool
    }

    fn from_value(value: Value) -> Result<Self, CoerceError> {
        match value {
            Value::Bool(v) => Ok(v),
            other => Err(CoerceError::mismatch(&<Self as Setting>::kind(), other.kind_name())),
        }
    }
}

impl Setting for String {
    fn kind() -> Kind {
        Kind::String
    }

    fn from_value(value: Value) -> Result<Self, CoerceError> {
        match value {
            Value::String(v) => Ok(v),
            other => Err(CoerceError::mismatch(&<Self as Setting>::kind(), other.kind_name())),
        }
    }
}

impl Setting for Duration {
    fn kind() -> Kind {
        Kind::Duration
    }

    fn from_value(value: Value) -> Result<Self, CoerceError> {
        match value {
            Value::Duration(v) => Ok(v),
            other => Err(CoerceError::mismatch(&<Self as Setting>::kind(), other.kind_name())),
        }
    }
}

macro_rules! impl_int_setting {
    ($($ty:ty => $width:ident),* $(,)?) => {
        $(
            impl Setting for $ty {
                fn kind() -> Kind {
                    Kind::Int(IntWidth::$width)
                }

                fn from_value(value: Value) -> Result<Self, CoerceError> {
                    match value {
                        Value::Int(v) => <$ty>::try_from(v).map_err(|_| {
                            CoerceError::mismatch(&<Self as Setting>::kind(), "out-of-range integer")
                        }),
                        other => Err(CoerceError::mismatch(
                            &<Self as Setting>::kind(),
                            other.kind_name(),
                        )),
                    }
                }
            }
        )*
    };
}

macro_rules! impl_uint_setting {
    ($($ty:ty => $width:ident),* $(,)?) => {
        $(
            impl Setting for $ty {
                fn kind() -> Kind {
                    Kind::Uint(UintWidth::$width)
                }

                fn from_value(value: Value) -> Result<Self, CoerceError> {
                    match value {
                        Value::Uint(v) => <$ty>::try_from(v).map_err(|_| {
                            CoerceError::mismatch(&<Self as Setting>::kind(), "out-of-range integer")
                        }),
                        other => Err(CoerceError::mismatch(
                            &<Self as Setting>::kind(),
                            other.kind_name(),
                        )),
                    }
                }
            }
        )*
    };
}

impl_int_setting!(i8 => I8, i16 => I16, i32 => I32, i64 => I64, isize => Isize);
impl_uint_setting!(u8 => U8, u16 => U16, u32 => U32, u64 => U64, usize => Usize);

impl Setting for f32 {
    fn kind() -> Kind {
        Kind::Float(FloatWidth::F32)
    }

    fn from_value(value: Value) -> Result<Self, CoerceError> {
        match value {
            // Values were parsed as f32 and widened, so narrowing is exact.
            Value::Float(v) => Ok(v as f32),
            other => Err(CoerceError::mismatch(&<Self as Setting>::kind(), other.kind_name())),
        }
    }
}

impl Setting for f64 {
    fn kind() -> Kind {
        Kind::Float(FloatWidth::F64)
    }

    fn from_value(value: Value) -> Result<Self, CoerceError> {
        match value {
            Value::Float(v) => Ok(v),
            other => Err(CoerceError::mismatch(&<Self as Setting>::kind(), other.kind_name())),
        }
    }
}

impl<T: Setting> Setting for Vec<T> {
    fn kind() -> Kind {
        Kind::sequence(T::kind())
    }

    fn from_value(value: Value) -> Result<Self, CoerceError> {
        match value {
            Value::Sequence(items) => items.into_iter().map(T::from_value).collect(),
            other => Err(CoerceError::mismatch(&<Self as Setting>::kind(), other.kind_name())),
        }
    }
}

impl<K, V, S> Setting for HashMap<K, V, S>
where
    K: Setting + Eq + Hash,
    V: Setting,
    S: BuildHasher + Default,
{
    fn kind() -> Kind {
        Kind::mapping(K::kind(), V::kind())
    }

    fn from_value(value: Value) -> Result<Self, CoerceError> {
        match value {
            Value::Mapping(entries) => entries
                .into_iter()
                .map(|(key, value)| Ok((K::from_value(key)?, V::from_value(value)?)))
                .collect(),
            other => Err(CoerceError::mismatch(&<Self as Setting>::kind(), other.kind_name())),
        }
    }
}

impl<K, V> Setting for BTreeMap<K, V>
where
    K: Setting + Ord,
    V: Setting,
{
    fn kind() -> Kind {
        Kind::mapping(K::kind(), V::kind())
    }

    fn from_value(value: Value) -> Result<Self, CoerceError> {
        match value {
            Value::Mapping(entries) => entries
                .into_iter()
                .map(|(key, value)| Ok((K::from_value(key)?, V::from_value(value)?)))
                .collect(),
            other => Err(CoerceError::mismatch(&<Self as Setting>::kind(), other.kind_name())),
        }
    }
}
