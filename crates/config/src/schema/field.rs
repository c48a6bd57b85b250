use std::fmt;

use crate::coerce::{self, CoerceError, Kind, Slot, Value};

/// Descriptor of one leaf field for the duration of a load.
pub struct Field<'a> {
    name: String,
    slot: &'a mut dyn Slot,
    default: String,
}

impl<'a> Field<'a> {
    pub(crate) fn new(name: String, slot: &'a mut dyn Slot, default: String) -> Self {
        Self {
            name,
            slot,
            default,
        }
    }

    /// Dotted hierarchical name, e.g. `server.tls.cert`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared kind of the underlying storage.
    pub fn kind(&self) -> Kind {
        self.slot.kind()
    }

    /// Default text registered for the field (possibly empty).
    pub fn default_value(&self) -> &str {
        &self.default
    }

    /// Coerce `raw` into the field's type and store it.
    pub fn set(&mut self, raw: &str) -> Result<(), CoerceError> {
        coerce::set_from_str(&mut *self.slot, raw)
    }

    /// Store the zero value of the field's kind.
    pub fn reset(&mut self) -> Result<(), CoerceError> {
        let zero = Value::zero(&self.slot.kind())?;
        self.slot.assign(zero)
    }
}

impl fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("kind", &self.slot.kind())
            .field("default", &self.default)
            .finish()
    }
}

/// Owned description of a field together with its derived source names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInfo {
    /// Dotted hierarchical name.
    pub name: String,
    /// Declared kind.
    pub kind: Kind,
    /// Default text (possibly empty).
    pub default: String,
    /// Environment variable consulted for this field.
    pub env: String,
    /// Flag name consulted for this field.
    pub flag: String,
}
