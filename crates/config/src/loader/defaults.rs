//! Default values registered alongside each field.
//!
//! Invariants:
//! - A non-empty default goes through the coercer like any source value.
//! - An empty default resets the field to the zero value of its kind, so the
//!   result of a defaults-only load does not depend on the record's prior
//!   contents.

use crate::coerce::CoerceError;
use crate::schema::Field;

/// Apply every field's default; stops at the first failing field.
pub(crate) fn apply_defaults(fields: &mut [Field<'_>]) -> Result<(), (String, CoerceError)> {
    for field in fields.iter_mut() {
        let result = if field.default_value().is_empty() {
            field.reset()
        } else {
            let default = field.default_value().to_string();
            field.set(&default)
        };
        result.map_err(|e| (field.name().to_string(), e))?;
    }
    Ok(())
}
