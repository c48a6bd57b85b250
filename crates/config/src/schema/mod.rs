//! Field discovery for configuration records.
//!
//! Responsibilities:
//! - Define the [`Settings`] trait through which a record declares its fields.
//! - Enumerate leaf fields into [`Field`] descriptors with dotted names
//!   ([`FieldSet`]).
//! - Provide the storage-free [`FieldInfo`] view used for listings and flag
//!   registration.
//!
//! Does NOT handle:
//! - Parsing values (see `coerce`).
//! - Deciding which source applies (see `loader`).
//!
//! Invariants:
//! - Fields are produced in declaration order; a nested record's leaves appear
//!   where the nested field is declared.
//! - Named substructures add one path segment; embedded ones add none.
//! - Skipped fields contribute nothing, including their descendants.

mod field;
mod macros;

pub use field::{Field, FieldInfo};

use crate::coerce::Slot;
use crate::constants::PATH_SEPARATOR;

/// A record whose fields can be hydrated by the loader.
///
/// Implementations register every configurable field with the [`FieldSet`]
/// in declaration order. Most records use [`impl_settings!`](crate::impl_settings)
/// instead of writing this by hand.
///
/// ```
/// use layercfg::{FieldSet, Settings};
///
/// #[derive(Default)]
/// struct Database {
///     url: String,
///     pool: u32,
/// }
///
/// impl Settings for Database {
///     fn describe<'a>(&'a mut self, fields: &mut FieldSet<'a>) {
///         fields
///             .leaf("url", &mut self.url, "postgres://localhost")
///             .leaf("pool", &mut self.pool, "4");
///     }
/// }
/// ```
pub trait Settings {
    /// Register this record's fields with `fields`.
    fn describe<'a>(&'a mut self, fields: &mut FieldSet<'a>);
}

/// Collects [`Field`] descriptors while a record describes itself.
pub struct FieldSet<'a> {
    path: Vec<String>,
    fields: Vec<Field<'a>>,
}

impl<'a> FieldSet<'a> {
    /// Enumerate every leaf field of `record`.
    pub fn collect<T: Settings + ?Sized>(record: &'a mut T) -> Vec<Field<'a>> {
        let mut set = FieldSet {
            path: Vec::new(),
            fields: Vec::new(),
        };
        record.describe(&mut set);
        tracing::trace!(count = set.fields.len(), "enumerated configuration fields");
        set.fields
    }

    /// Register a leaf field named `name` under the current path.
    ///
    /// `default` is coerced by the defaults step; an empty default resets the
    /// field to the zero value of its kind.
    pub fn leaf(&mut self, name: &str, slot: &'a mut dyn Slot, default: &str) -> &mut Self {
        let name = self.qualified(name);
        self.fields.push(Field::new(name, slot, default.to_string()));
        self
    }

    /// Register a named substructure; its leaves are prefixed with `name`.
    pub fn nested<T: Settings + ?Sized>(&mut self, name: &str, record: &'a mut T) -> &mut Self {
        self.path.push(name.to_string());
        record.describe(self);
        self.path.pop();
        self
    }

    /// Register an embedded substructure; its leaves are named as if they
    /// were declared directly on the parent.
    pub fn embedded<T: Settings + ?Sized>(&mut self, record: &'a mut T) -> &mut Self {
        record.describe(self);
        self
    }

    fn qualified(&self, name: &str) -> String {
        let mut qualified = String::new();
        for segment in &self.path {
            qualified.push_str(segment);
            qualified.push(PATH_SEPARATOR);
        }
        qualified.push_str(name);
        qualified
    }
}
