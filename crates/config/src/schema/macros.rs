//! Declarative implementation of [`Settings`](crate::Settings).

/// Implement [`Settings`](crate::Settings) for a record by listing its fields
/// in declaration order.
///
/// Each entry is one of:
/// - `field`: leaf with an empty default,
/// - `field = "default"`: leaf with a default,
/// - `field: nested`: named substructure, adds `field` as a path segment,
/// - `field: embedded`: anonymous substructure, adds no path segment,
/// - `field: skip`: not configurable.
///
/// Path segments are the Rust field names.
///
/// ```
/// use std::time::Duration;
///
/// #[derive(Default)]
/// struct Tls {
///     cert: String,
///     verify: bool,
/// }
///
/// #[derive(Default)]
/// struct Server {
///     host: String,
///     timeout: Duration,
///     tls: Tls,
/// }
///
/// layercfg::impl_settings!(Tls { cert, verify = "true" });
/// layercfg::impl_settings!(Server {
///     host = "localhost",
///     timeout = "5s",
///     tls: nested,
/// });
///
/// let mut server = Server::default();
/// let names: Vec<String> = layercfg::FieldSet::collect(&mut server)
///     .iter()
///     .map(|f| f.name().to_string())
///     .collect();
/// assert_eq!(names, ["host", "timeout", "tls.cert", "tls.verify"]);
/// ```
#[macro_export]
macro_rules! impl_settings {
    (@entry $fields:ident, $this:ident, $field:ident : nested) => {
        $fields.nested(stringify!($field), &mut $this.$field);
    };
    (@entry $fields:ident, $this:ident, $field:ident : embedded) => {
        $fields.embedded(&mut $this.$field);
    };
    (@entry $fields:ident, $this:ident, $field:ident : skip) => {};
    (@entry $fields:ident, $this:ident, $field:ident = $default:literal) => {
        $fields.leaf(stringify!($field), &mut $this.$field, $default);
    };
    (@entry $fields:ident, $this:ident, $field:ident) => {
        $fields.leaf(stringify!($field), &mut $this.$field, "");
    };
    ($ty:ty { $($field:ident $(: $mode:ident)? $(= $default:literal)?),* $(,)? }) => {
        impl $crate::Settings for $ty {
            fn describe<'a>(&'a mut self, fields: &mut $crate::FieldSet<'a>) {
                $( $crate::impl_settings!(@entry fields, self, $field $(: $mode)? $(= $default)?); )*
            }
        }
    };
}
