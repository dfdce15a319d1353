use core::any::Any;

use crate::info::TypeInfo;

/// A type that can describe its own shape to the binder.
///
/// The registry calls [`type_info`](Typed::type_info) once per type and
/// caches the result, so implementations may allocate freely.
/// Dependencies (element types, components, properties) are discovered
/// through the returned [`TypeInfo`] and registered recursively.
///
/// # Examples
///
/// ```
/// use jm_reflect::{Typed, info::{ScalarInfo, TypeInfo}};
///
/// #[derive(Clone, Copy)]
/// enum Level { Debug, Info }
///
/// impl Typed for Level {
///     fn type_info() -> TypeInfo {
///         TypeInfo::Scalar(ScalarInfo::new::<Self>())
///     }
/// }
///
/// assert!(Level::type_info().is_scalar());
/// ```
pub trait Typed: Any {
    /// Returns the descriptor of `Self`.
    fn type_info() -> TypeInfo;
}
