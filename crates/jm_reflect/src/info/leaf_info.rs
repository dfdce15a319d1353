use core::any::Any;

use crate::info::{Type, impl_type_fn};

// -----------------------------------------------------------------------------
// ScalarInfo

/// A type converted directly from a single leaf value (numbers, strings,
/// booleans, unit-like enums).
#[derive(Clone, Debug)]
pub struct ScalarInfo {
    ty: Type,
}

impl ScalarInfo {
    impl_type_fn!(ty);

    /// Creates a new [`ScalarInfo`].
    #[inline]
    pub fn new<T: Any>() -> Self {
        Self { ty: Type::of::<T>() }
    }
}

// -----------------------------------------------------------------------------
// ObjectInfo

/// An opaque type that no built-in binder knows how to populate.
///
/// Binding an object target only succeeds through a custom strategy or a
/// conversion from the raw data node.
#[derive(Clone, Debug)]
pub struct ObjectInfo {
    ty: Type,
}

impl ObjectInfo {
    impl_type_fn!(ty);

    /// Creates a new [`ObjectInfo`].
    #[inline]
    pub fn new<T: Any>() -> Self {
        Self { ty: Type::of::<T>() }
    }
}
