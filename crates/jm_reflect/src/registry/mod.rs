//! The type registry: a cache of [`TypeInfo`](crate::info::TypeInfo)
//! keyed by [`TypeId`](core::any::TypeId).

mod type_meta;
mod type_registry;

pub use type_meta::TypeMeta;
pub use type_registry::TypeRegistry;
