//! Type descriptors.
//!
//! Every described type maps to one [`TypeInfo`] variant. Leaf kinds
//! ([`ScalarInfo`], [`ObjectInfo`]) only carry identity; the other kinds
//! also carry the type-erased operations needed to build a value from
//! already-bound parts.

mod array_info;
mod bean_info;
mod leaf_info;
mod list_info;
mod map_info;
mod record_info;
mod set_info;
mod ty;
mod type_info;

pub use array_info::ArrayInfo;
pub use bean_info::{BeanInfo, PropertyInfo};
pub use leaf_info::{ObjectInfo, ScalarInfo};
pub use list_info::ListInfo;
pub use map_info::MapInfo;
pub use record_info::{ComponentInfo, ComponentValues, RecordInfo};
pub use set_info::SetInfo;
pub use ty::Type;
pub use type_info::{TypeInfo, TypeKind, TypeKindError};

pub(crate) use ty::impl_type_fn;

// -----------------------------------------------------------------------------
// Erased helpers

use core::any::{Any, type_name};

use crate::{BoxedValue, ReflectError};

/// Unboxes a type-erased value.
#[inline]
pub(crate) fn downcast<T: Any>(value: BoxedValue) -> Result<T, ReflectError> {
    match value.downcast::<T>() {
        Ok(value) => Ok(*value),
        Err(_) => Err(ReflectError::TypeMismatch {
            expected: type_name::<T>(),
        }),
    }
}

/// Borrows a type-erased target mutably.
#[inline]
pub(crate) fn downcast_mut<T: Any>(target: &mut dyn Any) -> Result<&mut T, ReflectError> {
    target.downcast_mut::<T>().ok_or(ReflectError::TypeMismatch {
        expected: type_name::<T>(),
    })
}
