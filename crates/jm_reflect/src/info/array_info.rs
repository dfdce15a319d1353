use alloc::{boxed::Box, vec::Vec};
use core::any::{Any, type_name};

use crate::info::list_info::collect_into;
use crate::info::{Type, TypeInfo, downcast, impl_type_fn};
use crate::{BoxedValue, ReflectError, Typed};

/// A container whose length is decided once, when it is built.
///
/// `[T; N]` has a fixed capacity and rejects any other element count;
/// `Box<[T]>` takes the length of the bound data.
#[derive(Clone, Debug)]
pub struct ArrayInfo {
    ty: Type,
    item: Type,
    item_info: fn() -> TypeInfo,
    capacity: Option<usize>,
    from_items: fn(Vec<BoxedValue>) -> Result<BoxedValue, ReflectError>,
}

impl ArrayInfo {
    impl_type_fn!(ty);

    /// Creates an [`ArrayInfo`] for `[T; N]`.
    #[inline]
    pub fn fixed<T: Typed, const N: usize>() -> Self {
        Self {
            ty: Type::of::<[T; N]>(),
            item: Type::of::<T>(),
            item_info: T::type_info,
            capacity: Some(N),
            from_items: fixed_array::<T, N>,
        }
    }

    /// Creates an [`ArrayInfo`] for `Box<[T]>`.
    #[inline]
    pub fn boxed<T: Typed>() -> Self {
        Self {
            ty: Type::of::<Box<[T]>>(),
            item: Type::of::<T>(),
            item_info: T::type_info,
            capacity: None,
            from_items: collect_into::<Box<[T]>, T>,
        }
    }

    /// Returns the element [`Type`].
    #[inline]
    pub const fn item(&self) -> &Type {
        &self.item
    }

    /// Returns the element [`TypeInfo`].
    #[inline]
    pub fn item_info(&self) -> TypeInfo {
        (self.item_info)()
    }

    #[inline]
    pub(crate) const fn item_info_fn(&self) -> fn() -> TypeInfo {
        self.item_info
    }

    /// Returns the required element count, `None` if any count is accepted.
    #[inline]
    pub const fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Builds the array from exactly the bound elements.
    #[inline]
    pub fn from_items(&self, items: Vec<BoxedValue>) -> Result<BoxedValue, ReflectError> {
        (self.from_items)(items)
    }
}

fn fixed_array<T: Any, const N: usize>(items: Vec<BoxedValue>) -> Result<BoxedValue, ReflectError> {
    let actual = items.len();
    if actual != N {
        return Err(ReflectError::LengthMismatch {
            ty: type_name::<[T; N]>(),
            expected: N,
            actual,
        });
    }

    let items = items
        .into_iter()
        .map(downcast::<T>)
        .collect::<Result<Vec<T>, _>>()?;

    match <[T; N]>::try_from(items) {
        Ok(array) => Ok(Box::new(array)),
        Err(items) => Err(ReflectError::LengthMismatch {
            ty: type_name::<[T; N]>(),
            expected: N,
            actual: items.len(),
        }),
    }
}
