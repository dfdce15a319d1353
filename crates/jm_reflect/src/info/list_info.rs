use alloc::{boxed::Box, vec::Vec};
use core::any::Any;

use crate::info::{Type, TypeInfo, downcast, downcast_mut, impl_type_fn};
use crate::{BoxedValue, ReflectError, Typed};

/// A growable, ordered container such as `Vec<T>` or `VecDeque<T>`.
///
/// # Examples
///
/// ```
/// use jm_reflect::{BoxedValue, Typed};
///
/// let info = <Vec<i32>>::type_info();
/// let list = info.as_list().unwrap();
///
/// assert!(list.item().is::<i32>());
///
/// let items: Vec<BoxedValue> = vec![Box::new(1_i32), Box::new(2_i32)];
/// let value = list.from_items(items).unwrap();
/// assert_eq!(*value.downcast::<Vec<i32>>().unwrap(), [1, 2]);
/// ```
#[derive(Clone, Debug)]
pub struct ListInfo {
    ty: Type,
    item: Type,
    // Element descriptors are only built when the registry walks the graph.
    item_info: fn() -> TypeInfo,
    from_items: fn(Vec<BoxedValue>) -> Result<BoxedValue, ReflectError>,
    extend: fn(&mut dyn Any, Vec<BoxedValue>) -> Result<(), ReflectError>,
}

impl ListInfo {
    impl_type_fn!(ty);

    /// Creates a new [`ListInfo`] for container `L` holding `T`.
    #[inline]
    pub fn new<L, T>() -> Self
    where
        L: Any + FromIterator<T> + Extend<T>,
        T: Typed,
    {
        Self {
            ty: Type::of::<L>(),
            item: Type::of::<T>(),
            item_info: T::type_info,
            from_items: collect_into::<L, T>,
            extend: extend_from::<L, T>,
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

    /// Builds a new container from bound elements, preserving their order.
    #[inline]
    pub fn from_items(&self, items: Vec<BoxedValue>) -> Result<BoxedValue, ReflectError> {
        (self.from_items)(items)
    }

    /// Appends bound elements to an existing container.
    #[inline]
    pub fn extend(&self, target: &mut dyn Any, items: Vec<BoxedValue>) -> Result<(), ReflectError> {
        (self.extend)(target, items)
    }
}

pub(crate) fn collect_into<C, T>(items: Vec<BoxedValue>) -> Result<BoxedValue, ReflectError>
where
    C: Any + FromIterator<T>,
    T: Any,
{
    let container = items
        .into_iter()
        .map(downcast::<T>)
        .collect::<Result<C, _>>()?;
    Ok(Box::new(container))
}

pub(crate) fn extend_from<C, T>(target: &mut dyn Any, items: Vec<BoxedValue>) -> Result<(), ReflectError>
where
    C: Any + Extend<T>,
    T: Any,
{
    let target = downcast_mut::<C>(target)?;
    let items = items
        .into_iter()
        .map(downcast::<T>)
        .collect::<Result<Vec<T>, _>>()?;
    target.extend(items);
    Ok(())
}
