use alloc::vec::Vec;
use core::any::Any;

use crate::info::list_info::{collect_into, extend_from};
use crate::info::{Type, TypeInfo, impl_type_fn};
use crate::{BoxedValue, ReflectError, Typed};

/// An unordered container of unique elements, such as `BTreeSet<T>`.
///
/// Duplicates are removed by the container itself when elements are
/// collected or extended.
#[derive(Clone, Debug)]
pub struct SetInfo {
    ty: Type,
    item: Type,
    item_info: fn() -> TypeInfo,
    from_items: fn(Vec<BoxedValue>) -> Result<BoxedValue, ReflectError>,
    extend: fn(&mut dyn Any, Vec<BoxedValue>) -> Result<(), ReflectError>,
}

impl SetInfo {
    impl_type_fn!(ty);

    /// Creates a new [`SetInfo`] for container `S` holding `T`.
    #[inline]
    pub fn new<S, T>() -> Self
    where
        S: Any + FromIterator<T> + Extend<T>,
        T: Typed,
    {
        Self {
            ty: Type::of::<S>(),
            item: Type::of::<T>(),
            item_info: T::type_info,
            from_items: collect_into::<S, T>,
            extend: extend_from::<S, T>,
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

    /// Builds a new set from bound elements.
    #[inline]
    pub fn from_items(&self, items: Vec<BoxedValue>) -> Result<BoxedValue, ReflectError> {
        (self.from_items)(items)
    }

    /// Inserts bound elements into an existing set.
    #[inline]
    pub fn extend(&self, target: &mut dyn Any, items: Vec<BoxedValue>) -> Result<(), ReflectError> {
        (self.extend)(target, items)
    }
}

#[cfg(test)]
mod tests {
    use alloc::{boxed::Box, collections::BTreeSet, vec, vec::Vec};

    use crate::{BoxedValue, Typed};

    #[test]
    fn duplicates_collapse() {
        let info = <BTreeSet<i64>>::type_info();
        let set = info.as_set().unwrap();

        let items: Vec<BoxedValue> = vec![Box::new(3_i64), Box::new(1_i64), Box::new(3_i64)];
        let value = set.from_items(items).unwrap();
        let value = value.downcast::<BTreeSet<i64>>().unwrap();

        assert_eq!(value.len(), 2);
        assert!(value.contains(&1) && value.contains(&3));
    }
}
