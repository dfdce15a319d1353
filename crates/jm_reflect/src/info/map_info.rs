use alloc::{boxed::Box, string::String, vec::Vec};
use core::any::Any;

use crate::info::{Type, TypeInfo, downcast, downcast_mut, impl_type_fn};
use crate::{BoxedValue, ReflectError, Typed};

/// A string-keyed map such as `BTreeMap<String, V>`.
#[derive(Clone, Debug)]
pub struct MapInfo {
    ty: Type,
    value: Type,
    value_info: fn() -> TypeInfo,
    from_entries: fn(Vec<(String, BoxedValue)>) -> Result<BoxedValue, ReflectError>,
    extend: fn(&mut dyn Any, Vec<(String, BoxedValue)>) -> Result<(), ReflectError>,
}

impl MapInfo {
    impl_type_fn!(ty);

    /// Creates a new [`MapInfo`] for map `M` with values `V`.
    #[inline]
    pub fn new<M, V>() -> Self
    where
        M: Any + FromIterator<(String, V)> + Extend<(String, V)>,
        V: Typed,
    {
        Self {
            ty: Type::of::<M>(),
            value: Type::of::<V>(),
            value_info: V::type_info,
            from_entries: collect_entries::<M, V>,
            extend: extend_entries::<M, V>,
        }
    }

    /// Returns the value [`Type`].
    #[inline]
    pub const fn value(&self) -> &Type {
        &self.value
    }

    /// Returns the value [`TypeInfo`].
    #[inline]
    pub fn value_info(&self) -> TypeInfo {
        (self.value_info)()
    }

    #[inline]
    pub(crate) const fn value_info_fn(&self) -> fn() -> TypeInfo {
        self.value_info
    }

    /// Builds a new map from bound entries.
    #[inline]
    pub fn from_entries(&self, entries: Vec<(String, BoxedValue)>) -> Result<BoxedValue, ReflectError> {
        (self.from_entries)(entries)
    }

    /// Inserts bound entries into an existing map, replacing equal keys.
    #[inline]
    pub fn extend(
        &self,
        target: &mut dyn Any,
        entries: Vec<(String, BoxedValue)>,
    ) -> Result<(), ReflectError> {
        (self.extend)(target, entries)
    }
}

fn unpack<V: Any>(entries: Vec<(String, BoxedValue)>) -> impl Iterator<Item = Result<(String, V), ReflectError>> {
    entries
        .into_iter()
        .map(|(key, value)| downcast::<V>(value).map(|value| (key, value)))
}

fn collect_entries<M, V>(entries: Vec<(String, BoxedValue)>) -> Result<BoxedValue, ReflectError>
where
    M: Any + FromIterator<(String, V)>,
    V: Any,
{
    let map = unpack::<V>(entries).collect::<Result<M, _>>()?;
    Ok(Box::new(map))
}

fn extend_entries<M, V>(target: &mut dyn Any, entries: Vec<(String, BoxedValue)>) -> Result<(), ReflectError>
where
    M: Any + Extend<(String, V)>,
    V: Any,
{
    let target = downcast_mut::<M>(target)?;
    let entries = unpack::<V>(entries).collect::<Result<Vec<_>, _>>()?;
    target.extend(entries);
    Ok(())
}
