use alloc::boxed::Box;
use alloc::collections::{BTreeMap, BTreeSet, VecDeque};
use alloc::string::String;
use alloc::vec::Vec;
use core::any::Any;
use core::hash::{BuildHasher, Hash};

use crate::Typed;
use crate::info::{ArrayInfo, ListInfo, MapInfo, ScalarInfo, SetInfo, TypeInfo};

// -----------------------------------------------------------------------------
// Scalars

macro_rules! impl_typed_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Typed for $ty {
                #[inline]
                fn type_info() -> TypeInfo {
                    TypeInfo::Scalar(ScalarInfo::new::<Self>())
                }
            }
        )*
    };
}

impl_typed_scalar!(
    bool, char, String, //
    i8, i16, i32, i64, i128, isize, //
    u8, u16, u32, u64, u128, usize, //
    f32, f64,
);

// -----------------------------------------------------------------------------
// Lists & arrays

impl<T: Typed> Typed for Vec<T> {
    fn type_info() -> TypeInfo {
        TypeInfo::List(ListInfo::new::<Self, T>())
    }
}

impl<T: Typed> Typed for VecDeque<T> {
    fn type_info() -> TypeInfo {
        TypeInfo::List(ListInfo::new::<Self, T>())
    }
}

impl<T: Typed> Typed for Box<[T]> {
    fn type_info() -> TypeInfo {
        TypeInfo::Array(ArrayInfo::boxed::<T>())
    }
}

impl<T: Typed, const N: usize> Typed for [T; N] {
    fn type_info() -> TypeInfo {
        TypeInfo::Array(ArrayInfo::fixed::<T, N>())
    }
}

// -----------------------------------------------------------------------------
// Sets

impl<T: Typed + Ord> Typed for BTreeSet<T> {
    fn type_info() -> TypeInfo {
        TypeInfo::Set(SetInfo::new::<Self, T>())
    }
}

impl<T, S> Typed for hashbrown::HashSet<T, S>
where
    T: Typed + Eq + Hash,
    S: BuildHasher + Default + Any,
{
    fn type_info() -> TypeInfo {
        TypeInfo::Set(SetInfo::new::<Self, T>())
    }
}

#[cfg(feature = "std")]
impl<T, S> Typed for std::collections::HashSet<T, S>
where
    T: Typed + Eq + Hash,
    S: BuildHasher + Default + Any,
{
    fn type_info() -> TypeInfo {
        TypeInfo::Set(SetInfo::new::<Self, T>())
    }
}

// -----------------------------------------------------------------------------
// Maps

impl<V: Typed> Typed for BTreeMap<String, V> {
    fn type_info() -> TypeInfo {
        TypeInfo::Map(MapInfo::new::<Self, V>())
    }
}

impl<V, S> Typed for hashbrown::HashMap<String, V, S>
where
    V: Typed,
    S: BuildHasher + Default + Any,
{
    fn type_info() -> TypeInfo {
        TypeInfo::Map(MapInfo::new::<Self, V>())
    }
}

#[cfg(feature = "std")]
impl<V, S> Typed for std::collections::HashMap<String, V, S>
where
    V: Typed,
    S: BuildHasher + Default + Any,
{
    fn type_info() -> TypeInfo {
        TypeInfo::Map(MapInfo::new::<Self, V>())
    }
}

#[cfg(test)]
mod tests {
    use alloc::{boxed::Box, collections::BTreeMap, string::String, vec::Vec};

    use crate::Typed;
    use crate::hash::{HashMap, HashSet};
    use crate::info::TypeKind;

    #[test]
    fn kinds_of_builtin_types() {
        assert_eq!(u64::type_info().kind(), TypeKind::Scalar);
        assert_eq!(String::type_info().kind(), TypeKind::Scalar);
        assert_eq!(<Vec<u8>>::type_info().kind(), TypeKind::List);
        assert_eq!(<[u8; 4]>::type_info().kind(), TypeKind::Array);
        assert_eq!(<Box<[u8]>>::type_info().kind(), TypeKind::Array);
        assert_eq!(<HashSet<u8>>::type_info().kind(), TypeKind::Set);
        assert_eq!(<HashMap<String, u8>>::type_info().kind(), TypeKind::Map);
        assert_eq!(<BTreeMap<String, u8>>::type_info().kind(), TypeKind::Map);
    }

    #[cfg(feature = "std")]
    #[test]
    fn std_hash_containers() {
        use std::collections::{HashMap, HashSet};

        assert_eq!(<HashSet<i32>>::type_info().kind(), TypeKind::Set);
        assert_eq!(<HashMap<String, i32>>::type_info().kind(), TypeKind::Map);
    }
}
