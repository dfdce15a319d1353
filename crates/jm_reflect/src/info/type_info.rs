use alloc::vec::Vec;
use core::fmt;

use thiserror::Error;

use crate::info::{ArrayInfo, BeanInfo, ListInfo, MapInfo};
use crate::info::{ObjectInfo, RecordInfo, ScalarInfo, SetInfo, Type};

// -----------------------------------------------------------------------------
// TypeKind

/// The shape of a described type, used to pick a binding strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Scalar,
    Object,
    Record,
    Bean,
    List,
    Array,
    Set,
    Map,
}

impl TypeKind {
    /// Returns `true` for kinds that are bound as a single leaf value.
    #[inline]
    pub const fn is_leaf(self) -> bool {
        matches!(self, Self::Scalar | Self::Object)
    }

    /// Returns `true` for container kinds.
    #[inline]
    pub const fn is_collection(self) -> bool {
        matches!(self, Self::List | Self::Array | Self::Set | Self::Map)
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar => f.pad("Scalar"),
            Self::Object => f.pad("Object"),
            Self::Record => f.pad("Record"),
            Self::Bean => f.pad("Bean"),
            Self::List => f.pad("List"),
            Self::Array => f.pad("Array"),
            Self::Set => f.pad("Set"),
            Self::Map => f.pad("Map"),
        }
    }
}

/// Error returned when a `TypeInfo` value is not the expected `TypeKind`.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("type kind mismatch: expected {expected}, received {received}")]
pub struct TypeKindError {
    pub expected: TypeKind,
    pub received: TypeKind,
}

// -----------------------------------------------------------------------------
// TypeInfo

/// Describes the shape of a type and how to build it.
///
/// Obtained through [`Typed::type_info`] or, cached, through
/// [`TypeRegistry::get`].
///
/// [`Typed::type_info`]: crate::Typed::type_info
/// [`TypeRegistry::get`]: crate::TypeRegistry::get
#[derive(Debug, Clone)]
pub enum TypeInfo {
    Scalar(ScalarInfo),
    Object(ObjectInfo),
    Record(RecordInfo),
    Bean(BeanInfo),
    List(ListInfo),
    Array(ArrayInfo),
    Set(SetInfo),
    Map(MapInfo),
}

// Helper macro that implements type-safe accessor methods like `as_record`.
macro_rules! impl_cast_method {
    ($name:ident : $kind:ident => $info:ident) => {
        /// Convert [`TypeInfo`] to specific type information.
        pub const fn $name(&self) -> Result<&$info, TypeKindError> {
            match self {
                Self::$kind(info) => Ok(info),
                _ => Err(TypeKindError {
                    expected: TypeKind::$kind,
                    received: self.kind(),
                }),
            }
        }
    };
}

macro_rules! impl_is_method {
    ($name:ident : $kind:ident) => {
        /// Check information kind.
        #[inline]
        pub const fn $name(&self) -> bool {
            matches!(self, Self::$kind(..))
        }
    };
}

impl TypeInfo {
    impl_cast_method!(as_scalar: Scalar => ScalarInfo);
    impl_cast_method!(as_object: Object => ObjectInfo);
    impl_cast_method!(as_record: Record => RecordInfo);
    impl_cast_method!(as_bean: Bean => BeanInfo);
    impl_cast_method!(as_list: List => ListInfo);
    impl_cast_method!(as_array: Array => ArrayInfo);
    impl_cast_method!(as_set: Set => SetInfo);
    impl_cast_method!(as_map: Map => MapInfo);

    impl_is_method!(is_scalar: Scalar);
    impl_is_method!(is_object: Object);
    impl_is_method!(is_record: Record);
    impl_is_method!(is_bean: Bean);
    impl_is_method!(is_list: List);
    impl_is_method!(is_array: Array);
    impl_is_method!(is_set: Set);
    impl_is_method!(is_map: Map);

    /// Returns the underlying [`Type`].
    pub const fn ty(&self) -> &Type {
        match self {
            Self::Scalar(info) => info.ty(),
            Self::Object(info) => info.ty(),
            Self::Record(info) => info.ty(),
            Self::Bean(info) => info.ty(),
            Self::List(info) => info.ty(),
            Self::Array(info) => info.ty(),
            Self::Set(info) => info.ty(),
            Self::Map(info) => info.ty(),
        }
    }

    /// Returns the [`TypeKind`] for this `TypeInfo`.
    ///
    /// # Examples
    ///
    /// ```
    /// use jm_reflect::{Typed, info::TypeKind};
    ///
    /// assert_eq!(i32::type_info().kind(), TypeKind::Scalar);
    /// assert_eq!(<Vec<i32>>::type_info().kind(), TypeKind::List);
    /// ```
    pub const fn kind(&self) -> TypeKind {
        match self {
            Self::Scalar(_) => TypeKind::Scalar,
            Self::Object(_) => TypeKind::Object,
            Self::Record(_) => TypeKind::Record,
            Self::Bean(_) => TypeKind::Bean,
            Self::List(_) => TypeKind::List,
            Self::Array(_) => TypeKind::Array,
            Self::Set(_) => TypeKind::Set,
            Self::Map(_) => TypeKind::Map,
        }
    }

    /// Returns the full type name.
    #[inline]
    pub const fn type_name(&self) -> &'static str {
        self.ty().name()
    }

    /// Returns the types this one is built from, with their descriptors.
    ///
    /// Element types for containers, component types for records and
    /// property types for beans. Used by the registry to register a type
    /// graph recursively.
    pub fn dependencies(&self) -> Vec<(Type, fn() -> TypeInfo)> {
        match self {
            Self::Scalar(_) | Self::Object(_) => Vec::new(),
            Self::Record(info) => info
                .components()
                .iter()
                .map(|c| (*c.ty(), c.type_info_fn()))
                .collect(),
            Self::Bean(info) => info
                .properties()
                .iter()
                .map(|p| (*p.ty(), p.type_info_fn()))
                .collect(),
            Self::List(info) => alloc::vec![(*info.item(), info.item_info_fn())],
            Self::Array(info) => alloc::vec![(*info.item(), info.item_info_fn())],
            Self::Set(info) => alloc::vec![(*info.item(), info.item_info_fn())],
            Self::Map(info) => alloc::vec![(*info.value(), info.value_info_fn())],
        }
    }
}
