use core::any::{Any, TypeId};
use core::fmt;
use core::hash::{Hash, Hasher};

/// The identity of a Rust type: its [`TypeId`] and its `type_name`.
///
/// Equality and hashing only consider the [`TypeId`].
///
/// # Examples
///
/// ```
/// use jm_reflect::info::Type;
///
/// let ty = Type::of::<Vec<String>>();
///
/// assert!(ty.is::<Vec<String>>());
/// assert_eq!(ty.ident(), "Vec");
/// ```
#[derive(Clone, Copy)]
pub struct Type {
    id: TypeId,
    name: &'static str,
}

impl Type {
    /// Creates the [`Type`] of `T`.
    #[inline]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: core::any::type_name::<T>(),
        }
    }

    /// Returns the [`TypeId`].
    #[inline(always)]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// Returns the full type name, as reported by [`core::any::type_name`].
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the last path segment of the name, without generics.
    pub fn ident(&self) -> &'static str {
        let name = self.name;
        let end = name.find('<').unwrap_or(name.len());
        let head = &name[..end];
        match head.rfind("::") {
            Some(index) => &name[index + 2..end],
            None => head,
        }
    }

    /// Returns `true` if this is the type `T`.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for Type {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Type {}

impl Hash for Type {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name)
    }
}

// -----------------------------------------------------------------------------
// Accessor macro

/// Implements `ty`, `ty_id`, `type_is` and `type_name` for an info struct.
macro_rules! impl_type_fn {
    ($field:ident) => {
        /// Returns the underlying [`Type`](crate::info::Type).
        #[inline(always)]
        pub const fn ty(&self) -> &$crate::info::Type {
            &self.$field
        }

        /// Returns the `TypeId`.
        #[inline]
        pub const fn ty_id(&self) -> ::core::any::TypeId {
            self.$field.id()
        }

        /// Check if the given type matches this one.
        #[inline]
        pub fn type_is<T: ::core::any::Any>(&self) -> bool {
            self.$field.is::<T>()
        }

        /// Returns the full type name.
        #[inline]
        pub const fn type_name(&self) -> &'static str {
            self.$field.name()
        }
    };
}

pub(crate) use impl_type_fn;

#[cfg(test)]
mod tests {
    use alloc::{string::String, vec::Vec};

    use super::Type;

    #[test]
    fn ident_strips_paths_and_generics() {
        assert_eq!(Type::of::<Vec<String>>().ident(), "Vec");
        assert_eq!(Type::of::<u8>().ident(), "u8");
        assert_eq!(Type::of::<String>().ident(), "String");
    }

    #[test]
    fn equality_uses_type_id() {
        assert_eq!(Type::of::<u8>(), Type::of::<u8>());
        assert_ne!(Type::of::<u8>(), Type::of::<i8>());
        assert!(Type::of::<String>().is::<String>());
    }
}
