use alloc::sync::Arc;
use alloc::string::String;
use core::any::TypeId;

use crate::Typed;
use crate::hash::{HashMap, HashSet};
use crate::info::{Type, TypeInfo};
use crate::registry::TypeMeta;

// -----------------------------------------------------------------------------
// TypeRegistry

/// A registry of described types.
///
/// [Registering] a type stores its [`TypeInfo`] once and walks its
/// dependencies (element, component and property types), registering
/// them too. Lookups are by [`TypeId`], full type name or short name.
///
/// # Example
///
/// ```
/// use core::any::TypeId;
/// use std::collections::BTreeMap;
/// use jm_reflect::TypeRegistry;
///
/// let mut registry = TypeRegistry::empty();
/// registry.register::<BTreeMap<String, Vec<u8>>>();
///
/// assert!(registry.contains(TypeId::of::<Vec<u8>>()));
/// assert!(registry.contains(TypeId::of::<u8>()));
/// assert!(registry.get_with_short_name("Vec").is_some());
/// ```
///
/// [Registering]: TypeRegistry::register
pub struct TypeRegistry {
    type_meta_table: HashMap<TypeId, TypeMeta>,
    type_name_to_id: HashMap<&'static str, TypeId>,
    short_name_to_id: HashMap<&'static str, TypeId>,
    ambiguous_names: HashSet<&'static str>,
}

impl Default for TypeRegistry {
    /// See [`TypeRegistry::new`] .
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Create a empty [`TypeRegistry`].
    #[inline]
    pub fn empty() -> Self {
        Self {
            type_meta_table: HashMap::default(),
            type_name_to_id: HashMap::default(),
            short_name_to_id: HashMap::default(),
            ambiguous_names: HashSet::default(),
        }
    }

    /// Create a type registry with default registrations for primitive types.
    ///
    /// - `bool` `char`
    /// - `i8 - i128` `isize`
    /// - `u8 - u128` `usize`
    /// - `f32` `f64`
    /// - `String`
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register::<bool>();
        registry.register::<char>();
        registry.register::<u8>();
        registry.register::<u16>();
        registry.register::<u32>();
        registry.register::<u64>();
        registry.register::<u128>();
        registry.register::<usize>();
        registry.register::<i8>();
        registry.register::<i16>();
        registry.register::<i32>();
        registry.register::<i64>();
        registry.register::<i128>();
        registry.register::<isize>();
        registry.register::<f32>();
        registry.register::<f64>();
        registry.register::<String>();
        registry
    }

    // The type must **not** already exist.
    fn add_new_type_indices(&mut self, ty: Type) {
        self.type_name_to_id.insert(ty.name(), ty.id());

        let short_name = ty.ident();
        if !self.ambiguous_names.contains(short_name) {
            if self.short_name_to_id.contains_key(short_name) {
                self.short_name_to_id.remove(short_name);
                self.ambiguous_names.insert(short_name);
            } else {
                self.short_name_to_id.insert(short_name, ty.id());
            }
        }
    }

    // Inserts `info` if its type is new, then walks its dependencies.
    // Types already present stop the walk, which also ends self-references.
    fn register_internal(&mut self, ty: Type, get_type_info: impl FnOnce() -> TypeInfo) -> bool {
        if self.type_meta_table.contains_key(&ty.id()) {
            return false;
        }

        let info = get_type_info();
        let dependencies = info.dependencies();

        self.add_new_type_indices(ty);
        self.type_meta_table.insert(ty.id(), TypeMeta::new(info));

        for (dependency, get_info) in dependencies {
            self.register_internal(dependency, get_info);
        }
        true
    }

    /// Attempts to register the type `T` if it has not yet been registered already.
    ///
    /// This also registers every type `T` is built from. Returns `false` if
    /// `T` was already present, in which case nothing changes.
    #[inline]
    pub fn register<T: Typed>(&mut self) -> bool {
        self.register_internal(Type::of::<T>(), T::type_info)
    }

    /// Registers a hand-built descriptor, for types that cannot implement
    /// [`Typed`] (foreign types).
    ///
    /// Dependencies are registered as with [`register`](Self::register).
    pub fn register_info(&mut self, info: TypeInfo) -> bool {
        let ty = *info.ty();
        self.register_internal(ty, move || info)
    }

    /// Replaces the descriptor of an already registered type, or inserts it.
    ///
    /// This method will _not_ register type dependencies.
    pub fn insert_type_meta(&mut self, type_meta: TypeMeta) {
        if !self.type_meta_table.contains_key(&type_meta.type_id()) {
            self.add_new_type_indices(*type_meta.ty());
        }
        self.type_meta_table.insert(type_meta.type_id(), type_meta);
    }

    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.type_meta_table.contains_key(&type_id)
    }

    /// Returns the [`TypeMeta`] registered for `type_id`.
    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&TypeMeta> {
        self.type_meta_table.get(&type_id)
    }

    /// Returns the [`TypeMeta`] registered for `T`.
    #[inline]
    pub fn get_of<T: 'static>(&self) -> Option<&TypeMeta> {
        self.get(TypeId::of::<T>())
    }

    /// Returns a shared handle to the descriptor of `type_id`.
    #[inline]
    pub fn get_type_info(&self, type_id: TypeId) -> Option<Arc<TypeInfo>> {
        self.get(type_id).map(TypeMeta::info_arc)
    }

    /// Looks a type up by its full name, e.g. `alloc::string::String`.
    pub fn get_with_type_name(&self, type_name: &str) -> Option<&TypeMeta> {
        self.type_name_to_id
            .get(type_name)
            .and_then(|id| self.get(*id))
    }

    /// Looks a type up by its short name, e.g. `String`.
    ///
    /// Returns `None` if the name is [ambiguous](Self::is_ambiguous).
    pub fn get_with_short_name(&self, short_name: &str) -> Option<&TypeMeta> {
        self.short_name_to_id
            .get(short_name)
            .and_then(|id| self.get(*id))
    }

    /// Returns `true` if more than one registered type has this short name.
    #[inline]
    pub fn is_ambiguous(&self, short_name: &str) -> bool {
        self.ambiguous_names.contains(short_name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.type_meta_table.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.type_meta_table.is_empty()
    }

    /// Returns an iterator over the registered types.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &TypeMeta> {
        self.type_meta_table.values()
    }
}

impl core::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set()
            .entries(self.type_name_to_id.keys())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::{collections::BTreeSet, string::String, vec::Vec};
    use core::any::TypeId;

    use super::TypeRegistry;
    use crate::Typed;
    use crate::info::{BeanInfo, ObjectInfo, PropertyInfo, TypeInfo, TypeKind};

    #[derive(Default)]
    struct Node {
        children: Vec<Node>,
    }

    impl Typed for Node {
        fn type_info() -> TypeInfo {
            TypeInfo::Bean(
                BeanInfo::new::<Self>([PropertyInfo::new(
                    "children",
                    |n: &mut Node, v: Vec<Node>| n.children = v,
                )])
                .with_default_factory::<Self>(),
            )
        }
    }

    #[test]
    fn new_registers_primitives() {
        let registry = TypeRegistry::new();
        assert!(registry.contains(TypeId::of::<u8>()));
        assert!(registry.contains(TypeId::of::<String>()));
        assert_eq!(registry.get_of::<f64>().unwrap().kind(), TypeKind::Scalar);
    }

    #[test]
    fn register_walks_dependencies_once() {
        let mut registry = TypeRegistry::empty();
        assert!(registry.register::<BTreeSet<Vec<i32>>>());
        assert!(!registry.register::<BTreeSet<Vec<i32>>>());

        assert_eq!(registry.len(), 3);
        assert!(registry.contains(TypeId::of::<Vec<i32>>()));
        assert!(registry.contains(TypeId::of::<i32>()));
    }

    #[test]
    fn self_referential_type_terminates() {
        let mut registry = TypeRegistry::empty();
        registry.register::<Node>();

        assert!(registry.contains(TypeId::of::<Node>()));
        assert!(registry.contains(TypeId::of::<Vec<Node>>()));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn short_names_become_ambiguous() {
        let mut registry = TypeRegistry::empty();
        registry.register::<Vec<u8>>();
        assert!(registry.get_with_short_name("Vec").is_some());

        registry.register::<Vec<u16>>();
        assert!(registry.is_ambiguous("Vec"));
        assert!(registry.get_with_short_name("Vec").is_none());
        assert!(registry.get_with_type_name("alloc::vec::Vec<u16>").is_some());
    }

    #[test]
    fn register_info_for_foreign_type() {
        struct Handle;

        let mut registry = TypeRegistry::empty();
        assert!(registry.register_info(TypeInfo::Object(ObjectInfo::new::<Handle>())));
        assert!(registry.get_of::<Handle>().unwrap().info().is_object());
    }
}
