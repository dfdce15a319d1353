use alloc::{boxed::Box, sync::Arc};
use core::any::Any;
use core::fmt;

use crate::hash::HashMap;
use crate::info::{Type, TypeInfo, downcast, impl_type_fn};
use crate::{BoxedValue, ReflectError, Typed};

// -----------------------------------------------------------------------------
// ComponentInfo

/// A named, constructor-bound component of a record.
#[derive(Clone, Debug)]
pub struct ComponentInfo {
    ty: Type,
    name: &'static str,
    type_info: fn() -> TypeInfo,
}

impl ComponentInfo {
    impl_type_fn!(ty);

    /// Creates a component `name` of type `T`.
    #[inline]
    pub fn new<T: Typed>(name: &'static str) -> Self {
        Self {
            ty: Type::of::<T>(),
            name,
            type_info: T::type_info,
        }
    }

    /// Returns the component name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the component's [`TypeInfo`].
    #[inline]
    pub fn type_info(&self) -> TypeInfo {
        (self.type_info)()
    }

    #[inline]
    pub(crate) const fn type_info_fn(&self) -> fn() -> TypeInfo {
        self.type_info
    }
}

// -----------------------------------------------------------------------------
// ComponentValues

/// Holder for the components resolved so far, handed to the constructor.
///
/// Components with no bound value are simply absent; the constructor
/// decides whether that is an error ([`require`](Self::require)) or a
/// default ([`take_or_default`](Self::take_or_default)).
pub struct ComponentValues {
    ty: &'static str,
    values: HashMap<&'static str, BoxedValue>,
}

impl ComponentValues {
    /// Creates an empty holder for the record type named `ty`.
    #[inline]
    pub fn new(ty: &'static str) -> Self {
        Self {
            ty,
            values: HashMap::default(),
        }
    }

    /// Stores the value of component `name`.
    #[inline]
    pub fn insert(&mut self, name: &'static str, value: BoxedValue) {
        self.values.insert(name, value);
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Removes and returns component `name`, if it was bound.
    pub fn take<T: Any>(&mut self, name: &str) -> Result<Option<T>, ReflectError> {
        self.values.remove(name).map(downcast::<T>).transpose()
    }

    /// Removes and returns component `name`, failing if it was not bound.
    pub fn require<T: Any>(&mut self, name: &'static str) -> Result<T, ReflectError> {
        self.take(name)?.ok_or(ReflectError::MissingComponent { name, ty: self.ty })
    }

    /// Removes and returns component `name`, or `T::default()`.
    pub fn take_or_default<T: Any + Default>(&mut self, name: &str) -> Result<T, ReflectError> {
        Ok(self.take(name)?.unwrap_or_default())
    }
}

impl fmt::Debug for ComponentValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentValues")
            .field("ty", &self.ty)
            .field("names", &self.values.keys())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// RecordInfo

type Constructor =
    Arc<dyn Fn(&mut ComponentValues) -> Result<BoxedValue, ReflectError> + Send + Sync>;

/// An immutable value type built once from all of its components.
///
/// # Examples
///
/// ```
/// use jm_reflect::info::{ComponentInfo, ComponentValues, RecordInfo};
///
/// struct Endpoint { host: String, port: u16 }
///
/// let info = RecordInfo::new::<Endpoint>(
///     [ComponentInfo::new::<String>("host"), ComponentInfo::new::<u16>("port")],
///     |values| Ok(Endpoint {
///         host: values.require("host")?,
///         port: values.take_or_default("port")?,
///     }),
/// );
///
/// let mut values = info.values();
/// values.insert("host", Box::new(String::from("localhost")));
///
/// let endpoint = info.construct(values).unwrap().downcast::<Endpoint>().unwrap();
/// assert_eq!(endpoint.host, "localhost");
/// assert_eq!(endpoint.port, 0);
/// ```
#[derive(Clone)]
pub struct RecordInfo {
    ty: Type,
    components: Box<[ComponentInfo]>,
    constructor: Constructor,
}

impl RecordInfo {
    impl_type_fn!(ty);

    /// Creates a new [`RecordInfo`] from its components and constructor.
    pub fn new<T: Any>(
        components: impl IntoIterator<Item = ComponentInfo>,
        constructor: impl Fn(&mut ComponentValues) -> Result<T, ReflectError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            ty: Type::of::<T>(),
            components: components.into_iter().collect(),
            constructor: Arc::new(move |values: &mut ComponentValues| {
                constructor(values).map(|value| Box::new(value) as BoxedValue)
            }),
        }
    }

    /// Returns all components, in declaration order.
    #[inline]
    pub fn components(&self) -> &[ComponentInfo] {
        &self.components
    }

    #[inline]
    pub fn component(&self, name: &str) -> Option<&ComponentInfo> {
        self.components.iter().find(|c| c.name == name)
    }

    #[inline]
    pub fn component_at(&self, index: usize) -> Option<&ComponentInfo> {
        self.components.get(index)
    }

    #[inline]
    pub fn component_len(&self) -> usize {
        self.components.len()
    }

    /// Returns an empty [`ComponentValues`] for this record.
    #[inline]
    pub fn values(&self) -> ComponentValues {
        ComponentValues::new(self.ty.name())
    }

    /// Invokes the constructor once with the resolved components.
    #[inline]
    pub fn construct(&self, mut values: ComponentValues) -> Result<BoxedValue, ReflectError> {
        (self.constructor)(&mut values)
    }
}

impl fmt::Debug for RecordInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordInfo")
            .field("ty", &self.ty)
            .field("components", &self.components)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use alloc::{boxed::Box, string::String};

    use super::{ComponentInfo, RecordInfo};
    use crate::ReflectError;

    #[derive(Debug, PartialEq)]
    struct Person {
        name: String,
    }

    fn person() -> RecordInfo {
        RecordInfo::new::<Person>([ComponentInfo::new::<String>("name")], |values| {
            Ok(Person {
                name: values.require("name")?,
            })
        })
    }

    #[test]
    fn construct_from_values() {
        let info = person();
        assert_eq!(info.component_len(), 1);
        assert!(info.component("name").unwrap().type_is::<String>());

        let mut values = info.values();
        values.insert("name", Box::new(String::from("John")));
        let value = info.construct(values).unwrap();

        assert_eq!(
            *value.downcast::<Person>().unwrap(),
            Person {
                name: String::from("John")
            }
        );
    }

    #[test]
    fn missing_required_component() {
        let info = person();
        let err = info.construct(info.values()).unwrap_err();
        assert!(matches!(
            err,
            ReflectError::MissingComponent { name: "name", .. }
        ));
    }

    #[test]
    fn wrong_component_type() {
        let info = person();
        let mut values = info.values();
        values.insert("name", Box::new(42_i32));
        assert!(matches!(
            info.construct(values),
            Err(ReflectError::TypeMismatch { .. })
        ));
    }
}
