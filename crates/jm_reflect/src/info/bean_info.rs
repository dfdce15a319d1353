use alloc::{boxed::Box, sync::Arc};
use core::any::Any;
use core::fmt;

use crate::info::{Type, TypeInfo, downcast, downcast_mut, impl_type_fn};
use crate::{BoxedValue, ReflectError, Typed};

// -----------------------------------------------------------------------------
// PropertyInfo

type Getter = Arc<dyn Fn(&dyn Any) -> Option<BoxedValue> + Send + Sync>;
type Setter = Arc<dyn Fn(&mut dyn Any, BoxedValue) -> Result<(), ReflectError> + Send + Sync>;

/// A property of a mutable bean: declared type, optional accessors and an
/// optional preferred external name.
///
/// # Examples
///
/// ```
/// use jm_reflect::info::PropertyInfo;
///
/// #[derive(Default)]
/// struct Server { port: u16 }
///
/// let port = PropertyInfo::new("port", |s: &mut Server, v: u16| s.port = v)
///     .with_getter(|s: &Server| s.port)
///     .with_preferred_name("server-port");
///
/// let mut server = Server::default();
/// port.set(&mut server, Box::new(8080_u16)).unwrap();
///
/// assert_eq!(server.port, 8080);
/// assert_eq!(port.binding_name(), "server-port");
/// ```
#[derive(Clone)]
pub struct PropertyInfo {
    ty: Type,
    name: &'static str,
    preferred_name: Option<&'static str>,
    type_info: fn() -> TypeInfo,
    getter: Option<Getter>,
    setter: Option<Setter>,
}

impl PropertyInfo {
    impl_type_fn!(ty);

    /// Creates a writable property of bean `B` with value type `V`.
    pub fn new<B, V>(name: &'static str, setter: impl Fn(&mut B, V) + Send + Sync + 'static) -> Self
    where
        B: Any,
        V: Typed,
    {
        Self {
            ty: Type::of::<V>(),
            name,
            preferred_name: None,
            type_info: V::type_info,
            getter: None,
            setter: Some(Arc::new(move |target: &mut dyn Any, value: BoxedValue| {
                let target = downcast_mut::<B>(target)?;
                setter(target, downcast::<V>(value)?);
                Ok(())
            })),
        }
    }

    /// Creates a property of bean `B` that can only be read.
    ///
    /// The binder skips such properties.
    pub fn read_only<B, V>(name: &'static str, getter: impl Fn(&B) -> V + Send + Sync + 'static) -> Self
    where
        B: Any,
        V: Typed,
    {
        Self {
            ty: Type::of::<V>(),
            name,
            preferred_name: None,
            type_info: V::type_info,
            getter: None,
            setter: None,
        }
        .with_getter(getter)
    }

    /// Attaches a getter returning the current value of the property.
    pub fn with_getter<B, V>(mut self, getter: impl Fn(&B) -> V + Send + Sync + 'static) -> Self
    where
        B: Any,
        V: Any,
    {
        debug_assert!(self.ty.is::<V>(), "getter type differs from property type");
        self.getter = Some(Arc::new(move |target: &dyn Any| {
            target
                .downcast_ref::<B>()
                .map(|target| Box::new(getter(target)) as BoxedValue)
        }));
        self
    }

    /// Sets the external name used to look the property up.
    #[inline]
    pub fn with_preferred_name(mut self, name: &'static str) -> Self {
        self.preferred_name = Some(name);
        self
    }

    /// Returns the property name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn preferred_name(&self) -> Option<&'static str> {
        self.preferred_name
    }

    /// Returns the preferred name if declared, the property name otherwise.
    #[inline]
    pub const fn binding_name(&self) -> &'static str {
        match self.preferred_name {
            Some(name) => name,
            None => self.name,
        }
    }

    /// Returns the property's [`TypeInfo`].
    #[inline]
    pub fn type_info(&self) -> TypeInfo {
        (self.type_info)()
    }

    #[inline]
    pub(crate) const fn type_info_fn(&self) -> fn() -> TypeInfo {
        self.type_info
    }

    #[inline]
    pub const fn is_readable(&self) -> bool {
        self.getter.is_some()
    }

    #[inline]
    pub const fn is_writable(&self) -> bool {
        self.setter.is_some()
    }

    /// Reads the property from `target`.
    ///
    /// Returns `None` if there is no getter or `target` has the wrong type.
    pub fn get(&self, target: &dyn Any) -> Option<BoxedValue> {
        self.getter.as_ref().and_then(|getter| getter(target))
    }

    /// Writes `value` into the property of `target`.
    pub fn set(&self, target: &mut dyn Any, value: BoxedValue) -> Result<(), ReflectError> {
        match &self.setter {
            Some(setter) => setter(target, value),
            None => Err(ReflectError::NotWritable(self.name)),
        }
    }
}

impl fmt::Debug for PropertyInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyInfo")
            .field("name", &self.name)
            .field("preferred_name", &self.preferred_name)
            .field("ty", &self.ty)
            .field("readable", &self.is_readable())
            .field("writable", &self.is_writable())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// BeanInfo

type Factory = Arc<dyn Fn() -> BoxedValue + Send + Sync>;

/// A mutable object populated property by property.
#[derive(Clone)]
pub struct BeanInfo {
    ty: Type,
    properties: Box<[PropertyInfo]>,
    factory: Option<Factory>,
}

impl BeanInfo {
    impl_type_fn!(ty);

    /// Creates a new [`BeanInfo`] without a factory.
    ///
    /// Such a bean can only be bound into an existing instance.
    pub fn new<T: Any>(properties: impl IntoIterator<Item = PropertyInfo>) -> Self {
        Self {
            ty: Type::of::<T>(),
            properties: properties.into_iter().collect(),
            factory: None,
        }
    }

    /// Attaches a factory producing fresh instances.
    pub fn with_factory<T: Any>(mut self, factory: impl Fn() -> T + Send + Sync + 'static) -> Self {
        debug_assert!(self.ty.is::<T>(), "factory type differs from bean type");
        self.factory = Some(Arc::new(move || Box::new(factory()) as BoxedValue));
        self
    }

    /// Uses `T::default` as the factory.
    #[inline]
    pub fn with_default_factory<T: Any + Default>(self) -> Self {
        self.with_factory(T::default)
    }

    /// Returns all properties, in declaration order.
    #[inline]
    pub fn properties(&self) -> &[PropertyInfo] {
        &self.properties
    }

    /// Looks a property up by name or preferred name.
    pub fn property(&self, name: &str) -> Option<&PropertyInfo> {
        self.properties
            .iter()
            .find(|p| p.name == name || p.preferred_name == Some(name))
    }

    /// Returns the writable properties.
    pub fn writable_properties(&self) -> impl Iterator<Item = &PropertyInfo> {
        self.properties.iter().filter(|p| p.is_writable())
    }

    #[inline]
    pub fn has_factory(&self) -> bool {
        self.factory.is_some()
    }

    /// Produces a fresh instance through the factory.
    pub fn instantiate(&self) -> Result<BoxedValue, ReflectError> {
        match &self.factory {
            Some(factory) => Ok(factory()),
            None => Err(ReflectError::NoFactory(self.ty.name())),
        }
    }
}

impl fmt::Debug for BeanInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeanInfo")
            .field("ty", &self.ty)
            .field("properties", &self.properties)
            .field("factory", &self.factory.is_some())
            .finish()
    }
}
