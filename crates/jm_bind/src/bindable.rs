use alloc::boxed::Box;
use core::any::Any;
use core::fmt;

use jm_reflect::BoxedValue;
use jm_reflect::info::Type;

type Supplier = Box<dyn FnOnce() -> BoxedValue>;

/// What to produce: a target type, plus an optional instance to bind into.
///
/// The instance is either given up front or obtained lazily from a
/// supplier the first time a binder asks for it. A bindable is consumed by
/// the bind it describes.
///
/// # Examples
///
/// ```
/// use jm_bind::Bindable;
///
/// let mut bindable = Bindable::of::<Vec<u8>>().with_supplier(|| Box::new(vec![1_u8]));
///
/// assert!(bindable.ty().is::<Vec<u8>>());
/// assert!(bindable.has_instance());
///
/// let list = bindable.take_instance().unwrap();
/// assert_eq!(*list.downcast::<Vec<u8>>().unwrap(), [1]);
/// ```
pub struct Bindable {
    ty: Type,
    instance: Option<BoxedValue>,
    supplier: Option<Supplier>,
}

impl Bindable {
    /// Describes a fresh value of type `T`.
    #[inline]
    pub fn of<T: Any>() -> Self {
        Self::of_type(Type::of::<T>())
    }

    /// Describes a fresh value of type `ty`.
    #[inline]
    pub fn of_type(ty: Type) -> Self {
        Self {
            ty,
            instance: None,
            supplier: None,
        }
    }

    /// Binds into `instance` instead of creating a new value.
    #[inline]
    pub fn with_instance(mut self, instance: BoxedValue) -> Self {
        debug_assert!(
            (*instance).type_id() == self.ty.id(),
            "instance type differs from bindable type"
        );
        self.instance = Some(instance);
        self
    }

    /// Binds into the value produced by `supplier`, called on demand.
    #[inline]
    pub fn with_supplier(mut self, supplier: impl FnOnce() -> BoxedValue + 'static) -> Self {
        self.supplier = Some(Box::new(supplier));
        self
    }

    /// Returns the target [`Type`].
    #[inline]
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    /// Returns `true` if an instance is given or can be supplied.
    #[inline]
    pub fn has_instance(&self) -> bool {
        self.instance.is_some() || self.supplier.is_some()
    }

    /// Takes the existing instance, calling the supplier if needed.
    pub fn take_instance(&mut self) -> Option<BoxedValue> {
        self.instance
            .take()
            .or_else(|| self.supplier.take().map(|supplier| supplier()))
    }
}

impl fmt::Debug for Bindable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bindable")
            .field("ty", &self.ty)
            .field("instance", &self.instance.is_some())
            .field("supplier", &self.supplier.is_some())
            .finish()
    }
}
