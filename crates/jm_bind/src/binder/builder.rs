use alloc::boxed::Box;
use alloc::vec::Vec;

use jm_reflect::TypeRegistry;

use crate::binder::{Binder, BindingStrategy};
use crate::callback::BindCallback;
use crate::conversion::{Conversion, DefaultConversion};
use crate::source::DataSource;
use crate::strategy::TypeBinder;

// -----------------------------------------------------------------------------
// BinderBuilder

/// Used to create a [`Binder`].
///
/// Every option has a default: deep binding, a callback that propagates
/// failures, [`DefaultConversion`], and a registry preloaded with the
/// primitive types.
///
/// # Examples
///
/// ```
/// use jm_bind::{Binder, BindingStrategy, IgnoreErrors, source::Node};
///
/// let source: Node = [("port", Node::from("not a number"))].into_iter().collect();
/// let binder = Binder::builder(source)
///     .binding_strategy(BindingStrategy::Shallow)
///     .default_callback(IgnoreErrors)
///     .build();
///
/// assert!(binder.binding_strategy().is_shallow());
/// assert!(binder.bind::<u16>("port").is_empty());
/// ```
#[must_use]
pub struct BinderBuilder {
    /// The data every bind reads from.
    pub(super) source: DataSource,
    /// Type descriptors; the primitives if unset.
    pub(super) registry: Option<TypeRegistry>,
    /// Leaf conversion; [`DefaultConversion`] if unset.
    pub(super) conversion: Option<Box<dyn Conversion>>,
    /// Used by binds that do not name a callback.
    pub(super) callback: Option<Box<dyn BindCallback>>,
    pub(super) strategy: BindingStrategy,
    /// Strategies consulted before built-in ones of equal priority.
    pub(super) binders: Vec<Box<dyn TypeBinder>>,
}

impl BinderBuilder {
    /// Creates a new [`BinderBuilder`] reading from `source`.
    #[inline]
    pub fn new(source: impl Into<DataSource>) -> Self {
        Self {
            source: source.into(),
            registry: None,
            conversion: None,
            callback: None,
            strategy: BindingStrategy::Deep,
            binders: Vec::new(),
        }
    }

    /// Sets deep or shallow binding.
    #[inline]
    pub fn binding_strategy(mut self, strategy: BindingStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the callback used when a bind does not name one.
    #[inline]
    pub fn default_callback(mut self, callback: impl BindCallback + 'static) -> Self {
        self.callback = Some(Box::new(callback));
        self
    }

    /// Replaces the conversion service.
    #[inline]
    pub fn conversion(mut self, conversion: impl Conversion + 'static) -> Self {
        self.conversion = Some(Box::new(conversion));
        self
    }

    /// Starts from `registry` instead of the primitive types.
    #[inline]
    pub fn registry(mut self, registry: TypeRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Adds a strategy.
    ///
    /// It wins over built-in strategies of the same priority.
    #[inline]
    pub fn binder(mut self, binder: impl TypeBinder + 'static) -> Self {
        self.binders.push(Box::new(binder));
        self
    }

    /// Creates a [`Binder`] with the configured options.
    #[inline]
    pub fn build(self) -> Binder {
        Binder::new_internal(self)
    }

    pub(super) fn take_conversion(&mut self) -> Box<dyn Conversion> {
        self.conversion
            .take()
            .unwrap_or_else(|| Box::new(DefaultConversion::new()))
    }
}
