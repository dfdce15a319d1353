use alloc::boxed::Box;
use alloc::string::ToString;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::cmp::Reverse;
use core::fmt;

use jm_path::NamePath;
use jm_reflect::info::{Type, TypeInfo};
use jm_reflect::{BoxedValue, TypeRegistry, Typed};

use crate::binder::cycle::CycleDetector;
use crate::binder::{BindContext, BinderBuilder, BindingStrategy, ObjectBinder, placeholder};
use crate::callback::{BindCallback, Recovery};
use crate::conversion::Conversion;
use crate::source::{DataSource, Node};
use crate::strategy::{self, TypeBinder};
use crate::{BindError, BindResult, Bindable};

// -----------------------------------------------------------------------------
// Binder

/// Binds paths of a [`DataSource`] to typed values.
///
/// The binder owns the data source, a [`TypeRegistry`], the conversion
/// service, the default [`BindCallback`] and the strategies. For each bind
/// it selects the first strategy supporting the target, guards the path
/// against re-entry, follows whole-value `${path}` aliases and reports
/// failures to the callback.
///
/// A binder is single-threaded: the registry and the set of in-flight
/// paths live behind [`RefCell`]s.
///
/// # Examples
///
/// ```
/// use jm_bind::{Binder, source::Node};
///
/// let source: Node = [("server", Node::from_iter([("port", 8080)]))].into_iter().collect();
/// let binder = Binder::new(source);
///
/// assert_eq!(binder.bind::<u16>("server.port").unwrap_or_default(), 8080);
/// assert!(binder.bind::<u16>("server.missing").is_empty());
/// ```
pub struct Binder {
    source: DataSource,
    registry: RefCell<TypeRegistry>,
    conversion: Box<dyn Conversion>,
    callback: Box<dyn BindCallback>,
    strategy: BindingStrategy,
    /// Sorted by descending priority.
    binders: Vec<Box<dyn TypeBinder>>,
    cycles: CycleDetector,
}

impl Binder {
    /// Creates a binder over `source` with default options.
    #[inline]
    pub fn new(source: impl Into<DataSource>) -> Self {
        BinderBuilder::new(source).build()
    }

    /// Creates a binder over `source` whose binds report to `callback`.
    #[inline]
    pub fn with(source: impl Into<DataSource>, callback: impl BindCallback + 'static) -> Self {
        BinderBuilder::new(source).default_callback(callback).build()
    }

    /// Returns a [`BinderBuilder`] for the given source.
    #[inline]
    pub fn builder(source: impl Into<DataSource>) -> BinderBuilder {
        BinderBuilder::new(source)
    }

    pub(super) fn new_internal(mut builder: BinderBuilder) -> Self {
        let conversion = builder.take_conversion();

        let mut binders = builder.binders;
        binders.extend(strategy::defaults());
        // Stable: among equal priorities, user strategies stay in front.
        binders.sort_by_key(|binder| Reverse(binder.priority()));

        Self {
            source: builder.source,
            registry: RefCell::new(builder.registry.unwrap_or_default()),
            conversion,
            callback: builder.callback.unwrap_or_else(|| Box::new(())),
            strategy: builder.strategy,
            binders,
            cycles: CycleDetector::default(),
        }
    }

    // -------------------------------------------------------------------------
    // Options

    /// Returns the data source binds read from.
    #[inline]
    pub fn data_source(&self) -> &DataSource {
        &self.source
    }

    /// Returns the callback used by [`bind`](Self::bind).
    #[inline]
    pub fn default_callback(&self) -> &dyn BindCallback {
        &*self.callback
    }

    #[inline]
    pub fn set_default_callback(&mut self, callback: impl BindCallback + 'static) {
        self.callback = Box::new(callback);
    }

    #[inline]
    pub fn binding_strategy(&self) -> BindingStrategy {
        self.strategy
    }

    /// Binds nested beans, records and collections recursively.
    #[inline]
    pub fn use_deep_binding(&mut self) {
        self.strategy = BindingStrategy::Deep;
    }

    /// Only binds leaf properties of beans and records.
    #[inline]
    pub fn use_shallow_binding(&mut self) {
        self.strategy = BindingStrategy::Shallow;
    }

    /// Registers `T` and the types it depends on.
    ///
    /// [`bind`](Self::bind) registers its target itself; this is needed for
    /// types only reached through [`bind_bindable`](Self::bind_bindable).
    #[inline]
    pub fn register<T: Typed>(&self) {
        self.registry.borrow_mut().register::<T>();
    }

    /// Registers a descriptor built outside of [`Typed`].
    #[inline]
    pub fn register_info(&self, info: TypeInfo) {
        self.registry.borrow_mut().register_info(info);
    }

    /// Returns the number of paths currently being bound.
    ///
    /// Zero whenever no bind is running.
    #[inline]
    pub fn in_flight(&self) -> usize {
        self.cycles.len()
    }

    // -------------------------------------------------------------------------
    // Binding

    /// Binds `path` to a new `T`, reporting failures to the default callback.
    #[inline]
    pub fn bind<T: Typed>(&self, path: impl Into<NamePath>) -> BindResult<T> {
        self.bind_with(path, &*self.callback)
    }

    /// Binds `path` to a new `T`, reporting failures to `callback`.
    pub fn bind_with<T: Typed>(&self, path: impl Into<NamePath>, callback: &dyn BindCallback) -> BindResult<T> {
        self.register::<T>();
        let path = path.into();
        ObjectBinder::bind(self, &path, Bindable::of::<T>(), &self.source, callback).downcast()
    }

    /// Binds `path` into `instance`.
    ///
    /// When there is no data at `path` the instance is returned untouched.
    pub fn bind_instance<T: Typed>(&self, path: impl Into<NamePath>, instance: T) -> BindResult<T> {
        self.register::<T>();
        let path = path.into();
        if !self.source.contains(&path) {
            return BindResult::Present(instance);
        }

        let bindable = Bindable::of::<T>().with_instance(Box::new(instance));
        ObjectBinder::bind(self, &path, bindable, &self.source, &*self.callback).downcast()
    }

    /// Binds `path` to the target of `bindable`, reporting failures to the
    /// default callback.
    ///
    /// The target type must be registered.
    pub fn bind_bindable(&self, path: impl Into<NamePath>, bindable: Bindable) -> BindResult<BoxedValue> {
        ObjectBinder::bind(self, &path.into(), bindable, &self.source, &*self.callback)
    }

    // -------------------------------------------------------------------------
    // Internal

    fn select(&self, target: &Type) -> Result<&dyn TypeBinder, BindError> {
        let info = BindContext::type_info(self, target)?;
        let binder = self
            .binders
            .iter()
            .find(|binder| binder.supports(&info))
            .ok_or(BindError::NoStrategy(target.name()))?;

        log::trace!("`{}` binder selected for `{target}`", binder.name());
        Ok(&**binder)
    }

    fn delegate(
        &self,
        binder: &dyn TypeBinder,
        path: &NamePath,
        bindable: Bindable,
        source: &DataSource,
        callback: &dyn BindCallback,
    ) -> BindResult<BoxedValue> {
        if let Some(Node::String(text)) = source.get(path)
            && let Some(reference) = placeholder::alias(text)
        {
            let alias = NamePath::with_separator(reference, path.separator());
            log::debug!("`{path}` is an alias of `{alias}`");
            return ObjectBinder::bind(self, &alias, bindable, source, callback);
        }

        binder.bind(self, path, bindable, source, callback)
    }

    fn recover(
        &self,
        path: &NamePath,
        target: &Type,
        error: BindError,
        callback: &dyn BindCallback,
    ) -> BindResult<BoxedValue> {
        log::debug!("binding `{path}` to `{target}` failed: {error}");

        match callback.on_failure(path, target, error) {
            Recovery::Fallback(value) => BindResult::Present(value),
            Recovery::Ignore => {
                log::warn!("ignored failure while binding `{path}` to `{target}`");
                BindResult::Empty
            }
            Recovery::Fail(error) => BindResult::Failed(BindError::Failed {
                path: path.to_string(),
                target: target.name(),
                source: Box::new(error),
            }),
        }
    }
}

impl ObjectBinder for Binder {
    fn bind(
        &self,
        path: &NamePath,
        bindable: Bindable,
        source: &DataSource,
        callback: &dyn BindCallback,
    ) -> BindResult<BoxedValue> {
        let target = *bindable.ty();

        // Held until the callback has run.
        let guard;
        let result = match self.select(&target) {
            Err(error) => BindResult::Failed(error),
            Ok(binder) => {
                guard = self.cycles.enter(path);
                if guard.is_some() {
                    self.delegate(binder, path, bindable, source, callback)
                } else {
                    BindResult::Failed(BindError::Recursive(path.to_string()))
                }
            }
        };

        match result {
            BindResult::Failed(error) => self.recover(path, &target, error, callback),
            result => result,
        }
    }

    fn bind_value(
        &self,
        _path: &NamePath,
        _bindable: Bindable,
        _source: &DataSource,
        _callback: &dyn BindCallback,
    ) -> BindResult<BoxedValue> {
        BindResult::Failed(BindError::Unsupported(
            "the orchestrator does not convert values itself",
        ))
    }
}

impl BindContext for Binder {
    #[inline]
    fn conversion(&self) -> &dyn Conversion {
        &*self.conversion
    }

    fn type_info(&self, ty: &Type) -> Result<Arc<TypeInfo>, BindError> {
        self.registry
            .borrow()
            .get_type_info(ty.id())
            .ok_or(BindError::UnregisteredType(ty.name()))
    }

    #[inline]
    fn binding_strategy(&self) -> BindingStrategy {
        self.strategy
    }

    #[inline]
    fn data_source(&self) -> &DataSource {
        &self.source
    }
}

impl fmt::Debug for Binder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binder")
            .field("source", &self.source)
            .field("strategy", &self.strategy)
            .field("registered", &self.registry.borrow().len())
            .field("binders", &self.binders.iter().map(|b| b.name()).collect::<Vec<_>>())
            .field("in_flight", &self.cycles.len())
            .finish()
    }
}
