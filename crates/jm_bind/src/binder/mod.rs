//! The binder orchestrator and the contracts strategies bind through.

mod binder;
mod builder;
mod cycle;
pub(crate) mod placeholder;

#[cfg(test)]
mod tests;

pub use binder::Binder;
pub use builder::BinderBuilder;

use alloc::sync::Arc;

use jm_path::NamePath;
use jm_reflect::BoxedValue;
use jm_reflect::info::{Type, TypeInfo};

use crate::callback::BindCallback;
use crate::conversion::Conversion;
use crate::source::DataSource;
use crate::{BindError, BindResult, Bindable};

// -----------------------------------------------------------------------------
// BindingStrategy

/// How far below the bound path object graphs are populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BindingStrategy {
    /// Nested beans, records and collections are bound recursively.
    #[default]
    Deep,
    /// Beans and records only receive their leaf properties; nested
    /// complex properties are left untouched.
    Shallow,
}

impl BindingStrategy {
    #[inline]
    pub const fn is_deep(self) -> bool {
        matches!(self, Self::Deep)
    }

    #[inline]
    pub const fn is_shallow(self) -> bool {
        matches!(self, Self::Shallow)
    }
}

// -----------------------------------------------------------------------------
// ObjectBinder

/// Something that binds a path of a data source to a described type.
pub trait ObjectBinder {
    /// Binds `path` of `source` to the target of `bindable`.
    ///
    /// Failures are reported to `callback`, whose [`Recovery`] decides the
    /// returned result.
    ///
    /// [`Recovery`]: crate::Recovery
    fn bind(
        &self,
        path: &NamePath,
        bindable: Bindable,
        source: &DataSource,
        callback: &dyn BindCallback,
    ) -> BindResult<BoxedValue>;

    /// Converts the node at `path` directly, without decomposing the target.
    fn bind_value(
        &self,
        path: &NamePath,
        bindable: Bindable,
        source: &DataSource,
        callback: &dyn BindCallback,
    ) -> BindResult<BoxedValue>;
}

// -----------------------------------------------------------------------------
// BindContext

/// What strategies see of the binder driving them.
///
/// [`ObjectBinder::bind`] on the context re-enters the orchestrator, with
/// cycle detection and failure recovery, for nested paths.
pub trait BindContext: ObjectBinder {
    /// Returns the injected conversion service.
    fn conversion(&self) -> &dyn Conversion;

    /// Returns the descriptor of `ty`.
    fn type_info(&self, ty: &Type) -> Result<Arc<TypeInfo>, BindError>;

    /// Returns the current deep/shallow setting.
    fn binding_strategy(&self) -> BindingStrategy;

    /// Returns the data source the binder was created with.
    fn data_source(&self) -> &DataSource;
}
