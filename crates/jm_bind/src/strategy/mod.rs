//! Per-kind binding strategies.
//!
//! The binder keeps its strategies ordered by descending
//! [`priority`](TypeBinder::priority) and hands each bind to the first one
//! whose [`supports`](TypeBinder::supports) accepts the target descriptor.
//! Strategies recurse into child paths through
//! [`ObjectBinder::bind`](crate::binder::ObjectBinder::bind) on the
//! [`BindContext`], never by calling each other.

mod array;
mod bean;
mod list;
mod map;
mod scalar;
mod set;
mod value_object;

pub use array::ArrayBinder;
pub use bean::BeanBinder;
pub use list::ListBinder;
pub use map::MapBinder;
pub use scalar::ScalarValueBinder;
pub use set::SetBinder;
pub use value_object::ValueObjectBinder;

use alloc::boxed::Box;
use alloc::format;
use alloc::string::ToString;
use alloc::vec;
use alloc::vec::Vec;

use jm_path::NamePath;
use jm_reflect::BoxedValue;
use jm_reflect::info::{Type, TypeInfo};

use crate::binder::BindContext;
use crate::callback::BindCallback;
use crate::source::{DataSource, Node};
use crate::{BindError, BindResult, Bindable, ConversionError};

/// Priorities of the built-in strategies. Higher runs first.
pub mod priority {
    pub const SCALAR: i32 = 1000;
    pub const COLLECTION: i32 = 500;
    pub const VALUE_OBJECT: i32 = 100;
    pub const BEAN: i32 = i32::MIN;
}

// -----------------------------------------------------------------------------
// TypeBinder

/// A strategy binding one family of types.
pub trait TypeBinder {
    /// A short name used in log records.
    fn name(&self) -> &'static str;

    /// Ordering among strategies; higher is consulted first.
    fn priority(&self) -> i32;

    /// Returns `true` if this strategy can bind targets described by `info`.
    fn supports(&self, info: &TypeInfo) -> bool;

    /// Binds `path` to the target of `bindable`.
    fn bind(
        &self,
        ctx: &dyn BindContext,
        path: &NamePath,
        bindable: Bindable,
        source: &DataSource,
        callback: &dyn BindCallback,
    ) -> BindResult<BoxedValue>;

    /// Converts the node at `path` straight to the target type.
    ///
    /// An absent or null node yields `Empty`.
    fn bind_value(
        &self,
        ctx: &dyn BindContext,
        path: &NamePath,
        bindable: Bindable,
        source: &DataSource,
        _callback: &dyn BindCallback,
    ) -> BindResult<BoxedValue> {
        BindResult::from_result(convert_at(ctx, path, bindable.ty(), source))
    }
}

/// The built-in strategies, in registration order.
pub fn defaults() -> Vec<Box<dyn TypeBinder>> {
    vec![
        Box::new(ScalarValueBinder),
        Box::new(MapBinder),
        Box::new(ArrayBinder),
        Box::new(SetBinder),
        Box::new(ListBinder),
        Box::new(ValueObjectBinder),
        Box::new(BeanBinder),
    ]
}

// -----------------------------------------------------------------------------
// Shared helpers

/// Returns the node at `path` unless it is absent or null.
pub(crate) fn resolve<'a>(source: &'a DataSource, path: &NamePath) -> Option<&'a Node> {
    source.get(path).filter(|node| !node.is_null())
}

/// Converts the node at `path` with the context's conversion service.
pub(crate) fn convert_at(
    ctx: &dyn BindContext,
    path: &NamePath,
    target: &Type,
    source: &DataSource,
) -> Result<Option<BoxedValue>, BindError> {
    match resolve(source, path) {
        Some(node) => Ok(Some(ctx.conversion().convert(node, target)?)),
        None => Ok(None),
    }
}

/// Converts a node that cannot be decomposed into `target`, if the
/// conversion service knows the type.
pub(crate) fn convert_whole(
    ctx: &dyn BindContext,
    node: &Node,
    target: &Type,
) -> Result<Option<BoxedValue>, BindError> {
    if ctx.conversion().can_convert(target) {
        Ok(Some(ctx.conversion().convert(node, target)?))
    } else {
        Err(unsupported(node, target))
    }
}

pub(crate) fn unsupported(node: &Node, target: &Type) -> BindError {
    ConversionError::Unsupported {
        from: node.kind(),
        to: target.name(),
    }
    .into()
}

/// Binds a child path through the orchestrator.
pub(crate) fn bind_child(
    ctx: &dyn BindContext,
    path: &NamePath,
    bindable: Bindable,
    source: &DataSource,
    callback: &dyn BindCallback,
) -> Result<Option<BoxedValue>, BindError> {
    ctx.bind(path, bindable, source, callback).into_result()
}

/// Returns `true` if `ty` is a scalar or opaque object.
pub(crate) fn is_leaf(ctx: &dyn BindContext, ty: &Type) -> Result<bool, BindError> {
    Ok(ctx.type_info(ty)?.kind().is_leaf())
}

/// `path[index]`
pub(crate) fn element_path(path: &NamePath, index: usize) -> NamePath {
    path.append_str(&format!("[{index}]"))
}

/// `path.key`, or `path[key]` when the key would not parse as one segment.
///
/// Keys that cannot be written as a single segment either way, such as
/// `a]b`, are rejected.
pub(crate) fn key_path(path: &NamePath, key: &str) -> Result<NamePath, BindError> {
    let separator = path.separator();
    let child = if key.is_empty() || key.contains([separator, '[', ']']) {
        path.append_str(&format!("[{key}]"))
    } else {
        path.append_str(key)
    };

    let addressed = child.len() == path.len() + 1
        && child
            .last()
            .is_some_and(|last| last.as_str() == key && !last.kind().is_corrupted());
    if addressed {
        Ok(child)
    } else {
        Err(BindError::UnaddressableKey {
            path: path.to_string(),
            key: key.to_string(),
        })
    }
}

/// Binds every element of the list node at `path` to `item`.
///
/// Returns `None` when the node is absent or null. Elements that bind to
/// nothing are reported through `on_empty`, which may veto the bind.
pub(crate) fn bind_elements(
    ctx: &dyn BindContext,
    path: &NamePath,
    target: &Type,
    item: &Type,
    source: &DataSource,
    callback: &dyn BindCallback,
    mut on_empty: impl FnMut(&NamePath) -> Result<(), BindError>,
) -> Result<Option<Vec<BoxedValue>>, BindError> {
    let Some(node) = resolve(source, path) else {
        return Ok(None);
    };
    let Some(nodes) = node.as_list() else {
        return Err(unsupported(node, target));
    };

    let mut items = Vec::with_capacity(nodes.len());
    for index in 0..nodes.len() {
        let child = element_path(path, index);
        match bind_child(ctx, &child, Bindable::of_type(*item), source, callback)? {
            Some(value) => items.push(value),
            None => on_empty(&child)?,
        }
    }
    Ok(Some(items))
}

/// Logs and skips an element that bound to nothing.
pub(crate) fn skip_empty(child: &NamePath) -> Result<(), BindError> {
    log::debug!("no value bound for element `{child}`, skipped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_paths() {
        let path = NamePath::new("servers");
        assert_eq!(element_path(&path, 2).to_string(), "servers[2]");
        assert_eq!(key_path(&path, "eu").unwrap().to_string(), "servers.eu");
        assert_eq!(key_path(&path, "eu.west").unwrap().to_string(), "servers[eu.west]");
        assert_eq!(key_path(&path, "a[b]").unwrap().get(1), Some("a[b]"));
        assert_eq!(key_path(&path, "").unwrap().get(1), Some(""));

        let root = NamePath::empty();
        assert_eq!(element_path(&root, 0).to_string(), "[0]");
        assert_eq!(key_path(&root, "name").unwrap().to_string(), "name");
    }

    #[test]
    fn keys_with_stray_brackets_are_rejected() {
        let path = NamePath::new("servers");
        for key in ["a]b", "a[b", "]"] {
            assert!(
                matches!(key_path(&path, key), Err(BindError::UnaddressableKey { .. })),
                "{key}"
            );
        }
    }

    #[test]
    fn defaults_cover_every_kind_once() {
        let binders = defaults();
        assert_eq!(binders.len(), 7);
        assert_eq!(binders[0].priority(), priority::SCALAR);
        assert_eq!(binders[6].priority(), priority::BEAN);
    }
}
