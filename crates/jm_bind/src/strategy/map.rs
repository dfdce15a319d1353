use alloc::vec::Vec;

use jm_path::NamePath;
use jm_reflect::BoxedValue;
use jm_reflect::info::TypeInfo;

use crate::binder::BindContext;
use crate::callback::BindCallback;
use crate::source::DataSource;
use crate::strategy::{TypeBinder, bind_child, key_path, priority, resolve, unsupported};
use crate::{BindError, BindResult, Bindable};

/// Binds string-keyed maps from map nodes.
///
/// Each entry binds at `path.key`, or `path[key]` for keys that are not a
/// plain segment. Keys that fit neither form fail the bind. Entries bound
/// to nothing are left out; a given instance is extended.
#[derive(Debug, Default, Clone, Copy)]
pub struct MapBinder;

impl MapBinder {
    fn bind_map(
        ctx: &dyn BindContext,
        path: &NamePath,
        mut bindable: Bindable,
        source: &DataSource,
        callback: &dyn BindCallback,
    ) -> Result<Option<BoxedValue>, BindError> {
        let info = ctx.type_info(bindable.ty())?;
        let map = info.as_map()?;

        let Some(node) = resolve(source, path) else {
            return Ok(None);
        };
        let Some(nodes) = node.as_map() else {
            return Err(unsupported(node, map.ty()));
        };

        let mut entries = Vec::with_capacity(nodes.len());
        for key in nodes.keys() {
            let child = key_path(path, key)?;
            match bind_child(ctx, &child, Bindable::of_type(*map.value()), source, callback)? {
                Some(value) => entries.push((key.clone(), value)),
                None => log::debug!("no value bound for entry `{child}`, skipped"),
            }
        }

        let value = match bindable.take_instance() {
            Some(mut instance) => {
                map.extend(&mut *instance, entries)?;
                instance
            }
            None => map.from_entries(entries)?,
        };
        Ok(Some(value))
    }
}

impl TypeBinder for MapBinder {
    fn name(&self) -> &'static str {
        "map"
    }

    fn priority(&self) -> i32 {
        priority::COLLECTION
    }

    fn supports(&self, info: &TypeInfo) -> bool {
        info.is_map()
    }

    fn bind(
        &self,
        ctx: &dyn BindContext,
        path: &NamePath,
        bindable: Bindable,
        source: &DataSource,
        callback: &dyn BindCallback,
    ) -> BindResult<BoxedValue> {
        BindResult::from_result(Self::bind_map(ctx, path, bindable, source, callback))
    }
}
