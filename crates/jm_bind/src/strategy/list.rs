use jm_path::NamePath;
use jm_reflect::BoxedValue;
use jm_reflect::info::TypeInfo;

use crate::binder::BindContext;
use crate::callback::BindCallback;
use crate::source::DataSource;
use crate::strategy::{TypeBinder, bind_elements, priority, skip_empty};
use crate::{BindError, BindResult, Bindable};

/// Binds growable sequences such as `Vec<T>` from list nodes.
///
/// Elements bind at `path[i]` in order. Elements that bind to nothing are
/// skipped. A given instance is extended rather than replaced.
#[derive(Debug, Default, Clone, Copy)]
pub struct ListBinder;

impl ListBinder {
    fn bind_list(
        ctx: &dyn BindContext,
        path: &NamePath,
        mut bindable: Bindable,
        source: &DataSource,
        callback: &dyn BindCallback,
    ) -> Result<Option<BoxedValue>, BindError> {
        let info = ctx.type_info(bindable.ty())?;
        let list = info.as_list()?;

        let Some(items) =
            bind_elements(ctx, path, list.ty(), list.item(), source, callback, skip_empty)?
        else {
            return Ok(None);
        };

        let value = match bindable.take_instance() {
            Some(mut instance) => {
                list.extend(&mut *instance, items)?;
                instance
            }
            None => list.from_items(items)?,
        };
        Ok(Some(value))
    }
}

impl TypeBinder for ListBinder {
    fn name(&self) -> &'static str {
        "list"
    }

    fn priority(&self) -> i32 {
        priority::COLLECTION
    }

    fn supports(&self, info: &TypeInfo) -> bool {
        info.is_list()
    }

    fn bind(
        &self,
        ctx: &dyn BindContext,
        path: &NamePath,
        bindable: Bindable,
        source: &DataSource,
        callback: &dyn BindCallback,
    ) -> BindResult<BoxedValue> {
        BindResult::from_result(Self::bind_list(ctx, path, bindable, source, callback))
    }
}
