use jm_path::NamePath;
use jm_reflect::BoxedValue;
use jm_reflect::info::TypeInfo;

use crate::binder::BindContext;
use crate::callback::BindCallback;
use crate::source::DataSource;
use crate::strategy::{TypeBinder, bind_elements, priority, skip_empty};
use crate::{BindError, BindResult, Bindable};

/// Binds sets from list nodes.
///
/// Elements bind at `path[i]`; duplicates collapse the way the set type
/// defines equality, and ordered sets keep their own order.
#[derive(Debug, Default, Clone, Copy)]
pub struct SetBinder;

impl SetBinder {
    fn bind_set(
        ctx: &dyn BindContext,
        path: &NamePath,
        mut bindable: Bindable,
        source: &DataSource,
        callback: &dyn BindCallback,
    ) -> Result<Option<BoxedValue>, BindError> {
        let info = ctx.type_info(bindable.ty())?;
        let set = info.as_set()?;

        let Some(items) =
            bind_elements(ctx, path, set.ty(), set.item(), source, callback, skip_empty)?
        else {
            return Ok(None);
        };

        let value = match bindable.take_instance() {
            Some(mut instance) => {
                set.extend(&mut *instance, items)?;
                instance
            }
            None => set.from_items(items)?,
        };
        Ok(Some(value))
    }
}

impl TypeBinder for SetBinder {
    fn name(&self) -> &'static str {
        "set"
    }

    fn priority(&self) -> i32 {
        priority::COLLECTION
    }

    fn supports(&self, info: &TypeInfo) -> bool {
        info.is_set()
    }

    fn bind(
        &self,
        ctx: &dyn BindContext,
        path: &NamePath,
        bindable: Bindable,
        source: &DataSource,
        callback: &dyn BindCallback,
    ) -> BindResult<BoxedValue> {
        BindResult::from_result(Self::bind_set(ctx, path, bindable, source, callback))
    }
}
