use alloc::string::ToString;

use jm_path::NamePath;
use jm_reflect::BoxedValue;
use jm_reflect::info::TypeInfo;

use crate::binder::BindContext;
use crate::callback::BindCallback;
use crate::source::DataSource;
use crate::strategy::{TypeBinder, bind_elements, priority};
use crate::{BindError, BindResult, Bindable};

/// Binds `[T; N]` and `Box<[T]>` from list nodes.
///
/// Every element must bind: a hole would shift the remaining elements, so
/// an element bound to nothing fails the array. A fixed array also fails
/// when the list length differs from `N`. Arrays are always built fresh.
#[derive(Debug, Default, Clone, Copy)]
pub struct ArrayBinder;

impl TypeBinder for ArrayBinder {
    fn name(&self) -> &'static str {
        "array"
    }

    fn priority(&self) -> i32 {
        priority::COLLECTION
    }

    fn supports(&self, info: &TypeInfo) -> bool {
        info.is_array()
    }

    fn bind(
        &self,
        ctx: &dyn BindContext,
        path: &NamePath,
        bindable: Bindable,
        source: &DataSource,
        callback: &dyn BindCallback,
    ) -> BindResult<BoxedValue> {
        let result = ctx.type_info(bindable.ty()).and_then(|info| {
            let array = info.as_array()?;
            let missing = |child: &NamePath| -> Result<(), BindError> {
                Err(BindError::MissingElement(child.to_string()))
            };
            match bind_elements(ctx, path, array.ty(), array.item(), source, callback, missing)? {
                Some(items) => Ok(Some(array.from_items(items)?)),
                None => Ok(None),
            }
        });
        BindResult::from_result(result)
    }
}
