use alloc::string::String;

use jm_path::NamePath;
use jm_reflect::BoxedValue;
use jm_reflect::info::TypeInfo;

use crate::binder::{BindContext, placeholder};
use crate::callback::BindCallback;
use crate::source::{DataSource, Node};
use crate::strategy::{TypeBinder, priority, resolve};
use crate::{BindError, BindResult, Bindable};

/// Binds scalars through the conversion service.
///
/// String nodes carrying `${path}` references are interpolated first, each
/// reference being bound as a `String` from the same data source.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScalarValueBinder;

impl TypeBinder for ScalarValueBinder {
    fn name(&self) -> &'static str {
        "scalar"
    }

    fn priority(&self) -> i32 {
        priority::SCALAR
    }

    fn supports(&self, info: &TypeInfo) -> bool {
        info.is_scalar()
    }

    fn bind(
        &self,
        ctx: &dyn BindContext,
        path: &NamePath,
        bindable: Bindable,
        source: &DataSource,
        callback: &dyn BindCallback,
    ) -> BindResult<BoxedValue> {
        let text = match resolve(source, path) {
            Some(Node::String(text)) if placeholder::contains(text) => text,
            _ => return self.bind_value(ctx, path, bindable, source, callback),
        };

        let separator = path.separator();
        let interpolated = placeholder::interpolate(text, |reference| {
            let reference = NamePath::with_separator(reference, separator);
            ctx.bind(&reference, Bindable::of::<String>(), source, callback)
                .downcast::<String>()
                .into_result()
        });

        match interpolated {
            Ok(text) => ctx
                .conversion()
                .convert(&Node::String(text), bindable.ty())
                .map_err(BindError::from)
                .into(),
            Err(error) => BindResult::Failed(error),
        }
    }
}
