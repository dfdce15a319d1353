use alloc::vec::Vec;

use jm_path::NamePath;
use jm_reflect::BoxedValue;
use jm_reflect::info::TypeInfo;

use crate::binder::BindContext;
use crate::callback::BindCallback;
use crate::source::DataSource;
use crate::strategy::{TypeBinder, bind_child, convert_whole, is_leaf, priority, resolve};
use crate::{BindError, BindResult, Bindable};

/// Binds immutable records through their constructor.
///
/// Components bind at `path.name` and the record is built once from
/// whatever bound; the constructor decides how to treat missing ones.
/// Failures of sibling components are gathered into one
/// [`BindError::Properties`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ValueObjectBinder;

impl ValueObjectBinder {
    fn bind_record(
        ctx: &dyn BindContext,
        path: &NamePath,
        bindable: Bindable,
        source: &DataSource,
        callback: &dyn BindCallback,
    ) -> Result<Option<BoxedValue>, BindError> {
        let ty = *bindable.ty();
        let info = ctx.type_info(&ty)?;
        let record = info.as_record()?;

        let Some(node) = resolve(source, path) else {
            return Ok(None);
        };
        if !node.is_map() {
            return convert_whole(ctx, node, &ty);
        }

        let shallow = ctx.binding_strategy().is_shallow();
        let mut values = record.values();
        let mut errors: Vec<BindError> = Vec::new();

        for component in record.components() {
            if shallow && !is_leaf(ctx, component.ty())? {
                log::trace!("shallow binding skips component `{}` of `{ty}`", component.name());
                continue;
            }

            let child = path.append_str(component.name());
            match bind_child(ctx, &child, Bindable::of_type(*component.ty()), source, callback) {
                Ok(Some(value)) => values.insert(component.name(), value),
                Ok(None) => {}
                Err(error) => errors.push(error),
            }
        }

        if !errors.is_empty() {
            return Err(BindError::Properties {
                ty: ty.name(),
                errors,
            });
        }

        record
            .construct(values)
            .map(Some)
            .map_err(|source| BindError::Instantiation {
                ty: ty.name(),
                source,
            })
    }
}

impl TypeBinder for ValueObjectBinder {
    fn name(&self) -> &'static str {
        "value object"
    }

    fn priority(&self) -> i32 {
        priority::VALUE_OBJECT
    }

    fn supports(&self, info: &TypeInfo) -> bool {
        info.is_record()
    }

    fn bind(
        &self,
        ctx: &dyn BindContext,
        path: &NamePath,
        bindable: Bindable,
        source: &DataSource,
        callback: &dyn BindCallback,
    ) -> BindResult<BoxedValue> {
        BindResult::from_result(Self::bind_record(ctx, path, bindable, source, callback))
    }
}
