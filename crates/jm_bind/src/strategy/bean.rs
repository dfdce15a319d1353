use alloc::vec::Vec;

use jm_path::NamePath;
use jm_reflect::BoxedValue;
use jm_reflect::info::{BeanInfo, Type, TypeInfo};

use crate::binder::BindContext;
use crate::callback::BindCallback;
use crate::source::DataSource;
use crate::strategy::{TypeBinder, convert_whole, is_leaf, priority, resolve};
use crate::{BindError, BindResult, Bindable};

/// Binds mutable beans property by property; the fallback strategy.
///
/// The bean is the given instance or a fresh one from its factory. Each
/// writable property binds at `path.name`, using the preferred name when
/// one is declared. Nested complex properties are bound into their current
/// value when the property has a getter. Opaque object types are handed
/// to the conversion service as a whole.
#[derive(Debug, Default, Clone, Copy)]
pub struct BeanBinder;

impl BeanBinder {
    fn bind_bean(
        ctx: &dyn BindContext,
        path: &NamePath,
        ty: Type,
        bean: &BeanInfo,
        mut bindable: Bindable,
        source: &DataSource,
        callback: &dyn BindCallback,
    ) -> Result<Option<BoxedValue>, BindError> {
        let Some(node) = resolve(source, path) else {
            return Ok(None);
        };
        if !node.is_map() {
            return convert_whole(ctx, node, &ty);
        }

        let mut instance = match bindable.take_instance() {
            Some(instance) => instance,
            None => bean
                .instantiate()
                .map_err(|source| BindError::Instantiation {
                    ty: ty.name(),
                    source,
                })?,
        };

        let shallow = ctx.binding_strategy().is_shallow();
        let mut errors: Vec<BindError> = Vec::new();

        for property in bean.writable_properties() {
            let leaf = is_leaf(ctx, property.ty())?;
            if shallow && !leaf {
                log::trace!("shallow binding skips property `{}` of `{ty}`", property.name());
                continue;
            }

            let child = path.append_str(property.binding_name());
            let mut nested = Bindable::of_type(*property.ty());
            if !leaf && let Some(current) = property.get(&*instance) {
                nested = nested.with_instance(current);
            }

            match ctx.bind(&child, nested, source, callback) {
                BindResult::Present(value) => {
                    if let Err(error) = property.set(&mut *instance, value) {
                        errors.push(error.into());
                    }
                }
                BindResult::Empty => {
                    log::debug!("no value bound for `{child}`, property `{}` left as is", property.name());
                }
                BindResult::Failed(error) => errors.push(error),
            }
        }

        if !errors.is_empty() {
            return Err(BindError::Properties {
                ty: ty.name(),
                errors,
            });
        }
        Ok(Some(instance))
    }
}

impl TypeBinder for BeanBinder {
    fn name(&self) -> &'static str {
        "bean"
    }

    fn priority(&self) -> i32 {
        priority::BEAN
    }

    fn supports(&self, info: &TypeInfo) -> bool {
        !info.is_record() && !info.is_scalar()
    }

    fn bind(
        &self,
        ctx: &dyn BindContext,
        path: &NamePath,
        bindable: Bindable,
        source: &DataSource,
        callback: &dyn BindCallback,
    ) -> BindResult<BoxedValue> {
        let ty = *bindable.ty();
        let info = match ctx.type_info(&ty) {
            Ok(info) => info,
            Err(error) => return BindResult::Failed(error),
        };

        match &*info {
            TypeInfo::Bean(bean) => BindResult::from_result(Self::bind_bean(
                ctx, path, ty, bean, bindable, source, callback,
            )),
            _ => self.bind_value(ctx, path, bindable, source, callback),
        }
    }
}
